pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;

pub use crate::api::{Post, PostId, PostUpdate};
pub use crate::config::ConfigStore;
pub use crate::controller::{Controller, WeakController};
pub use crate::error::ApiError;
pub use crate::render::Renderer;
