use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::ApiError;

/// Server-assigned identifier, immutable once created. The backend hands out
/// integers today but the client treats the id as opaque and preserves
/// whatever scalar appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{n}"),
            PostId::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct NewPost<'a> {
    title: &'a str,
    content: &'a str,
}

/// Partial mutation payload for the update operation. Only the fields that
/// are present end up in the PUT body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostUpdate {
    /// Builds a patch from raw prompt input. Either field may be absent
    /// (prompt cancelled) or blank; both mean "no change". Surviving values
    /// are trimmed.
    pub fn from_input(title: Option<&str>, content: Option<&str>) -> PostUpdate {
        let keep = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        PostUpdate {
            title: keep(title),
            content: keep(content),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Joins `{base}/posts`, tolerating a trailing slash on the base URL.
fn posts_url(base_url: &str) -> String {
    format!("{}/posts", base_url.trim_end_matches('/'))
}

fn post_url(base_url: &str, id: &PostId) -> String {
    format!("{}/{}", posts_url(base_url), id)
}

/// Issues a request and resolves with the `Response`. Transport failures
/// (fetch promise rejection) map to `ApiError::Network`.
async fn fetch(request: Request) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(ApiError::network)?;
    value.dyn_into::<Response>().map_err(ApiError::network)
}

/// Reads the response body as JSON and deserializes it. An unparseable body
/// or a shape mismatch maps to `ApiError::Decode`.
async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let promise: js_sys::Promise = response.json().map_err(ApiError::decode)?;
    let value = JsFuture::from(promise).await.map_err(ApiError::decode)?;
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn request(url: &str, method: &str, body: Option<String>) -> Result<Request, ApiError> {
    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = body {
        let headers = Headers::new().map_err(ApiError::network)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(ApiError::network)?;
        init.set_headers(headers.as_ref());
        init.set_body(&JsValue::from_str(&body));
    }
    Request::new_with_str_and_init(url, &init).map_err(ApiError::network)
}

/// GET `{base}/posts`. The decoded sequence keeps server order; the client
/// never re-sorts.
pub async fn list_posts(base_url: &str) -> Result<Vec<Post>, ApiError> {
    let request = request(&posts_url(base_url), "GET", None)?;
    decode_json(fetch(request).await?).await
}

/// POST `{base}/posts` with a `{title, content}` body. Resolves with the
/// server-assigned post, id included.
pub async fn create_post(base_url: &str, title: &str, content: &str) -> Result<Post, ApiError> {
    let body = serde_json::to_string(&NewPost { title, content })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    let request = request(&posts_url(base_url), "POST", Some(body))?;
    decode_json(fetch(request).await?).await
}

/// PUT `{base}/posts/{id}` with only the fields present in `patch`. An empty
/// patch is rejected before any request is issued.
pub async fn update_post(base_url: &str, id: &PostId, patch: &PostUpdate) -> Result<Post, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::Validation("Title and content cannot be empty"));
    }
    let body = serde_json::to_string(patch).map_err(|e| ApiError::Decode(e.to_string()))?;
    let request = request(&post_url(base_url, id), "PUT", Some(body))?;
    decode_json(fetch(request).await?).await
}

/// DELETE `{base}/posts/{id}`. The response body is ignored; a missing or
/// already-deleted id is the server's concern.
pub async fn delete_post(base_url: &str, id: &PostId) -> Result<(), ApiError> {
    let request = request(&post_url(base_url, id), "DELETE", None)?;
    fetch(request).await?;
    Ok(())
}
