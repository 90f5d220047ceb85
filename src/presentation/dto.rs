use serde::{Deserialize, Serialize};

// Absent fields deserialize to None so the service can answer with the
// contractual 400 body instead of a serde rejection.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchPostsQuery {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
