use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::{
    error::DomainError,
    post::{Post, SortSpec},
};
use crate::presentation::dto::UpdatePostRequest;
use tracing::instrument;

pub struct PostService<R: PostRepository + 'static> {
    repo: Arc<R>,
}

impl<R: PostRepository + 'static> Clone for PostService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> PostService<R>
where
    R: PostRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_posts(&self, sort: Option<SortSpec>) -> Result<Vec<Post>, DomainError> {
        self.repo.list(sort).await
    }

    /// Both fields must be present and non-empty; empty strings count as
    /// missing, matching the 400 contract of the create endpoint.
    #[instrument(skip(self))]
    pub async fn create_post(
        &self,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Post, DomainError> {
        let title = title
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::MissingTitleOrContent)?;
        let content = content
            .filter(|c| !c.is_empty())
            .ok_or(DomainError::MissingTitleOrContent)?;
        self.repo.create(title, content).await
    }

    #[instrument(skip(self))]
    pub async fn update_post(
        &self,
        id: u64,
        update: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        match self.repo.update(id, update).await {
            Ok(Some(post)) => Ok(post),
            Ok(None) => Err(DomainError::PostNotFound(id)),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: u64) -> Result<(), DomainError> {
        self.repo.delete(id).await
    }

    pub async fn search_posts(
        &self,
        title_term: Option<&str>,
        content_term: Option<&str>,
    ) -> Result<Vec<Post>, DomainError> {
        self.repo.search(title_term, content_term).await
    }
}
