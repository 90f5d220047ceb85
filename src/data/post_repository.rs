use crate::domain::error::DomainError;
use crate::domain::post::{Post, SortDirection, SortField, SortSpec};
use crate::presentation::dto::UpdatePostRequest;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self, sort: Option<SortSpec>) -> Result<Vec<Post>, DomainError>;
    async fn create(&self, title: String, content: String) -> Result<Post, DomainError>;
    async fn update(
        &self,
        id: u64,
        update: UpdatePostRequest,
    ) -> Result<Option<Post>, DomainError>;
    async fn delete(&self, id: u64) -> Result<(), DomainError>;
    async fn search(
        &self,
        title_term: Option<&str>,
        content_term: Option<&str>,
    ) -> Result<Vec<Post>, DomainError>;
}

/// Process-wide post storage. A single lock serializes every operation, so
/// concurrent creates cannot observe the same maximum id.
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::with_posts(Vec::new())
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// The two posts every fresh process starts with.
    pub fn seeded() -> Self {
        Self::with_posts(vec![
            Post::new(1, "First post".into(), "This is the first post.".into()),
            Post::new(2, "Second post".into(), "This is the second post.".into()),
        ])
    }
}

impl Default for MemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list(&self, sort: Option<SortSpec>) -> Result<Vec<Post>, DomainError> {
        match sort {
            Some(spec) => {
                // Sorting reorders the stored collection itself, not just the
                // returned view. Subsequent unsorted reads observe the new order.
                let mut posts = self.posts.write().await;
                posts.sort_by(|a, b| {
                    let ord = match spec.field {
                        SortField::Title => a.title.cmp(&b.title),
                        SortField::Content => a.content.cmp(&b.content),
                    };
                    match spec.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                });
                Ok(posts.clone())
            }
            None => Ok(self.posts.read().await.clone()),
        }
    }

    async fn create(&self, title: String, content: String) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;
        // Max over the empty store is taken as 0, so ids start at 1.
        let next_id = posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;
        let post = Post::new(next_id, title, content);
        posts.push(post.clone());
        info!(post_id = post.id, "post created");
        Ok(post)
    }

    async fn update(
        &self,
        id: u64,
        update: UpdatePostRequest,
    ) -> Result<Option<Post>, DomainError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };
        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        info!(post_id = id, "post updated");
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: u64) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(DomainError::PostNotFound(id));
        }
        info!(post_id = id, "post deleted");
        Ok(())
    }

    async fn search(
        &self,
        title_term: Option<&str>,
        content_term: Option<&str>,
    ) -> Result<Vec<Post>, DomainError> {
        let title_term = title_term.map(str::to_lowercase);
        let content_term = content_term.map(str::to_lowercase);
        let posts = self.posts.read().await;
        let matches = posts
            .iter()
            .filter(|post| {
                title_term
                    .as_deref()
                    .is_none_or(|term| post.title.to_lowercase().contains(term))
                    && content_term
                        .as_deref()
                        .is_none_or(|term| post.content.to_lowercase().contains(term))
            })
            .cloned()
            .collect();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_posts() -> Vec<Post> {
        vec![
            Post::new(1, "Banana bread".into(), "Recipe one".into()),
            Post::new(2, "Apple pie".into(), "Recipe two".into()),
            Post::new(5, "Cherry cake".into(), "Recipe three".into()),
        ]
    }

    #[tokio::test]
    async fn create_starts_ids_at_one_on_an_empty_store() {
        let repo = MemoryPostRepository::new();
        let post = repo.create("Hello".into(), "World".into()).await.unwrap();
        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn create_assigns_max_id_plus_one() {
        let repo = MemoryPostRepository::with_posts(sample_posts());
        let post = repo.create("New".into(), "Post".into()).await.unwrap();
        assert_eq!(post.id, 6);
    }

    #[tokio::test]
    async fn deleting_the_highest_id_frees_it_for_reuse() {
        let repo = MemoryPostRepository::seeded();
        repo.delete(2).await.unwrap();
        let post = repo.create("Again".into(), "Reused".into()).await.unwrap();
        assert_eq!(post.id, 2);
    }

    #[tokio::test]
    async fn sorted_list_permanently_reorders_the_store() {
        let repo = MemoryPostRepository::with_posts(sample_posts());
        let spec = SortSpec::from_params(Some("title"), Some("asc")).unwrap();
        let sorted = repo.list(Some(spec)).await.unwrap();
        assert_eq!(
            sorted.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![2, 1, 5]
        );

        // The reorder sticks. A plain list sees the sorted order, which is a
        // deliberate carry-over of the original behavior rather than a bug.
        let unsorted = repo.list(None).await.unwrap();
        assert_eq!(
            unsorted.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![2, 1, 5]
        );
    }

    #[tokio::test]
    async fn desc_sort_reverses_asc_sort() {
        let repo = MemoryPostRepository::with_posts(sample_posts());
        let asc = repo
            .list(SortSpec::from_params(Some("content"), Some("asc")))
            .await
            .unwrap();
        let desc = repo
            .list(SortSpec::from_params(Some("content"), Some("desc")))
            .await
            .unwrap();
        let mut reversed = desc;
        reversed.reverse();
        assert_eq!(asc, reversed);
    }

    #[tokio::test]
    async fn unrecognized_sort_params_leave_order_alone() {
        let repo = MemoryPostRepository::with_posts(sample_posts());
        assert!(SortSpec::from_params(Some("author"), Some("asc")).is_none());
        assert!(SortSpec::from_params(Some("title"), Some("up")).is_none());
        assert!(SortSpec::from_params(Some("title"), None).is_none());
        let posts = repo.list(None).await.unwrap();
        assert_eq!(
            posts.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2, 5]
        );
    }

    #[tokio::test]
    async fn update_overwrites_only_provided_fields() {
        let repo = MemoryPostRepository::seeded();
        let updated = repo
            .update(
                1,
                UpdatePostRequest {
                    title: Some("Renamed".into()),
                    content: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.content, "This is the first post.");
        assert_eq!(updated.id, 1);
    }

    #[tokio::test]
    async fn update_accepts_empty_strings() {
        // Creation rejects empty fields but update does not.
        let repo = MemoryPostRepository::seeded();
        let updated = repo
            .update(
                2,
                UpdatePostRequest {
                    title: Some(String::new()),
                    content: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "");
    }

    #[tokio::test]
    async fn update_of_unknown_id_returns_none() {
        let repo = MemoryPostRepository::seeded();
        let result = repo
            .update(
                99,
                UpdatePostRequest {
                    title: Some("x".into()),
                    content: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_keeps_order() {
        let repo = MemoryPostRepository::with_posts(sample_posts());
        repo.delete(2).await.unwrap();
        let posts = repo.list(None).await.unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 5]);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_fails_and_mutates_nothing() {
        let repo = MemoryPostRepository::seeded();
        let err = repo.delete(42).await.unwrap_err();
        assert!(matches!(err, DomainError::PostNotFound(42)));
        assert_eq!(repo.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let repo = MemoryPostRepository::with_posts(sample_posts());
        let hits = repo.search(Some("APPLE"), None).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[tokio::test]
    async fn search_terms_combine_as_a_conjunction() {
        let repo = MemoryPostRepository::with_posts(sample_posts());
        let hits = repo.search(Some("a"), Some("three")).await.unwrap();
        assert_eq!(hits.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5]);
    }

    #[tokio::test]
    async fn search_without_terms_returns_everything() {
        let repo = MemoryPostRepository::with_posts(sample_posts());
        let hits = repo.search(None, None).await.unwrap();
        assert_eq!(hits.len(), 3);
    }
}
