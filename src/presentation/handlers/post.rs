use crate::application::post_service::PostService;
use crate::data::post_repository::MemoryPostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::SortSpec;
use crate::presentation::dto::{
    CreatePostRequest, DeleteResponse, ListPostsQuery, SearchPostsQuery, UpdatePostRequest,
};
use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

type Service = web::Data<PostService<MemoryPostRepository>>;

#[get("/posts")]
pub async fn get_posts(
    service: Service,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse, DomainError> {
    let sort = SortSpec::from_params(query.sort.as_deref(), query.direction.as_deref());
    let posts = service.list_posts(sort).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[post("/posts")]
pub async fn create_post(
    service: Service,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let payload = payload.into_inner();
    let post = service.create_post(payload.title, payload.content).await?;

    info!(post_id = post.id, "post created");

    Ok(HttpResponse::Created().json(post))
}

#[put("/update/{id}")]
pub async fn update_post(
    service: Service,
    path: web::Path<u64>,
    payload: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    let post = service.update_post(id, payload.into_inner()).await?;

    info!(post_id = id, "post updated");

    Ok(HttpResponse::Ok().json(post))
}

#[delete("/delete/{id}")]
pub async fn delete_post(
    service: Service,
    path: web::Path<u64>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    service.delete_post(id).await?;

    info!(post_id = id, "post deleted");

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: format!("Post with ID {id} has been deleted."),
    }))
}

#[get("/posts/search")]
pub async fn search_posts(
    service: Service,
    query: web::Query<SearchPostsQuery>,
) -> Result<HttpResponse, DomainError> {
    // An empty query value counts as no filter at all.
    let title_term = query.title.as_deref().filter(|t| !t.is_empty());
    let content_term = query.content.as_deref().filter(|c| !c.is_empty());
    let posts = service.search_posts(title_term, content_term).await?;
    Ok(HttpResponse::Ok().json(posts))
}
