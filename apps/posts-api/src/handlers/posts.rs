//! Post endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use posts_core::domain::{NewPost, Post};
use posts_shared::ErrorCode;
use posts_shared::dto::{
    CreatePostRequest, DeletePostResponse, ListPostsQuery, PostCountResponse, PostResponse,
};
use posts_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        message: post.message,
        owner_id: post.owner_id,
        topic_id: post.topic_id,
        category_id: post.category_id,
        category_name: post.category_name,
        created_at: post.created_at,
        reply_count: post.reply_count,
        replies: post.replies,
    }
}

/// Create a post owned by the authenticated caller.
///
/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    tracing::info!(user_id = %identity.user_id, title = %req.title, "Create post request");

    let post = state
        .posts
        .create_post(
            &identity.caller(),
            NewPost::new(req.title, req.message, req.category_id),
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// List posts, optionally restricted to categories.
///
/// GET /api/posts?categories=1,2
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let categories = query
        .category_ids()
        .map_err(|msg| AppError::BadRequest(ErrorCode::FailedToGetPost, msg))?;

    let posts = state.posts.list_posts(categories.as_deref()).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// Delete a post. Only its owner or an admin may do so.
///
/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete_post(id, &identity.caller()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(DeletePostResponse {
        message: format!("Post {} deleted successfully.", id),
    })))
}

/// GET /api/posts/count/{user_id}
pub async fn count_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let count = state.posts.count_posts_by_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostCountResponse { user_id, count })))
}
