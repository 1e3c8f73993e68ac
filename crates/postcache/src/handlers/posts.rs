use axum::{
    extract::{Path, Query, State},
    Json,
};

use postcache_core::blog::{FeaturedQuery, PageQuery, PostWithDetails};

use super::{parse_id, AppError, CacheParams};
use crate::services::PostPage;
use crate::state::AppState;

/// List published posts (GET /posts?page=&pageSize=).
pub async fn list_posts(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    Query(cache): Query<CacheParams>,
) -> Result<Json<PostPage>, AppError> {
    let posts = state
        .posts
        .select(cache.mode())
        .get_posts(page.page, page.page_size)
        .await?;
    Ok(Json(posts))
}

/// Get a post by ID (GET /posts/{id}). Records a view.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(cache): Query<CacheParams>,
) -> Result<Json<PostWithDetails>, AppError> {
    let id = parse_id(&id, "post")?;
    let post = state.posts.select(cache.mode()).get_post_by_id(id).await?;
    Ok(Json(post))
}

/// Get a post by slug (GET /posts/slug/{slug}). Records a view.
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(cache): Query<CacheParams>,
) -> Result<Json<PostWithDetails>, AppError> {
    let post = state
        .posts
        .select(cache.mode())
        .get_post_by_slug(&slug)
        .await?;
    Ok(Json(post))
}

/// Posts in a category (GET /posts/category/{slug}).
pub async fn list_posts_by_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(page): Query<PageQuery>,
    Query(cache): Query<CacheParams>,
) -> Result<Json<Vec<PostWithDetails>>, AppError> {
    let posts = state
        .posts
        .select(cache.mode())
        .get_posts_by_category(&slug, page.page, page.page_size)
        .await?;
    Ok(Json(posts))
}

/// Posts with a tag (GET /posts/tag/{slug}).
pub async fn list_posts_by_tag(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(page): Query<PageQuery>,
    Query(cache): Query<CacheParams>,
) -> Result<Json<Vec<PostWithDetails>>, AppError> {
    let posts = state
        .posts
        .select(cache.mode())
        .get_posts_by_tag(&slug, page.page, page.page_size)
        .await?;
    Ok(Json(posts))
}

/// Featured posts (GET /posts/featured?limit=).
pub async fn list_featured_posts(
    State(state): State<AppState>,
    Query(featured): Query<FeaturedQuery>,
    Query(cache): Query<CacheParams>,
) -> Result<Json<Vec<PostWithDetails>>, AppError> {
    let posts = state
        .posts
        .select(cache.mode())
        .get_featured_posts(featured.limit)
        .await?;
    Ok(Json(posts))
}
