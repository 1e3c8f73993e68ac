use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::health,
        posts::{
            get_post, get_post_by_slug, list_featured_posts, list_posts, list_posts_by_category,
            list_posts_by_tag,
        },
        user_details::{get_user_detail, get_user_detail_by_username},
        users::{create_user, delete_user, get_user, list_users, update_user},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        // User routes
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/detail", get(get_user_detail))
        .route(
            "/users/username/{username}/detail",
            get(get_user_detail_by_username),
        )
        // Post routes
        .route("/posts", get(list_posts))
        .route("/posts/featured", get(list_featured_posts))
        .route("/posts/{id}", get(get_post))
        .route("/posts/slug/{slug}", get(get_post_by_slug))
        .route("/posts/category/{slug}", get(list_posts_by_category))
        .route("/posts/tag/{slug}", get(list_posts_by_tag))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
