use crate::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
