use crate::{handlers, state::SharedState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/security", get(handlers::security).post(handlers::check_password))
        .route("/:page", get(handlers::page))
        .route("/grooming/:id", get(handlers::post_detail))
        .route("/grooming/:id/vote/:vote", post(handlers::vote))
        .route("/reports", post(handlers::submit_report))
        .route("/phishing/answer", post(handlers::answer_quiz))
        .route("/phishing/reset", post(handlers::reset_quiz))
        .route("/admin/login", post(handlers::login))
        .route("/admin/logout", post(handlers::logout))
        .route("/admin/posts", post(handlers::publish))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
