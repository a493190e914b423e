use crate::app::{
    api::{session, status},
    state::State,
};
use axum::{
    extract::Extension,
    routing::get,
    Router,
};
use svc_utils::middleware::{LogLayer, MeteredRoute};

pub fn new<S: State>(state: S) -> Router {
    api_router::<S>()
        .layer(Extension(state))
        .layer(LogLayer::new())
}

fn api_router<S: State>() -> Router {
    Router::new()
        .metered_route("/health", get(status::health))
        .metered_route(
            "/sessions",
            get(session::list::<S>).post(session::create::<S>),
        )
}

pub fn new_pinger() -> Router {
    Router::new()
        .metered_route("/ping", get(status::ping))
        .layer(LogLayer::new())
}
