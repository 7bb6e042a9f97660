//! Three small, independent web apps sharing one ambient stack: a
//! static hello page, a notes CRUD app with cookie-session auth over
//! PostgreSQL, and a weather lookup page proxying an upstream API.
//! Each app has its own binary under `src/bin/`; the routers live here
//! so tests can drive them in-process.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod hello;
pub mod middleware;
pub mod pages;
pub mod session;
pub mod weather;

/// Shared state for the notes app, built once at startup and injected
/// into every handler through axum state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<config::AppConfig>,
}

/// Notes CRUD app: CRUD routes behind `require_auth`, public
/// login/register/logout, plus a health probe.
pub fn notes_app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(handlers::notes::list))
        .route("/add_note", post(handlers::notes::add))
        .route(
            "/edit_note/:id",
            get(handlers::notes::edit_form).post(handlers::notes::edit),
        )
        .route("/delete_note/:id", post(handlers::notes::delete))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    let public = Router::new()
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route(
            "/register",
            get(handlers::auth::register_form).post(handlers::auth::register),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/health", get(handlers::health));

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Weather lookup app: a single page with a city search form.
pub fn weather_app(client: weather::WeatherClient) -> Router {
    Router::new()
        .route("/", get(weather::form).post(weather::lookup))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

/// Static hello page.
pub fn hello_app() -> Router {
    Router::new()
        .route("/", get(hello::page))
        .layer(TraceLayer::new_for_http())
}
