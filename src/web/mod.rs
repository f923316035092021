//! Web server module

mod middleware;
mod routes;

use anyhow::Result;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::dashboard::attendance::DeviceClient;
use crate::db::Database;

pub struct AppState {
    pub db: Database,
    pub devices: DeviceClient,
    pub config: Config,
}

pub async fn start_server(config: &Config, db: Database, devices: DeviceClient) -> Result<()> {
    let state = Arc::new(AppState {
        db,
        devices,
        config: config.clone(),
    });

    let cors = if config.server.cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(config.server.cors_origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Everything except login and the health probe sits behind the token check
    let protected = Router::new()
        .route("/dashboard", get(routes::dashboard))
        .route(
            "/employees",
            get(routes::list_employees).post(routes::create_employee),
        )
        .route("/employees/departments", get(routes::departments))
        .route("/employees/designations", get(routes::designations))
        .route(
            "/employees/:id",
            get(routes::get_employee)
                .put(routes::update_employee)
                .delete(routes::delete_employee),
        )
        .route(
            "/leave-requests",
            get(routes::list_leave_requests).post(routes::create_leave_request),
        )
        .route(
            "/leave-requests/:id",
            get(routes::get_leave_request)
                .put(routes::update_leave_request)
                .delete(routes::delete_leave_request),
        )
        .route(
            "/requests",
            get(routes::list_travel_requests).post(routes::create_travel_request),
        )
        .route(
            "/requests/:id",
            get(routes::get_travel_request)
                .put(routes::update_travel_request)
                .delete(routes::delete_travel_request),
        )
        .route(
            "/tickets",
            get(routes::list_ticket_bookings).post(routes::create_ticket_booking),
        )
        .route(
            "/tickets/:id",
            get(routes::get_ticket_booking)
                .put(routes::update_ticket_booking)
                .delete(routes::delete_ticket_booking),
        )
        .route(
            "/resumes",
            get(routes::list_resumes).post(routes::create_resume),
        )
        .route("/resumes/selected", get(routes::list_selected_candidates))
        .route(
            "/resumes/:id",
            get(routes::get_resume)
                .put(routes::update_resume)
                .delete(routes::delete_resume),
        )
        .route(
            "/plant-visitors",
            get(routes::list_plant_visitors).post(routes::create_plant_visitor),
        )
        .route(
            "/plant-visitors/:id",
            get(routes::get_plant_visitor)
                .put(routes::update_plant_visitor)
                .delete(routes::delete_plant_visitor),
        )
        .layer(middleware::RequireAuthLayer::new(state.clone()));

    let api = Router::new()
        .route("/auth/login", post(routes::login))
        .merge(protected);

    let app = Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api)
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.http_port);
    info!("Web server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
