//src/main.rs

use axum::{
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização.
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Disponibilidade (pré-checagem de navegação)
    let room_routes = Router::new()
        .route("/types", get(handlers::rooms::list_room_types))
        .route("/available", get(handlers::rooms::list_available_rooms))
        .route("/availability", post(handlers::rooms::check_availability));

    // Reservas: criação, consulta, transições, pagamento e modificação
    let booking_routes = Router::new()
        .route("/", post(handlers::bookings::create_booking))
        .route(
            "/{booking_id}",
            get(handlers::bookings::get_booking).patch(handlers::bookings::modify_booking),
        )
        .route(
            "/{booking_id}/status",
            patch(handlers::bookings::update_booking_status),
        )
        .route(
            "/{booking_id}/cancel",
            post(handlers::bookings::cancel_booking),
        )
        .route(
            "/{booking_id}/payments",
            post(handlers::bookings::register_payment),
        );

    // Pedidos de serviço durante a estadia
    let service_booking_routes = Router::new()
        .route("/", post(handlers::service_bookings::create_service_booking))
        .route(
            "/{service_booking_id}",
            get(handlers::service_bookings::get_service_booking),
        )
        .route(
            "/{service_booking_id}/status",
            patch(handlers::service_bookings::update_service_status),
        )
        .route(
            "/{service_booking_id}/assign-staff",
            post(handlers::service_bookings::assign_staff),
        )
        .route(
            "/{service_booking_id}/cancel",
            post(handlers::service_bookings::cancel_service_booking),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/rooms", room_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/service-bookings", service_booking_routes)
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
