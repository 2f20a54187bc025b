// src/handlers/service_bookings.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::actor::Actor,
    models::services::{ServiceBooking, ServiceBookingStatus},
    services::service_booking_service::CreateServiceBookingCommand,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceBookingPayload {
    pub booking_id: Uuid,

    pub service_id: Uuid,

    #[schema(example = "2024-12-11T15:00:00Z")]
    pub scheduled_at: DateTime<Utc>,

    #[schema(example = 1)]
    pub quantity: i32,
}

// POST /api/service-bookings
#[utoipa::path(
    post,
    path = "/api/service-bookings",
    tag = "Service Bookings",
    request_body = CreateServiceBookingPayload,
    responses(
        (status = 201, description = "Pedido de serviço criado em PENDING", body = ServiceBooking),
        (status = 400, description = "Reserva pai não está em CHECKED_IN"),
        (status = 404, description = "Reserva ou serviço não encontrado")
    ),
    params(
        ("x-actor-id" = Uuid, Header, description = "Ator autenticado pela camada externa")
    )
)]
pub async fn create_service_booking(
    State(app_state): State<AppState>,
    _actor: Actor,
    Json(payload): Json<CreateServiceBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let cmd = CreateServiceBookingCommand::validated(
        payload.booking_id,
        payload.service_id,
        payload.scheduled_at,
        payload.quantity,
    )?;

    let created = app_state
        .service_booking_service
        .create_service_booking(&cmd)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/service-bookings/{id}
#[utoipa::path(
    get,
    path = "/api/service-bookings/{service_booking_id}",
    tag = "Service Bookings",
    responses(
        (status = 200, description = "Pedido de serviço", body = ServiceBooking),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("service_booking_id" = Uuid, Path, description = "ID do Pedido de Serviço")
    )
)]
pub async fn get_service_booking(
    State(app_state): State<AppState>,
    Path(service_booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sb = app_state
        .service_booking_service
        .get_service_booking(service_booking_id)
        .await?;
    Ok(Json(sb))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceStatusPayload {
    #[schema(example = "IN_PROGRESS")]
    pub status: ServiceBookingStatus,

    #[schema(example = "Hóspede pediu para adiantar meia hora")]
    pub staff_notes: Option<String>,
}

// PATCH /api/service-bookings/{id}/status
#[utoipa::path(
    patch,
    path = "/api/service-bookings/{service_booking_id}/status",
    tag = "Service Bookings",
    request_body = UpdateServiceStatusPayload,
    responses(
        (status = 200, description = "Pedido no novo status", body = ServiceBooking),
        (status = 409, description = "Transição ilegal; o corpo nomeia o status atual e o alvo")
    ),
    params(
        ("service_booking_id" = Uuid, Path, description = "ID do Pedido de Serviço"),
        ("x-actor-id" = Uuid, Header, description = "Ator autenticado pela camada externa")
    )
)]
pub async fn update_service_status(
    State(app_state): State<AppState>,
    _actor: Actor,
    Path(service_booking_id): Path<Uuid>,
    Json(payload): Json<UpdateServiceStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let sb = app_state
        .service_booking_service
        .transition(
            service_booking_id,
            payload.status,
            payload.staff_notes.as_deref(),
        )
        .await?;
    Ok(Json(sb))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignStaffPayload {
    pub staff_id: Uuid,
}

// POST /api/service-bookings/{id}/assign-staff
#[utoipa::path(
    post,
    path = "/api/service-bookings/{service_booking_id}/assign-staff",
    tag = "Service Bookings",
    request_body = AssignStaffPayload,
    responses(
        (status = 200, description = "Funcionário atribuído", body = ServiceBooking),
        (status = 409, description = "Já atribuído, ou status não aceita atribuição")
    ),
    params(
        ("service_booking_id" = Uuid, Path, description = "ID do Pedido de Serviço"),
        ("x-actor-id" = Uuid, Header, description = "Ator autenticado pela camada externa")
    )
)]
pub async fn assign_staff(
    State(app_state): State<AppState>,
    actor: Actor,
    Path(service_booking_id): Path<Uuid>,
    Json(payload): Json<AssignStaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    let sb = app_state
        .service_booking_service
        .assign_staff(service_booking_id, payload.staff_id, &actor)
        .await?;
    Ok(Json(sb))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelServiceBookingPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Hóspede desistiu")]
    pub reason: String,
}

// POST /api/service-bookings/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/service-bookings/{service_booking_id}/cancel",
    tag = "Service Bookings",
    request_body = CancelServiceBookingPayload,
    responses(
        (status = 200, description = "Pedido cancelado", body = ServiceBooking),
        (status = 409, description = "Cancelamento ilegal no status atual")
    ),
    params(
        ("service_booking_id" = Uuid, Path, description = "ID do Pedido de Serviço"),
        ("x-actor-id" = Uuid, Header, description = "Ator autenticado pela camada externa")
    )
)]
pub async fn cancel_service_booking(
    State(app_state): State<AppState>,
    _actor: Actor,
    Path(service_booking_id): Path<Uuid>,
    Json(payload): Json<CancelServiceBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sb = app_state
        .service_booking_service
        .cancel(service_booking_id, &payload.reason)
        .await?;
    Ok(Json(sb))
}
