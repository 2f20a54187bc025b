// src/handlers/rooms.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::rooms::{Room, RoomType},
    services::availability_service::Availability,
};

// GET /api/rooms/types
//
// Dados de referência do inventário: tipos de quarto com tarifa base e
// capacidade. A tarifa vigente aqui NÃO afeta reservas já criadas.
#[utoipa::path(
    get,
    path = "/api/rooms/types",
    tag = "Rooms",
    responses(
        (status = 200, description = "Tipos de quarto cadastrados", body = [RoomType])
    )
)]
pub async fn list_room_types(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let types = app_state
        .room_repo
        .list_room_types(&app_state.db_pool)
        .await?;
    Ok(Json(types))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

// GET /api/rooms/available
//
// Pré-checagem de navegação: a resposta pode ficar obsoleta até o commit;
// quem decide de verdade é a re-checagem dentro da transação de criação.
#[utoipa::path(
    get,
    path = "/api/rooms/available",
    tag = "Rooms",
    params(
        ("checkIn" = NaiveDate, Query, description = "Data de entrada (AAAA-MM-DD)"),
        ("checkOut" = NaiveDate, Query, description = "Data de saída (AAAA-MM-DD)")
    ),
    responses(
        (status = 200, description = "Quartos livres no período", body = [Room]),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn list_available_rooms(
    State(app_state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.check_out <= query.check_in {
        return Err(AppError::InvalidDateRange);
    }

    let rooms = app_state
        .availability_service
        .list_available_rooms(query.check_in, query.check_out)
        .await?;

    Ok(Json(rooms))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCheckPayload {
    pub room_ids: Vec<Uuid>,

    #[schema(example = "2024-12-10")]
    pub check_in: NaiveDate,

    #[schema(example = "2024-12-12")]
    pub check_out: NaiveDate,
}

// POST /api/rooms/availability
//
// Checagem pontual de um conjunto de quartos. Mesmo cálculo usado como
// portão autoritativo na criação, aqui fora de transação.
#[utoipa::path(
    post,
    path = "/api/rooms/availability",
    tag = "Rooms",
    request_body = AvailabilityCheckPayload,
    responses(
        (status = 200, description = "Resultado com os quartos em conflito, se houver", body = Availability),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn check_availability(
    State(app_state): State<AppState>,
    Json(payload): Json<AvailabilityCheckPayload>,
) -> Result<impl IntoResponse, AppError> {
    if payload.check_out <= payload.check_in {
        return Err(AppError::InvalidDateRange);
    }

    let availability = app_state
        .availability_service
        .is_available(
            &app_state.db_pool,
            &payload.room_ids,
            payload.check_in,
            payload.check_out,
        )
        .await?;

    Ok(Json(availability))
}
