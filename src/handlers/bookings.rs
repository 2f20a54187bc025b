// src/handlers/bookings.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::actor::Actor,
    models::bookings::{Booking, BookingDetail, BookingStatus, PaymentMethod},
    services::booking_service::{
        CreateBookingCommand, GuestInfo, MarkPaidCommand, ModifyBookingCommand,
    },
};

// =============================================================================
//  1. CRIAÇÃO
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub user_id: Uuid,

    pub room_ids: Vec<Uuid>,

    #[schema(example = "2024-12-10")]
    pub check_in: NaiveDate,

    #[schema(example = "2024-12-12")]
    pub check_out: NaiveDate,

    #[schema(example = 2)]
    pub guest_count: i32,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria Souza")]
    pub guest_name: String,

    #[validate(email(message = "invalid email"))]
    #[schema(example = "maria@example.com")]
    pub guest_email: String,

    pub guest_phone: Option<String>,

    #[schema(example = "NATAL2024")]
    pub promotion_code: Option<String>,
}

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva criada em PENDING", body = BookingDetail),
        (status = 400, description = "Entrada inválida"),
        (status = 409, description = "Quarto(s) em conflito; o corpo lista conflictingRoomIds")
    ),
    params(
        ("x-actor-id" = Uuid, Header, description = "Ator autenticado pela camada externa")
    )
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    _actor: Actor,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cmd = CreateBookingCommand::validated(
        payload.user_id,
        payload.room_ids,
        payload.check_in,
        payload.check_out,
        payload.guest_count,
        GuestInfo {
            name: payload.guest_name,
            email: payload.guest_email,
            phone: payload.guest_phone,
        },
        payload.promotion_code,
    )?;

    let booking = app_state.booking_service.create_booking(&cmd).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// =============================================================================
//  2. CONSULTA
// =============================================================================

// GET /api/bookings/{id}
//
// Atenção ao contrato de leitura: uma reserva CONFIRMED com a data de
// check-in vencida pode voltar daqui já como NO_SHOW.
#[utoipa::path(
    get,
    path = "/api/bookings/{booking_id}",
    tag = "Bookings",
    responses(
        (status = 200, description = "Reserva com os quartos", body = BookingDetail),
        (status = 404, description = "Reserva não encontrada")
    ),
    params(
        ("booking_id" = Uuid, Path, description = "ID da Reserva")
    )
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_service.get_booking(booking_id).await?;
    Ok(Json(booking))
}

// =============================================================================
//  3. TRANSIÇÕES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusPayload {
    #[schema(example = "CHECKED_IN")]
    pub status: BookingStatus,

    pub note: Option<String>,
}

// PATCH /api/bookings/{id}/status
#[utoipa::path(
    patch,
    path = "/api/bookings/{booking_id}/status",
    tag = "Bookings",
    request_body = UpdateBookingStatusPayload,
    responses(
        (status = 200, description = "Reserva no novo status", body = Booking),
        (status = 409, description = "Transição ilegal; o corpo nomeia o status atual e o alvo")
    ),
    params(
        ("booking_id" = Uuid, Path, description = "ID da Reserva"),
        ("x-actor-id" = Uuid, Header, description = "Ator autenticado pela camada externa")
    )
)]
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    actor: Actor,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state
        .booking_service
        .transition_booking(booking_id, payload.status, &actor, payload.note.as_deref())
        .await?;
    Ok(Json(booking))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Viagem cancelada pelo hóspede")]
    pub reason: String,
}

// POST /api/bookings/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/cancel",
    tag = "Bookings",
    request_body = CancelBookingPayload,
    responses(
        (status = 200, description = "Reserva cancelada (pedidos de serviço abertos em cascata)", body = Booking),
        (status = 409, description = "Cancelamento ilegal no status atual")
    ),
    params(
        ("booking_id" = Uuid, Path, description = "ID da Reserva"),
        ("x-actor-id" = Uuid, Header, description = "Ator autenticado pela camada externa")
    )
)]
pub async fn cancel_booking(
    State(app_state): State<AppState>,
    actor: Actor,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<CancelBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let booking = app_state
        .booking_service
        .cancel_booking(booking_id, &payload.reason, &actor)
        .await?;
    Ok(Json(booking))
}

// =============================================================================
//  4. PAGAMENTO (entrada idempotente do gateway externo)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaymentPayload {
    #[schema(example = "1150000.00")]
    pub amount: Decimal,

    #[schema(example = "CARD")]
    pub method: PaymentMethod,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "gw-2024-000123")]
    pub transaction_ref: String,
}

// POST /api/bookings/{id}/payments
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/payments",
    tag = "Bookings",
    request_body = RegisterPaymentPayload,
    responses(
        (status = 200, description = "Pagamento registrado; PENDING avança para CONFIRMED", body = Booking),
        (status = 400, description = "Pagamento excede o total da reserva"),
        (status = 409, description = "transaction_ref já usada em outra reserva")
    ),
    params(
        ("booking_id" = Uuid, Path, description = "ID da Reserva")
    )
)]
pub async fn register_payment(
    State(app_state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<RegisterPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let cmd = MarkPaidCommand {
        amount: payload.amount,
        method: payload.method,
        transaction_ref: payload.transaction_ref,
    };
    let booking = app_state.booking_service.mark_paid(booking_id, &cmd).await?;
    Ok(Json(booking))
}

// =============================================================================
//  5. MODIFICAÇÃO
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModifyBookingPayload {
    pub room_ids: Option<Vec<Uuid>>,

    #[schema(example = "2024-12-11")]
    pub check_in: Option<NaiveDate>,

    #[schema(example = "2024-12-14")]
    pub check_out: Option<NaiveDate>,
}

// PATCH /api/bookings/{id}
//
// Semântica de cancela-e-recria em uma transação: ou a reserva inteira
// passa para os novos quartos/datas, ou nada muda.
#[utoipa::path(
    patch,
    path = "/api/bookings/{booking_id}",
    tag = "Bookings",
    request_body = ModifyBookingPayload,
    responses(
        (status = 200, description = "Reserva modificada e reprecificada", body = BookingDetail),
        (status = 409, description = "Conflito nos novos quartos/datas, reserva original intacta")
    ),
    params(
        ("booking_id" = Uuid, Path, description = "ID da Reserva"),
        ("x-actor-id" = Uuid, Header, description = "Ator autenticado pela camada externa")
    )
)]
pub async fn modify_booking(
    State(app_state): State<AppState>,
    _actor: Actor,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<ModifyBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let new_dates = match (payload.check_in, payload.check_out) {
        (Some(check_in), Some(check_out)) => Some((check_in, check_out)),
        (None, None) => None,
        _ => {
            return Err(AppError::InvalidBookingRequest(
                "checkIn e checkOut devem vir juntos",
            ))
        }
    };

    let cmd = ModifyBookingCommand::validated(payload.room_ids, new_dates)?;
    let booking = app_state
        .booking_service
        .modify_booking(booking_id, &cmd)
        .await?;
    Ok(Json(booking))
}
