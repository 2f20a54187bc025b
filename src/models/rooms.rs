// src/models/rooms.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Situação operacional do quarto. Mutada pela governança/manutenção (fora
// deste core) e indiretamente pelo check-in/check-out das reservas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "room_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Cleaning,
    OutOfOrder,
}

impl RoomStatus {
    // Quartos nestes estados nunca aparecem na busca de disponibilidade,
    // mesmo sem nenhuma reserva conflitante.
    pub fn is_bookable(&self) -> bool {
        !matches!(self, RoomStatus::Maintenance | RoomStatus::OutOfOrder)
    }
}

// --- Tipos de Quarto ---
// Dados de referência imutáveis durante o cálculo de uma reserva:
// a tarifa base vem daqui e é congelada em booking_rooms.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: Uuid,
    #[schema(example = "Deluxe Casal")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "500000.00")]
    pub base_price: Decimal,
    #[schema(example = 2)]
    pub capacity: i32,
    #[schema(example = "1 cama queen")]
    pub bed_config: String,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Quartos ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub room_type_id: Uuid,
    #[schema(example = "101")]
    pub room_number: String,
    #[schema(example = 1)]
    pub floor: i32,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção usada pelo orquestrador: o quarto junto da capacidade e tarifa
// do seu tipo, lida com lock de linha dentro da transação de reserva.
#[derive(Debug, Clone, FromRow)]
pub struct RoomForBooking {
    pub id: Uuid,
    pub status: RoomStatus,
    pub capacity: i32,
    pub base_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_and_out_of_order_are_not_bookable() {
        assert!(RoomStatus::Available.is_bookable());
        assert!(RoomStatus::Occupied.is_bookable());
        assert!(RoomStatus::Cleaning.is_bookable());
        assert!(!RoomStatus::Maintenance.is_bookable());
        assert!(!RoomStatus::OutOfOrder.is_bookable());
    }
}
