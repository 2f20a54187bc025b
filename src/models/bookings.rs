// src/models/bookings.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Ciclo de vida da reserva ---
//
// PENDING -> CONFIRMED -> CHECKED_IN -> CHECKED_OUT
//    |           |            |
//    |           +-> NO_SHOW  +-> CANCELLED (com autorização)
//    +-> CANCELLED
//
// A tabela de transições é fechada: qualquer aresta fora dela falha com
// InvalidTransition e o status persistido não muda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::CheckedIn => "CHECKED_IN",
            BookingStatus::CheckedOut => "CHECKED_OUT",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::NoShow => "NO_SHOW",
        }
    }

    // Arestas legais saindo deste estado.
    pub fn allowed_transitions(&self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[
                BookingStatus::CheckedIn,
                BookingStatus::Cancelled,
                BookingStatus::NoShow,
            ],
            BookingStatus::CheckedIn => &[BookingStatus::CheckedOut, BookingStatus::Cancelled],
            // Estados terminais: nenhuma saída.
            BookingStatus::CheckedOut | BookingStatus::Cancelled | BookingStatus::NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    // Reservas nestes estados ocupam o quarto para fins de conflito de
    // datas; CANCELLED e NO_SHOW liberam o período.
    pub fn blocks_room(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::CheckedIn
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Reserva ---
// Nunca deletada fisicamente; cancelamento é um status com metadados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    #[schema(example = "BK-7F3A2C1D")]
    pub code: String,
    pub user_id: Uuid,
    #[schema(example = "Maria Souza")]
    pub guest_name: String,
    #[schema(example = "maria@example.com")]
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[schema(example = 2)]
    pub guest_count: i32,
    #[schema(example = "1000000.00")]
    pub subtotal: Decimal,
    #[schema(example = "100000.00")]
    pub tax_amount: Decimal,
    #[schema(example = "50000.00")]
    pub service_charge: Decimal,
    #[schema(example = "0.00")]
    pub discount_amount: Decimal,
    #[schema(example = "1150000.00")]
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: BookingStatus,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<Uuid>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Linha da reserva ---
// Um quarto por linha; price_per_night é o snapshot da tarifa no momento
// da criação. Invariante: line_total = price_per_night * nights.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRoom {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub room_id: Uuid,
    #[schema(example = "500000.00")]
    pub price_per_night: Decimal,
    #[schema(example = 2)]
    pub nights: i32,
    #[schema(example = "1000000.00")]
    pub line_total: Decimal,
    pub created_at: DateTime<Utc>,
}

// Reserva completa (cabeçalho + quartos) para respostas da API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(flatten)]
    pub header: Booking,
    pub rooms: Vec<BookingRoom>,
}

// --- Pagamentos ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    EWallet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[schema(example = "gw-2024-000123")]
    pub transaction_ref: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::CheckedIn,
        BookingStatus::CheckedOut,
        BookingStatus::Cancelled,
        BookingStatus::NoShow,
    ];

    #[test]
    fn legal_edges_match_the_lifecycle_table() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(NoShow));
        assert!(CheckedIn.can_transition_to(CheckedOut));
        assert!(CheckedIn.can_transition_to(Cancelled));
    }

    #[test]
    fn every_other_edge_is_rejected() {
        use BookingStatus::*;
        let legal = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, CheckedIn),
            (Confirmed, Cancelled),
            (Confirmed, NoShow),
            (CheckedIn, CheckedOut),
            (CheckedIn, Cancelled),
        ];
        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "aresta {} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        assert!(BookingStatus::CheckedOut.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::NoShow.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(!BookingStatus::CheckedIn.is_terminal());
    }

    #[test]
    fn only_active_statuses_block_the_room() {
        assert!(BookingStatus::Pending.blocks_room());
        assert!(BookingStatus::Confirmed.blocks_room());
        assert!(BookingStatus::CheckedIn.blocks_room());
        assert!(!BookingStatus::CheckedOut.blocks_room());
        assert!(!BookingStatus::Cancelled.blocks_room());
        assert!(!BookingStatus::NoShow.blocks_room());
    }
}
