// src/models/services.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Ciclo de vida do pedido de serviço ---
//
// PENDING -> CONFIRMED -> IN_PROGRESS -> COMPLETED
//    |           |
//    +-----------+-> CANCELLED
//
// NO_SHOW é terminal e não tem nenhuma aresta de saída.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceBookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl ServiceBookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceBookingStatus::Pending => "PENDING",
            ServiceBookingStatus::Confirmed => "CONFIRMED",
            ServiceBookingStatus::InProgress => "IN_PROGRESS",
            ServiceBookingStatus::Completed => "COMPLETED",
            ServiceBookingStatus::Cancelled => "CANCELLED",
            ServiceBookingStatus::NoShow => "NO_SHOW",
        }
    }

    pub fn allowed_transitions(&self) -> &'static [ServiceBookingStatus] {
        match self {
            ServiceBookingStatus::Pending => &[
                ServiceBookingStatus::Confirmed,
                ServiceBookingStatus::Cancelled,
            ],
            ServiceBookingStatus::Confirmed => &[
                ServiceBookingStatus::InProgress,
                ServiceBookingStatus::Cancelled,
            ],
            ServiceBookingStatus::InProgress => &[ServiceBookingStatus::Completed],
            ServiceBookingStatus::Completed
            | ServiceBookingStatus::Cancelled
            | ServiceBookingStatus::NoShow => &[],
        }
    }

    pub fn can_transition_to(&self, target: ServiceBookingStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    // Atribuição de funcionário só faz sentido antes do serviço começar.
    pub fn accepts_staff_assignment(&self) -> bool {
        matches!(
            self,
            ServiceBookingStatus::Pending | ServiceBookingStatus::Confirmed
        )
    }
}

impl std::fmt::Display for ServiceBookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Catálogo de serviços ---
// Referência compartilhada, consumida somente para leitura por este core.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: Uuid,
    #[schema(example = "Massagem relaxante")]
    pub name: String,
    #[schema(example = "SPA")]
    pub category: String,
    #[schema(example = "350000.00")]
    pub price: Decimal,
    #[schema(example = "UNIT")]
    pub unit: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Pedido de serviço durante a estadia ---
// Criado apenas contra uma reserva CHECKED_IN; o ciclo de vida a partir
// daí é independente da reserva pai (exceto o cascateamento no cancelamento).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBooking {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub service_id: Uuid,
    // Snapshots do hóspede/quarto no momento do pedido: a equipe de
    // atendimento enxerga o pedido sem precisar resolver a reserva.
    pub guest_name: String,
    #[schema(example = "101")]
    pub room_number: String,
    pub scheduled_at: DateTime<Utc>,
    #[schema(example = 1)]
    pub quantity: i32,
    #[schema(example = "350000.00")]
    pub total_price: Decimal,
    pub status: ServiceBookingStatus,
    pub assigned_staff_id: Option<Uuid>,
    pub staff_notes: Option<String>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ServiceBookingStatus; 6] = [
        ServiceBookingStatus::Pending,
        ServiceBookingStatus::Confirmed,
        ServiceBookingStatus::InProgress,
        ServiceBookingStatus::Completed,
        ServiceBookingStatus::Cancelled,
        ServiceBookingStatus::NoShow,
    ];

    #[test]
    fn transition_table_is_closed() {
        use ServiceBookingStatus::*;
        let legal = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, InProgress),
            (Confirmed, Cancelled),
            (InProgress, Completed),
        ];
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "aresta {} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn no_show_has_no_outgoing_edges() {
        assert!(ServiceBookingStatus::NoShow.allowed_transitions().is_empty());
        assert!(ServiceBookingStatus::NoShow.is_terminal());
    }

    #[test]
    fn staff_assignment_only_before_service_starts() {
        assert!(ServiceBookingStatus::Pending.accepts_staff_assignment());
        assert!(ServiceBookingStatus::Confirmed.accepts_staff_assignment());
        assert!(!ServiceBookingStatus::InProgress.accepts_staff_assignment());
        assert!(!ServiceBookingStatus::Completed.accepts_staff_assignment());
        assert!(!ServiceBookingStatus::Cancelled.accepts_staff_assignment());
        assert!(!ServiceBookingStatus::NoShow.accepts_staff_assignment());
    }
}
