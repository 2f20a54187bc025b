// src/services/service_booking_service.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{booking_repo::BookingRepository, service_repo::ServiceBookingRepository},
    middleware::actor::Actor,
    models::{bookings::BookingStatus, services::{ServiceBooking, ServiceBookingStatus}},
    services::pricing_service::PricingService,
};

// Comando validado de criação de pedido de serviço.
#[derive(Debug, Clone)]
pub struct CreateServiceBookingCommand {
    pub booking_id: Uuid,
    pub service_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub quantity: i32,
}

impl CreateServiceBookingCommand {
    pub fn validated(
        booking_id: Uuid,
        service_id: Uuid,
        scheduled_at: DateTime<Utc>,
        quantity: i32,
    ) -> Result<Self, AppError> {
        if quantity < 1 {
            return Err(AppError::InvalidBookingRequest(
                "quantidade deve ser positiva",
            ));
        }
        Ok(Self {
            booking_id,
            service_id,
            scheduled_at,
            quantity,
        })
    }
}

// Ciclo de vida dos pedidos de serviço durante a estadia. Criação exige a
// reserva pai em CHECKED_IN; daí em diante o pedido anda sozinho.
#[derive(Clone)]
pub struct ServiceBookingService {
    pool: PgPool,
    service_repo: ServiceBookingRepository,
    booking_repo: BookingRepository,
}

impl ServiceBookingService {
    pub fn new(
        pool: PgPool,
        service_repo: ServiceBookingRepository,
        booking_repo: BookingRepository,
    ) -> Self {
        Self {
            pool,
            service_repo,
            booking_repo,
        }
    }

    pub async fn create_service_booking(
        &self,
        cmd: &CreateServiceBookingCommand,
    ) -> Result<ServiceBooking, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock no pai: um cancelamento concorrente da reserva não pode
        // passar entre a checagem de status e o insert.
        let parent = self
            .booking_repo
            .get_booking_for_update(&mut *tx, cmd.booking_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Reserva".into()))?;

        if parent.status != BookingStatus::CheckedIn {
            return Err(AppError::BookingNotCheckedIn(parent.status.to_string()));
        }

        let service = self
            .service_repo
            .get_active_service(&mut *tx, cmd.service_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Serviço".into()))?;

        let room_number = self
            .booking_repo
            .first_room_number(&mut *tx, cmd.booking_id)
            .await?
            .unwrap_or_default();

        let total_price = PricingService::service_total(service.price, cmd.quantity);

        let created = self
            .service_repo
            .insert_service_booking(
                &mut *tx,
                cmd.booking_id,
                cmd.service_id,
                &parent.guest_name,
                &room_number,
                cmd.scheduled_at,
                cmd.quantity,
                total_price,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Pedido de serviço {} criado para a reserva {} ({} x{})",
            created.id,
            parent.code,
            service.name,
            cmd.quantity
        );
        Ok(created)
    }

    pub async fn transition(
        &self,
        id: Uuid,
        target: ServiceBookingStatus,
        staff_notes: Option<&str>,
    ) -> Result<ServiceBooking, AppError> {
        // Cancelamento guarda o motivo; vai pelo fluxo dedicado.
        if target == ServiceBookingStatus::Cancelled {
            let reason = staff_notes.unwrap_or("Cancelado via alteração de status");
            return self.cancel(id, reason).await;
        }

        let mut tx = self.pool.begin().await?;

        let current = self
            .service_repo
            .get_service_booking_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido de serviço".into()))?;

        if !current.status.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                from: current.status.to_string(),
                to: target.to_string(),
            });
        }

        let updated = self
            .service_repo
            .update_status(&mut *tx, id, target, staff_notes)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "Pedido de serviço {}: {} -> {}",
            id,
            current.status,
            target
        );
        Ok(updated)
    }

    pub async fn cancel(&self, id: Uuid, reason: &str) -> Result<ServiceBooking, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .service_repo
            .get_service_booking_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido de serviço".into()))?;

        if !current
            .status
            .can_transition_to(ServiceBookingStatus::Cancelled)
        {
            return Err(AppError::InvalidTransition {
                from: current.status.to_string(),
                to: ServiceBookingStatus::Cancelled.to_string(),
            });
        }

        let cancelled = self.service_repo.set_cancelled(&mut *tx, id, reason).await?;
        tx.commit().await?;

        tracing::info!("Pedido de serviço {} cancelado: {}", id, reason);
        Ok(cancelled)
    }

    // Atribuição é ato único: com alguém já atribuído, qualquer nova
    // tentativa falha (não existe "desatribuir" neste core).
    pub async fn assign_staff(
        &self,
        id: Uuid,
        staff_id: Uuid,
        actor: &Actor,
    ) -> Result<ServiceBooking, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .service_repo
            .get_service_booking_for_update(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido de serviço".into()))?;

        if current.assigned_staff_id.is_some() {
            return Err(AppError::StaffAlreadyAssigned);
        }
        if !current.status.accepts_staff_assignment() {
            return Err(AppError::StaffAssignmentNotAllowed(
                current.status.to_string(),
            ));
        }

        let updated = self.service_repo.assign_staff(&mut *tx, id, staff_id).await?;
        tx.commit().await?;

        tracing::info!(
            "Funcionário {} atribuído ao pedido de serviço {} (ator {})",
            staff_id,
            id,
            actor.0
        );
        Ok(updated)
    }

    pub async fn get_service_booking(&self, id: Uuid) -> Result<ServiceBooking, AppError> {
        self.service_repo
            .get_service_booking(self.service_repo.pool(), id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Pedido de serviço".into()))
    }
}
