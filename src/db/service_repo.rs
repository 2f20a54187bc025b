// src/db/service_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::services::{ServiceBooking, ServiceBookingStatus, ServiceItem},
};

#[derive(Clone)]
pub struct ServiceBookingRepository {
    pool: PgPool,
}

impl ServiceBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // Catálogo: leitura pura, o CRUD vive fora deste core.
    pub async fn get_active_service<'e, E>(
        &self,
        executor: E,
        service_id: Uuid,
    ) -> Result<Option<ServiceItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service =
            sqlx::query_as::<_, ServiceItem>("SELECT * FROM services WHERE id = $1 AND active")
                .bind(service_id)
                .fetch_optional(executor)
                .await?;
        Ok(service)
    }

    pub async fn get_service_booking<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<ServiceBooking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sb = sqlx::query_as::<_, ServiceBooking>("SELECT * FROM service_bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(sb)
    }

    // Lock de linha para transições e atribuição de funcionário.
    pub async fn get_service_booking_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<ServiceBooking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sb = sqlx::query_as::<_, ServiceBooking>(
            "SELECT * FROM service_bookings WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(sb)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_service_booking<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        service_id: Uuid,
        guest_name: &str,
        room_number: &str,
        scheduled_at: DateTime<Utc>,
        quantity: i32,
        total_price: Decimal,
    ) -> Result<ServiceBooking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sb = sqlx::query_as::<_, ServiceBooking>(
            r#"
            INSERT INTO service_bookings (
                booking_id, service_id, guest_name, room_number,
                scheduled_at, quantity, total_price, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'PENDING')
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(service_id)
        .bind(guest_name)
        .bind(room_number)
        .bind(scheduled_at)
        .bind(quantity)
        .bind(total_price)
        .fetch_one(executor)
        .await?;
        Ok(sb)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: ServiceBookingStatus,
        staff_notes: Option<&str>,
    ) -> Result<ServiceBooking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sb = sqlx::query_as::<_, ServiceBooking>(
            r#"
            UPDATE service_bookings
            SET status = $2,
                staff_notes = COALESCE($3, staff_notes),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(staff_notes)
        .fetch_one(executor)
        .await?;
        Ok(sb)
    }

    pub async fn set_cancelled<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        reason: &str,
    ) -> Result<ServiceBooking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sb = sqlx::query_as::<_, ServiceBooking>(
            r#"
            UPDATE service_bookings
            SET status = 'CANCELLED', cancel_reason = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reason)
        .fetch_one(executor)
        .await?;
        Ok(sb)
    }

    pub async fn assign_staff<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        staff_id: Uuid,
    ) -> Result<ServiceBooking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sb = sqlx::query_as::<_, ServiceBooking>(
            r#"
            UPDATE service_bookings
            SET assigned_staff_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(staff_id)
        .fetch_one(executor)
        .await?;
        Ok(sb)
    }

    // Cascata do cancelamento da reserva pai: só pedidos não-terminais
    // viram CANCELLED; COMPLETED/CANCELLED/NO_SHOW ficam intocados.
    pub async fn cancel_open_for_booking<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        reason: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE service_bookings
            SET status = 'CANCELLED', cancel_reason = $2, updated_at = now()
            WHERE booking_id = $1
              AND status IN ('PENDING', 'CONFIRMED', 'IN_PROGRESS')
            "#,
        )
        .bind(booking_id)
        .bind(reason)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
