// src/db/room_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::rooms::{Room, RoomForBooking, RoomStatus, RoomType},
};

// Período ocupado de um quarto por uma reserva ativa. Intervalo semiaberto
// [check_in, check_out): o dia do check-out já está livre para entrada.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OccupancySpan {
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ---
    // Leituras simples
    // ---

    pub async fn list_room_types<'e, E>(&self, executor: E) -> Result<Vec<RoomType>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let types = sqlx::query_as::<_, RoomType>("SELECT * FROM room_types ORDER BY name ASC")
            .fetch_all(executor)
            .await?;
        Ok(types)
    }

    pub async fn list_bookable_rooms<'e, E>(&self, executor: E) -> Result<Vec<Room>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT * FROM rooms
            WHERE status NOT IN ('MAINTENANCE', 'OUT_OF_ORDER')
            ORDER BY room_number ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(rooms)
    }

    // Períodos ocupados dos quartos pedidos, considerando apenas reservas
    // que bloqueiam o quarto (PENDING/CONFIRMED/CHECKED_IN). A decisão de
    // sobreposição fica com o chamador; aqui é só leitura.
    pub async fn fetch_occupancy_spans<'e, E>(
        &self,
        executor: E,
        room_ids: &[Uuid],
        exclude_booking: Option<Uuid>,
    ) -> Result<Vec<OccupancySpan>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let spans = sqlx::query_as::<_, OccupancySpan>(
            r#"
            SELECT br.room_id, b.check_in_date, b.check_out_date
            FROM booking_rooms br
            JOIN bookings b ON b.id = br.booking_id
            WHERE br.room_id = ANY($1)
              AND b.status IN ('PENDING', 'CONFIRMED', 'CHECKED_IN')
              AND ($2::uuid IS NULL OR b.id <> $2)
            "#,
        )
        .bind(room_ids)
        .bind(exclude_booking)
        .fetch_all(executor)
        .await?;
        Ok(spans)
    }

    // ---
    // Leitura com lock (usada DENTRO da transação de reserva)
    // ---

    // Trava as linhas dos quartos alvo até o commit/rollback, serializando
    // tentativas concorrentes de reservar o mesmo quarto. A ordenação por id
    // evita deadlock entre transações que travam conjuntos sobrepostos.
    pub async fn lock_rooms_for_booking<'e, E>(
        &self,
        executor: E,
        room_ids: &[Uuid],
    ) -> Result<Vec<RoomForBooking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rooms = sqlx::query_as::<_, RoomForBooking>(
            r#"
            SELECT r.id, r.status, rt.capacity, rt.base_price
            FROM rooms r
            JOIN room_types rt ON rt.id = r.room_type_id
            WHERE r.id = ANY($1)
            ORDER BY r.id ASC
            FOR UPDATE OF r
            "#,
        )
        .bind(room_ids)
        .fetch_all(executor)
        .await?;
        Ok(rooms)
    }

    // ---
    // Escritas (check-in/check-out mudam a situação física do quarto)
    // ---

    pub async fn set_rooms_status<'e, E>(
        &self,
        executor: E,
        room_ids: &[Uuid],
        status: RoomStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE rooms SET status = $2, updated_at = now() WHERE id = ANY($1)")
            .bind(room_ids)
            .bind(status)
            .execute(executor)
            .await?;
        Ok(())
    }
}
