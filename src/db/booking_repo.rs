// src/db/booking_repo.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::bookings::{Booking, BookingRoom, BookingStatus, Payment, PaymentMethod},
    services::pricing_service::Quote,
};

// Dados do cabeçalho de uma reserva nova, já validados e precificados.
#[derive(Debug)]
pub struct NewBooking<'a> {
    pub code: &'a str,
    pub user_id: Uuid,
    pub guest_name: &'a str,
    pub guest_email: &'a str,
    pub guest_phone: Option<&'a str>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub quote: &'a Quote,
}

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ---
    // Leituras
    // ---

    pub async fn get_booking<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(executor)
            .await?;
        Ok(booking)
    }

    // Leitura com lock de linha: toda transição de status parte daqui para
    // que duas transições concorrentes sobre a mesma reserva se serializem.
    pub async fn get_booking_for_update<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(executor)
                .await?;
        Ok(booking)
    }

    pub async fn list_booking_rooms<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
    ) -> Result<Vec<BookingRoom>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rooms = sqlx::query_as::<_, BookingRoom>(
            "SELECT * FROM booking_rooms WHERE booking_id = $1 ORDER BY created_at ASC",
        )
        .bind(booking_id)
        .fetch_all(executor)
        .await?;
        Ok(rooms)
    }

    // Número do primeiro quarto da reserva, para o snapshot exibido nos
    // pedidos de serviço.
    pub async fn first_room_number<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let number = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.room_number
            FROM booking_rooms br
            JOIN rooms r ON r.id = br.room_id
            WHERE br.booking_id = $1
            ORDER BY r.room_number ASC
            LIMIT 1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(executor)
        .await?;
        Ok(number)
    }

    // ---
    // Escritas (sempre dentro da transação do orquestrador)
    // ---

    pub async fn insert_booking<'e, E>(
        &self,
        executor: E,
        new: NewBooking<'_>,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                code, user_id, guest_name, guest_email, guest_phone,
                check_in_date, check_out_date, guest_count,
                subtotal, tax_amount, service_charge, discount_amount,
                total_amount, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'PENDING')
            RETURNING *
            "#,
        )
        .bind(new.code)
        .bind(new.user_id)
        .bind(new.guest_name)
        .bind(new.guest_email)
        .bind(new.guest_phone)
        .bind(new.check_in_date)
        .bind(new.check_out_date)
        .bind(new.guest_count)
        .bind(new.quote.subtotal)
        .bind(new.quote.tax_amount)
        .bind(new.quote.service_charge)
        .bind(new.quote.discount_amount)
        .bind(new.quote.total_amount)
        .fetch_one(executor)
        .await?;
        Ok(booking)
    }

    pub async fn insert_booking_room<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        room_id: Uuid,
        price_per_night: Decimal,
        nights: i32,
        line_total: Decimal,
    ) -> Result<BookingRoom, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, BookingRoom>(
            r#"
            INSERT INTO booking_rooms (booking_id, room_id, price_per_night, nights, line_total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(room_id)
        .bind(price_per_night)
        .bind(nights)
        .bind(line_total)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(booking_id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(booking)
    }

    pub async fn set_cancelled<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        reason: &str,
        actor_id: Uuid,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'CANCELLED',
                cancelled_at = $3,
                cancelled_by = $4,
                cancel_reason = $2,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(reason)
        .bind(Utc::now())
        .bind(actor_id)
        .fetch_one(executor)
        .await?;
        Ok(booking)
    }

    // Modificação = recriação das linhas dentro da mesma transação: datas e
    // valores novos no cabeçalho, linhas antigas substituídas pelo chamador.
    pub async fn update_reservation<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        quote: &Quote,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET check_in_date = $2,
                check_out_date = $3,
                subtotal = $4,
                tax_amount = $5,
                service_charge = $6,
                discount_amount = $7,
                total_amount = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(check_in)
        .bind(check_out)
        .bind(quote.subtotal)
        .bind(quote.tax_amount)
        .bind(quote.service_charge)
        .bind(quote.discount_amount)
        .bind(quote.total_amount)
        .fetch_one(executor)
        .await?;
        Ok(booking)
    }

    pub async fn delete_booking_rooms<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM booking_rooms WHERE booking_id = $1")
            .bind(booking_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // ---
    // Pagamentos
    // ---

    pub async fn get_payment_by_ref<'e, E>(
        &self,
        executor: E,
        transaction_ref: &str,
    ) -> Result<Option<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE transaction_ref = $1")
                .bind(transaction_ref)
                .fetch_optional(executor)
                .await?;
        Ok(payment)
    }

    pub async fn insert_completed_payment<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        transaction_ref: &str,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (booking_id, amount, method, status, transaction_ref)
            VALUES ($1, $2, $3, 'COMPLETED', $4)
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(amount)
        .bind(method)
        .bind(transaction_ref)
        .fetch_one(executor)
        .await?;
        Ok(payment)
    }

    pub async fn apply_payment<'e, E>(
        &self,
        executor: E,
        booking_id: Uuid,
        amount: Decimal,
    ) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET paid_amount = paid_amount + $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(amount)
        .fetch_one(executor)
        .await?;
        Ok(booking)
    }

    // ---
    // Promoções
    // ---

    pub async fn get_active_promotion_percent<'e, E>(
        &self,
        executor: E,
        code: &str,
        stay_start: NaiveDate,
    ) -> Result<Option<Decimal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let percent = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT discount_percent FROM promotions
            WHERE code = $1
              AND active
              AND valid_from <= $2
              AND valid_to >= $2
            "#,
        )
        .bind(code)
        .bind(stay_start)
        .fetch_optional(executor)
        .await?;
        Ok(percent)
    }
}
