// src/services/booking_service.rs

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        booking_repo::{BookingRepository, NewBooking},
        room_repo::RoomRepository,
        service_repo::ServiceBookingRepository,
    },
    middleware::actor::Actor,
    models::{
        bookings::{Booking, BookingDetail, BookingStatus, PaymentMethod},
        rooms::{RoomForBooking, RoomStatus},
    },
    services::{
        availability_service::AvailabilityService,
        pricing_service::{PricingService, RoomNight},
    },
};

// Falhas transacionais (serialização/deadlock/lock timeout) são retentadas
// aqui dentro antes de virarem conflito para o chamador.
const MAX_TX_RETRIES: u32 = 3;
const RETRY_BACKOFF_MS: u64 = 50;

// ---
// Comandos validados
// ---
// Toda entrada externa vira um comando tipado ANTES de chegar ao código que
// mexe em estado: um comando inválido simplesmente não se constrói.

#[derive(Debug, Clone)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub user_id: Uuid,
    pub room_ids: Vec<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub guest: GuestInfo,
    pub promotion_code: Option<String>,
}

impl CreateBookingCommand {
    #[allow(clippy::too_many_arguments)]
    pub fn validated(
        user_id: Uuid,
        room_ids: Vec<Uuid>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guest_count: i32,
        guest: GuestInfo,
        promotion_code: Option<String>,
    ) -> Result<Self, AppError> {
        // Estadia de zero noites (check_in == check_out) é rejeitada aqui,
        // antes de qualquer transação.
        if check_out <= check_in {
            return Err(AppError::InvalidDateRange);
        }
        if room_ids.is_empty() {
            return Err(AppError::InvalidBookingRequest("nenhum quarto informado"));
        }
        if guest_count < 1 {
            return Err(AppError::InvalidBookingRequest(
                "quantidade de hóspedes deve ser positiva",
            ));
        }

        // Quartos repetidos no pedido viram um só.
        let mut room_ids = room_ids;
        room_ids.sort();
        room_ids.dedup();

        Ok(Self {
            user_id,
            room_ids,
            check_in,
            check_out,
            guest_count,
            guest,
            promotion_code,
        })
    }

    pub fn nights(&self) -> i32 {
        (self.check_out - self.check_in).num_days() as i32
    }
}

#[derive(Debug, Clone)]
pub struct ModifyBookingCommand {
    pub new_room_ids: Option<Vec<Uuid>>,
    pub new_dates: Option<(NaiveDate, NaiveDate)>,
}

impl ModifyBookingCommand {
    pub fn validated(
        new_room_ids: Option<Vec<Uuid>>,
        new_dates: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Self, AppError> {
        if new_room_ids.is_none() && new_dates.is_none() {
            return Err(AppError::InvalidBookingRequest(
                "modificação sem nenhuma alteração",
            ));
        }
        if let Some((check_in, check_out)) = new_dates {
            if check_out <= check_in {
                return Err(AppError::InvalidDateRange);
            }
        }
        if let Some(rooms) = &new_room_ids {
            if rooms.is_empty() {
                return Err(AppError::InvalidBookingRequest("nenhum quarto informado"));
            }
        }
        let new_room_ids = new_room_ids.map(|mut ids| {
            ids.sort();
            ids.dedup();
            ids
        });
        Ok(Self {
            new_room_ids,
            new_dates,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MarkPaidCommand {
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub transaction_ref: String,
}

// ---
// Orquestrador
// ---
// Fronteira transacional da reserva: checagem de disponibilidade, preço e
// persistência acontecem dentro de UMA transação, fechando a janela de
// corrida entre a pré-checagem e o commit.

#[derive(Clone)]
pub struct BookingService {
    pool: PgPool,
    booking_repo: BookingRepository,
    room_repo: RoomRepository,
    service_repo: ServiceBookingRepository,
    availability: AvailabilityService,
    pricing: PricingService,
}

impl BookingService {
    pub fn new(
        pool: PgPool,
        booking_repo: BookingRepository,
        room_repo: RoomRepository,
        service_repo: ServiceBookingRepository,
        availability: AvailabilityService,
        pricing: PricingService,
    ) -> Self {
        Self {
            pool,
            booking_repo,
            room_repo,
            service_repo,
            availability,
            pricing,
        }
    }

    // --- CRIAR RESERVA ---

    pub async fn create_booking(
        &self,
        cmd: &CreateBookingCommand,
    ) -> Result<BookingDetail, AppError> {
        let mut attempt = 0;
        loop {
            match self.try_create_booking(cmd).await {
                Err(err) if is_retryable_tx_error(&err) && attempt < MAX_TX_RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        "Conflito transacional ao criar reserva (tentativa {}/{}), retentando",
                        attempt,
                        MAX_TX_RETRIES
                    );
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64))
                        .await;
                }
                // Esgotadas as tentativas, o chamador enxerga um conflito
                // comum: para ele é indistinguível de uma sobreposição real.
                Err(err) if is_retryable_tx_error(&err) => {
                    return Err(AppError::RoomConflict(cmd.room_ids.clone()));
                }
                other => return other,
            }
        }
    }

    async fn try_create_booking(
        &self,
        cmd: &CreateBookingCommand,
    ) -> Result<BookingDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Trava os quartos alvo. A partir daqui nenhuma outra transação
        // insere reserva para estes quartos até o nosso commit/rollback.
        let rooms = self
            .room_repo
            .lock_rooms_for_booking(&mut *tx, &cmd.room_ids)
            .await?;
        if rooms.len() != cmd.room_ids.len() {
            return Err(AppError::ResourceNotFound("Quarto".into()));
        }

        // Quarto fora de operação conta como indisponível (recuperável:
        // o cliente tenta outro quarto).
        let blocked: Vec<Uuid> = rooms
            .iter()
            .filter(|r| !r.status.is_bookable())
            .map(|r| r.id)
            .collect();
        if !blocked.is_empty() {
            return Err(AppError::RoomConflict(blocked));
        }

        // 2. Capacidade combinada dos quartos x hóspedes informados.
        let capacity: i32 = rooms.iter().map(|r| r.capacity).sum();
        if capacity < cmd.guest_count {
            return Err(AppError::CapacityExceeded {
                requested: cmd.guest_count,
                capacity,
            });
        }

        // 3. Re-checa disponibilidade DENTRO da transação (portão
        // autoritativo; a pré-checagem da busca pode estar obsoleta).
        let conflicts = self
            .availability
            .find_conflicts(&mut *tx, &cmd.room_ids, cmd.check_in, cmd.check_out, None)
            .await?;
        if !conflicts.is_empty() {
            return Err(AppError::RoomConflict(conflicts));
        }

        // 4. Preço: tarifa congelada do tipo de quarto, desconto resolvido
        // do código promocional (se houver).
        let room_nights = room_nights_from(&rooms, cmd.nights());
        let discount = match &cmd.promotion_code {
            Some(code) => {
                let percent = self
                    .booking_repo
                    .get_active_promotion_percent(&mut *tx, code, cmd.check_in)
                    .await?
                    .ok_or_else(|| AppError::InvalidPromotion(code.clone()))?;
                self.pricing.promotion_discount(&room_nights, percent)
            }
            None => Decimal::ZERO,
        };
        let quote = self.pricing.quote(&room_nights, discount);

        // 5. Persiste cabeçalho + uma linha por quarto, tudo ou nada.
        let code = generate_booking_code();
        let booking = self
            .booking_repo
            .insert_booking(
                &mut *tx,
                NewBooking {
                    code: &code,
                    user_id: cmd.user_id,
                    guest_name: &cmd.guest.name,
                    guest_email: &cmd.guest.email,
                    guest_phone: cmd.guest.phone.as_deref(),
                    check_in_date: cmd.check_in,
                    check_out_date: cmd.check_out,
                    guest_count: cmd.guest_count,
                    quote: &quote,
                },
            )
            .await?;

        let mut lines = Vec::with_capacity(room_nights.len());
        for rn in &room_nights {
            let line = self
                .booking_repo
                .insert_booking_room(
                    &mut *tx,
                    booking.id,
                    rn.room_id,
                    rn.rate_per_night,
                    rn.nights,
                    rn.line_total(),
                )
                .await?;
            lines.push(line);
        }

        tx.commit().await?;

        tracing::info!(
            "Reserva {} criada: {} quarto(s), {} -> {}, total {}",
            booking.code,
            lines.len(),
            booking.check_in_date,
            booking.check_out_date,
            booking.total_amount
        );

        Ok(BookingDetail {
            header: booking,
            rooms: lines,
        })
    }

    // --- LEITURA (com NO_SHOW preguiçoso) ---

    // Contrato de leitura: uma reserva CONFIRMED lida depois da data de
    // check-in vira NO_SHOW aqui mesmo. Não existe agendador; a leitura é
    // o gatilho.
    pub async fn get_booking(&self, booking_id: Uuid) -> Result<BookingDetail, AppError> {
        let mut booking = self
            .booking_repo
            .get_booking(self.booking_repo.pool(), booking_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Reserva".into()))?;

        if booking.status == BookingStatus::Confirmed
            && Utc::now().date_naive() > booking.check_in_date
        {
            booking = self.apply_no_show(booking_id).await?;
        }

        let rooms = self
            .booking_repo
            .list_booking_rooms(self.booking_repo.pool(), booking_id)
            .await?;
        Ok(BookingDetail {
            header: booking,
            rooms,
        })
    }

    async fn apply_no_show(&self, booking_id: Uuid) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        // Re-lê com lock: outra transação pode ter feito o check-in ou o
        // cancelamento entre a leitura e este ponto.
        let booking = self
            .booking_repo
            .get_booking_for_update(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Reserva".into()))?;

        if booking.status != BookingStatus::Confirmed
            || Utc::now().date_naive() <= booking.check_in_date
        {
            tx.commit().await?;
            return Ok(booking);
        }

        let updated = self
            .booking_repo
            .update_status(&mut *tx, booking_id, BookingStatus::NoShow)
            .await?;
        tx.commit().await?;

        tracing::info!("Reserva {} marcada como NO_SHOW na leitura", updated.code);
        Ok(updated)
    }

    // --- TRANSIÇÕES DE STATUS ---

    pub async fn transition_booking(
        &self,
        booking_id: Uuid,
        target: BookingStatus,
        actor: &Actor,
        note: Option<&str>,
    ) -> Result<Booking, AppError> {
        // Cancelamento tem efeitos próprios (metadados + cascata), então é
        // roteado para o fluxo dedicado.
        if target == BookingStatus::Cancelled {
            let reason = note.unwrap_or("Cancelada via alteração de status");
            return self.cancel_booking(booking_id, reason, actor).await;
        }

        let mut tx = self.pool.begin().await?;

        let booking = self
            .booking_repo
            .get_booking_for_update(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Reserva".into()))?;

        if !booking.status.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                from: booking.status.to_string(),
                to: target.to_string(),
            });
        }

        let today = Utc::now().date_naive();
        match target {
            // Check-in só no dia previsto ou depois.
            BookingStatus::CheckedIn if today < booking.check_in_date => {
                return Err(AppError::TransitionTooEarly {
                    target: target.to_string(),
                });
            }
            // NO_SHOW exige a data de check-in já vencida.
            BookingStatus::NoShow if today <= booking.check_in_date => {
                return Err(AppError::TransitionTooEarly {
                    target: target.to_string(),
                });
            }
            _ => {}
        }

        let updated = self
            .booking_repo
            .update_status(&mut *tx, booking_id, target)
            .await?;

        // Efeitos físicos nos quartos: check-in ocupa, check-out manda
        // para a governança.
        let room_ids = self.booked_room_ids(&mut tx, booking_id).await?;
        match target {
            BookingStatus::CheckedIn => {
                self.room_repo
                    .set_rooms_status(&mut *tx, &room_ids, RoomStatus::Occupied)
                    .await?;
            }
            BookingStatus::CheckedOut => {
                self.room_repo
                    .set_rooms_status(&mut *tx, &room_ids, RoomStatus::Cleaning)
                    .await?;
            }
            _ => {}
        }

        tx.commit().await?;

        tracing::info!(
            "Reserva {}: {} -> {} (ator {})",
            updated.code,
            booking.status,
            target,
            actor.0
        );
        Ok(updated)
    }

    // --- CANCELAMENTO ---

    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        reason: &str,
        actor: &Actor,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = self
            .booking_repo
            .get_booking_for_update(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Reserva".into()))?;

        if !booking.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(AppError::InvalidTransition {
                from: booking.status.to_string(),
                to: BookingStatus::Cancelled.to_string(),
            });
        }

        let cancelled = self
            .booking_repo
            .set_cancelled(&mut *tx, booking_id, reason, actor.0)
            .await?;

        // Cascata: pedidos de serviço ainda abertos caem junto; os já
        // concluídos ficam como estão.
        let cascaded = self
            .service_repo
            .cancel_open_for_booking(&mut *tx, booking_id, "Reserva cancelada")
            .await?;

        // Hóspede já estava no quarto: devolve para a governança.
        if booking.status == BookingStatus::CheckedIn {
            let room_ids = self.booked_room_ids(&mut tx, booking_id).await?;
            self.room_repo
                .set_rooms_status(&mut *tx, &room_ids, RoomStatus::Cleaning)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Reserva {} cancelada por {} ({} pedido(s) de serviço em cascata)",
            cancelled.code,
            actor.0,
            cascaded
        );
        Ok(cancelled)
    }

    // --- PAGAMENTO (entrada idempotente do gateway) ---

    pub async fn mark_paid(
        &self,
        booking_id: Uuid,
        cmd: &MarkPaidCommand,
    ) -> Result<Booking, AppError> {
        if cmd.amount <= Decimal::ZERO {
            return Err(AppError::InvalidBookingRequest(
                "valor de pagamento deve ser positivo",
            ));
        }

        let mut tx = self.pool.begin().await?;

        // Idempotência por transaction_ref: re-entrega do gateway devolve
        // a reserva como está, sem efeito novo.
        if let Some(existing) = self
            .booking_repo
            .get_payment_by_ref(&mut *tx, &cmd.transaction_ref)
            .await?
        {
            if existing.booking_id != booking_id {
                return Err(AppError::DuplicateTransactionRef);
            }
            let booking = self
                .booking_repo
                .get_booking(&mut *tx, booking_id)
                .await?
                .ok_or_else(|| AppError::ResourceNotFound("Reserva".into()))?;
            tx.commit().await?;
            return Ok(booking);
        }

        let booking = self
            .booking_repo
            .get_booking_for_update(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Reserva".into()))?;

        // Pagamento só faz sentido antes do fim da estadia.
        if !matches!(
            booking.status,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::CheckedIn
        ) {
            return Err(AppError::InvalidTransition {
                from: booking.status.to_string(),
                to: BookingStatus::Confirmed.to_string(),
            });
        }

        if booking.paid_amount + cmd.amount > booking.total_amount {
            return Err(AppError::PaymentExceedsTotal);
        }

        self.booking_repo
            .insert_completed_payment(
                &mut *tx,
                booking_id,
                cmd.amount,
                cmd.method,
                &cmd.transaction_ref,
            )
            .await?;
        let mut updated = self
            .booking_repo
            .apply_payment(&mut *tx, booking_id, cmd.amount)
            .await?;

        // Pagamento confirmado é o gatilho PENDING -> CONFIRMED.
        if booking.status == BookingStatus::Pending {
            updated = self
                .booking_repo
                .update_status(&mut *tx, booking_id, BookingStatus::Confirmed)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Pagamento {} registrado na reserva {} (pago {} de {})",
            cmd.transaction_ref,
            updated.code,
            updated.paid_amount,
            updated.total_amount
        );
        Ok(updated)
    }

    // --- MODIFICAÇÃO (cancela-e-recria dentro de uma transação) ---

    pub async fn modify_booking(
        &self,
        booking_id: Uuid,
        cmd: &ModifyBookingCommand,
    ) -> Result<BookingDetail, AppError> {
        let mut attempt = 0;
        loop {
            match self.try_modify_booking(booking_id, cmd).await {
                Err(err) if is_retryable_tx_error(&err) && attempt < MAX_TX_RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        "Conflito transacional ao modificar reserva (tentativa {}/{})",
                        attempt,
                        MAX_TX_RETRIES
                    );
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64))
                        .await;
                }
                Err(err) if is_retryable_tx_error(&err) => {
                    let ids = cmd.new_room_ids.clone().unwrap_or_default();
                    return Err(AppError::RoomConflict(ids));
                }
                other => return other,
            }
        }
    }

    async fn try_modify_booking(
        &self,
        booking_id: Uuid,
        cmd: &ModifyBookingCommand,
    ) -> Result<BookingDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = self
            .booking_repo
            .get_booking_for_update(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Reserva".into()))?;

        // Depois do check-in a estadia só muda via cancelamento.
        if !matches!(
            booking.status,
            BookingStatus::Pending | BookingStatus::Confirmed
        ) {
            return Err(AppError::ModificationNotAllowed(booking.status.to_string()));
        }

        let current_rooms = self
            .booking_repo
            .list_booking_rooms(&mut *tx, booking_id)
            .await?;

        let room_ids: Vec<Uuid> = match &cmd.new_room_ids {
            Some(ids) => ids.clone(),
            None => current_rooms.iter().map(|br| br.room_id).collect(),
        };
        let (check_in, check_out) = cmd
            .new_dates
            .unwrap_or((booking.check_in_date, booking.check_out_date));

        let rooms = self
            .room_repo
            .lock_rooms_for_booking(&mut *tx, &room_ids)
            .await?;
        if rooms.len() != room_ids.len() {
            return Err(AppError::ResourceNotFound("Quarto".into()));
        }

        let capacity: i32 = rooms.iter().map(|r| r.capacity).sum();
        if capacity < booking.guest_count {
            return Err(AppError::CapacityExceeded {
                requested: booking.guest_count,
                capacity,
            });
        }

        // Disponibilidade ignorando as linhas da própria reserva: os
        // períodos antigos são liberados e os novos checados no mesmo ato.
        let conflicts = self
            .availability
            .find_conflicts(&mut *tx, &room_ids, check_in, check_out, Some(booking_id))
            .await?;
        if !conflicts.is_empty() {
            return Err(AppError::RoomConflict(conflicts));
        }

        // Reprecifica do zero com as tarifas atuais dos tipos de quarto.
        // O desconto original é mantido; política de reembolso é do gateway.
        let nights = (check_out - check_in).num_days() as i32;
        let room_nights = room_nights_from(&rooms, nights);
        let quote = self.pricing.quote(&room_nights, booking.discount_amount);

        self.booking_repo
            .delete_booking_rooms(&mut *tx, booking_id)
            .await?;
        let mut lines = Vec::with_capacity(room_nights.len());
        for rn in &room_nights {
            let line = self
                .booking_repo
                .insert_booking_room(
                    &mut *tx,
                    booking_id,
                    rn.room_id,
                    rn.rate_per_night,
                    rn.nights,
                    rn.line_total(),
                )
                .await?;
            lines.push(line);
        }

        let updated = self
            .booking_repo
            .update_reservation(&mut *tx, booking_id, check_in, check_out, &quote)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Reserva {} modificada: {} quarto(s), {} -> {}, novo total {}",
            updated.code,
            lines.len(),
            updated.check_in_date,
            updated.check_out_date,
            updated.total_amount
        );

        Ok(BookingDetail {
            header: updated,
            rooms: lines,
        })
    }

    // ---

    async fn booked_room_ids(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        booking_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError> {
        let rooms = self
            .booking_repo
            .list_booking_rooms(&mut **tx, booking_id)
            .await?;
        Ok(rooms.iter().map(|br| br.room_id).collect())
    }
}

fn room_nights_from(rooms: &[RoomForBooking], nights: i32) -> Vec<RoomNight> {
    rooms
        .iter()
        .map(|room| RoomNight {
            room_id: room.id,
            rate_per_night: room.base_price,
            nights,
        })
        .collect()
}

fn generate_booking_code() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("BK-{}", raw[..8].to_uppercase())
}

// Códigos SQLSTATE de disputa transacional: 40001 (serialização), 40P01
// (deadlock), 55P03 (lock não disponível).
fn is_retryable_tx_error(err: &AppError) -> bool {
    if let AppError::DatabaseError(sqlx::Error::Database(db_err)) = err {
        matches!(
            db_err.code().as_deref(),
            Some("40001" | "40P01" | "55P03")
        )
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn guest() -> GuestInfo {
        GuestInfo {
            name: "Maria Souza".into(),
            email: "maria@example.com".into(),
            phone: None,
        }
    }

    #[test]
    fn zero_night_stay_is_rejected_before_any_transaction() {
        let day = date(2024, 12, 10);
        let result = CreateBookingCommand::validated(
            Uuid::new_v4(),
            vec![Uuid::new_v4()],
            day,
            day,
            2,
            guest(),
            None,
        );
        assert!(matches!(result, Err(AppError::InvalidDateRange)));
    }

    #[test]
    fn reversed_date_range_is_rejected() {
        let result = CreateBookingCommand::validated(
            Uuid::new_v4(),
            vec![Uuid::new_v4()],
            date(2024, 12, 12),
            date(2024, 12, 10),
            2,
            guest(),
            None,
        );
        assert!(matches!(result, Err(AppError::InvalidDateRange)));
    }

    #[test]
    fn empty_room_set_and_zero_guests_are_rejected() {
        let ci = date(2024, 12, 10);
        let co = date(2024, 12, 12);
        assert!(
            CreateBookingCommand::validated(Uuid::new_v4(), vec![], ci, co, 2, guest(), None)
                .is_err()
        );
        assert!(CreateBookingCommand::validated(
            Uuid::new_v4(),
            vec![Uuid::new_v4()],
            ci,
            co,
            0,
            guest(),
            None
        )
        .is_err());
    }

    #[test]
    fn duplicated_room_ids_collapse_into_one() {
        let room = Uuid::new_v4();
        let cmd = CreateBookingCommand::validated(
            Uuid::new_v4(),
            vec![room, room, room],
            date(2024, 12, 10),
            date(2024, 12, 12),
            2,
            guest(),
            None,
        )
        .unwrap();
        assert_eq!(cmd.room_ids, vec![room]);
        assert_eq!(cmd.nights(), 2);
    }

    #[test]
    fn modify_command_requires_some_change() {
        assert!(ModifyBookingCommand::validated(None, None).is_err());
        assert!(ModifyBookingCommand::validated(
            None,
            Some((date(2024, 12, 12), date(2024, 12, 10)))
        )
        .is_err());
        assert!(ModifyBookingCommand::validated(Some(vec![]), None).is_err());
        assert!(ModifyBookingCommand::validated(
            Some(vec![Uuid::new_v4()]),
            Some((date(2024, 12, 10), date(2024, 12, 12)))
        )
        .is_ok());
    }

    #[test]
    fn booking_codes_are_prefixed_and_unique_enough() {
        let a = generate_booking_code();
        let b = generate_booking_code();
        assert!(a.starts_with("BK-"));
        assert_eq!(a.len(), "BK-".len() + 8);
        assert_ne!(a, b);
    }
}
