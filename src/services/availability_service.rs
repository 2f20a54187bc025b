// src/services/availability_service.rs

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{Executor, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::room_repo::{OccupancySpan, RoomRepository},
    models::rooms::Room,
};

// Dois intervalos semiabertos [a, b) e [c, d) se sobrepõem sse a < d && c < b.
// Check-out e check-in no mesmo dia (estadias "coladas") NÃO conflitam.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

// Decisão de conflito sobre períodos já carregados: função pura para poder
// ser exercitada sem banco. Retorna os quartos em conflito, sem repetição.
pub fn conflicting_room_ids(
    requested_rooms: &[Uuid],
    check_in: NaiveDate,
    check_out: NaiveDate,
    existing: &[OccupancySpan],
) -> Vec<Uuid> {
    let mut conflicts: Vec<Uuid> = existing
        .iter()
        .filter(|span| requested_rooms.contains(&span.room_id))
        .filter(|span| {
            ranges_overlap(check_in, check_out, span.check_in_date, span.check_out_date)
        })
        .map(|span| span.room_id)
        .collect();
    conflicts.sort();
    conflicts.dedup();
    conflicts
}

// Resposta do cálculo de disponibilidade.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub conflicting_room_ids: Vec<Uuid>,
}

// Calculadora de disponibilidade. Somente leitura, por contrato: o mesmo
// código serve a busca (pré-checagem) e o portão autoritativo dentro da
// transação do orquestrador, bastando passar o executor da transação.
#[derive(Clone)]
pub struct AvailabilityService {
    room_repo: RoomRepository,
}

impl AvailabilityService {
    pub fn new(room_repo: RoomRepository) -> Self {
        Self { room_repo }
    }

    pub async fn find_conflicts<'e, E>(
        &self,
        executor: E,
        room_ids: &[Uuid],
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking: Option<Uuid>,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let spans = self
            .room_repo
            .fetch_occupancy_spans(executor, room_ids, exclude_booking)
            .await?;
        Ok(conflicting_room_ids(room_ids, check_in, check_out, &spans))
    }

    pub async fn is_available<'e, E>(
        &self,
        executor: E,
        room_ids: &[Uuid],
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Availability, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let conflicting_room_ids = self
            .find_conflicts(executor, room_ids, check_in, check_out, None)
            .await?;
        Ok(Availability {
            available: conflicting_room_ids.is_empty(),
            conflicting_room_ids,
        })
    }

    // Busca de quartos livres para o período (pré-checagem de navegação).
    // Quartos em manutenção ou fora de operação ficam de fora mesmo sem
    // nenhuma reserva conflitante.
    pub async fn list_available_rooms(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Room>, AppError> {
        let rooms = self.room_repo.list_bookable_rooms(self.room_repo.pool()).await?;
        let ids: Vec<Uuid> = rooms.iter().map(|r| r.id).collect();

        let spans = self
            .room_repo
            .fetch_occupancy_spans(self.room_repo.pool(), &ids, None)
            .await?;
        let taken = conflicting_room_ids(&ids, check_in, check_out, &spans);

        Ok(rooms
            .into_iter()
            .filter(|room| !taken.contains(&room.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(room_id: Uuid, from: NaiveDate, to: NaiveDate) -> OccupancySpan {
        OccupancySpan {
            room_id,
            check_in_date: from,
            check_out_date: to,
        }
    }

    #[test]
    fn overlap_predicate_on_half_open_ranges() {
        let d10 = date(2024, 12, 10);
        let d11 = date(2024, 12, 11);
        let d12 = date(2024, 12, 12);
        let d13 = date(2024, 12, 13);
        let d14 = date(2024, 12, 14);

        // Parcial, contido e idêntico conflitam.
        assert!(ranges_overlap(d10, d12, d11, d13));
        assert!(ranges_overlap(d10, d14, d11, d12));
        assert!(ranges_overlap(d10, d12, d10, d12));

        // Estadias coladas (check-out == check-in) não conflitam.
        assert!(!ranges_overlap(d10, d12, d12, d14));
        assert!(!ranges_overlap(d12, d14, d10, d12));

        // Períodos disjuntos não conflitam.
        assert!(!ranges_overlap(d10, d11, d13, d14));
    }

    #[test]
    fn detects_conflict_for_overlapping_request() {
        let r1 = Uuid::new_v4();
        let existing = [span(r1, date(2024, 12, 10), date(2024, 12, 12))];

        // Pedido 11 -> 13 sobrepõe a reserva 10 -> 12 no mesmo quarto.
        let conflicts =
            conflicting_room_ids(&[r1], date(2024, 12, 11), date(2024, 12, 13), &existing);
        assert_eq!(conflicts, vec![r1]);
    }

    #[test]
    fn back_to_back_stays_do_not_conflict() {
        let r1 = Uuid::new_v4();
        let existing = [span(r1, date(2024, 12, 10), date(2024, 12, 12))];

        let conflicts =
            conflicting_room_ids(&[r1], date(2024, 12, 12), date(2024, 12, 14), &existing);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn other_rooms_spans_are_ignored() {
        let r1 = Uuid::new_v4();
        let r2 = Uuid::new_v4();
        let existing = [span(r2, date(2024, 12, 10), date(2024, 12, 12))];

        let conflicts =
            conflicting_room_ids(&[r1], date(2024, 12, 10), date(2024, 12, 12), &existing);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn each_conflicting_room_is_reported_once() {
        let r1 = Uuid::new_v4();
        let existing = [
            span(r1, date(2024, 12, 10), date(2024, 12, 12)),
            span(r1, date(2024, 12, 13), date(2024, 12, 15)),
        ];

        let conflicts =
            conflicting_room_ids(&[r1], date(2024, 12, 11), date(2024, 12, 14), &existing);
        assert_eq!(conflicts, vec![r1]);
    }

    #[test]
    fn reports_only_the_rooms_that_collided() {
        let mut ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        ids.sort();
        let [r1, r2, r3] = ids;
        let existing = [
            span(r1, date(2024, 12, 10), date(2024, 12, 12)),
            span(r3, date(2024, 12, 11), date(2024, 12, 13)),
        ];

        let conflicts = conflicting_room_ids(
            &[r1, r2, r3],
            date(2024, 12, 11),
            date(2024, 12, 12),
            &existing,
        );
        assert_eq!(conflicts, vec![r1, r3]);
    }
}
