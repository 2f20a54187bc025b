// src/services/pricing_service.rs

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Uma diária: a unidade atômica de precificação. A tarifa vem congelada
// do RoomType no momento da reserva, nunca da tarifa vigente.
#[derive(Debug, Clone)]
pub struct RoomNight {
    pub room_id: Uuid,
    pub rate_per_night: Decimal,
    pub nights: i32,
}

impl RoomNight {
    pub fn line_total(&self) -> Decimal {
        self.rate_per_night * Decimal::from(self.nights)
    }
}

// Resultado do cálculo financeiro de uma estadia.
// Invariante: total_amount = subtotal + tax_amount + service_charge
// - discount_amount, travado em >= 0. O total nunca é re-arredondado.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub service_charge: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
}

#[derive(Clone)]
pub struct PricingService {
    tax_rate_percent: Decimal,
    service_charge_percent: Decimal,
}

impl PricingService {
    pub fn new(tax_rate_percent: Decimal, service_charge_percent: Decimal) -> Self {
        Self {
            tax_rate_percent,
            service_charge_percent,
        }
    }

    // Arredonda meio-para-cima na menor unidade da moeda, UMA vez por
    // componente. Quem soma os componentes não arredonda de novo.
    fn percent_of(subtotal: Decimal, percent: Decimal) -> Decimal {
        (subtotal * percent / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn quote(&self, rooms: &[RoomNight], discount_amount: Decimal) -> Quote {
        let subtotal: Decimal = rooms.iter().map(RoomNight::line_total).sum();

        let tax_amount = Self::percent_of(subtotal, self.tax_rate_percent);
        let service_charge = Self::percent_of(subtotal, self.service_charge_percent);

        let total = subtotal + tax_amount + service_charge - discount_amount;

        Quote {
            subtotal,
            tax_amount,
            service_charge,
            discount_amount,
            // Desconto maior que a soma não gera total negativo.
            total_amount: total.max(Decimal::ZERO),
        }
    }

    // Resolve um percentual promocional em valor absoluto de desconto,
    // com a mesma política de arredondamento dos demais componentes.
    pub fn promotion_discount(&self, rooms: &[RoomNight], discount_percent: Decimal) -> Decimal {
        let subtotal: Decimal = rooms.iter().map(RoomNight::line_total).sum();
        Self::percent_of(subtotal, discount_percent)
    }

    // Preço de um pedido de serviço: preço de catálogo x quantidade.
    pub fn service_total(catalog_price: Decimal, quantity: i32) -> Decimal {
        (catalog_price * Decimal::from(quantity))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn night(rate: &str, nights: i32) -> RoomNight {
        RoomNight {
            room_id: Uuid::new_v4(),
            rate_per_night: d(rate),
            nights,
        }
    }

    #[test]
    fn two_nights_at_500k_with_tax_and_service_charge() {
        // 2 diárias de 500.000, imposto 10%, taxa de serviço 5%, sem desconto.
        let pricing = PricingService::new(d("10"), d("5"));
        let quote = pricing.quote(&[night("500000", 2)], Decimal::ZERO);

        assert_eq!(quote.subtotal, d("1000000"));
        assert_eq!(quote.tax_amount, d("100000.00"));
        assert_eq!(quote.service_charge, d("50000.00"));
        assert_eq!(quote.total_amount, d("1150000.00"));
    }

    #[test]
    fn multiple_rooms_aggregate_into_one_subtotal() {
        let pricing = PricingService::new(d("10"), d("5"));
        let quote = pricing.quote(&[night("500000", 2), night("300000", 2)], Decimal::ZERO);

        assert_eq!(quote.subtotal, d("1600000"));
        assert_eq!(quote.tax_amount, d("160000.00"));
        assert_eq!(quote.service_charge, d("80000.00"));
        assert_eq!(quote.total_amount, d("1840000.00"));
    }

    #[test]
    fn discount_reduces_the_total() {
        let pricing = PricingService::new(d("10"), d("5"));
        let quote = pricing.quote(&[night("500000", 2)], d("150000"));

        assert_eq!(quote.discount_amount, d("150000"));
        assert_eq!(quote.total_amount, d("1000000.00"));
    }

    #[test]
    fn discount_larger_than_subtotal_clamps_total_at_zero() {
        let pricing = PricingService::new(d("10"), d("5"));
        let quote = pricing.quote(&[night("100000", 1)], d("999999999"));

        assert_eq!(quote.total_amount, Decimal::ZERO);
        // O desconto registrado permanece o informado; só o total é travado.
        assert_eq!(quote.discount_amount, d("999999999"));
    }

    #[test]
    fn components_round_half_up_at_the_cent() {
        // 100.05 * 10% = 10.005 -> 10.01 (meio-para-cima).
        let pricing = PricingService::new(d("10"), d("5"));
        let quote = pricing.quote(&[night("100.05", 1)], Decimal::ZERO);

        assert_eq!(quote.tax_amount, d("10.01"));
        // 100.05 * 5% = 5.0025 -> 5.00.
        assert_eq!(quote.service_charge, d("5.00"));
        // Total soma os componentes já arredondados, sem novo arredondamento.
        assert_eq!(quote.total_amount, d("100.05") + d("10.01") + d("5.00"));
    }

    #[test]
    fn total_identity_holds_across_a_grid() {
        let rates = ["150000", "99.99", "1234.56"];
        let taxes = ["0", "8.25", "10"];
        let discounts = ["0", "50", "100000"];

        for rate in rates {
            for tax in taxes {
                for discount in discounts {
                    let pricing = PricingService::new(d(tax), d("5"));
                    let q = pricing.quote(&[night(rate, 3)], d(discount));
                    let expected =
                        (q.subtotal + q.tax_amount + q.service_charge - q.discount_amount)
                            .max(Decimal::ZERO);
                    assert_eq!(q.total_amount, expected);
                }
            }
        }
    }

    #[test]
    fn zero_rooms_quote_to_zero() {
        let pricing = PricingService::new(d("10"), d("5"));
        let quote = pricing.quote(&[], Decimal::ZERO);
        assert_eq!(quote.subtotal, Decimal::ZERO);
        assert_eq!(quote.total_amount, Decimal::ZERO);
    }

    #[test]
    fn promotion_percent_resolves_against_the_subtotal() {
        let pricing = PricingService::new(d("10"), d("5"));
        let rooms = [night("500000", 2)];
        assert_eq!(pricing.promotion_discount(&rooms, d("15")), d("150000.00"));
    }

    #[test]
    fn service_total_is_price_times_quantity() {
        assert_eq!(PricingService::service_total(d("350000"), 2), d("700000.00"));
        assert_eq!(PricingService::service_total(d("19.99"), 3), d("59.97"));
    }
}
