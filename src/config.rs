// src/config.rs

use std::{env, time::Duration};

use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        booking_repo::BookingRepository, room_repo::RoomRepository,
        service_repo::ServiceBookingRepository,
    },
    services::{
        availability_service::AvailabilityService, booking_service::BookingService,
        pricing_service::PricingService, service_booking_service::ServiceBookingService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub room_repo: RoomRepository,
    pub availability_service: AvailabilityService,
    pub booking_service: BookingService,
    pub service_booking_service: ServiceBookingService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;

        // Percentuais de cobrança da propriedade; padrão 10% de imposto e
        // 5% de taxa de serviço.
        let tax_rate = decimal_env("TAX_RATE_PERCENT", "10")?;
        let service_charge = decimal_env("SERVICE_CHARGE_PERCENT", "5")?;

        // Conecta ao banco de dados, usando '?' para propagar erros.
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let room_repo = RoomRepository::new(db_pool.clone());
        let booking_repo = BookingRepository::new(db_pool.clone());
        let service_repo = ServiceBookingRepository::new(db_pool.clone());

        let availability_service = AvailabilityService::new(room_repo.clone());
        let pricing_service = PricingService::new(tax_rate, service_charge);

        let booking_service = BookingService::new(
            db_pool.clone(),
            booking_repo.clone(),
            room_repo.clone(),
            service_repo.clone(),
            availability_service.clone(),
            pricing_service,
        );
        let service_booking_service =
            ServiceBookingService::new(db_pool.clone(), service_repo, booking_repo);

        Ok(Self {
            db_pool,
            room_repo,
            availability_service,
            booking_service,
            service_booking_service,
        })
    }
}

fn decimal_env(name: &str, default: &str) -> anyhow::Result<Decimal> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    Decimal::from_str_exact(&raw)
        .map_err(|e| anyhow::anyhow!("{} inválida ({}): {}", name, raw, e))
}
