// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Rooms ---
        handlers::rooms::list_room_types,
        handlers::rooms::list_available_rooms,
        handlers::rooms::check_availability,

        // --- Bookings ---
        handlers::bookings::create_booking,
        handlers::bookings::get_booking,
        handlers::bookings::update_booking_status,
        handlers::bookings::cancel_booking,
        handlers::bookings::register_payment,
        handlers::bookings::modify_booking,

        // --- Service Bookings ---
        handlers::service_bookings::create_service_booking,
        handlers::service_bookings::get_service_booking,
        handlers::service_bookings::update_service_status,
        handlers::service_bookings::assign_staff,
        handlers::service_bookings::cancel_service_booking,
    ),
    components(
        schemas(
            // --- Rooms ---
            models::rooms::RoomStatus,
            models::rooms::RoomType,
            models::rooms::Room,

            // --- Bookings ---
            models::bookings::BookingStatus,
            models::bookings::Booking,
            models::bookings::BookingRoom,
            models::bookings::BookingDetail,
            models::bookings::PaymentMethod,
            models::bookings::PaymentStatus,
            models::bookings::Payment,

            // --- Service Bookings ---
            models::services::ServiceBookingStatus,
            models::services::ServiceItem,
            models::services::ServiceBooking,

            // --- Cálculos ---
            services::availability_service::Availability,
            services::pricing_service::Quote,

            // --- Payloads ---
            handlers::rooms::AvailabilityQuery,
            handlers::rooms::AvailabilityCheckPayload,
            handlers::bookings::CreateBookingPayload,
            handlers::bookings::UpdateBookingStatusPayload,
            handlers::bookings::CancelBookingPayload,
            handlers::bookings::RegisterPaymentPayload,
            handlers::bookings::ModifyBookingPayload,
            handlers::service_bookings::CreateServiceBookingPayload,
            handlers::service_bookings::UpdateServiceStatusPayload,
            handlers::service_bookings::AssignStaffPayload,
            handlers::service_bookings::CancelServiceBookingPayload,
        )
    ),
    tags(
        (name = "Rooms", description = "Disponibilidade de quartos"),
        (name = "Bookings", description = "Reservas: criação, ciclo de vida e pagamento"),
        (name = "Service Bookings", description = "Pedidos de serviço durante a estadia")
    )
)]
pub struct ApiDoc;
