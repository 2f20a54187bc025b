pub mod booking_repo;
pub use booking_repo::BookingRepository;
pub mod room_repo;
pub use room_repo::RoomRepository;
pub mod service_repo;
pub use service_repo::ServiceBookingRepository;
