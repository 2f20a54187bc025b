pub mod bookings;
pub mod rooms;
pub mod service_bookings;
