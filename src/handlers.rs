pub mod adventures;
pub mod agencies;
pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod staff;
