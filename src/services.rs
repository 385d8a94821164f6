pub mod analytics_service;
pub mod auth;
pub mod booking_service;
pub mod catalog_service;
pub mod permissions;
pub mod session;
pub mod staff_service;
