pub mod analytics;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod rbac;
pub mod staff;
