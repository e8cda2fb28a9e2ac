pub mod auth_service;
pub mod booking_service;
pub mod profile_service;
