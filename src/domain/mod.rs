pub mod booking;
pub mod error;
pub mod repository;
pub mod user;
