// API module - HTTP endpoints

pub mod bookings;
pub mod flights;
pub mod people;
pub mod report;
pub mod travelers;
