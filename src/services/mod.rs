// Services module - Business logic

pub mod airlines;
pub mod flight_lookup;
pub mod flight_match;
pub mod itinerary;
pub mod overview;
pub mod report;
pub mod schedule;
