pub mod calendar;
pub mod in_flight;
