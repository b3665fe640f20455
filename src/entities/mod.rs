pub mod appointment;
pub mod queue_entry;
pub mod service;
pub mod stylist;
