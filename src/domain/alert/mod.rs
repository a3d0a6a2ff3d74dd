//! Alert domain module

mod entity;
mod repository;

pub use entity::{Alert, AlertQuery, AlertType, NewAlert};
pub use repository::AlertRepository;

#[cfg(test)]
pub use repository::MockAlertRepository;
