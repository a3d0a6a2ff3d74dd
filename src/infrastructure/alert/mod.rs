//! Alert infrastructure implementations

mod health_monitor;
mod repository;
mod service;

pub use health_monitor::{
    classify, HealthEndpoint, HealthReport, HttpHealthEndpoint, IaHealthMonitor, IA_TEAM_TAG,
};
pub use repository::InMemoryAlertRepository;
pub use service::{AlertService, CreateAlertRequest};
