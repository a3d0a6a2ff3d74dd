//! Scheduled health check of the IA model service
//!
//! The IA service reports its own state on a health URL. A failed request
//! raises `SERVICE_DOWN`; a body mentioning drift or an error raises `DRIFT`
//! or `MODEL_ERROR`. All alerts belong to the IA team.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::automock;

use super::service::{AlertService, CreateAlertRequest};
use crate::config::IaHealthConfig;
use crate::domain::alert::{Alert, AlertRepository, AlertType};
use crate::domain::team::TeamRepository;
use crate::domain::DomainError;

pub const IA_TEAM_TAG: &str = "IA";

/// Longest slice of the health body quoted in an alert message
const QUOTED_BODY_CHARS: usize = 900;

/// What one health request produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthReport {
    Body(String),
    Unreachable(String),
}

/// Source of IA health reports
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HealthEndpoint: Send + Sync {
    async fn fetch(&self) -> HealthReport;
}

/// GETs the configured health URL
#[derive(Debug, Clone)]
pub struct HttpHealthEndpoint {
    client: Client,
    url: String,
}

impl HttpHealthEndpoint {
    pub fn new(config: &IaHealthConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl HealthEndpoint for HttpHealthEndpoint {
    async fn fetch(&self) -> HealthReport {
        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return HealthReport::Unreachable("request timed out".to_string()),
            Err(e) if e.is_connect() => return HealthReport::Unreachable("connection failed".to_string()),
            Err(e) => return HealthReport::Unreachable(e.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return HealthReport::Unreachable(format!("HTTP status {}", status.as_u16()));
        }

        match response.text().await {
            Ok(body) => HealthReport::Body(body),
            Err(e) => HealthReport::Unreachable(format!("unreadable body: {}", e)),
        }
    }
}

/// Alerts a health report calls for, in the order they are raised
pub fn classify(report: &HealthReport) -> Vec<(AlertType, String)> {
    let body = match report {
        HealthReport::Unreachable(reason) => {
            return vec![(
                AlertType::ServiceDown,
                format!("IA service unreachable: {}", reason),
            )];
        }
        HealthReport::Body(body) => body.trim(),
    };

    if body.is_empty() {
        return Vec::new();
    }

    let quoted: String = body.chars().take(QUOTED_BODY_CHARS).collect();
    let normalized = body.to_lowercase();
    let mut alerts = Vec::new();

    if normalized.contains("drift") {
        alerts.push((AlertType::Drift, format!("Detected drift: {}", quoted)));
    }
    if normalized.contains("error") {
        alerts.push((AlertType::ModelError, format!("Model error reported: {}", quoted)));
    }

    alerts
}

/// Polls the IA health endpoint and raises alerts for the IA team
pub struct IaHealthMonitor<E, A, T>
where
    E: HealthEndpoint,
    A: AlertRepository,
    T: TeamRepository,
{
    endpoint: E,
    alerts: Arc<AlertService<A, T>>,
}

impl<E, A, T> IaHealthMonitor<E, A, T>
where
    E: HealthEndpoint + 'static,
    A: AlertRepository + 'static,
    T: TeamRepository + 'static,
{
    pub fn new(endpoint: E, alerts: Arc<AlertService<A, T>>) -> Self {
        Self { endpoint, alerts }
    }

    /// Run one check and return the alerts it raised
    pub async fn check(&self) -> Result<Vec<Alert>, DomainError> {
        let report = self.endpoint.fetch().await;
        if let HealthReport::Unreachable(reason) = &report {
            warn!(reason = %reason, "IA service health check failed");
        }

        let findings = classify(&report);
        if findings.is_empty() {
            debug!("IA service healthy");
        }

        let mut raised = Vec::with_capacity(findings.len());
        for (alert_type, message) in findings {
            let alert = self
                .alerts
                .create(CreateAlertRequest {
                    team_tag: IA_TEAM_TAG.to_string(),
                    alert_type,
                    message,
                })
                .await?;
            raised.push(alert);
        }

        Ok(raised)
    }

    /// Check now and then after every `interval`, until the runtime stops
    pub fn spawn(self, interval: Duration) -> JoinHandle<()> {
        info!(interval_ms = interval.as_millis() as u64, "Starting IA health monitor");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(e) = self.check().await {
                    warn!(error = %e, "Failed to record IA health alerts");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alert::AlertQuery;
    use crate::infrastructure::alert::InMemoryAlertRepository;
    use crate::infrastructure::team::InMemoryTeamRepository;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    type TestAlerts = AlertService<InMemoryAlertRepository, InMemoryTeamRepository>;

    fn alert_service() -> Arc<TestAlerts> {
        Arc::new(AlertService::new(
            Arc::new(InMemoryAlertRepository::new()),
            Arc::new(InMemoryTeamRepository::new()),
        ))
    }

    fn http_endpoint(url: String) -> HttpHealthEndpoint {
        HttpHealthEndpoint::new(&IaHealthConfig {
            enabled: true,
            url,
            interval_ms: 1_000,
            timeout_ms: 2_000,
        })
        .unwrap()
    }

    async fn server_answering(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn types(findings: &[(AlertType, String)]) -> Vec<AlertType> {
        findings.iter().map(|(t, _)| *t).collect()
    }

    #[test]
    fn test_classify_bodies() {
        let healthy = classify(&HealthReport::Body(r#"{"status":"ok"}"#.to_string()));
        assert!(healthy.is_empty());

        assert!(classify(&HealthReport::Body("   ".to_string())).is_empty());

        let drift = classify(&HealthReport::Body("Feature DRIFT above threshold".to_string()));
        assert_eq!(types(&drift), vec![AlertType::Drift]);
        assert_eq!(drift[0].1, "Detected drift: Feature DRIFT above threshold");

        let error = classify(&HealthReport::Body(r#"{"model":"Error loading"}"#.to_string()));
        assert_eq!(types(&error), vec![AlertType::ModelError]);

        let both = classify(&HealthReport::Body("drift and error".to_string()));
        assert_eq!(types(&both), vec![AlertType::Drift, AlertType::ModelError]);
    }

    #[test]
    fn test_classify_unreachable() {
        let findings = classify(&HealthReport::Unreachable("connection failed".to_string()));

        assert_eq!(types(&findings), vec![AlertType::ServiceDown]);
        assert_eq!(findings[0].1, "IA service unreachable: connection failed");
    }

    #[test]
    fn test_long_body_is_quoted_within_alert_limit() {
        let body = format!("drift {}", "x".repeat(5_000));
        let findings = classify(&HealthReport::Body(body));

        assert!(findings[0].1.chars().count() <= 1024);
    }

    #[tokio::test]
    async fn test_check_raises_alerts_for_ia() {
        let mut endpoint = MockHealthEndpoint::new();
        endpoint
            .expect_fetch()
            .times(1)
            .returning(|| HealthReport::Body("model error: drift detected".to_string()));

        let alerts = alert_service();
        let monitor = IaHealthMonitor::new(endpoint, alerts.clone());

        let raised = monitor.check().await.unwrap();

        assert_eq!(raised.len(), 2);
        assert!(raised.iter().all(|a| a.team_tag == IA_TEAM_TAG && !a.resolved));
        assert_eq!(alerts.count(&AlertQuery::for_team("IA")).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_healthy_check_raises_nothing() {
        let server = server_answering(200, r#"{"status":"UP"}"#).await;
        let alerts = alert_service();
        let monitor = IaHealthMonitor::new(
            http_endpoint(format!("{}/health", server.uri())),
            alerts.clone(),
        );

        assert!(monitor.check().await.unwrap().is_empty());
        assert_eq!(alerts.count(&AlertQuery::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_http_body_is_classified() {
        let server = server_answering(200, "warning: data drift on feature age").await;
        let monitor = IaHealthMonitor::new(
            http_endpoint(format!("{}/health", server.uri())),
            alert_service(),
        );

        let raised = monitor.check().await.unwrap();

        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].alert_type, AlertType::Drift);
    }

    #[tokio::test]
    async fn test_error_status_is_service_down() {
        let server = server_answering(503, "unavailable").await;
        let endpoint = http_endpoint(format!("{}/health", server.uri()));

        assert_eq!(
            endpoint.fetch().await,
            HealthReport::Unreachable("HTTP status 503".to_string())
        );

        let raised = IaHealthMonitor::new(endpoint, alert_service())
            .check()
            .await
            .unwrap();
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].alert_type, AlertType::ServiceDown);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_service_down() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = http_endpoint(format!("http://127.0.0.1:{}/health", port));

        let raised = IaHealthMonitor::new(endpoint, alert_service())
            .check()
            .await
            .unwrap();

        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].alert_type, AlertType::ServiceDown);
        assert!(raised[0].message.starts_with("IA service unreachable"));
    }

    #[tokio::test]
    async fn test_spawned_monitor_checks_immediately() {
        let server = server_answering(200, "error").await;
        let alerts = alert_service();

        let handle = IaHealthMonitor::new(
            http_endpoint(format!("{}/health", server.uri())),
            alerts.clone(),
        )
        .spawn(Duration::from_secs(3600));

        let mut count = 0;
        for _ in 0..50 {
            count = alerts.count(&AlertQuery::default()).await.unwrap();
            if count > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        handle.abort();

        assert_eq!(count, 1);
    }
}
