//! Alert entity and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::page::PageRequest;

/// Category of a cognitive alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    ServiceDown,
    Drift,
    ModelError,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceDown => "SERVICE_DOWN",
            Self::Drift => "DRIFT",
            Self::ModelError => "MODEL_ERROR",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SERVICE_DOWN" => Ok(Self::ServiceDown),
            "DRIFT" => Ok(Self::Drift),
            "MODEL_ERROR" => Ok(Self::ModelError),
            other => Err(format!("Unknown alert type: {}", other)),
        }
    }
}

/// An alert that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub team_tag: String,
    pub alert_type: AlertType,
    pub message: String,
}

/// A stored alert
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    pub team_tag: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
}

impl Alert {
    pub fn from_new(id: i64, alert: NewAlert) -> Self {
        Self {
            id,
            team_tag: alert.team_tag,
            alert_type: alert.alert_type,
            message: alert.message,
            timestamp: Utc::now(),
            resolved: false,
        }
    }

    pub fn belongs_to(&self, team_tag: &str) -> bool {
        self.team_tag.eq_ignore_ascii_case(team_tag)
    }
}

/// Filter for listing and counting alerts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertQuery {
    /// Restrict to one team; `None` means every team
    pub team_tag: Option<String>,
    pub unresolved_only: bool,
    pub page: PageRequest,
}

impl AlertQuery {
    pub fn for_team(team_tag: impl Into<String>) -> Self {
        Self {
            team_tag: Some(team_tag.into()),
            ..Default::default()
        }
    }

    pub fn unresolved(mut self) -> Self {
        self.unresolved_only = true;
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        let team_matches = self
            .team_tag
            .as_deref()
            .is_none_or(|tag| alert.belongs_to(tag));

        team_matches && !(self.unresolved_only && alert.resolved)
    }
}
