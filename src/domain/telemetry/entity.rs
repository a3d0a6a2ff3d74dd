//! Telemetry record types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OTLP signal family a record was pushed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetrySignal {
    Metrics,
    Traces,
    Logs,
}

impl TelemetrySignal {
    pub const ALL: [TelemetrySignal; 3] = [Self::Metrics, Self::Traces, Self::Logs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metrics => "metrics",
            Self::Traces => "traces",
            Self::Logs => "logs",
        }
    }
}

impl fmt::Display for TelemetrySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TelemetrySignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|signal| signal.as_str() == s)
            .ok_or_else(|| format!("Unknown telemetry signal: {}", s))
    }
}

/// An opaque payload accepted for a team. The payload is stored as received.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTelemetryRecord {
    pub signal: TelemetrySignal,
    pub team_tag: String,
    pub timestamp: DateTime<Utc>,
    pub payload_json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    pub id: i64,
    #[serde(skip)]
    pub signal: TelemetrySignal,
    pub team_tag: String,
    pub timestamp: DateTime<Utc>,
    pub payload_json: String,
}

impl TelemetryRecord {
    pub fn from_new(id: i64, record: NewTelemetryRecord) -> Self {
        Self {
            id,
            signal: record.signal,
            team_tag: record.team_tag,
            timestamp: record.timestamp,
            payload_json: record.payload_json,
        }
    }
}
