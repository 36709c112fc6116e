//! Core data types for project health scoring.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use pyo3::prelude::*;
use thiserror::Error;

/// Errors raised while turning dashboard rows into scorer inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown project status: {0:?}")]
    UnknownStatus(String),
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
}

/// Lifecycle stage of a project as recorded on the dashboard.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetailedStatus {
    Planning,
    Execution,
    Monitoring,
    Completed,
    Suspended,
    Cancelled,
}

impl DetailedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Execution => "execution",
            Self::Monitoring => "monitoring",
            Self::Completed => "completed",
            Self::Suspended => "suspended",
            Self::Cancelled => "cancelled",
        }
    }

    /// Statuses that bypass schedule and cost analysis entirely.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Suspended | Self::Cancelled)
    }
}

impl fmt::Display for DetailedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase, unify separators and drop the accents used in Portuguese labels.
fn fold_status_text(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for DetailedStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_status_text(s).as_str() {
            "planning" | "planejamento" => Ok(Self::Planning),
            "execution" | "execucao" | "em_execucao" => Ok(Self::Execution),
            "monitoring" | "monitoramento" => Ok(Self::Monitoring),
            "completed" | "concluido" => Ok(Self::Completed),
            "suspended" | "suspenso" => Ok(Self::Suspended),
            "cancelled" | "canceled" | "cancelado" => Ok(Self::Cancelled),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// Traffic-light health of a project.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    Green,
    Yellow,
    Red,
}

impl Indicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a date column as stored by the backend.
///
/// Accepts plain `YYYY-MM-DD` and full RFC 3339 timestamps; for the latter the
/// calendar date in the timestamp's own offset is used.
pub fn parse_record_date(s: &str) -> Result<NaiveDate, ModelError> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| ModelError::InvalidDate(s.to_string()))
}

/// Schedule, progress and cost fields of a project record.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectScheduleInfo {
    #[pyo3(get, set)]
    pub deadline: NaiveDate,
    /// Self-reported completion, 0-100.
    #[pyo3(get, set)]
    pub progress_percent: i32,
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDate>,
    /// Carried on the record; not used for scoring.
    #[pyo3(get, set)]
    pub completion_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub detailed_status: DetailedStatus,
    #[pyo3(get, set)]
    pub budget: Option<f64>,
    #[pyo3(get, set)]
    pub actual_cost: Option<f64>,
}

impl ProjectScheduleInfo {
    /// A project with no start date, completion date or cost data.
    pub fn new(deadline: NaiveDate, progress_percent: i32, detailed_status: DetailedStatus) -> Self {
        Self {
            deadline,
            progress_percent,
            start_date: None,
            completion_date: None,
            detailed_status,
            budget: None,
            actual_cost: None,
        }
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_costs(mut self, budget: f64, actual_cost: f64) -> Self {
        self.budget = Some(budget);
        self.actual_cost = Some(actual_cost);
        self
    }
}

#[pymethods]
impl ProjectScheduleInfo {
    #[new]
    #[pyo3(signature = (
        deadline,
        progress_percent,
        detailed_status=DetailedStatus::Execution,
        start_date=None,
        completion_date=None,
        budget=None,
        actual_cost=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn py_new(
        deadline: NaiveDate,
        progress_percent: i32,
        detailed_status: DetailedStatus,
        start_date: Option<NaiveDate>,
        completion_date: Option<NaiveDate>,
        budget: Option<f64>,
        actual_cost: Option<f64>,
    ) -> Self {
        Self {
            deadline,
            progress_percent,
            start_date,
            completion_date,
            detailed_status,
            budget,
            actual_cost,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ProjectScheduleInfo(deadline={}, progress={}, status={}, start={:?})",
            self.deadline, self.progress_percent, self.detailed_status, self.start_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_english_names() {
        assert_eq!("planning".parse(), Ok(DetailedStatus::Planning));
        assert_eq!("Execution".parse(), Ok(DetailedStatus::Execution));
        assert_eq!(" MONITORING ".parse(), Ok(DetailedStatus::Monitoring));
        assert_eq!("canceled".parse(), Ok(DetailedStatus::Cancelled));
    }

    #[test]
    fn test_status_portuguese_labels() {
        assert_eq!("Em execução".parse(), Ok(DetailedStatus::Execution));
        assert_eq!("em-execucao".parse(), Ok(DetailedStatus::Execution));
        assert_eq!("Concluído".parse(), Ok(DetailedStatus::Completed));
        assert_eq!("suspenso".parse(), Ok(DetailedStatus::Suspended));
        assert_eq!("cancelado".parse(), Ok(DetailedStatus::Cancelled));
        assert_eq!("planejamento".parse(), Ok(DetailedStatus::Planning));
    }

    #[test]
    fn test_status_unknown() {
        let err = "archived".parse::<DetailedStatus>().unwrap_err();
        assert_eq!(err, ModelError::UnknownStatus("archived".to_string()));
        assert_eq!(err.to_string(), "Unknown project status: \"archived\"");
    }

    #[test]
    fn test_status_display_round_trips_through_parse() {
        for status in [
            DetailedStatus::Planning,
            DetailedStatus::Execution,
            DetailedStatus::Monitoring,
            DetailedStatus::Completed,
            DetailedStatus::Suspended,
            DetailedStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse(), Ok(status));
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(DetailedStatus::Completed.is_terminal());
        assert!(DetailedStatus::Suspended.is_terminal());
        assert!(DetailedStatus::Cancelled.is_terminal());
        assert!(!DetailedStatus::Execution.is_terminal());
    }

    #[test]
    fn test_parse_record_date() {
        assert_eq!(parse_record_date("2024-03-15"), Ok(date(2024, 3, 15)));
        assert_eq!(
            parse_record_date("2024-03-15T23:30:00-03:00"),
            Ok(date(2024, 3, 15))
        );
        assert_eq!(
            parse_record_date("2024-03-15T00:00:00Z"),
            Ok(date(2024, 3, 15))
        );
        assert!(matches!(
            parse_record_date("15/03/2024"),
            Err(ModelError::InvalidDate(_))
        ));
        assert!(parse_record_date("").is_err());
    }

    #[test]
    fn test_builder_helpers() {
        let info = ProjectScheduleInfo::new(date(2024, 6, 1), 40, DetailedStatus::Execution)
            .with_start_date(date(2024, 1, 1))
            .with_costs(1000.0, 900.0);
        assert_eq!(info.start_date, Some(date(2024, 1, 1)));
        assert_eq!(info.budget, Some(1000.0));
        assert_eq!(info.actual_cost, Some(900.0));
        assert_eq!(info.completion_date, None);
    }
}
