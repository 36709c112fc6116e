//! Batch scoring and per-colour tallies for the projects dashboard.

use chrono::NaiveDate;
use pyo3::prelude::*;
use rustc_hash::FxHashMap;

use crate::config::IndicatorConfig;
use crate::indicator::compute_indicator_with_config;
use crate::log_changes;
use crate::models::{Indicator, ProjectScheduleInfo};

/// Score every project, keyed by project id.
pub fn compute_indicators<'a, I>(
    projects: I,
    today: NaiveDate,
    config: &IndicatorConfig,
) -> FxHashMap<String, Indicator>
where
    I: IntoIterator<Item = (&'a String, &'a ProjectScheduleInfo)>,
{
    let projects = projects.into_iter();
    let mut indicators =
        FxHashMap::with_capacity_and_hasher(projects.size_hint().0, Default::default());
    for (id, info) in projects {
        indicators.insert(id.clone(), compute_indicator_with_config(info, today, config));
    }
    log_changes!(
        config.verbosity,
        "Scored {} projects as of {}",
        indicators.len(),
        today
    );
    indicators
}

/// Number of projects in each indicator colour.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndicatorSummary {
    #[pyo3(get)]
    pub green: usize,
    #[pyo3(get)]
    pub yellow: usize,
    #[pyo3(get)]
    pub red: usize,
}

impl IndicatorSummary {
    pub fn record(&mut self, indicator: Indicator) {
        match indicator {
            Indicator::Green => self.green += 1,
            Indicator::Yellow => self.yellow += 1,
            Indicator::Red => self.red += 1,
        }
    }

    pub fn summarize<I>(indicators: I) -> Self
    where
        I: IntoIterator<Item = Indicator>,
    {
        let mut summary = Self::default();
        for indicator in indicators {
            summary.record(indicator);
        }
        summary
    }
}

#[pymethods]
impl IndicatorSummary {
    pub fn total(&self) -> usize {
        self.green + self.yellow + self.red
    }

    /// Projects that need attention (yellow or red).
    pub fn at_risk(&self) -> usize {
        self.yellow + self.red
    }

    fn __repr__(&self) -> String {
        format!(
            "IndicatorSummary(green={}, yellow={}, red={})",
            self.green, self.yellow, self.red
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DetailedStatus;
    use chrono::Duration;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn make_project(
        deadline_in_days: i64,
        progress: i32,
        status: DetailedStatus,
    ) -> ProjectScheduleInfo {
        ProjectScheduleInfo::new(today() + Duration::days(deadline_in_days), progress, status)
    }

    #[test]
    fn test_compute_indicators_by_id() {
        let projects: HashMap<String, ProjectScheduleInfo> = [
            ("portal".to_string(), make_project(60, 100, DetailedStatus::Execution)),
            ("migracao".to_string(), make_project(-10, 50, DetailedStatus::Execution)),
            ("censo".to_string(), make_project(-3, 90, DetailedStatus::Monitoring)),
            ("arquivo".to_string(), make_project(-30, 10, DetailedStatus::Completed)),
        ]
        .into_iter()
        .collect();

        let indicators = compute_indicators(&projects, today(), &IndicatorConfig::default());
        assert_eq!(indicators.len(), 4);
        assert_eq!(indicators["portal"], Indicator::Green);
        assert_eq!(indicators["migracao"], Indicator::Red);
        assert_eq!(indicators["censo"], Indicator::Yellow);
        assert_eq!(indicators["arquivo"], Indicator::Green);

        let summary = IndicatorSummary::summarize(indicators.values().copied());
        assert_eq!(
            summary,
            IndicatorSummary {
                green: 2,
                yellow: 1,
                red: 1
            }
        );
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.at_risk(), 2);
    }

    #[test]
    fn test_empty_inputs() {
        let projects: HashMap<String, ProjectScheduleInfo> = HashMap::new();
        assert!(compute_indicators(&projects, today(), &IndicatorConfig::default()).is_empty());

        let summary = IndicatorSummary::summarize(std::iter::empty());
        assert_eq!(summary, IndicatorSummary::default());
        assert_eq!(summary.total(), 0);
    }
}
