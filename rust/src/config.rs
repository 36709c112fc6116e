//! Policy constants for the project health indicator.

use pyo3::prelude::*;

/// Thresholds and heuristics used by the indicator rules.
///
/// Gap thresholds are in percentage points of progress (negative = behind);
/// cost thresholds are percent over budget.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorConfig {
    /// Assumed project lifespan ending at the deadline when no start date is recorded.
    #[pyo3(get, set)]
    pub assumed_lifespan_days: i64,
    /// Days past the deadline after which a project is red regardless of progress.
    #[pyo3(get, set)]
    pub overdue_grace_days: i64,
    /// Projects due within this many days use the tightened thresholds.
    #[pyo3(get, set)]
    pub near_deadline_days: i64,
    /// Gap below which an overdue project (within grace) is red.
    #[pyo3(get, set)]
    pub overdue_gap_red: f64,
    #[pyo3(get, set)]
    pub near_deadline_gap_red: f64,
    #[pyo3(get, set)]
    pub near_deadline_gap_yellow: f64,
    #[pyo3(get, set)]
    pub near_deadline_cost_yellow: f64,
    #[pyo3(get, set)]
    pub gap_red: f64,
    #[pyo3(get, set)]
    pub cost_red: f64,
    #[pyo3(get, set)]
    pub gap_yellow: f64,
    #[pyo3(get, set)]
    pub cost_yellow: f64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            assumed_lifespan_days: 30,
            overdue_grace_days: 7,
            near_deadline_days: 7,
            overdue_gap_red: -20.0,
            near_deadline_gap_red: -15.0,
            near_deadline_gap_yellow: -5.0,
            near_deadline_cost_yellow: 20.0,
            gap_red: -20.0,
            cost_red: 30.0,
            gap_yellow: -5.0,
            cost_yellow: 10.0,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl IndicatorConfig {
    #[new]
    #[pyo3(signature = (
        assumed_lifespan_days=None,
        overdue_grace_days=None,
        near_deadline_days=None,
        overdue_gap_red=None,
        near_deadline_gap_red=None,
        near_deadline_gap_yellow=None,
        near_deadline_cost_yellow=None,
        gap_red=None,
        cost_red=None,
        gap_yellow=None,
        cost_yellow=None,
        verbosity=0
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        assumed_lifespan_days: Option<i64>,
        overdue_grace_days: Option<i64>,
        near_deadline_days: Option<i64>,
        overdue_gap_red: Option<f64>,
        near_deadline_gap_red: Option<f64>,
        near_deadline_gap_yellow: Option<f64>,
        near_deadline_cost_yellow: Option<f64>,
        gap_red: Option<f64>,
        cost_red: Option<f64>,
        gap_yellow: Option<f64>,
        cost_yellow: Option<f64>,
        verbosity: u8,
    ) -> Self {
        let defaults = Self::default();
        Self {
            assumed_lifespan_days: assumed_lifespan_days.unwrap_or(defaults.assumed_lifespan_days),
            overdue_grace_days: overdue_grace_days.unwrap_or(defaults.overdue_grace_days),
            near_deadline_days: near_deadline_days.unwrap_or(defaults.near_deadline_days),
            overdue_gap_red: overdue_gap_red.unwrap_or(defaults.overdue_gap_red),
            near_deadline_gap_red: near_deadline_gap_red.unwrap_or(defaults.near_deadline_gap_red),
            near_deadline_gap_yellow: near_deadline_gap_yellow
                .unwrap_or(defaults.near_deadline_gap_yellow),
            near_deadline_cost_yellow: near_deadline_cost_yellow
                .unwrap_or(defaults.near_deadline_cost_yellow),
            gap_red: gap_red.unwrap_or(defaults.gap_red),
            cost_red: cost_red.unwrap_or(defaults.cost_red),
            gap_yellow: gap_yellow.unwrap_or(defaults.gap_yellow),
            cost_yellow: cost_yellow.unwrap_or(defaults.cost_yellow),
            verbosity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "IndicatorConfig(assumed_lifespan_days={}, overdue_grace_days={}, near_deadline_days={})",
            self.assumed_lifespan_days, self.overdue_grace_days, self.near_deadline_days
        )
    }
}
