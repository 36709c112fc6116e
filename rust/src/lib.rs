//! Project health indicator for the DCPA management dashboard.
//!
//! Derives a green/yellow/red indicator for each project from its deadline,
//! reported progress and budget, and exposes the scorer to Python.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::HashMap;

mod config;
pub mod indicator;
pub mod logging;
mod models;
pub mod summary;

pub use config::IndicatorConfig;
pub use indicator::{
    compute_indicator, compute_indicator_now, compute_indicator_with_config, explain_indicator,
    IndicatorBreakdown, Rule,
};
pub use models::{parse_record_date, DetailedStatus, Indicator, ModelError, ProjectScheduleInfo};
pub use summary::{compute_indicators, IndicatorSummary};

fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Compute the indicator for a single project.
///
/// # Arguments
/// * `info` - Schedule, progress and cost fields of the project
/// * `today` - Reference date (defaults to the local calendar date)
/// * `config` - Policy constants (defaults to the standard thresholds)
#[pyfunction]
#[pyo3(name = "compute_indicator", signature = (info, today=None, config=None))]
fn py_compute_indicator(
    info: ProjectScheduleInfo,
    today: Option<NaiveDate>,
    config: Option<IndicatorConfig>,
) -> Indicator {
    let config = config.unwrap_or_default();
    compute_indicator_with_config(&info, resolve_today(today), &config)
}

/// Compute the indicator along with the values and rule that produced it.
#[pyfunction]
#[pyo3(name = "explain_indicator", signature = (info, today=None, config=None))]
fn py_explain_indicator(
    info: ProjectScheduleInfo,
    today: Option<NaiveDate>,
    config: Option<IndicatorConfig>,
) -> IndicatorBreakdown {
    let config = config.unwrap_or_default();
    explain_indicator(&info, resolve_today(today), &config)
}

/// Compute indicators for many projects.
///
/// # Arguments
/// * `projects` - Dict mapping project ID to ProjectScheduleInfo
///
/// # Returns
/// * Dict mapping project ID to Indicator
#[pyfunction]
#[pyo3(name = "compute_indicators", signature = (projects, today=None, config=None))]
fn py_compute_indicators(
    projects: HashMap<String, ProjectScheduleInfo>,
    today: Option<NaiveDate>,
    config: Option<IndicatorConfig>,
) -> HashMap<String, Indicator> {
    let config = config.unwrap_or_default();
    // std HashMap on the Python boundary
    compute_indicators(&projects, resolve_today(today), &config)
        .into_iter()
        .collect()
}

/// Count indicators per colour.
#[pyfunction]
#[pyo3(name = "summarize_indicators")]
fn py_summarize_indicators(indicators: Vec<Indicator>) -> IndicatorSummary {
    IndicatorSummary::summarize(indicators)
}

/// Parse a status label (English or the dashboard's Portuguese labels).
///
/// # Raises
/// * ValueError if the label is not recognised
#[pyfunction]
#[pyo3(name = "parse_detailed_status")]
fn py_parse_detailed_status(text: &str) -> PyResult<DetailedStatus> {
    text.parse()
        .map_err(|e: ModelError| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// Parse a `YYYY-MM-DD` or RFC 3339 date column.
///
/// # Raises
/// * ValueError if the text is not a date
#[pyfunction]
#[pyo3(name = "parse_record_date")]
fn py_parse_record_date(text: &str) -> PyResult<NaiveDate> {
    parse_record_date(text).map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// The dcpa_indicator Python module.
#[pymodule]
fn dcpa_indicator(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<DetailedStatus>()?;
    m.add_class::<Indicator>()?;
    m.add_class::<ProjectScheduleInfo>()?;
    m.add_class::<IndicatorBreakdown>()?;
    m.add_class::<Rule>()?;
    m.add_class::<IndicatorSummary>()?;

    // Config types
    m.add_class::<IndicatorConfig>()?;

    // Scoring
    m.add_function(wrap_pyfunction!(py_compute_indicator, m)?)?;
    m.add_function(wrap_pyfunction!(py_explain_indicator, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_indicators, m)?)?;
    m.add_function(wrap_pyfunction!(py_summarize_indicators, m)?)?;

    // Parsing
    m.add_function(wrap_pyfunction!(py_parse_detailed_status, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_record_date, m)?)?;

    Ok(())
}
