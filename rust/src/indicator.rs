//! Traffic-light scoring of project health.
//!
//! A project's indicator is derived from three signals:
//! - days remaining until the deadline
//! - progress gap: reported progress minus the progress expected by today
//! - cost variance: percent over (or under) the planned budget
//!
//! Completed projects are always green and halted ones (suspended or cancelled)
//! always yellow. Everything else goes through an ordered rule list where the
//! first matching rule decides.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::config::IndicatorConfig;
use crate::models::{DetailedStatus, Indicator, ProjectScheduleInfo};
use crate::{log_changes, log_checks, log_debug};

/// The rule that decided an indicator.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    Completed,
    Halted,
    SeverelyOverdue,
    Overdue,
    NearDeadline,
    BehindSchedule,
    CostOverrun,
    Slipping,
    OnTrack,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Halted => "halted",
            Self::SeverelyOverdue => "severely_overdue",
            Self::Overdue => "overdue",
            Self::NearDeadline => "near_deadline",
            Self::BehindSchedule => "behind_schedule",
            Self::CostOverrun => "cost_overrun",
            Self::Slipping => "slipping",
            Self::OnTrack => "on_track",
        }
    }
}

/// An indicator together with the values it was derived from.
///
/// Schedule and cost fields are `None` when a terminal status decided the
/// indicator before any of them were computed.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorBreakdown {
    #[pyo3(get)]
    pub indicator: Indicator,
    #[pyo3(get)]
    pub rule: Rule,
    #[pyo3(get)]
    pub days_remaining: Option<i64>,
    #[pyo3(get)]
    pub expected_progress: Option<i64>,
    #[pyo3(get)]
    pub progress_gap: Option<i64>,
    #[pyo3(get)]
    pub cost_variance_pct: Option<f64>,
}

impl IndicatorBreakdown {
    fn terminal(indicator: Indicator, rule: Rule) -> Self {
        Self {
            indicator,
            rule,
            days_remaining: None,
            expected_progress: None,
            progress_gap: None,
            cost_variance_pct: None,
        }
    }
}

#[pymethods]
impl IndicatorBreakdown {
    fn __repr__(&self) -> String {
        format!(
            "IndicatorBreakdown(indicator={}, rule={}, days_remaining={:?}, progress_gap={:?})",
            self.indicator,
            self.rule.as_str(),
            self.days_remaining,
            self.progress_gap
        )
    }
}

/// Progress (0-100) a project should have reached by `today`.
///
/// With a start date this is the elapsed fraction of the planned duration.
/// Without one, the project is assumed to have lasted
/// `assumed_lifespan_days` up to the deadline; once the deadline has been
/// reached the project is expected to be finished.
fn expected_progress(
    info: &ProjectScheduleInfo,
    today: NaiveDate,
    days_remaining: i64,
    config: &IndicatorConfig,
) -> i64 {
    if let Some(start) = info.start_date {
        let total_duration = (info.deadline - start).num_days();
        let elapsed = (today - start).num_days();
        if total_duration > 0 && elapsed >= 0 {
            let pct = (elapsed as f64 / total_duration as f64 * 100.0).round() as i64;
            pct.min(100)
        } else {
            0
        }
    } else if days_remaining > 0 {
        let estimated_total = days_remaining + config.assumed_lifespan_days;
        let estimated_elapsed = config.assumed_lifespan_days - days_remaining;
        if estimated_total > 0 && estimated_elapsed > 0 {
            let pct = (estimated_elapsed as f64 / estimated_total as f64 * 100.0).round() as i64;
            pct.clamp(0, 100)
        } else {
            0
        }
    } else {
        100
    }
}

/// Percent over budget, or 0 when there is no usable budget or no recorded cost.
fn cost_variance_pct(info: &ProjectScheduleInfo) -> f64 {
    match (info.budget, info.actual_cost) {
        (Some(budget), Some(actual)) if budget > 0.0 => (actual - budget) / budget * 100.0,
        _ => 0.0,
    }
}

fn decide(
    days_remaining: i64,
    progress_gap: i64,
    cost_variance: f64,
    config: &IndicatorConfig,
) -> (Indicator, Rule) {
    let gap = progress_gap as f64;

    if days_remaining < 0 && -days_remaining > config.overdue_grace_days {
        return (Indicator::Red, Rule::SeverelyOverdue);
    }
    if days_remaining < 0 {
        let indicator = if gap < config.overdue_gap_red {
            Indicator::Red
        } else {
            Indicator::Yellow
        };
        return (indicator, Rule::Overdue);
    }
    if days_remaining > 0 && days_remaining <= config.near_deadline_days {
        let indicator = if gap < config.near_deadline_gap_red {
            Indicator::Red
        } else if gap < config.near_deadline_gap_yellow
            || cost_variance > config.near_deadline_cost_yellow
        {
            Indicator::Yellow
        } else {
            Indicator::Green
        };
        return (indicator, Rule::NearDeadline);
    }
    if gap < config.gap_red {
        return (Indicator::Red, Rule::BehindSchedule);
    }
    if cost_variance > config.cost_red {
        return (Indicator::Red, Rule::CostOverrun);
    }
    if gap < config.gap_yellow || cost_variance > config.cost_yellow {
        return (Indicator::Yellow, Rule::Slipping);
    }
    (Indicator::Green, Rule::OnTrack)
}

/// Score a project and report how the indicator was reached.
pub fn explain_indicator(
    info: &ProjectScheduleInfo,
    today: NaiveDate,
    config: &IndicatorConfig,
) -> IndicatorBreakdown {
    let verbosity = config.verbosity;

    match info.detailed_status {
        DetailedStatus::Completed => {
            log_checks!(verbosity, "  status completed -> green");
            return IndicatorBreakdown::terminal(Indicator::Green, Rule::Completed);
        }
        DetailedStatus::Suspended | DetailedStatus::Cancelled => {
            log_checks!(verbosity, "  status {} -> yellow", info.detailed_status);
            return IndicatorBreakdown::terminal(Indicator::Yellow, Rule::Halted);
        }
        DetailedStatus::Planning | DetailedStatus::Execution | DetailedStatus::Monitoring => {}
    }

    let days_remaining = (info.deadline - today).num_days();
    let expected = expected_progress(info, today, days_remaining, config);
    let progress = i64::from(info.progress_percent.clamp(0, 100));
    let progress_gap = progress - expected;
    let cost_variance = cost_variance_pct(info);

    log_debug!(
        verbosity,
        "  deadline={} today={} days_remaining={} expected={} progress={} gap={} cost_variance={:.1}%",
        info.deadline,
        today,
        days_remaining,
        expected,
        progress,
        progress_gap,
        cost_variance
    );

    let (indicator, rule) = decide(days_remaining, progress_gap, cost_variance, config);
    log_changes!(verbosity, "Indicator {} ({})", indicator, rule.as_str());

    IndicatorBreakdown {
        indicator,
        rule,
        days_remaining: Some(days_remaining),
        expected_progress: Some(expected),
        progress_gap: Some(progress_gap),
        cost_variance_pct: Some(cost_variance),
    }
}

/// Score a project with custom policy constants.
pub fn compute_indicator_with_config(
    info: &ProjectScheduleInfo,
    today: NaiveDate,
    config: &IndicatorConfig,
) -> Indicator {
    explain_indicator(info, today, config).indicator
}

/// Score a project as of `today` with the default policy.
pub fn compute_indicator(info: &ProjectScheduleInfo, today: NaiveDate) -> Indicator {
    compute_indicator_with_config(info, today, &IndicatorConfig::default())
}

/// Score a project as of the local calendar date.
pub fn compute_indicator_now(info: &ProjectScheduleInfo) -> Indicator {
    compute_indicator(info, chrono::Local::now().date_naive())
}
