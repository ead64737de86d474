//! Official scorecard aggregation.
//!
//! Pure functions that bucket an official's promise and project records by
//! status, compute attendance and responsiveness ratios, and assign a letter
//! grade. Every matching record is aggregated; callers never pre-paginate.
//!
//! Grade thresholds on the promise-kept percent:
//!
//! ```text
//! >= 80 → A    >= 60 → B    >= 40 → C    >= 20 → D    else F
//! ```
//!
//! The grade is absent (`None`) when the official has no promises and no
//! projects.

use chrono::{DateTime, Utc};

use crate::entities::{CitizenQuery, OfficialScorecard};
use crate::enums::{Grade, ProjectStatus, PromiseStatus};

/// `round(part / whole * 100)` with halves rounding up; 0 when `whole == 0`.
#[must_use]
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part.min(whole));
    let whole = u64::from(whole);
    // floor((200 * part + whole) / (2 * whole)) == round-half-up(100 * part / whole)
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).unwrap_or(100)
}

/// Letter grade for a promise-kept percent.
#[must_use]
pub const fn grade_for_percent(kept_percent: u32) -> Grade {
    match kept_percent {
        80.. => Grade::A,
        60..=79 => Grade::B,
        40..=59 => Grade::C,
        20..=39 => Grade::D,
        _ => Grade::F,
    }
}

/// Promise counters bucketed by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromiseStats {
    pub total: u32,
    pub kept: u32,
    pub broken: u32,
    pub in_progress: u32,
}

impl PromiseStats {
    /// Bucket statuses: `completed → kept`, `cancelled → broken`,
    /// `ongoing → in_progress`. `not_started` only counts toward the total.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = PromiseStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut stats, status| {
                stats.total += 1;
                match status {
                    PromiseStatus::Completed => stats.kept += 1,
                    PromiseStatus::Cancelled => stats.broken += 1,
                    PromiseStatus::Ongoing => stats.in_progress += 1,
                    PromiseStatus::NotStarted => {}
                }
                stats
            })
    }

    #[must_use]
    pub fn kept_percent(&self) -> u32 {
        percent(self.kept, self.total)
    }
}

/// Project counters bucketed by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub total: u32,
    pub stalled: u32,
    pub active: u32,
    pub completed: u32,
    pub cancelled: u32,
}

impl ProjectStats {
    /// Bucket statuses: `delayed → stalled`, `ongoing → active`,
    /// `completed → completed`, `cancelled → cancelled`. `planned` only counts
    /// toward the total.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ProjectStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut stats, status| {
                stats.total += 1;
                match status {
                    ProjectStatus::Delayed => stats.stalled += 1,
                    ProjectStatus::Ongoing => stats.active += 1,
                    ProjectStatus::Completed => stats.completed += 1,
                    ProjectStatus::Cancelled => stats.cancelled += 1,
                    ProjectStatus::Planned => {}
                }
                stats
            })
    }
}

/// Sitting attendance counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceStats {
    pub total: u32,
    pub present: u32,
}

impl AttendanceStats {
    pub fn from_presence<I>(presence: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        presence
            .into_iter()
            .fold(Self::default(), |mut stats, present| {
                stats.total += 1;
                if present {
                    stats.present += 1;
                }
                stats
            })
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        percent(self.present, self.total)
    }
}

/// Responsiveness to citizen queries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResponseStats {
    pub total: u32,
    pub responded: u32,
    /// Mean hours from question to answer; `None` when nothing was answered.
    pub avg_response_hours: Option<f64>,
}

impl ResponseStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_queries(queries: &[CitizenQuery]) -> Self {
        let total = u32::try_from(queries.len()).unwrap_or(u32::MAX);
        let hours: Vec<f64> = queries
            .iter()
            .filter_map(CitizenQuery::response_hours)
            .map(|h| h.max(0.0))
            .collect();
        let responded = u32::try_from(hours.len()).unwrap_or(u32::MAX);
        let avg_response_hours = if hours.is_empty() {
            None
        } else {
            Some(hours.iter().sum::<f64>() / hours.len() as f64)
        };
        Self {
            total,
            responded,
            avg_response_hours,
        }
    }
}

/// Overall grade, or `None` when there is nothing to grade.
#[must_use]
pub fn overall_grade(promises: &PromiseStats, projects: &ProjectStats) -> Option<Grade> {
    if promises.total == 0 && projects.total == 0 {
        return None;
    }
    Some(grade_for_percent(promises.kept_percent()))
}

/// Raw records for one official.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScorecardInputs<'a> {
    pub promises: &'a [PromiseStatus],
    pub projects: &'a [ProjectStatus],
    pub attendance: &'a [bool],
    pub queries: &'a [CitizenQuery],
}

/// Aggregate an official's records into a scorecard.
#[must_use]
pub fn compute_scorecard(
    user_id: &str,
    inputs: ScorecardInputs<'_>,
    now: DateTime<Utc>,
) -> OfficialScorecard {
    let promises = PromiseStats::from_statuses(inputs.promises.iter().copied());
    let projects = ProjectStats::from_statuses(inputs.projects.iter().copied());
    let attendance = AttendanceStats::from_presence(inputs.attendance.iter().copied());
    let responses = ResponseStats::from_queries(inputs.queries);

    OfficialScorecard {
        user_id: user_id.to_string(),
        promises_total: promises.total,
        promises_kept: promises.kept,
        promises_broken: promises.broken,
        promises_in_progress: promises.in_progress,
        promise_kept_percent: promises.kept_percent(),
        projects_total: projects.total,
        projects_stalled: projects.stalled,
        projects_active: projects.active,
        projects_completed: projects.completed,
        projects_cancelled: projects.cancelled,
        attendance_sessions_total: attendance.total,
        attendance_sessions_present: attendance.present,
        attendance_percent: attendance.percent(),
        total_citizen_queries: responses.total,
        queries_responded: responses.responded,
        avg_response_hours: responses.avg_response_hours,
        overall_grade: overall_grade(&promises, &projects),
        last_calculated: now,
    }
}
