//! Read-only filtering and search over the project collection.
//!
//! Pure projections: given a snapshot and today's date they select matching
//! projects without touching state. Deadline windows follow the calendar:
//! a week runs Sunday through Saturday around today, while month and year
//! compare calendar fields. A project without a deadline never matches a
//! time filter.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{EngiproError, Result};
use crate::model::{Project, ProjectStatus};

/// Deadline window relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineWindow {
    ThisWeek,
    ThisMonth,
    ThisYear,
}

impl FromStr for DeadlineWindow {
    type Err = EngiproError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "this-week" => Ok(Self::ThisWeek),
            "month" | "this-month" => Ok(Self::ThisMonth),
            "year" | "this-year" => Ok(Self::ThisYear),
            _ => Err(EngiproError::validation(
                "due",
                format!("unknown window '{s}' (expected week, month, or year)"),
            )),
        }
    }
}

/// Combined filter criteria; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive substring match on the project name.
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    /// Exact owner match.
    pub owner: Option<String>,
    /// Exact designer match; projects without a designer never match.
    pub designer: Option<String>,
    pub due: Option<DeadlineWindow>,
}

impl ProjectFilter {
    /// Whether any criterion is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.search.is_some()
            || self.status.is_some()
            || self.owner.is_some()
            || self.designer.is_some()
            || self.due.is_some()
    }

    /// Test one project against every set criterion.
    #[must_use]
    pub fn matches(&self, project: &Project, today: NaiveDate) -> bool {
        if let Some(term) = &self.search {
            if !project.name.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if &project.owner != owner {
                return false;
            }
        }
        if let Some(designer) = &self.designer {
            if project.designer.as_ref() != Some(designer) {
                return false;
            }
        }
        if let Some(window) = self.due {
            match project.deadline {
                Some(deadline) => {
                    if !in_window(deadline, today, window) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// Select matching projects, preserving collection order.
    #[must_use]
    pub fn apply<'a>(&self, projects: &'a [Project], today: NaiveDate) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p, today)).collect()
    }
}

/// Sunday-to-Saturday bounds of the week containing `today`.
fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    (start, start + Duration::days(6))
}

fn in_window(deadline: NaiveDate, today: NaiveDate, window: DeadlineWindow) -> bool {
    match window {
        DeadlineWindow::ThisWeek => {
            let (start, end) = week_bounds(today);
            deadline >= start && deadline <= end
        }
        DeadlineWindow::ThisMonth => {
            deadline.month() == today.month() && deadline.year() == today.year()
        }
        DeadlineWindow::ThisYear => deadline.year() == today.year(),
    }
}

/// Distinct owners, in first-seen collection order.
#[must_use]
pub fn distinct_owners(projects: &[Project]) -> Vec<String> {
    let mut seen = Vec::new();
    for p in projects {
        if !p.owner.is_empty() && !seen.contains(&p.owner) {
            seen.push(p.owner.clone());
        }
    }
    seen
}

/// Distinct designers, in first-seen collection order.
#[must_use]
pub fn distinct_designers(projects: &[Project]) -> Vec<String> {
    let mut seen = Vec::new();
    for p in projects {
        if let Some(designer) = &p.designer {
            if !designer.is_empty() && !seen.contains(designer) {
                seen.push(designer.clone());
            }
        }
    }
    seen
}

// ============================================================================
// Tests
// ============================================================================
