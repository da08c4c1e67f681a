//! Dashboard summary over the project collection.
//!
//! Pure projection, computed fresh from a snapshot and today's date.

use chrono::{Duration, NaiveDate};

use crate::model::{Project, ProjectStatus};

/// How far ahead a deadline counts as "upcoming".
const UPCOMING_HORIZON_DAYS: i64 = 7;

/// One entry in the upcoming-deadline list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingDeadline {
    pub project_id: String,
    pub name: String,
    pub deadline: NaiveDate,
    /// Days until the deadline; 0 means due today.
    pub days_left: i64,
}

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub in_progress: usize,
    pub done: usize,
    /// Deadline passed and the project is not done.
    pub overdue: usize,
    /// Unfinished projects due within the next week, soonest first.
    pub upcoming: Vec<UpcomingDeadline>,
}

impl DashboardStats {
    /// Compute the summary for a snapshot.
    #[must_use]
    pub fn compute(projects: &[Project], today: NaiveDate) -> Self {
        let horizon = today + Duration::days(UPCOMING_HORIZON_DAYS);

        let mut upcoming: Vec<UpcomingDeadline> = projects
            .iter()
            .filter(|p| p.status != ProjectStatus::Done)
            .filter_map(|p| {
                let deadline = p.deadline?;
                if deadline < today || deadline > horizon {
                    return None;
                }
                Some(UpcomingDeadline {
                    project_id: p.id.clone(),
                    name: p.name.clone(),
                    deadline,
                    days_left: (deadline - today).num_days(),
                })
            })
            .collect();
        upcoming.sort_by_key(|u| u.deadline);

        Self {
            total: projects.len(),
            in_progress: projects
                .iter()
                .filter(|p| p.status == ProjectStatus::InProgress)
                .count(),
            done: projects.iter().filter(|p| p.status == ProjectStatus::Done).count(),
            overdue: projects.iter().filter(|p| p.is_overdue(today)).count(),
            upcoming,
        }
    }
}
