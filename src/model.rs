//! Core data model: projects, steps, and the lifecycle status.
//!
//! These are plain data records; all status/timestamp bookkeeping lives in
//! [`crate::status`]. Serialized field names are camelCase to match the
//! persisted layout and the import/export file format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngiproError, Result};

// ============================================================================
// Project Status
// ============================================================================

/// Three-valued lifecycle stage of a project.
///
/// Serialized as the fixed strings `NotStarted`, `InProgress`, `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Done,
}

impl ProjectStatus {
    /// Human-readable label for terminal output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectStatus {
    type Err = EngiproError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "notstarted" => Ok(Self::NotStarted),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(EngiproError::validation(
                "status",
                format!("unknown status '{s}' (expected not-started, in-progress, or done)"),
            )),
        }
    }
}

// ============================================================================
// Step
// ============================================================================

/// An atomic unit of work within a project.
///
/// Steps are never deleted once added; the only mutation the system applies
/// is the completion toggle. `completed_at` is present iff `completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique identifier, immutable after creation.
    pub id: String,

    /// Display text, non-empty.
    pub name: String,

    /// Completion flag.
    pub completed: bool,

    /// When the step was last marked complete. Set on the false→true
    /// transition, cleared on true→false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Step {
    /// Create a fresh, incomplete step.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed: false,
            completed_at: None,
        }
    }
}

// ============================================================================
// Project
// ============================================================================

/// An engineering project with its ordered steps and lifecycle fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier assigned at creation, immutable.
    pub id: String,

    /// Project name, required non-empty.
    pub name: String,

    /// Site or location, required non-empty.
    pub location: String,

    /// Owner, required non-empty.
    pub owner: String,

    /// Designer, optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer: Option<String>,

    /// Target completion date, optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    /// Lifecycle status; see [`crate::status`] for the derivation rules.
    pub status: ProjectStatus,

    /// When work began. Set only by the explicit start action, never
    /// cleared automatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    /// When work completed. Absent whenever `status != Done`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    /// Ordered steps; insertion order is display order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Project {
    /// Number of completed steps.
    #[must_use]
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Whether the project has at least one step.
    #[must_use]
    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Whether every step is complete. Vacuously true for zero steps, so
    /// callers must pair this with [`Self::has_steps`].
    #[must_use]
    pub fn all_steps_complete(&self) -> bool {
        self.steps.iter().all(|s| s.completed)
    }

    /// Whether the deadline has passed without the project being done.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.deadline {
            Some(deadline) => deadline < today && self.status != ProjectStatus::Done,
            None => false,
        }
    }
}

// ============================================================================
// Mutation Inputs
// ============================================================================

/// Input for creating a new project. Steps are given by name and start
/// incomplete; status is always `NotStarted`.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub location: String,
    pub owner: String,
    pub designer: Option<String>,
    pub deadline: Option<NaiveDate>,
    /// Names of the initial steps, in display order.
    pub steps: Vec<String>,
}

impl ProjectDraft {
    /// Check required fields. Whitespace-only text counts as empty.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("location", &self.location)?;
        require_non_empty("owner", &self.owner)?;
        for step in &self.steps {
            require_non_empty("step name", step)?;
        }
        Ok(())
    }
}

/// Input for a full-project edit: the complete editable fieldset.
///
/// `id`, `start_date`, and `end_date` are never edited directly; they are
/// carried over from the current snapshot (and `end_date` adjusted) by the
/// derivation in [`crate::status::derive_on_edit`]. `status` is a manual
/// override honored only for zero-step projects.
#[derive(Debug, Clone)]
pub struct ProjectEdit {
    pub name: String,
    pub location: String,
    pub owner: String,
    pub designer: Option<String>,
    pub deadline: Option<NaiveDate>,
    /// Full replacement step list, ids preserved for surviving steps.
    pub steps: Vec<Step>,
    /// Manual status override; `None` keeps the current status.
    pub status: Option<ProjectStatus>,
}

impl ProjectEdit {
    /// Build an edit that keeps every field of `project` as-is.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            location: project.location.clone(),
            owner: project.owner.clone(),
            designer: project.designer.clone(),
            deadline: project.deadline,
            steps: project.steps.clone(),
            status: None,
        }
    }

    /// Check required fields. Whitespace-only text counts as empty.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("location", &self.location)?;
        require_non_empty("owner", &self.owner)?;
        for step in &self.steps {
            require_non_empty("step name", &step.name)?;
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EngiproError::validation(field, "must not be empty"));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_project() -> Project {
        Project {
            id: "p-1".to_string(),
            name: "Bridge retrofit".to_string(),
            location: "Kampong Cham".to_string(),
            owner: "Provincial DPWT".to_string(),
            designer: None,
            deadline: None,
            status: ProjectStatus::NotStarted,
            start_date: None,
            end_date: None,
            steps: Vec::new(),
        }
    }

    #[test]
    fn test_status_serializes_as_fixed_strings() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::NotStarted).unwrap(),
            "\"NotStarted\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"InProgress\""
        );
        assert_eq!(serde_json::to_string(&ProjectStatus::Done).unwrap(), "\"Done\"");
    }

    #[test]
    fn test_status_from_str_accepts_cli_spellings() {
        assert_eq!("not-started".parse::<ProjectStatus>().unwrap(), ProjectStatus::NotStarted);
        assert_eq!("InProgress".parse::<ProjectStatus>().unwrap(), ProjectStatus::InProgress);
        assert_eq!("in progress".parse::<ProjectStatus>().unwrap(), ProjectStatus::InProgress);
        assert_eq!("DONE".parse::<ProjectStatus>().unwrap(), ProjectStatus::Done);
        assert!("finished".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn test_project_json_uses_camel_case_and_omits_absent_fields() {
        let mut project = make_project();
        project.start_date = Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
        project.status = ProjectStatus::InProgress;
        let json = serde_json::to_value(&project).unwrap();

        assert!(json.get("startDate").is_some());
        assert!(json.get("start_date").is_none());
        assert!(json.get("endDate").is_none());
        assert!(json.get("designer").is_none());
        assert_eq!(json["status"], "InProgress");
    }

    #[test]
    fn test_project_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "p-1",
            "name": "Canal",
            "location": "Takeo",
            "owner": "MOWRAM",
            "status": "NotStarted",
            "steps": []
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.designer, None);
        assert_eq!(project.deadline, None);
        assert!(project.steps.is_empty());
    }

    #[test]
    fn test_step_round_trips_completed_at() {
        let mut step = Step::new("s-1", "Survey");
        step.completed = true;
        step.completed_at = Some(Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap());

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("completedAt"));
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_step_counting_helpers() {
        let mut project = make_project();
        assert!(!project.has_steps());
        assert!(project.all_steps_complete());

        project.steps.push(Step::new("s-1", "Survey"));
        project.steps.push(Step::new("s-2", "Foundation"));
        project.steps[0].completed = true;

        assert!(project.has_steps());
        assert_eq!(project.completed_steps(), 1);
        assert!(!project.all_steps_complete());
    }

    #[test]
    fn test_is_overdue_requires_deadline_and_not_done() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let mut project = make_project();
        assert!(!project.is_overdue(today));

        project.deadline = Some(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert!(project.is_overdue(today));

        project.status = ProjectStatus::Done;
        assert!(!project.is_overdue(today));
    }

    #[test]
    fn test_draft_validation_rejects_blank_required_fields() {
        let mut draft = ProjectDraft {
            name: "Canal".to_string(),
            location: "Takeo".to_string(),
            owner: "MOWRAM".to_string(),
            ..ProjectDraft::default()
        };
        assert!(draft.validate().is_ok());

        draft.owner = "   ".to_string();
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, EngiproError::Validation { ref field, .. } if field == "owner"));
    }

    #[test]
    fn test_edit_from_project_is_lossless() {
        let mut project = make_project();
        project.steps.push(Step::new("s-1", "Survey"));
        let edit = ProjectEdit::from_project(&project);
        assert_eq!(edit.name, project.name);
        assert_eq!(edit.steps, project.steps);
        assert_eq!(edit.status, None);
    }
}
