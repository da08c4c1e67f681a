//! Status derivation engine.
//!
//! Pure functions computing a project's lifecycle fields (`status`,
//! `end_date`, step timestamps) for each mutation source. Nothing here
//! retains state; the repository applies the returned snapshot.
//!
//! # Derivation rules
//!
//! - A project with no steps is manual: only [`start_work`], [`finish_work`],
//!   or a direct status edit moves it.
//! - A step-bearing project that is past `NotStarted` recomputes on every
//!   mutation: all steps complete → `Done`, otherwise `InProgress`.
//! - `NotStarted` resists step-driven promotion; only the explicit start
//!   action leaves it.
//! - `end_date` is stamped once when derivation reaches `Done` and it was
//!   unset, and cleared whenever derivation falls back to `InProgress`.
//! - `start_date` is stamped only by [`start_work`] and never cleared.
//!
//! The one asymmetry: adding a step to a `Done` project forces it back to
//! `InProgress` (finished work that gains new work is no longer finished),
//! while adding a step to a `NotStarted` project leaves it untouched.

use crate::clock::Clock;
use crate::error::{EngiproError, Result};
use crate::ids::IdSource;
use crate::model::{Project, ProjectEdit, ProjectStatus, Step};

/// Recompute `status`/`end_date` from step completion.
///
/// No-op for zero-step and `NotStarted` projects.
fn recompute(project: &mut Project, clock: &dyn Clock) {
    if !project.has_steps() || project.status == ProjectStatus::NotStarted {
        return;
    }
    if project.all_steps_complete() {
        project.status = ProjectStatus::Done;
        if project.end_date.is_none() {
            project.end_date = Some(clock.now());
        }
    } else {
        project.status = ProjectStatus::InProgress;
        project.end_date = None;
    }
}

/// Apply a full-project edit and derive the resulting lifecycle fields.
///
/// The edit replaces the editable fieldset; `id` and `start_date` carry over
/// from `current`. A manual `status` override in the edit is honored only
/// when the merged project has zero steps, with the usual `end_date`
/// bookkeeping on the way onto or off `Done`.
///
/// # Errors
///
/// Returns [`EngiproError::Validation`] when a required field is blank.
pub fn derive_on_edit(current: &Project, edit: ProjectEdit, clock: &dyn Clock) -> Result<Project> {
    edit.validate()?;

    let mut status = current.status;
    let mut end_date = current.end_date;

    if edit.steps.is_empty() {
        if let Some(wanted) = edit.status {
            if wanted != status {
                end_date = match wanted {
                    ProjectStatus::Done => end_date.or_else(|| Some(clock.now())),
                    _ => None,
                };
                status = wanted;
            }
        }
    }

    let mut merged = Project {
        id: current.id.clone(),
        name: edit.name,
        location: edit.location,
        owner: edit.owner,
        designer: edit.designer,
        deadline: edit.deadline,
        status,
        start_date: current.start_date,
        end_date,
        steps: edit.steps,
    };
    recompute(&mut merged, clock);
    Ok(merged)
}

/// Flip one step's completion flag and derive the resulting status.
///
/// Stamps `completed_at` on the incomplete→complete transition and clears
/// it on the reverse. The recompute applies to the project's *current*
/// status, so a `NotStarted` project stays `NotStarted` no matter how many
/// steps get toggled.
///
/// # Errors
///
/// Returns [`EngiproError::NotFound`] when `step_id` does not resolve; the
/// caller treats that as a benign no-op since it can race with a delete.
pub fn derive_on_step_toggle(
    project: &Project,
    step_id: &str,
    clock: &dyn Clock,
) -> Result<Project> {
    let mut next = project.clone();
    let step = next
        .steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| EngiproError::step_not_found(step_id))?;

    step.completed = !step.completed;
    step.completed_at = if step.completed {
        Some(clock.now())
    } else {
        None
    };

    recompute(&mut next, clock);
    Ok(next)
}

/// Append a fresh incomplete step.
///
/// A `Done` project falls back to `InProgress` with `end_date` cleared;
/// every other status (including `NotStarted`) is left alone.
///
/// # Errors
///
/// Returns [`EngiproError::Validation`] when the trimmed name is empty.
pub fn derive_on_add_step(
    project: &Project,
    step_name: &str,
    ids: &dyn IdSource,
) -> Result<Project> {
    let name = step_name.trim();
    if name.is_empty() {
        return Err(EngiproError::validation("step name", "must not be empty"));
    }

    let mut next = project.clone();
    next.steps.push(Step::new(ids.next_id(), name));

    if next.status == ProjectStatus::Done {
        next.status = ProjectStatus::InProgress;
        next.end_date = None;
    }
    Ok(next)
}

/// Explicit start action: `InProgress`, `start_date = now`.
///
/// No precondition; calling it again refreshes `start_date`. The front end
/// only offers the action while `NotStarted`.
#[must_use]
pub fn start_work(project: &Project, clock: &dyn Clock) -> Project {
    let mut next = project.clone();
    next.status = ProjectStatus::InProgress;
    next.start_date = Some(clock.now());
    next
}

/// Explicit finish action: `Done`, `end_date = now`.
///
/// No precondition at this layer. Step-bearing projects reach `Done`
/// through step completion; the front end only offers this action at zero
/// steps.
#[must_use]
pub fn finish_work(project: &Project, clock: &dyn Clock) -> Project {
    let mut next = project.clone();
    next.status = ProjectStatus::Done;
    next.end_date = Some(clock.now());
    next
}

// ============================================================================
// Tests
// ============================================================================
