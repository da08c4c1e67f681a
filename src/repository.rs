//! Project repository: the one writer context for the live collection.
//!
//! The repository owns the authoritative in-memory `Vec<Project>` (newest
//! first) and is the only component that talks to the [`ProjectStore`].
//! Every mutation derives the affected project through [`crate::status`],
//! replaces exactly that entry, and persists the whole collection, or
//! fails before anything becomes visible. Callers read the fresh snapshot
//! from the returned reference or [`Self::projects`].

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{EngiproError, Result};
use crate::ids::{IdSource, UuidSource};
use crate::model::{Project, ProjectDraft, ProjectEdit, ProjectStatus, Step};
use crate::status;
use crate::store::ProjectStore;

/// Owner of the live project collection.
pub struct ProjectRepository {
    store: Box<dyn ProjectStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
    projects: Vec<Project>,
}

impl ProjectRepository {
    /// Create a repository with explicit collaborators, restoring the
    /// persisted collection from the store.
    #[must_use]
    pub fn new(store: Box<dyn ProjectStore>, clock: Box<dyn Clock>, ids: Box<dyn IdSource>) -> Self {
        let projects = store.load();
        debug!("Loaded {} project(s) from store", projects.len());
        Self {
            store,
            clock,
            ids,
            projects,
        }
    }

    /// Create a repository with the production clock and id source.
    #[must_use]
    pub fn with_store(store: Box<dyn ProjectStore>) -> Self {
        Self::new(store, Box::new(SystemClock), Box::new(UuidSource))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current snapshot, newest project first.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Look up one project by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngiproError::project_not_found(id))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a project from a draft. Status starts at `NotStarted`; the
    /// new project goes to the front of the collection.
    pub fn create(&mut self, draft: ProjectDraft) -> Result<&Project> {
        draft.validate()?;

        let steps = draft
            .steps
            .iter()
            .map(|name| Step::new(self.ids.next_id(), name.trim()))
            .collect();

        let project = Project {
            id: self.ids.next_id(),
            name: draft.name.trim().to_string(),
            location: draft.location.trim().to_string(),
            owner: draft.owner.trim().to_string(),
            designer: draft.designer.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            deadline: draft.deadline,
            status: ProjectStatus::NotStarted,
            start_date: None,
            end_date: None,
            steps,
        };

        self.projects.insert(0, project);
        self.persist();
        Ok(&self.projects[0])
    }

    /// Apply a full-project edit.
    ///
    /// # Errors
    ///
    /// [`EngiproError::NotFound`] when the id is stale,
    /// [`EngiproError::Validation`] when a required field is blank; the
    /// collection is untouched in either case.
    pub fn update(&mut self, id: &str, edit: ProjectEdit) -> Result<&Project> {
        let idx = self.position(id)?;
        let next = status::derive_on_edit(&self.projects[idx], edit, self.clock.as_ref())?;
        Ok(self.commit(idx, next))
    }

    /// Delete a project. Idempotent: removing an unknown id is a silent
    /// no-op, matching a confirmation-gated UI where a double delete is
    /// not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Toggle one step's completion.
    ///
    /// A stale step id is absorbed as a logged no-op; the toggle can race
    /// with a delete in the front end and must not crash it. A stale
    /// project id is still [`EngiproError::NotFound`].
    pub fn toggle_step(&mut self, project_id: &str, step_id: &str) -> Result<&Project> {
        let idx = self.position(project_id)?;
        match status::derive_on_step_toggle(&self.projects[idx], step_id, self.clock.as_ref()) {
            Ok(next) => Ok(self.commit(idx, next)),
            Err(e) if e.is_not_found() => {
                warn!("Ignoring toggle for unknown step {step_id} on project {project_id}");
                Ok(&self.projects[idx])
            }
            Err(e) => Err(e),
        }
    }

    /// Append a step to a project.
    pub fn add_step(&mut self, project_id: &str, step_name: &str) -> Result<&Project> {
        let idx = self.position(project_id)?;
        let next = status::derive_on_add_step(&self.projects[idx], step_name, self.ids.as_ref())?;
        Ok(self.commit(idx, next))
    }

    /// Explicit start action.
    pub fn start(&mut self, id: &str) -> Result<&Project> {
        let idx = self.position(id)?;
        let next = status::start_work(&self.projects[idx], self.clock.as_ref());
        Ok(self.commit(idx, next))
    }

    /// Explicit finish action. Unguarded here; the front end only offers
    /// it for projects without steps.
    pub fn finish(&mut self, id: &str) -> Result<&Project> {
        let idx = self.position(id)?;
        let next = status::finish_work(&self.projects[idx], self.clock.as_ref());
        Ok(self.commit(idx, next))
    }

    /// Bulk import: overwrite the entire collection. Shape validation
    /// happens at the decode boundary ([`crate::transfer::import_json`]);
    /// by the time records are `Project` values they are accepted as-is.
    pub fn replace_all(&mut self, projects: Vec<Project>) -> &[Project] {
        self.projects = projects;
        self.persist();
        &self.projects
    }

    fn commit(&mut self, idx: usize, next: Project) -> &Project {
        self.projects[idx] = next;
        self.persist();
        &self.projects[idx]
    }

    fn persist(&mut self) {
        self.store.save(&self.projects);
    }
}

// ============================================================================
// Tests
// ============================================================================
