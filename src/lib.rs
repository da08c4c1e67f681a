//! EngiPro - Engineering Project Tracker
//!
//! A local-first tracker for engineering projects: each project carries its
//! site, owner, designer, deadline, and an ordered list of work steps, and
//! its lifecycle status (`NotStarted → InProgress → Done`) is derived from
//! step completion rather than edited by hand.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`model`] - Project/step data model and mutation inputs
//! - [`status`] - Pure status derivation for every mutation source
//! - [`repository`] - Owner of the live collection; the one writer context
//! - [`store`] - Persistence boundary (JSON files, fail-soft)
//! - [`transfer`] - Import/export of the full collection
//! - [`filter`] / [`stats`] - Read-only projections for the front end
//! - [`error`] - Custom error types and handling
//!
//! # Example
//!
//! ```rust,ignore
//! use engipro::repository::ProjectRepository;
//! use engipro::store::JsonFileStore;
//! use engipro::model::ProjectDraft;
//!
//! let store = JsonFileStore::new(JsonFileStore::default_dir());
//! let mut repo = ProjectRepository::with_store(Box::new(store));
//!
//! let project = repo.create(ProjectDraft {
//!     name: "Pump station".into(),
//!     location: "Battambang".into(),
//!     owner: "PDWS".into(),
//!     steps: vec!["Survey".into(), "Foundation".into()],
//!     ..ProjectDraft::default()
//! })?;
//!
//! repo.start(&project.id.clone())?;
//! ```

pub mod clock;
pub mod error;
pub mod filter;
pub mod ids;
pub mod model;
pub mod repository;
pub mod stats;
pub mod status;
pub mod store;
pub mod theme;
pub mod transfer;

// Re-export commonly used types
pub use error::{EngiproError, EntityKind, Result};

pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{DeadlineWindow, ProjectFilter};
pub use ids::{IdSource, SequentialSource, UuidSource};
pub use model::{Project, ProjectDraft, ProjectEdit, ProjectStatus, Step};
pub use repository::ProjectRepository;
pub use stats::{DashboardStats, UpcomingDeadline};
pub use store::{JsonFileStore, MemoryStore, ProjectStore};
pub use theme::ThemePreference;
