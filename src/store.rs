//! Persistence layer for the project collection and theme preference.
//!
//! The store is deliberately fail-soft in both directions: a corrupt or
//! missing data file loads as an empty collection with a logged warning,
//! and a failed save is logged without surfacing into the mutation that
//! triggered it. The in-memory collection is always the authority.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::warn;

use crate::error::Result;
use crate::model::Project;
use crate::theme::ThemePreference;

/// Project data file name.
const PROJECTS_FILE: &str = "projects.json";

/// Theme preference file name.
const THEME_FILE: &str = "theme";

/// Temporary file suffix for atomic writes.
const TMP_SUFFIX: &str = ".tmp";

/// Lock file suffix for concurrent access prevention.
const LOCK_SUFFIX: &str = ".lock";

/// Persists and restores the full project collection.
///
/// Implementations never raise into the caller: `load` returns an empty
/// collection on any failure and `save` logs and drops errors.
pub trait ProjectStore {
    /// Restore the persisted collection; empty on any failure.
    fn load(&self) -> Vec<Project>;

    /// Persist the full collection, replacing whatever was stored.
    fn save(&mut self, projects: &[Project]);

    /// Restore the theme preference; default on any failure.
    fn load_theme(&self) -> ThemePreference;

    /// Persist the theme preference.
    fn save_theme(&mut self, theme: ThemePreference);
}

// ============================================================================
// JSON File Store
// ============================================================================

/// Directory-backed store keeping projects as pretty-printed JSON.
///
/// Writes are atomic: serialize to a `.tmp` sibling, fsync, then rename,
/// under an exclusive file lock so a second process cannot interleave.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory where data files live.
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Platform data directory for this application.
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("engipro")
    }

    /// Path to the projects file.
    #[must_use]
    pub fn projects_file_path(&self) -> PathBuf {
        self.dir.join(PROJECTS_FILE)
    }

    /// Path to the theme file.
    #[must_use]
    pub fn theme_file_path(&self) -> PathBuf {
        self.dir.join(THEME_FILE)
    }

    fn lock_file_path(&self) -> PathBuf {
        self.dir.join(format!("{PROJECTS_FILE}{LOCK_SUFFIX}"))
    }

    fn try_load(&self) -> Result<Vec<Project>> {
        let path = self.projects_file_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let lock_path = self.lock_file_path();
        if lock_path.exists() {
            let lock_file = File::open(&lock_path)?;
            let _ = FileExt::lock_shared(&lock_file);
        }

        let contents = fs::read_to_string(&path)?;
        let projects = crate::transfer::import_json(&contents)?;
        Ok(projects)
    }

    fn try_save(&self, projects: &[Project]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let lock_file = File::create(self.lock_file_path())?;
        let _ = FileExt::lock_exclusive(&lock_file);

        let tmp_path = self.dir.join(format!("{PROJECTS_FILE}{TMP_SUFFIX}"));
        let json = serde_json::to_string_pretty(projects)?;

        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;

        fs::rename(&tmp_path, self.projects_file_path())?;
        Ok(())
    }
}

impl ProjectStore for JsonFileStore {
    fn load(&self) -> Vec<Project> {
        match self.try_load() {
            Ok(projects) => projects,
            Err(e) => {
                // The corrupt file is left on disk for manual recovery.
                warn!(
                    "Could not load projects from {}: {}. Starting with an empty collection.",
                    self.projects_file_path().display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, projects: &[Project]) {
        if let Err(e) = self.try_save(projects) {
            warn!(
                "Could not save projects to {}: {}",
                self.projects_file_path().display(),
                e
            );
        }
    }

    fn load_theme(&self) -> ThemePreference {
        let path = self.theme_file_path();
        match fs::read_to_string(&path) {
            Ok(contents) => contents.parse().unwrap_or_else(|e| {
                warn!("Ignoring invalid theme file {}: {}", path.display(), e);
                ThemePreference::default()
            }),
            Err(_) => ThemePreference::default(),
        }
    }

    fn save_theme(&mut self, theme: ThemePreference) {
        let write = || -> Result<()> {
            fs::create_dir_all(&self.dir)?;
            fs::write(self.theme_file_path(), theme.as_str())?;
            Ok(())
        };
        if let Err(e) = write() {
            warn!(
                "Could not save theme to {}: {}",
                self.theme_file_path().display(),
                e
            );
        }
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: Vec<Project>,
    theme: ThemePreference,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store with a collection, as if it had been persisted.
    #[must_use]
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects,
            theme: ThemePreference::default(),
        }
    }
}

impl ProjectStore for MemoryStore {
    fn load(&self) -> Vec<Project> {
        self.projects.clone()
    }

    fn save(&mut self, projects: &[Project]) {
        self.projects = projects.to_vec();
    }

    fn load_theme(&self) -> ThemePreference {
        self.theme
    }

    fn save_theme(&mut self, theme: ThemePreference) {
        self.theme = theme;
    }
}

// ============================================================================
// Tests
// ============================================================================
