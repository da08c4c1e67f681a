//! EngiPro - Engineering Project Tracker
//!
//! Terminal front end over the project repository. All state lives in the
//! data directory; every command loads the collection, applies at most one
//! mutation, persists, and exits.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};

use engipro::clock::{Clock, SystemClock};
use engipro::filter::{DeadlineWindow, ProjectFilter};
use engipro::model::{Project, ProjectDraft, ProjectEdit, ProjectStatus};
use engipro::repository::ProjectRepository;
use engipro::stats::DashboardStats;
use engipro::store::{JsonFileStore, ProjectStore};
use engipro::theme::ThemePreference;
use engipro::transfer;

#[derive(Parser)]
#[command(name = "engipro")]
#[command(version = "0.1.0")]
#[command(about = "Track engineering projects with step-driven status", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(short, long, global = true, env = "ENGIPRO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects, optionally filtered
    List {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by status: not-started, in-progress, or done
        #[arg(long)]
        status: Option<String>,

        /// Filter by exact owner
        #[arg(long)]
        owner: Option<String>,

        /// Filter by exact designer
        #[arg(long)]
        designer: Option<String>,

        /// Filter by deadline window: week, month, or year
        #[arg(long, value_name = "WINDOW")]
        due: Option<String>,
    },

    /// Show one project with its steps
    Show {
        /// Project id
        id: String,
    },

    /// Create a new project
    Add {
        /// Project name
        #[arg(long)]
        name: String,

        /// Site or location
        #[arg(long)]
        location: String,

        /// Owner
        #[arg(long)]
        owner: String,

        /// Designer (optional)
        #[arg(long)]
        designer: Option<String>,

        /// Deadline as YYYY-MM-DD (optional)
        #[arg(long)]
        deadline: Option<String>,

        /// Initial step name; repeat for multiple steps
        #[arg(long = "step", value_name = "NAME")]
        steps: Vec<String>,
    },

    /// Edit a project's fields
    Edit {
        /// Project id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        owner: Option<String>,

        #[arg(long)]
        designer: Option<String>,

        /// Remove the designer
        #[arg(long, conflicts_with = "designer")]
        clear_designer: bool,

        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,

        /// Remove the deadline
        #[arg(long, conflicts_with = "deadline")]
        clear_deadline: bool,

        /// Manual status override; honored only for projects without steps
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a project
    Remove {
        /// Project id
        id: String,

        /// Skip the confirmation requirement
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage a project's steps
    Step {
        #[command(subcommand)]
        action: StepCommands,
    },

    /// Start work: moves the project to In Progress
    Start {
        /// Project id
        id: String,
    },

    /// Mark a zero-step project as done
    Finish {
        /// Project id
        id: String,
    },

    /// Show the dashboard summary
    Stats,

    /// Export all projects to a JSON backup file
    Export {
        /// Output path (defaults to engipro_backup_<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import projects from a JSON backup, replacing the collection
    Import {
        /// Backup file to read
        file: PathBuf,

        /// Confirm overwriting the current collection
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or set the theme preference
    Theme {
        /// New value: light, dark, or system
        value: Option<String>,
    },
}

#[derive(Subcommand)]
enum StepCommands {
    /// Append a step to a project
    Add {
        /// Project id
        project_id: String,

        /// Step name
        name: String,
    },

    /// Toggle a step's completion
    Toggle {
        /// Project id
        project_id: String,

        /// Step id (see `show`)
        step_id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "engipro=debug,info"
    } else {
        "engipro=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(JsonFileStore::default_dir);
    let store = JsonFileStore::new(&data_dir);

    match cli.command {
        Commands::List {
            search,
            status,
            owner,
            designer,
            due,
        } => {
            let filter = ProjectFilter {
                search,
                status: parse_opt::<ProjectStatus>(status)?,
                owner,
                designer,
                due: parse_opt::<DeadlineWindow>(due)?,
            };
            let repo = ProjectRepository::with_store(Box::new(store));
            cmd_list(&repo, &filter);
        }

        Commands::Show { id } => {
            let repo = ProjectRepository::with_store(Box::new(store));
            match repo.get(&id) {
                Some(project) => print_project_detail(project),
                None => bail_user(&format!("No project with id {id}")),
            }
        }

        Commands::Add {
            name,
            location,
            owner,
            designer,
            deadline,
            steps,
        } => {
            let draft = ProjectDraft {
                name,
                location,
                owner,
                designer,
                deadline: parse_deadline(deadline.as_deref())?,
                steps,
            };
            let mut repo = ProjectRepository::with_store(Box::new(store));
            let project = repo.create(draft)?;
            println!(
                "{} Created project {} ({})",
                "✓".green().bold(),
                project.name.bold(),
                project.id.dimmed()
            );
        }

        Commands::Edit {
            id,
            name,
            location,
            owner,
            designer,
            clear_designer,
            deadline,
            clear_deadline,
            status,
        } => {
            let mut repo = ProjectRepository::with_store(Box::new(store));
            let current = repo
                .get(&id)
                .with_context(|| format!("No project with id {id}"))?;

            let mut edit = ProjectEdit::from_project(current);
            if let Some(name) = name {
                edit.name = name;
            }
            if let Some(location) = location {
                edit.location = location;
            }
            if let Some(owner) = owner {
                edit.owner = owner;
            }
            if clear_designer {
                edit.designer = None;
            } else if designer.is_some() {
                edit.designer = designer;
            }
            if clear_deadline {
                edit.deadline = None;
            } else if let Some(deadline) = deadline {
                edit.deadline = parse_deadline(Some(&deadline))?;
            }
            edit.status = parse_opt::<ProjectStatus>(status)?;

            let project = repo.update(&id, edit)?;
            println!(
                "{} Updated project {} [{}]",
                "✓".green().bold(),
                project.name.bold(),
                status_colored(project.status)
            );
        }

        Commands::Remove { id, yes } => {
            if !yes {
                bail_user("Deleting a project cannot be undone; pass --yes to confirm");
            }
            let mut repo = ProjectRepository::with_store(Box::new(store));
            if repo.remove(&id) {
                println!("{} Removed project {}", "✓".green().bold(), id);
            } else {
                // Idempotent: nothing to do is not a failure.
                println!("No project with id {id}; nothing removed");
            }
        }

        Commands::Step { action } => match action {
            StepCommands::Add { project_id, name } => {
                let mut repo = ProjectRepository::with_store(Box::new(store));
                let project = repo.add_step(&project_id, &name)?;
                if let Some(step) = project.steps.last() {
                    println!(
                        "{} Added step {} ({}) to {} [{}]",
                        "✓".green().bold(),
                        step.name.bold(),
                        step.id.dimmed(),
                        project.name,
                        status_colored(project.status)
                    );
                }
            }
            StepCommands::Toggle {
                project_id,
                step_id,
            } => {
                let mut repo = ProjectRepository::with_store(Box::new(store));
                let project = repo.toggle_step(&project_id, &step_id)?.clone();
                let (done, total) = (project.completed_steps(), project.steps.len());
                println!(
                    "{} {}: {}/{} steps complete [{}]",
                    "✓".green().bold(),
                    project.name.bold(),
                    done,
                    total,
                    status_colored(project.status)
                );
            }
        },

        Commands::Start { id } => {
            let mut repo = ProjectRepository::with_store(Box::new(store));
            let project = repo.start(&id)?;
            println!(
                "{} Started {} [{}]",
                "✓".green().bold(),
                project.name.bold(),
                status_colored(project.status)
            );
        }

        Commands::Finish { id } => {
            let mut repo = ProjectRepository::with_store(Box::new(store));
            let project = repo
                .get(&id)
                .with_context(|| format!("No project with id {id}"))?;
            if project.has_steps() {
                // Step-bearing projects reach Done through their steps.
                bail_user("This project has steps; complete them instead of finishing directly");
            }
            let project = repo.finish(&id)?;
            println!(
                "{} Finished {} [{}]",
                "✓".green().bold(),
                project.name.bold(),
                status_colored(project.status)
            );
        }

        Commands::Stats => {
            let repo = ProjectRepository::with_store(Box::new(store));
            cmd_stats(&repo);
        }

        Commands::Export { output } => {
            let repo = ProjectRepository::with_store(Box::new(store));
            let json = transfer::export_json(repo.projects())?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(transfer::export_file_name(SystemClock.today()))
            });
            fs::write(&path, json)
                .with_context(|| format!("Could not write backup to {}", path.display()))?;
            println!(
                "{} Exported {} project(s) to {}",
                "✓".green().bold(),
                repo.projects().len(),
                path.display()
            );
        }

        Commands::Import { file, yes } => {
            if !yes {
                bail_user("Import overwrites all current project data; pass --yes to confirm");
            }
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Could not read {}", file.display()))?;
            // Decode fully before touching the collection so a malformed
            // file leaves existing data intact.
            let incoming = transfer::import_json(&text)?;
            let mut repo = ProjectRepository::with_store(Box::new(store));
            let count = repo.replace_all(incoming).len();
            println!("{} Imported {} project(s)", "✓".green().bold(), count);
        }

        Commands::Theme { value } => {
            let mut store = store;
            match value {
                Some(value) => {
                    let theme: ThemePreference = value.parse()?;
                    store.save_theme(theme);
                    println!("{} Theme set to {}", "✓".green().bold(), theme);
                }
                None => println!("{}", store.load_theme()),
            }
        }
    }

    Ok(())
}

// ============================================================================
// Command Helpers
// ============================================================================

fn cmd_list(repo: &ProjectRepository, filter: &ProjectFilter) {
    let today = SystemClock.today();
    let selected = filter.apply(repo.projects(), today);

    if selected.is_empty() {
        if filter.is_active() {
            println!("No projects match the current filter.");
        } else {
            println!("No projects yet. Create one with `engipro add`.");
        }
        return;
    }

    for project in selected {
        let steps = if project.has_steps() {
            format!("{}/{} steps", project.completed_steps(), project.steps.len())
        } else {
            "no steps".to_string()
        };
        let deadline = project
            .deadline
            .map(|d| {
                if project.is_overdue(today) {
                    format!("due {d}").red().to_string()
                } else {
                    format!("due {d}")
                }
            })
            .unwrap_or_else(|| "no deadline".dimmed().to_string());

        println!(
            "{}  {:<30} [{}]  {}  {}  {}",
            project.id.dimmed(),
            project.name.bold(),
            status_colored(project.status),
            project.owner,
            steps,
            deadline
        );
    }
}

fn print_project_detail(project: &Project) {
    println!("{}  ({})", project.name.bold(), project.id.dimmed());
    println!("  Status:   {}", status_colored(project.status));
    println!("  Location: {}", project.location);
    println!("  Owner:    {}", project.owner);
    if let Some(designer) = &project.designer {
        println!("  Designer: {designer}");
    }
    if let Some(deadline) = project.deadline {
        println!("  Deadline: {deadline}");
    }
    if let Some(start) = project.start_date {
        println!("  Started:  {}", start.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(end) = project.end_date {
        println!("  Finished: {}", end.format("%Y-%m-%d %H:%M UTC"));
    }

    if project.has_steps() {
        println!("  Steps:");
        for step in &project.steps {
            let mark = if step.completed {
                "✓".green().to_string()
            } else {
                "○".dimmed().to_string()
            };
            println!("    {} {}  ({})", mark, step.name, step.id.dimmed());
        }
    }
}

fn cmd_stats(repo: &ProjectRepository) {
    let stats = DashboardStats::compute(repo.projects(), SystemClock.today());

    println!("{}", "Dashboard".bold());
    println!("  Total projects: {}", stats.total);
    println!("  In progress:    {}", stats.in_progress);
    println!("  Done:           {}", stats.done);
    if stats.overdue > 0 {
        println!("  Overdue:        {}", stats.overdue.to_string().red().bold());
    } else {
        println!("  Overdue:        0");
    }

    if !stats.upcoming.is_empty() {
        println!("{}", "Upcoming deadlines".bold());
        for entry in &stats.upcoming {
            let when = match entry.days_left {
                0 => "due today".to_string(),
                1 => "due tomorrow".to_string(),
                n => format!("due in {n} days"),
            };
            println!("  {:<30} {}", entry.name, when.yellow());
        }
    }
}

fn status_colored(status: ProjectStatus) -> ColoredString {
    match status {
        ProjectStatus::NotStarted => status.label().yellow(),
        ProjectStatus::InProgress => status.label().blue(),
        ProjectStatus::Done => status.label().green(),
    }
}

fn parse_opt<T>(value: Option<String>) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.map(|v| v.parse::<T>()).transpose().map_err(Into::into)
}

fn parse_deadline(value: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .with_context(|| format!("Invalid deadline '{v}' (expected YYYY-MM-DD)"))
        })
        .transpose()
}

fn bail_user(message: &str) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}
