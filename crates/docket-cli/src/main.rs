use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docket_core::{Lookup, Record, RecordId};
use docket_runner::Repository;

#[derive(Parser)]
#[command(name = "docket", version)]
struct Cli {
    /// Directory holding .docket/docket.toml (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the config and empty datasets
    Init,

    /// Add a project to the active dataset
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        size: u64,
        #[arg(long, allow_negative_numbers = true)]
        priority: i64,
    },

    /// Show one active project by id
    Show { id: String },

    /// List active projects in insertion order
    List {
        #[arg(long)]
        json: bool,
    },

    /// List completed projects
    Completed {
        #[arg(long)]
        json: bool,
    },

    /// Build the schedule and print it in order
    Schedule,

    /// Print the schedule grouped by priority
    View {
        /// Group the schedule held in memory instead of rebuilding it
        #[arg(long)]
        no_rebuild: bool,
    },

    /// Move the top scheduled project to the completed dataset
    Next,

    /// Write random demo projects
    Seed {
        #[arg(long)]
        count: Option<usize>,
    },

    /// Show dataset counts
    Status,
}

fn print_record(r: &Record) {
    println!("-----------------------------------");
    println!("| Project ID  : {}", r.id);
    println!("| Title       : {}", r.title);
    println!("| Size        : {}", r.size);
    println!("| Priority    : {}", r.priority);
    println!("-----------------------------------");
}

fn print_records(records: &[Record], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else if records.is_empty() {
        println!("No projects.");
    } else {
        records.iter().for_each(print_record);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    if let Command::Init = cli.cmd {
        Repository::init(&root)?;
        println!("Initialized docket in {}", root.display());
        return Ok(());
    }

    let mut repo = Repository::open(root)?;
    match cli.cmd {
        Command::Init => {}
        Command::Add { title, size, priority } => {
            let r = repo.write(title, size, priority)?;
            println!("Added project {}", r.id);
        }
        Command::Show { id } => match repo.search(&RecordId::from_str(id))? {
            Lookup::Found(r) => print_record(&r),
            Lookup::Removed(id) => println!("Project {} has already been completed.", id),
            Lookup::NotFound => println!("No project found."),
        },
        Command::List { json } => print_records(&repo.list_all()?, json)?,
        Command::Completed { json } => print_records(&repo.list_completed()?, json)?,
        Command::Schedule => {
            let schedule = repo.create_schedule()?;
            if schedule.is_empty() {
                println!("Project list is empty.");
            }
            for (i, r) in schedule.iter().enumerate() {
                println!("#{:<4} {}  p={} size={}  {}", i + 1, r.id, r.priority, r.size, r.title);
            }
        }
        Command::View { no_rebuild } => {
            let (groups, meaningful) = repo.view_schedule(!no_rebuild)?;
            if !meaningful {
                println!("No schedule to show.");
            }
            for g in groups {
                println!("Priority {}", g.priority);
                for r in g.records {
                    println!("  {}  size={}  {}", r.id, r.size, r.title);
                }
            }
        }
        Command::Next => {
            // schedules live only as long as the process
            repo.create_schedule()?;
            match repo.take_next_scheduled()? {
                Some(r) => println!("Project {} has been removed from the queue.", r.id),
                None => println!("Nothing scheduled."),
            }
        }
        Command::Seed { count } => {
            let count = count.unwrap_or(repo.cfg.seed.count);
            let written = repo.seed(count, &mut rand::thread_rng())?;
            println!("Wrote {} projects", written.len());
        }
        Command::Status => {
            let s = repo.status()?;
            println!("Active: {} ({})", s.active, s.active_file.display());
            println!("Completed: {} ({})", s.completed, s.completed_file.display());
            println!("Data dir: {}", repo.data_dir().display());
        }
    }

    Ok(())
}
