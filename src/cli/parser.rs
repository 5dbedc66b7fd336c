use crate::export::StatsFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for crewlog
/// Field reporting for maintenance crews, backed by SQLite
#[derive(Parser)]
#[command(
    name = "crewlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Field reporting for maintenance crews: record mapped tasks, manage workers and export HTML reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, edit, check or migrate)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,

        #[arg(long = "check", help = "Report keys missing from the configuration file")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing keys with their default values")]
        migrate: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage worker groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Manage workers, their overtime and leave balances
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Record or list worker absences
    Absence {
        #[command(subcommand)]
        action: AbsenceAction,
    },

    /// Record or list field reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Export the reports of a period as a zipped HTML document
    Export {
        #[arg(
            long,
            value_name = "RANGE",
            help = "Year, month, day or a custom range (e.g. 2025, 2025-03, 2025-03-01:2025-03-15)"
        )]
        range: String,

        #[arg(
            long,
            value_name = "IDS",
            value_delimiter = ',',
            help = "Only keep tasks with a worker in one of these groups"
        )]
        groups: Vec<i64>,

        #[arg(long, value_name = "FILE", help = "Destination archive (default: <export_dir>/report.zip)")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Per-day report counts and worked hours
    Stats {
        #[arg(long, value_enum, default_value = "text")]
        format: StatsFormat,
    },
}

#[derive(Subcommand)]
pub enum GroupAction {
    /// Create a group
    Add { name: String },

    /// List all groups
    List,

    /// Rename a group
    Rename { id: i64, name: String },

    /// Delete a group; its workers become unassigned
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Add a worker
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long, value_name = "GROUP_ID")]
        group: Option<i64>,
    },

    /// List workers
    List {
        #[arg(long, help = "Only workers whose name contains this text")]
        search: Option<String>,

        #[arg(long, help = "List workers under their group")]
        grouped: bool,
    },

    /// Delete a worker with their absences and task participations
    Del { id: i64 },

    /// Move a worker to a group, or out of any group when --group is omitted
    SetGroup {
        id: i64,

        #[arg(long, value_name = "GROUP_ID")]
        group: Option<i64>,
    },

    /// Add (or with a negative value, remove) overtime hours
    Overtime {
        id: i64,

        #[arg(allow_hyphen_values = true)]
        hours: i64,
    },

    /// Adjust leave balances
    Leave {
        id: i64,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        days: i64,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        hours: i64,
    },
}

#[derive(Subcommand)]
pub enum AbsenceAction {
    /// Record an absence (date as YYYY-MM-DD)
    Add {
        worker_id: i64,
        date: String,
        reason: String,
    },

    /// List a worker's absences, most recent first
    List { worker_id: i64 },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Record a mapped task as a new report
    Add {
        #[arg(long, help = "Task type, e.g. 'Pothole repair'")]
        task: String,

        #[arg(long, help = "Geometry: POLYGON, POLYLINE or POINT")]
        kind: String,

        #[arg(long, help = "Points as 'lat,lon;lat,lon;...'", allow_hyphen_values = true)]
        points: String,

        #[arg(long = "desc", default_value = "")]
        description: String,

        #[arg(long, default_value_t = 0)]
        hours: i64,

        #[arg(long, value_name = "IDS", value_delimiter = ',')]
        workers: Vec<i64>,

        #[arg(long, help = "Task date and time (YYYY-MM-DD or 'YYYY-MM-DD HH:MM'), default now")]
        date: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// List reports with their drawings
    List {
        #[arg(long, value_name = "RANGE", help = "Year, month, day or a custom range (default: current month)")]
        range: Option<String>,

        #[arg(long, value_name = "IDS", value_delimiter = ',')]
        groups: Vec<i64>,
    },

    /// Delete a report with its drawings
    Del { id: i64 },
}
