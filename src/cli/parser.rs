use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for torego.
/// Running without a subcommand shows the active notifications.
#[derive(Parser)]
#[command(
    name = "torego",
    version = env!("CARGO_PKG_VERSION"),
    about = "A lightweight reminder and notification tool backed by SQLite",
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
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    #[arg(long = "json", help = "Print machine-readable JSON instead of a table")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use", requires = "edit_config")]
        editor: Option<String>,
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

    /// Set a reminder
    #[command(
        visible_alias = "r",
        long_about = "Set a reminder with a title and an optional period.\n\n\
            The period can be daily, weekly, monthly, annually or a custom\n\
            interval like 2d, 3w, 4m, 5y. If not provided, the period defaults\n\
            to daily. Use --once for a reminder that fires a single time."
    )]
    Remind {
        /// What to be reminded of
        title: String,

        /// Recurrence (daily, weekly, monthly, annually, <n>d|w|m|y)
        #[arg(conflicts_with = "once")]
        period: Option<String>,

        #[arg(long = "once", help = "Fire a single time, then finish")]
        once: bool,

        #[arg(long = "on", value_name = "YYYY-MM-DD", help = "First due date (default: today)")]
        on: Option<String>,
    },

    /// Forget (delete) a reminder
    #[command(visible_alias = "f")]
    Forget {
        /// Reminder id
        #[arg(required_unless_present = "index", conflicts_with = "index")]
        id: Option<i64>,

        #[arg(long = "index", help = "Position in the 'list' output instead of an id")]
        index: Option<usize>,
    },

    /// Edit an active reminder
    #[command(visible_alias = "e")]
    Edit {
        /// Reminder id
        id: i64,

        #[arg(long = "title")]
        title: Option<String>,

        #[arg(long = "period", conflicts_with = "once")]
        period: Option<String>,

        #[arg(long = "once", help = "Make the reminder one-shot")]
        once: bool,

        #[arg(long = "on", value_name = "YYYY-MM-DD", help = "Next due date")]
        on: Option<String>,
    },

    /// List active reminders
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fire due reminders into notifications
    #[command(visible_alias = "c")]
    Checkout {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show active notifications (default when no command is given)
    #[command(visible_alias = "s")]
    Show {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Create an ad-hoc notification
    #[command(visible_alias = "n")]
    Notify {
        title: String,
    },

    /// Dismiss a notification group
    #[command(visible_alias = "d")]
    Dismiss {
        /// Position in the 'show' output
        #[arg(required_unless_present = "group", conflicts_with = "group")]
        index: Option<usize>,

        #[arg(long = "group", value_name = "GID", help = "Group id such as r3 or n12")]
        group: Option<String>,
    },
}
