use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftlog
#[derive(Parser)]
#[command(
    name = "shiftlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clock shifts in and out and export monthly attendance rounded to 15 minutes",
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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage user profiles
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Sign in as an existing user
    Login {
        /// User id
        user_id: String,
    },

    /// Sign out the current user
    Logout,

    /// Show who is signed in
    Whoami,

    /// Clock in (start a shift)
    In {
        /// Clock-in time instead of now (RFC 3339, or YYYY-MM-DD HH:MM in UTC)
        #[arg(long)]
        at: Option<String>,
    },

    /// Clock out (end the running shift)
    Out {
        /// Clock-out time instead of now (RFC 3339, or YYYY-MM-DD HH:MM in UTC)
        #[arg(long)]
        at: Option<String>,
    },

    /// Show whether the signed-in user is clocked in
    Status,

    /// Monthly attendance summary (administrators only)
    Summary {
        /// Month to summarize (YYYY-MM, UTC boundaries). Defaults to the current month.
        #[arg(long, short)]
        month: Option<String>,
    },

    /// Export the monthly summary and shift details (administrators only)
    Export {
        /// Month to export (YYYY-MM, UTC boundaries). Defaults to the current month.
        #[arg(long, short)]
        month: Option<String>,

        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,

        /// Output file path (absolute). Defaults to ./attendance-YYYY-MM.<ext>
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user (the first admin can be added freely; afterwards admins only)
    Add {
        /// Login id, without spaces
        user_id: String,

        /// Full name shown in reports
        #[arg(long)]
        name: String,

        /// worker or admin
        #[arg(long, default_value = "worker")]
        role: String,
    },

    /// List registered users
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export() {
        let cli = Cli::try_parse_from([
            "shiftlog", "--db", "/tmp/x.sqlite", "export", "--month", "2025-09", "--format", "csv",
            "-f",
        ])
        .unwrap();

        assert_eq!(cli.db.as_deref(), Some("/tmp/x.sqlite"));
        match cli.command {
            Commands::Export {
                month,
                format,
                file,
                force,
            } => {
                assert_eq!(month.as_deref(), Some("2025-09"));
                assert_eq!(format, ExportFormat::Csv);
                assert!(file.is_none());
                assert!(force);
            }
            _ => panic!("expected export"),
        }
    }
}
