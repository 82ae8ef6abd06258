use aide::dates::parse_date;
use aide::error::AideError;
use aide::model::Priority;
use aide::store::DeleteTarget;
use aide::validation::{is_valid_email, is_valid_phone};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.2"
/// Format for dev builds: "v0.3.2\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "aide", bin_name = "aide", version = get_version())]
#[command(about = "Personal assistant: notes, tasks, contacts, finances and a calculator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the data files (default: $AIDE_DATA_DIR or the user data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage notes
    #[command(alias = "n")]
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },

    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },

    /// Manage contacts
    #[command(alias = "c")]
    Contact {
        #[command(subcommand)]
        action: ContactCommand,
    },

    /// Manage finance records
    #[command(alias = "f")]
    Finance {
        #[command(subcommand)]
        action: FinanceCommand,
    },

    /// Evaluate an arithmetic expression (+ - * / over integers)
    Calc {
        /// Expression, e.g. "2 + 3 * 4"
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. currency, report-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Create a note
    Add {
        #[arg(value_parser = parse_required)]
        title: String,

        /// Note body (may be empty)
        #[arg(default_value = "")]
        content: String,
    },

    /// List all notes
    #[command(alias = "ls")]
    List,

    /// Show one note in full
    View { id: u32 },

    /// Edit a note; omitted fields keep their value
    Edit {
        id: u32,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a note by id, or every note with ALL
    #[command(alias = "rm")]
    Delete { target: DeleteTarget },

    /// Export notes to a CSV file
    Export { path: PathBuf },

    /// Import notes from a CSV file (always assigns new ids)
    Import { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Create a task
    Add {
        #[arg(value_parser = parse_required)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// High, Medium or Low
        #[arg(short, long, default_value = "medium")]
        priority: Priority,

        /// Due date (DD-MM-YYYY)
        #[arg(long, value_parser = parse_date_arg)]
        due: Option<NaiveDate>,
    },

    /// List tasks, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Only completed tasks
        #[arg(long, conflicts_with = "pending")]
        done: bool,

        /// Only open tasks
        #[arg(long)]
        pending: bool,

        /// Only these priorities (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        priority: Vec<Priority>,

        /// Only tasks due on or before this date (DD-MM-YYYY)
        #[arg(long, value_parser = parse_date_arg)]
        due_before: Option<NaiveDate>,
    },

    /// Show one task in full
    View { id: u32 },

    /// Mark a task as done
    Done { id: u32 },

    /// Edit a task; omitted fields keep their value
    Edit {
        id: u32,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        priority: Option<Priority>,

        #[arg(long, value_parser = parse_date_arg)]
        due: Option<NaiveDate>,
    },

    /// Delete a task by id, or every task with ALL
    #[command(alias = "rm")]
    Delete { target: DeleteTarget },

    /// Export tasks to a CSV file
    Export { path: PathBuf },

    /// Import tasks from a CSV file (existing ids are skipped)
    Import { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommand {
    /// Create a contact
    Add {
        #[arg(value_parser = parse_required)]
        name: String,

        #[arg(long, value_parser = parse_phone)]
        phone: Option<String>,

        #[arg(long, value_parser = parse_email)]
        email: Option<String>,
    },

    /// List all contacts
    #[command(alias = "ls")]
    List,

    /// Find contacts by name or phone
    Search { query: String },

    /// Show one contact
    View { id: u32 },

    /// Edit a contact; omitted fields keep their value
    Edit {
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_parser = parse_phone)]
        phone: Option<String>,

        #[arg(long, value_parser = parse_email)]
        email: Option<String>,
    },

    /// Delete a contact by id, or every contact with ALL
    #[command(alias = "rm")]
    Delete { target: DeleteTarget },

    /// Export contacts to a CSV file
    Export { path: PathBuf },

    /// Import contacts from a CSV file (existing ids are skipped)
    Import { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum FinanceCommand {
    /// Record income (positive) or an expense (negative)
    Add {
        #[arg(allow_negative_numbers = true, value_parser = parse_amount)]
        amount: f64,

        /// Category, e.g. Food or Transport
        #[arg(value_parser = parse_required)]
        category: String,

        /// Date of the operation (DD-MM-YYYY)
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        #[arg(default_value = "")]
        description: String,
    },

    /// List records, optionally only some categories
    #[command(alias = "ls")]
    List { categories: Vec<String> },

    /// Show one record
    View { id: u32 },

    /// Summarise a date range and save it as CSV
    Report {
        #[arg(value_parser = parse_date_arg)]
        start: NaiveDate,

        #[arg(value_parser = parse_date_arg)]
        end: NaiveDate,
    },

    /// Print the balance over all records
    Balance,

    /// Delete a record by id, or every record with ALL
    #[command(alias = "rm")]
    Delete { target: DeleteTarget },

    /// Export records to a CSV file
    Export { path: PathBuf },

    /// Import records from a CSV file (always assigns new ids)
    Import { path: PathBuf },
}

fn parse_required(s: &str) -> Result<String, AideError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err(AideError::InvalidInput("value cannot be empty".into()))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_amount(s: &str) -> Result<f64, AideError> {
    match s.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(AideError::InvalidInput(format!(
            "'{}' is not a valid amount, e.g. 1500 or -250.50",
            s
        ))),
    }
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, AideError> {
    parse_date(s)
}

fn parse_phone(s: &str) -> Result<String, AideError> {
    if is_valid_phone(s.trim()) {
        Ok(s.trim().to_string())
    } else {
        Err(AideError::InvalidInput(format!(
            "'{}' is not a valid phone number, e.g. +7 912 345-67-89",
            s
        )))
    }
}

fn parse_email(s: &str) -> Result<String, AideError> {
    if is_valid_email(s.trim()) {
        Ok(s.trim().to_string())
    } else {
        Err(AideError::InvalidInput(format!(
            "'{}' is not a valid email address",
            s
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_task_filters() {
        let cli = Cli::try_parse_from([
            "aide",
            "task",
            "list",
            "--pending",
            "-p",
            "high,low",
            "--due-before",
            "30-03-2024",
        ])
        .unwrap();
        match cli.command {
            Commands::Task {
                action:
                    TaskCommand::List {
                        done,
                        pending,
                        priority,
                        due_before,
                    },
            } => {
                assert!(!done);
                assert!(pending);
                assert_eq!(priority, vec![Priority::High, Priority::Low]);
                assert_eq!(due_before, NaiveDate::from_ymd_opt(2024, 3, 30));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_delete_all_and_negative_amounts() {
        let cli = Cli::try_parse_from(["aide", "finance", "delete", "ALL"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Finance {
                action: FinanceCommand::Delete {
                    target: DeleteTarget::All
                }
            }
        ));

        let cli = Cli::try_parse_from(["aide", "finance", "add", "-400", "food", "15-01-2024"])
            .unwrap();
        match cli.command {
            Commands::Finance {
                action: FinanceCommand::Add { amount, .. },
            } => assert_eq!(amount, -400.0),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_invalid_input_at_parse_time() {
        assert!(Cli::try_parse_from(["aide", "contact", "add", "Ann", "--phone", "123"]).is_err());
        assert!(Cli::try_parse_from(["aide", "contact", "add", "Ann", "--email", "ann@"]).is_err());
        assert!(Cli::try_parse_from(["aide", "task", "add", "x", "--due", "2024-03-01"]).is_err());
        assert!(Cli::try_parse_from(["aide", "task", "add", "x", "-p", "urgent"]).is_err());
        assert!(Cli::try_parse_from(["aide", "note", "add", "   "]).is_err());
        assert!(Cli::try_parse_from(["aide", "note", "delete", "all"]).is_err());
        for amount in ["NaN", "inf", "-inf", "infinity", "ten"] {
            assert!(
                Cli::try_parse_from(["aide", "finance", "add", amount, "food", "15-01-2024"])
                    .is_err(),
                "{amount} was accepted"
            );
        }
    }
}
