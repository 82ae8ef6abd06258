//! Dispatch: builds the [`AppContext`], opens the collection a command needs
//! and hands the command layer's [`CmdResult`] to the printers.
//!
//! - `run()`: parses arguments, initialises logging and dispatches
//! - `init_context()`: resolves the data directory and loads `config.json`
//! - `handle_*()`: one handler per top-level command

use super::print::{
    print_config, print_contacts, print_finance, print_full_contacts, print_full_finance,
    print_full_notes, print_full_tasks, print_messages, print_notes, print_tasks,
};
use super::setup::{Cli, Commands, ContactCommand, FinanceCommand, NoteCommand, TaskCommand};
use aide::calc::{evaluate, format_result};
use aide::commands::config::ConfigAction;
use aide::commands::tasks::TaskFilter;
use aide::commands::{self, CmdMessage};
use aide::config::AideConfig;
use aide::dates::format_money;
use aide::error::{AideError, Result};
use aide::model::{ContactUpdate, NoteUpdate, TaskUpdate};
use aide::store::{Collection, FileBackend, Record};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use log::debug;
use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "AIDE_DATA_DIR";

struct AppContext {
    data_dir: PathBuf,
    config: AideConfig,
}

impl AppContext {
    /// Open the collection stored in `file`, telling the user when its
    /// contents could not be read.
    fn open<R: Record>(&self, file: &str) -> Result<Collection<R, FileBackend>> {
        let path = self.config.resolve(&self.data_dir, file);
        let collection = Collection::open(FileBackend::new(&path))?;
        if collection.recovered_from_corruption() {
            print_messages(&[CmdMessage::warning(format!(
                "{} could not be read; continuing with an empty list",
                path.display()
            ))]);
        }
        Ok(collection)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Calc { expression } => handle_calc(&expression.join(" ")),
        Commands::Note { action } => handle_note(&init_context(data_dir)?, action),
        Commands::Task { action } => handle_task(&init_context(data_dir)?, action),
        Commands::Contact { action } => handle_contact(&init_context(data_dir)?, action),
        Commands::Finance { action } => handle_finance(&init_context(data_dir)?, action),
        Commands::Config { key, value } => handle_config(&init_context(data_dir)?, key, value),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn init_context(data_dir: Option<&Path>) -> Result<AppContext> {
    let data_dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from("com", "aide", "aide")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| AideError::Store("Could not determine data directory".into()))?,
        },
    };
    debug!("Using data directory {}", data_dir.display());

    let config = AideConfig::load(&data_dir)?;
    Ok(AppContext { data_dir, config })
}

fn handle_note(ctx: &AppContext, action: NoteCommand) -> Result<()> {
    let mut notes = ctx.open(&ctx.config.notes_file)?;

    let result = match action {
        NoteCommand::Add { title, content } => commands::notes::create(&mut notes, title, content)?,
        NoteCommand::List => {
            let result = commands::records::list(&notes);
            print_notes(&result.listed);
            result
        }
        NoteCommand::View { id } => {
            let result = commands::records::view(&notes, id);
            print_full_notes(&result.listed);
            result
        }
        NoteCommand::Edit { id, title, content } => {
            commands::notes::edit(&mut notes, id, NoteUpdate { title, content })?
        }
        NoteCommand::Delete { target } => commands::records::delete(&mut notes, target)?,
        NoteCommand::Export { path } => commands::records::export(&notes, &path)?,
        NoteCommand::Import { path } => commands::records::import(&mut notes, &path)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_task(ctx: &AppContext, action: TaskCommand) -> Result<()> {
    let mut tasks = ctx.open(&ctx.config.tasks_file)?;

    let result = match action {
        TaskCommand::Add {
            title,
            description,
            priority,
            due,
        } => commands::tasks::add(&mut tasks, title, description, priority, due)?,
        TaskCommand::List {
            done,
            pending,
            priority,
            due_before,
        } => {
            let status = match (done, pending) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let filter = TaskFilter {
                status,
                priorities: priority,
                due_before,
            };
            let result = commands::tasks::list(&tasks, &filter);
            print_tasks(&result.listed);
            result
        }
        TaskCommand::View { id } => {
            let result = commands::records::view(&tasks, id);
            print_full_tasks(&result.listed);
            result
        }
        TaskCommand::Done { id } => commands::tasks::mark_done(&mut tasks, id)?,
        TaskCommand::Edit {
            id,
            title,
            description,
            priority,
            due,
        } => commands::tasks::edit(
            &mut tasks,
            id,
            TaskUpdate {
                title,
                description,
                priority,
                due_date: due,
            },
        )?,
        TaskCommand::Delete { target } => commands::records::delete(&mut tasks, target)?,
        TaskCommand::Export { path } => commands::records::export(&tasks, &path)?,
        TaskCommand::Import { path } => commands::records::import(&mut tasks, &path)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_contact(ctx: &AppContext, action: ContactCommand) -> Result<()> {
    let mut contacts = ctx.open(&ctx.config.contacts_file)?;

    let result = match action {
        ContactCommand::Add { name, phone, email } => {
            commands::contacts::add(&mut contacts, name, phone, email)?
        }
        ContactCommand::List => {
            let result = commands::records::list(&contacts);
            print_contacts(&result.listed);
            result
        }
        ContactCommand::Search { query } => {
            let result = commands::contacts::search(&contacts, &query);
            print_contacts(&result.listed);
            result
        }
        ContactCommand::View { id } => {
            let result = commands::records::view(&contacts, id);
            print_full_contacts(&result.listed);
            result
        }
        ContactCommand::Edit {
            id,
            name,
            phone,
            email,
        } => commands::contacts::edit(&mut contacts, id, ContactUpdate { name, phone, email })?,
        ContactCommand::Delete { target } => commands::records::delete(&mut contacts, target)?,
        ContactCommand::Export { path } => commands::records::export(&contacts, &path)?,
        ContactCommand::Import { path } => commands::records::import(&mut contacts, &path)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_finance(ctx: &AppContext, action: FinanceCommand) -> Result<()> {
    let mut finance = ctx.open(&ctx.config.finance_file)?;
    let currency = ctx.config.currency.as_str();

    let result = match action {
        FinanceCommand::Add {
            amount,
            category,
            date,
            description,
        } => commands::finance::add(&mut finance, amount, category, date, description)?,
        FinanceCommand::List { categories } => {
            let result = commands::finance::list(&finance, &categories);
            print_finance(&result.listed, currency);
            result
        }
        FinanceCommand::View { id } => {
            let result = commands::records::view(&finance, id);
            print_full_finance(&result.listed, currency);
            result
        }
        FinanceCommand::Report { start, end } => {
            if end < start {
                return Err(AideError::InvalidInput(
                    "Report end date is before its start date".into(),
                ));
            }
            let report_dir = ctx.config.report_dir(&ctx.data_dir);
            let result = commands::finance::report(&finance, start, end, &report_dir, currency)?;
            print_finance(&result.listed, currency);
            result
        }
        FinanceCommand::Balance => {
            let balance = commands::finance::balance(&finance);
            println!("Balance: {}", format_money(balance, currency).bold());
            return Ok(());
        }
        FinanceCommand::Delete { target } => commands::records::delete(&mut finance, target)?,
        FinanceCommand::Export { path } => commands::records::export(&finance, &path)?,
        FinanceCommand::Import { path } => commands::records::import(&mut finance, &path)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_calc(expression: &str) -> Result<()> {
    match evaluate(expression) {
        Ok(value) => {
            println!("{} = {}", expression.trim(), format_result(value).bold());
            Ok(())
        }
        Err(e) => Err(AideError::InvalidInput(e.to_string())),
    }
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = commands::config::run(&ctx.data_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
