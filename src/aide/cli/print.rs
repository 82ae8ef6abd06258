use aide::commands::{CmdMessage, MessageLevel};
use aide::config::{AideConfig, CONFIG_KEYS};
use aide::dates::{display_timestamp, format_date, format_money};
use aide::model::{Contact, FinanceRecord, Note, Priority, Task};
use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const DUE_WIDTH: usize = 16;
const AMOUNT_WIDTH: usize = 20;
const PREVIEW_CHARS: usize = 50;
const SEPARATOR: &str = "--------------------------------";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per note: id, title with a content preview, relative age.
pub(super) fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for note in notes {
        let idx_str = format!("{}. ", note.id);
        let preview: String = note
            .content
            .chars()
            .take(PREVIEW_CHARS)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_content = if preview.is_empty() {
            note.title.clone()
        } else {
            format!("{} {}", note.title, preview)
        };

        let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);
        println!(
            "{}{}{}",
            idx_str,
            fit_to_width(&title_content, available),
            format_time_ago(note.timestamp).dimmed()
        );
    }
}

pub(super) fn print_full_notes(notes: &[Note]) {
    for (i, note) in notes.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", note.id.to_string().yellow(), note.title.bold());
        println!("{}", display_timestamp(&note.timestamp).dimmed());
        println!("{}", SEPARATOR);
        println!("{}", note.content);
    }
}

/// One line per task: done marker, id, title and the due date on the right.
pub(super) fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    for task in tasks {
        let marker = if task.done { "✓" } else { " " };
        let idx_str = format!("{} {}. ", marker, task.id);
        let available = LINE_WIDTH.saturating_sub(idx_str.width() + DUE_WIDTH);
        let title = fit_to_width(&task.title, available);
        let title = match task.priority {
            Priority::High => title.red(),
            Priority::Medium => title.normal(),
            Priority::Low => title.dimmed(),
        };
        let due = task
            .due_date
            .map(|d| format!("due {}", format_date(&d)))
            .unwrap_or_default();
        let idx_colored = if task.done {
            idx_str.green()
        } else {
            idx_str.normal()
        };

        println!(
            "{}{}{:>width$}",
            idx_colored,
            title,
            due,
            width = DUE_WIDTH
        );
    }
}

pub(super) fn print_full_tasks(tasks: &[Task]) {
    for task in tasks {
        println!("{} {}", task.id.to_string().yellow(), task.title.bold());
        println!("{}", SEPARATOR);
        println!("Status:      {}", if task.done { "done".green() } else { "open".normal() });
        println!("Priority:    {}", task.priority);
        println!(
            "Due:         {}",
            task.due_date.map(|d| format_date(&d)).unwrap_or_else(|| "-".into())
        );
        if !task.description.is_empty() {
            println!();
            println!("{}", task.description);
        }
    }
}

pub(super) fn print_contacts(contacts: &[Contact]) {
    if contacts.is_empty() {
        println!("No contacts found.");
        return;
    }

    for contact in contacts {
        let details: Vec<&str> = [contact.phone.as_deref(), contact.email.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        println!(
            "{}. {}  {}",
            contact.id,
            contact.name.bold(),
            details.join(", ").dimmed()
        );
    }
}

pub(super) fn print_full_contacts(contacts: &[Contact]) {
    for contact in contacts {
        println!("{} {}", contact.id.to_string().yellow(), contact.name.bold());
        println!("{}", SEPARATOR);
        println!("Phone: {}", contact.phone.as_deref().unwrap_or("-"));
        println!("Email: {}", contact.email.as_deref().unwrap_or("-"));
    }
}

/// One line per record: id, date, category and description, amount on the right.
pub(super) fn print_finance(records: &[FinanceRecord], currency: &str) {
    if records.is_empty() {
        println!("No finance records found.");
        return;
    }

    for record in records {
        let idx_str = format!("{}. ", record.id);
        let text = if record.description.is_empty() {
            format!("{}  {}", format_date(&record.date), record.category)
        } else {
            format!(
                "{}  {}  {}",
                format_date(&record.date),
                record.category,
                record.description
            )
        };
        let amount = format!(
            "{:>width$}",
            format_money(record.amount, currency),
            width = AMOUNT_WIDTH
        );
        let amount = if record.is_expense() {
            amount.red().to_string()
        } else {
            amount.green().to_string()
        };

        let available = LINE_WIDTH.saturating_sub(idx_str.width() + AMOUNT_WIDTH);
        println!("{}{}{}", idx_str, fit_to_width(&text, available), amount);
    }
}

pub(super) fn print_full_finance(records: &[FinanceRecord], currency: &str) {
    for record in records {
        println!(
            "{} {}",
            record.id.to_string().yellow(),
            format_money(record.amount, currency).bold()
        );
        println!("{}", SEPARATOR);
        println!("Category:    {}", record.category);
        println!("Date:        {}", format_date(&record.date));
        if !record.description.is_empty() {
            println!("Description: {}", record.description);
        }
    }
}

pub(super) fn print_config(config: &AideConfig) {
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        let value = if value.is_empty() {
            "(data dir)".dimmed().to_string()
        } else {
            value
        };
        println!("{} = {}", key, value);
    }
}

/// Plain `text` cut to `available` columns, then padded to exactly that width.
fn fit_to_width(text: &str, available: usize) -> String {
    let mut display = truncate_to_width(text, available);
    let padding = available.saturating_sub(display.width());
    display.push_str(&" ".repeat(padding));
    display
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: NaiveDateTime) -> String {
    let now = Local::now().naive_local();
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
