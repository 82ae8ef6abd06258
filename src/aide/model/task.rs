use super::replace_text;
use crate::dates::option_date_format;
use crate::error::AideError;
use crate::store::{ImportPolicy, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    // Aliases accept files written by the older Russian-language release.
    #[serde(alias = "Высокий")]
    High,
    #[default]
    #[serde(alias = "Средний")]
    Medium,
    #[serde(alias = "Низкий")]
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(name)
    }
}

impl FromStr for Priority {
    type Err = AideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "высокий" => Ok(Priority::High),
            "medium" | "средний" => Ok(Priority::Medium),
            "low" | "низкий" => Ok(Priority::Low),
            other => Err(AideError::InvalidInput(format!(
                "Unknown priority '{}', expected High, Medium or Low",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub done: bool,
    pub priority: Priority,
    #[serde(with = "option_date_format", default)]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(
        id: u32,
        title: String,
        description: String,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            done: false,
            priority,
            due_date,
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn apply(&mut self, update: TaskUpdate) {
        replace_text(&mut self.title, update.title);
        replace_text(&mut self.description, update.description);
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due) = update.due_date {
            self.due_date = Some(due);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

impl Record for Task {
    const LABEL: &'static str = "Task";
    const CSV_HEADERS: &'static [&'static str] =
        &["id", "title", "description", "done", "priority", "due_date"];
    const IMPORT_POLICY: ImportPolicy = ImportPolicy::KeepIds;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn summary(&self) -> String {
        self.title.clone()
    }
}

/// JSON stores a real boolean; CSV files may carry `true`, `True` or `TRUE`.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Bool(b) => Ok(b),
        Repr::Text(s) => Ok(s.trim().eq_ignore_ascii_case("true")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("Низкий".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn reads_legacy_json() {
        let json = r#"{"id": 3, "title": "t", "description": "", "done": true,
                       "priority": "Высокий", "due_date": null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.done);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn due_date_uses_day_first_format() {
        let task = Task::new(
            1,
            "t".into(),
            "".into(),
            Priority::Low,
            NaiveDate::from_ymd_opt(2024, 3, 15),
        );
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["due_date"], "15-03-2024");
        assert_eq!(json["priority"], "Low");
        assert_eq!(json["done"], false);
    }

    #[test]
    fn update_cannot_clear_due_date() {
        let mut task = Task::new(
            1,
            "t".into(),
            "d".into(),
            Priority::Low,
            NaiveDate::from_ymd_opt(2024, 3, 15),
        );
        let before = task.clone();
        task.apply(TaskUpdate::default());
        assert_eq!(task, before);
    }
}
