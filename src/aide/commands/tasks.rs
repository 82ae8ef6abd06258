use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Priority, Task, TaskUpdate};
use crate::store::{Collection, StorageBackend};
use chrono::NaiveDate;

/// Task list filters. Every field is optional and they combine with AND.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Exact match on the done flag.
    pub status: Option<bool>,
    /// Keep tasks whose priority is one of these. Empty means any.
    pub priorities: Vec<Priority>,
    /// Keep tasks that have a due date on or before this date.
    pub due_before: Option<NaiveDate>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(done) = self.status {
            if task.done != done {
                return false;
            }
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }
        if let Some(limit) = self.due_before {
            // Chronological, not string order: 05-04-2024 is after 30-03-2024.
            match task.due_date {
                Some(due) if due <= limit => {}
                _ => return false,
            }
        }
        true
    }
}

pub fn add<B: StorageBackend>(
    tasks: &mut Collection<Task, B>,
    title: String,
    description: String,
    priority: Priority,
    due_date: Option<NaiveDate>,
) -> Result<CmdResult<Task>> {
    let task = tasks.add(|id| Task::new(id, title, description, priority, due_date))?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Task created ({}): {}",
        task.id, task.title
    )));
    Ok(result.with_affected(vec![task]))
}

pub fn list<B: StorageBackend>(tasks: &Collection<Task, B>, filter: &TaskFilter) -> CmdResult<Task> {
    let listed = tasks
        .list()
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    CmdResult::default().with_listed(listed)
}

pub fn edit<B: StorageBackend>(
    tasks: &mut Collection<Task, B>,
    id: u32,
    update: TaskUpdate,
) -> Result<CmdResult<Task>> {
    let mut result = CmdResult::default();
    match tasks.update(id, |task| task.apply(update))? {
        Some(task) => {
            result.add_message(CmdMessage::success(format!(
                "Task updated ({}): {}",
                task.id, task.title
            )));
            result.affected.push(task);
        }
        None => result.add_message(CmdMessage::warning(format!("Task {} not found", id))),
    }
    Ok(result)
}

pub fn mark_done<B: StorageBackend>(
    tasks: &mut Collection<Task, B>,
    id: u32,
) -> Result<CmdResult<Task>> {
    let mut result = CmdResult::default();
    let already_done = match tasks.find(id) {
        Some(task) => task.done,
        None => {
            result.add_message(CmdMessage::warning(format!("Task {} not found", id)));
            return Ok(result);
        }
    };

    if already_done {
        result.add_message(CmdMessage::info(format!("Task {} is already done", id)));
    } else if let Some(task) = tasks.update(id, Task::mark_done)? {
        result.add_message(CmdMessage::success(format!(
            "Task {} marked as done: {}",
            task.id, task.title
        )));
        result.affected.push(task);
    }
    Ok(result)
}
