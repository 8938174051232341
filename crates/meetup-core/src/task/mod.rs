//! Task management (kanban).

pub mod model;

use meetup_db::queries::tasks as queries;
use meetup_db::DbPool;
use uuid::Uuid;

use crate::error::{not_found_as, PlannerError, PlannerResult};
use crate::{event, timestamp, validate};
use model::{Board, BoardColumn, NewTask, Task, TaskStatus, TaskUpdate};

/// Create a task in `todo` on an existing event.
pub fn create_task(pool: &DbPool, event_id: &str, input: NewTask) -> PlannerResult<Task> {
    event::get_event(pool, event_id)?;

    let task = build_task(event_id, input)?;
    queries::create_task(pool, &task.to_row())?;
    tracing::debug!(task_id = %task.id, event_id = %event_id, "Task created");
    Ok(task)
}

/// Create several tasks in one transaction.
pub fn create_tasks(pool: &DbPool, event_id: &str, inputs: Vec<NewTask>) -> PlannerResult<Vec<Task>> {
    event::get_event(pool, event_id)?;

    let tasks = inputs
        .into_iter()
        .map(|input| build_task(event_id, input))
        .collect::<PlannerResult<Vec<_>>>()?;
    let rows: Vec<_> = tasks.iter().map(Task::to_row).collect();
    queries::create_tasks(pool, &rows)?;
    Ok(tasks)
}

fn build_task(event_id: &str, input: NewTask) -> PlannerResult<Task> {
    let now = timestamp::current();
    Ok(Task {
        id: Uuid::new_v4().to_string(),
        event_id: event_id.to_string(),
        title: validate::title(&input.title)?,
        description: validate::optional_text(input.description),
        phase: Some(input.phase),
        category: Some(input.category),
        status: TaskStatus::Todo,
        priority: input.priority,
        assignee: validate::optional_text(input.assignee),
        due_date: input.due_date,
        is_blocked: false,
        blocking_reason: None,
        created_at: now,
        updated_at: now,
        completed_at: None,
    })
}

/// Get a task by ID.
pub fn get_task(pool: &DbPool, id: &str) -> PlannerResult<Task> {
    let row = queries::get_task(pool, id).map_err(not_found_as(PlannerError::TaskNotFound, id))?;
    Task::from_row(row)
}

/// List an event's tasks, optionally only one column.
pub fn list_tasks(pool: &DbPool, event_id: &str, status: Option<TaskStatus>) -> PlannerResult<Vec<Task>> {
    event::get_event(pool, event_id)?;
    match status {
        Some(status) => queries::list_tasks_by_status(pool, event_id, status.as_str())?
            .into_iter()
            .map(Task::from_row)
            .collect(),
        None => load_tasks(pool, event_id),
    }
}

/// Tasks of an event without checking the event exists.
pub(crate) fn load_tasks(pool: &DbPool, event_id: &str) -> PlannerResult<Vec<Task>> {
    queries::list_tasks(pool, event_id)?
        .into_iter()
        .map(Task::from_row)
        .collect()
}

/// Apply a partial update to a task's details.
///
/// A phase or category the update does not set is written back exactly as
/// stored, so unclassified rows keep their original text.
pub fn update_task(pool: &DbPool, id: &str, update: TaskUpdate) -> PlannerResult<Task> {
    let stored = queries::get_task(pool, id).map_err(not_found_as(PlannerError::TaskNotFound, id))?;
    let mut task = Task::from_row(stored.clone())?;
    let keep_phase = update.phase.is_none();
    let keep_category = update.category.is_none();

    if let Some(title) = update.title {
        task.title = validate::title(&title)?;
    }
    if let Some(description) = update.description {
        task.description = validate::optional_text(Some(description));
    }
    if let Some(phase) = update.phase {
        task.phase = Some(phase);
    }
    if let Some(category) = update.category {
        task.category = Some(category);
    }
    if let Some(priority) = update.priority {
        task.priority = priority;
    }
    if let Some(assignee) = update.assignee {
        task.assignee = validate::optional_text(Some(assignee));
    }
    if let Some(due) = update.due_date {
        task.due_date = due;
    }
    task.updated_at = timestamp::current();

    let mut row = task.to_row();
    if keep_phase {
        row.phase = stored.phase;
    }
    if keep_category {
        row.category = stored.category;
    }
    queries::update_task(pool, &row).map_err(not_found_as(PlannerError::TaskNotFound, id))?;
    Ok(task)
}

/// Move a task to another column. Any column may move to any other.
pub fn move_task(pool: &DbPool, id: &str, status: TaskStatus) -> PlannerResult<Task> {
    queries::update_task_status(pool, id, status.as_str(), &timestamp::now())
        .map_err(not_found_as(PlannerError::TaskNotFound, id))?;
    tracing::debug!(task_id = %id, status = status.as_str(), "Task moved");
    get_task(pool, id)
}

/// Flag a task as blocked. The reason must not be blank.
pub fn block_task(pool: &DbPool, id: &str, reason: &str) -> PlannerResult<Task> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(PlannerError::validation("a blocking reason is required"));
    }
    queries::set_task_blocked(pool, id, Some(reason), &timestamp::now())
        .map_err(not_found_as(PlannerError::TaskNotFound, id))?;
    tracing::info!(task_id = %id, reason = %reason, "Task blocked");
    get_task(pool, id)
}

/// Clear the blocked flag and its reason.
pub fn unblock_task(pool: &DbPool, id: &str) -> PlannerResult<Task> {
    queries::set_task_blocked(pool, id, None, &timestamp::now())
        .map_err(not_found_as(PlannerError::TaskNotFound, id))?;
    get_task(pool, id)
}

/// Delete a task.
pub fn delete_task(pool: &DbPool, id: &str) -> PlannerResult<()> {
    if !queries::delete_task(pool, id)? {
        return Err(PlannerError::TaskNotFound(id.to_string()));
    }
    Ok(())
}

/// Get the four-column board for an event.
pub fn get_board(pool: &DbPool, event_id: &str) -> PlannerResult<Board> {
    let tasks = list_tasks(pool, event_id, None)?;

    let columns = TaskStatus::ALL
        .iter()
        .map(|status| BoardColumn {
            status: *status,
            name: status.display_name().to_string(),
            tasks: tasks.iter().filter(|t| t.status == *status).cloned().collect(),
        })
        .collect();

    Ok(Board {
        event_id: event_id.to_string(),
        columns,
    })
}
