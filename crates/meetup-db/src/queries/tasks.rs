//! Task-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, Row};

/// Task row from database.
#[derive(Debug, Clone)]
pub struct TaskRow {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    pub phase: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub is_blocked: bool,
    pub blocking_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
}

const TASK_COLUMNS: &str = "id, event_id, title, description, phase, category, status, priority,
                            assignee, due_date, is_blocked, blocking_reason,
                            created_at, updated_at, completed_at";

fn map_task(row: &Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        event_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        phase: row.get(4)?,
        category: row.get(5)?,
        status: row.get(6)?,
        priority: row.get(7)?,
        assignee: row.get(8)?,
        due_date: row.get(9)?,
        is_blocked: row.get(10)?,
        blocking_reason: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
        completed_at: row.get(14)?,
    })
}

fn insert(conn: &rusqlite::Connection, task: &TaskRow) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO tasks (id, event_id, title, description, phase, category, status, priority,
                            assignee, due_date, is_blocked, blocking_reason,
                            created_at, updated_at, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            task.id,
            task.event_id,
            task.title,
            task.description,
            task.phase,
            task.category,
            task.status,
            task.priority,
            task.assignee,
            task.due_date,
            task.is_blocked,
            task.blocking_reason,
            task.created_at,
            task.updated_at,
            task.completed_at
        ],
    )
}

/// Create a new task.
pub fn create_task(pool: &DbPool, task: &TaskRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        insert(conn, task)?;
        Ok(())
    })
}

/// Insert a batch of tasks in one transaction.
pub fn create_tasks(pool: &DbPool, tasks: &[TaskRow]) -> DbResult<()> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        for task in tasks {
            insert(&tx, task)?;
        }
        tx.commit()?;
        Ok(())
    })
}

/// Get a task by ID.
pub fn get_task(pool: &DbPool, id: &str) -> DbResult<TaskRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            params![id],
            map_task,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Task: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List every task of an event.
pub fn list_tasks(pool: &DbPool, event_id: &str) -> DbResult<Vec<TaskRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE event_id = ?1
             ORDER BY
                CASE priority
                    WHEN 'critical' THEN 1
                    WHEN 'high' THEN 2
                    WHEN 'medium' THEN 3
                    WHEN 'low' THEN 4
                END,
                created_at ASC"
        ))?;

        let rows = stmt.query_map(params![event_id], map_task)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// List tasks of an event in one status column.
pub fn list_tasks_by_status(pool: &DbPool, event_id: &str, status: &str) -> DbResult<Vec<TaskRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE event_id = ?1 AND status = ?2
             ORDER BY
                CASE priority
                    WHEN 'critical' THEN 1
                    WHEN 'high' THEN 2
                    WHEN 'medium' THEN 3
                    WHEN 'low' THEN 4
                END,
                created_at ASC"
        ))?;

        let rows = stmt.query_map(params![event_id, status], map_task)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Overwrite the editable columns of a task.
pub fn update_task(pool: &DbPool, task: &TaskRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, phase = ?4, category = ?5,
                    priority = ?6, assignee = ?7, due_date = ?8, updated_at = ?9
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.phase,
                task.category,
                task.priority,
                task.assignee,
                task.due_date,
                task.updated_at
            ],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Task: {}", task.id)));
        }
        Ok(())
    })
}

/// Update task status. Moving to `done` stamps `completed_at`; any other status clears it.
pub fn update_task_status(pool: &DbPool, id: &str, status: &str, now: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = match status {
            "done" => conn.execute(
                "UPDATE tasks SET status = ?1, completed_at = COALESCE(completed_at, ?2), updated_at = ?2
                 WHERE id = ?3",
                params![status, now, id],
            )?,
            _ => conn.execute(
                "UPDATE tasks SET status = ?1, completed_at = NULL, updated_at = ?2 WHERE id = ?3",
                params![status, now, id],
            )?,
        };
        if changed == 0 {
            return Err(DbError::NotFound(format!("Task: {}", id)));
        }
        Ok(())
    })
}

/// Set or clear the blocked flag. `Some(reason)` blocks, `None` unblocks.
pub fn set_task_blocked(pool: &DbPool, id: &str, reason: Option<&str>, now: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE tasks SET is_blocked = ?1, blocking_reason = ?2, updated_at = ?3 WHERE id = ?4",
            params![reason.is_some(), reason, now, id],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Task: {}", id)));
        }
        Ok(())
    })
}

/// Delete a task. Returns false if it did not exist.
pub fn delete_task(pool: &DbPool, id: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let deleted = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    })
}

/// Count tasks of an event.
pub fn count_tasks(pool: &DbPool, event_id: &str) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE event_id = ?1",
            params![event_id],
            |row| row.get(0),
        )
        .map_err(DbError::from)
    })
}
