//! Event-related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, Row};

/// Event row from database.
#[derive(Debug, Clone)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub status: String,
    pub event_type: String,
    pub scheduled_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

const EVENT_COLUMNS: &str = "id, title, description, topic, status, event_type,
                             scheduled_date, created_at, updated_at";

fn map_event(row: &Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        topic: row.get(3)?,
        status: row.get(4)?,
        event_type: row.get(5)?,
        scheduled_date: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Insert a new event.
pub fn create_event(pool: &DbPool, event: &EventRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO events (id, title, description, topic, status, event_type,
                                 scheduled_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                event.id,
                event.title,
                event.description,
                event.topic,
                event.status,
                event.event_type,
                event.scheduled_date,
                event.created_at,
                event.updated_at
            ],
        )?;
        Ok(())
    })
}

/// Get an event by ID.
pub fn get_event(pool: &DbPool, id: &str) -> DbResult<EventRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
            params![id],
            map_event,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Event: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List events, newest first, optionally filtered by status.
pub fn list_events(
    pool: &DbPool,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> DbResult<Vec<EventRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE (?1 IS NULL OR status = ?1)
             ORDER BY created_at DESC
             LIMIT ?2 OFFSET ?3"
        ))?;

        let rows = stmt.query_map(params![status, limit, offset], map_event)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Overwrite the mutable columns of an event.
pub fn update_event(pool: &DbPool, event: &EventRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE events SET title = ?2, description = ?3, topic = ?4, status = ?5,
                    event_type = ?6, scheduled_date = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                event.id,
                event.title,
                event.description,
                event.topic,
                event.status,
                event.event_type,
                event.scheduled_date,
                event.updated_at
            ],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Event: {}", event.id)));
        }
        Ok(())
    })
}

/// Delete an event (cascades to tasks and milestones). Returns false if it did not exist.
pub fn delete_event(pool: &DbPool, id: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let deleted = conn.execute("DELETE FROM events WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    })
}
