//! Milestone database queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, Row};

/// Milestone row from database.
#[derive(Debug, Clone)]
pub struct MilestoneRow {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    pub milestone_type: String,
    pub due_date: String,
    pub is_completed: bool,
    pub completed_at: Option<String>,
    pub is_critical_path: bool,
    pub sort_order: i64,
    pub created_at: String,
}

const MILESTONE_COLUMNS: &str = "id, event_id, title, description, milestone_type, due_date,
                                 is_completed, completed_at, is_critical_path, sort_order, created_at";

fn map_milestone(row: &Row<'_>) -> rusqlite::Result<MilestoneRow> {
    Ok(MilestoneRow {
        id: row.get(0)?,
        event_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        milestone_type: row.get(4)?,
        due_date: row.get(5)?,
        is_completed: row.get(6)?,
        completed_at: row.get(7)?,
        is_critical_path: row.get(8)?,
        sort_order: row.get(9)?,
        created_at: row.get(10)?,
    })
}

fn insert(conn: &rusqlite::Connection, m: &MilestoneRow) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO milestones (id, event_id, title, description, milestone_type, due_date,
                                 is_completed, completed_at, is_critical_path, sort_order, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            m.id,
            m.event_id,
            m.title,
            m.description,
            m.milestone_type,
            m.due_date,
            m.is_completed,
            m.completed_at,
            m.is_critical_path,
            m.sort_order,
            m.created_at
        ],
    )
}

/// Create a milestone.
pub fn create_milestone(pool: &DbPool, milestone: &MilestoneRow) -> DbResult<()> {
    pool.with_conn(|conn| {
        insert(conn, milestone)?;
        Ok(())
    })
}

/// Insert a batch of milestones in one transaction.
pub fn create_milestones(pool: &DbPool, milestones: &[MilestoneRow]) -> DbResult<()> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        for m in milestones {
            insert(&tx, m)?;
        }
        tx.commit()?;
        Ok(())
    })
}

/// Get a milestone by ID.
pub fn get_milestone(pool: &DbPool, id: &str) -> DbResult<MilestoneRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("SELECT {MILESTONE_COLUMNS} FROM milestones WHERE id = ?1"),
            params![id],
            map_milestone,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Milestone: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List milestones of an event by due date.
pub fn list_milestones(pool: &DbPool, event_id: &str) -> DbResult<Vec<MilestoneRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {MILESTONE_COLUMNS} FROM milestones WHERE event_id = ?1
             ORDER BY due_date ASC, sort_order ASC"
        ))?;

        let rows = stmt.query_map(params![event_id], map_milestone)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Mark a milestone completed at `completed_at`, or reopen it with `None`.
pub fn set_milestone_completed(pool: &DbPool, id: &str, completed_at: Option<&str>) -> DbResult<()> {
    pool.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE milestones SET is_completed = ?1, completed_at = ?2 WHERE id = ?3",
            params![completed_at.is_some(), completed_at, id],
        )?;
        if changed == 0 {
            return Err(DbError::NotFound(format!("Milestone: {}", id)));
        }
        Ok(())
    })
}

/// Count milestones of an event.
pub fn count_milestones(pool: &DbPool, event_id: &str) -> DbResult<i64> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*) FROM milestones WHERE event_id = ?1",
            params![event_id],
            |row| row.get(0),
        )
        .map_err(DbError::from)
    })
}

/// Delete a milestone. Returns false if it did not exist.
pub fn delete_milestone(pool: &DbPool, id: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let deleted = conn.execute("DELETE FROM milestones WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pool_with_event;

    fn sample_milestone(id: &str, due: &str, order: i64) -> MilestoneRow {
        MilestoneRow {
            id: id.to_string(),
            event_id: "e1".to_string(),
            title: format!("Milestone {id}"),
            description: None,
            milestone_type: "deadline".to_string(),
            due_date: due.to_string(),
            is_completed: false,
            completed_at: None,
            is_critical_path: order % 2 == 0,
            sort_order: order,
            created_at: "2026-10-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_list_sorted_by_due_date() {
        let pool = pool_with_event();
        create_milestones(
            &pool,
            &[
                sample_milestone("late", "2026-11-20T00:00:00Z", 0),
                sample_milestone("early", "2026-10-20T00:00:00Z", 1),
                sample_milestone("mid", "2026-11-01T00:00:00Z", 2),
            ],
        )
        .unwrap();

        let ids: Vec<String> = list_milestones(&pool, "e1").unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["early", "mid", "late"]);
        assert_eq!(count_milestones(&pool, "e1").unwrap(), 3);
    }

    #[test]
    fn test_complete_and_reopen() {
        let pool = pool_with_event();
        create_milestone(&pool, &sample_milestone("m1", "2026-11-01T00:00:00Z", 0)).unwrap();

        set_milestone_completed(&pool, "m1", Some("2026-10-15T00:00:00Z")).unwrap();
        let done = get_milestone(&pool, "m1").unwrap();
        assert!(done.is_completed);
        assert_eq!(done.completed_at.as_deref(), Some("2026-10-15T00:00:00Z"));

        set_milestone_completed(&pool, "m1", None).unwrap();
        let open = get_milestone(&pool, "m1").unwrap();
        assert!(!open.is_completed);
        assert!(open.completed_at.is_none());
    }

    #[test]
    fn test_completed_without_timestamp_violates_schema() {
        let pool = pool_with_event();
        let mut row = sample_milestone("m1", "2026-11-01T00:00:00Z", 0);
        row.is_completed = true;
        assert!(create_milestone(&pool, &row).is_err());
    }

    #[test]
    fn test_missing_milestone() {
        let pool = pool_with_event();
        assert!(matches!(get_milestone(&pool, "x"), Err(DbError::NotFound(_))));
        assert!(matches!(set_milestone_completed(&pool, "x", None), Err(DbError::NotFound(_))));
        assert!(!delete_milestone(&pool, "x").unwrap());
    }
}
