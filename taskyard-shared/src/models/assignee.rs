/// Task↔Contact join rows
///
/// The `task_assignees` table links tasks to their assignee contacts with a
/// composite primary key. Deleting either side removes the pairs via FK
/// cascade.
///
/// Replacing a task's assignee set is an explicit operation: the target id
/// list is diffed against the current join rows and only the deltas are
/// applied, inside the caller's transaction.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_assignees (
///     task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     contact_id INTEGER NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
///     PRIMARY KEY (task_id, contact_id)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor};

/// A single task→contact assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskAssignee {
    /// Task side of the pair
    pub task_id: i32,

    /// Contact side of the pair
    pub contact_id: i32,
}

impl TaskAssignee {
    /// Returns the contact ids currently assigned to a task
    pub async fn contact_ids_for_task(
        executor: impl PgExecutor<'_>,
        task_id: i32,
    ) -> Result<Vec<i32>, sqlx::Error> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT contact_id
            FROM task_assignees
            WHERE task_id = $1
            ORDER BY contact_id
            "#,
        )
        .bind(task_id)
        .fetch_all(executor)
        .await?;

        Ok(ids)
    }

    /// Computes the add/remove deltas between the current assignee set and a
    /// target id list
    ///
    /// Duplicates in the target are collapsed; order of additions follows the
    /// target list.
    pub fn deltas(current: &[i32], target: &[i32]) -> (Vec<i32>, Vec<i32>) {
        let mut to_add = Vec::new();
        for &id in target {
            if !current.contains(&id) && !to_add.contains(&id) {
                to_add.push(id);
            }
        }

        let to_remove: Vec<i32> = current
            .iter()
            .copied()
            .filter(|id| !target.contains(id))
            .collect();

        (to_add, to_remove)
    }

    /// Resynchronizes a task's assignee set to exactly `target`
    ///
    /// Reads the current join rows, then inserts and deletes only the
    /// differences. An empty target clears every assignment. Runs on the
    /// caller's connection so it participates in the handler's transaction.
    pub async fn set_for_task(
        conn: &mut PgConnection,
        task_id: i32,
        target: &[i32],
    ) -> Result<(), sqlx::Error> {
        let current = Self::contact_ids_for_task(&mut *conn, task_id).await?;
        let (to_add, to_remove) = Self::deltas(&current, target);

        if !to_remove.is_empty() {
            sqlx::query(
                r#"
                DELETE FROM task_assignees
                WHERE task_id = $1 AND contact_id = ANY($2)
                "#,
            )
            .bind(task_id)
            .bind(&to_remove)
            .execute(&mut *conn)
            .await?;
        }

        for contact_id in to_add {
            sqlx::query(
                r#"
                INSERT INTO task_assignees (task_id, contact_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(task_id)
            .bind(contact_id)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
