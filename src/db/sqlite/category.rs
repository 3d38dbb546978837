//! SQLite CategoryRepository implementation.

use sqlx::{Row, SqlitePool};
use sqlx::sqlite::SqliteRow;

use crate::db::{Category, CategoryRepository, DbError, DbResult};

/// SQLx-backed category repository.
pub struct SqliteCategoryRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn category_from_row(row: &SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        kind: row.get("type"),
    }
}

impl<'a> CategoryRepository for SqliteCategoryRepository<'a> {
    async fn get(&self, id: i64) -> DbResult<Category> {
        let row = sqlx::query("SELECT id, type FROM category WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.as_ref()
            .map(category_from_row)
            .ok_or_else(|| DbError::not_found("Category", id))
    }

    async fn list(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, type FROM category ORDER BY id ASC")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }
}
