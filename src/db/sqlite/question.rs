//! SQLite QuestionRepository implementation.
//!
//! `list` is the query layer behind every question endpoint: the optional
//! filters of a [`QuestionQuery`] are AND-ed together. Category and exclusion
//! run in SQL; the substring search runs on the fetched rows because SQLite
//! only folds ASCII case.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{BindValue, build_limit_offset_clause};
use crate::db::{
    DbError, DbResult, ListResult, MAX_DIFFICULTY, MIN_DIFFICULTY, NewQuestion, Question,
    QuestionQuery, QuestionRepository,
};

/// SQLx-backed question repository.
pub struct SqliteQuestionRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn question_from_row(row: &SqliteRow) -> Question {
    Question {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        difficulty: row.get("difficulty"),
    }
}

/// Translate the SQL-side filters into a WHERE clause plus its bind values.
///
/// The exclusion list is bound once as a JSON array so its length is not
/// limited by SQLite's bound-variable cap.
fn build_where_clause(query: &QuestionQuery) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = vec![];
    let mut bind_values: Vec<BindValue> = vec![];

    if let Some(category) = query.category {
        conditions.push("category = ?".to_string());
        bind_values.push(BindValue::Int(category));
    }

    if !query.exclude.is_empty() {
        conditions.push("id NOT IN (SELECT value FROM json_each(?))".to_string());
        bind_values.push(BindValue::Text(
            serde_json::Value::from(query.exclude.clone()).to_string(),
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// Case-insensitive substring test using full Unicode lowercasing.
fn contains_ignoring_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl<'a> SqliteQuestionRepository<'a> {
    async fn fetch(
        &self,
        where_clause: &str,
        bind_values: &[BindValue],
        limit_clause: &str,
    ) -> DbResult<Vec<Question>> {
        let sql = format!(
            "SELECT id, question, answer, category, difficulty FROM question {} ORDER BY id ASC{}",
            where_clause, limit_clause
        );

        let mut sql_query = sqlx::query(&sql);
        for value in bind_values {
            sql_query = match value {
                BindValue::Int(v) => sql_query.bind(*v),
                BindValue::Text(v) => sql_query.bind(v.as_str()),
            };
        }

        let rows = sql_query.fetch_all(self.pool).await?;
        Ok(rows.iter().map(question_from_row).collect())
    }

    async fn count(&self, where_clause: &str, bind_values: &[BindValue]) -> DbResult<usize> {
        let count_sql = format!("SELECT COUNT(*) FROM question {}", where_clause);

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in bind_values {
            count_query = match value {
                BindValue::Int(v) => count_query.bind(*v),
                BindValue::Text(v) => count_query.bind(v.as_str()),
            };
        }

        let total: i64 = count_query.fetch_one(self.pool).await?;
        Ok(total as usize)
    }
}

impl<'a> QuestionRepository for SqliteQuestionRepository<'a> {
    async fn create(&self, question: &NewQuestion) -> DbResult<Question> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&question.difficulty) {
            return Err(DbError::Validation {
                message: format!(
                    "difficulty must be between {} and {}",
                    MIN_DIFFICULTY, MAX_DIFFICULTY
                ),
            });
        }

        let result = sqlx::query(
            "INSERT INTO question (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(self.pool)
        .await?;

        Ok(Question {
            id: result.last_insert_rowid(),
            question: question.question.clone(),
            answer: question.answer.clone(),
            category: question.category,
            difficulty: question.difficulty,
        })
    }

    async fn get(&self, id: i64) -> DbResult<Question> {
        let row = sqlx::query(
            "SELECT id, question, answer, category, difficulty FROM question WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref()
            .map(question_from_row)
            .ok_or_else(|| DbError::not_found("Question", id))
    }

    async fn list(&self, query: Option<&QuestionQuery>) -> DbResult<ListResult<Question>> {
        let default_query = QuestionQuery::default();
        let query = query.unwrap_or(&default_query);

        let (where_clause, bind_values) = build_where_clause(query);
        let offset = query.page.offset.unwrap_or(0);

        let Some(term) = query.search.as_deref() else {
            let limit_clause = build_limit_offset_clause(&query.page);
            let items = self.fetch(&where_clause, &bind_values, &limit_clause).await?;
            let total = self.count(&where_clause, &bind_values).await?;

            return Ok(ListResult {
                items,
                total,
                limit: query.page.limit,
                offset,
            });
        };

        let needle = term.to_lowercase();
        let matches: Vec<Question> = self
            .fetch(&where_clause, &bind_values, "")
            .await?
            .into_iter()
            .filter(|q| contains_ignoring_case(&q.question, &needle))
            .collect();

        let total = matches.len();
        let items = matches
            .into_iter()
            .skip(offset)
            .take(query.page.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(ListResult {
            items,
            total,
            limit: query.page.limit,
            offset,
        })
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM question WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Question", id));
        }

        Ok(())
    }
}
