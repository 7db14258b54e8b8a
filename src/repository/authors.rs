//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
};

/// Map a requested ordering field to a safe ORDER BY clause.
/// Default ordering is (last_name, first_name).
fn order_clause(order_by: Option<&str>) -> &'static str {
    match order_by {
        Some("first_name") => "first_name, last_name",
        _ => "last_name, first_name",
    }
}

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List authors with pagination
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        order_by: Option<&str>,
    ) -> AppResult<(Vec<Author>, i64)> {
        let offset = (page - 1) * page_size;

        let query = format!(
            "SELECT * FROM authors ORDER BY {} LIMIT $1 OFFSET $2",
            order_clause(order_by)
        );

        let authors = sqlx::query_as::<_, Author>(&query)
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = self.count().await?;
        Ok((authors, total))
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Create a new author
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;

        Ok(author)
    }

    /// Update an existing author
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = $1, last_name = $2, date_of_birth = $3, date_of_death = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Delete an author. Books referencing them keep existing with
    /// author_id set to NULL; a constraint failure surfaces as
    /// ReferentialIntegrity so the caller can resolve dependents first.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Author with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Count all authors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_last_name_first_name() {
        assert_eq!(order_clause(None), "last_name, first_name");
        assert_eq!(order_clause(Some("unknown")), "last_name, first_name");
    }

    #[test]
    fn first_name_order_is_whitelisted() {
        assert_eq!(order_clause(Some("first_name")), "first_name, last_name");
    }
}
