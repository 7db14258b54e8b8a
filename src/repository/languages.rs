//! Languages repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::language::{CreateLanguage, Language, UpdateLanguage},
};

#[derive(Clone)]
pub struct LanguagesRepository {
    pool: Pool<Postgres>,
}

impl LanguagesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List languages with pagination, ordered by name
    pub async fn list(&self, page: i64, page_size: i64) -> AppResult<(Vec<Language>, i64)> {
        let offset = (page - 1) * page_size;

        let languages = sqlx::query_as::<_, Language>(
            "SELECT * FROM languages ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = self.count().await?;
        Ok((languages, total))
    }

    /// Get language by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Language> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Language with id {} not found", id)))
    }

    /// Create a new language
    pub async fn create(&self, data: &CreateLanguage) -> AppResult<Language> {
        let language = sqlx::query_as::<_, Language>(
            "INSERT INTO languages (name) VALUES ($1) RETURNING *",
        )
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(language)
    }

    /// Update an existing language
    pub async fn update(&self, id: i32, data: &UpdateLanguage) -> AppResult<Language> {
        sqlx::query_as::<_, Language>(
            "UPDATE languages SET name = $1 WHERE id = $2 RETURNING *",
        )
        .bind(&data.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Language with id {} not found", id)))
    }

    /// Delete a language. Books referencing it get language_id set to NULL.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM languages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Language with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Count all languages
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
