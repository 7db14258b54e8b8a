//! Book instances repository for database operations.
//!
//! Instances carry the loan state (status, due_back, borrower) and the
//! overdue flag is recomputed on every read, never stored.

use chrono::{Local, NaiveDate};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{
        BookInstance, CreateBookInstance, LoanStatus, UpdateBookInstance,
    },
};

fn with_overdue(mut instance: BookInstance) -> BookInstance {
    instance.is_overdue = instance.overdue_on(Local::now().date_naive());
    instance
}

fn all_with_overdue(instances: Vec<BookInstance>) -> Vec<BookInstance> {
    let today = Local::now().date_naive();
    instances
        .into_iter()
        .map(|mut i| {
            i.is_overdue = i.overdue_on(today);
            i
        })
        .collect()
}

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List instances with pagination and an optional exact status filter,
    /// joined with book titles for display.
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        status: Option<LoanStatus>,
    ) -> AppResult<(Vec<BookInstance>, i64)> {
        let offset = (page - 1) * page_size;

        let instances = match status {
            Some(s) => {
                sqlx::query_as::<_, BookInstance>(
                    r#"
                    SELECT bi.*, b.title as book_title
                    FROM book_instances bi
                    JOIN books b ON bi.book_id = b.id
                    WHERE bi.status = $1
                    ORDER BY b.title, bi.id
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(s)
                .bind(page_size)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, BookInstance>(
                    r#"
                    SELECT bi.*, b.title as book_title
                    FROM book_instances bi
                    JOIN books b ON bi.book_id = b.id
                    ORDER BY b.title, bi.id
                    LIMIT $1 OFFSET $2
                    "#,
                )
                .bind(page_size)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let total = match status {
            Some(s) => self.count_by_status(s).await?,
            None => self.count().await?,
        };

        Ok((all_with_overdue(instances), total))
    }

    /// Get instance by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        let instance = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT bi.*, b.title as book_title
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            WHERE bi.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))?;

        Ok(with_overdue(instance))
    }

    /// Create a new instance for a book. Status defaults to Maintenance,
    /// the ID is generated here.
    pub async fn create(&self, book_id: i32, data: &CreateBookInstance) -> AppResult<BookInstance> {
        let id = Uuid::new_v4();
        let status = data.status.unwrap_or_default();

        let instance = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, borrower_id, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(book_id)
        .bind(&data.imprint)
        .bind(data.due_back)
        .bind(data.borrower_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(with_overdue(instance))
    }

    /// Update an instance. Any status value is accepted; there is no
    /// enforced transition table.
    pub async fn update(&self, id: Uuid, data: &UpdateBookInstance) -> AppResult<BookInstance> {
        let instance = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET imprint = $1, due_back = $2, borrower_id = $3, status = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&data.imprint)
        .bind(data.due_back)
        .bind(data.borrower_id)
        .bind(data.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))?;

        Ok(with_overdue(instance))
    }

    /// Delete an instance
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book instance {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Set a new due date on an instance. Runs in a transaction with a row
    /// lock so concurrent renewals of the same instance serialize; status
    /// is left unchanged.
    pub async fn renew(&self, id: Uuid, new_due_date: NaiveDate) -> AppResult<BookInstance> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM book_instances WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))?;

        let instance = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET due_back = $1
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(new_due_date)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(with_overdue(instance))
    }

    /// Instances on loan to a given borrower, earliest due date first.
    /// Instances without a due date sort last.
    pub async fn list_borrowed_by_user(&self, user_id: i32) -> AppResult<Vec<BookInstance>> {
        let instances = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT bi.*, b.title as book_title
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            WHERE bi.borrower_id = $1 AND bi.status = 'o'
            ORDER BY bi.due_back ASC NULLS LAST
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(all_with_overdue(instances))
    }

    /// All instances currently on loan, earliest due date first
    pub async fn list_all_on_loan(&self) -> AppResult<Vec<BookInstance>> {
        let instances = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT bi.*, b.title as book_title
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            WHERE bi.status = 'o'
            ORDER BY bi.due_back ASC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(all_with_overdue(instances))
    }

    /// Count all instances
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count instances with a given status
    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
