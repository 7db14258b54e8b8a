//! Books repository for database operations

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetail, BookShort, CreateBook, UpdateBook},
        book_instance::{LoanStatus, StatusLabel},
        genre::Genre,
        language::Language,
    },
};

/// Map a requested ordering field to a safe ORDER BY clause
fn order_clause(order_by: Option<&str>) -> &'static str {
    match order_by {
        Some("isbn") => "isbn",
        _ => "title",
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books with pagination, joined with author names for display
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        order_by: Option<&str>,
    ) -> AppResult<(Vec<BookShort>, i64)> {
        let offset = (page - 1) * page_size;

        let query = format!(
            r#"
            SELECT b.id, b.title, b.isbn,
                   CASE WHEN a.id IS NULL THEN NULL
                        ELSE a.last_name || ', ' || a.first_name END as author_name
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            ORDER BY b.{} LIMIT $1 OFFSET $2
            "#,
            order_clause(order_by)
        );

        let rows = sqlx::query(&query)
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let books = rows
            .into_iter()
            .map(|row| BookShort {
                id: row.get("id"),
                title: row.get("title"),
                isbn: row.get("isbn"),
                author_name: row.get("author_name"),
            })
            .collect();

        let total = self.count().await?;
        Ok((books, total))
    }

    /// Get book by ID (no relations)
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get full book detail: author, language, genres, instances and the
    /// set of valid status labels.
    pub async fn get_detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.get_by_id(id).await?;

        let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(book.author_id)
            .fetch_optional(&self.pool)
            .await?;

        let language = sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = $1")
            .bind(book.language_id)
            .fetch_optional(&self.pool)
            .await?;

        let genres = self.get_genres(id).await?;

        let instances = sqlx::query_as::<_, crate::models::book_instance::BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY imprint",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let today = chrono::Local::now().date_naive();
        let instances = instances
            .into_iter()
            .map(|mut i| {
                i.is_overdue = i.overdue_on(today);
                i
            })
            .collect();

        Ok(BookDetail {
            book,
            author,
            language,
            genres,
            instances,
            status_labels: LoanStatus::ALL.into_iter().map(StatusLabel::from).collect(),
        })
    }

    /// Load genres for a book via the junction table
    async fn get_genres(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    /// Create a new book with its genre links.
    /// A duplicate ISBN surfaces as Conflict from the unique constraint.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author_id, summary, isbn, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.language_id)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &data.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(book.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Update an existing book, replacing its genre links
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author_id = $2, summary = $3, isbn = $4, language_id = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.language_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for genre_id in &data.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a book. Restricted while instances reference it: the FK
    /// violation surfaces as ReferentialIntegrity and the book survives.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_clause_is_whitelisted() {
        assert_eq!(order_clause(None), "title");
        assert_eq!(order_clause(Some("isbn")), "isbn");
        assert_eq!(order_clause(Some("id; DROP TABLE books")), "title");
    }
}
