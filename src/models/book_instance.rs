//! Book instance (physical copy) model and the loan status codes.
//!
//! Status is stored as a 1-char code in the database. Any status can be set
//! by an administrative update; there is deliberately no enforced transition
//! table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Loan status of a book instance.
/// DB codes: m = Maintenance, o = OnLoan, a = Available, r = Reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    /// All statuses, in display order
    pub const ALL: [LoanStatus; 4] = [
        LoanStatus::Maintenance,
        LoanStatus::OnLoan,
        LoanStatus::Available,
        LoanStatus::Reserved,
    ];

    /// One-char code stored in the database
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            _ => Err(format!("Invalid loan status code: {}", s)),
        }
    }
}

// SQLx conversion for LoanStatus (stored as CHAR(1))
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.trim().parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_code().to_string(), buf)
    }
}

/// Status code with its label, for display alongside book details
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusLabel {
    pub code: String,
    pub label: String,
}

impl From<LoanStatus> for StatusLabel {
    fn from(s: LoanStatus) -> Self {
        StatusLabel {
            code: s.as_code().to_string(),
            label: s.label().to_string(),
        }
    }
}

/// A physical, individually trackable copy of a book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    /// Unique ID across the whole library, generated at creation
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    /// Meaningful only while the instance is on loan
    pub due_back: Option<NaiveDate>,
    /// Nulled when the borrower account is deleted
    pub borrower_id: Option<i32>,
    pub status: LoanStatus,
    // Computed on read, never stored
    #[sqlx(skip)]
    #[serde(default)]
    pub is_overdue: bool,
    // Populated when queried with a JOIN, None otherwise
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
}

impl BookInstance {
    /// True iff due_back is set and strictly before the given date
    pub fn overdue_on(&self, today: NaiveDate) -> bool {
        matches!(self.due_back, Some(d) if d < today)
    }
}

/// Create book instance request. Status defaults to Maintenance.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookInstance {
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: String,
    pub status: Option<LoanStatus>,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
}

/// Update book instance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookInstance {
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: String,
    pub status: LoanStatus,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
}

/// Book instance list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookInstanceQuery {
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Exact-match filter on status code (m, o, a, r)
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(due_back: Option<NaiveDate>) -> BookInstance {
        BookInstance {
            id: Uuid::new_v4(),
            book_id: 1,
            imprint: "Test Imprint".to_string(),
            due_back,
            borrower_id: None,
            status: LoanStatus::OnLoan,
            is_overdue: false,
            book_title: None,
        }
    }

    #[test]
    fn overdue_requires_due_back() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(!instance(None).overdue_on(today));
    }

    #[test]
    fn overdue_is_strictly_before_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert!(instance(Some(yesterday)).overdue_on(today));
        assert!(!instance(Some(today)).overdue_on(today));
        assert!(!instance(Some(tomorrow)).overdue_on(today));
    }

    #[test]
    fn status_codes_round_trip() {
        for status in LoanStatus::ALL {
            assert_eq!(status.as_code().parse::<LoanStatus>().unwrap(), status);
        }
    }

    #[test]
    fn default_status_is_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
    }

    #[test]
    fn invalid_status_code_rejected() {
        assert!("x".parse::<LoanStatus>().is_err());
    }
}
