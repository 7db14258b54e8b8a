//! API integration tests
//!
//! These run against a live server (with Postgres and Redis) on
//! localhost:8080. Tokens are minted locally with the development
//! JWT secret, since authentication lives outside this service.

use chrono::{Duration, Local, Utc};
use reqwest::Client;
use serde_json::{json, Value};

use librarium_server::models::user::{Capability, UserClaims};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string())
}

/// Mint a token carrying the given capabilities
fn auth_token(user_id: i32, capabilities: Vec<Capability>) -> String {
    let now = Utc::now().timestamp();
    let claims = UserClaims {
        sub: format!("test-user-{}", user_id),
        user_id,
        capabilities,
        exp: now + 3600,
        iat: now,
    };
    claims.create_token(&jwt_secret()).expect("Failed to mint token")
}

fn librarian_token() -> String {
    auth_token(
        1,
        vec![
            Capability::MarkReturned,
            Capability::AddAuthor,
            Capability::ChangeAuthor,
            Capability::DeleteAuthor,
        ],
    )
}

/// Create a book through the API, returning its ID
async fn create_book(client: &Client, token: &str, title: &str, isbn: &str) -> i32 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "summary": "Test summary",
            "isbn": isbn,
            "genre_ids": []
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response") as i32
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_summary_counts_visits_per_session() {
    // Cookie store keeps the session id across requests
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client");

    let first: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let second: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let v1 = first["num_visits"].as_i64().expect("No num_visits");
    let v2 = second["num_visits"].as_i64().expect("No num_visits");
    assert_eq!(v2, v1 + 1);

    // A fresh session starts its own counter
    let other = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client");

    let fresh: Value = other
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(fresh["num_visits"].as_i64(), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_summary_has_catalog_counts() {
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert!(body["num_books"].is_i64());
    assert!(body["num_instances"].is_i64());
    assert!(body["num_instances_available"].is_i64());
    assert!(body["num_authors"].is_i64());
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_auth() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Unauthenticated",
            "summary": "",
            "isbn": "9780000000001"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_book_crud_flow() {
    let client = Client::new();
    let token = librarian_token();

    let id = create_book(&client, &token, "Crime and Punishment", "9780140449136").await;

    // Detail view carries related entities and status labels
    let detail: Value = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(detail["title"], "Crime and Punishment");
    assert!(detail["instances"].is_array());
    assert_eq!(detail["status_labels"].as_array().map(|a| a.len()), Some(4));

    // Update
    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Crime and Punishment (revised)",
            "summary": "Updated summary",
            "isbn": "9780140449136",
            "genre_ids": []
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Gone
    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_is_a_conflict() {
    let client = Client::new();
    let token = librarian_token();

    // Unique per run so reruns do not trip over earlier data
    let isbn = format!("97{:011}", Utc::now().timestamp_millis() % 100_000_000_000);
    create_book(&client, &token, "First printing", &isbn).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Second printing",
            "summary": "",
            "isbn": isbn,
            "genre_ids": []
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
#[ignore]
async fn test_book_validation_rejects_bad_isbn() {
    let client = Client::new();
    let token = librarian_token();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Short ISBN",
            "summary": "",
            "isbn": "123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["field"], "isbn");
}

#[tokio::test]
#[ignore]
async fn test_book_delete_blocked_by_instances() {
    let client = Client::new();
    let token = librarian_token();

    let book_id = create_book(&client, &token, "Held by a copy", "9780000000002").await;

    let response = client
        .post(format!("{}/books/{}/instances", BASE_URL, book_id))
        .bearer_auth(&token)
        .json(&json!({ "imprint": "First edition, 2020" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Deleting the book while a copy exists is a referential conflict
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_instance_defaults_to_maintenance() {
    let client = Client::new();
    let token = librarian_token();

    let book_id = create_book(&client, &token, "Fresh copy", "9780000000003").await;

    let response = client
        .post(format!("{}/books/{}/instances", BASE_URL, book_id))
        .bearer_auth(&token)
        .json(&json!({ "imprint": "Penguin Classics, 2003" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "m");
    assert_eq!(body["is_overdue"], false);
}

#[tokio::test]
#[ignore]
async fn test_instance_list_rejects_unknown_status_code() {
    let client = Client::new();

    let response = client
        .get(format!("{}/instances?status=x", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["field"], "status");
}

#[tokio::test]
#[ignore]
async fn test_renewal_requires_capability() {
    let client = Client::new();
    let token = librarian_token();

    let book_id = create_book(&client, &token, "Renewable", "9780000000004").await;
    let instance: Value = client
        .post(format!("{}/books/{}/instances", BASE_URL, book_id))
        .bearer_auth(&token)
        .json(&json!({ "imprint": "Hardcover, 1999", "status": "o" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let instance_id = instance["id"].as_str().expect("No instance id");

    let patron = auth_token(42, vec![]);
    let response = client
        .get(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .bearer_auth(&patron)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_renewal_flow() {
    let client = Client::new();
    let token = librarian_token();

    let book_id = create_book(&client, &token, "Out on loan", "9780000000005").await;
    let instance: Value = client
        .post(format!("{}/books/{}/instances", BASE_URL, book_id))
        .bearer_auth(&token)
        .json(&json!({ "imprint": "Paperback, 2010", "status": "o" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let instance_id = instance["id"].as_str().expect("No instance id").to_string();

    // The form proposes today + 3 weeks
    let proposal: Value = client
        .get(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let expected = (Local::now().date_naive() + Duration::weeks(3))
        .format("%Y-%m-%d")
        .to_string();
    assert_eq!(proposal["renewal_date"], expected.as_str());

    // Missing date comes back as a field-level error
    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["field"], "renewal_date");

    // Malformed date too
    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .bearer_auth(&token)
        .json(&json!({ "renewal_date": "next tuesday" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // A valid date sets due_back
    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .bearer_auth(&token)
        .json(&json!({ "renewal_date": expected }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["due_back"], expected.as_str());
}

#[tokio::test]
#[ignore]
async fn test_author_mutations_are_capability_gated() {
    let client = Client::new();

    // Authenticated but without author capabilities
    let patron = auth_token(42, vec![Capability::MarkReturned]);
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(&patron)
        .json(&json!({ "first_name": "Fyodor", "last_name": "Dostoevsky" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // add_author alone permits create but not delete
    let adder = auth_token(43, vec![Capability::AddAuthor]);
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(&adder)
        .json(&json!({ "first_name": "Fyodor", "last_name": "Dostoevsky" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let author_id = body["id"].as_i64().expect("No author id");

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .bearer_auth(&adder)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Clean up with the full token
    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .bearer_auth(&librarian_token())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_author_list_is_public() {
    let client = Client::new();

    let response = client
        .get(format!("{}/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_i64());
    assert_eq!(body["per_page"].as_i64(), Some(10));
}

#[tokio::test]
#[ignore]
async fn test_my_loans_lists_only_own_books() {
    let client = Client::new();
    let token = librarian_token();

    // Register a borrower and loan them a copy
    let user: Value = client
        .post(format!("{}/users", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "username": format!("borrower-{}", Utc::now().timestamp_millis()) }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let user_id = user["id"].as_i64().expect("No user id") as i32;

    let book_id = create_book(&client, &token, "Borrowed book", "9780000000006").await;
    let due = (Local::now().date_naive() + Duration::weeks(2))
        .format("%Y-%m-%d")
        .to_string();
    let response = client
        .post(format!("{}/books/{}/instances", BASE_URL, book_id))
        .bearer_auth(&token)
        .json(&json!({
            "imprint": "Library binding, 2015",
            "status": "o",
            "due_back": due,
            "borrower_id": user_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let borrower = auth_token(user_id, vec![]);
    let loans: Value = client
        .get(format!("{}/loans/my", BASE_URL))
        .bearer_auth(&borrower)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let items = loans.as_array().expect("Expected array");
    assert!(!items.is_empty());
    for item in items {
        assert_eq!(item["status"], "o");
        assert_eq!(item["borrower_id"].as_i64(), Some(user_id as i64));
    }
}

#[tokio::test]
#[ignore]
async fn test_my_loans_sorted_by_due_date_nulls_last() {
    let client = Client::new();
    let token = librarian_token();

    let user: Value = client
        .post(format!("{}/users", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "username": format!("sorter-{}", Utc::now().timestamp_millis()) }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let user_id = user["id"].as_i64().expect("No user id") as i32;

    let isbn = format!("97{:011}", (Utc::now().timestamp_millis() + 1) % 100_000_000_000);
    let book_id = create_book(&client, &token, "Sorted loans", &isbn).await;

    let later = (Local::now().date_naive() + Duration::weeks(4))
        .format("%Y-%m-%d")
        .to_string();
    let earlier = (Local::now().date_naive() + Duration::weeks(1))
        .format("%Y-%m-%d")
        .to_string();

    // Loaned in an order that differs from the due dates, plus one copy
    // with no due date at all
    for due in [Some(&later), Some(&earlier), None] {
        let response = client
            .post(format!("{}/books/{}/instances", BASE_URL, book_id))
            .bearer_auth(&token)
            .json(&json!({
                "imprint": "Library binding, 2015",
                "status": "o",
                "due_back": due,
                "borrower_id": user_id
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let borrower = auth_token(user_id, vec![]);
    let loans: Value = client
        .get(format!("{}/loans/my", BASE_URL))
        .bearer_auth(&borrower)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let due_backs: Vec<Value> = loans
        .as_array()
        .expect("Expected array")
        .iter()
        .map(|i| i["due_back"].clone())
        .collect();

    assert_eq!(due_backs.len(), 3);
    assert_eq!(due_backs[0], earlier.as_str());
    assert_eq!(due_backs[1], later.as_str());
    assert!(due_backs[2].is_null());
}

#[tokio::test]
#[ignore]
async fn test_all_borrowed_requires_mark_returned() {
    let client = Client::new();

    let patron = auth_token(42, vec![]);
    let response = client
        .get(format!("{}/loans/borrowed", BASE_URL))
        .bearer_auth(&patron)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/loans/borrowed", BASE_URL))
        .bearer_auth(&librarian_token())
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_author_delete_orphans_books() {
    let client = Client::new();
    let token = librarian_token();

    let author: Value = client
        .post(format!("{}/authors", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "first_name": "Ephemeral", "last_name": "Author" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let author_id = author["id"].as_i64().expect("No author id");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Orphaned book",
            "author_id": author_id,
            "summary": "",
            "isbn": "9780000000007",
            "genre_ids": []
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book id");

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // The book survives with a null author
    let detail: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(detail["title"], "Orphaned book");
    assert!(detail["author_id"].is_null());
    assert!(detail["author"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_genre_uniqueness_conflict() {
    let client = Client::new();
    let token = librarian_token();

    let name = format!("genre-{}", Utc::now().timestamp_millis());
    let response = client
        .post(format!("{}/genres", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/genres", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}
