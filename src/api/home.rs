//! Home summary endpoint

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use crate::{error::AppResult, services::home::HomeSummary};

/// Session cookie carrying the visit-counter key
const SESSION_COOKIE: &str = "librarium_session";

/// Read the session id from the cookie jar, issuing a fresh one when absent
fn ensure_session(jar: CookieJar) -> (CookieJar, String) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let id = cookie.value().to_string();
        return (jar, id);
    }

    let id = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .build();
    (jar.add(cookie), id)
}

/// Home summary: catalog counts plus the per-session visit counter
#[utoipa::path(
    get,
    path = "/summary",
    tag = "home",
    responses(
        (status = 200, description = "Catalog counts and visit counter", body = HomeSummary)
    )
)]
pub async fn summary(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<HomeSummary>)> {
    let (jar, session_id) = ensure_session(jar);
    let summary = state.services.home.summary(&session_id).await?;
    Ok((jar, Json(summary)))
}
