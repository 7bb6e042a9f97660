//! Authenticated note CRUD. Every route runs behind `require_auth` and
//! receives the resolved `CurrentUser`; every query is scoped to that
//! user's id.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use serde::Deserialize;

use crate::database::notes;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::{pages, AppState};

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
}

/// GET / - the current user's notes, in storage order.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let notes = notes::list_for_user(&state.pool, user.id).await?;
    Ok(Html(pages::notes_page(&user.username, &notes)))
}

/// POST /add_note
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, AppError> {
    notes::insert(&state.pool, user.id, &form.title, &form.content).await?;
    Ok(Redirect::to("/"))
}

/// GET /edit_note/:id - a missing or non-owned note is treated as not
/// found and sent back to the list.
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    match notes::find_owned(&state.pool, id, user.id).await? {
        Some(note) => Ok(Html(pages::edit_note_page(&note)).into_response()),
        None => Ok(Redirect::to("/").into_response()),
    }
}

/// POST /edit_note/:id - the owner filter makes a non-owned id update
/// zero rows; the response is the same redirect either way.
pub async fn edit(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, AppError> {
    let rows = notes::update_owned(&state.pool, id, user.id, &form.title, &form.content).await?;
    if rows == 0 {
        tracing::debug!(note_id = id, user_id = user.id, "edit matched no rows");
    }
    Ok(Redirect::to("/"))
}

/// POST /delete_note/:id - silent no-op for missing or non-owned ids.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let rows = notes::delete_owned(&state.pool, id, user.id).await?;
    if rows == 0 {
        tracing::debug!(note_id = id, user_id = user.id, "delete matched no rows");
    }
    Ok(Redirect::to("/"))
}
