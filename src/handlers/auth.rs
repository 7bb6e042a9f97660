//! Login, registration, and logout pages. These are the only routes
//! reachable without a session; failures surface as one-time flash
//! messages on the next rendered page, never as error payloads.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::AppError;
use crate::session::{self, Flash};
use crate::{auth, pages, AppState};

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// GET /login
pub async fn login_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = session::take_flash(jar);
    (jar, Html(pages::login_page(flash)))
}

/// POST /login - establish a session on success; otherwise flash
/// "Invalid credentials" and return to the form.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    match auth::login(&state.pool, &form.username, &form.password).await {
        Ok(user) => {
            let token = auth::issue_token(
                &state.config.session.secret,
                state.config.session.ttl_hours,
                &user,
            )?;
            let jar = jar.add(session::session_cookie(token));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            tracing::debug!(username = %form.username, "login rejected");
            let jar = session::set_flash(jar, Flash::InvalidCredentials);
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /register
pub async fn register_form(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = session::take_flash(jar);
    (jar, Html(pages::register_page(flash)))
}

/// POST /register - create the account and send the user to the login
/// page; does not log the user in.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    match auth::register(&state.pool, &form.username, &form.password).await {
        Ok(_) => {
            let jar = session::set_flash(jar, Flash::Registered);
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(AppError::DuplicateUser) => {
            let jar = session::set_flash(jar, Flash::DuplicateUser);
            Ok((jar, Redirect::to("/register")).into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /logout - clears the session unconditionally; idempotent, so it
/// sits outside the auth gate.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (session::clear_session(jar), Redirect::to("/login"))
}
