use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::database::users;
use crate::error::AppError;
use crate::{auth, session, AppState};

/// Authenticated user context resolved from the session cookie.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Gate for all CRUD routes: resolves the session cookie to a user and
/// injects it into request extensions. Any failure short of a database
/// error redirects to the login page.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(session::SESSION_COOKIE) else {
        return Redirect::to("/login").into_response();
    };

    let claims = match auth::decode_token(&state.config.session.secret, cookie.value()) {
        Ok(claims) => claims,
        Err(_) => return Redirect::to("/login").into_response(),
    };

    // The token only names a user id; confirm the row still exists.
    let user = match users::find_by_id(&state.pool, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(e) => return AppError::from(e).into_response(),
    };

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });

    next.run(request).await
}
