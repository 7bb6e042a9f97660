// End-to-end scenarios against a real PostgreSQL instance. These gate
// on TEST_DATABASE_URL and skip silently when it is unset, so the rest
// of the suite stays runnable without infrastructure.

mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::Router;
use sqlx::PgPool;
use webdemos::{notes_app, AppState};

async fn db_app() -> Option<(Router, PgPool)> {
    let pool = common::test_pool().await?;
    let app = notes_app(AppState {
        pool: pool.clone(),
        config: Arc::new(common::test_config()),
    });
    Some((app, pool))
}

fn credentials(username: &str, password: &str) -> String {
    format!("username={username}&password={password}")
}

async fn register(app: &Router, username: &str, password: &str) {
    let res = common::post_form(app, "/register", &credentials(username, password), None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), Some("/login"));
}

/// Register and log in, returning the session cookie.
async fn login(app: &Router, username: &str, password: &str) -> String {
    let res = common::post_form(app, "/login", &credentials(username, password), None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), Some("/"), "login should succeed");
    common::set_cookie(&res, "session").expect("session cookie")
}

async fn note_ids(pool: &PgPool, username: &str) -> Vec<i64> {
    sqlx::query_scalar::<_, i64>(
        "SELECT n.id FROM notes n JOIN users u ON u.id = n.user_id WHERE u.username = $1",
    )
    .bind(username)
    .fetch_all(pool)
    .await
    .expect("note ids query")
}

#[tokio::test]
async fn register_once_then_duplicate_fails() -> Result<()> {
    let Some((app, _pool)) = db_app().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };

    let alice = common::unique("alice");
    register(&app, &alice, "pw1").await;
    let _session = login(&app, &alice, "pw1").await;

    // Second registration with the same username is rejected with the
    // duplicate-user flash, back to the register form.
    let res = common::post_form(&app, "/register", &credentials(&alice, "pw2"), None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), Some("/register"));
    assert_eq!(
        common::set_cookie(&res, "flash").as_deref(),
        Some("flash=duplicate-user")
    );

    Ok(())
}

#[tokio::test]
async fn wrong_password_rejected_without_session() -> Result<()> {
    let Some((app, _pool)) = db_app().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };

    let alice = common::unique("alice");
    register(&app, &alice, "pw1").await;

    let res = common::post_form(&app, "/login", &credentials(&alice, "wrong-password"), None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), Some("/login"));
    assert!(common::set_cookie(&res, "session").is_none(), "no session on failure");
    assert_eq!(
        common::set_cookie(&res, "flash").as_deref(),
        Some("flash=invalid-credentials")
    );

    Ok(())
}

#[tokio::test]
async fn note_crud_flow() -> Result<()> {
    let Some((app, pool)) = db_app().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };

    let alice = common::unique("alice");
    register(&app, &alice, "pw1").await;
    let session = login(&app, &alice, "pw1").await;

    // Create one note and see exactly it in the list.
    let res = common::post_form(&app, "/add_note", "title=t1&content=c1", Some(&session)).await;
    assert_eq!(common::location(&res), Some("/"));

    let res = common::get_with_cookie(&app, "/", &session).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_text(res).await;
    assert!(body.contains("t1"));
    assert!(body.contains("c1"));

    let ids = note_ids(&pool, &alice).await;
    assert_eq!(ids.len(), 1, "list should hold exactly one note");
    let id = ids[0];

    // Edit form renders the stored values.
    let res = common::get_with_cookie(&app, &format!("/edit_note/{id}"), &session).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_text(res).await;
    assert!(body.contains("value=\"t1\""));

    // Update and observe the change.
    let res = common::post_form(
        &app,
        &format!("/edit_note/{id}"),
        "title=t2&content=c2",
        Some(&session),
    )
    .await;
    assert_eq!(common::location(&res), Some("/"));

    let res = common::get_with_cookie(&app, "/", &session).await;
    let body = common::body_text(res).await;
    assert!(body.contains("t2"));
    assert!(!body.contains("t1"));

    // Delete and the list is empty again.
    let res = common::post_form(&app, &format!("/delete_note/{id}"), "", Some(&session)).await;
    assert_eq!(common::location(&res), Some("/"));
    assert!(note_ids(&pool, &alice).await.is_empty());

    Ok(())
}

#[tokio::test]
async fn non_owner_edit_and_delete_are_silent_no_ops() -> Result<()> {
    let Some((app, pool)) = db_app().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };

    let bob = common::unique("bob");
    register(&app, &bob, "pw-bob").await;
    let bob_session = login(&app, &bob, "pw-bob").await;
    let res = common::post_form(&app, "/add_note", "title=bobs&content=secret", Some(&bob_session)).await;
    assert_eq!(common::location(&res), Some("/"));
    let bob_note = note_ids(&pool, &bob).await[0];

    let alice = common::unique("alice");
    register(&app, &alice, "pw1").await;
    let alice_session = login(&app, &alice, "pw1").await;

    // Alice cannot see Bob's note.
    let res = common::get_with_cookie(&app, "/", &alice_session).await;
    let body = common::body_text(res).await;
    assert!(!body.contains("bobs"));

    // Editing it redirects to the list without rendering a form.
    let res = common::get_with_cookie(&app, &format!("/edit_note/{bob_note}"), &alice_session).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), Some("/"));

    // Updates and deletes are the standard redirect and change nothing.
    let res = common::post_form(
        &app,
        &format!("/edit_note/{bob_note}"),
        "title=hijack&content=x",
        Some(&alice_session),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), Some("/"));

    let res = common::post_form(
        &app,
        &format!("/delete_note/{bob_note}"),
        "",
        Some(&alice_session),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), Some("/"));

    let (title, content): (String, String) =
        sqlx::query_as("SELECT title, content FROM notes WHERE id = $1")
            .bind(bob_note)
            .fetch_one(&pool)
            .await?;
    assert_eq!(title, "bobs");
    assert_eq!(content, "secret");

    Ok(())
}

#[tokio::test]
async fn logout_then_crud_redirects_to_login() -> Result<()> {
    let Some((app, _pool)) = db_app().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };

    let alice = common::unique("alice");
    register(&app, &alice, "pw1").await;
    let session = login(&app, &alice, "pw1").await;

    let res = common::get_with_cookie(&app, "/logout", &session).await;
    assert_eq!(common::location(&res), Some("/login"));
    let cleared = common::set_cookie_raw(&res, "session").expect("session removal cookie");
    assert!(cleared.contains("Max-Age=0") || cleared.contains("Expires="));

    // The browser no longer holds the cookie; the next CRUD request is
    // anonymous and bounces to login.
    let res = common::get(&app, "/").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), Some("/login"));

    Ok(())
}
