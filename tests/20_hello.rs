mod common;

use anyhow::Result;
use axum::http::StatusCode;
use webdemos::hello_app;

#[tokio::test]
async fn hello_page_serves() -> Result<()> {
    let app = hello_app();

    let res = common::get(&app, "/").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_text(res).await;
    assert!(body.contains("Welcome"));
    assert!(body.contains("<html>"));

    Ok(())
}

#[tokio::test]
async fn hello_app_has_single_route() -> Result<()> {
    let app = hello_app();

    let res = common::get(&app, "/anything-else").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
