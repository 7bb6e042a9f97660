//! The static hello page. No state, no auth, one route.

use axum::response::Html;

pub async fn page() -> Html<&'static str> {
    Html(PAGE)
}

const PAGE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>Hello</title>
        <style>
            body {
                background: linear-gradient(135deg, #4b6cb7, #182848);
                color: #fff;
                font-family: 'Segoe UI', sans-serif;
                display: flex;
                flex-direction: column;
                justify-content: center;
                align-items: center;
                height: 100vh;
                margin: 0;
            }
            h1 {
                font-size: 3em;
                margin-bottom: 0.3em;
                text-shadow: 2px 2px 5px rgba(0,0,0,0.3);
            }
            p {
                font-size: 1.3em;
                color: #e0e0e0;
            }
        </style>
    </head>
    <body>
        <h1>Welcome!</h1>
        <p>This page is served live by a tiny Rust web server.</p>
    </body>
</html>
"#;
