//! Minimal inline HTML rendering. No template engine; every page is a
//! small `format!` over a shared shell, with user-supplied text escaped.

use axum::http::StatusCode;

use crate::database::models::Note;
use crate::session::Flash;
use crate::weather::WeatherReport;

/// Escape text for interpolation into HTML body or attribute positions.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n<style>\n\
         body {{ font-family: 'Segoe UI', sans-serif; margin: 2em auto; max-width: 40em; color: #222; }}\n\
         form {{ margin: 1em 0; }}\n\
         input, textarea {{ display: block; margin: 0.3em 0; padding: 0.3em; width: 100%; box-sizing: border-box; }}\n\
         .inline {{ display: inline; }}\n\
         .inline input {{ display: inline; width: auto; }}\n\
         .flash {{ background: #ffef9e; padding: 0.5em; border-radius: 4px; }}\n\
         .note {{ border-bottom: 1px solid #ddd; padding: 0.5em 0; }}\n\
         </style>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn flash_banner(flash: Option<Flash>) -> String {
    match flash {
        Some(flash) => format!("<p class=\"flash\">{}</p>\n", flash.message()),
        None => String::new(),
    }
}

pub fn login_page(flash: Option<Flash>) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{flash}\
         <form method=\"post\" action=\"/login\">\n\
         <input name=\"username\" placeholder=\"Username\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <input type=\"submit\" value=\"Log in\">\n\
         </form>\n\
         <p><a href=\"/register\">Register</a></p>",
        flash = flash_banner(flash),
    );
    layout("Log in", &body)
}

pub fn register_page(flash: Option<Flash>) -> String {
    let body = format!(
        "<h1>Register</h1>\n{flash}\
         <form method=\"post\" action=\"/register\">\n\
         <input name=\"username\" placeholder=\"Username\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <input type=\"submit\" value=\"Register\">\n\
         </form>\n\
         <p><a href=\"/login\">Log in</a></p>",
        flash = flash_banner(flash),
    );
    layout("Register", &body)
}

pub fn notes_page(username: &str, notes: &[Note]) -> String {
    let mut items = String::new();
    for note in notes {
        items.push_str(&format!(
            "<div class=\"note\">\n\
             <h3>{title}</h3>\n\
             <p>{content}</p>\n\
             <small>{created_at}</small>\n\
             <form class=\"inline\" method=\"get\" action=\"/edit_note/{id}\">\
             <input type=\"submit\" value=\"Edit\"></form>\n\
             <form class=\"inline\" method=\"post\" action=\"/delete_note/{id}\">\
             <input type=\"submit\" value=\"Delete\"></form>\n\
             </div>\n",
            title = escape(&note.title),
            content = escape(&note.content),
            created_at = note.created_at.format("%Y-%m-%d %H:%M"),
            id = note.id,
        ));
    }

    let body = format!(
        "<h1>Notes</h1>\n\
         <p>Logged in as {username} &middot; <a href=\"/logout\">Log out</a></p>\n\
         <form method=\"post\" action=\"/add_note\">\n\
         <input name=\"title\" placeholder=\"Title\" required>\n\
         <textarea name=\"content\" placeholder=\"Content\"></textarea>\n\
         <input type=\"submit\" value=\"Add note\">\n\
         </form>\n\
         {items}",
        username = escape(username),
    );
    layout("Notes", &body)
}

pub fn edit_note_page(note: &Note) -> String {
    let body = format!(
        "<h1>Edit note</h1>\n\
         <form method=\"post\" action=\"/edit_note/{id}\">\n\
         <input name=\"title\" value=\"{title}\" required>\n\
         <textarea name=\"content\">{content}</textarea>\n\
         <input type=\"submit\" value=\"Save\">\n\
         </form>\n\
         <p><a href=\"/\">Back</a></p>",
        id = note.id,
        title = escape(&note.title),
        content = escape(&note.content),
    );
    layout("Edit note", &body)
}

pub fn weather_page(result: Option<Result<&WeatherReport, &str>>) -> String {
    let report = match result {
        Some(Ok(report)) => format!(
            "<h2>{location}</h2>\n\
             <p>{temp:.1} &deg;C &mdash; {description}</p>",
            location = escape(&report.location),
            temp = report.temperature_c,
            description = escape(&report.description),
        ),
        Some(Err(message)) => format!("<p class=\"flash\">{}</p>", escape(message)),
        None => String::new(),
    };

    let body = format!(
        "<h1>Weather lookup</h1>\n\
         <form method=\"post\" action=\"/\">\n\
         <input name=\"city\" placeholder=\"City name\" required>\n\
         <input type=\"submit\" value=\"Look up\">\n\
         </form>\n\
         {report}"
    );
    layout("Weather", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{code} {reason}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Home</a></p>",
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape(message),
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>alert(\"x\")</script> & 'q'"),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;q&#39;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_login_page_renders_flash() {
        let page = login_page(Some(Flash::InvalidCredentials));
        assert!(page.contains("Invalid credentials"));
        assert!(page.contains("action=\"/login\""));
        assert!(!login_page(None).contains("class=\"flash\""));
    }

    #[test]
    fn test_notes_page_escapes_user_content() {
        let note = Note {
            id: 1,
            user_id: 1,
            title: "<b>t</b>".to_string(),
            content: "c & c".to_string(),
            created_at: chrono::Utc::now(),
        };
        let page = notes_page("alice", std::slice::from_ref(&note));
        assert!(page.contains("&lt;b&gt;t&lt;/b&gt;"));
        assert!(page.contains("c &amp; c"));
        assert!(page.contains("/delete_note/1"));
    }
}
