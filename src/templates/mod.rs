//! HTML rendering.
//!
//! Pages are built from small string helpers; every value that came from a
//! user goes through [`escape`].

mod accounts;
mod clients;
mod entries;
mod projects;

pub use accounts::login_page;
pub use clients::{client_detail_page, clients_page};
pub use entries::entries_page;
pub use projects::{project_detail_page, projects_page};

use crate::forms::FormErrors;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Wrap page content in the site chrome. `username` is shown in the nav
/// when someone is logged in.
pub fn layout(title: &str, username: Option<&str>, content: &str) -> String {
    let nav = match username {
        Some(username) => format!(
            r#"<nav>
  <a href="/clients">Clients</a>
  <a href="/projects">Projects</a>
  <a href="/entries">Entries</a>
  <span class="user">{}</span>
  <a href="/logout">Log out</a>
</nav>"#,
            escape(username)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
</head>
<body>
{nav}
<main>
<h1>{title}</h1>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn not_found() -> String {
    layout("Not Found", None, "<p>The requested page was not found.</p>")
}

pub fn server_error() -> String {
    layout("Server Error", None, "<p>Something went wrong. Please try again.</p>")
}

pub(crate) fn non_field_errors(errors: &FormErrors) -> String {
    error_list(errors.non_field())
}

pub(crate) fn field_errors(errors: &FormErrors, field: &str) -> String {
    error_list(errors.field(field))
}

fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!(r#"<ul class="errorlist">{items}</ul>"#)
}

/// A labelled `<input>` followed by its errors.
pub(crate) fn input(
    errors: &FormErrors,
    name: &str,
    label: &str,
    kind: &str,
    value: &str,
) -> String {
    format!(
        r#"<p>
  <label for="id_{name}">{label}</label>
  <input type="{kind}" name="{name}" id="id_{name}" value="{value}">
  {errors}
</p>"#,
        label = escape(label),
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

pub(crate) fn textarea(errors: &FormErrors, name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<p>
  <label for="id_{name}">{label}</label>
  <textarea name="{name}" id="id_{name}">{value}</textarea>
  {errors}
</p>"#,
        label = escape(label),
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

/// A `<select>` over `(id, label)` options with `selected` preselected.
pub(crate) fn select(
    errors: &FormErrors,
    name: &str,
    label: &str,
    options: &[(i64, String)],
    selected: &str,
) -> String {
    let mut html = String::from(r#"<option value="">---------</option>"#);
    for (id, text) in options {
        let id = id.to_string();
        let attr = if id == selected.trim() { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{id}"{attr}>{}</option>"#,
            escape(text)
        ));
    }

    format!(
        r#"<p>
  <label for="id_{name}">{label}</label>
  <select name="{name}" id="id_{name}">{html}</select>
  {errors}
</p>"#,
        label = escape(label),
        errors = field_errors(errors, name),
    )
}

pub(crate) fn form(action: &str, fields: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
{fields}
<button type="submit">{submit}</button>
</form>"#,
        action = escape(action),
        submit = escape(submit),
    )
}
