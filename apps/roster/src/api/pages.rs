//! HTML rendering for the web console.
//!
//! Pages are plain strings; every value that comes from a user or from the
//! remote directory goes through [`escape`].

use super::Console;
use roster_core::{Route, User};
use std::time::Instant;

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;background:#f3f4f6}\
nav{background:#2563eb;padding:1rem;display:flex;justify-content:space-between;align-items:center;color:#fff}\
main{padding:1rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(18rem,1fr));gap:1rem}\
.card{background:#fff;padding:1rem;border-radius:.5rem;display:flex;justify-content:space-between;align-items:center}\
.card img{width:4rem;height:4rem;border-radius:50%}\
.notice{position:fixed;top:1rem;right:1rem;background:#22c55e;color:#fff;padding:.5rem 1rem;border-radius:.25rem}\
.error{color:#b91c1c}\
.pager{display:flex;justify-content:center;gap:.5rem;margin-top:1.5rem}\
.disabled{color:#9ca3af}";

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
<title>{}</title><style>{}</style></head><body>{}</body></html>\n",
        escape(title),
        STYLE,
        body
    )
}

// =============================================================================
// LOGIN
// =============================================================================

/// The login form, optionally with an error and the email typed so far.
pub fn login(error: Option<&str>, email: &str) -> String {
    let mut body = String::from("<main><h2>Login</h2>");
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>", escape(error)));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\
<input type=\"email\" name=\"email\" placeholder=\"Email\" value=\"{}\" required>\
<input type=\"password\" name=\"password\" placeholder=\"Password\" required>\
<button type=\"submit\">Login</button></form></main>",
        Route::Login.path(),
        escape(email)
    ));
    layout("Login", &body)
}

// =============================================================================
// USER LISTING
// =============================================================================

fn navbar(email: Option<&str>) -> String {
    let email = email
        .map(|e| format!("<span class=\"email\">{}</span>", escape(e)))
        .unwrap_or_default();
    format!(
        "<nav><h1>User Management</h1><div>{email}\
<form method=\"post\" action=\"/logout\" style=\"display:inline\">\
<button type=\"submit\">Logout</button></form></div></nav>"
    )
}

fn edit_form(draft: &User) -> String {
    format!(
        "<section class=\"edit\"><h3>Edit User</h3>\
<form method=\"post\" action=\"/users/{id}\">\
<input type=\"text\" name=\"first_name\" value=\"{first}\">\
<input type=\"text\" name=\"last_name\" value=\"{last}\">\
<input type=\"email\" name=\"email\" value=\"{email}\">\
<button type=\"submit\">Update</button></form>\
<form method=\"post\" action=\"/users/{id}/cancel\"><button type=\"submit\">Cancel</button></form>\
</section>",
        id = draft.id,
        first = escape(&draft.first_name),
        last = escape(&draft.last_name),
        email = escape(&draft.email),
    )
}

fn user_card(user: &User) -> String {
    format!(
        "<div class=\"card\" data-user-id=\"{id}\">\
<div><img src=\"{avatar}\" alt=\"{first}\">\
<p class=\"name\">{first} {last}</p><p class=\"email\">{email}</p></div>\
<div><a href=\"/users?edit={id}\">Edit</a>\
<form method=\"post\" action=\"/users/{id}/delete\" style=\"display:inline\">\
<button type=\"submit\">Delete</button></form></div></div>",
        id = user.id,
        avatar = escape(&user.avatar),
        first = escape(&user.first_name),
        last = escape(&user.last_name),
        email = escape(&user.email),
    )
}

fn pager(page: usize, total_pages: usize, has_prev: bool, has_next: bool) -> String {
    let prev = if has_prev {
        format!("<a href=\"/users?page={}\">Previous</a>", page - 1)
    } else {
        "<span class=\"disabled\">Previous</span>".to_string()
    };
    let next = if has_next {
        format!("<a href=\"/users?page={}\">Next</a>", page + 1)
    } else {
        "<span class=\"disabled\">Next</span>".to_string()
    };
    format!("<div class=\"pager\">{prev}<span>Page {page} of {total_pages}</span>{next}</div>")
}

/// The guarded listing page for one session.
pub fn users(console: &Console, now: Instant) -> String {
    let view = &console.view;
    let mut body = navbar(console.email.as_deref());
    body.push_str("<main><h2>User List</h2>");
    body.push_str(&format!(
        "<form method=\"get\" action=\"{}\">\
<input type=\"text\" name=\"q\" placeholder=\"Search users...\" value=\"{}\"></form>",
        Route::Users.path(),
        escape(view.query())
    ));

    if let Some(notice) = console.notice.as_ref().filter(|n| n.is_visible(now)) {
        body.push_str(&format!(
            "<div class=\"notice\">&#10004; {}</div>",
            escape(&notice.message)
        ));
    }
    if let Some(draft) = view.editing() {
        body.push_str(&edit_form(draft));
    }

    body.push_str("<div class=\"grid\">");
    for user in view.displayed() {
        body.push_str(&user_card(user));
    }
    body.push_str("</div>");
    body.push_str(&pager(
        view.page(),
        view.total_pages(),
        view.has_prev(),
        view.has_next(),
    ));
    body.push_str("</main>");
    layout("User List", &body)
}
