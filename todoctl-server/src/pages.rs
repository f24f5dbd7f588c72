//! Server-rendered HTML for the list page
//!
//! Presentation only: receives already-fetched records and produces
//! markup. All user-supplied text is escaped.

use std::fmt::Write;

use crate::models::{Todo, TodoList};

/// Escape text for embedding in HTML content or attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Render the page for one list: sidebar of all lists, the active
/// list's todos in insertion order, and the create forms.
pub fn render_list_page(lists: &[TodoList], active: &TodoList, todos: &[Todo]) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    let _ = write!(html, "<title>{} | Todos</title>\n", escape(&active.name));
    html.push_str("</head>\n<body>\n");

    // Sidebar: every list, the active one highlighted
    html.push_str("<ul class=\"lists\">\n");
    for list in lists {
        let class = if list.id == active.id { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "  <li{}><a href=\"/lists/{}\">{}</a></li>\n",
            class,
            list.id,
            escape(&list.name)
        );
    }
    html.push_str("</ul>\n");

    html.push_str("<form method=\"post\" action=\"/lists/create\">\n");
    html.push_str("  <input type=\"text\" name=\"name\" placeholder=\"New list\">\n");
    html.push_str("  <input type=\"submit\" value=\"Create list\">\n");
    html.push_str("</form>\n");

    // Active list and its todos
    let _ = write!(html, "<h1>{}</h1>\n", escape(&active.name));
    html.push_str("<ul class=\"todos\">\n");
    for todo in todos {
        let checked = if todo.completed { " checked" } else { "" };
        let _ = write!(
            html,
            "  <li data-id=\"{}\"><input type=\"checkbox\" class=\"complete\"{}> {}</li>\n",
            todo.id,
            checked,
            escape(&todo.description)
        );
    }
    html.push_str("</ul>\n");

    html.push_str("<form method=\"post\" action=\"/todos/create\">\n");
    let _ = write!(
        html,
        "  <input type=\"hidden\" name=\"list_id\" value=\"{}\">\n",
        active.id
    );
    html.push_str("  <input type=\"text\" name=\"description\" placeholder=\"New todo\">\n");
    html.push_str("  <input type=\"submit\" value=\"Create todo\">\n");
    html.push_str("</form>\n");

    html.push_str("</body>\n</html>\n");
    html
}
