//! Plain-text rendering of events and pages.

use super::types::{Event, PageResult, Query};

/// Message printed instead of a transcript when a page holds no events.
pub const NO_EVENTS: &str = "No events found.";

/// Render one event as a header line followed by its conversational lines.
///
/// Never fails: missing ids, timestamps, roles and content render as defaults.
pub fn format_event(event: &Event) -> String {
    let id = event.id.as_deref().unwrap_or("unknown");
    let timestamp = event
        .created_at
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();

    let lines: Vec<String> = event
        .conversational()
        .map(|conv| format!("  [{}] {}", conv.display_role(), conv.text()))
        .collect();

    if lines.is_empty() {
        return format!("Event {id} ({timestamp}): (no conversational content)");
    }
    format!("Event {id} ({timestamp}):\n{}", lines.join("\n"))
}

/// Render a page for the terminal. The result has no trailing newline.
pub fn format_page(page: &PageResult, query: &Query) -> String {
    if page.events.is_empty() {
        return NO_EVENTS.to_string();
    }

    let mut out = format!(
        "=== Conversation History (user: {}, session: {}) ===\n\n",
        query.user_id, query.session_id
    );
    for event in &page.events {
        out.push_str(&format_event(event));
        out.push_str("\n\n");
    }
    out.push_str(&format!("--- Showing {} event(s) ---\n\n", page.events.len()));

    match &page.next_cursor {
        Some(cursor) => {
            out.push_str("More events available. Use --next-token to fetch next page:\n");
            out.push_str(&format!("--next-token \"{cursor}\""));
        }
        None => out.push_str("No more events."),
    }
    out
}
