// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::{Comment, Issue, Notification, ResolutionStats, Status, StatusEvent};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Indents every line of `text` by `indent`.
fn indent_lines(text: &str, indent: &str) -> Vec<String> {
    text.lines().map(|line| format!("{indent}{line}")).collect()
}

/// Format an issue as a single line for list output
pub fn format_issue_line(issue: &Issue) -> String {
    let status_display = match &issue.assignee_id {
        Some(assignee) => format!("{}, @{}", issue.status, assignee),
        None => issue.status.to_string(),
    };
    format!("- ({}) {}: {}", status_display, issue.id, issue.title)
}

/// Which half of dual confirmation is still outstanding, if any.
fn confirmation_line(issue: &Issue) -> Option<String> {
    match (issue.resolved_by_admin, issue.resolved_by_student) {
        (true, true) => Some("Confirmed by admin and student".to_string()),
        (true, false) if issue.status == Status::PendingStudentConfirmation => {
            Some("Waiting for student confirmation".to_string())
        }
        (true, false) => Some("Admin marked resolved; not confirmed by student".to_string()),
        _ => None,
    }
}

/// Format one history entry, with its notes and evidence underneath.
pub fn format_status_event(event: &StatusEvent) -> Vec<String> {
    let mut lines = vec![format!(
        "  {}  {} by {} ({})",
        event.timestamp.format(TIME_FORMAT),
        event.status,
        event.actor_id,
        event.actor_role
    )];
    if let Some(notes) = &event.notes {
        lines.extend(indent_lines(notes, "    "));
    }
    for url in &event.attachments {
        lines.push(format!("    evidence: {url}"));
    }
    lines
}

pub fn format_comment(comment: &Comment) -> Vec<String> {
    let mut lines = vec![format!(
        "  {}  {} ({}):",
        comment.created_at.format(TIME_FORMAT),
        comment.author_id,
        comment.author_role
    )];
    lines.extend(indent_lines(&comment.body, "    "));
    lines
}

/// Format issue details for show command
pub fn format_issue_details(issue: &Issue, comments: &[Comment]) -> String {
    let mut output = Vec::new();

    output.push(issue.id.clone());
    output.push(format!("Title: {}", issue.title));
    output.push(format!("Status: {}", issue.status));
    if let Some(line) = confirmation_line(issue) {
        output.push(line);
    }
    output.push(format!("Reported by: {}", issue.creator_id));
    if let Some(assignee) = &issue.assignee_id {
        output.push(format!("Assignee: {}", assignee));
    }
    if let Some(category) = &issue.category {
        output.push(format!("Category: {}", category));
    }
    if let Some(location) = &issue.location {
        output.push(format!("Location: {}", location));
    }
    output.push(format!("Created: {}", issue.created_at.format(TIME_FORMAT)));
    output.push(format!("Updated: {}", issue.updated_at.format(TIME_FORMAT)));

    if let Some(description) = &issue.description {
        output.push(String::new());
        output.push("Description:".to_string());
        output.extend(indent_lines(description, "  "));
    }

    output.push(String::new());
    output.push("History:".to_string());
    for event in &issue.status_history {
        output.extend(format_status_event(event));
    }

    if !comments.is_empty() {
        output.push(String::new());
        output.push("Comments:".to_string());
        for comment in comments {
            output.extend(format_comment(comment));
        }
    }

    output.join("\n")
}

/// Format a notification as a single inbox line; unread ones are starred.
pub fn format_notification_line(notification: &Notification) -> String {
    let marker = if notification.read { ' ' } else { '*' };
    let mut line = format!(
        "{marker} {:>4}  {}  [{}] {}",
        notification.id,
        notification.created_at.format(TIME_FORMAT),
        notification.kind,
        notification.message
    );
    if let Some(issue_id) = &notification.related_issue_id {
        line.push_str(&format!(" ({issue_id})"));
    }
    line
}

/// Human-readable duration, e.g. `2d 3h`, `45m`, `12s`.
pub fn format_duration(secs: i64) -> String {
    if secs < 0 {
        return format!("-{}", format_duration(secs.saturating_neg()));
    }
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    match (days, hours, minutes) {
        (0, 0, 0) => format!("{secs}s"),
        (0, 0, m) => format!("{m}m"),
        (0, h, 0) => format!("{h}h"),
        (0, h, m) => format!("{h}h {m}m"),
        (d, 0, _) => format!("{d}d"),
        (d, h, _) => format!("{d}d {h}h"),
    }
}

fn format_optional_duration(secs: Option<i64>) -> String {
    secs.map(format_duration).unwrap_or_else(|| "-".to_string())
}

pub fn format_stats(stats: &ResolutionStats) -> String {
    [
        format!("Issues: {}", stats.total),
        format!("  open: {}", stats.open),
        format!("  resolved: {}", stats.resolved),
        format!("  closed without confirmation: {}", stats.closed),
        format!(
            "Resolution time (mean): {}",
            format_optional_duration(stats.mean_resolution_secs)
        ),
        format!(
            "Resolution time (median): {}",
            format_optional_duration(stats.median_resolution_secs)
        ),
        format!(
            "Admin resolution time (mean): {}",
            format_optional_duration(stats.mean_admin_resolution_secs)
        ),
    ]
    .join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
