//! Table rendering for the task list.

use crate::store::Task;

/// Titles over 25 characters keep 23 and gain "..".
const TITLE_LIMIT: (usize, usize) = (25, 23);
/// Descriptions over 30 characters keep 30 and gain "..".
const DESCRIPTION_LIMIT: (usize, usize) = (30, 30);

fn truncate(text: &str, (limit, keep): (usize, usize)) -> String {
    if text.chars().count() > limit {
        let kept: String = text.chars().take(keep).collect();
        format!("{kept}..")
    } else {
        text.to_string()
    }
}

pub fn format_tasks(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet.".to_string();
    }

    let mut lines = vec![
        format!("{:<4} {:<25} {:<8} {}", "ID", "Title", "Status", "Description"),
        "-".repeat(70),
    ];
    for task in tasks {
        let status = if task.completed { "✓" } else { "☐" };
        lines.push(format!(
            "{:<4} {:<25} {:<8} {}",
            task.id,
            truncate(&task.title, TITLE_LIMIT),
            status,
            truncate(&task.description, DESCRIPTION_LIMIT),
        ));
    }
    lines.join("\n")
}
