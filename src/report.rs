use crate::domain::{Millis, Task};
use crate::format::format_duration;

/// Render the task summary table printed by the `tasks` subcommand
pub fn render_summary(tasks: &[Task], now: Millis) -> String {
    let mut out = String::new();

    if tasks.is_empty() {
        out.push_str("No tasks.\n");
        return out;
    }

    let name_width = tasks
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    out.push_str(&format!(
        "{:<name_width$}  {:<8}  {:>8}  {:>9}\n",
        "NAME", "STATE", "SESSIONS", "TOTAL"
    ));

    let mut tracked_total: Millis = 0;
    for task in tasks {
        let total = task.total_duration(now);
        tracked_total += total;
        let marker = if task.is_running() { "  ▶" } else { "" };
        out.push_str(&format!(
            "{:<name_width$}  {:<8}  {:>8}  {:>9}{}\n",
            task.name,
            task.state.to_tag(),
            task.sessions.len(),
            format_duration(total),
            marker
        ));
    }

    out.push_str(&format!(
        "\n{} task{}, {} tracked\n",
        tasks.len(),
        if tasks.len() == 1 { "" } else { "s" },
        format_duration(tracked_total)
    ));

    out
}
