use crate::calendar::{reconstruct, DayStatus};
use crate::day_key::DayKey;
use crate::handlers::DEFAULT_WINDOW;
use crate::models::{AppData, Habit};
use crate::progress::progress;
use crate::weight;
use std::fmt::Write;

pub fn render_index(today: DayKey, data: &AppData) -> String {
    let habits = if data.habits.is_empty() {
        EMPTY_HTML.to_string()
    } else {
        data.habits
            .iter()
            .map(|habit| render_habit(habit, data, today))
            .collect::<Vec<_>>()
            .join("\n")
    };

    INDEX_HTML
        .replace("{{TODAY}}", &today.to_string())
        .replace("{{WEIGHT}}", &render_weight(data, today))
        .replace("{{HABITS}}", &habits)
}

fn render_habit(habit: &Habit, data: &AppData, today: DayKey) -> String {
    let progress = progress(habit, today);
    let mut strip = String::new();
    for cell in reconstruct(habit, &data.check_ins, today, DEFAULT_WINDOW) {
        let _ = write!(
            strip,
            r#"<span class="cell {}" title="{}: {}"></span>"#,
            status_class(cell.status),
            cell.day,
            status_class(cell.status)
        );
    }

    let action = if progress.checked_in_today {
        r#"<p class="done">Checked in for today!</p>"#.to_string()
    } else {
        format!(
            r#"<form method="post" action="/habits/{}/check-in"><button class="btn-add" type="submit">Check in</button></form>"#,
            habit.id
        )
    };

    format!(
        r#"<article class="habit">
  <div class="habit-head">
    <h3>{name}</h3>
    <span class="badge">Streak: {current}</span>
  </div>
  <p class="hint">Best streak: {best} days &middot; {remaining} days left &rarr; {target}</p>
  <div class="bar"><div style="width: {percent:.0}%"></div></div>
  <div class="strip">{strip}</div>
  <div class="habit-actions">
    {action}
    <form method="post" action="/habits/{id}/delete"><button class="btn-sub" type="submit">Delete</button></form>
  </div>
</article>"#,
        name = escape_html(&habit.name),
        current = habit.current_streak,
        best = habit.best_streak,
        remaining = progress.days_remaining,
        target = progress.target_date,
        percent = progress.percent,
        id = habit.id,
    )
}

fn render_weight(data: &AppData, today: DayKey) -> String {
    let latest = match weight::latest(&data.weights) {
        Some(entry) if entry.day == today => format!("{:.1} kg &middot; updated today", entry.weight),
        Some(entry) => format!("{:.1} kg &middot; last updated {}", entry.weight, entry.day),
        None => "Start tracking your journey".to_string(),
    };

    let mut week = String::new();
    for day in weight::week_history(&data.weights, today) {
        let _ = write!(
            week,
            r#"<span class="pill{}{}">{}</span>"#,
            if day.has_entry { " logged" } else { "" },
            if day.is_today { " today" } else { "" },
            day.day_name
        );
    }

    format!(
        r#"<p class="hint">{latest}</p>
<div class="week">{week}</div>"#
    )
}

fn status_class(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Completed => "completed",
        DayStatus::Missed => "missed",
        DayStatus::PendingToday => "pending-today",
        DayStatus::NotYetStarted => "not-yet-started",
        DayStatus::OutOfRange => "out-of-range",
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const EMPTY_HTML: &str = r#"<p class="hint">No chains yet. Forge your first one above.</p>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Chains</title>
  <style>
    :root {
      --bg: #0f172a;
      --card: #1e293b;
      --ink: #f1f5f9;
      --muted: #94a3b8;
      --accent: #10b981;
      --danger: #f43f5e;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    section, .habit {
      background: var(--card);
      border-radius: 18px;
      padding: 20px;
      display: grid;
      gap: 12px;
    }

    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    form.inline {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    input {
      background: var(--bg);
      color: var(--ink);
      border: 1px solid #334155;
      border-radius: 10px;
      padding: 10px 12px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-add {
      background: var(--accent);
      color: var(--bg);
    }

    .btn-sub {
      background: #334155;
      color: var(--ink);
    }

    .habit-head, .habit-actions {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 10px;
    }

    .habit h3 {
      margin: 0;
    }

    .badge {
      background: var(--accent);
      color: var(--bg);
      border-radius: 999px;
      padding: 4px 12px;
      font-size: 0.8rem;
      font-weight: 700;
    }

    .bar {
      height: 4px;
      background: #334155;
      border-radius: 4px;
    }

    .bar div {
      height: 100%;
      background: var(--accent);
      border-radius: 4px;
    }

    .strip, .week {
      display: flex;
      gap: 4px;
    }

    .cell {
      flex: 1;
      height: 28px;
      border-radius: 4px;
      background: #1e293b;
      border: 1px solid #334155;
    }

    .cell.completed {
      background: var(--accent);
    }

    .cell.missed {
      background: rgba(244, 63, 94, 0.3);
      border-color: var(--danger);
    }

    .cell.pending-today {
      background: #334155;
    }

    .pill {
      flex: 1;
      text-align: center;
      padding: 6px 0;
      border-radius: 999px;
      border: 2px solid #334155;
      color: var(--muted);
      font-size: 0.8rem;
    }

    .pill.logged {
      border-color: var(--accent);
      color: var(--accent);
    }

    .pill.today {
      color: var(--ink);
    }

    .done {
      margin: 0;
      color: var(--accent);
      font-weight: 600;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Chains</h1>
      <p class="hint">Today is {{TODAY}}. Don't break the chain.</p>
    </header>

    <section>
      <h2>Weight</h2>
      {{WEIGHT}}
      <form class="inline" method="post" action="/weights">
        <input name="weight" type="number" min="20" max="200" step="0.1" value="70.0" required />
        <button class="btn-add" type="submit">Log weight</button>
      </form>
    </section>

    <section>
      <h2>Forge a new chain</h2>
      <form class="inline" method="post" action="/habits">
        <input name="name" type="text" placeholder="e.g. Read 10 pages" maxlength="80" required />
        <input name="target_days" type="number" min="1" max="365" value="21" required />
        <button class="btn-add" type="submit">Start chain</button>
      </form>
    </section>

    {{HABITS}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewHabit;
    use chrono::NaiveDate;

    fn today() -> DayKey {
        DayKey::new(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap())
    }

    #[test]
    fn empty_state_is_rendered() {
        let html = render_index(today(), &AppData::default());
        assert!(html.contains("2026-03-04"));
        assert!(html.contains("No chains yet"));
        assert!(html.contains("Start tracking your journey"));
    }

    #[test]
    fn habit_names_are_escaped() {
        let mut data = AppData::default();
        data.create_habit(NewHabit::parse("<b>Run</b>", 7).unwrap(), today());
        let html = render_index(today(), &data);
        assert!(html.contains("&lt;b&gt;Run&lt;/b&gt;"));
        assert!(!html.contains("<b>Run</b>"));
    }

    #[test]
    fn checked_in_habit_hides_button() {
        let mut data = AppData::default();
        let habit = data.create_habit(NewHabit::parse("Run", 7).unwrap(), today());
        assert!(render_index(today(), &data).contains("/check-in"));
        data.check_in(habit.id, today());
        let html = render_index(today(), &data);
        assert!(html.contains("Checked in for today!"));
        assert!(html.contains("Streak: 1"));
    }
}
