use std::io::{self, IsTerminal, Write};

use tasklist_shared::TaskView;
use tasklist_shared::view::EMPTY_PLACEHOLDER;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

/// Prints task views as a plain table on stdout.
#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// Colors only when `color` is on and stdout is a terminal.
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.color && io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, view), fields(rows = view.rows.len()))]
    pub fn print_view(&mut self, view: &TaskView) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_view(&mut out, view)
    }

    #[tracing::instrument(skip(self, view))]
    pub fn print_lists(&mut self, view: &TaskView) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_lists(&mut out, view)
    }

    pub fn write_view<W: Write>(&self, mut out: W, view: &TaskView) -> anyhow::Result<()> {
        if view.is_empty() {
            writeln!(out, "{EMPTY_PLACEHOLDER}")?;
        } else {
            let headers = vec![
                "ID".to_string(),
                " ".to_string(),
                "List".to_string(),
                "Due".to_string(),
                "Task".to_string(),
            ];

            let rows = view
                .rows
                .iter()
                .map(|row| {
                    let mark = if row.completed { "x" } else { " " };
                    let text = if row.completed {
                        // strike-through, green
                        self.paint(&row.text, "9;32")
                    } else {
                        row.text.clone()
                    };
                    vec![
                        self.paint(&row.id.to_string(), "33"),
                        mark.to_string(),
                        row.list.clone(),
                        row.due_label.clone(),
                        text,
                    ]
                })
                .collect();

            write_table(&mut out, headers, rows)?;
        }

        writeln!(
            out,
            "{} of {} tasks ({})",
            view.rows.len(),
            view.total,
            view.selection
        )?;
        Ok(())
    }

    pub fn write_lists<W: Write>(&self, mut out: W, view: &TaskView) -> anyhow::Result<()> {
        for option in &view.filter_options {
            let marker = if option.value == view.selection.value() {
                "*"
            } else {
                " "
            };
            writeln!(out, "{marker} {}", option.label)?;
        }
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, &width)| format!("{header:width$}"))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, "{}", header_line.trim_end())?;

    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(writer, "{rule}")?;

    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
                let padding = width.saturating_sub(visible_width);
                format!("{cell}{}", " ".repeat(padding))
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use tasklist_shared::task::{Task, TaskDraft};
    use tasklist_shared::view::build_view;
    use tasklist_shared::FilterSelection;

    use super::*;

    fn render(view: &TaskView) -> String {
        let mut buf = Vec::new();
        Renderer::plain().write_view(&mut buf, view).expect("write view");
        String::from_utf8(buf).expect("utf8 output")
    }

    #[test]
    fn empty_view_shows_placeholder() {
        let view = build_view(&[], &FilterSelection::All);
        assert_eq!(render(&view), "No tasks found.\n0 of 0 tasks (All)\n");
    }

    #[test]
    fn rows_are_aligned() {
        let mut done = Task::from_draft(
            2,
            TaskDraft {
                text: "Pay rent".to_string(),
                list: "Personal".to_string(),
                date: Some("2025-01-01".to_string()),
                time: Some("09:00".to_string()),
            },
        );
        done.completed = true;
        let open = Task::from_draft(
            1,
            TaskDraft {
                text: "Buy milk".to_string(),
                list: "General".to_string(),
                date: None,
                time: None,
            },
        );

        let view = build_view(&[open, done], &FilterSelection::All);
        let expected = "\
ID   List     Due                    Task
-- - -------- ---------------------- --------
1    General  No Due Date            Buy milk
2  x Personal Jan 1, 2025 at 9:00 AM Pay rent
2 of 2 tasks (All)
";
        assert_eq!(render(&view), expected);
    }

    #[test]
    fn unknown_list_prints_placeholder() {
        let tasks: Vec<Task> = (1..=3)
            .map(|id| {
                Task::from_draft(
                    id,
                    TaskDraft {
                        text: format!("task {id}"),
                        list: "Work".to_string(),
                        date: None,
                        time: None,
                    },
                )
            })
            .collect();
        let view = build_view(&tasks, &FilterSelection::List("Errands".to_string()));
        assert_eq!(render(&view), "No tasks found.\n0 of 3 tasks (Errands)\n");
    }

    #[test]
    fn lists_mark_the_selection() {
        let view = build_view(&[], &FilterSelection::List("Work".to_string()));
        let mut buf = Vec::new();
        Renderer::plain().write_lists(&mut buf, &view).expect("write lists");
        let text = String::from_utf8(buf).expect("utf8 output");
        assert!(text.starts_with("  All Lists\n  General\n* Work\n"));
    }

    #[test]
    fn color_follows_config_switch() {
        let mut cfg = Config::default();
        cfg.set("color", "y").expect("y is a switch");
        assert!(cfg.color);

        cfg.set("color", "off").expect("off is a switch");
        assert!(!Renderer::new(&cfg).color);
    }

    #[test]
    fn strip_ansi_removes_escapes() {
        assert_eq!(strip_ansi("\x1b[9;32mdone\x1b[0m"), "done");
    }
}
