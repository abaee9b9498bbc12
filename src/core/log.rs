use crate::db::log::{LogEntry, load_log};
use crate::db::store::Store;
use crate::errors::AppResult;
use crate::utils::table::truncate;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 48;

/// ANSI colour for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "remind" => Colour::Green,
        "forget" => Colour::Red,
        "edit" => Colour::Yellow,
        "checkout" => Colour::Cyan,
        "dismiss" => Colour::Blue,
        "notify" => Colour::Fixed(141),
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

/// Plain `operation (target)` label, cut to `MAX_OP_WIDTH` display columns.
fn op_label(entry: &LogEntry) -> String {
    let label = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    truncate(&label, MAX_OP_WIDTH)
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(store: &Store) -> AppResult<()> {
        let entries = load_log(&store.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries.iter().map(op_label).collect();

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.width()).max().unwrap_or(10);
        let op_w = labels.iter().map(|l| l.width()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (entry, label) in entries.iter().zip(labels) {
            let color = color_for_operation(&entry.operation);

            // only the operation word is coloured
            let colored = match label.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(label.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(label.width()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                entry.date,
                colored,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 1,
            date: "2025-01-01T00:00:00+00:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn label_joins_operation_and_target() {
        assert_eq!(op_label(&entry("forget", "3")), "forget (3)");
        assert_eq!(op_label(&entry("checkout", "")), "checkout");
    }

    #[test]
    fn long_labels_are_truncated() {
        let long = "x".repeat(200);
        let label = op_label(&entry("remind", &long));
        assert_eq!(label.width(), MAX_OP_WIDTH);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn wide_labels_are_cut_by_display_width() {
        let wide = "日本語".repeat(20);
        let label = op_label(&entry("notify", &wide));
        assert!(label.width() <= MAX_OP_WIDTH);
        assert!(label.starts_with("notify (日本"));
    }
}
