//! Table rendering utilities for CLI outputs.

use crate::utils::colors::{BOLD, RESET};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub struct Column {
    pub header: String,
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    /// Cells are plain text; the ANSI color applies to the whole row.
    pub rows: Vec<(Vec<String>, Option<&'static str>)>,
}

/// Cut `s` to at most `max` display columns, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut w = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if w + cw + 1 > max {
            break;
        }
        out.push(c);
        w += cw;
    }
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push((row, None));
    }

    pub fn add_colored_row(&mut self, row: Vec<String>, color: &'static str) {
        self.rows.push((row, Some(color)));
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|(r, _)| r.get(i))
                    .map(|c| c.width())
                    .max()
                    .unwrap_or(0);
                longest.max(col.header.width()).min(col.max_width)
            })
            .collect()
    }

    fn rule(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
        let parts: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, parts.join(mid), right)
    }

    fn line(widths: &[usize], cells: &[String], color: Option<&str>) -> String {
        let parts: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!(" {} ", pad(&truncate(cell, *w), *w))
            })
            .collect();
        match color {
            Some(c) => format!("│{}{}{}│\n", c, parts.join("│"), RESET),
            None => format!("│{}│\n", parts.join("│")),
        }
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();

        let mut out = String::new();
        out.push_str(&Self::rule(&widths, "╭", "┬", "╮"));
        out.push_str(&Self::line(&widths, &headers, Some(BOLD)));
        out.push_str(&Self::rule(&widths, "├", "┼", "┤"));
        for (row, color) in &self.rows {
            out.push_str(&Self::line(&widths, row, *color));
        }
        out.push_str(&Self::rule(&widths, "╰", "┴", "╯"));
        out
    }
}
