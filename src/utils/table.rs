//! Table rendering utilities for CLI outputs.

use regex::Regex;
use std::sync::OnceLock;

pub struct Column {
    pub header: String,
    pub width: usize,
    pub right_align: bool,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            width: header.len(),
            right_align: false,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            right_align: true,
            ..Self::left(header)
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

/// Printable width of a cell, ignoring ANSI colour sequences.
pub fn visible_len(s: &str) -> usize {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    match ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, "").chars().count(),
        None => s.chars().count(),
    }
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Widths grow to fit the widest cell of each column.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(row.iter()) {
            col.width = col.width.max(visible_len(cell));
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&format!("{:<width$} ", col.header, width = col.width));
        }
        out.push('\n');
        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = " ".repeat(col.width.saturating_sub(visible_len(cell)));
                if col.right_align {
                    out.push_str(&format!("{pad}{cell} "));
                } else {
                    out.push_str(&format!("{cell}{pad} "));
                }
            }
            out.push('\n');
        }

        out
    }
}
