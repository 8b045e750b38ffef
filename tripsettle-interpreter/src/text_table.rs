use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Fixed-width plain-text table.
#[derive(Default)]
pub struct TextTableBuilder<'a> {
    headers: Vec<Cow<'a, str>>,
    rows: Vec<Vec<Cow<'a, str>>>,
    alignments: Vec<Alignment>,
}

impl<'a> TextTableBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &[Alignment]) -> Self {
        self.alignments = alignments.to_vec();
        self
    }

    pub fn headers(mut self, headers: impl IntoIterator<Item = Cow<'a, str>>) -> Self {
        self.headers = headers.into_iter().collect();
        if self.alignments.is_empty() {
            self.alignments = vec![Alignment::default(); self.headers.len()];
        }
        self
    }

    pub fn row(mut self, row: impl IntoIterator<Item = Cow<'a, str>>) -> Self {
        self.rows.push(row.into_iter().collect());
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(text_width(cell));
            }
        }

        let mut out = String::new();
        self.write_line(&mut out, &self.headers, &col_widths);
        let rule_width = col_widths.iter().sum::<usize>() + COLUMN_GAP.len() * (col_count - 1);
        let _ = writeln!(out, "{}", "-".repeat(rule_width));
        for row in &self.rows {
            self.write_line(&mut out, row, &col_widths);
        }
        out
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'a, str>], col_widths: &[usize]) {
        let mut line = String::new();
        for (i, width) in col_widths.iter().enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            let cell = cells.get(i).map_or("", |cell| &**cell);
            let padding = " ".repeat(width.saturating_sub(text_width(cell)));
            match self.alignments.get(i).copied().unwrap_or_default() {
                Alignment::Left => {
                    line.push_str(cell);
                    line.push_str(&padding);
                }
                Alignment::Right => {
                    line.push_str(&padding);
                    line.push_str(cell);
                }
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}
