use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const RULE: &str = "─";
const COLUMN_SEPARATOR: &str = " │ ";

/// One titled table: a banner, a header row, and body rows of pre-formatted cells.
#[derive(Debug, Clone)]
pub struct TableSpec<'a, T: AsRef<str>> {
    pub title: &'a str,
    pub headers: &'a [&'a str],
    pub rows: &'a [Vec<T>],
    /// Printed under the banner instead of an empty header row.
    pub empty_message: Option<&'a str>,
    pub min_width: Option<usize>,
}

impl<'a, T: AsRef<str>> TableSpec<'a, T> {
    pub fn new(title: &'a str, headers: &'a [&'a str], rows: &'a [Vec<T>]) -> Self {
        Self {
            title,
            headers,
            rows,
            empty_message: None,
            min_width: None,
        }
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = Some(message);
        self
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = Some(width);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
    left_pad: usize,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy that indents every line by `pad` spaces.
    pub fn with_left_pad(&self, pad: usize) -> Self {
        Self {
            left_pad: pad,
            ..self.clone()
        }
    }

    pub fn render<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        spec: &TableSpec<'_, T>,
        out: &mut W,
    ) -> io::Result<()> {
        let col_widths = self.col_widths(spec.headers, spec.rows);
        let width = self
            .natural_width(&col_widths)
            .max(spec.min_width.unwrap_or(0))
            .max(self.util.visible_width(spec.title));

        if spec.rows.is_empty() {
            if let Some(message) = spec.empty_message {
                let width = width.max(self.util.visible_width(message));
                self.render_banner(spec.title, width, out)?;
                self.line(out, message)?;
                return self.rule(out, width);
            }
        }

        self.render_banner(spec.title, width, out)?;
        if !spec.headers.is_empty() {
            self.line(out, &self.join_cells(spec.headers, &col_widths))?;
            self.rule(out, width)?;
        }
        for row in spec.rows {
            self.line(out, &self.join_cells(row, &col_widths))?;
        }
        self.rule(out, width)
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let width = width.max(self.util.visible_width(title));
        self.rule(out, width)?;
        self.line(out, &title.to_uppercase())?;
        self.rule(out, width)
    }

    /// Width of the table body without banner or minimum.
    pub fn table_width<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> usize {
        self.natural_width(&self.col_widths(headers, rows))
    }

    fn col_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let mut widths: Vec<usize> = headers
            .iter()
            .map(|h| self.util.visible_width(h))
            .collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(self.util.visible_width(cell.as_ref()));
            }
        }
        widths
    }

    fn natural_width(&self, col_widths: &[usize]) -> usize {
        match col_widths.len() {
            0 => 0,
            n => col_widths.iter().sum::<usize>() + (n - 1) * COLUMN_SEPARATOR.chars().count(),
        }
    }

    fn join_cells<T: AsRef<str>>(&self, cells: &[T], col_widths: &[usize]) -> String {
        let last = col_widths.len().saturating_sub(1);
        cells
            .iter()
            .zip(col_widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                if i == last {
                    cell.as_ref().to_string()
                } else {
                    self.util.pad_visible(cell.as_ref(), *w)
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR)
    }

    fn line<W: Write + ?Sized>(&self, out: &mut W, s: &str) -> io::Result<()> {
        writeln!(out, "{}{s}", " ".repeat(self.left_pad))
    }

    fn rule<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> io::Result<()> {
        self.line(out, &RULE.repeat(width.max(1)))
    }
}
