use terminal_size::{Width, terminal_size};

use crate::ui::ansi::ESC_BYTE;
type ByteIter<'a> = std::iter::Peekable<std::str::Bytes<'a>>;

const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Width math that ignores ANSI styling.
#[derive(Debug, Default, Clone)]
pub struct WidthUtil;

impl WidthUtil {
    pub fn strip_ansi(s: &str) -> String {
        let mut bytes = s.bytes().peekable();
        let mut plain = Vec::with_capacity(s.len());

        while let Some(byte) = bytes.next() {
            if byte == ESC_BYTE && matches!(bytes.peek(), Some(b'[')) {
                Self::consume_csi(&mut bytes);
                continue;
            }
            plain.push(byte);
        }
        // Escapes are ASCII, so cutting them out leaves valid UTF-8.
        String::from_utf8_lossy(&plain).into_owned()
    }

    fn consume_csi(bytes: &mut ByteIter<'_>) {
        let _ = bytes.next();
        for b in bytes.by_ref() {
            if b.is_ascii_alphabetic() {
                break;
            }
        }
    }

    pub fn visible_width(&self, s: &str) -> usize {
        Self::strip_ansi(s).chars().count()
    }

    pub fn pad_visible(&self, s: &str, width: usize) -> String {
        let w = self.visible_width(s);
        if w >= width {
            s.to_string()
        } else {
            format!("{s}{}", " ".repeat(width - w))
        }
    }

    /// Cuts plain text to `width` characters, ending in `…` when shortened.
    pub fn truncate(&self, s: &str, width: usize) -> String {
        if s.chars().count() <= width {
            return s.to_string();
        }
        if width == 0 {
            return String::new();
        }
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }

    /// Best-effort terminal width.
    pub fn terminal_width(&self) -> usize {
        match terminal_size() {
            Some((Width(w), _)) => w as usize,
            None => DEFAULT_TERMINAL_WIDTH,
        }
    }

    /// Left padding to center a box of `content_width` inside the terminal.
    pub fn center_pad(&self, content_width: usize) -> usize {
        self.terminal_width().saturating_sub(content_width) / 2
    }
}
