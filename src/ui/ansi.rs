// ANSI/VT100 control sequences shared across the terminal UI.

use crate::core::types::CourseColor;

/// ESC as a byte value.
pub const ESC_BYTE: u8 = 0x1B;

#[macro_export]
macro_rules! csi {
    ($suffix:literal) => {
        concat!("\x1B[", $suffix)
    };
}

#[macro_export]
macro_rules! csi2 {
    ($first:literal, $second:literal) => {
        concat!("\x1B[", $first, "\x1B[", $second)
    };
}

/// Clear from cursor to end of line.
pub const CLEAR_LINE_REST: &str = crate::csi!("0K");

pub const STYLE_RESET: &str = crate::csi!("0m");
pub const STYLE_BOLD: &str = crate::csi!("1m");
pub const STYLE_ITALIC: &str = crate::csi!("3m");
pub const FG_LIGHT_GRAY: &str = crate::csi!("37m");
/// Dark gray background with white text for input prompts.
pub const PROMPT_STYLE: &str = crate::csi2!("38;5;15m", "48;5;236m");

pub fn fg_rgb(color: &CourseColor) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1B[38;2;{r};{g};{b}m")
}

pub fn bg_rgb(color: &CourseColor) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1B[48;2;{r};{g};{b}m")
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_fg(background: &CourseColor) -> &'static str {
    let (r, g, b) = background.rgb();
    // ITU-R BT.601 luma.
    let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    if luma >= 150_000 {
        crate::csi!("38;2;0;0;0m")
    } else {
        crate::csi!("38;2;255;255;255m")
    }
}

/// `text` on a `color` block with readable foreground.
pub fn paint_block(text: &str, color: &CourseColor) -> String {
    format!("{}{}{text}{STYLE_RESET}", bg_rgb(color), contrast_fg(color))
}

/// `text` in `color`.
pub fn paint_fg(text: &str, color: &CourseColor) -> String {
    format!("{}{text}{STYLE_RESET}", fg_rgb(color))
}
