use crate::ui::ansi::{CLEAR_LINE_REST, FG_LIGHT_GRAY, PROMPT_STYLE, STYLE_BOLD, STYLE_ITALIC, STYLE_RESET};
use crate::ui::width_util::WidthUtil;

const BANNER_INNER_WIDTH: usize = 44;

/// Screen furniture around the tables: the startup banner and the input prompt.
#[derive(Debug, Default, Clone)]
pub struct UiChrome {
    util: WidthUtil,
}

impl UiChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner_lines(&self) -> Vec<String> {
        let version = env!("CARGO_PKG_VERSION");
        let title = format!(
            "{STYLE_BOLD}W E E K G R I D{STYLE_RESET} {FG_LIGHT_GRAY}(v{version}){STYLE_RESET}"
        );
        let subtitle = format!("{STYLE_ITALIC}Your classes, one week at a time{STYLE_RESET}");
        let rule = "─".repeat(BANNER_INNER_WIDTH);
        vec![
            format!("╭{rule}╮"),
            format!("│{}│", self.center_in_box(&title, BANNER_INNER_WIDTH)),
            format!("│{}│", self.center_in_box(&subtitle, BANNER_INNER_WIDTH)),
            format!("╰{rule}╯"),
        ]
    }

    /// Banner shifted to the middle of the terminal.
    pub fn centered_banner_lines(&self) -> Vec<String> {
        let lines = self.banner_lines();
        let width = lines.first().map(|l| self.util.visible_width(l)).unwrap_or(0);
        let pad = " ".repeat(self.util.center_pad(width));
        lines.into_iter().map(|l| format!("{pad}{l}")).collect()
    }

    /// Banner without styling, for pipes and logs.
    pub fn plain_banner_lines(&self) -> Vec<String> {
        self.banner_lines()
            .iter()
            .map(|l| WidthUtil::strip_ansi(l))
            .collect()
    }

    /// Prompt text; input is typed right after it.
    pub fn prompt(&self, prompt: &str, painted: bool) -> String {
        if painted {
            format!("{PROMPT_STYLE}{prompt}{CLEAR_LINE_REST}{STYLE_RESET} ")
        } else {
            format!("{prompt} ")
        }
    }

    pub fn center_in_box(&self, content: &str, width: usize) -> String {
        let content_width = self.util.visible_width(content);
        if content_width >= width {
            return content.to_string();
        }
        let left = (width - content_width) / 2;
        let right = width - content_width - left;
        format!("{}{}{}", " ".repeat(left), content, " ".repeat(right))
    }
}
