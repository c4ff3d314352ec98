use std::io::Write;
use std::str::FromStr;

use crate::config::models::BoolFormat;
use crate::config::{ConfigKey, ConfigRows};
use crate::core::context::EngineContext;
use crate::core::store::Store;
use crate::errors::Result;
use crate::extensions::enums::valid_csv;
use crate::prompter::models::{ConfigState, FlowCtrl};
use crate::ui::chrome::UiChrome;
use crate::ui::display_manager::DisplayManager;

/// Step-by-step config editor. It borrows the context per call so the main flow can keep
/// owning it while the editor is open.
#[derive(Debug, Clone)]
pub struct ConfigEditFlow {
    state: ConfigState,
    rows_cache: ConfigRows,
    selected_idx: Option<usize>,
    painted: bool,
}

impl ConfigEditFlow {
    pub fn new<S: Store>(ctx: &EngineContext<S>, painted: bool) -> Self {
        Self {
            state: ConfigState::ShowTable,
            rows_cache: ctx.config.rows(),
            selected_idx: None,
            painted,
        }
    }

    pub fn state(&self) -> ConfigState {
        self.state
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_idx
    }

    fn selected_row(&self) -> Option<(&str, &str, &str)> {
        self.selected_idx
            .and_then(|i| self.rows_cache.get(i))
            .map(|(k, d, v)| (k.as_str(), d.as_str(), v.as_str()))
    }

    fn possible_options(&self) -> Option<String> {
        let (key, _, _) = self.selected_row()?;
        match ConfigKey::from_str(key).ok()? {
            ConfigKey::FileLoggingEnabled => Some(format!(
                "{} (or yes/no, on/off)",
                valid_csv::<BoolFormat>()
            )),
            ConfigKey::HourHeightPx => Some("a number of pixels above 0, up to 600".to_string()),
            ConfigKey::MaxColumns => Some("a whole number from 1 to 12".to_string()),
            ConfigKey::ColumnGapPercent => Some("a percentage from 0 up to (not incl.) 10".to_string()),
            ConfigKey::StackNudgePx => Some("a number of pixels from 0 to 60".to_string()),
        }
    }

    fn prompt(&self, out: &mut dyn Write, message: &str) -> Result<()> {
        writeln!(out, "{message}")?;
        write!(out, "{}", UiChrome::new().prompt(">", self.painted))?;
        Ok(())
    }

    pub fn render<S: Store>(
        &mut self,
        ctx: &EngineContext<S>,
        display: &DisplayManager,
        out: &mut dyn Write,
    ) -> Result<()> {
        match self.state {
            ConfigState::ShowTable => {
                display.render_config(&ctx.config, out)?;
                self.prompt(out, "Would you like to edit a setting? (y/n)")?;
            }
            ConfigState::SelectId => {
                self.prompt(
                    out,
                    &format!(
                        "Enter ID (0..{}):",
                        self.rows_cache.len().saturating_sub(1)
                    ),
                )?;
            }
            ConfigState::ShowCurrent => {
                if let Some((_, desc, val)) = self.selected_row() {
                    writeln!(out, "{desc}")?;
                    writeln!(out, "Current value: {val}")?;
                }
                self.state = ConfigState::AskNewValue;
                self.render_new_value_prompt(out)?;
            }
            ConfigState::AskNewValue => self.render_new_value_prompt(out)?,
            ConfigState::Done => {}
        }
        Ok(())
    }

    fn render_new_value_prompt(&self, out: &mut dyn Write) -> Result<()> {
        if let Some(opts) = self.possible_options() {
            writeln!(out, "Possible options: {opts}")?;
        }
        self.prompt(out, "Enter new value:")
    }

    pub fn handle_input<S: Store>(
        &mut self,
        ctx: &mut EngineContext<S>,
        input: &str,
        out: &mut dyn Write,
    ) -> Result<FlowCtrl> {
        match self.state {
            ConfigState::ShowTable => self.handle_table_input(input, out),
            ConfigState::SelectId => self.handle_select_id_input(input, out),
            // advanced by render()
            ConfigState::ShowCurrent => Ok(FlowCtrl::Continue),
            ConfigState::AskNewValue => self.handle_new_value_input(ctx, input, out),
            ConfigState::Done => Ok(FlowCtrl::Finish),
        }
    }

    fn handle_table_input(&mut self, input: &str, out: &mut dyn Write) -> Result<FlowCtrl> {
        match input.trim() {
            "y" | "Y" | "yes" => self.state = ConfigState::SelectId,
            "n" | "N" | "no" | "" => {
                self.state = ConfigState::Done;
                return Ok(FlowCtrl::Finish);
            }
            _ => writeln!(out, "Please enter y or n.")?,
        }
        Ok(FlowCtrl::Continue)
    }

    fn handle_select_id_input(&mut self, input: &str, out: &mut dyn Write) -> Result<FlowCtrl> {
        let len = self.rows_cache.len();
        match input.trim().parse::<usize>() {
            Ok(v) if v < len => {
                self.selected_idx = Some(v);
                self.state = ConfigState::ShowCurrent;
            }
            _ => writeln!(
                out,
                "Invalid ID. Please enter 0..{}.",
                len.saturating_sub(1)
            )?,
        }
        Ok(FlowCtrl::Continue)
    }

    fn handle_new_value_input<S: Store>(
        &mut self,
        ctx: &mut EngineContext<S>,
        input: &str,
        out: &mut dyn Write,
    ) -> Result<FlowCtrl> {
        let Some(idx) = self.selected_idx else {
            self.state = ConfigState::SelectId;
            return Ok(FlowCtrl::Continue);
        };
        match ctx.set_config_by_index(idx, input.trim()) {
            Ok(()) => {
                if let Some((key, _, _)) = self.rows_cache.get(idx) {
                    writeln!(out, "Updated {key}.")?;
                }
                self.rows_cache = ctx.config.rows();
                self.selected_idx = None;
                self.state = ConfigState::ShowTable;
            }
            // Stay on this value until it parses or the input ends.
            Err(e) => writeln!(out, "Error: {e}")?,
        }
        Ok(FlowCtrl::Continue)
    }
}
