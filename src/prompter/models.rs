use std::io::Write;

use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowCtrl {
    Continue,
    Finish,
}

/// One screen of the prompt: draw, then react to a line of input.
pub trait Flow {
    fn render(&mut self, out: &mut dyn Write) -> Result<()>;
    fn handle_input(&mut self, input: &str, out: &mut dyn Write) -> Result<FlowCtrl>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigState {
    ShowTable,   // table plus "edit? (y/n)"
    SelectId,    // ask for a row id
    ShowCurrent, // description and current value
    AskNewValue, // prompt for the new value
    Done,
}
