use std::io::{self, Write};

use crate::command::command_parser::CommandParser;
use crate::command::commands::{CommandDyn, CommandEffect, Screen, split_usage};
use crate::command::tokens::split_line;
use crate::core::context::EngineContext;
use crate::core::store::Store;
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use crate::prompter::flows::config_edit::ConfigEditFlow;
use crate::prompter::models::{Flow, FlowCtrl};
use crate::ui::chrome::UiChrome;
use crate::ui::display_manager::DisplayManager;

/// The top-level prompt: parses a command line, runs it against the context, then prints any
/// alerts the context queued.
pub struct MainFlow<'a, S: Store> {
    ctx: &'a mut EngineContext<S>,
    command_parser: CommandParser<S>,
    display: DisplayManager,
    chrome: UiChrome,
    painted: bool,
    logger: Logger,
    config_editor: Option<ConfigEditFlow>,
    startup_displayed: bool,
    errors: Box<dyn Write + 'a>,
}

impl<'a, S: Store> MainFlow<'a, S> {
    pub fn new(ctx: &'a mut EngineContext<S>, painted: bool) -> Self {
        let logger = ctx.logger.clone();
        let display = if painted {
            DisplayManager::new()
        } else {
            DisplayManager::plain()
        };
        Self {
            ctx,
            command_parser: CommandParser::new(),
            display,
            chrome: UiChrome::new(),
            painted,
            logger,
            config_editor: None,
            startup_displayed: false,
            errors: Box::new(io::stderr()),
        }
    }

    /// Sends error and alert lines somewhere other than stderr.
    pub fn with_error_sink(mut self, sink: Box<dyn Write + 'a>) -> Self {
        self.errors = sink;
        self
    }

    pub fn in_config_editor(&self) -> bool {
        self.config_editor.is_some()
    }
}

impl<'a, S: Store> Flow for MainFlow<'a, S> {
    fn render(&mut self, out: &mut dyn Write) -> Result<()> {
        if let Some(editor) = self.config_editor.as_mut() {
            return editor.render(self.ctx, &self.display, out);
        }
        self.print_startup(out)?;
        write!(out, "{}", self.chrome.prompt(">", self.painted))?;
        Ok(())
    }

    fn handle_input(&mut self, input: &str, out: &mut dyn Write) -> Result<FlowCtrl> {
        // "exit" leaves from anywhere, including the config editor.
        if self.is_exit(input.trim()) {
            return Ok(FlowCtrl::Finish);
        }
        if let Some(editor) = self.config_editor.as_mut() {
            if editor.handle_input(self.ctx, input, out)? == FlowCtrl::Finish {
                self.config_editor = None;
            }
            self.flush_alerts()?;
            return Ok(FlowCtrl::Continue);
        }

        let line = input.trim();
        if let Some(ctrl) = self.handle_non_command(line) {
            return Ok(ctrl);
        }

        let (raw_command, raw_args) = match self.split_command_line(line) {
            Ok(parts) => parts,
            Err(err) => {
                self.report(&format!("Could not read '{line}'."), &err)?;
                return Ok(FlowCtrl::Continue);
            }
        };

        let cmd = match self.resolve_command(&raw_command, &raw_args) {
            Ok(cmd) => cmd,
            Err(err) => {
                self.report(&format!("Command resolution failed for '{raw_command}'."), &err)?;
                return Ok(FlowCtrl::Continue);
            }
        };

        self.logger
            .info(format!("Command run: {line}"), LogTarget::FileOnly);
        self.execute_command(&raw_command, cmd, out)?;
        self.flush_alerts()?;
        Ok(FlowCtrl::Continue)
    }
}

impl<'a, S: Store> MainFlow<'a, S> {
    fn print_startup(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.startup_displayed {
            return Ok(());
        }
        let banner = if self.painted {
            self.chrome.centered_banner_lines()
        } else {
            self.chrome.plain_banner_lines()
        };
        for line in banner {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        writeln!(out, "Type 'help' for commands, 'exit' to quit.")?;
        writeln!(out)?;
        self.display.render_week(&self.ctx.week_layout(), out)?;
        self.startup_displayed = true;
        self.flush_alerts()
    }

    fn handle_non_command(&self, line: &str) -> Option<FlowCtrl> {
        if line.is_empty() {
            return Some(FlowCtrl::Continue);
        }
        if self.is_exit(line) {
            return Some(FlowCtrl::Finish);
        }
        None
    }

    fn is_exit(&self, line: &str) -> bool {
        line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
    }

    fn split_command_line(&self, line: &str) -> Result<(String, Vec<String>)> {
        let mut tokens = split_line(line)?;
        if tokens.is_empty() {
            return Err(Error::parse("Empty command."));
        }
        let raw_command = tokens.remove(0);
        Ok((raw_command, tokens))
    }

    fn resolve_command(&self, raw_command: &str, args: &[String]) -> Result<CommandDyn<S>> {
        self.command_parser.parse(raw_command, args)
    }

    fn execute_command(
        &mut self,
        raw_command: &str,
        cmd: CommandDyn<S>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut screen = Screen::new(&self.display, out);
        match cmd.perform(self.ctx, &mut screen) {
            Ok(CommandEffect::Continue) => Ok(()),
            Ok(CommandEffect::OpenConfigEditor) => {
                self.config_editor = Some(ConfigEditFlow::new(self.ctx, self.painted));
                Ok(())
            }
            // Output that can't be written is fatal; everything else is the user's to fix.
            Err(Error::Io(err)) => Err(Error::Io(err)),
            Err(err) => self.report(
                &format!("Command execution failed for '{raw_command}'."),
                &err,
            ),
        }
    }

    fn report(&mut self, context: &str, err: &Error) -> Result<()> {
        let (head, usage) = split_usage(err);
        self.logger
            .error(format!("{context} {head}"), LogTarget::FileOnly);
        writeln!(self.errors, "error: {head}")?;
        if let Some(usage) = usage {
            writeln!(self.errors, "{usage}")?;
        }
        Ok(())
    }

    fn flush_alerts(&mut self) -> Result<()> {
        let alerts = self.ctx.take_alerts();
        self.display.render_alerts(&alerts, &mut self.errors)?;
        Ok(())
    }
}
