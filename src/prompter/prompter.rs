use crate::errors::{Error, Result};
use crate::prompter::models::{Flow, FlowCtrl};
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented driver: render, read one line, hand it to the flow, repeat.
#[derive(Debug, Default, Clone)]
pub struct Prompter {
    echo: bool,
}

impl Prompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeats each input line after the prompt, so piped sessions read like typed ones.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Runs against the process's stdin and stdout. Echo is on when stdin is not a terminal.
    pub fn run<F: Flow>(self, flow: F) -> Result<()> {
        let stdin = io::stdin();
        let echo = self.echo || !stdin.is_terminal();
        let mut out = io::stdout();
        self.with_echo(echo)
            .run_with_io(flow, stdin.lock(), &mut out)
    }

    pub fn run_with_io<F: Flow, R: BufRead, W: Write>(
        &self,
        mut flow: F,
        mut reader: R,
        out: &mut W,
    ) -> Result<()> {
        loop {
            flow.render(out)?;
            out.flush()?;

            let mut line = String::new();
            let n = reader.read_line(&mut line).map_err(Error::Io)?;
            if n == 0 {
                writeln!(out)?;
                return Ok(());
            }
            let line = line.trim();
            if self.echo {
                writeln!(out, "{line}")?;
            }

            match flow.handle_input(line, out)? {
                FlowCtrl::Continue => continue,
                FlowCtrl::Finish => return Ok(()),
            }
        }
    }
}
