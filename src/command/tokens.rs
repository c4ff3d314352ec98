use crate::errors::{Error, Result};

/// Splits a prompt line on whitespace, keeping `"quoted text"` (or single quotes) as one token.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(Error::parse(format!("Unclosed quote ({q}) in: {line}")));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Cursor over a command's arguments with typed, error-reporting reads.
#[derive(Debug, Clone)]
pub struct TokenStream {
    toks: Vec<String>,
    i: usize,
    usage: &'static str,
}

impl TokenStream {
    pub fn new(raw: &[String], usage: &'static str) -> Self {
        Self {
            toks: raw.to_vec(),
            i: 0,
            usage,
        }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.toks.len()
    }

    pub fn remaining(&self) -> usize {
        self.toks.len().saturating_sub(self.i)
    }

    pub fn peek(&self) -> Option<&str> {
        self.toks.get(self.i).map(|s| s.as_str())
    }

    pub fn next(&mut self, what: &str) -> Result<String> {
        let tok = self
            .toks
            .get(self.i)
            .cloned()
            .ok_or_else(|| self.usage_error(format!("Missing {what}.")))?;
        self.i += 1;
        Ok(tok)
    }

    pub fn next_id(&mut self, what: &str) -> Result<i32> {
        let tok = self.next(what)?;
        tok.parse::<i32>()
            .map_err(|_| self.usage_error(format!("Invalid {what}: '{tok}'. Expected a number.")))
    }

    /// Everything left, joined by single spaces.
    pub fn rest(&mut self) -> String {
        let rest = self.toks[self.i.min(self.toks.len())..].join(" ");
        self.i = self.toks.len();
        rest
    }

    pub fn finish(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(extra) => Err(self.usage_error(format!("Unexpected argument: '{extra}'."))),
        }
    }

    /// Parse error whose text ends in a `Usage:` line the prompt can split off.
    pub fn usage_error(&self, message: String) -> Error {
        Error::parse(format!("{message}\nUsage: {}", self.usage))
    }
}
