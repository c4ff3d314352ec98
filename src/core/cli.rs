use crate::errors::{Error, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct CliPaths {
    pub config_path: PathBuf,
    pub store_path: PathBuf,
    pub logs_dir: PathBuf,
    /// Pins "today" instead of reading the system clock.
    pub today: Option<NaiveDate>,
}

impl Default for CliPaths {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            store_path: PathBuf::from("weekgrid.json"),
            logs_dir: PathBuf::from("logs"),
            today: None,
        }
    }
}

impl CliPaths {
    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(mut args: I) -> Result<Self>
    where
        I: Iterator<Item = String>,
    {
        let mut paths = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => paths.config_path = PathBuf::from(Self::next_value(&mut args, "--config")?),
                "--store" => paths.store_path = PathBuf::from(Self::next_value(&mut args, "--store")?),
                "--logs" => paths.logs_dir = PathBuf::from(Self::next_value(&mut args, "--logs")?),
                "--today" => {
                    let raw = Self::next_value(&mut args, "--today")?;
                    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                        Error::parse(format!("Invalid date for --today: '{raw}'. Expected YYYY-MM-DD."))
                    })?;
                    paths.today = Some(date);
                }
                _ => return Err(Error::parse(format!("Unknown argument: {arg}"))),
            }
        }
        Ok(paths)
    }

    fn next_value<I>(args: &mut I, flag: &str) -> Result<String>
    where
        I: Iterator<Item = String>,
    {
        args.next()
            .ok_or_else(|| Error::parse(format!("Missing value for {flag}")))
    }
}
