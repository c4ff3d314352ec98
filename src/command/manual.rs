use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display as DisplayDerive, EnumIter as EnumIterDerive, EnumString};

use crate::command::commands::{
    COLOR_USAGE, CONFIG_USAGE, COURSE_USAGE, COURSES_USAGE, EDIT_USAGE, NEXT_USAGE,
    PREV_USAGE, SCHED_USAGE, SET_USAGE, SHOW_USAGE, TODAY_USAGE, UNSCHED_USAGE, WEEK_USAGE,
};
use crate::config::ConfigKey;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::layout::colors::PaletteColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, DisplayDerive, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ManualTopic {
    General,
    Week,
    Course,
    Sched,
    Config,
    Time,
    Colors,
    Layout,
}

impl ManualTopic {
    pub fn try_from(input: &str) -> Result<Self> {
        Self::from_str(input.trim()).map_err(|_| {
            Error::parse(format!(
                "Unsupported manual topic: '{}'. Valid topics: {}",
                input.trim(),
                valid_csv::<ManualTopic>()
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ManualSection {
    title: String,
    body: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ManualPage {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPage {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_section(
            "NAME",
            &[format!("{} - {}", self.name, self.summary)],
            &mut out,
        );
        for section in &self.sections {
            self.write_section(&section.title, &section.body, &mut out);
        }
        out.trim_end().to_string()
    }

    fn write_section(&self, title: &str, lines: &[String], out: &mut String) {
        out.push_str(&title.to_uppercase());
        out.push('\n');
        for line in lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
}

pub struct ManualPageBuilder {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPageBuilder {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, title: &str, body: Vec<String>) -> Self {
        self.sections.push(ManualSection {
            title: title.to_string(),
            body,
        });
        self
    }

    pub fn build(self) -> ManualPage {
        ManualPage {
            name: self.name,
            summary: self.summary,
            sections: self.sections,
        }
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ManualCatalog;

impl ManualCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn page_for(&self, topic: Option<&str>) -> Result<ManualPage> {
        let topic = match topic {
            None => ManualTopic::General,
            Some(name) => ManualTopic::try_from(name)?,
        };
        Ok(self.build_page(topic))
    }

    pub fn topics(&self) -> Vec<String> {
        ManualTopic::iter().map(|t| t.to_string()).collect()
    }

    fn build_page(&self, topic: ManualTopic) -> ManualPage {
        match topic {
            ManualTopic::General => self.general_page(),
            ManualTopic::Week => ManualPageBuilder::new("week", "Move through weeks and redraw.")
                .section(
                    "SYNOPSIS",
                    lines(&[SHOW_USAGE, NEXT_USAGE, PREV_USAGE, TODAY_USAGE, WEEK_USAGE]),
                )
                .section(
                    "DESCRIPTION",
                    lines(&[
                        "Weeks run Sunday to Saturday.",
                        "Every navigation reloads schedules before drawing.",
                        "'week' shows the week containing the given date.",
                    ]),
                )
                .build(),
            ManualTopic::Course => ManualPageBuilder::new("course", "Create, list and remove courses.")
                .section("SYNOPSIS", lines(&[COURSES_USAGE, COURSE_USAGE, COLOR_USAGE]))
                .section(
                    "DESCRIPTION",
                    lines(&[
                        "Titles with spaces can be quoted or typed as separate words.",
                        "Deleting a course deletes its meetings first.",
                        "'color <id> default' goes back to the palette color.",
                    ]),
                )
                .section("SEE ALSO", lines(&["sched", "colors"]))
                .build(),
            ManualTopic::Sched => ManualPageBuilder::new("sched", "Set the weekly meetings of a course.")
                .section("SYNOPSIS", lines(&[SCHED_USAGE, EDIT_USAGE, UNSCHED_USAGE]))
                .section(
                    "DESCRIPTION",
                    lines(&[
                        "'sched' replaces all meetings of the course with the ones given.",
                        "Every meeting is checked before anything is saved.",
                        "If saving stops halfway, re-open the course with 'course show <id>'.",
                        "Example: sched 1 mon 09:00-10:15 wed 09:00-10:15",
                    ]),
                )
                .section("SEE ALSO", lines(&["time", "course"]))
                .build(),
            ManualTopic::Config => ManualPageBuilder::new("config", "View or edit layout settings.")
                .section("SYNOPSIS", lines(&[CONFIG_USAGE, SET_USAGE]))
                .section(
                    "KEYS",
                    ConfigKey::iter().map(|k| k.to_string()).collect(),
                )
                .section(
                    "DESCRIPTION",
                    lines(&[
                        "'config' opens a step-by-step editor.",
                        "'set' changes one key directly and saves the file.",
                    ]),
                )
                .build(),
            ManualTopic::Time => ManualPageBuilder::new("time", "Days and time ranges.")
                .section(
                    "DAYS",
                    lines(&["sun mon tue wed thu fri sat, full names, or 0 (Sunday) to 6."]),
                )
                .section(
                    "RANGES",
                    lines(&[
                        "HH:MM-HH:MM on a 24-hour clock, e.g. 13:30-14:45.",
                        "The end must be later than the start, on the same day.",
                    ]),
                )
                .build(),
            ManualTopic::Colors => ManualPageBuilder::new("colors", "Course colors.")
                .section(
                    "FORMAT",
                    lines(&["#rgb or #rrggbb, e.g. #3b82f6."]),
                )
                .section(
                    "PALETTE",
                    PaletteColor::iter()
                        .map(|c| format!("{:<8} {}", c.to_string(), c.hex()))
                        .collect(),
                )
                .section(
                    "DESCRIPTION",
                    lines(&[
                        "Courses without a color take a palette slot by title order.",
                        "Adding or removing a course can shift those defaults.",
                    ]),
                )
                .build(),
            ManualTopic::Layout => ManualPageBuilder::new("layout", "How blocks are placed.")
                .section(
                    "DESCRIPTION",
                    lines(&[
                        "Meetings that overlap, directly or through a chain, share one group.",
                        "A group is split into at most MAX_COLUMNS columns.",
                        "Extra meetings wrap to the first columns one layer up.",
                        "Top and height follow HOUR_HEIGHT_PX per hour from midnight.",
                    ]),
                )
                .build(),
        }
    }

    fn general_page(&self) -> ManualPage {
        ManualPageBuilder::new("weekgrid", "Weekly course calendar.")
            .section("SYNOPSIS", lines(&["<command> [args]"]))
            .section("COMMANDS", general_command_lines())
            .section(
                "TOPICS",
                vec![
                    "Use 'help <topic>' for details.".to_string(),
                    format!("Available topics: {}", self.topics().join(", ")),
                ],
            )
            .build()
    }
}

fn general_command_lines() -> Vec<String> {
    lines(&[
        "show | next | prev | today          # Draw a week",
        "week <YYYY-MM-DD>                   # Jump to the week of a date",
        "courses                             # List courses and colors",
        "course add \"<title>\" [#rrggbb]      # Add a course",
        "course del <id> | course show <id>  # Remove or inspect a course",
        "color <id> <#rrggbb|default>        # Set or clear a course color",
        "sched <id> [<day> <HH:MM-HH:MM>]... # Replace a course's meetings",
        "edit <schedule_id> <day> <range>    # Change one meeting",
        "unsched <schedule_id>               # Remove one meeting",
        "config | set <KEY> <value>          # Layout settings",
        "help [topic] | exit",
    ])
}
