use crate::command::commands::{
    COLOR_USAGE, CONFIG_USAGE, COURSE_USAGE, COURSES_USAGE, EDIT_USAGE, NEXT_USAGE, PREV_USAGE,
    SHOW_USAGE, TODAY_USAGE, ColorCommand, CommandDyn, ConfigCommand, CourseAddCommand,
    CourseDeleteCommand, CourseShowCommand, CoursesCommand, EditCommand, HELP_USAGE, HelpCommand,
    NavigateCommand, SCHED_USAGE, SET_USAGE, SchedCommand, SetCommand, ShowCommand, TodayCommand,
    UNSCHED_USAGE, UnschedCommand, WEEK_USAGE, WeekCommand,
};
use crate::command::tokens::TokenStream;
use crate::core::store::Store;
use crate::core::types::{
    CourseAction, CourseCommand, GlobalCommand, ScheduleCommand, ViewCommand, WeekStep,
};
use crate::errors::Result;

pub trait CommandResolver<S: Store> {
    fn can_resolve(&self, command: &str) -> bool;
    fn resolve(&self, command: &str, args: &[String]) -> Result<CommandDyn<S>>;
}

fn no_args(args: &[String], usage: &'static str) -> Result<()> {
    TokenStream::new(args, usage).finish()
}

pub struct ViewResolver;

impl<S: Store> CommandResolver<S> for ViewResolver {
    fn can_resolve(&self, command: &str) -> bool {
        ViewCommand::try_from(command).is_ok()
    }

    fn resolve(&self, command: &str, args: &[String]) -> Result<CommandDyn<S>> {
        let cmd: CommandDyn<S> = match ViewCommand::try_from(command)? {
            ViewCommand::Show => {
                no_args(args, SHOW_USAGE)?;
                Box::new(ShowCommand)
            }
            ViewCommand::Next => {
                no_args(args, NEXT_USAGE)?;
                Box::new(NavigateCommand {
                    step: WeekStep::Forward,
                })
            }
            ViewCommand::Prev => {
                no_args(args, PREV_USAGE)?;
                Box::new(NavigateCommand {
                    step: WeekStep::Back,
                })
            }
            ViewCommand::Today => {
                no_args(args, TODAY_USAGE)?;
                Box::new(TodayCommand)
            }
            ViewCommand::Week => {
                Box::new(WeekCommand::parse(&mut TokenStream::new(args, WEEK_USAGE))?)
            }
        };
        Ok(cmd)
    }
}

pub struct CourseResolver;

impl<S: Store> CommandResolver<S> for CourseResolver {
    fn can_resolve(&self, command: &str) -> bool {
        CourseCommand::try_from(command).is_ok()
    }

    fn resolve(&self, command: &str, args: &[String]) -> Result<CommandDyn<S>> {
        match CourseCommand::try_from(command)? {
            CourseCommand::Courses => {
                no_args(args, COURSES_USAGE)?;
                Ok(Box::new(CoursesCommand))
            }
            CourseCommand::Color => Ok(Box::new(ColorCommand::parse(&mut TokenStream::new(
                args,
                COLOR_USAGE,
            ))?)),
            CourseCommand::Course => {
                let mut ts = TokenStream::new(args, COURSE_USAGE);
                let action = ts.next("action (add, del, show)")?;
                match CourseAction::try_from(&action)? {
                    CourseAction::Add => Ok(Box::new(CourseAddCommand::parse(&mut ts)?)),
                    CourseAction::Delete => {
                        let id = ts.next_id("course id")?;
                        ts.finish()?;
                        Ok(Box::new(CourseDeleteCommand { id }))
                    }
                    CourseAction::Show => {
                        let id = ts.next_id("course id")?;
                        ts.finish()?;
                        Ok(Box::new(CourseShowCommand { id }))
                    }
                }
            }
        }
    }
}

pub struct ScheduleResolver;

impl<S: Store> CommandResolver<S> for ScheduleResolver {
    fn can_resolve(&self, command: &str) -> bool {
        ScheduleCommand::try_from(command).is_ok()
    }

    fn resolve(&self, command: &str, args: &[String]) -> Result<CommandDyn<S>> {
        match ScheduleCommand::try_from(command)? {
            ScheduleCommand::Sched => Ok(Box::new(SchedCommand::parse(&mut TokenStream::new(
                args,
                SCHED_USAGE,
            ))?)),
            ScheduleCommand::Unsched => {
                let mut ts = TokenStream::new(args, UNSCHED_USAGE);
                let id = ts.next_id("schedule id")?;
                ts.finish()?;
                Ok(Box::new(UnschedCommand { id }))
            }
            ScheduleCommand::Edit => Ok(Box::new(EditCommand::parse(&mut TokenStream::new(
                args,
                EDIT_USAGE,
            ))?)),
        }
    }
}

pub struct GlobalResolver;

impl<S: Store> CommandResolver<S> for GlobalResolver {
    fn can_resolve(&self, command: &str) -> bool {
        GlobalCommand::try_from(command).is_ok()
    }

    fn resolve(&self, command: &str, args: &[String]) -> Result<CommandDyn<S>> {
        match GlobalCommand::try_from(command)? {
            GlobalCommand::Config => {
                no_args(args, CONFIG_USAGE)?;
                Ok(Box::new(ConfigCommand))
            }
            GlobalCommand::Set => Ok(Box::new(SetCommand::parse(&mut TokenStream::new(
                args, SET_USAGE,
            ))?)),
            GlobalCommand::Help => {
                let mut ts = TokenStream::new(args, HELP_USAGE);
                let topic = if ts.eof() { None } else { Some(ts.next("topic")?) };
                ts.finish()?;
                Ok(Box::new(HelpCommand { topic }))
            }
        }
    }
}
