use crate::command::command_resolver::{
    CommandResolver, CourseResolver, GlobalResolver, ScheduleResolver, ViewResolver,
};
use crate::command::commands::CommandDyn;
use crate::core::store::Store;
use crate::errors::{Error, Result};

/// Finds the resolver that owns a command word and lets it build the command.
pub struct CommandParser<S: Store> {
    registry: Vec<Box<dyn CommandResolver<S>>>,
}

impl<S: Store> Default for CommandParser<S> {
    fn default() -> Self {
        Self {
            registry: vec![
                Box::new(ViewResolver),
                Box::new(CourseResolver),
                Box::new(ScheduleResolver),
                Box::new(GlobalResolver),
            ],
        }
    }
}

impl<S: Store> CommandParser<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, command: &str, args: &[String]) -> Result<CommandDyn<S>> {
        for r in &self.registry {
            if r.can_resolve(command) {
                return r.resolve(command, args);
            }
        }
        Err(Error::UnknownCommand(command.to_string()))
    }
}
