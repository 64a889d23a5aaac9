use std::{collections::HashMap, sync::Arc};

use crate::{
    command::{Command, Context, Help},
    error::CommandError,
};

/// Supplies the initial set of commands for a [`CommandRegistry`].
pub trait CommandLoader {
    fn load(&self) -> Vec<Arc<dyn Command>>;
}

/// Outcome of dispatching one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank line, nothing to do.
    Empty,
    /// No command with that name; carries the token as typed.
    Unknown(String),
    /// The command rejected its arguments; carries the message shown to the user.
    Rejected(String),
    Executed,
}

/// Name-indexed commands plus the built-in `help`. Read-only once built.
#[derive(Debug)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new(loader: &dyn CommandLoader) -> Self {
        let loaded: Vec<Arc<dyn Command>> = loader
            .load()
            .into_iter()
            .filter(|c| c.name() != Help::NAME)
            .collect();

        let mut commands: HashMap<String, Arc<dyn Command>> = loaded
            .iter()
            .map(|c| (c.name().to_string(), Arc::clone(c)))
            .collect();
        commands.insert(Help::NAME.to_string(), Arc::new(Help::new(&loaded)));

        Self { commands }
    }

    /// Looks up a command; `name` is lower-cased first.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    /// Every registered command, `help` included, in no particular order.
    pub fn all_commands(&self) -> Vec<Arc<dyn Command>> {
        self.commands.values().cloned().collect()
    }

    /// Routes one raw input line. Input validation errors are reported on
    /// `ctx.err`; any other error is returned to the caller.
    pub async fn dispatch(&self, line: &str, ctx: &mut Context<'_>) -> Result<Dispatch, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(Dispatch::Empty);
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let Some(command) = self.get(name) else {
            tracing::debug!(name, "unknown command");
            writeln!(ctx.err, "Unknown command '{name}'")?;
            return Ok(Dispatch::Unknown(name.to_string()));
        };

        tracing::debug!(command = command.name(), ?args, "executing command");
        match command.execute(ctx, &args).await {
            Ok(()) => Ok(Dispatch::Executed),
            Err(CommandError::InvalidInput(message)) => {
                writeln!(ctx.err, "{message}")?;
                Ok(Dispatch::Rejected(message))
            }
            Err(err) => Err(err),
        }
    }
}
