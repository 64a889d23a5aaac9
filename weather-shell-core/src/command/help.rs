use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CommandError;

use super::{Command, Context};

/// `help`: lists the commands it was built with, sorted by name.
#[derive(Debug)]
pub struct Help {
    commands: Vec<Arc<dyn Command>>,
}

impl Help {
    pub const NAME: &'static str = "help";

    pub fn new(commands: &[Arc<dyn Command>]) -> Self {
        let mut commands = commands.to_vec();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        Self { commands }
    }
}

#[async_trait]
impl Command for Help {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn execute(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<(), CommandError> {
        writeln!(ctx.out, "Available commands:")?;
        for command in &self.commands {
            writeln!(ctx.out, " - {}", command.name())?;
        }
        Ok(())
    }
}
