use std::sync::Arc;

use async_trait::async_trait;

use crate::{error::CommandError, provider::LocationProvider};

use super::{Command, Context};

/// `where`: prints the current location.
#[derive(Debug)]
pub struct WhereAmI {
    location: Arc<dyn LocationProvider>,
}

impl WhereAmI {
    pub fn new(location: Arc<dyn LocationProvider>) -> Self {
        Self { location }
    }
}

#[async_trait]
impl Command for WhereAmI {
    fn name(&self) -> &str {
        "where"
    }

    async fn execute(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<(), CommandError> {
        match self.location.current_location().await {
            Ok(location) => writeln!(ctx.out, "{location}")?,
            Err(err) => {
                tracing::debug!("location lookup failed: {:#}", anyhow::Error::from(err));
                writeln!(ctx.err, "Failed to determine current location")?;
            }
        }
        Ok(())
    }
}
