//! Commands available in the interactive session.

use std::{fmt::Debug, io::Write, sync::Arc};

use async_trait::async_trait;

use crate::{
    error::CommandError,
    provider::{LocationProvider, WeatherProvider},
    registry::CommandLoader,
};

mod current;
mod help;
mod remote;
mod where_am_i;

pub use current::CurrentWeather;
pub use help::Help;
pub use remote::RemoteWeather;
pub use where_am_i::WhereAmI;

/// Console streams a command writes to.
pub struct Context<'a> {
    pub out: &'a mut (dyn Write + Send),
    pub err: &'a mut (dyn Write + Send),
}

impl<'a> Context<'a> {
    pub fn new(out: &'a mut (dyn Write + Send), err: &'a mut (dyn Write + Send)) -> Self {
        Self { out, err }
    }
}

/// A named action the user can invoke by typing its name followed by
/// whitespace-separated arguments.
#[async_trait]
pub trait Command: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Runs the command. Lookup failures are reported on `ctx.err` and are
    /// not errors; [`CommandError::InvalidInput`] signals malformed arguments.
    async fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError>;
}

/// Loads `where`, `current` and `remote`, wired to the given providers.
#[derive(Debug, Clone)]
pub struct StandardCommands {
    location: Arc<dyn LocationProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl StandardCommands {
    pub fn new(location: Arc<dyn LocationProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { location, weather }
    }
}

impl CommandLoader for StandardCommands {
    fn load(&self) -> Vec<Arc<dyn Command>> {
        vec![
            Arc::new(WhereAmI::new(self.location.clone())),
            Arc::new(CurrentWeather::new(self.weather.clone(), self.location.clone())),
            Arc::new(RemoteWeather::new(self.weather.clone())),
        ]
    }
}
