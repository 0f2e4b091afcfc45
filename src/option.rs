use std::sync::Arc;

use crate::config::SolverConfig;
use crate::error::ModelError;
use crate::logger::{Logger, NoopLogger};

/// Per-model solver settings
#[derive(Clone)]
pub struct Settings {
    pub(crate) verbose: bool,
    pub(crate) presolve: bool,
    pub(crate) logger: Arc<dyn Logger>,
}

impl Default for Settings {
    fn default() -> Self {
        let config = SolverConfig::default();
        Settings {
            verbose: config.verbose,
            presolve: config.presolve,
            logger: Arc::new(NoopLogger),
        }
    }
}

impl Settings {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn presolve(&self) -> bool {
        self.presolve
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("verbose", &self.verbose)
            .field("presolve", &self.presolve)
            .finish_non_exhaustive()
    }
}

/// Adjusts settings while a model is constructed; an error aborts construction
pub type ModelOption = Box<dyn FnOnce(&mut Settings) -> Result<(), ModelError>>;

pub fn with_logger<L: Logger + 'static>(logger: L) -> ModelOption {
    with_shared_logger(Arc::new(logger))
}

pub fn with_shared_logger(logger: Arc<dyn Logger>) -> ModelOption {
    Box::new(move |settings: &mut Settings| {
        settings.logger = logger;
        Ok(())
    })
}

pub fn with_verbose(verbose: bool) -> ModelOption {
    Box::new(move |settings: &mut Settings| {
        settings.verbose = verbose;
        Ok(())
    })
}

pub fn with_presolve(presolve: bool) -> ModelOption {
    Box::new(move |settings: &mut Settings| {
        settings.presolve = presolve;
        Ok(())
    })
}

pub fn with_config(config: SolverConfig) -> ModelOption {
    Box::new(move |settings: &mut Settings| {
        settings.verbose = config.verbose;
        settings.presolve = config.presolve;
        Ok(())
    })
}

/// Apply [`SolverConfig::from_env`]; fails on malformed variables
pub fn with_env_config() -> ModelOption {
    Box::new(|settings: &mut Settings| {
        let config = SolverConfig::from_env()?;
        with_config(config)(settings)
    })
}

pub(crate) fn apply<I>(options: I) -> Result<Settings, ModelError>
where
    I: IntoIterator<Item = ModelOption>,
{
    let mut settings = Settings::default();
    for option in options {
        option(&mut settings)?;
    }
    Ok(settings)
}
