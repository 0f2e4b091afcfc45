use log::Level;

/// Sink for GLPK's terminal output.
///
/// Every solve redirects GLPK's output to the model's logger, so nothing
/// reaches stdout. Closures taking `&str` are loggers too.
pub trait Logger: Send + Sync {
    fn print(&self, message: &str);
}

/// Discards everything; the default
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn print(&self, _message: &str) {}
}

/// Forwards GLPK output to the `log` facade
#[derive(Debug, Clone, Copy)]
pub struct LogForwarder {
    level: Level,
}

impl LogForwarder {
    pub fn new(level: Level) -> Self {
        LogForwarder { level }
    }
}

impl Default for LogForwarder {
    fn default() -> Self {
        LogForwarder::new(Level::Info)
    }
}

impl Logger for LogForwarder {
    fn print(&self, message: &str) {
        log::log!(target: "glpk", self.level, "{}", message);
    }
}

impl<F> Logger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn print(&self, message: &str) {
        self(message)
    }
}
