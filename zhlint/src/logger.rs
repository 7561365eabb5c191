/// Where the linter reports non-fatal problems, such as ignore patterns
/// that matched nothing.
pub trait Logger: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
