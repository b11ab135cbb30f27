//! Error types for the dispatch logger

use std::time::Duration;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Emit attempted after `close` began
    #[error("Logger already stopped")]
    LoggerStopped,

    /// Emit attempted from inside the processor, on the worker thread
    #[error("Log line emitted from the worker thread would deadlock the dispatch queue")]
    ReentrantEmit,

    /// `close` called from inside the processor
    #[error("Logger cannot be closed from its own worker thread")]
    ReentrantClose,

    /// The worker is gone and nothing will drain the queue
    #[error("Dispatch worker is no longer receiving log lines")]
    WorkerUnavailable,

    /// The worker thread terminated by panicking
    #[error("Dispatch worker panicked: {0}")]
    WorkerPanicked(String),

    /// The worker did not drain within the allotted time
    #[error("Dispatch worker did not finish within {timeout:?}")]
    ShutdownTimeout { timeout: Duration },

    /// A background thread could not be started
    #[error("Failed to spawn {component} thread")]
    SpawnFailed {
        component: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    pub fn spawn_failed(component: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SpawnFailed {
            component: component.into(),
            source,
        }
    }

    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub(crate) fn worker_panicked(payload: Box<dyn std::any::Any + Send>) -> Self {
        LoggerError::WorkerPanicked(panic_message(payload.as_ref()))
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
