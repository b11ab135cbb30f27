//! Processor implementations

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "console")]
pub use console::ConsoleProcessor;

pub use crate::core::Processor;
