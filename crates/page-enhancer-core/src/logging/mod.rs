//! Logging for environments without a terminal.
//!
//! Events are captured by [`ConsoleLayer`], rendered as [`ConsoleEntry`]
//! and handed to a [`LogSink`]. The browser front supplies a sink that
//! writes to the developer console; tests use [`MemorySink`].
//!
//! ```ignore
//! use page_enhancer_core::logging::{init_logging, MemorySink};
//!
//! init_logging(MemorySink::new(), "page_enhancer_core=debug")?;
//! ```

pub mod entry;
pub mod layer;

pub use entry::ConsoleEntry;
pub use layer::{init_logging, ConsoleLayer, LogSink, MemorySink};
