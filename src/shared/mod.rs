//! Geteilte Typen, die von Bibliothek und Binary gemeinsam genutzt werden.

pub mod options;

pub use options::{ToolOptions, CONFIG_FILE_NAME};
