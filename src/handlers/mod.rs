//! Handler implementations

#[cfg(feature = "console")]
pub mod console;
pub mod json;
pub mod legacy;
pub mod memory;
pub mod multi;

#[cfg(feature = "console")]
pub use console::ConsoleHandler;
pub use json::JsonHandler;
pub use legacy::LegacyHandler;
pub use memory::MemoryHandler;
pub use multi::MultiHandler;

pub use crate::core::{Handler, HandlerFn};
