//! Tool management and execution framework
//!
//! Tools are the capabilities a model can request by name. Each tool owns the
//! decoding of its own arguments, so the registry dispatches purely by name.

pub mod error;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use tool::{Tool, decode_params};
