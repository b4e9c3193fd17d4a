pub mod config;
pub mod context;
pub mod error;
pub mod expression;
pub mod generate;
pub mod render;
pub mod workflow;

pub use error::{ErrorCategory, FlowError, FlowResult};
