/*!
 * Messages Module
 * Normal and control messages flowing through pipelines
 */

pub mod control;
pub mod message;
pub mod types;

// Re-export public API
pub use control::{filter_fn, FilterAction, FilterControl, FilterFn, QueueControl};
pub use message::{Message, PipeMessage};
pub use types::*;
