/*!
 * Plumbing Module
 * Fittings, junctions and the wiring between them
 */

pub mod filter;
pub mod flow;
pub mod junction;
pub mod listener;
pub mod mediator;
pub mod pipe;
pub mod queue;
pub mod tee_merge;
pub mod tee_split;
pub mod traits;

// Re-export public API
pub use filter::{Filter, FilterMode};
pub use flow::{max_pipeline_depth, set_max_pipeline_depth};
pub use junction::{Junction, JunctionStats, PipeDirection, INPUT, OUTPUT};
pub use listener::{ListenerFn, PipeListener};
pub use mediator::{JunctionMediator, PipeAware, PipeMessageHandler};
pub use pipe::Pipe;
pub use queue::{Queue, QueueMode, QueueStats};
pub use tee_merge::TeeMerge;
pub use tee_split::TeeSplit;
pub use traits::{same_fitting, FittingRef, PipeFitting};
