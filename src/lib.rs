/*!
 * Pipeworks
 * Synchronous message pipelines built from connectable fittings
 *
 * Messages written into a fitting travel down the chain on the writer's
 * call stack: pipes pass them on, filters transform or veto them, queues
 * buffer them until flushed, tees split and merge branches, and a
 * `PipeListener` hands them to application code. Filters and queues are
 * reconfigured in-band by control messages written into the same pipeline.
 * A `Junction` gives a module named input and output pipes.
 */

pub mod core;
pub mod messages;
pub mod monitoring;
pub mod plumbing;

// Re-exports
pub use crate::core::{
    ConfigError, JunctionError, JunctionResult, Params, Payload, PipeError, PipeResult,
    PipesConfig, Priority,
};
pub use messages::{
    filter_fn, FilterAction, FilterControl, FilterFn, Message, PipeMessage, QueueControl,
};
pub use monitoring::init_tracing;
pub use plumbing::{
    same_fitting, Filter, FilterMode, FittingRef, Junction, JunctionMediator, JunctionStats,
    Pipe, PipeAware, PipeDirection, PipeFitting, PipeListener, PipeMessageHandler, Queue,
    QueueMode, QueueStats, TeeMerge, TeeSplit,
};
