/*!
 * Message Flow
 * Single forwarding path between fittings with a per-thread depth guard
 */

use super::traits::FittingRef;
use crate::core::errors::{PipeError, PipeResult};
use crate::core::limits::DEFAULT_MAX_PIPELINE_DEPTH;
use crate::messages::Message;
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{error, trace};

static MAX_DEPTH: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_PIPELINE_DEPTH);

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Set the process-wide hop limit for a single write
pub fn set_max_pipeline_depth(max: usize) {
    MAX_DEPTH.store(max.max(1), Ordering::Relaxed);
}

/// Current process-wide hop limit
pub fn max_pipeline_depth() -> usize {
    MAX_DEPTH.load(Ordering::Relaxed)
}

/// Hops taken by the write currently running on this thread
pub fn current_depth() -> usize {
    DEPTH.with(Cell::get)
}

/// RAII hop counter; released on drop, including on early return
struct DepthGuard;

impl DepthGuard {
    fn enter() -> PipeResult<Self> {
        let max = max_pipeline_depth();
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= max {
                return Err(PipeError::DepthExceeded { max });
            }
            depth.set(current + 1);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Write a message into `output`, counting the hop
pub(crate) fn forward(output: &FittingRef, message: Message) -> PipeResult<()> {
    let _guard = match DepthGuard::enter() {
        Ok(guard) => guard,
        Err(err) => {
            error!(
                message_type = message.message_type(),
                max = max_pipeline_depth(),
                "Pipeline depth exceeded, dropping message (cyclic connection?)"
            );
            return Err(err);
        }
    };
    trace!(
        depth = current_depth(),
        message_type = message.message_type(),
        "Forwarding message"
    );
    output.write(message)
}
