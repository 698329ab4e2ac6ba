/*!
 * Fitting Traits
 * The capability set shared by every pipeline stage
 */

use crate::core::errors::PipeResult;
use crate::messages::Message;
use std::sync::Arc;

/// Shared handle to any fitting
pub type FittingRef = Arc<dyn PipeFitting>;

/// Pipeline stage
///
/// Fittings connect in a one-way chain and forward messages synchronously
/// on the writer's call stack. The connection graph must stay acyclic.
pub trait PipeFitting: Send + Sync {
    /// Connect a fitting to the output
    ///
    /// Single-output fittings fail with `AlreadyConnected` when an output is
    /// present and leave the existing connection in place.
    fn connect(&self, output: FittingRef) -> PipeResult<()>;

    /// Disconnect and return the output fitting, if any
    ///
    /// When splicing a fitting into a pipeline, keep the returned reference
    /// to reconnect it on the far side.
    fn disconnect(&self) -> Option<FittingRef>;

    /// Write a message into this fitting
    fn write(&self, message: Message) -> PipeResult<()>;
}

/// Pointer identity of two fitting handles
#[inline]
pub fn same_fitting(a: &FittingRef, b: &FittingRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
