/*!
 * Tee Split
 * Fan-out fitting writing each message to every connected output
 */

use super::flow;
use super::traits::{same_fitting, FittingRef, PipeFitting};
use crate::core::errors::{PipeError, PipeResult};
use crate::messages::Message;
use parking_lot::RwLock;
use std::fmt;
use tracing::debug;

/// Splitting tee
///
/// Any number of outputs, written in connection order. Each output receives
/// its own copy of the message, so a filter on one branch cannot alter what
/// another branch sees. The same fitting may be connected more than once.
#[derive(Default)]
pub struct TeeSplit {
    outputs: RwLock<Vec<FittingRef>>,
}

impl TeeSplit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tee already connected to `outputs`, in order
    pub fn with_outputs(outputs: impl IntoIterator<Item = FittingRef>) -> Self {
        Self {
            outputs: RwLock::new(outputs.into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.outputs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.read().is_empty()
    }

    /// Disconnect a specific output
    ///
    /// Removes the first connection to `target` and returns it, or `None`
    /// when `target` is not connected. Further connections to the same
    /// fitting stay in place.
    pub fn disconnect_fitting(&self, target: &FittingRef) -> Option<FittingRef> {
        let mut outputs = self.outputs.write();
        let index = outputs
            .iter()
            .position(|output| same_fitting(output, target))?;
        Some(outputs.remove(index))
    }
}

impl PipeFitting for TeeSplit {
    /// Append an output; always succeeds
    fn connect(&self, output: FittingRef) -> PipeResult<()> {
        self.outputs.write().push(output);
        Ok(())
    }

    /// Disconnect the most recently connected output (LIFO)
    ///
    /// Returns `None` once every output has been disconnected.
    fn disconnect(&self) -> Option<FittingRef> {
        self.outputs.write().pop()
    }

    /// Write to every output; fails if any output failed, but all are tried
    fn write(&self, message: Message) -> PipeResult<()> {
        // snapshot so outputs may rewire this tee while handling the message
        let outputs = self.outputs.read().clone();
        let attempted = outputs.len();

        let mut failed = 0;
        if let Some((last, rest)) = outputs.split_last() {
            for output in rest {
                if flow::forward(output, message.clone()).is_err() {
                    failed += 1;
                }
            }
            if flow::forward(last, message).is_err() {
                failed += 1;
            }
        }

        if failed > 0 {
            debug!(attempted, failed, "Tee split delivery partially failed");
            return Err(PipeError::PartialDelivery { failed, attempted });
        }
        Ok(())
    }
}

impl fmt::Debug for TeeSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeeSplit")
            .field("outputs", &self.len())
            .finish()
    }
}
