/*!
 * Pipe
 * The most basic fitting: one output, messages forwarded unchanged
 */

use super::flow;
use super::traits::{FittingRef, PipeFitting};
use crate::core::errors::{PipeError, PipeResult};
use crate::messages::Message;
use parking_lot::RwLock;
use std::fmt;
use tracing::warn;

/// Single-output pass-through fitting
///
/// Also the output slot embedded by `Filter`, `Queue` and `TeeMerge`.
#[derive(Default)]
pub struct Pipe {
    output: RwLock<Option<FittingRef>>,
}

impl Pipe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipe already connected to `output`
    pub fn with_output(output: FittingRef) -> Self {
        Self {
            output: RwLock::new(Some(output)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.output.read().is_some()
    }

    /// Currently connected output, if any
    pub fn output(&self) -> Option<FittingRef> {
        self.output.read().clone()
    }
}

impl PipeFitting for Pipe {
    fn connect(&self, output: FittingRef) -> PipeResult<()> {
        let mut slot = self.output.write();
        if slot.is_some() {
            return Err(PipeError::AlreadyConnected);
        }
        *slot = Some(output);
        Ok(())
    }

    fn disconnect(&self) -> Option<FittingRef> {
        self.output.write().take()
    }

    /// Forward to the connected output
    ///
    /// Writing with nothing connected is a wiring error and fails with
    /// `NotConnected`. The lock is released before forwarding so downstream
    /// fittings may rewire this pipe.
    fn write(&self, message: Message) -> PipeResult<()> {
        let Some(output) = self.output() else {
            warn!(
                message_type = message.message_type(),
                "Write on a fitting with no connected output"
            );
            return Err(PipeError::NotConnected);
        };
        flow::forward(&output, message)
    }
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("connected", &self.is_connected())
            .finish()
    }
}
