/*!
 * Tee Merge
 * Fan-in fitting: many upstream fittings, one output
 */

use super::pipe::Pipe;
use super::traits::{FittingRef, PipeFitting};
use crate::core::errors::PipeResult;
use crate::messages::Message;
use std::fmt;
use std::sync::Arc;

/// Merging tee
///
/// Fan-in needs no extra state: each upstream fitting connects its own
/// output to the shared merge, which forwards like a plain `Pipe`.
#[derive(Default)]
pub struct TeeMerge {
    pipe: Pipe,
}

impl TeeMerge {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output(output: FittingRef) -> Self {
        Self {
            pipe: Pipe::with_output(output),
        }
    }

    /// Connect an upstream fitting into this merge
    ///
    /// May be called for any number of inputs. Fails when `input` already
    /// has an output of its own.
    pub fn connect_input(self: &Arc<Self>, input: &dyn PipeFitting) -> PipeResult<()> {
        let this: FittingRef = self.clone();
        input.connect(this)
    }
}

impl PipeFitting for TeeMerge {
    fn connect(&self, output: FittingRef) -> PipeResult<()> {
        self.pipe.connect(output)
    }

    fn disconnect(&self) -> Option<FittingRef> {
        self.pipe.disconnect()
    }

    fn write(&self, message: Message) -> PipeResult<()> {
        self.pipe.write(message)
    }
}

impl fmt::Debug for TeeMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeeMerge").field("pipe", &self.pipe).finish()
    }
}
