/*!
 * Pipe Listener
 * Terminal fitting handing messages to arbitrary code
 */

use super::traits::{FittingRef, PipeFitting};
use crate::core::errors::{PipeError, PipeResult};
use crate::messages::Message;
use std::fmt;

/// Callback receiving every message that reaches a listener
pub type ListenerFn = Box<dyn Fn(Message) + Send + Sync>;

/// End of a pipeline
///
/// The callback runs on the writer's call stack, once per message, in the
/// order the messages were written. Nothing can be connected after it.
pub struct PipeListener {
    listener: ListenerFn,
}

impl PipeListener {
    pub fn new<F>(listener: F) -> Self
    where
        F: Fn(Message) + Send + Sync + 'static,
    {
        Self {
            listener: Box::new(listener),
        }
    }
}

impl PipeFitting for PipeListener {
    fn connect(&self, _output: FittingRef) -> PipeResult<()> {
        Err(PipeError::Terminal)
    }

    fn disconnect(&self) -> Option<FittingRef> {
        None
    }

    fn write(&self, message: Message) -> PipeResult<()> {
        (self.listener)(message);
        Ok(())
    }
}

impl fmt::Debug for PipeListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PipeListener")
    }
}
