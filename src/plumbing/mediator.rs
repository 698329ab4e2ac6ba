/*!
 * Junction Mediator
 * Glue between a module's junction and its message handler
 */

use super::junction::{Junction, PipeDirection};
use super::traits::FittingRef;
use crate::core::errors::JunctionResult;
use crate::messages::Message;
use std::sync::Arc;
use tracing::debug;

/// Implemented by modules that accept pipes from whoever wires them together
pub trait PipeAware {
    /// Accept a pipe carrying messages into the module
    fn accept_input_pipe(&self, name: &str, pipe: FittingRef) -> JunctionResult<()>;

    /// Accept a pipe carrying messages out of the module
    fn accept_output_pipe(&self, name: &str, pipe: FittingRef) -> JunctionResult<()>;
}

/// Receives every message arriving on the module's input pipes
pub trait PipeMessageHandler: Send + Sync + 'static {
    fn handle_pipe_message(&self, message: Message);
}

impl<F> PipeMessageHandler for F
where
    F: Fn(Message) + Send + Sync + 'static,
{
    fn handle_pipe_message(&self, message: Message) {
        self(message)
    }
}

/// Registers accepted pipes on a junction and routes inbound traffic to one
/// handler
pub struct JunctionMediator<H: PipeMessageHandler> {
    junction: Arc<Junction>,
    handler: Arc<H>,
}

impl<H: PipeMessageHandler> JunctionMediator<H> {
    pub fn new(handler: H) -> Self {
        Self::with_junction(Arc::new(Junction::new()), handler)
    }

    pub fn with_junction(junction: Arc<Junction>, handler: H) -> Self {
        Self {
            junction,
            handler: Arc::new(handler),
        }
    }

    pub fn junction(&self) -> &Arc<Junction> {
        &self.junction
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }

    /// Send a message on one of the module's output pipes
    pub fn send_message(&self, output_name: &str, message: Message) -> JunctionResult<()> {
        self.junction.send_message(output_name, message)
    }
}

impl<H: PipeMessageHandler> PipeAware for JunctionMediator<H> {
    /// Register as INPUT and attach the handler as its listener
    ///
    /// If the listener cannot be attached the pipe stays registered, as the
    /// caller may still want to retrieve or rewire it.
    fn accept_input_pipe(&self, name: &str, pipe: FittingRef) -> JunctionResult<()> {
        self.junction.register_pipe(name, PipeDirection::Input, pipe)?;

        let handler = Arc::clone(&self.handler);
        self.junction
            .add_pipe_listener(name, move |message| handler.handle_pipe_message(message))?;

        debug!(pipe = %name, "Accepted input pipe");
        Ok(())
    }

    fn accept_output_pipe(&self, name: &str, pipe: FittingRef) -> JunctionResult<()> {
        self.junction.register_pipe(name, PipeDirection::Output, pipe)?;
        debug!(pipe = %name, "Accepted output pipe");
        Ok(())
    }
}
