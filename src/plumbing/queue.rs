/*!
 * Queue
 * Buffering fitting released by FLUSH control messages
 *
 * Normal messages are stored until a FLUSH arrives, then written to the
 * output in buffer order. SORT switches to sort-by-priority for subsequent
 * stores (lower priority value first, ties keep arrival order); FIFO
 * switches back. Queues are unnamed, so the first queue on a pipeline
 * consumes every queue control message.
 */

use super::pipe::Pipe;
use super::traits::{FittingRef, PipeFitting};
use crate::core::errors::{PipeError, PipeResult};
use crate::messages::{Message, PipeMessage, QueueControl};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Queue ordering mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueMode {
    /// Arrival order (default)
    #[default]
    Fifo,
    /// Ascending priority value, stable among equal priorities
    Sort,
}

/// Queue statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QueueStats {
    pub mode: QueueMode,
    pub buffered: usize,
    pub connected: bool,
}

#[derive(Default)]
struct QueueState {
    mode: QueueMode,
    messages: Vec<PipeMessage>,
}

#[derive(Default)]
pub struct Queue {
    pipe: Pipe,
    state: Mutex<QueueState>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output(output: FittingRef) -> Self {
        Self {
            pipe: Pipe::with_output(output),
            state: Mutex::default(),
        }
    }

    pub fn mode(&self) -> QueueMode {
        self.state.lock().mode
    }

    pub fn len(&self) -> usize {
        self.state.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().messages.is_empty()
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.state.lock();
        QueueStats {
            mode: state.mode,
            buffered: state.messages.len(),
            connected: self.pipe.is_connected(),
        }
    }

    /// Buffer a message; in SORT mode the whole buffer is re-sorted
    pub fn store(&self, message: PipeMessage) {
        let mut state = self.state.lock();
        state.messages.push(message);
        if state.mode == QueueMode::Sort {
            // stable: equal priorities keep arrival order
            state.messages.sort_by_key(PipeMessage::priority);
        }
    }

    /// Write every buffered message to the output and empty the buffer
    ///
    /// The buffer is taken in one step, so a concurrent `store` lands either
    /// before this flush or in the next one. Every message is attempted even
    /// after a failure. With messages buffered but no output connected the
    /// flush fails with `NotConnected` and the buffer is kept.
    pub fn flush(&self) -> PipeResult<()> {
        let messages = {
            let mut state = self.state.lock();
            if !state.messages.is_empty() && !self.pipe.is_connected() {
                warn!(
                    buffered = state.messages.len(),
                    "Flush on a queue with no connected output"
                );
                return Err(PipeError::NotConnected);
            }
            std::mem::take(&mut state.messages)
        };
        let attempted = messages.len();
        let failed = messages
            .into_iter()
            .map(|message| self.pipe.write(Message::Normal(message)))
            .filter(Result::is_err)
            .count();

        debug!(attempted, failed, "Queue flushed");
        if failed > 0 {
            warn!(attempted, failed, "Queue flush partially failed");
            return Err(PipeError::PartialDelivery { failed, attempted });
        }
        Ok(())
    }

    fn set_mode(&self, mode: QueueMode) {
        self.state.lock().mode = mode;
        debug!(?mode, "Queue mode changed");
    }
}

impl PipeFitting for Queue {
    fn connect(&self, output: FittingRef) -> PipeResult<()> {
        self.pipe.connect(output)
    }

    fn disconnect(&self) -> Option<FittingRef> {
        self.pipe.disconnect()
    }

    fn write(&self, message: Message) -> PipeResult<()> {
        match message {
            Message::Normal(normal) if normal.is_normal() => {
                self.store(normal);
                Ok(())
            }
            Message::Queue(QueueControl::Flush) => self.flush(),
            Message::Queue(QueueControl::Sort) => {
                self.set_mode(QueueMode::Sort);
                Ok(())
            }
            Message::Queue(QueueControl::Fifo) => {
                self.set_mode(QueueMode::Fifo);
                Ok(())
            }
            // filter controls and custom types are not ours to hold
            other => self.pipe.write(other),
        }
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Queue")
            .field("mode", &state.mode)
            .field("buffered", &state.messages.len())
            .field("pipe", &self.pipe)
            .finish()
    }
}
