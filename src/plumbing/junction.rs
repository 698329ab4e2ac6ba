/*!
 * Junction
 * Named registry of a module's input and output pipes
 *
 * Pipes are registered by unique name as INPUT or OUTPUT; a name cannot be
 * used for both. A listener callback can be attached to an INPUT pipe, and
 * messages can be sent on an OUTPUT pipe.
 */

use super::flow;
use super::listener::PipeListener;
use super::traits::FittingRef;
use crate::core::errors::{JunctionError, JunctionResult};
use crate::messages::Message;
use ahash::HashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// String form of [`PipeDirection::Input`]
pub const INPUT: &str = "input";

/// String form of [`PipeDirection::Output`]
pub const OUTPUT: &str = "output";

/// Which way a registered pipe faces, seen from the owning module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeDirection {
    /// Messages arrive at the module
    Input,
    /// Messages leave the module
    Output,
}

impl PipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipeDirection::Input => INPUT,
            PipeDirection::Output => OUTPUT,
        }
    }
}

impl fmt::Display for PipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipeDirection {
    type Err = JunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            INPUT => Ok(PipeDirection::Input),
            OUTPUT => Ok(PipeDirection::Output),
            other => Err(JunctionError::UnknownDirection(other.to_string())),
        }
    }
}

/// Snapshot of a junction's registered pipe names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JunctionStats {
    pub input_pipes: Vec<String>,
    pub output_pipes: Vec<String>,
}

/// Registry state, always locked as a unit
#[derive(Default)]
struct Registry {
    pipes: HashMap<String, FittingRef>,
    directions: HashMap<String, PipeDirection>,
    input_pipes: Vec<String>,
    output_pipes: Vec<String>,
}

impl Registry {
    fn lookup(&self, name: &str, direction: PipeDirection) -> Option<FittingRef> {
        match self.directions.get(name) {
            Some(registered) if *registered == direction => self.pipes.get(name).cloned(),
            _ => None,
        }
    }
}

/// Pipe junction
///
/// # Locking
/// One reader/writer lock covers the whole registry. Lookups share it;
/// registration and removal take it exclusively. The lock is never held
/// while a message travels down a pipe, so listeners may call back into
/// the junction.
///
/// `add_pipe_listener` looks the pipe up under the read lock and connects
/// after releasing it. A `remove_pipe` racing with it can leave the listener
/// attached to a pipe that is no longer registered; the removed pipe
/// returned to the caller then carries that listener.
#[derive(Default)]
pub struct Junction {
    registry: RwLock<Registry>,
}

impl Junction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pipe under a unique name
    ///
    /// Fails with `DuplicatePipe` if the name is taken in either direction.
    pub fn register_pipe(
        &self,
        name: impl Into<String>,
        direction: PipeDirection,
        pipe: FittingRef,
    ) -> JunctionResult<()> {
        let name = name.into();
        let mut registry = self.registry.write();

        if registry.pipes.contains_key(&name) {
            debug!(pipe = %name, %direction, "Pipe name already registered");
            return Err(JunctionError::DuplicatePipe(name));
        }

        registry.pipes.insert(name.clone(), pipe);
        registry.directions.insert(name.clone(), direction);
        match direction {
            PipeDirection::Input => registry.input_pipes.push(name.clone()),
            PipeDirection::Output => registry.output_pipes.push(name.clone()),
        }

        info!(pipe = %name, %direction, "Registered pipe");
        Ok(())
    }

    /// Register a pipe with the direction given as "input" or "output"
    ///
    /// An unknown direction fails with `UnknownDirection` and registers nothing.
    pub fn register_pipe_str(
        &self,
        name: impl Into<String>,
        direction: &str,
        pipe: FittingRef,
    ) -> JunctionResult<()> {
        let direction = direction.parse()?;
        self.register_pipe(name, direction, pipe)
    }

    pub fn has_pipe(&self, name: &str) -> bool {
        self.registry.read().pipes.contains_key(name)
    }

    pub fn has_input_pipe(&self, name: &str) -> bool {
        self.registry.read().directions.get(name) == Some(&PipeDirection::Input)
    }

    pub fn has_output_pipe(&self, name: &str) -> bool {
        self.registry.read().directions.get(name) == Some(&PipeDirection::Output)
    }

    /// Direction a name is registered with, if any
    pub fn pipe_direction(&self, name: &str) -> Option<PipeDirection> {
        self.registry.read().directions.get(name).copied()
    }

    /// Remove a pipe, returning it; no-op when the name is not registered
    pub fn remove_pipe(&self, name: &str) -> Option<FittingRef> {
        let mut registry = self.registry.write();

        let pipe = registry.pipes.remove(name)?;
        let direction = registry.directions.remove(name);
        let names = match direction {
            Some(PipeDirection::Input) => &mut registry.input_pipes,
            Some(PipeDirection::Output) => &mut registry.output_pipes,
            None => return Some(pipe),
        };
        names.retain(|registered| registered != name);

        info!(pipe = %name, "Removed pipe");
        Some(pipe)
    }

    pub fn retrieve_pipe(&self, name: &str) -> Option<FittingRef> {
        self.registry.read().pipes.get(name).cloned()
    }

    /// Input pipe names in registration order
    pub fn input_pipes(&self) -> Vec<String> {
        self.registry.read().input_pipes.clone()
    }

    /// Output pipe names in registration order
    pub fn output_pipes(&self) -> Vec<String> {
        self.registry.read().output_pipes.clone()
    }

    pub fn stats(&self) -> JunctionStats {
        let registry = self.registry.read();
        JunctionStats {
            input_pipes: registry.input_pipes.clone(),
            output_pipes: registry.output_pipes.clone(),
        }
    }

    /// Attach a listener callback as the output of an INPUT pipe
    ///
    /// Fails with `NotAnInput` for unknown or OUTPUT names, and with
    /// `AlreadyConnected` when the pipe already has an output: a
    /// single-output pipe accepts one listener only.
    pub fn add_pipe_listener<F>(&self, input_name: &str, listener: F) -> JunctionResult<()>
    where
        F: Fn(Message) + Send + Sync + 'static,
    {
        let pipe = self
            .registry
            .read()
            .lookup(input_name, PipeDirection::Input)
            .ok_or_else(|| JunctionError::NotAnInput(input_name.to_string()))?;

        pipe.connect(Arc::new(PipeListener::new(listener)))?;
        debug!(pipe = %input_name, "Attached pipe listener");
        Ok(())
    }

    /// Write a message on an OUTPUT pipe
    ///
    /// Fails with `NotAnOutput`, without writing, for unknown or INPUT names.
    pub fn send_message(&self, output_name: &str, message: Message) -> JunctionResult<()> {
        let pipe = self
            .registry
            .read()
            .lookup(output_name, PipeDirection::Output)
            .ok_or_else(|| JunctionError::NotAnOutput(output_name.to_string()))?;

        flow::forward(&pipe, message)?;
        Ok(())
    }
}

impl fmt::Debug for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("Junction")
            .field("input_pipes", &registry.input_pipes)
            .field("output_pipes", &registry.output_pipes)
            .finish()
    }
}
