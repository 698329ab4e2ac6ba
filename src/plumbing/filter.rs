/*!
 * Filter
 * Named fitting that transforms or vetoes normal messages
 *
 * A filter's parameters, filter function and mode can be replaced at runtime
 * by filter control messages addressed to its name. Control messages for
 * other filters, queue controls and custom message types pass through.
 */

use super::pipe::Pipe;
use super::traits::{FittingRef, PipeFitting};
use crate::core::errors::{PipeError, PipeResult};
use crate::core::types::Params;
use crate::messages::{FilterAction, FilterControl, FilterFn, Message, PipeMessage};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Filter operating mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Apply the filter function to normal messages (default)
    #[default]
    Filtering,
    /// Pass normal messages through untouched
    Bypass,
}

/// Mode, params and function are read together for each message
struct FilterState {
    mode: FilterMode,
    params: Arc<Params>,
    filter: Option<FilterFn>,
}

pub struct Filter {
    name: String,
    pipe: Pipe,
    state: RwLock<FilterState>,
}

impl Filter {
    /// Filter with no function installed; it passes messages through until
    /// one arrives via `with_filter` or a SET_FILTER control message
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pipe: Pipe::new(),
            state: RwLock::new(FilterState {
                mode: FilterMode::Filtering,
                params: Arc::new(Value::Null),
                filter: None,
            }),
        }
    }

    #[must_use]
    pub fn with_filter<F>(self, filter: F) -> Self
    where
        F: Fn(&mut PipeMessage, &Params) -> bool + Send + Sync + 'static,
    {
        self.state.write().filter = Some(Arc::new(filter));
        self
    }

    #[must_use]
    pub fn with_params(self, params: Params) -> Self {
        self.state.write().params = Arc::new(params);
        self
    }

    #[must_use]
    pub fn with_mode(self, mode: FilterMode) -> Self {
        self.state.write().mode = mode;
        self
    }

    #[must_use]
    pub fn with_output(self, output: FittingRef) -> Self {
        Self {
            pipe: Pipe::with_output(output),
            ..self
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> FilterMode {
        self.state.read().mode
    }

    pub fn params(&self) -> Params {
        Params::clone(&self.state.read().params)
    }

    pub fn has_filter(&self) -> bool {
        self.state.read().filter.is_some()
    }

    /// Whether a control message is addressed to this filter
    #[inline]
    pub fn is_target(&self, control: &FilterControl) -> bool {
        control.name() == self.name
    }

    /// Run the filter function; true when the message may continue
    ///
    /// Mode, params and function are snapshotted together under the lock and
    /// the function runs unlocked, so it may send control messages to this
    /// filter. Such a reconfiguration applies from the next message on.
    fn apply_filter(&self, message: &mut PipeMessage) -> bool {
        let (filter, params) = {
            let state = self.state.read();
            match (state.mode, &state.filter) {
                (FilterMode::Filtering, Some(filter)) => {
                    (Arc::clone(filter), Arc::clone(&state.params))
                }
                _ => return true,
            }
        };
        filter(message, &*params)
    }

    fn apply_control(&self, control: FilterControl) {
        let action = control.into_action();
        let mut state = self.state.write();
        match action {
            FilterAction::SetParams(params) => state.params = Arc::new(params),
            FilterAction::SetFilter(filter) => state.filter = Some(filter),
            FilterAction::Bypass => state.mode = FilterMode::Bypass,
            FilterAction::Filter => state.mode = FilterMode::Filtering,
        }
        debug!(filter = %self.name, mode = ?state.mode, "Filter reconfigured");
    }
}

impl PipeFitting for Filter {
    fn connect(&self, output: FittingRef) -> PipeResult<()> {
        self.pipe.connect(output)
    }

    fn disconnect(&self) -> Option<FittingRef> {
        self.pipe.disconnect()
    }

    fn write(&self, message: Message) -> PipeResult<()> {
        match message {
            Message::Normal(mut normal) if normal.is_normal() => {
                if !self.apply_filter(&mut normal) {
                    debug!(filter = %self.name, "Message vetoed");
                    return Err(PipeError::Vetoed {
                        filter: self.name.clone(),
                    });
                }
                self.pipe.write(Message::Normal(normal))
            }
            Message::Filter(control) if self.is_target(&control) => {
                self.apply_control(control);
                Ok(())
            }
            other => self.pipe.write(other),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Filter")
            .field("name", &self.name)
            .field("mode", &state.mode)
            .field("params", &state.params)
            .field("has_filter", &state.filter.is_some())
            .field("pipe", &self.pipe)
            .finish()
    }
}
