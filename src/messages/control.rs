/*!
 * Control Messages
 * In-band messages that reconfigure filters and queues
 */

use super::message::PipeMessage;
use super::types::{BYPASS, FIFO, FILTER, FLUSH, SET_FILTER, SET_PARAMS, SORT};
use crate::core::types::Params;
use std::fmt;
use std::sync::Arc;

/// Filter function: may mutate the message, returns false to veto it
pub type FilterFn = Arc<dyn Fn(&mut PipeMessage, &Params) -> bool + Send + Sync>;

/// Wrap a closure as a [`FilterFn`]
pub fn filter_fn<F>(f: F) -> FilterFn
where
    F: Fn(&mut PipeMessage, &Params) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What a filter control message asks its target to do
#[derive(Clone)]
pub enum FilterAction {
    SetParams(Params),
    SetFilter(FilterFn),
    Bypass,
    Filter,
}

impl FilterAction {
    pub fn message_type(&self) -> &'static str {
        match self {
            FilterAction::SetParams(_) => SET_PARAMS,
            FilterAction::SetFilter(_) => SET_FILTER,
            FilterAction::Bypass => BYPASS,
            FilterAction::Filter => FILTER,
        }
    }

    /// Mode switches carry no payload, so they can be built from the URI alone
    pub(crate) fn from_mode_type(message_type: &str) -> Option<Self> {
        match message_type {
            BYPASS => Some(FilterAction::Bypass),
            FILTER => Some(FilterAction::Filter),
            _ => None,
        }
    }
}

impl fmt::Debug for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterAction::SetParams(params) => f.debug_tuple("SetParams").field(params).finish(),
            FilterAction::SetFilter(_) => f.write_str("SetFilter(<fn>)"),
            FilterAction::Bypass => f.write_str("Bypass"),
            FilterAction::Filter => f.write_str("Filter"),
        }
    }
}

/// Filter control message, addressed to a filter by name
///
/// Filters with a different name forward it untouched; the addressee
/// consumes it.
#[derive(Debug, Clone)]
pub struct FilterControl {
    name: String,
    action: FilterAction,
}

impl FilterControl {
    pub fn new(name: impl Into<String>, action: FilterAction) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    pub fn set_params(name: impl Into<String>, params: Params) -> Self {
        Self::new(name, FilterAction::SetParams(params))
    }

    pub fn set_filter(name: impl Into<String>, filter: FilterFn) -> Self {
        Self::new(name, FilterAction::SetFilter(filter))
    }

    pub fn bypass(name: impl Into<String>) -> Self {
        Self::new(name, FilterAction::Bypass)
    }

    pub fn filter(name: impl Into<String>) -> Self {
        Self::new(name, FilterAction::Filter)
    }

    /// Name of the target filter
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn action(&self) -> &FilterAction {
        &self.action
    }

    pub fn into_action(self) -> FilterAction {
        self.action
    }

    #[inline]
    pub fn message_type(&self) -> &'static str {
        self.action.message_type()
    }
}

/// Queue control message
///
/// Queues are not named: the first queue on a pipeline consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueControl {
    Flush,
    Sort,
    Fifo,
}

impl QueueControl {
    pub fn message_type(&self) -> &'static str {
        match self {
            QueueControl::Flush => FLUSH,
            QueueControl::Sort => SORT,
            QueueControl::Fifo => FIFO,
        }
    }

    pub fn from_type(message_type: &str) -> Option<Self> {
        match message_type {
            FLUSH => Some(QueueControl::Flush),
            SORT => Some(QueueControl::Sort),
            FIFO => Some(QueueControl::Fifo),
            _ => None,
        }
    }
}
