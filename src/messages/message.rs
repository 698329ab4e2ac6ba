/*!
 * Pipe Messages
 * Normal message envelope and the message sum type carried by fittings
 */

use super::control::{FilterAction, FilterControl, FilterFn, QueueControl};
use super::types::{is_control_type, NORMAL, PRIORITY_MED, SET_FILTER, SET_PARAMS};
use crate::core::errors::{PipeError, PipeResult};
use crate::core::types::{Params, Payload, Priority};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Normal, payload-carrying message
///
/// Header is scratch space for filters; body is the application payload.
/// Both are opaque to the fittings. Deserializing applies the same type check
/// as [`PipeMessage::set_type`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "RawPipeMessage")]
pub struct PipeMessage {
    message_type: Cow<'static, str>,
    priority: Priority,
    header: Payload,
    body: Payload,
}

/// Wire form of [`PipeMessage`], checked before it becomes one
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct RawPipeMessage {
    message_type: String,
    priority: Priority,
    header: Payload,
    body: Payload,
}

impl TryFrom<RawPipeMessage> for PipeMessage {
    type Error = PipeError;

    fn try_from(raw: RawPipeMessage) -> PipeResult<Self> {
        PipeMessage::new(raw.header, raw.body, raw.priority).with_type(raw.message_type)
    }
}

impl Default for PipeMessage {
    fn default() -> Self {
        Self {
            message_type: Cow::Borrowed(NORMAL),
            priority: PRIORITY_MED,
            header: Value::Null,
            body: Value::Null,
        }
    }
}

impl PipeMessage {
    #[inline]
    #[must_use]
    pub fn new(header: Payload, body: Payload, priority: Priority) -> Self {
        Self {
            message_type: Cow::Borrowed(NORMAL),
            priority,
            header,
            body,
        }
    }

    /// Message with a body only, medium priority
    #[inline]
    #[must_use]
    pub fn with_body(body: Payload) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Use an application-defined type URI
    ///
    /// Messages with a custom type are forwarded untouched by filters and
    /// queues. URIs from the control namespace are rejected.
    pub fn with_type(mut self, message_type: impl Into<String>) -> PipeResult<Self> {
        self.set_type(message_type)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: Payload) -> Self {
        self.header = header;
        self
    }

    #[inline]
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn set_type(&mut self, message_type: impl Into<String>) -> PipeResult<()> {
        let message_type = message_type.into();
        if is_control_type(&message_type) {
            return Err(PipeError::ReservedMessageType(message_type));
        }
        self.message_type = if message_type == NORMAL {
            Cow::Borrowed(NORMAL)
        } else {
            Cow::Owned(message_type)
        };
        Ok(())
    }

    /// Whether this message carries the NORMAL type (as opposed to a custom one)
    #[inline]
    pub fn is_normal(&self) -> bool {
        self.message_type == NORMAL
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    #[inline]
    pub fn header(&self) -> &Payload {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Payload {
        &mut self.header
    }

    pub fn set_header(&mut self, header: Payload) {
        self.header = header;
    }

    #[inline]
    pub fn body(&self) -> &Payload {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Payload {
        &mut self.body
    }

    pub fn set_body(&mut self, body: Payload) {
        self.body = body;
    }
}

/// Everything that can travel through a pipeline
///
/// Fittings dispatch on the variant, so a control message can never be read
/// with the wrong payload shape.
#[derive(Debug, Clone)]
pub enum Message {
    Normal(PipeMessage),
    Filter(FilterControl),
    Queue(QueueControl),
}

impl Message {
    /// Type URI of this message
    pub fn message_type(&self) -> &str {
        match self {
            Message::Normal(message) => message.message_type(),
            Message::Filter(control) => control.message_type(),
            Message::Queue(control) => control.message_type(),
        }
    }

    /// Priority; control messages always carry medium priority
    pub fn priority(&self) -> Priority {
        match self {
            Message::Normal(message) => message.priority(),
            Message::Filter(_) | Message::Queue(_) => PRIORITY_MED,
        }
    }

    #[inline]
    pub fn is_control(&self) -> bool {
        !matches!(self, Message::Normal(_))
    }

    pub fn as_normal(&self) -> Option<&PipeMessage> {
        match self {
            Message::Normal(message) => Some(message),
            _ => None,
        }
    }

    pub fn into_normal(self) -> Option<PipeMessage> {
        match self {
            Message::Normal(message) => Some(message),
            _ => None,
        }
    }

    /// Build a filter control message from its type URI and loose payload
    ///
    /// SET_PARAMS requires `params`, SET_FILTER requires `filter`; BYPASS and
    /// FILTER ignore both.
    pub fn from_filter_type(
        message_type: &str,
        name: impl Into<String>,
        filter: Option<FilterFn>,
        params: Option<Params>,
    ) -> PipeResult<Self> {
        let missing = |payload: &str| PipeError::MissingPayload {
            message_type: message_type.to_string(),
            payload: payload.to_string(),
        };

        let action = match message_type {
            SET_PARAMS => FilterAction::SetParams(params.ok_or_else(|| missing("params"))?),
            SET_FILTER => FilterAction::SetFilter(filter.ok_or_else(|| missing("filter"))?),
            other => FilterAction::from_mode_type(other)
                .ok_or_else(|| PipeError::UnknownMessageType(other.to_string()))?,
        };

        Ok(Message::Filter(FilterControl::new(name, action)))
    }

    /// Build a queue control message from its type URI
    pub fn from_queue_type(message_type: &str) -> PipeResult<Self> {
        QueueControl::from_type(message_type)
            .map(Message::Queue)
            .ok_or_else(|| PipeError::UnknownMessageType(message_type.to_string()))
    }
}

impl From<PipeMessage> for Message {
    fn from(message: PipeMessage) -> Self {
        Message::Normal(message)
    }
}

impl From<FilterControl> for Message {
    fn from(control: FilterControl) -> Self {
        Message::Filter(control)
    }
}

impl From<QueueControl> for Message {
    fn from(control: QueueControl) -> Self {
        Message::Queue(control)
    }
}
