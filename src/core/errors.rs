/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a fitting operation
///
/// # Must Use
/// `Ok(())` is the success signal of a write or connect; every failure is an
/// ordinary value the caller decides how to handle
pub type PipeResult<T> = Result<T, PipeError>;

/// Result of a junction registry operation
pub type JunctionResult<T> = Result<T, JunctionError>;

/// Errors raised by fittings and by message construction
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum PipeError {
    /// A single-output fitting already has an output connected
    #[error("Fitting already has a connected output")]
    #[diagnostic(
        code(pipe::already_connected),
        help("Disconnect the current output before connecting another one, or use a TeeSplit for fan-out.")
    )]
    AlreadyConnected,

    /// Write on a fitting with nothing downstream
    #[error("Fitting has no connected output")]
    #[diagnostic(
        code(pipe::not_connected),
        help("Writing to an unconnected fitting is a wiring error. Connect an output or a PipeListener first.")
    )]
    NotConnected,

    /// Connect on a terminal fitting
    #[error("Cannot connect an output to a terminal fitting")]
    #[diagnostic(
        code(pipe::terminal),
        help("PipeListener is the end of a pipeline; nothing can be connected after it.")
    )]
    Terminal,

    /// A filter function rejected a normal message
    #[error("Message vetoed by filter '{filter}'")]
    #[diagnostic(code(pipe::vetoed))]
    Vetoed { filter: String },

    /// Some outputs of a fan-out or a queue flush failed
    #[error("Delivery failed for {failed} of {attempted} messages")]
    #[diagnostic(
        code(pipe::partial_delivery),
        help("Every output was attempted; inspect the downstream fittings that rejected the message.")
    )]
    PartialDelivery { failed: usize, attempted: usize },

    /// Hop counter overflowed, usually a cyclic connection graph
    #[error("Pipeline depth exceeded (max: {max})")]
    #[diagnostic(
        code(pipe::depth_exceeded),
        help("Fittings must form an acyclic graph. Check for a fitting connected back into its own upstream.")
    )]
    DepthExceeded { max: usize },

    /// Normal message given a type from the control namespace
    #[error("Message type is reserved for control messages: {0}")]
    #[diagnostic(
        code(pipe::reserved_type),
        help("Use Message::from_filter_type or Message::from_queue_type to build control messages.")
    )]
    ReservedMessageType(String),

    /// Control message type URI not recognized
    #[error("Unknown control message type: {0}")]
    #[diagnostic(code(pipe::unknown_type))]
    UnknownMessageType(String),

    /// Control message type requires a payload that was not supplied
    #[error("Control message {message_type} requires a {payload} payload")]
    #[diagnostic(code(pipe::missing_payload))]
    MissingPayload {
        message_type: String,
        payload: String,
    },
}

/// Errors raised by the junction registry
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum JunctionError {
    #[error("Pipe already registered: {0}")]
    #[diagnostic(
        code(junction::duplicate_pipe),
        help("Pipe names are unique across inputs and outputs. Remove the existing pipe or pick another name.")
    )]
    DuplicatePipe(String),

    #[error("No input pipe registered as '{0}'")]
    #[diagnostic(code(junction::not_an_input))]
    NotAnInput(String),

    #[error("No output pipe registered as '{0}'")]
    #[diagnostic(code(junction::not_an_output))]
    NotAnOutput(String),

    #[error("Unknown pipe direction: {0}")]
    #[diagnostic(
        code(junction::unknown_direction),
        help("Valid directions are \"input\" and \"output\".")
    )]
    UnknownDirection(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pipe(#[from] PipeError),
}

/// Configuration loading errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(config::parse))]
    Parse(String),

    #[error("Invalid value for {key}: {value}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue { key: String, value: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
