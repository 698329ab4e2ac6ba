/*!
 * Core Types
 * Common types used across the pipeline toolkit
 */

use serde_json::Value;

/// Message priority (lower is more urgent)
pub type Priority = i32;

/// Filter parameters passed alongside each message to a filter function
pub type Params = Value;

/// Opaque header or body payload
pub type Payload = Value;
