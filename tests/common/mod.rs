/*!
 * Shared test helpers
 */

#![allow(dead_code)]

use parking_lot::Mutex;
use pipeworks::{FittingRef, Message, PipeListener, PipeMessage, Priority};
use serde_json::json;
use std::sync::Arc;

/// Records every message reaching its listener
#[derive(Clone, Default)]
pub struct Collector {
    received: Arc<Mutex<Vec<Message>>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh listener fitting feeding this collector
    pub fn listener(&self) -> FittingRef {
        let received = Arc::clone(&self.received);
        Arc::new(PipeListener::new(move |message| received.lock().push(message)))
    }

    pub fn push(&self, message: Message) {
        self.received.lock().push(message);
    }

    pub fn len(&self) -> usize {
        self.received.lock().len()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.received.lock().clone()
    }

    pub fn normals(&self) -> Vec<PipeMessage> {
        self.messages()
            .into_iter()
            .filter_map(Message::into_normal)
            .collect()
    }

    /// `testVal` header field of each normal message received
    pub fn test_vals(&self) -> Vec<i64> {
        self.normals()
            .iter()
            .filter_map(|message| message.header()["testVal"].as_i64())
            .collect()
    }

    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

/// Normal message with a numeric `testVal` header
pub fn test_message(value: i64, priority: Priority) -> Message {
    Message::Normal(PipeMessage::new(
        json!({ "testVal": value }),
        json!(null),
        priority,
    ))
}
