/*!
 * Filter Tests
 * Tests for filtering, veto, bypass and in-band reconfiguration
 */

mod common;

use common::{test_message, Collector};
use pipeworks::messages::{PRIORITY_MED, SET_FILTER, SET_PARAMS};
use pipeworks::{
    filter_fn, same_fitting, Filter, FilterControl, FilterMode, FittingRef, Message, Params,
    Pipe, PipeError, PipeFitting, PipeMessage, Queue, QueueControl,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

/// Multiplies `testVal` by `params.factor` (default 2)
fn scale(message: &mut PipeMessage, params: &Params) -> bool {
    let factor = params["factor"].as_i64().unwrap_or(2);
    match message.header()["testVal"].as_i64() {
        Some(value) => {
            message.header_mut()["testVal"] = json!(value * factor);
            true
        }
        None => false,
    }
}

fn scaling_filter(collector: &Collector) -> Filter {
    Filter::new("scale")
        .with_filter(scale)
        .with_output(collector.listener())
}

#[test]
fn test_connect_and_disconnect_filter() {
    let pipe1 = Pipe::new();
    let pipe2: FittingRef = Arc::new(Pipe::new());
    let filter = Arc::new(Filter::new("TestFilter"));

    assert!(pipe1.connect(filter.clone()).is_ok());
    assert!(filter.connect(Arc::clone(&pipe2)).is_ok());

    let disconnected = filter.disconnect().unwrap();
    assert!(same_fitting(&disconnected, &pipe2));
    assert!(filter.disconnect().is_none());
}

#[test]
fn test_filter_connect_twice_fails() {
    let filter = Filter::new("f");
    filter.connect(Arc::new(Pipe::new())).unwrap();
    assert_eq!(
        filter.connect(Arc::new(Pipe::new())),
        Err(PipeError::AlreadyConnected)
    );
}

#[test]
fn test_filtering_normal_message() {
    let collector = Collector::new();
    let filter = scaling_filter(&collector);

    assert!(filter.write(test_message(10, PRIORITY_MED)).is_ok());
    assert_eq!(collector.test_vals(), vec![20]);
}

#[test]
fn test_bypass_and_filter_mode_toggle() {
    let collector = Collector::new();
    let filter = scaling_filter(&collector);

    assert!(filter.write(FilterControl::bypass("scale").into()).is_ok());
    assert_eq!(filter.mode(), FilterMode::Bypass);
    filter.write(test_message(10, PRIORITY_MED)).unwrap();

    assert!(filter.write(FilterControl::filter("scale").into()).is_ok());
    assert_eq!(filter.mode(), FilterMode::Filtering);
    filter.write(test_message(10, PRIORITY_MED)).unwrap();

    // control messages are consumed, never delivered
    assert_eq!(collector.len(), 2);
    assert_eq!(collector.test_vals(), vec![10, 20]);
}

#[test]
fn test_set_params_by_control_message() {
    let collector = Collector::new();
    let filter = scaling_filter(&collector).with_params(json!({ "factor": 10 }));

    filter.write(test_message(3, PRIORITY_MED)).unwrap();

    let params = json!({ "factor": 5 });
    let control = Message::from_filter_type(SET_PARAMS, "scale", None, Some(params)).unwrap();
    assert!(filter.write(control).is_ok());
    assert_eq!(filter.params(), json!({ "factor": 5 }));

    filter.write(test_message(3, PRIORITY_MED)).unwrap();
    assert_eq!(collector.test_vals(), vec![30, 15]);
}

#[test]
fn test_set_filter_by_control_message() {
    let collector = Collector::new();
    let filter = scaling_filter(&collector);

    filter.write(test_message(4, PRIORITY_MED)).unwrap();

    let negate = filter_fn(|message, _| {
        let value = message.header()["testVal"].as_i64().unwrap_or_default();
        message.header_mut()["testVal"] = json!(-value);
        true
    });
    let control = Message::from_filter_type(SET_FILTER, "scale", Some(negate), None).unwrap();
    filter.write(control).unwrap();

    filter.write(test_message(4, PRIORITY_MED)).unwrap();
    assert_eq!(collector.test_vals(), vec![8, -4]);
}

#[test]
fn test_filter_veto_stops_message() {
    let collector = Collector::new();
    let filter = Filter::new("limit")
        .with_filter(|message, _| message.header()["testVal"].as_i64() != Some(10))
        .with_output(collector.listener());

    let first = filter.write(test_message(10, PRIORITY_MED));
    let second = filter.write(test_message(3, PRIORITY_MED));

    assert_eq!(
        first,
        Err(PipeError::Vetoed {
            filter: "limit".into()
        })
    );
    assert!(second.is_ok());
    assert_eq!(collector.test_vals(), vec![3]);
}

#[test]
fn test_control_for_other_filter_passes_through() {
    let collector = Collector::new();
    let downstream = Arc::new(scaling_filter(&collector));
    let upstream = Filter::new("other")
        .with_filter(scale)
        .with_output(downstream.clone());

    // addressed to the downstream filter: threads through "other" untouched
    upstream.write(FilterControl::bypass("scale").into()).unwrap();
    assert_eq!(upstream.mode(), FilterMode::Filtering);
    assert_eq!(downstream.mode(), FilterMode::Bypass);

    upstream.write(test_message(5, PRIORITY_MED)).unwrap();
    assert_eq!(collector.test_vals(), vec![10]);
    assert_eq!(collector.len(), 1);
}

#[test]
fn test_control_for_unknown_filter_reaches_listener() {
    let collector = Collector::new();
    let filter = scaling_filter(&collector);

    filter
        .write(FilterControl::set_params("nobody", json!(1)).into())
        .unwrap();

    let messages = collector.messages();
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        Message::Filter(control) => assert_eq!(control.name(), "nobody"),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn test_queue_control_passes_through_filter() {
    let collector = Collector::new();
    let queue = Arc::new(Queue::new());
    queue.connect(collector.listener()).unwrap();
    let filter = Filter::new("scale").with_filter(scale).with_output(queue.clone());

    filter.write(test_message(1, PRIORITY_MED)).unwrap();
    assert_eq!(collector.len(), 0);

    filter.write(QueueControl::Flush.into()).unwrap();
    assert_eq!(collector.test_vals(), vec![2]);
}

#[test]
fn test_custom_message_type_is_not_filtered() {
    let collector = Collector::new();
    let filter = scaling_filter(&collector);

    let custom = PipeMessage::new(json!({ "testVal": 4 }), json!(null), PRIORITY_MED)
        .with_type("urn:app:status")
        .unwrap();
    filter.write(custom.into()).unwrap();

    let received = collector.normals();
    assert_eq!(received[0].message_type(), "urn:app:status");
    assert_eq!(received[0].header()["testVal"], json!(4));
}

#[test]
fn test_filter_without_function_passes_messages() {
    let collector = Collector::new();
    let filter = Filter::new("empty").with_output(collector.listener());

    assert!(!filter.has_filter());
    filter.write(test_message(9, PRIORITY_MED)).unwrap();
    assert_eq!(collector.test_vals(), vec![9]);
}

#[test]
fn test_unconnected_filter_reports_not_connected() {
    let filter = Filter::new("scale").with_filter(scale);
    assert_eq!(
        filter.write(test_message(1, PRIORITY_MED)),
        Err(PipeError::NotConnected)
    );
}

#[test]
fn test_filter_function_may_reconfigure_its_own_filter() {
    let collector = Collector::new();
    let slot: Arc<parking_lot::Mutex<Option<FittingRef>>> = Arc::default();

    let target = Arc::clone(&slot);
    let filter = Arc::new(
        Filter::new("once")
            .with_filter(move |message, params| {
                if let Some(this) = target.lock().clone() {
                    this.write(FilterControl::bypass("once").into()).unwrap();
                }
                scale(message, params)
            })
            .with_output(collector.listener()),
    );
    let handle: FittingRef = filter.clone();
    *slot.lock() = Some(handle);

    filter.write(test_message(3, PRIORITY_MED)).unwrap();
    assert_eq!(filter.mode(), FilterMode::Bypass);

    filter.write(test_message(3, PRIORITY_MED)).unwrap();
    assert_eq!(collector.test_vals(), vec![6, 3]);

    slot.lock().take();
}
