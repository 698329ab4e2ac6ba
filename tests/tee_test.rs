/*!
 * Tee Tests
 * Tests for fan-out (TeeSplit) and fan-in (TeeMerge)
 */

mod common;

use common::{test_message, Collector};
use pipeworks::messages::PRIORITY_MED;
use pipeworks::{
    same_fitting, Filter, FittingRef, Pipe, PipeError, PipeFitting, TeeMerge, TeeSplit,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_split_disconnects_in_reverse_order() {
    let tee = TeeSplit::new();
    let outputs: Vec<FittingRef> = (0..4).map(|_| Arc::new(Pipe::new()) as FittingRef).collect();

    for output in &outputs {
        assert!(tee.connect(Arc::clone(output)).is_ok());
    }
    assert_eq!(tee.len(), 4);

    for expected in outputs.iter().rev() {
        let disconnected = tee.disconnect().unwrap();
        assert!(same_fitting(&disconnected, expected));
    }

    // empty: reports nothing to disconnect instead of faulting
    assert!(tee.disconnect().is_none());
    assert!(tee.is_empty());
}

#[test]
fn test_split_disconnect_fitting() {
    let pipe1: FittingRef = Arc::new(Pipe::new());
    let pipe2: FittingRef = Arc::new(Pipe::new());
    let pipe3: FittingRef = Arc::new(Pipe::new());
    let stranger: FittingRef = Arc::new(Pipe::new());
    let tee = TeeSplit::with_outputs([pipe1.clone(), pipe2.clone(), pipe3.clone()]);

    let removed = tee.disconnect_fitting(&pipe2).unwrap();
    assert!(same_fitting(&removed, &pipe2));
    assert!(tee.disconnect_fitting(&pipe2).is_none());
    assert!(tee.disconnect_fitting(&stranger).is_none());

    // remaining order intact
    assert!(same_fitting(&tee.disconnect().unwrap(), &pipe3));
    assert!(same_fitting(&tee.disconnect().unwrap(), &pipe1));
}

#[test]
fn test_split_disconnect_fitting_removes_first_match_only() {
    let collector = Collector::new();
    let listener = collector.listener();
    let tee = TeeSplit::new();
    tee.connect(listener.clone()).unwrap();
    tee.connect(listener.clone()).unwrap();

    assert!(tee.disconnect_fitting(&listener).is_some());
    assert_eq!(tee.len(), 1);

    tee.write(test_message(1, PRIORITY_MED)).unwrap();
    assert_eq!(collector.len(), 1);
}

#[test]
fn test_split_delivers_to_every_output_once() {
    let collectors: Vec<Collector> = (0..3).map(|_| Collector::new()).collect();
    let tee = TeeSplit::with_outputs(collectors.iter().map(Collector::listener));

    assert!(tee.write(test_message(5, PRIORITY_MED)).is_ok());
    for collector in &collectors {
        assert_eq!(collector.test_vals(), vec![5]);
    }
}

#[test]
fn test_split_branches_get_independent_copies() {
    let doubled = Collector::new();
    let untouched = Collector::new();
    let doubler = Arc::new(
        Filter::new("double")
            .with_filter(|message, _| {
                let value = message.header()["testVal"].as_i64().unwrap_or_default();
                message.header_mut()["testVal"] = json!(value * 2);
                true
            })
            .with_output(doubled.listener()),
    );
    let tee = TeeSplit::with_outputs([doubler as FittingRef, untouched.listener()]);

    tee.write(test_message(4, PRIORITY_MED)).unwrap();
    assert_eq!(doubled.test_vals(), vec![8]);
    assert_eq!(untouched.test_vals(), vec![4]);
}

#[test]
fn test_split_attempts_all_outputs_after_failure() {
    let before = Collector::new();
    let after = Collector::new();
    let dead_end: FittingRef = Arc::new(Pipe::new());
    let tee = TeeSplit::with_outputs([before.listener(), dead_end, after.listener()]);

    assert_eq!(
        tee.write(test_message(1, PRIORITY_MED)),
        Err(PipeError::PartialDelivery {
            failed: 1,
            attempted: 3
        })
    );
    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 1);
}

#[test]
fn test_split_without_outputs_succeeds() {
    let tee = TeeSplit::new();
    assert!(tee.write(test_message(1, PRIORITY_MED)).is_ok());
}

#[test]
fn test_merge_connect_inputs() {
    let pipe1 = Pipe::new();
    let pipe2 = Pipe::new();
    let merge = Arc::new(TeeMerge::new());
    let merge_ref: FittingRef = merge.clone();

    assert!(merge.connect_input(&pipe1).is_ok());
    assert!(merge.connect_input(&pipe2).is_ok());
    assert!(same_fitting(&pipe1.output().unwrap(), &merge_ref));
    assert!(same_fitting(&pipe2.output().unwrap(), &merge_ref));

    // an input with its own output cannot join
    assert_eq!(merge.connect_input(&pipe1), Err(PipeError::AlreadyConnected));
}

#[test]
fn test_merge_receives_from_two_pipes_in_write_order() {
    let collector = Collector::new();
    let pipe1 = Pipe::new();
    let pipe2 = Pipe::new();
    let merge = Arc::new(TeeMerge::with_output(collector.listener()));

    merge.connect_input(&pipe1).unwrap();
    merge.connect_input(&pipe2).unwrap();

    assert!(pipe2.write(test_message(2, PRIORITY_MED)).is_ok());
    assert!(pipe1.write(test_message(1, PRIORITY_MED)).is_ok());
    assert_eq!(collector.test_vals(), vec![2, 1]);
}

#[test]
fn test_merge_receives_from_four_pipes() {
    let collector = Collector::new();
    let merge = Arc::new(TeeMerge::new());
    merge.connect(collector.listener()).unwrap();
    let pipes: Vec<Pipe> = (0..4).map(|_| Pipe::new()).collect();

    for pipe in &pipes {
        merge.connect_input(pipe).unwrap();
    }
    for (value, pipe) in pipes.iter().enumerate() {
        pipe.write(test_message(value as i64, PRIORITY_MED)).unwrap();
    }
    assert_eq!(collector.test_vals(), vec![0, 1, 2, 3]);
}

#[test]
fn test_split_into_merge_diamond() {
    let collector = Collector::new();
    let merge = Arc::new(TeeMerge::with_output(collector.listener()));
    let left = Arc::new(Pipe::new());
    let right = Arc::new(Pipe::new());
    merge.connect_input(left.as_ref()).unwrap();
    merge.connect_input(right.as_ref()).unwrap();
    let tee = TeeSplit::with_outputs([left as FittingRef, right as FittingRef]);

    tee.write(test_message(7, PRIORITY_MED)).unwrap();
    assert_eq!(collector.test_vals(), vec![7, 7]);
}
