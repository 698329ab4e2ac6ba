/*!
 * Message Types
 * Type URIs and priority bands recognized by fittings
 *
 * The string values are part of the caller-visible contract and must not change.
 */

use crate::core::types::Priority;

/// Ordinary payload-carrying message
pub const NORMAL: &str = "http://puremvc.org/namespaces/pipes/messages/normal/";

// =============================================================================
// FILTER CONTROL
// =============================================================================

/// Replace the named filter's parameters
pub const SET_PARAMS: &str =
    "http://puremvc.org/namespaces/pipes/messages/normal/filter-control/setParams";

/// Replace the named filter's filter function
pub const SET_FILTER: &str =
    "http://puremvc.org/namespaces/pipes/messages/normal/filter-control/setFilter";

/// Named filter passes normal messages through untouched
pub const BYPASS: &str = "http://puremvc.org/namespaces/pipes/messages/normal/filter-control/bypass";

/// Named filter resumes filtering (default mode)
pub const FILTER: &str = "http://puremvc.org/namespaces/pipes/messages/normal/filter-control/filter";

// =============================================================================
// QUEUE CONTROL
// =============================================================================

/// Emit and clear buffered messages
pub const FLUSH: &str = "http://puremvc.org/namespaces/pipes/messages/normal/queue/flush";

/// Switch to sort-by-priority mode
pub const SORT: &str = "http://puremvc.org/namespaces/pipes/messages/normal/queue/sort";

/// Switch to arrival order (default mode)
pub const FIFO: &str = "http://puremvc.org/namespaces/pipes/messages/normal/queue/fifo";

// =============================================================================
// PRIORITIES
// =============================================================================

/// Sorted to the front of a queue
pub const PRIORITY_HIGH: Priority = 1;

/// Default priority
pub const PRIORITY_MED: Priority = 5;

/// Sorted to the back of a queue
pub const PRIORITY_LOW: Priority = 10;

/// Type URIs owned by the filter control protocol
pub const FILTER_CONTROL_TYPES: [&str; 4] = [SET_PARAMS, SET_FILTER, BYPASS, FILTER];

/// Type URIs owned by the queue control protocol
pub const QUEUE_CONTROL_TYPES: [&str; 3] = [FLUSH, SORT, FIFO];

/// Whether a type URI belongs to one of the control protocols
#[inline]
pub fn is_control_type(message_type: &str) -> bool {
    FILTER_CONTROL_TYPES.contains(&message_type) || QUEUE_CONTROL_TYPES.contains(&message_type)
}
