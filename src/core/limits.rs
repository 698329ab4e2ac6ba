/*!
 * Pipeline Limits and Constants
 *
 * Centralized location for pipeline-wide limits and defaults.
 */

// =============================================================================
// PIPELINE LIMITS
// =============================================================================

/// Default maximum number of fitting-to-fitting hops for a single write
/// Writes run on the caller's stack, so this bounds stack growth and turns
/// an accidental cycle into a failed write
pub const DEFAULT_MAX_PIPELINE_DEPTH: usize = 256;

/// Lower bound accepted for a configured pipeline depth
pub const MIN_PIPELINE_DEPTH: usize = 1;

/// Upper bound accepted for a configured pipeline depth
/// [PERF] Each hop costs a few stack frames on the writer's thread
pub const MAX_PIPELINE_DEPTH: usize = 4096;

// =============================================================================
// LOGGING DEFAULTS
// =============================================================================

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
