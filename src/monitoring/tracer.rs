/*!
 * Tracing Setup
 * Structured logging for pipelines using the tracing crate
 */

use crate::core::config::PipesConfig;
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install a global tracing subscriber described by `config`
///
/// Compact human-readable output by default, JSON when `trace_json` is set.
/// Returns false when a global subscriber was already installed, so calling
/// it more than once (for example from several tests) is harmless.
pub fn init_tracing(config: &PipesConfig) -> bool {
    let env_filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(crate::core::limits::DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.trace_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(
            json = config.trace_json,
            max_pipeline_depth = config.max_pipeline_depth,
            "Pipeline tracing initialized"
        );
    }
    installed
}
