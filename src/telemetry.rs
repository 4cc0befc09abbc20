//! Tracing subscriber setup for applications embedding the engine.
//!
//! The engine itself only emits `tracing` spans and events; installing a
//! subscriber is the host application's job. [`init`] offers a sensible
//! default: env-filtered fmt output with span open/close events so the
//! instrumented submit path is visible in logs.

use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the default global subscriber.
///
/// Respects `RUST_LOG`; falls back to `error,caseflow=info` when unset.
/// Call once at process startup. Panics if a global subscriber is already
/// installed, matching `tracing_subscriber`'s `init` behavior.
pub fn init() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("error,caseflow=info"))
        .expect("static fallback filter parses");

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();
}
