//! Tracing subscriber setup
//!
//! `RUST_LOG` overrides the default filter. Noisy HTTP internals are capped
//! at `warn` either way.

use std::env;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "sportsee_dashboard=info";

fn env_filter() -> EnvFilter {
  let base = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_DIRECTIVE.to_string());

  ["hyper=warn", "reqwest=warn"]
    .into_iter()
    .fold(EnvFilter::new(base), |filter, directive| match directive.parse::<Directive>() {
      Ok(directive) => filter.add_directive(directive),
      Err(_) => filter,
    })
}

/// Install the global subscriber. Later calls are no-ops, so tests and
/// repeated page loads may call it freely.
pub fn init() {
  let _ = tracing_subscriber::registry()
    .with(env_filter())
    .with(fmt::layer().with_target(true))
    .try_init();
}
