/*
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0.
 */

//! ambient runtime configuration: the handful of knobs that govern the process this crate runs
//! in rather than any one actor's behavior - default synchronous-request timeout and the
//! `tracing` filter directive. Deserialized from RON, the same way actor-level config structs
//! are loaded in this codebase's wider family, with a `Default` impl so a missing config file
//! is not an error.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{ActorError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// default timeout (milliseconds) for `ActorRef::ask` calls that don't name their own via
    /// `timeout_ask`; `None` means `ask` blocks forever on an actor that never replies. Installed
    /// process-wide by [`RuntimeConfig::install`].
    pub default_ask_timeout_millis: Option<u64>,
    /// `tracing_subscriber::EnvFilter` directive applied by [`init_tracing`].
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig { default_ask_timeout_millis: None, log_filter: "info".to_string() }
    }
}

/// process-wide `ask` fallback timeout, 0 meaning "none installed". Set by
/// [`RuntimeConfig::install`], read by `ActorRef::ask`.
static DEFAULT_ASK_TIMEOUT_MILLIS: AtomicU64 = AtomicU64::new(0);

impl RuntimeConfig {
    /// parses a RON document, e.g. the contents of a `reed_actor.ron` config file.
    pub fn from_ron(s: &str) -> Result<RuntimeConfig> {
        ron::de::from_str(s).map_err(|e| ActorError::ConfigParseError(e.to_string()))
    }

    pub fn default_ask_timeout(&self) -> Option<Duration> {
        self.default_ask_timeout_millis.map(Duration::from_millis)
    }

    /// installs this configuration's `default_ask_timeout_millis` as the process-wide fallback
    /// `ActorRef::ask` consults when a caller doesn't use `timeout_ask` to name its own. Call once
    /// at startup, alongside [`init_tracing`].
    pub fn install(&self) {
        DEFAULT_ASK_TIMEOUT_MILLIS.store(self.default_ask_timeout_millis.unwrap_or(0), Ordering::Relaxed);
    }
}

/// the timeout `ActorRef::ask` falls back to, as installed by the most recent
/// [`RuntimeConfig::install`] call; `None` if no configuration has installed one.
pub(crate) fn installed_default_ask_timeout() -> Option<Duration> {
    match DEFAULT_ASK_TIMEOUT_MILLIS.load(Ordering::Relaxed) {
        0 => None,
        millis => Some(Duration::from_millis(millis)),
    }
}

/// installs a `tracing_subscriber` formatter honoring `RUST_LOG`, falling back to
/// [`RuntimeConfig::log_filter`] when that variable is unset. Safe to call more than once;
/// later calls are no-ops.
pub fn init_tracing(config: &RuntimeConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_document_is_empty() {
        let cfg = RuntimeConfig::from_ron("()").unwrap();
        assert_eq!(cfg.log_filter, "info");
        assert!(cfg.default_ask_timeout().is_none());
    }

    #[test]
    fn overrides_individual_fields() {
        let cfg = RuntimeConfig::from_ron("(log_filter: \"debug\", default_ask_timeout_millis: Some(250))").unwrap();
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.default_ask_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(RuntimeConfig::from_ron("not ron").is_err());
    }

    #[test]
    fn install_makes_the_default_ask_timeout_observable() {
        let cfg = RuntimeConfig::from_ron("(default_ask_timeout_millis: Some(75))").unwrap();
        cfg.install();
        assert_eq!(installed_default_ask_timeout(), Some(Duration::from_millis(75)));

        RuntimeConfig::default().install();
        assert_eq!(installed_default_ask_timeout(), None);
    }
}
