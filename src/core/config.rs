//! Declarative logger configuration
//!
//! A deserializable description of a complete logger: terminal sink,
//! decorators, enrichment switches, and initial fields. `build` turns it
//! into the equivalent ordered option list, so a config file and
//! hand-written options produce identical loggers. All failure here is
//! configuration-time; nothing on the emission path can fail later.

use super::chain::{BufferedCore, Core};
use super::context::ContextHandler;
use super::error::Result;
use super::field::{Field, FieldValue};
use super::level::{Level, LevelEnabler};
use super::logger::Logger;
use super::options::{self, LoggerOption};
use super::sampler::{SamplerCore, SamplingConfig};
use crate::sinks::{open_writers, Encoder, EncoderConfig, SinkCore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Terminal sink description: encoding name, encoder keys, and output
/// destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// `"json"` or `"console"`; anything else fails the build.
    pub encoding: String,
    pub encoder: EncoderConfig,
    /// `"stdout"`, `"stderr"`, or file paths opened in append mode.
    pub output_paths: Vec<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            encoding: "json".to_string(),
            encoder: EncoderConfig::default(),
            output_paths: vec!["stderr".to_string()],
        }
    }
}

impl CoreConfig {
    pub fn build(&self, enabler: impl LevelEnabler + 'static) -> Result<Arc<dyn Core>> {
        let encoder = Encoder::from_name(&self.encoding, self.encoder.clone())?;
        let writers = open_writers(&self.output_paths)?;
        Ok(Arc::new(SinkCore::new(encoder, writers, enabler)))
    }
}

/// Complete logger description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub name: String,
    pub level: Level,
    /// Wrap the chain in a field-buffering decorator.
    pub buffered: bool,
    pub add_caller: bool,
    pub stack_level: Option<Level>,
    pub caller_skip: usize,
    pub format_enabled: bool,
    /// Context key -> field alias; an empty alias keeps the key name.
    /// Ordered map so handler registration order is deterministic.
    pub context_fields: BTreeMap<String, String>,
    pub sampling: Option<SamplingConfig>,
    /// Fields baked into every entry, in key order.
    pub initial_fields: BTreeMap<String, serde_json::Value>,
    pub core: CoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: Level::Debug,
            buffered: false,
            add_caller: true,
            stack_level: Some(Level::Error),
            caller_skip: 0,
            format_enabled: false,
            context_fields: BTreeMap::new(),
            sampling: None,
            initial_fields: BTreeMap::new(),
            core: CoreConfig::default(),
        }
    }
}

impl Config {
    fn build_options(&self) -> Vec<LoggerOption> {
        let mut opts = Vec::with_capacity(10);

        if !self.name.is_empty() {
            opts.push(options::with_name(self.name.clone()));
        }

        if self.buffered {
            opts.push(options::wrap_core(|core| Arc::new(BufferedCore::new(core))));
        }

        if self.add_caller {
            opts.push(options::add_caller());
        }
        if let Some(level) = self.stack_level {
            opts.push(options::with_stack(level));
        }
        if self.caller_skip != 0 {
            opts.push(options::add_caller_skip(self.caller_skip));
        }

        if self.format_enabled {
            opts.push(options::with_format(true));
        }

        if !self.context_fields.is_empty() {
            let handlers = self
                .context_fields
                .iter()
                .map(|(key, alias)| {
                    if alias.is_empty() {
                        ContextHandler::from_key(key.clone())
                    } else {
                        ContextHandler::from_key_as(key.clone(), alias.clone())
                    }
                })
                .collect();
            opts.push(options::with_context_handlers(handlers));
        }

        if !self.initial_fields.is_empty() {
            let fields: Vec<Field> = self
                .initial_fields
                .iter()
                .map(|(key, value)| Field::new(key.clone(), FieldValue::Object(value.clone())))
                .collect();
            opts.push(options::wrap_core(move |core| core.with(fields)));
        }

        if let Some(sampling) = self.sampling.clone() {
            opts.push(options::wrap_core(move |core| {
                Arc::new(SamplerCore::new(core, sampling))
            }));
        }

        opts
    }

    /// Build the configured logger, applying `extra` options last.
    pub fn build(&self, extra: Vec<LoggerOption>) -> Result<Logger> {
        let core = self.core.build(self.level)?;
        Ok(Logger::new(core)
            .with_options(self.build_options())
            .with_options(extra))
    }
}

/// Build a logger from the default configuration: debug level, caller
/// capture on, stacks at error, JSON to stderr.
pub fn default_logger(extra: Vec<LoggerOption>) -> Result<Logger> {
    Config::default().build(extra)
}
