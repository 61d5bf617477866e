use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::parser::lexicon::LexiconOverrides;
use crate::parser::{Dialect, EngineConfig};

/// Looked up in the working directory when no `--config` path is given.
pub const DEFAULT_FILE: &str = "wa_parser";
pub const ENV_PREFIX: &str = "WA_PARSER";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub output_dir: PathBuf,
    /// Dialect selector used when the command line names none.
    pub format: String,
    /// `label` or `header`.
    pub split: String,
    /// `label` or `coded`.
    pub location: String,
    #[serde(default)]
    pub lexicon: LexiconOverrides,
}

impl Settings {
    /// Defaults, then the config file, then `WA_PARSER_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let builder = Config::builder()
            .set_default("output_dir", "outputs")?
            .set_default("format", Dialect::Format1.selector())?
            .set_default("split", "label")?
            .set_default("location", "label")?;
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_FILE).required(false)),
        };
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn dialect(&self) -> Result<Dialect> {
        self.format.parse()
    }

    pub fn engine_config(&self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();
        Ok(EngineConfig {
            positional_lexicon: defaults.positional_lexicon.with_overrides(&self.lexicon),
            labeled_lexicon: defaults.labeled_lexicon.with_overrides(&self.lexicon),
            split: self.split.parse()?,
            location: self.location.parse()?,
        })
    }
}
