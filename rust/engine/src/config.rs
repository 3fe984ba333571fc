//! Layered game configuration.
//!
//! Values resolve from defaults, then the TOML file named by `YAMB_CONFIG`,
//! then the `YAMB_SEED`, `YAMB_DICE`, `YAMB_ROLLS`, `YAMB_STRICT` and
//! `YAMB_BOOST` environment variables. The source of every value is reported
//! alongside the resolved configuration.
//!
//! ```toml
//! seed = 42
//! dice_count = 5
//! boost = true
//!
//! [[columns]]
//! kind = "ordered"
//! direction = "down"
//!
//! [[columns]]
//! kind = "announced"
//! after_roll = 1
//! immediately_fill = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boost::DEFAULT_CACHE_CAPACITY;
use crate::column::{Announcement, Column, ColumnKind, Direction};
use crate::dice::{Dice, Die, FiniteDie};
use crate::evaluator::Evaluator;
use crate::game::{GameSettings, Yamb};

pub const CONFIG_ENV: &str = "YAMB_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// One column of a configured game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnConfig {
    Ordered {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        direction: Direction,
    },
    Free {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Announced {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default = "default_after_roll")]
        after_roll: usize,
        #[serde(default)]
        immediately_fill: bool,
    },
}

fn default_after_roll() -> usize {
    1
}

impl ColumnConfig {
    fn kind(&self) -> Result<ColumnKind, ConfigError> {
        Ok(match self {
            ColumnConfig::Ordered { direction, .. } => ColumnKind::Ordered(*direction),
            ColumnConfig::Free { .. } => ColumnKind::Free,
            ColumnConfig::Announced {
                after_roll,
                immediately_fill,
                ..
            } => ColumnKind::Announced(
                Announcement::new(*after_roll, *immediately_fill)
                    .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            ),
        })
    }

    fn name(&self) -> Option<&str> {
        match self {
            ColumnConfig::Ordered { name, .. }
            | ColumnConfig::Free { name }
            | ColumnConfig::Announced { name, .. } => name.as_deref(),
        }
    }
}

fn default_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::Ordered {
            name: None,
            direction: Direction::Down,
        },
        ColumnConfig::Ordered {
            name: None,
            direction: Direction::Up,
        },
        ColumnConfig::Free { name: None },
        ColumnConfig::Announced {
            name: None,
            after_roll: 1,
            immediately_fill: false,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub dice_count: usize,
    pub roll_budget: usize,
    pub sort_results: bool,
    pub strict_checking: bool,
    /// Use the boosted evaluator in every column
    pub boost: bool,
    pub cache_capacity: usize,
    /// Buffer size of a finite die; `None` rolls a standard die
    pub finite_die: Option<usize>,
    pub columns: Vec<ColumnConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let settings = GameSettings::default();
        Self {
            seed: None,
            dice_count: settings.dice_count,
            roll_budget: settings.roll_budget,
            sort_results: settings.sort_results,
            strict_checking: settings.strict_checking,
            boost: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            finite_die: None,
            columns: default_columns(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub dice_count: ValueSource,
    pub roll_budget: ValueSource,
    pub sort_results: ValueSource,
    pub strict_checking: ValueSource,
    pub boost: ValueSource,
    pub cache_capacity: ValueSource,
    pub finite_die: ValueSource,
    pub columns: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            dice_count: ValueSource::Default,
            roll_budget: ValueSource::Default,
            sort_results: ValueSource::Default,
            strict_checking: ValueSource::Default,
            boost: ValueSource::Default,
            cache_capacity: ValueSource::Default,
            finite_die: ValueSource::Default,
            columns: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: GameConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    seed: Option<u64>,
    dice_count: Option<usize>,
    roll_budget: Option<usize>,
    sort_results: Option<bool>,
    strict_checking: Option<bool>,
    boost: Option<bool>,
    cache_capacity: Option<usize>,
    finite_die: Option<usize>,
    columns: Option<Vec<ColumnConfig>>,
}

impl FileConfig {
    fn apply(self, cfg: &mut GameConfig, sources: &mut ConfigSources) {
        macro_rules! take {
            ($field:ident) => {
                if let Some(v) = self.$field {
                    cfg.$field = v;
                    sources.$field = ValueSource::File;
                }
            };
        }
        if let Some(v) = self.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = self.finite_die {
            cfg.finite_die = Some(v);
            sources.finite_die = ValueSource::File;
        }
        take!(dice_count);
        take!(roll_budget);
        take!(sort_results);
        take!(strict_checking);
        take!(boost);
        take!(cache_capacity);
        take!(columns);
    }
}

impl GameConfig {
    /// Parses a TOML document over the defaults and validates the result.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut cfg = GameConfig::default();
        let file: FileConfig = toml::from_str(s)?;
        file.apply(&mut cfg, &mut ConfigSources::default());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice_count == 0 {
            return Err(ConfigError::Invalid("dice_count must be >0".into()));
        }
        if self.roll_budget == 0 {
            return Err(ConfigError::Invalid("roll_budget must be >0".into()));
        }
        if self.finite_die == Some(0) {
            return Err(ConfigError::Invalid("finite_die must be >0".into()));
        }
        if self.columns.is_empty() {
            return Err(ConfigError::Invalid("at least one column is required".into()));
        }
        for c in &self.columns {
            c.kind()?;
        }
        Ok(())
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings {
            dice_count: self.dice_count,
            roll_budget: self.roll_budget,
            sort_results: self.sort_results,
            strict_checking: self.strict_checking,
        }
    }

    pub fn dice(&self) -> Dice {
        match self.finite_die {
            Some(size) => Dice::Finite(FiniteDie::new(size, self.seed)),
            None => Dice::Standard(Die::new(self.seed)),
        }
    }

    pub fn build_columns(&self) -> Result<Vec<Column>, ConfigError> {
        self.columns
            .iter()
            .map(|c| {
                let mut column = Column::new(c.kind()?).with_strict(self.strict_checking);
                if let Some(name) = c.name() {
                    column = column.with_name(name);
                }
                if self.boost {
                    column = column.with_evaluator(Evaluator::boosted(self.cache_capacity));
                }
                Ok(column)
            })
            .collect()
    }

    pub fn build(&self) -> Result<Yamb<Dice>, ConfigError> {
        self.validate()?;
        Yamb::new(self.build_columns()?, self.dice(), self.settings())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

pub fn load() -> Result<GameConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = GameConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&s)?;
        file.apply(&mut cfg, &mut sources);
    }

    if let Some(seed) = env_value("YAMB_SEED") {
        cfg.seed = Some(parse_env(&seed, "seed")?);
        sources.seed = ValueSource::Env;
    }
    if let Some(dice) = env_value("YAMB_DICE") {
        cfg.dice_count = parse_env(&dice, "dice count")?;
        sources.dice_count = ValueSource::Env;
    }
    if let Some(rolls) = env_value("YAMB_ROLLS") {
        cfg.roll_budget = parse_env(&rolls, "roll budget")?;
        sources.roll_budget = ValueSource::Env;
    }
    if let Some(strict) = env_value("YAMB_STRICT") {
        cfg.strict_checking =
            parse_bool(&strict).ok_or_else(|| ConfigError::Invalid("Invalid strict flag".into()))?;
        sources.strict_checking = ValueSource::Env;
    }
    if let Some(boost) = env_value("YAMB_BOOST") {
        cfg.boost =
            parse_bool(&boost).ok_or_else(|| ConfigError::Invalid("Invalid boost flag".into()))?;
        sources.boost = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {what}")))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
