use klondike_engine::settings::{DrawMode, FlipLimit, ScoreVisibility, Settings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Save directory used when nothing else is configured.
pub const DEFAULT_SAVE_DIR: &str = ".klondike";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub save_dir: PathBuf,
    pub draw: DrawMode,
    pub flip_limit: FlipLimit,
    pub score: ScoreVisibility,
    pub seed: Option<u32>,
}

impl Config {
    /// Settings handed to a brand-new game.
    pub fn settings(&self) -> Settings {
        Settings {
            draw: self.draw,
            flip_limit: self.flip_limit,
            score: self.score,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub save_dir: ValueSource,
    pub draw: ValueSource,
    pub flip_limit: ValueSource,
    pub score: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            save_dir: ValueSource::Default,
            draw: ValueSource::Default,
            flip_limit: ValueSource::Default,
            score: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            draw: settings.draw,
            flip_limit: settings.flip_limit,
            score: settings.score,
            seed: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "{}", e),
            ConfigError::Parse(e) => write!(f, "{}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolve the configuration: defaults, then the TOML file named by
/// `KLONDIKE_CONFIG`, then `KLONDIKE_*` environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("KLONDIKE_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.save_dir {
            cfg.save_dir = v;
            sources.save_dir = ValueSource::File;
        }
        if let Some(v) = f.draw {
            cfg.draw = v;
            sources.draw = ValueSource::File;
        }
        if let Some(v) = f.flip_limit {
            cfg.flip_limit = v;
            sources.flip_limit = ValueSource::File;
        }
        if let Some(v) = f.score {
            cfg.score = v;
            sources.score = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Ok(dir) = std::env::var("KLONDIKE_SAVE_DIR")
        && !dir.is_empty()
    {
        cfg.save_dir = PathBuf::from(dir);
        sources.save_dir = ValueSource::Env;
    }
    if let Ok(draw) = std::env::var("KLONDIKE_DRAW")
        && !draw.is_empty()
    {
        cfg.draw = draw
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid draw".into()))?;
        sources.draw = ValueSource::Env;
    }
    if let Ok(flips) = std::env::var("KLONDIKE_FLIP_LIMIT")
        && !flips.is_empty()
    {
        cfg.flip_limit = flips
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid flip limit".into()))?;
        sources.flip_limit = ValueSource::Env;
    }
    if let Ok(score) = std::env::var("KLONDIKE_SCORE")
        && !score.is_empty()
    {
        cfg.score = parse_visibility(&score)
            .ok_or_else(|| ConfigError::Invalid("Invalid score".into()))?;
        sources.score = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var("KLONDIKE_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    save_dir: Option<PathBuf>,
    #[serde(default)]
    draw: Option<DrawMode>,
    #[serde(default)]
    flip_limit: Option<FlipLimit>,
    #[serde(default)]
    score: Option<ScoreVisibility>,
    #[serde(default)]
    seed: Option<u32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.save_dir.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: save_dir must not be empty".into(),
        ));
    }
    Ok(())
}

/// Accepts the setting names plus the usual on/off spellings.
fn parse_visibility(s: &str) -> Option<ScoreVisibility> {
    if let Ok(v) = s.parse() {
        return Some(v);
    }
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(ScoreVisibility::Show),
        "0" | "false" | "off" | "no" => Some(ScoreVisibility::Hide),
        _ => None,
    }
}
