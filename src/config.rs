// Configuration loading and parsing (config/draft.toml).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire draft.toml file.
#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    rules: RulesSection,
    timers: TimersSection,
    easter_egg: EasterEggSection,
    summary: SummarySection,
    data: DataSection,
    #[serde(rename = "tier")]
    tiers: Vec<TierEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct RulesSection {
    total_picks: u32,
    max_points: u32,
    max_rerolls: u32,
    min_tier_cost: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct TimersSection {
    roll_timeout_secs: u64,
    decision_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct EasterEggSection {
    fake_out_chance: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct SummarySection {
    checkpoint_round: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    catalog: String,
}

/// One `[[tier]]` table: a tier value and its base draw percentage.
#[derive(Debug, Clone, Deserialize)]
struct TierEntry {
    tier: u32,
    percent: f64,
}

/// The assembled draft configuration.
///
/// `tier_probs` is the static base probability table keyed by tier. When a
/// tier is unavailable (owned out, too expensive), the engine renormalizes
/// the surviving weights rather than consulting this table directly.
#[derive(Debug, Clone)]
pub struct DraftConfig {
    pub total_picks: u32,
    pub max_points: u32,
    pub max_rerolls: u32,
    pub min_tier_cost: u32,
    pub roll_timeout: Duration,
    pub decision_timeout: Duration,
    pub fake_out_chance: f64,
    pub summary_checkpoint_round: u32,
    pub catalog_path: String,
    pub tier_probs: BTreeMap<u32, f64>,
}

impl DraftConfig {
    /// Tier values in descending order (the display and draw order).
    pub fn tiers_descending(&self) -> Vec<u32> {
        self.tier_probs.keys().rev().copied().collect()
    }

    /// Base weight for a tier; zero when the tier is not in the table.
    pub fn base_weight(&self, tier: u32) -> f64 {
        self.tier_probs.get(&tier).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/draft.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<DraftConfig, ConfigError> {
    let path = base_dir.join("config").join("draft.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;

    let file: DraftFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let mut tier_probs = BTreeMap::new();
    for entry in &file.tiers {
        if tier_probs.insert(entry.tier, entry.percent).is_some() {
            return Err(ConfigError::ValidationError {
                field: "tier".into(),
                message: format!("duplicate tier {}", entry.tier),
            });
        }
    }

    let config = DraftConfig {
        total_picks: file.rules.total_picks,
        max_points: file.rules.max_points,
        max_rerolls: file.rules.max_rerolls,
        min_tier_cost: file.rules.min_tier_cost,
        roll_timeout: Duration::from_secs(file.timers.roll_timeout_secs),
        decision_timeout: Duration::from_secs(file.timers.decision_timeout_secs),
        fake_out_chance: file.easter_egg.fake_out_chance,
        summary_checkpoint_round: file.summary.checkpoint_round,
        catalog_path: file.data.catalog,
        tier_probs,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/draft.toml` exists by copying it from `defaults/` when
/// missing. Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let source = defaults_dir.join("draft.toml");
    let target = config_dir.join("draft.toml");

    if !source.exists() || target.exists() {
        return Ok(vec![]);
    }

    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    Ok(vec![target])
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<DraftConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &DraftConfig) -> Result<(), ConfigError> {
    if config.total_picks == 0 {
        return Err(ConfigError::ValidationError {
            field: "rules.total_picks".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.max_points == 0 {
        return Err(ConfigError::ValidationError {
            field: "rules.max_points".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.min_tier_cost == 0 {
        return Err(ConfigError::ValidationError {
            field: "rules.min_tier_cost".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.tier_probs.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "tier".into(),
            message: "at least one [[tier]] entry is required".into(),
        });
    }

    for (tier, percent) in &config.tier_probs {
        if *percent < 0.0 {
            return Err(ConfigError::ValidationError {
                field: "tier.percent".into(),
                message: format!("tier {tier} has negative percent {percent}"),
            });
        }
    }

    // The probability table must describe a full distribution. Renormalization
    // only ever narrows it; the base table itself must sum to 100.
    let sum: f64 = config.tier_probs.values().sum();
    if (sum - 100.0).abs() > 1e-6 {
        return Err(ConfigError::ValidationError {
            field: "tier".into(),
            message: format!("tier percents must sum to 100, got {sum}"),
        });
    }

    // Reserve-cash math assumes every future pick can be covered at
    // min_tier_cost, so the table must actually offer a tier that cheap.
    let cheapest = *config.tier_probs.keys().next().unwrap_or(&0);
    if config.min_tier_cost > cheapest {
        return Err(ConfigError::ValidationError {
            field: "rules.min_tier_cost".into(),
            message: format!(
                "must not exceed the cheapest tier ({cheapest}), got {}",
                config.min_tier_cost
            ),
        });
    }

    if !(0.0..=1.0).contains(&config.fake_out_chance) {
        return Err(ConfigError::ValidationError {
            field: "easter_egg.fake_out_chance".into(),
            message: format!(
                "must be between 0.0 and 1.0 inclusive, got {}",
                config.fake_out_chance
            ),
        });
    }

    if config.summary_checkpoint_round == 0 {
        return Err(ConfigError::ValidationError {
            field: "summary.checkpoint_round".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
