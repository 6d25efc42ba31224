//! Configuration file support for Glucorisk
//!
//! Loads engine configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path
//! 2. `.glucoriskrc.json` in the given directory
//! 3. `glucorisk.config.json` in the given directory
//!
//! All fields are optional; missing values fall back to the built-in model.

use crate::factors::FactorRules;
use crate::model::{Coefficients, NoiseModel, ScoringModel};
use crate::risk::RiskThresholds;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest accepted absolute coefficient
const MAX_COEFFICIENT: f64 = 100.0;

/// Largest accepted noise half-width
const MAX_NOISE_AMPLITUDE: f64 = 0.5;

/// Engine configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlucoriskConfig {
    /// Partial overrides of the model weights
    #[serde(default)]
    pub coefficients: Option<CoefficientConfig>,

    /// Custom risk band thresholds
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,

    /// Random perturbation settings
    #[serde(default)]
    pub noise: Option<NoiseConfig>,

    /// Maximum number of key factors reported (default: 3)
    #[serde(default)]
    pub max_factors: Option<usize>,

    /// Seed for a reproducible random source
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Partial coefficient overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CoefficientConfig {
    pub intercept: Option<f64>,
    pub pregnancies: Option<f64>,
    pub glucose: Option<f64>,
    pub blood_pressure: Option<f64>,
    pub skin_thickness: Option<f64>,
    pub insulin: Option<f64>,
    pub bmi: Option<f64>,
    pub diabetes_pedigree_function: Option<f64>,
    pub age: Option<f64>,
}

/// Custom risk band thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Probability above which risk is moderate (default: 0.4)
    pub moderate: Option<f64>,
    /// Probability above which risk is high (default: 0.7)
    pub high: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseConfig {
    /// Half-width of the uniform perturbation (default: 0.05, 0 disables)
    pub amplitude: Option<f64>,
}

/// Resolved configuration ready for scoring
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model: ScoringModel,
    pub thresholds: RiskThresholds,
    pub factor_rules: FactorRules,
    pub seed: Option<u64>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl CoefficientConfig {
    fn entries(&self) -> [(&'static str, Option<f64>); 9] {
        [
            ("intercept", self.intercept),
            ("pregnancies", self.pregnancies),
            ("glucose", self.glucose),
            ("bloodPressure", self.blood_pressure),
            ("skinThickness", self.skin_thickness),
            ("insulin", self.insulin),
            ("bmi", self.bmi),
            ("diabetesPedigreeFunction", self.diabetes_pedigree_function),
            ("age", self.age),
        ]
    }

    fn apply(&self, base: Coefficients) -> Coefficients {
        Coefficients {
            intercept: self.intercept.unwrap_or(base.intercept),
            pregnancies: self.pregnancies.unwrap_or(base.pregnancies),
            glucose: self.glucose.unwrap_or(base.glucose),
            blood_pressure: self.blood_pressure.unwrap_or(base.blood_pressure),
            skin_thickness: self.skin_thickness.unwrap_or(base.skin_thickness),
            insulin: self.insulin.unwrap_or(base.insulin),
            bmi: self.bmi.unwrap_or(base.bmi),
            diabetes_pedigree_function: self
                .diabetes_pedigree_function
                .unwrap_or(base.diabetes_pedigree_function),
            age: self.age.unwrap_or(base.age),
        }
    }
}

impl GlucoriskConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref c) = self.coefficients {
            for (name, val) in c.entries() {
                if let Some(v) = val {
                    if !v.is_finite() {
                        anyhow::bail!("coefficients.{} must be finite (got {})", name, v);
                    }
                    if v.abs() > MAX_COEFFICIENT {
                        anyhow::bail!(
                            "coefficients.{} must be within ±{} (got {})",
                            name,
                            MAX_COEFFICIENT,
                            v
                        );
                    }
                }
            }
        }

        // Validate thresholds are probabilities and ordered
        if let Some(ref t) = self.thresholds {
            let defaults = RiskThresholds::default();
            let moderate = t.moderate.unwrap_or(defaults.moderate);
            let high = t.high.unwrap_or(defaults.high);

            for (name, v) in [("moderate", moderate), ("high", high)] {
                if !(0.0..=1.0).contains(&v) {
                    anyhow::bail!("thresholds.{} must be within [0, 1] (got {})", name, v);
                }
            }
            if moderate >= high {
                anyhow::bail!(
                    "thresholds.moderate ({}) must be less than thresholds.high ({})",
                    moderate,
                    high
                );
            }
        }

        if let Some(ref n) = self.noise {
            if let Some(a) = n.amplitude {
                if !(0.0..=MAX_NOISE_AMPLITUDE).contains(&a) {
                    anyhow::bail!(
                        "noise.amplitude must be within [0, {}] (got {})",
                        MAX_NOISE_AMPLITUDE,
                        a
                    );
                }
            }
        }

        if let Some(max) = self.max_factors {
            let rule_count = FactorRules::default().rules.len();
            if max == 0 || max > rule_count {
                anyhow::bail!(
                    "max_factors must be between 1 and {} (got {})",
                    rule_count,
                    max
                );
            }
        }

        Ok(())
    }

    /// Resolve config into the immutable tables used for scoring
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let coefficients = match &self.coefficients {
            Some(c) => c.apply(Coefficients::default()),
            None => Coefficients::default(),
        };

        let thresholds = {
            let defaults = RiskThresholds::default();
            match &self.thresholds {
                Some(t) => RiskThresholds {
                    moderate: t.moderate.unwrap_or(defaults.moderate),
                    high: t.high.unwrap_or(defaults.high),
                },
                None => defaults,
            }
        };

        let noise = match self.noise.as_ref().and_then(|n| n.amplitude) {
            Some(amplitude) => NoiseModel { amplitude },
            None => NoiseModel::default(),
        };

        let mut factor_rules = FactorRules::default();
        if let Some(max) = self.max_factors {
            factor_rules = factor_rules.with_max_factors(max);
        }

        Ok(ResolvedConfig {
            model: ScoringModel::new(coefficients, noise),
            thresholds,
            factor_rules,
            seed: self.seed,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        GlucoriskConfig::default().resolve()
    }

    /// Random source honoring the configured seed
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Discover and load a config file from a directory
///
/// Search order:
/// 1. `.glucoriskrc.json`
/// 2. `glucorisk.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(GlucoriskConfig, PathBuf)>> {
    for name in [".glucoriskrc.json", "glucorisk.config.json"] {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            tracing::debug!(path = %path.display(), "discovered config file");
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<GlucoriskConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: GlucoriskConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (GlucoriskConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    tracing::debug!(
        config_path = ?resolved.config_path,
        noise = resolved.model.noise.amplitude,
        "resolved engine config"
    );
    Ok(resolved)
}
