//! Glucorisk core library - diabetes risk scoring engine

// Global invariants enforced in this crate:
// - Prediction is a pure function of the feature vector, the resolved config, and the supplied Rng
// - No global mutable state; constant tables are built once and passed by reference
// - Non-finite input is rejected before any scoring work
// - Probabilities never leave [0, 1]
// - Key factors keep their fixed priority order

pub mod config;
pub mod error;
pub mod factors;
pub mod features;
pub mod model;
pub mod reference;
pub mod report;
pub mod risk;

pub use config::{load_and_resolve, GlucoriskConfig, ResolvedConfig};
pub use error::{EngineError, EngineResult};
pub use factors::{Factor, Severity};
pub use features::{Feature, FeatureVector};
pub use report::{render_json, render_text, PredictionResult};
pub use risk::RiskBand;

use rand::Rng;

/// Score a feature vector, classify it and explain it
///
/// Validation happens first; an invalid vector yields `InvalidInput` and no
/// random draw is consumed. Out-of-bounds values are scored as given.
pub fn predict<R: Rng + ?Sized>(
    vector: &FeatureVector,
    config: &ResolvedConfig,
    rng: &mut R,
) -> EngineResult<PredictionResult> {
    vector.validate()?;

    let out_of_bounds = vector.out_of_bounds();
    if !out_of_bounds.is_empty() {
        tracing::warn!(fields = ?out_of_bounds, "scoring values outside declared bounds");
    }

    let probability = config.model.score(vector, rng)?;
    let band = risk::classify_with_thresholds(probability, &config.thresholds);
    let factors = config.factor_rules.extract(vector);

    tracing::debug!(
        probability,
        band = band.as_str(),
        factors = factors.len(),
        "prediction complete"
    );

    Ok(PredictionResult {
        probability,
        band,
        factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_predict_default_vector_noise_free() {
        let config = GlucoriskConfig {
            noise: Some(config::NoiseConfig {
                amplitude: Some(0.0),
            }),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = predict(&FeatureVector::default(), &config, &mut rng).unwrap();

        // sigmoid(1.5358)
        assert!((result.probability - 0.822_83).abs() < 1e-4);
        assert_eq!(result.band, RiskBand::High);
        // bmi 32 triggers; glucose 120 and age 45 do not
        assert_eq!(result.factors.len(), 1);
        assert_eq!(result.factors[0].name, "BMI");
    }

    #[test]
    fn test_predict_rejects_nan() {
        let config = ResolvedConfig::defaults().unwrap();
        let v = FeatureVector::default().with(Feature::Pregnancies, f64::NAN);
        let err = predict(&v, &config, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err.field(), Feature::Pregnancies);
    }

    #[test]
    fn test_predict_honours_custom_thresholds() {
        let config = GlucoriskConfig {
            thresholds: Some(config::ThresholdConfig {
                moderate: Some(0.85),
                high: Some(0.95),
            }),
            noise: Some(config::NoiseConfig {
                amplitude: Some(0.0),
            }),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let result = predict(
            &FeatureVector::default(),
            &config,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert_eq!(result.band, RiskBand::Low);
    }
}
