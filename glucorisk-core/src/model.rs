//! Logistic scoring model
//!
//! Global invariants enforced:
//! - Returned probabilities always lie in [0, 1]
//! - Randomness only enters through the caller-supplied `Rng`
//! - A zero noise amplitude makes scoring deterministic

use crate::error::EngineResult;
use crate::features::{Feature, FeatureVector};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bound on a single weighted term; nine terms at this size still sum to a finite logit
const TERM_LIMIT: f64 = 1e300;

/// Linear weights applied to each feature before the logistic transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coefficients {
    pub intercept: f64,
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Coefficients {
            intercept: -6.5,
            pregnancies: 0.08,
            glucose: 0.03,
            blood_pressure: 0.002,
            skin_thickness: 0.001,
            insulin: 0.0002,
            bmi: 0.09,
            diabetes_pedigree_function: 0.8,
            age: 0.02,
        }
    }
}

impl Coefficients {
    pub fn weight(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Pregnancies => self.pregnancies,
            Feature::Glucose => self.glucose,
            Feature::BloodPressure => self.blood_pressure,
            Feature::SkinThickness => self.skin_thickness,
            Feature::Insulin => self.insulin,
            Feature::Bmi => self.bmi,
            Feature::DiabetesPedigreeFunction => self.diabetes_pedigree_function,
            Feature::Age => self.age,
        }
    }

    /// Log-odds: intercept + sum of weighted features
    ///
    /// Each term saturates at `±TERM_LIMIT`, so finite weights and values
    /// never produce an infinite or NaN logit.
    pub fn logit(&self, vector: &FeatureVector) -> f64 {
        let saturate = |term: f64| term.clamp(-TERM_LIMIT, TERM_LIMIT);
        vector.iter().fold(saturate(self.intercept), |acc, (f, v)| {
            acc + saturate(self.weight(f) * v)
        })
    }
}

/// Logistic transform
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Uniform perturbation added to the model output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseModel {
    /// Half-width of the uniform draw; 0 disables noise
    pub amplitude: f64,
}

impl Default for NoiseModel {
    fn default() -> Self {
        NoiseModel { amplitude: 0.05 }
    }
}

impl NoiseModel {
    pub fn none() -> Self {
        NoiseModel { amplitude: 0.0 }
    }

    /// Draw from `[-amplitude, +amplitude]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.amplitude <= 0.0 {
            return 0.0;
        }
        rng.gen_range(-self.amplitude..=self.amplitude)
    }
}

/// Fixed linear-logit model with bounded random perturbation
///
/// Scoring is non-deterministic unless the noise amplitude is zero or the
/// caller passes a seeded generator: two calls with identical input may
/// return probabilities up to `2 * amplitude` apart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringModel {
    pub coefficients: Coefficients,
    pub noise: NoiseModel,
}

impl ScoringModel {
    pub fn new(coefficients: Coefficients, noise: NoiseModel) -> Self {
        ScoringModel {
            coefficients,
            noise,
        }
    }

    /// Noise-free sigmoid output
    pub fn base_probability(&self, vector: &FeatureVector) -> EngineResult<f64> {
        vector.validate()?;
        let logit = self.coefficients.logit(vector);
        tracing::trace!(logit, "computed logit");
        Ok(sigmoid(logit))
    }

    /// Perturbed probability clamped to [0, 1]
    pub fn score<R: Rng + ?Sized>(
        &self,
        vector: &FeatureVector,
        rng: &mut R,
    ) -> EngineResult<f64> {
        let p = self.base_probability(vector)?;
        let noisy = p + self.noise.sample(rng);
        Ok(noisy.clamp(0.0, 1.0))
    }
}
