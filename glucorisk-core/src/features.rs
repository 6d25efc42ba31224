//! Patient feature vectors and per-field bounds
//!
//! Global invariants enforced:
//! - A vector that passes `validate` has eight finite fields
//! - Out-of-bounds values are tolerated; bounds only drive normalization and warnings

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One of the eight diagnostic measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigreeFunction,
    Age,
}

/// Declared range and input granularity of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Decimal places implied by `step`
    pub decimals: u32,
    pub unit: &'static str,
}

impl FieldSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp to `[min, max]` and snap onto the step grid anchored at `min`
    pub fn normalize(&self, value: f64) -> f64 {
        let bounded = value.clamp(self.min, self.max);
        let steps = ((bounded - self.min) / self.step).round();
        let snapped = round_to(self.min + steps * self.step, self.decimals);
        snapped.clamp(self.min, self.max)
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

impl Feature {
    /// All features in model order
    pub const ALL: [Feature; 8] = [
        Feature::Pregnancies,
        Feature::Glucose,
        Feature::BloodPressure,
        Feature::SkinThickness,
        Feature::Insulin,
        Feature::Bmi,
        Feature::DiabetesPedigreeFunction,
        Feature::Age,
    ];

    /// Key used in serialized vectors and config files
    pub fn key(&self) -> &'static str {
        match self {
            Feature::Pregnancies => "pregnancies",
            Feature::Glucose => "glucose",
            Feature::BloodPressure => "bloodPressure",
            Feature::SkinThickness => "skinThickness",
            Feature::Insulin => "insulin",
            Feature::Bmi => "bmi",
            Feature::DiabetesPedigreeFunction => "diabetesPedigreeFunction",
            Feature::Age => "age",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Pregnancies => "Pregnancies",
            Feature::Glucose => "Glucose",
            Feature::BloodPressure => "Blood Pressure",
            Feature::SkinThickness => "Skin Thickness",
            Feature::Insulin => "Insulin",
            Feature::Bmi => "BMI",
            Feature::DiabetesPedigreeFunction => "Diabetes Pedigree Function",
            Feature::Age => "Age",
        }
    }

    pub fn spec(&self) -> FieldSpec {
        let (min, max, step, decimals, unit) = match self {
            Feature::Pregnancies => (0.0, 20.0, 1.0, 0, "count"),
            Feature::Glucose => (0.0, 250.0, 1.0, 0, "mg/dL"),
            Feature::BloodPressure => (0.0, 140.0, 1.0, 0, "mm Hg"),
            Feature::SkinThickness => (0.0, 100.0, 1.0, 0, "mm"),
            Feature::Insulin => (0.0, 850.0, 1.0, 0, "mu U/ml"),
            Feature::Bmi => (10.0, 70.0, 0.1, 1, "kg/m²"),
            Feature::DiabetesPedigreeFunction => (0.078, 2.42, 0.001, 3, "score"),
            Feature::Age => (21.0, 90.0, 1.0, 0, "years"),
        };
        FieldSpec {
            min,
            max,
            step,
            decimals,
            unit,
        }
    }

    /// Parse a serialized key
    pub fn from_key(key: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Diagnostic measurements for one patient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeatureVector {
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: f64,
}

impl Default for FeatureVector {
    /// Initial values of the prediction form
    fn default() -> Self {
        FeatureVector {
            pregnancies: 3.0,
            glucose: 120.0,
            blood_pressure: 70.0,
            skin_thickness: 20.0,
            insulin: 79.0,
            bmi: 32.0,
            diabetes_pedigree_function: 0.3,
            age: 45.0,
        }
    }
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
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

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::Pregnancies => &mut self.pregnancies,
            Feature::Glucose => &mut self.glucose,
            Feature::BloodPressure => &mut self.blood_pressure,
            Feature::SkinThickness => &mut self.skin_thickness,
            Feature::Insulin => &mut self.insulin,
            Feature::Bmi => &mut self.bmi,
            Feature::DiabetesPedigreeFunction => &mut self.diabetes_pedigree_function,
            Feature::Age => &mut self.age,
        };
        *slot = value;
    }

    /// Copy with `feature` replaced
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.set(feature, value);
        self
    }

    /// Iterate `(feature, value)` pairs in model order
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Reject the first non-finite field in model order
    pub fn validate(&self) -> EngineResult<()> {
        match self.iter().find(|(_, v)| !v.is_finite()) {
            Some((field, value)) => Err(EngineError::InvalidInput {
                field,
                value: Some(value),
            }),
            None => Ok(()),
        }
    }

    /// Fields whose values lie outside their declared bounds
    pub fn out_of_bounds(&self) -> Vec<Feature> {
        self.iter()
            .filter(|(f, v)| !f.spec().contains(*v))
            .map(|(f, _)| f)
            .collect()
    }

    /// Validated copy with every field clamped and snapped to its step
    pub fn clamped(&self) -> EngineResult<Self> {
        self.validate()?;
        let mut out = *self;
        for feature in Feature::ALL {
            out.set(feature, feature.spec().normalize(self.get(feature)));
        }
        Ok(out)
    }

    /// Build from camelCase keys; unknown keys are ignored
    pub fn from_map(values: &HashMap<String, f64>) -> EngineResult<Self> {
        let mut out = FeatureVector::default();
        for feature in Feature::ALL {
            let value = values
                .get(feature.key())
                .copied()
                .ok_or(EngineError::InvalidInput {
                    field: feature,
                    value: None,
                })?;
            out.set(feature, value);
        }
        out.validate()?;
        Ok(out)
    }
}
