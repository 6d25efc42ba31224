//! Clinical reference ranges for single measurements
//!
//! Labels only; reference bands have no influence on the model probability.

use crate::features::Feature;
use serde::{Deserialize, Serialize};

/// Display tone of a reference band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Good,
    Caution,
    Alert,
}

/// Named clinical interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceBand {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub tone: Tone,
}

const GLUCOSE_BANDS: &[ReferenceBand] = &[
    ReferenceBand {
        name: "normal",
        min: 70.0,
        max: 99.0,
        tone: Tone::Good,
    },
    ReferenceBand {
        name: "prediabetic",
        min: 100.0,
        max: 125.0,
        tone: Tone::Caution,
    },
    ReferenceBand {
        name: "diabetic",
        min: 126.0,
        max: 200.0,
        tone: Tone::Alert,
    },
];

const BLOOD_PRESSURE_BANDS: &[ReferenceBand] = &[
    ReferenceBand {
        name: "normal",
        min: 0.0,
        max: 80.0,
        tone: Tone::Good,
    },
    ReferenceBand {
        name: "elevated",
        min: 81.0,
        max: 89.0,
        tone: Tone::Caution,
    },
    ReferenceBand {
        name: "high",
        min: 90.0,
        max: 140.0,
        tone: Tone::Alert,
    },
];

const BMI_BANDS: &[ReferenceBand] = &[
    ReferenceBand {
        name: "underweight",
        min: 0.0,
        max: 18.5,
        tone: Tone::Caution,
    },
    ReferenceBand {
        name: "normal",
        min: 18.6,
        max: 24.9,
        tone: Tone::Good,
    },
    ReferenceBand {
        name: "overweight",
        min: 25.0,
        max: 29.9,
        tone: Tone::Caution,
    },
    ReferenceBand {
        name: "obese",
        min: 30.0,
        max: 100.0,
        tone: Tone::Alert,
    },
];

/// Reference band tables keyed by feature
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRanges {
    pub glucose: &'static [ReferenceBand],
    pub blood_pressure: &'static [ReferenceBand],
    pub bmi: &'static [ReferenceBand],
}

impl Default for ReferenceRanges {
    fn default() -> Self {
        ReferenceRanges {
            glucose: GLUCOSE_BANDS,
            blood_pressure: BLOOD_PRESSURE_BANDS,
            bmi: BMI_BANDS,
        }
    }
}

impl ReferenceRanges {
    /// Bands for `feature`, lowest first; `None` if the feature has no table
    pub fn bands(&self, feature: Feature) -> Option<&'static [ReferenceBand]> {
        match feature {
            Feature::Glucose => Some(self.glucose),
            Feature::BloodPressure => Some(self.blood_pressure),
            Feature::Bmi => Some(self.bmi),
            _ => None,
        }
    }

    /// First band whose `max` is at least `value`; values past the top band
    /// map to the top band. Non-finite values have no band.
    pub fn band_for(&self, feature: Feature, value: f64) -> Option<&'static ReferenceBand> {
        if !value.is_finite() {
            return None;
        }
        let bands = self.bands(feature)?;
        bands.iter().find(|b| value <= b.max).or_else(|| bands.last())
    }

    pub fn classify_field(&self, feature: Feature, value: f64) -> Option<&'static str> {
        self.band_for(feature, value).map(|b| b.name)
    }
}

/// Classify with the default tables
pub fn classify_field(feature: Feature, value: f64) -> Option<&'static str> {
    ReferenceRanges::default().classify_field(feature, value)
}
