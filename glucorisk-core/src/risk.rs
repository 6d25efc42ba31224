//! Risk band classification
//!
//! Global invariants enforced:
//! - Band assignment is monotonic in probability
//! - Thresholds are strict: a probability equal to a cut-off falls in the lower band

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk band classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,      // <= 0.4
    Moderate, // 0.4-0.7
    High,     // > 0.7
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Moderate => "moderate",
            RiskBand::High => "high",
        }
    }

    /// Summary line shown alongside the probability
    pub fn headline(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low Risk of Diabetes",
            RiskBand::Moderate => "Moderate Risk of Diabetes",
            RiskBand::High => "High Risk of Diabetes",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configurable risk band thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            moderate: 0.4,
            high: 0.7,
        }
    }
}

/// Assign risk band with default thresholds
pub fn classify(probability: f64) -> RiskBand {
    classify_with_thresholds(probability, &RiskThresholds::default())
}

/// Assign risk band with custom thresholds
pub fn classify_with_thresholds(probability: f64, thresholds: &RiskThresholds) -> RiskBand {
    if probability > thresholds.high {
        RiskBand::High
    } else if probability > thresholds.moderate {
        RiskBand::Moderate
    } else {
        RiskBand::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_strict() {
        assert_eq!(classify(0.4), RiskBand::Low);
        assert_eq!(classify(0.400_001), RiskBand::Moderate);
        assert_eq!(classify(0.7), RiskBand::Moderate);
        assert_eq!(classify(0.700_001), RiskBand::High);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(0.0), RiskBand::Low);
        assert_eq!(classify(1.0), RiskBand::High);
    }

    #[test]
    fn test_band_ordering() {
        assert!(RiskBand::Low < RiskBand::Moderate);
        assert!(RiskBand::Moderate < RiskBand::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = RiskThresholds {
            moderate: 0.2,
            high: 0.5,
        };
        assert_eq!(classify_with_thresholds(0.3, &t), RiskBand::Moderate);
        assert_eq!(classify_with_thresholds(0.6, &t), RiskBand::High);
    }

    #[test]
    fn test_headline() {
        assert_eq!(RiskBand::High.headline(), "High Risk of Diabetes");
        assert_eq!(RiskBand::Low.to_string(), "low");
    }
}
