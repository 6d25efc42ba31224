//! Key contributing factor extraction
//!
//! Rules are evaluated in a fixed priority order (glucose, BMI, age, pedigree)
//! and the result is truncated to the first `max_factors` matches. This is a
//! priority list, not a magnitude ranking.

use crate::features::{Feature, FeatureVector};
use serde::{Deserialize, Serialize};

/// Factor severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// A triggered explanation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Factor {
    pub name: String,
    pub formatted_value: String,
    pub severity: Severity,
    pub description: String,
}

/// Threshold rule for one feature
#[derive(Debug, Clone, PartialEq)]
pub struct FactorRule {
    pub feature: Feature,
    pub name: &'static str,
    /// Value must exceed this to trigger
    pub trigger: f64,
    /// Value must exceed this for high severity
    pub high: f64,
    pub description: &'static str,
}

impl FactorRule {
    pub fn evaluate(&self, vector: &FeatureVector) -> Option<Factor> {
        let value = vector.get(self.feature);
        if value <= self.trigger {
            return None;
        }
        let severity = if value > self.high {
            Severity::High
        } else {
            Severity::Medium
        };
        Some(Factor {
            name: self.name.to_string(),
            formatted_value: format_value(self.feature, value),
            severity,
            description: self.description.to_string(),
        })
    }
}

/// Display string for a triggered value
pub fn format_value(feature: Feature, value: f64) -> String {
    match feature {
        Feature::Glucose => format!("{} mg/dL", value),
        Feature::Bmi => format!("{:.1} kg/m²", value),
        Feature::Age => format!("{} years", value),
        Feature::DiabetesPedigreeFunction => format!("{:.3}", value),
        _ => format!("{} {}", value, feature.spec().unit),
    }
}

/// Ordered rule list with a result cap
#[derive(Debug, Clone, PartialEq)]
pub struct FactorRules {
    pub rules: Vec<FactorRule>,
    pub max_factors: usize,
}

impl Default for FactorRules {
    fn default() -> Self {
        FactorRules {
            rules: vec![
                FactorRule {
                    feature: Feature::Glucose,
                    name: "Glucose",
                    trigger: 125.0,
                    high: 140.0,
                    description: "Elevated blood glucose level",
                },
                FactorRule {
                    feature: Feature::Bmi,
                    name: "BMI",
                    trigger: 30.0,
                    high: 35.0,
                    description: "Elevated body mass index",
                },
                FactorRule {
                    feature: Feature::Age,
                    name: "Age",
                    trigger: 45.0,
                    high: 60.0,
                    description: "Increased age risk factor",
                },
                FactorRule {
                    feature: Feature::DiabetesPedigreeFunction,
                    name: "Diabetes Pedigree Function",
                    trigger: 0.8,
                    high: 1.0,
                    description: "Genetic predisposition to diabetes",
                },
            ],
            max_factors: 3,
        }
    }
}

impl FactorRules {
    /// Copy with a different cap
    pub fn with_max_factors(mut self, max_factors: usize) -> Self {
        self.max_factors = max_factors;
        self
    }

    /// First `max_factors` triggered rules, in rule order
    pub fn extract(&self, vector: &FeatureVector) -> Vec<Factor> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(vector))
            .take(self.max_factors)
            .collect()
    }
}

/// Extract with the default rule set
pub fn extract(vector: &FeatureVector) -> Vec<Factor> {
    FactorRules::default().extract(vector)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_vector() -> FeatureVector {
        FeatureVector::default()
            .with(Feature::Glucose, 100.0)
            .with(Feature::Bmi, 22.0)
            .with(Feature::Age, 30.0)
            .with(Feature::DiabetesPedigreeFunction, 0.3)
    }

    #[test]
    fn test_no_triggers_yields_empty() {
        assert!(extract(&quiet_vector()).is_empty());
    }

    #[test]
    fn test_reference_patient() {
        let v = quiet_vector()
            .with(Feature::Glucose, 148.0)
            .with(Feature::Bmi, 33.6)
            .with(Feature::Age, 50.0)
            .with(Feature::DiabetesPedigreeFunction, 0.627);
        let factors = extract(&v);
        let summary: Vec<(&str, Severity)> =
            factors.iter().map(|f| (f.name.as_str(), f.severity)).collect();
        assert_eq!(
            summary,
            vec![
                ("Glucose", Severity::High),
                ("BMI", Severity::Medium),
                ("Age", Severity::Medium),
            ]
        );
        assert_eq!(factors[0].formatted_value, "148 mg/dL");
        assert_eq!(factors[1].formatted_value, "33.6 kg/m²");
        assert_eq!(factors[2].formatted_value, "50 years");
    }

    #[test]
    fn test_truncates_to_first_three_in_priority_order() {
        let v = quiet_vector()
            .with(Feature::Glucose, 130.0)
            .with(Feature::Bmi, 40.0)
            .with(Feature::Age, 70.0)
            .with(Feature::DiabetesPedigreeFunction, 2.0);
        let names: Vec<String> = extract(&v).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Glucose", "BMI", "Age"]);
    }

    #[test]
    fn test_pedigree_included_when_slot_available() {
        let v = quiet_vector()
            .with(Feature::Age, 61.0)
            .with(Feature::DiabetesPedigreeFunction, 0.9);
        let factors = extract(&v);
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[0].severity, Severity::High);
        assert_eq!(factors[1].name, "Diabetes Pedigree Function");
        assert_eq!(factors[1].formatted_value, "0.900");
        assert_eq!(factors[1].severity, Severity::Medium);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let v = quiet_vector()
            .with(Feature::Glucose, 125.0)
            .with(Feature::Bmi, 30.0)
            .with(Feature::Age, 45.0)
            .with(Feature::DiabetesPedigreeFunction, 0.8);
        assert!(extract(&v).is_empty());

        let edge = quiet_vector().with(Feature::Glucose, 140.0);
        assert_eq!(extract(&edge)[0].severity, Severity::Medium);
    }

    #[test]
    fn test_custom_cap() {
        let v = quiet_vector()
            .with(Feature::Glucose, 130.0)
            .with(Feature::Bmi, 40.0);
        let factors = FactorRules::default().with_max_factors(1).extract(&v);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].name, "Glucose");
    }

    #[test]
    fn test_factor_serializes_camel_case() {
        let v = quiet_vector().with(Feature::Glucose, 150.0);
        let json = serde_json::to_value(&extract(&v)[0]).unwrap();
        assert_eq!(json["formattedValue"], "150 mg/dL");
        assert_eq!(json["severity"], "high");
    }
}
