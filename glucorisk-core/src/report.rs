//! Prediction results and output rendering

use crate::factors::{Factor, Severity};
use crate::risk::RiskBand;
use serde::{Deserialize, Serialize};

/// Outcome of a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub probability: f64,
    pub band: RiskBand,
    /// Empty when no factor triggered; presentation omits the panel
    pub factors: Vec<Factor>,
}

impl PredictionResult {
    /// Probability as a percentage with one decimal, e.g. `72.3%`
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }
}

/// Render a prediction as pretty-printed JSON
pub fn render_json(result: &PredictionResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render a prediction as plain text
pub fn render_text(result: &PredictionResult) -> String {
    let mut output = format!(
        "Diabetes Risk: {} ({})\n",
        result.percent(),
        result.band.headline()
    );

    if !result.factors.is_empty() {
        output.push_str("Key Risk Factors:\n");
        for factor in &result.factors {
            let marker = match factor.severity {
                Severity::High => "!!",
                Severity::Medium => "! ",
            };
            output.push_str(&format!(
                "  {} {:<28} {:>12}  {}\n",
                marker, factor.name, factor.formatted_value, factor.description
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PredictionResult {
        PredictionResult {
            probability: 0.7234,
            band: RiskBand::High,
            factors: vec![Factor {
                name: "Glucose".to_string(),
                formatted_value: "148 mg/dL".to_string(),
                severity: Severity::High,
                description: "Elevated blood glucose level".to_string(),
            }],
        }
    }

    #[test]
    fn test_percent_rounds_to_one_decimal() {
        assert_eq!(sample().percent(), "72.3%");
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample());
        assert!(text.starts_with("Diabetes Risk: 72.3% (High Risk of Diabetes)\n"));
        assert!(text.contains("Key Risk Factors:"));
        assert!(text.contains("148 mg/dL"));
    }

    #[test]
    fn test_render_text_omits_empty_factor_panel() {
        let result = PredictionResult {
            probability: 0.1,
            band: RiskBand::Low,
            factors: Vec::new(),
        };
        let text = render_text(&result);
        assert_eq!(text, "Diabetes Risk: 10.0% (Low Risk of Diabetes)\n");
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["band"], "high");
        assert_eq!(value["factors"][0]["name"], "Glucose");
        assert_eq!(value["factors"][0]["severity"], "high");
    }
}
