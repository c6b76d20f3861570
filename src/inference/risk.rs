//! Risk levels, guidance text and the assessment built from a prediction

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::NUM_CLASSES;

/// Discretized classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Likely cause and suggested action for a risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guidance {
    pub likely_cause: &'static str,
    pub suggested_action: &'static str,
}

const LOW_GUIDANCE: Guidance = Guidance {
    likely_cause: "Normal operating temperature. No anomalies detected.",
    suggested_action: "Continue routine monitoring. No immediate action required.",
};

const MEDIUM_GUIDANCE: Guidance = Guidance {
    likely_cause: "Elevated temperature detected. Possible causes: equipment overload, poor ventilation, or developing hotspot.",
    suggested_action: "Investigate the heat source. Increase monitoring frequency. Check for obstructions or equipment malfunctions. Consider preventive maintenance.",
};

const HIGH_GUIDANCE: Guidance = Guidance {
    likely_cause: "Critical temperature detected. Potential fire hazard. Possible causes: electrical fault, combustion, or severe equipment failure.",
    suggested_action: "IMMEDIATE ACTION REQUIRED: Evacuate the area if safe to do so. Alert emergency services. Activate fire suppression systems. Do not approach the heat source.",
};

impl RiskLevel {
    /// All levels in model output order
    pub const ALL: [RiskLevel; NUM_CLASSES] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Index of this level in the model output vector
    pub fn index(self) -> usize {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    /// Level for a model output index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Wire name of the level
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    /// Fixed cause/action text for this level
    pub fn guidance(self) -> Guidance {
        match self {
            RiskLevel::Low => LOW_GUIDANCE,
            RiskLevel::Medium => MEDIUM_GUIDANCE,
            RiskLevel::High => HIGH_GUIDANCE,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{}'", other)),
        }
    }
}

/// Guidance for a label string; unknown labels get the LOW entry
pub fn guidance_for_label(label: &str) -> Guidance {
    label
        .parse::<RiskLevel>()
        .map(RiskLevel::guidance)
        .unwrap_or(LOW_GUIDANCE)
}

/// Probability for every risk level; all three keys are always serialized
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskProbabilities {
    #[serde(rename = "LOW")]
    pub low: f32,
    #[serde(rename = "MEDIUM")]
    pub medium: f32,
    #[serde(rename = "HIGH")]
    pub high: f32,
}

impl RiskProbabilities {
    /// Build from a model output vector in `RiskLevel::ALL` order
    pub fn from_array(values: [f32; NUM_CLASSES]) -> Self {
        let [low, medium, high] = values;
        Self { low, medium, high }
    }

    /// Values in `RiskLevel::ALL` order
    pub fn to_array(&self) -> [f32; NUM_CLASSES] {
        [self.low, self.medium, self.high]
    }

    /// Probability of a single level
    pub fn get(&self, level: RiskLevel) -> f32 {
        self.to_array()[level.index()]
    }

    /// Most probable level and its probability.
    ///
    /// Ties go to the lower risk level and NaN entries are skipped. If every
    /// entry is NaN the result is LOW with probability 0.
    pub fn argmax(&self) -> (RiskLevel, f32) {
        RiskLevel::ALL
            .iter()
            .map(|&level| (level, self.get(level)))
            .filter(|(_, p)| !p.is_nan())
            .fold(None, |best: Option<(RiskLevel, f32)>, candidate| match best {
                Some(best) if candidate.1 <= best.1 => Some(best),
                _ => Some(candidate),
            })
            .unwrap_or((RiskLevel::Low, 0.0))
    }

    /// Sum of all probabilities
    pub fn total(&self) -> f32 {
        self.low + self.medium + self.high
    }
}

/// Final result returned to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Winning risk level
    pub risk: RiskLevel,

    /// Probability for each risk level
    pub probabilities: RiskProbabilities,

    /// Likely cause of the detected risk level
    pub likely_cause: &'static str,

    /// Recommended action to take
    pub suggested_action: &'static str,

    /// Winning probability as a percentage (0-100)
    pub confidence: f32,
}

impl RiskAssessment {
    /// Derive label, confidence and guidance from a probability vector
    pub fn from_probabilities(values: [f32; NUM_CLASSES]) -> Self {
        let probabilities = RiskProbabilities::from_array(values);
        let (risk, probability) = probabilities.argmax();
        let guidance = risk.guidance();

        Self {
            risk,
            probabilities,
            likely_cause: guidance.likely_cause,
            suggested_action: guidance.suggested_action,
            confidence: probability * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_highest() {
        let assessment = RiskAssessment::from_probabilities([0.1, 0.2, 0.7]);
        assert_eq!(assessment.risk, RiskLevel::High);
        assert!((assessment.confidence - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_argmax_tie_goes_to_lower_level() {
        let probabilities = RiskProbabilities::from_array([0.4, 0.4, 0.2]);
        assert_eq!(probabilities.argmax().0, RiskLevel::Low);

        let probabilities = RiskProbabilities::from_array([0.2, 0.4, 0.4]);
        assert_eq!(probabilities.argmax().0, RiskLevel::Medium);
    }

    #[test]
    fn test_nan_never_wins() {
        let probabilities = RiskProbabilities::from_array([0.1, f32::NAN, 0.3]);
        assert_eq!(probabilities.argmax().0, RiskLevel::High);

        let assessment = RiskAssessment::from_probabilities([f32::NAN, 0.3, 0.7]);
        assert_eq!(assessment.risk, RiskLevel::High);
        assert!((assessment.confidence - 70.0).abs() < 1e-4);

        let json = serde_json::to_value(&assessment).unwrap();
        assert!(json["confidence"].is_number());
    }

    #[test]
    fn test_all_nan_falls_back_to_low() {
        let assessment = RiskAssessment::from_probabilities([f32::NAN; NUM_CLASSES]);
        assert_eq!(assessment.risk, RiskLevel::Low);
        assert_eq!(assessment.confidence, 0.0);
    }

    #[test]
    fn test_guidance_is_stable_and_distinct() {
        for level in RiskLevel::ALL {
            let first = level.guidance();
            let second = level.guidance();
            assert_eq!(first, second);
            assert!(!first.likely_cause.is_empty());
            assert!(!first.suggested_action.is_empty());
        }

        assert_ne!(RiskLevel::Low.guidance(), RiskLevel::High.guidance());
        assert_ne!(RiskLevel::Medium.guidance(), RiskLevel::High.guidance());
    }

    #[test]
    fn test_assessment_uses_level_guidance() {
        let assessment = RiskAssessment::from_probabilities([0.05, 0.9, 0.05]);
        let guidance = RiskLevel::Medium.guidance();
        assert_eq!(assessment.likely_cause, guidance.likely_cause);
        assert_eq!(assessment.suggested_action, guidance.suggested_action);
    }

    #[test]
    fn test_unknown_label_falls_back_to_low() {
        assert_eq!(guidance_for_label("CRITICAL"), RiskLevel::Low.guidance());
        assert_eq!(guidance_for_label("HIGH"), RiskLevel::High.guidance());
    }

    #[test]
    fn test_index_round_trip() {
        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::from_index(level.index()), Some(level));
        }
        assert_eq!(RiskLevel::from_index(3), None);
    }

    #[test]
    fn test_serialized_shape() {
        let assessment = RiskAssessment::from_probabilities([0.5, 0.25, 0.25]);
        let json = serde_json::to_value(&assessment).unwrap();

        assert_eq!(json["risk"], "LOW");
        for key in ["LOW", "MEDIUM", "HIGH"] {
            assert!(json["probabilities"][key].is_number());
        }
        assert!(json["likely_cause"].is_string());
        assert!(json["suggested_action"].is_string());
        assert_eq!(json["confidence"], 50.0);
    }
}
