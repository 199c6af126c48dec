use serde::{Serialize, Deserialize};

use scdcore::algorithm::combine::validate_tolerance;
use scdcore::error::ParameterError;

/// Parameters for one combine run, validated as they are assigned.
///
/// The serialized form carries the externally recognized option names.
/// Decoding goes through the same tolerance check as the constructor, so a
/// parameter set holding an unusable tolerance never exists.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawCombineParams")]
pub struct CombineParams {
    #[serde(rename = "LHSWorkspace")]
    pub lhs_workspace: String,
    #[serde(rename = "RHSWorkspace")]
    pub rhs_workspace: String,
    #[serde(rename = "OutputWorkspace")]
    pub output_workspace: String,
    #[serde(rename = "CombineMatchingPeaks")]
    pub combine_matching: bool,
    #[serde(rename = "Tolerance")]
    tolerance: f64,
}

/// Wire form of [`CombineParams`], before the tolerance has been checked.
#[derive(Deserialize)]
struct RawCombineParams {
    #[serde(rename = "LHSWorkspace")]
    lhs_workspace: String,
    #[serde(rename = "RHSWorkspace")]
    rhs_workspace: String,
    #[serde(rename = "OutputWorkspace")]
    output_workspace: String,
    #[serde(rename = "CombineMatchingPeaks", default)]
    combine_matching: bool,
    #[serde(rename = "Tolerance")]
    tolerance: f64,
}

impl TryFrom<RawCombineParams> for CombineParams {
    type Error = ParameterError;

    fn try_from(raw: RawCombineParams) -> Result<Self, Self::Error> {
        validate_tolerance(raw.tolerance)?;
        Ok(CombineParams {
            lhs_workspace: raw.lhs_workspace,
            rhs_workspace: raw.rhs_workspace,
            output_workspace: raw.output_workspace,
            combine_matching: raw.combine_matching,
            tolerance: raw.tolerance,
        })
    }
}

impl CombineParams {
    /// Builds a parameter set with matching switched off.
    ///
    /// # Arguments
    ///
    /// * `lhs_workspace` - Name of the collection whose peaks lead the output.
    /// * `rhs_workspace` - Name of the collection merged into it.
    /// * `output_workspace` - Name the result is registered under.
    /// * `tolerance` - Per-axis agreement window on Q, rejected here unless
    ///   strictly positive.
    pub fn new(
        lhs_workspace: impl Into<String>,
        rhs_workspace: impl Into<String>,
        output_workspace: impl Into<String>,
        tolerance: f64,
    ) -> Result<Self, ParameterError> {
        validate_tolerance(tolerance)?;
        Ok(CombineParams {
            lhs_workspace: lhs_workspace.into(),
            rhs_workspace: rhs_workspace.into(),
            output_workspace: output_workspace.into(),
            combine_matching: false,
            tolerance,
        })
    }

    /// Switches matching on or off, consuming and returning the parameters.
    pub fn with_combine_matching(mut self, combine_matching: bool) -> Self {
        self.combine_matching = combine_matching;
        self
    }

    /// Replaces the tolerance, rejecting values that are not strictly positive.
    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<(), ParameterError> {
        validate_tolerance(tolerance)?;
        self.tolerance = tolerance;
        Ok(())
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn from_json(text: &str) -> Result<CombineParams, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_positive_tolerance() {
        for bad in [0.0, -1.0, f64::NAN] {
            let result = CombineParams::new("lhs", "rhs", "out", bad);
            assert_eq!(result.unwrap_err().parameter, "Tolerance");
        }
    }

    #[test]
    fn test_set_tolerance_rejects_and_keeps_old_value() {
        let mut params = CombineParams::new("lhs", "rhs", "out", 0.1).unwrap();

        assert!(params.set_tolerance(-2.0).is_err());
        assert_eq!(params.tolerance(), 0.1);

        params.set_tolerance(0.25).unwrap();
        assert_eq!(params.tolerance(), 0.25);
    }

    #[test]
    fn test_matching_defaults_to_off() {
        let params = CombineParams::new("lhs", "rhs", "out", 0.1).unwrap();
        assert!(!params.combine_matching);
        assert!(params.with_combine_matching(true).combine_matching);
    }

    #[test]
    fn test_json_uses_recognized_option_names() {
        let params = CombineParams::new("run_a", "run_b", "merged", 0.08145)
            .unwrap()
            .with_combine_matching(true);

        let text = params.to_json().unwrap();
        assert!(text.contains("\"LHSWorkspace\":\"run_a\""));
        assert!(text.contains("\"CombineMatchingPeaks\":true"));
        assert!(text.contains("\"Tolerance\":0.08145"));

        let round_trip = CombineParams::from_json(&text).unwrap();
        assert_eq!(round_trip, params);
    }

    #[test]
    fn test_json_omitted_matching_flag_defaults_to_off() {
        let text = r#"{
            "LHSWorkspace": "run_a",
            "RHSWorkspace": "run_b",
            "OutputWorkspace": "merged",
            "Tolerance": 0.02
        }"#;

        let params = CombineParams::from_json(text).unwrap();
        assert!(!params.combine_matching);
        assert_eq!(params.tolerance(), 0.02);
    }

    #[test]
    fn test_json_rejects_non_positive_tolerance() {
        for bad in ["-5.0", "0.0"] {
            let text = format!(
                r#"{{"LHSWorkspace": "run_a", "RHSWorkspace": "run_b", "OutputWorkspace": "merged", "Tolerance": {}}}"#,
                bad
            );
            let err = CombineParams::from_json(&text).unwrap_err();
            assert!(err.to_string().contains("Tolerance"));
        }
    }

    #[test]
    fn test_direct_deserialization_also_checks_the_tolerance() {
        let text = r#"{
            "LHSWorkspace": "run_a",
            "RHSWorkspace": "run_b",
            "OutputWorkspace": "merged",
            "Tolerance": -0.01
        }"#;

        let result: Result<CombineParams, _> = serde_json::from_str(text);
        assert!(result.is_err());
    }
}
