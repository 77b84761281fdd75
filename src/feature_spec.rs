use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Feature specification produced by the upstream cleaning step.
///
/// Declares the target column and the numeric/categorical feature columns
/// expected downstream.  Any extra keys in the document are preserved
/// verbatim so the metadata snapshot matches the input file exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub target: String,
    pub numeric_features: Vec<String>,
    pub categorical_features: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl FeatureSpec {
    /// All column names the dataset is contractually required to contain:
    /// numeric features, categorical features, and the target.
    pub fn expected_columns(&self) -> BTreeSet<String> {
        self.numeric_features
            .iter()
            .chain(self.categorical_features.iter())
            .chain(std::iter::once(&self.target))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_columns_union_includes_target() {
        let spec = FeatureSpec {
            target: "Outcome".into(),
            numeric_features: vec!["Age".into(), "BMI".into()],
            categorical_features: vec!["AgeGroup".into()],
            extra: BTreeMap::new(),
        };
        let cols: Vec<String> = spec.expected_columns().into_iter().collect();
        assert_eq!(cols, vec!["Age", "AgeGroup", "BMI", "Outcome"]);
    }

    #[test]
    fn extra_keys_survive_a_round_trip() {
        let raw = r#"{
            "target": "Outcome",
            "numeric_features": ["Age"],
            "categorical_features": [],
            "notes": "v2 of the cleaning run"
        }"#;
        let spec: FeatureSpec = serde_json::from_str(raw).unwrap();
        assert_eq!(spec.extra["notes"], "v2 of the cleaning run");
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["notes"], "v2 of the cleaning run");
    }
}
