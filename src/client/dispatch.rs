//! Workflow dispatch payload.

use crate::error::{FactoryError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Branch of the factory repository the workflow runs from.
pub const DISPATCH_REF: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchInputs {
    #[serde(rename = "oci-image-name")]
    pub oci_image_name: String,
    /// Base64 of the trigger YAML.
    #[serde(rename = "b64-image-trigger")]
    pub b64_image_trigger: String,
    pub upload: bool,
    pub external_ref_id: String,
}

/// Body of `POST .../workflows/{workflow}/dispatches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub inputs: DispatchInputs,
}

impl DispatchPayload {
    pub fn new(image_name: &str, trigger_yaml: &str) -> Self {
        Self::at(image_name, trigger_yaml, Utc::now())
    }

    /// Build the payload as if submitted at `now`, which fixes the external ref id.
    pub fn at(image_name: &str, trigger_yaml: &str, now: DateTime<Utc>) -> Self {
        Self {
            git_ref: DISPATCH_REF.to_string(),
            inputs: DispatchInputs {
                oci_image_name: image_name.to_string(),
                b64_image_trigger: STANDARD.encode(trigger_yaml),
                upload: true,
                external_ref_id: external_ref_id(image_name, now),
            },
        }
    }

    pub fn external_ref_id(&self) -> &str {
        &self.inputs.external_ref_id
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| FactoryError::Encoding(format!("dispatch payload: {}", e)))
    }
}

/// Correlation token the workflow echoes back as a step name.
pub fn external_ref_id(image_name: &str, now: DateTime<Utc>) -> String {
    format!("workflow-engine-{}-{}", image_name, now.timestamp())
}

/// A dispatched, not yet located, workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub external_ref_id: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn payload_json_shape() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let payload = DispatchPayload::at("mock-rock", "version: 1\n", now);
        let json: serde_json::Value = serde_json::from_slice(&payload.to_json().unwrap()).unwrap();

        assert_eq!(json["ref"], "main");
        assert_eq!(json["inputs"]["oci-image-name"], "mock-rock");
        assert_eq!(json["inputs"]["upload"], true);
        assert_eq!(
            json["inputs"]["external_ref_id"],
            format!("workflow-engine-mock-rock-{}", now.timestamp())
        );
    }

    #[test]
    fn trigger_is_standard_base64() {
        let yaml = "version: 1\nupload:\n- source: canonical/mock-rock\n";
        let payload = DispatchPayload::new("mock-rock", yaml);

        let decoded = STANDARD.decode(&payload.inputs.b64_image_trigger).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), yaml);
    }

    #[test]
    fn external_ref_id_uses_unix_seconds() {
        let now = Utc.with_ymd_and_hms(1970, 1, 1, 0, 1, 40).unwrap();
        assert_eq!(external_ref_id("img", now), "workflow-engine-img-100");
        assert_eq!(
            DispatchPayload::at("img", "", now).external_ref_id(),
            "workflow-engine-img-100"
        );
    }
}
