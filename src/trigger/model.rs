//! Trigger document model, construction and YAML rendering.

use crate::context::BuildContext;
use crate::error::{FactoryError, Result};
use crate::release::{ReleaseSpec, Risk};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trigger schema version understood by the factory.
pub const SCHEMA_VERSION: u32 = 1;

/// Release instructions for a single track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRelease {
    /// RFC3339 end-of-life instant.
    #[serde(rename = "end-of-life")]
    pub end_of_life: String,
    pub risks: Vec<Risk>,
}

/// One image to build from a source checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEntry {
    pub source: String,
    pub commit: String,
    pub directory: String,

    #[serde(
        rename = "ignored-vulnerabilities",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ignored_vulnerabilities: Vec<String>,

    /// Track name to release. Ordered so the rendered YAML is stable.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub release: BTreeMap<String, TrackRelease>,
}

/// The complete trigger document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDocument {
    pub version: u32,
    pub upload: Vec<UploadEntry>,
}

impl TriggerDocument {
    /// Build the trigger for one image from the checkout context and the
    /// parsed release specs.
    ///
    /// Specs are applied in order; a later spec for an already seen track
    /// replaces the earlier one.
    pub fn build(context: &BuildContext, specs: &[ReleaseSpec], image_name: &str) -> Self {
        log::debug!("Building trigger for image {}", image_name);

        let mut release = BTreeMap::new();
        for spec in specs {
            let previous = release.insert(
                spec.track.clone(),
                TrackRelease {
                    end_of_life: spec.end_of_life.clone(),
                    risks: spec.risks.clone(),
                },
            );
            if previous.is_some() {
                log::warn!(
                    "track {} was given more than once; using the last --release for it",
                    spec.track
                );
            }
        }

        Self {
            version: SCHEMA_VERSION,
            upload: vec![UploadEntry {
                source: context.source.clone(),
                commit: context.commit.clone(),
                directory: context.directory.clone(),
                ignored_vulnerabilities: context.ignored_vulnerabilities.clone(),
                release,
            }],
        }
    }

    /// Render the document as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| FactoryError::Encoding(format!("trigger as YAML: {}", e)))
    }
}
