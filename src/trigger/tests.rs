use super::*;
use crate::context::BuildContext;
use crate::release::{ReleaseSpec, Risk, parse_releases};
use std::collections::BTreeMap;

fn context() -> BuildContext {
    BuildContext {
        source: "canonical/mock-rock".to_string(),
        commit: "0123456789abcdef0123456789abcdef01234567".to_string(),
        directory: "./mock-rock/1.0/".to_string(),
        ignored_vulnerabilities: vec![],
    }
}

fn spec(track: &str, risks: &[Risk], eol: &str) -> ReleaseSpec {
    ReleaseSpec {
        track: track.to_string(),
        risks: risks.to_vec(),
        end_of_life: eol.to_string(),
    }
}

#[test]
fn build_from_context_and_specs() {
    let specs = parse_releases(&[
        "track=1.0-22.04,risks=stable,edge,eol=2099-01-01",
        "track=latest,risks=beta,eol=2099-06-30",
    ])
    .unwrap();

    let doc = TriggerDocument::build(&context(), &specs, "mock-rock");

    assert_eq!(doc.version, SCHEMA_VERSION);
    assert_eq!(doc.upload.len(), 1);

    let entry = &doc.upload[0];
    assert_eq!(entry.source, "canonical/mock-rock");
    assert_eq!(entry.commit, "0123456789abcdef0123456789abcdef01234567");
    assert_eq!(entry.directory, "./mock-rock/1.0/");

    let expected: BTreeMap<String, TrackRelease> = [
        (
            "1.0-22.04".to_string(),
            TrackRelease {
                end_of_life: "2099-01-01T00:00:00Z".to_string(),
                risks: vec![Risk::Stable, Risk::Edge],
            },
        ),
        (
            "latest".to_string(),
            TrackRelease {
                end_of_life: "2099-06-30T00:00:00Z".to_string(),
                risks: vec![Risk::Beta],
            },
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(entry.release, expected);
}

#[test]
fn later_spec_for_same_track_wins() {
    let specs = vec![
        spec("1.0", &[Risk::Edge], "2099-01-01T00:00:00Z"),
        spec("1.0", &[Risk::Stable], "2100-01-01T00:00:00Z"),
    ];

    let doc = TriggerDocument::build(&context(), &specs, "mock-rock");
    let release = &doc.upload[0].release;

    assert_eq!(release.len(), 1);
    assert_eq!(
        release["1.0"],
        TrackRelease {
            end_of_life: "2100-01-01T00:00:00Z".to_string(),
            risks: vec![Risk::Stable],
        }
    );
}

#[test]
fn empty_optional_sections_are_omitted() {
    let doc = TriggerDocument::build(&context(), &[], "mock-rock");
    let yaml = doc.to_yaml().unwrap();

    assert!(!yaml.contains("ignored-vulnerabilities"));
    assert!(!yaml.contains("release"));
    assert!(yaml.contains("source: canonical/mock-rock"));
}

#[test]
fn ignored_vulnerabilities_are_rendered() {
    let ctx = context().with_ignored_vulnerabilities(vec![
        "CVE-2024-0001".to_string(),
        "GHSA-xxxx".to_string(),
    ]);
    let doc = TriggerDocument::build(&ctx, &[], "mock-rock");
    let yaml = doc.to_yaml().unwrap();

    assert!(yaml.contains("ignored-vulnerabilities:"));
    assert!(yaml.contains("CVE-2024-0001"));
    assert!(yaml.contains("GHSA-xxxx"));
}

#[test]
fn yaml_keys_follow_field_order() {
    let ctx = context().with_ignored_vulnerabilities(vec!["CVE-2024-0001".to_string()]);
    let specs = vec![spec("1.0", &[Risk::Candidate], "2099-01-01T00:00:00Z")];
    let yaml = TriggerDocument::build(&ctx, &specs, "mock-rock")
        .to_yaml()
        .unwrap();

    let position = |key: &str| {
        yaml.find(key)
            .unwrap_or_else(|| panic!("{} missing from:\n{}", key, yaml))
    };
    assert!(position("version:") < position("upload:"));
    assert!(position("source:") < position("commit:"));
    assert!(position("commit:") < position("directory:"));
    assert!(position("directory:") < position("ignored-vulnerabilities:"));
    assert!(position("ignored-vulnerabilities:") < position("release:"));
    assert!(position("end-of-life:") < position("risks:"));
}

#[test]
fn yaml_reads_back_as_same_document() {
    let ctx = context().with_ignored_vulnerabilities(vec!["CVE-2024-0001".to_string()]);
    let specs = vec![
        spec("1.0", &[Risk::Stable, Risk::Beta], "2099-01-01T00:00:00Z"),
        spec("2.0", &[Risk::Edge], "2099-02-01T00:00:00Z"),
    ];
    let doc = TriggerDocument::build(&ctx, &specs, "mock-rock");

    let yaml = doc.to_yaml().unwrap();
    let parsed: TriggerDocument = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, doc);

    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["version"].as_u64(), Some(1));
    assert_eq!(
        value["upload"][0]["release"]["1.0"]["risks"][1].as_str(),
        Some("beta")
    );
}

#[test]
fn yaml_does_not_depend_on_track_order() {
    let stable = spec("1.0-22.04", &[Risk::Stable], "2099-01-01T00:00:00Z");
    let latest = spec("latest", &[Risk::Edge, Risk::Beta], "2099-06-30T00:00:00Z");
    let ctx = context().with_ignored_vulnerabilities(vec!["CVE-2024-0001".to_string()]);

    let forward = TriggerDocument::build(&ctx, &[stable.clone(), latest.clone()], "mock-rock")
        .to_yaml()
        .unwrap();
    let reversed = TriggerDocument::build(&ctx, &[latest, stable], "mock-rock")
        .to_yaml()
        .unwrap();

    assert_eq!(forward, reversed);
    assert!(forward.find("1.0-22.04:").unwrap() < forward.find("latest:").unwrap());
}
