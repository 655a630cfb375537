//! Core `--release` argument parsing logic.

use super::date::validate_and_format_date;
use super::types::{ReleaseError, ReleaseSpec, Risk};

const TRACK: &str = "track";
const RISKS: &str = "risks";
const EOL: &str = "eol";

/// A `key=value[,value...]` group as it appeared in one argument.
#[derive(Debug)]
struct Group<'a> {
    key: &'a str,
    values: Vec<&'a str>,
}

impl Group<'_> {
    /// The value text as typed, without trailing commas.
    fn raw(&self) -> String {
        self.values.join(",")
    }

    /// The single non-empty value of a scalar key, if there is exactly one.
    fn scalar(&self) -> Option<&str> {
        match self.values.as_slice() {
            [value] if !value.is_empty() && !value.contains('=') => Some(*value),
            _ => None,
        }
    }
}

/// Parse every `--release` argument into a [`ReleaseSpec`], in input order.
///
/// # Returns
///
/// * `Ok(Vec<ReleaseSpec>)` - One spec per argument
/// * `Err(ReleaseError::NoReleaseTrack)` - No argument was given; callers treat
///   this as "nothing to do" rather than a failure
/// * `Err(ReleaseError)` - The first invalid argument, naming the offending part
pub fn parse_releases<S: AsRef<str>>(args: &[S]) -> Result<Vec<ReleaseSpec>, ReleaseError> {
    if args.is_empty() {
        return Err(ReleaseError::NoReleaseTrack);
    }

    args.iter().map(|arg| parse_release(arg.as_ref())).collect()
}

/// Split a comma-separated list of vulnerability IDs, dropping empty fields.
pub fn parse_ignored_vulnerabilities(arg: &str) -> Vec<String> {
    arg.split(',')
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_release(arg: &str) -> Result<ReleaseSpec, ReleaseError> {
    let mut track: Option<String> = None;
    let mut risks: Option<Vec<Risk>> = None;
    let mut end_of_life: Option<String> = None;

    for group in split_groups(arg)? {
        match group.key {
            TRACK => {
                if track.is_some() {
                    return Err(ReleaseError::DuplicatedValue(TRACK));
                }
                let value = group
                    .scalar()
                    .ok_or_else(|| ReleaseError::InvalidTrack(group.raw()))?;
                track = Some(value.to_string());
            }
            RISKS => {
                if risks.is_some() {
                    return Err(ReleaseError::DuplicatedValue(RISKS));
                }
                risks = Some(parse_risks(&group)?);
            }
            EOL => {
                if end_of_life.is_some() {
                    return Err(ReleaseError::DuplicatedValue(EOL));
                }
                let value = group
                    .scalar()
                    .ok_or_else(|| ReleaseError::InvalidEol(group.raw()))?;
                end_of_life = Some(validate_and_format_date(value)?);
            }
            key => {
                return Err(ReleaseError::InvalidKeyValue {
                    key: key.to_string(),
                    value: group.raw(),
                });
            }
        }
    }

    match (track, risks, end_of_life) {
        (Some(track), Some(risks), Some(end_of_life)) => Ok(ReleaseSpec {
            track,
            risks,
            end_of_life,
        }),
        (track, risks, end_of_life) => {
            let mut missing = Vec::new();
            if track.is_none() {
                missing.push(TRACK);
            }
            if risks.is_none() {
                missing.push(RISKS);
            }
            if end_of_life.is_none() {
                missing.push(EOL);
            }
            Err(ReleaseError::MissingFields(missing))
        }
    }
}

/// Split an argument into `key=value` groups.
///
/// A fragment containing `=` opens a new group; a fragment without one
/// continues the current group's value list (`risks=stable,candidate`).
/// Empty fragments at the end of a group come from doubled or trailing
/// commas and are dropped.
fn split_groups(arg: &str) -> Result<Vec<Group<'_>>, ReleaseError> {
    let mut groups: Vec<Group<'_>> = Vec::new();

    for fragment in arg.split(',') {
        if let Some((key, value)) = fragment.split_once('=') {
            groups.push(Group {
                key,
                values: vec![value],
            });
        } else if let Some(current) = groups.last_mut() {
            current.values.push(fragment);
        } else if !fragment.is_empty() {
            return Err(ReleaseError::InvalidArgument(arg.to_string()));
        }
    }

    for group in &mut groups {
        while group.values.len() > 1 && group.values.last() == Some(&"") {
            group.values.pop();
        }
    }

    Ok(groups)
}

fn parse_risks(group: &Group<'_>) -> Result<Vec<Risk>, ReleaseError> {
    let mut risks = Vec::new();

    for value in group.values.iter().filter(|value| !value.is_empty()) {
        let risk =
            Risk::from_str(value).ok_or_else(|| ReleaseError::InvalidRisk(value.to_string()))?;
        if !risks.contains(&risk) {
            risks.push(risk);
        }
    }

    if risks.is_empty() {
        return Err(ReleaseError::InvalidRisk(group.raw()));
    }

    Ok(risks)
}
