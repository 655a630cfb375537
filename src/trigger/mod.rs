//! Image trigger document sent to the OCI Factory build workflow.
//!
//! The document mirrors the `image.yaml` trigger format consumed by the
//! factory: a schema version and a list of uploads, each naming the source
//! checkout and the tracks the resulting image is released into.

mod model;

#[cfg(test)]
mod tests;

pub use model::{SCHEMA_VERSION, TrackRelease, TriggerDocument, UploadEntry};
