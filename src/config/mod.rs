//! Configuration model for oci-factory.
//!
//! Every setting has a default matching the public OCI Factory on GitHub, so
//! a config file is only needed to point the client elsewhere or to tune its
//! timing. Unknown fields are ignored.

mod model;
mod operations;
pub mod types;


pub use model::Config;
pub use operations::CONFIG_ENV_VAR;
