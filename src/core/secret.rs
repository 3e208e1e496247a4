//! # Enrollment secret resolution.
//!
//! Produces the enrollment credential from either an inline value or a file
//! path, with the inline value taking precedence.
//!
//! ## Rules
//! - Inline secret: returned verbatim, no trimming.
//! - Secret path: full file contents, leading/trailing whitespace trimmed,
//!   decoded as UTF-8.
//! - Neither: empty secret; enrollment later fails or is treated as
//!   anonymous, per session policy.
//!
//! An unreadable (or non-UTF-8) path is fatal to construction: the supervisor
//! cannot proceed without a resolvable secret policy.

use std::fs;
use std::io;

use crate::config::Options;
use crate::error::SetupError;

/// Resolves the enrollment secret from `opts`.
pub fn resolve_enroll_secret(opts: &Options) -> Result<String, SetupError> {
    if !opts.enroll_secret.is_empty() {
        return Ok(opts.enroll_secret.clone());
    }

    if let Some(path) = &opts.enroll_secret_path {
        let raw = fs::read(path).map_err(|source| SetupError::SecretRead {
            path: path.clone(),
            source,
        })?;
        let text = String::from_utf8(raw).map_err(|err| SetupError::SecretRead {
            path: path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, err),
        })?;
        return Ok(text.trim().to_string());
    }

    Ok(String::new())
}
