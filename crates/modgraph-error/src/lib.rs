//! # modgraph-error
//!
//! Unified error handling for modgraph.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what went wrong (e.g., ArchiveInvalid, MetadataMissing)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary, Persistent)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use modgraph_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::MetadataInvalid, "descriptor has no mod id")
//!         .with_operation("manifest::parse_fabric")
//!         .with_context("archive", "mods/broken.jar"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, modgraph_error::Error>`
//! - External errors (io, zip, serde) are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using the modgraph Error
pub type Result<T> = std::result::Result<T, Error>;
