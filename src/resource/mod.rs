//! Filesystem resources served by the connection handler.
//!
//! A request target resolves to one of three outcomes: a directory
//! listing, the full contents of a regular file, or nothing.

pub mod resolver;

pub use resolver::{ResolveError, Resolver};

use std::path::Path;

/// Content type of every directory listing.
pub const LISTING_CONTENT_TYPE: &str = "text/plain";

/// Separator placed between directory entry names in a listing body.
pub const LISTING_SEPARATOR: &str = "\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Names of the directory's immediate children, sorted
    Directory(Vec<String>),
    /// Full file contents and the content type derived from its extension
    File { bytes: Vec<u8>, content_type: String },
    /// Nothing servable at this target
    Missing,
}

impl Resource {
    pub fn is_missing(&self) -> bool {
        matches!(self, Resource::Missing)
    }

    pub fn content_type(&self) -> Option<&str> {
        match self {
            Resource::Directory(_) => Some(LISTING_CONTENT_TYPE),
            Resource::File { content_type, .. } => Some(content_type),
            Resource::Missing => None,
        }
    }

    /// Consumes the resource, yielding the bytes sent as a response body.
    pub fn into_body(self) -> Option<Vec<u8>> {
        match self {
            Resource::Directory(entries) => Some(entries.join(LISTING_SEPARATOR).into_bytes()),
            Resource::File { bytes, .. } => Some(bytes),
            Resource::Missing => None,
        }
    }
}

/// MIME type for `path` based on its extension, `application/octet-stream`
/// when the extension is unknown or absent.
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
