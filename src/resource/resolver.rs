//! Maps request targets onto the filesystem beneath a fixed root.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::resource::{Resource, content_type_for};

// Longest file name and longest path the filesystem will look up.
const NAME_MAX: usize = 255;
const PATH_MAX: usize = 4096;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("root directory {} is unusable", .path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("root {} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves request targets against a canonical root directory.
///
/// Every lookup is confined to the root: a target whose canonical form lands
/// outside it (through `..` segments or symlinks) resolves to
/// [`Resource::Missing`].
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    /// Canonicalizes `root` and checks that it is a directory.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, ResolveError> {
        let root = root.as_ref();

        let canonical = tokio::fs::canonicalize(root)
            .await
            .map_err(|source| ResolveError::Root {
                path: root.to_path_buf(),
                source,
            })?;

        let metadata = tokio::fs::metadata(&canonical)
            .await
            .map_err(|source| ResolveError::Root {
                path: root.to_path_buf(),
                source,
            })?;

        if !metadata.is_dir() {
            return Err(ResolveError::RootNotDirectory(root.to_path_buf()));
        }

        Ok(Self { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn resolve(&self, target: &str) -> Result<Resource, ResolveError> {
        let key = lookup_key(target);
        let path = self.root.join(key);

        if !is_nameable(key, &path) {
            tracing::debug!(target = %target, "Target cannot name a file");
            return Ok(Resource::Missing);
        }

        let canonical = match tokio::fs::canonicalize(&path).await {
            Ok(p) => p,
            Err(e) if is_absent(&e) => return Ok(Resource::Missing),
            Err(source) => return Err(ResolveError::Io { path, source }),
        };

        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                target = %target,
                resolved = %canonical.display(),
                "Request target escapes root"
            );
            return Ok(Resource::Missing);
        }

        let metadata = tokio::fs::metadata(&canonical)
            .await
            .map_err(|source| ResolveError::Io {
                path: canonical.clone(),
                source,
            })?;

        if metadata.is_dir() {
            let entries = list_directory(&canonical).await?;
            tracing::debug!(target = %target, entries = entries.len(), "Resolved directory");
            Ok(Resource::Directory(entries))
        } else if metadata.is_file() {
            let bytes = tokio::fs::read(&canonical)
                .await
                .map_err(|source| ResolveError::Io {
                    path: canonical.clone(),
                    source,
                })?;
            // The extension of the requested name decides the type, not
            // whatever a symlink points at.
            let content_type = content_type_for(&path);
            tracing::debug!(target = %target, bytes = bytes.len(), content_type = %content_type, "Resolved file");
            Ok(Resource::File {
                bytes,
                content_type,
            })
        } else {
            Ok(Resource::Missing)
        }
    }
}

/// The part of a target used for the filesystem lookup: the query string
/// and fragment are dropped, and the leading slashes removed so the result
/// joins beneath the root.
pub fn lookup_key(target: &str) -> &str {
    let path = target.split(['?', '#']).next().unwrap_or_default();
    path.trim_start_matches('/')
}

/// Rejects keys no filesystem entry can have: embedded NULs, a component
/// longer than `NAME_MAX`, or a joined path of `PATH_MAX` bytes or more.
fn is_nameable(key: &str, path: &Path) -> bool {
    !key.contains('\0')
        && key.split('/').all(|component| component.len() <= NAME_MAX)
        && path.as_os_str().len() < PATH_MAX
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::InvalidInput
    )
}

async fn list_directory(dir: &Path) -> Result<Vec<String>, ResolveError> {
    let io_err = |source: io::Error| ResolveError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await.map_err(io_err)? {
        entries.push(entry.file_name().to_string_lossy().into_owned());
    }

    entries.sort();
    Ok(entries)
}
