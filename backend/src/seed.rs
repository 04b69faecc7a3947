//! Loading the session's initial user collection.

use std::fs;
use std::path::{Path, PathBuf};

use user_admin_common::{seed, DirectoryError, User, UserDirectory};

use crate::config::DirectoryConfig;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid seed data: {0}")]
    Directory(#[from] DirectoryError),
}

/// The configured seed file, or the built-in snapshot when none is set.
pub fn load_directory(config: &DirectoryConfig) -> Result<UserDirectory, SeedError> {
    match config.seed_path.as_deref() {
        Some(path) => load_seed_file(Path::new(path)),
        None => {
            tracing::debug!("No seed file configured, using built-in snapshot");
            Ok(seed::snapshot_directory())
        }
    }
}

/// Read a JSON array of user records.
pub fn load_seed_file(path: &Path) -> Result<UserDirectory, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let users: Vec<User> = serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let directory = UserDirectory::new(users)?;
    tracing::info!("Loaded {} users from {}", directory.len(), path.display());
    Ok(directory)
}
