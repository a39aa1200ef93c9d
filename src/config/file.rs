//! Key-value file reading.

use std::path::Path;

use super::ConfigError;

/// Reads a line-oriented `KEY=value` file.
///
/// Entries are returned in file order, duplicates included; callers that
/// insert them into a map get "last occurrence wins". A file that does not
/// exist yields no entries rather than an error.
pub trait KeyValueReader: Send + Sync + std::fmt::Debug {
    fn read(&self, path: &Path) -> Result<Vec<(String, String)>, ConfigError>;
}

/// Reads `.env` files with `dotenvy`.
///
/// Quoting, comments, `export` prefixes and `${VAR}` expansion follow dotenvy.
/// Nothing is written to the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvReader;

impl KeyValueReader for DotenvReader {
    fn read(&self, path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(map_dotenv_error(path, e)),
        };

        iter.map(|item| item.map_err(|e| map_dotenv_error(path, e)))
            .collect()
    }
}

fn map_dotenv_error(path: &Path, error: dotenvy::Error) -> ConfigError {
    match error {
        dotenvy::Error::LineParse(_, index) => ConfigError::ParseError {
            path: path.to_path_buf(),
            index,
        },
        dotenvy::Error::Io(source) => ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        },
        other => ConfigError::ReadError {
            path: path.to_path_buf(),
            source: std::io::Error::other(other.to_string()),
        },
    }
}
