//! Program text persistence. Text is written and read back verbatim; files
//! that are not UTF-8 fail to load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

pub fn save(path: impl AsRef<Path>, text: &str) -> Result<(), StoreError> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|source| StoreError::Write {
        path: path.to_owned(),
        source,
    })
}

pub fn load(path: impl AsRef<Path>) -> Result<String, StoreError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_owned(),
        source,
    })
}
