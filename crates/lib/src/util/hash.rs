//! Fingerprints for manifests, graphs and graph files.
//!
//! - `ObjectHash`: a truncated 20-character hash of a serialized value
//! - `ContentHash`: a full 64-character hash of raw bytes
//! - `hash_file()` / `hash_bytes()`: content hashing helpers

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::consts::OBJ_HASH_PREFIX_LEN;

pub type HashError = serde_json::Error;

/// A truncated SHA-256 of the JSON serialization of a value.
///
/// Two compilation runs over the same manifest yield the same fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObjectHash(pub String);

impl std::fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<ObjectHash, HashError> {
    let serialized = serde_json::to_string(self)?;
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let full = format!("{:x}", hasher.finalize());
    Ok(ObjectHash(full[..OBJ_HASH_PREFIX_LEN].to_string()))
  }
}

/// A full 64-character SHA-256 of raw content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContentHash(pub String);

impl std::fmt::Display for ContentHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Hash a file's contents.
pub fn hash_file(path: &Path) -> std::io::Result<ContentHash> {
  let mut file = fs::File::open(path)?;

  let mut hasher = Sha256::new();
  let mut buffer = [0u8; 8192];

  loop {
    let bytes_read = file.read(&mut buffer)?;
    if bytes_read == 0 {
      break;
    }
    hasher.update(&buffer[..bytes_read]);
  }

  Ok(ContentHash(format!("{:x}", hasher.finalize())))
}

/// Hash arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
  let mut hasher = Sha256::new();
  hasher.update(data);
  ContentHash(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[derive(Serialize)]
  struct Sample {
    name: &'static str,
    members: Vec<&'static str>,
  }

  impl Hashable for Sample {}

  #[test]
  fn object_hash_is_truncated_and_deterministic() {
    let a = Sample {
      name: "RaceSP.szs",
      members: vec!["game_image/timg/basic_accel_on.tpl"],
    };
    let first = a.compute_hash().unwrap();
    let second = a.compute_hash().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.0.len(), OBJ_HASH_PREFIX_LEN);
  }

  #[test]
  fn object_hash_depends_on_member_order() {
    let a = Sample {
      name: "TitleSP.szs",
      members: vec!["a.tpl", "b.tpl"],
    };
    let b = Sample {
      name: "TitleSP.szs",
      members: vec!["b.tpl", "a.tpl"],
    };
    assert_ne!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
  }

  #[test]
  fn hash_file_matches_hash_bytes() {
    let temp = tempdir().unwrap();
    let file_path = temp.path().join("build.ninja");
    fs::write(&file_path, "ninja_required_version = 1.3\n").unwrap();

    let from_file = hash_file(&file_path).unwrap();
    assert_eq!(from_file, hash_bytes(b"ninja_required_version = 1.3\n"));
    assert_eq!(from_file.0.len(), 64);
  }

  #[test]
  fn hash_file_reports_missing_files() {
    let temp = tempdir().unwrap();
    assert!(hash_file(&temp.path().join("missing")).is_err());
  }
}
