use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::StoreError;

/// Locations of the per-entity JSON files inside the data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub site: PathBuf,
    pub stories: PathBuf,
    pub diy: PathBuf,
    pub chat: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            site: data_dir.join("site.json"),
            stories: data_dir.join("stories.json"),
            diy: data_dir.join("diy.json"),
            chat: data_dir.join("chat.json"),
        }
    }
}

/// Read a JSON file if it exists. `Ok(None)` means the tier declines (no
/// file yet); IO and parse failures are errors for the caller's tier policy.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Whole-file overwrite, creating the parent directory on first write.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_declines() {
        let tmp = tempfile::tempdir().unwrap();
        let read: Option<Vec<String>> = read_json(&tmp.path().join("nothing.json")).unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/list.json");
        write_json(&path, &vec!["a".to_string(), "b".to_string()]).unwrap();

        let read: Option<Vec<String>> = read_json(&path).unwrap();
        assert_eq!(read, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_panic() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();

        let read: Result<Option<Vec<String>>, _> = read_json(&path);
        assert!(read.is_err());
    }
}
