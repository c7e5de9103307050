//! Existing-pipeline candidate store
//!
//! A read-only JSON file holding a list of candidate records. It is read
//! wholesale on every request and the records are handed back exactly as
//! stored: no filtering, no reshaping, no defaults filled in.

use crate::error::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// JSON file of pipeline candidates
#[derive(Debug, Clone)]
pub struct CandidateStore {
    path: PathBuf,
}

impl CandidateStore {
    /// Create a store backed by the file at `path`. The file is not touched
    /// until [`CandidateStore::load`] is called.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record, in file order. Only the top level has to be a
    /// JSON array; the records themselves are passed through untouched.
    pub async fn load(&self) -> Result<Vec<Value>> {
        tracing::debug!("Loading pipeline candidates from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<Value> = serde_json::from_str(&raw)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_preserves_order_and_stage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        let data = json!([
            {
                "id": "c-2", "name": "Zed", "title": "CTO", "email": "zed@example.com",
                "phone": "", "location": "Remote", "yearsOfExperience": 20,
                "skills": ["Leadership"], "stage": "Offer"
            },
            {
                "id": "c-1", "name": "Amy", "title": "Engineer", "email": "amy@example.com",
                "phone": "555-0101", "location": "Austin, TX", "yearsOfExperience": 4,
                "skills": [], "stage": "Interview"
            }
        ]);
        std::fs::write(&path, data.to_string()).unwrap();

        let candidates = CandidateStore::new(&path).load().await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0]["id"], "c-2");
        assert_eq!(candidates[0]["stage"], "Offer");
        assert_eq!(candidates[1]["id"], "c-1");
        assert_eq!(candidates[1]["yearsOfExperience"], 4);
    }

    #[tokio::test]
    async fn test_records_are_returned_as_stored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        // No phone, an extra key, and a fractional experience value
        let data = json!([
            {
                "id": "c-1", "name": "Ann", "email": "ann@example.com",
                "location": "Oslo", "yearsOfExperience": 4.5,
                "skills": ["SQL"], "stage": "Offer", "company": "Acme"
            },
            {"id": "c-2", "name": "Bo", "stage": "Applied"}
        ]);
        std::fs::write(&path, data.to_string()).unwrap();

        let candidates = CandidateStore::new(&path).load().await.unwrap();
        assert_eq!(Value::Array(candidates.clone()), data);
        assert!(candidates[0].get("phone").is_none());
        assert_eq!(candidates[0]["company"], "Acme");
        assert!(candidates[1].get("title").is_none());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let store = CandidateStore::new(dir.path().join("nope.json"));
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        std::fs::write(&path, "{\"not\": \"a list\"}").unwrap();

        let err = CandidateStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
