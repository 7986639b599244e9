use crate::{Error, Result};
use lotscan_types::{Label, SiteStatistics, TrainingStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Persisted, append-only label history with derived site summaries.
///
/// Single-writer by design: load/save is read-modify-write with no locking,
/// and the pipeline assumes one process owns a store at a time. Every
/// successful `record` persists immediately, so a crash mid-batch loses at
/// most the in-flight label.
#[derive(Debug)]
pub struct LabelStore {
    path: PathBuf,
    data: TrainingStore,
}

impl LabelStore {
    /// Open the store document at `path`. An absent file yields an empty
    /// store (first run); an unreadable one is fatal, since overwriting it
    /// would silently lose history.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                data: TrainingStore::default(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let data = serde_json::from_str(&content).map_err(|err| Error::Corrupt {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self { path, data })
    }

    /// Insert a label unless one already exists for its `image_path`.
    /// Persists on insert; returns whether an insertion occurred.
    ///
    /// This is the sole idempotence guard against re-labeling the same
    /// image across repeated runs.
    pub fn record(&mut self, label: Label) -> Result<bool> {
        if self.contains(&label.image_path) {
            return Ok(false);
        }
        self.data.images.push(label);
        self.save()?;
        Ok(true)
    }

    pub fn contains(&self, image_path: &str) -> bool {
        self.data.images.iter().any(|l| l.image_path == image_path)
    }

    /// Replace the derived `sites` mapping wholesale (no incremental merge).
    pub fn replace_sites(&mut self, sites: BTreeMap<String, SiteStatistics>) {
        self.data.sites = sites;
    }

    /// Persist the full document. Writes a sibling temp file and renames it
    /// over the target, so readers in this process never observe a partial
    /// document.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &TrainingStore {
        &self.data
    }

    pub fn images(&self) -> &[Label] {
        &self.data.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn label(image_path: &str) -> Label {
        Label {
            camera_id: "MN_C30038".to_string(),
            image_path: image_path.to_string(),
            truck_count: Some(4),
            car_count: None,
            occupancy_percent: None,
            weather: None,
            time_of_day: None,
            confidence: None,
            detailed_notes: None,
            labeled_at: Utc.with_ymd_and_hms(2026, 1, 31, 13, 32, 7).unwrap(),
            input_tokens: None,
            output_tokens: None,
            labeling_time_sec: None,
            raw_response: None,
            parse_error: false,
        }
    }

    #[test]
    fn absent_file_opens_empty() -> Result<()> {
        let temp = TempDir::new()?;
        let store = LabelStore::open(temp.path().join("labels.json"))?;
        assert!(store.images().is_empty());
        assert!(store.data().sites.is_empty());
        Ok(())
    }

    #[test]
    fn record_persists_and_round_trips() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("labels.json");

        let mut store = LabelStore::open(&path)?;
        assert!(store.record(label("images/a.jpg"))?);
        assert!(path.exists());

        let reopened = LabelStore::open(&path)?;
        assert_eq!(reopened.images().len(), 1);
        assert_eq!(reopened.images()[0].truck_count, Some(4));
        Ok(())
    }

    #[test]
    fn duplicate_path_is_a_no_op() -> Result<()> {
        let temp = TempDir::new()?;
        let mut store = LabelStore::open(temp.path().join("labels.json"))?;

        assert!(store.record(label("images/a.jpg"))?);
        assert!(!store.record(label("images/a.jpg"))?);
        assert_eq!(store.images().len(), 1);
        Ok(())
    }

    #[test]
    fn corrupt_document_is_fatal() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("labels.json");
        std::fs::write(&path, "{\"images\": [truncated")?;

        match LabelStore::open(&path) {
            Err(Error::Corrupt { .. }) => Ok(()),
            other => panic!("expected Corrupt, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn save_leaves_no_temp_file_behind() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("labels.json");

        let mut store = LabelStore::open(&path)?;
        store.record(label("images/a.jpg"))?;

        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }
}
