use crate::domain::model::{HoleStats, Round};
use crate::domain::ports::{HoleStore, RoundStore};
use crate::utils::error::{Result, ScorecardError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One JSON document per round: the round itself plus its holes, in hole order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoundDocument {
    round: Round,
    #[serde(default)]
    holes: Vec<HoleStats>,
}

/// Rounds stored as `<base_path>/<round_id>.json`. Writes are last-write-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_path: String,
}

impl JsonFileStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn document_path(&self, round_id: &str) -> Result<PathBuf> {
        let safe = !round_id.is_empty()
            && round_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(ScorecardError::validation(format!(
                "Invalid round id '{}'",
                round_id
            )));
        }
        Ok(Path::new(&self.base_path).join(format!("{}.json", round_id)))
    }

    fn read_document(&self, round_id: &str) -> Result<Option<RoundDocument>> {
        let path = self.document_path(round_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(path)?;
        Ok(Some(serde_json::from_slice(&data)?))
    }

    fn write_document(&self, document: &RoundDocument) -> Result<()> {
        let path = self.document_path(&document.round.id)?;
        fs::create_dir_all(&self.base_path)?;

        // 先寫暫存檔再改名，避免寫到一半的檔案
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(document)?)?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

impl HoleStore for JsonFileStore {
    async fn get_hole(&self, round_id: &str, hole: u8) -> Result<Option<HoleStats>> {
        Ok(self
            .read_document(round_id)?
            .and_then(|doc| doc.holes.into_iter().find(|h| h.hole == hole)))
    }

    async fn put_hole(&self, stats: &HoleStats) -> Result<()> {
        let mut document =
            self.read_document(&stats.round_id)?
                .ok_or_else(|| ScorecardError::RoundNotFound {
                    round_id: stats.round_id.clone(),
                })?;

        match document.holes.iter_mut().find(|h| h.hole == stats.hole) {
            Some(existing) => *existing = stats.clone(),
            None => {
                document.holes.push(stats.clone());
                document.holes.sort_by_key(|h| h.hole);
            }
        }

        self.write_document(&document)
    }

    async fn list_holes(&self, round_id: &str) -> Result<Vec<HoleStats>> {
        Ok(self
            .read_document(round_id)?
            .map(|doc| doc.holes)
            .unwrap_or_default())
    }
}

impl RoundStore for JsonFileStore {
    async fn create_round(&self, round: &Round) -> Result<()> {
        if self.read_document(&round.id)?.is_some() {
            tracing::debug!(round_id = %round.id, "round already exists, keeping it");
            return Ok(());
        }
        self.write_document(&RoundDocument {
            round: round.clone(),
            holes: Vec::new(),
        })
    }

    async fn get_round(&self, round_id: &str) -> Result<Option<Round>> {
        Ok(self.read_document(round_id)?.map(|doc| doc.round))
    }

    async fn list_rounds(&self) -> Result<Vec<Round>> {
        let base = Path::new(&self.base_path);
        if !base.exists() {
            return Ok(Vec::new());
        }

        let mut rounds = Vec::new();
        for entry in fs::read_dir(base)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read(&path)?;
            match serde_json::from_slice::<RoundDocument>(&data) {
                Ok(doc) => rounds.push(doc.round),
                Err(e) => tracing::warn!("Skipping unreadable round file {}: {}", path.display(), e),
            }
        }

        rounds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rounds)
    }

    async fn delete_round(&self, round_id: &str) -> Result<()> {
        let path = self.document_path(round_id)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{TeeBox, DEFAULT_PARS};
    use chrono::Utc;
    use tempfile::TempDir;

    fn round(id: &str) -> Round {
        Round {
            id: id.to_string(),
            created_at: Utc::now(),
            name: Some("Twilight nine".to_string()),
            players: vec!["Ana".to_string()],
            pars: DEFAULT_PARS.to_vec(),
            tee_box: TeeBox::Forward,
        }
    }

    fn hole(round_id: &str, hole: u8, strokes: u32) -> HoleStats {
        HoleStats {
            round_id: round_id.to_string(),
            hole,
            strokes,
            putts: 2,
            within_100: true,
            fairway: false,
            gir: false,
            hazard: false,
            balls_lost: 0,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().to_str().unwrap().to_string());

        store.create_round(&round("r-1")).await.unwrap();
        store.put_hole(&hole("r-1", 5, 4)).await.unwrap();
        store.put_hole(&hole("r-1", 1, 6)).await.unwrap();
        store.put_hole(&hole("r-1", 5, 3)).await.unwrap();

        let reopened = JsonFileStore::new(dir.path().to_str().unwrap().to_string());
        let holes = reopened.list_holes("r-1").await.unwrap();
        assert_eq!(holes.len(), 2);
        assert_eq!(holes[0].hole, 1);
        assert_eq!(holes[1].strokes, 3);
        assert_eq!(
            reopened.get_round("r-1").await.unwrap().unwrap().tee_box,
            TeeBox::Forward
        );
    }

    #[tokio::test]
    async fn test_put_hole_requires_round() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().to_str().unwrap().to_string());
        let err = store.put_hole(&hole("nope", 1, 4)).await.unwrap_err();
        assert!(matches!(err, ScorecardError::RoundNotFound { .. }));
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().to_str().unwrap().to_string());
        assert!(store.get_round("../etc").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_round_and_holes() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().to_str().unwrap().to_string());
        store.create_round(&round("gone")).await.unwrap();
        store.put_hole(&hole("gone", 2, 5)).await.unwrap();
        store.delete_round("gone").await.unwrap();
        assert!(store.list_rounds().await.unwrap().is_empty());
        assert!(store.list_holes("gone").await.unwrap().is_empty());
    }
}
