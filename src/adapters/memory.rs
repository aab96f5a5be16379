use crate::domain::model::{HoleStats, Round};
use crate::domain::ports::{HoleStore, RoundStore};
use crate::utils::error::Result;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Tables {
    rounds: HashMap<String, Round>,
    // keyed by (round_id, hole) so listing comes back in hole order
    holes: BTreeMap<(String, u8), HoleStats>,
}

/// In-process store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HoleStore for MemoryStore {
    async fn get_hole(&self, round_id: &str, hole: u8) -> Result<Option<HoleStats>> {
        let tables = self.tables.lock().await;
        Ok(tables.holes.get(&(round_id.to_string(), hole)).cloned())
    }

    async fn put_hole(&self, stats: &HoleStats) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables
            .holes
            .insert((stats.round_id.clone(), stats.hole), stats.clone());
        Ok(())
    }

    async fn list_holes(&self, round_id: &str) -> Result<Vec<HoleStats>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .holes
            .values()
            .filter(|h| h.round_id == round_id)
            .cloned()
            .collect())
    }
}

impl RoundStore for MemoryStore {
    async fn create_round(&self, round: &Round) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables
            .rounds
            .entry(round.id.clone())
            .or_insert_with(|| round.clone());
        Ok(())
    }

    async fn get_round(&self, round_id: &str) -> Result<Option<Round>> {
        let tables = self.tables.lock().await;
        Ok(tables.rounds.get(round_id).cloned())
    }

    async fn list_rounds(&self) -> Result<Vec<Round>> {
        let tables = self.tables.lock().await;
        let mut rounds: Vec<Round> = tables.rounds.values().cloned().collect();
        rounds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rounds)
    }

    async fn delete_round(&self, round_id: &str) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.rounds.remove(round_id);
        tables.holes.retain(|(id, _), _| id != round_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{TeeBox, DEFAULT_PARS};
    use chrono::{Duration, Utc};

    fn round(id: &str, age_minutes: i64) -> Round {
        Round {
            id: id.to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
            name: None,
            players: vec!["Ana".to_string()],
            pars: DEFAULT_PARS.to_vec(),
            tee_box: TeeBox::Middle,
        }
    }

    fn hole(round_id: &str, hole: u8) -> HoleStats {
        HoleStats {
            round_id: round_id.to_string(),
            hole,
            strokes: 4,
            putts: 2,
            within_100: false,
            fairway: false,
            gir: false,
            hazard: false,
            balls_lost: 0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_holes_listed_in_order_and_deleted_with_round() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            store.create_round(&round("a", 10)).await.unwrap();
            store.create_round(&round("b", 0)).await.unwrap();
            store.put_hole(&hole("a", 9)).await.unwrap();
            store.put_hole(&hole("a", 2)).await.unwrap();
            store.put_hole(&hole("b", 1)).await.unwrap();

            let holes: Vec<u8> = store
                .list_holes("a")
                .await
                .unwrap()
                .iter()
                .map(|h| h.hole)
                .collect();
            assert_eq!(holes, vec![2, 9]);

            let ids: Vec<String> = store
                .list_rounds()
                .await
                .unwrap()
                .into_iter()
                .map(|r| r.id)
                .collect();
            assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);

            store.delete_round("a").await.unwrap();
            assert!(store.get_round("a").await.unwrap().is_none());
            assert!(store.list_holes("a").await.unwrap().is_empty());
            assert_eq!(store.list_holes("b").await.unwrap().len(), 1);
        });
    }
}
