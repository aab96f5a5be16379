use crate::domain::model::{HoleStats, Round, TeeBox};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Per-hole persistence, keyed by `(round_id, hole)`. Last write wins.
pub trait HoleStore: Send + Sync {
    fn get_hole(
        &self,
        round_id: &str,
        hole: u8,
    ) -> impl std::future::Future<Output = Result<Option<HoleStats>>> + Send;
    fn put_hole(&self, stats: &HoleStats) -> impl std::future::Future<Output = Result<()>> + Send;
    fn list_holes(
        &self,
        round_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<HoleStats>>> + Send;
}

pub trait RoundStore: Send + Sync {
    fn create_round(&self, round: &Round) -> impl std::future::Future<Output = Result<()>> + Send;
    fn get_round(
        &self,
        round_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Round>>> + Send;
    /// Newest first.
    fn list_rounds(&self) -> impl std::future::Future<Output = Result<Vec<Round>>> + Send;
    /// Removes the round and every hole recorded against it.
    fn delete_round(&self, round_id: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    /// Pars used for new rounds unless the golfer overrides them.
    fn default_pars(&self) -> Vec<u8>;
    fn default_tee_box(&self) -> TeeBox;
}

/// Producer of raw score lines: typed text or a voice transcript.
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> Result<Option<String>>;
}
