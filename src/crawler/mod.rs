use anyhow::Result;
use async_trait::async_trait;

use crate::declare::Snapshot;

/// 伊斯坦堡證券交易所
pub mod bist;

/// 報價來源：單次呼叫回傳整份快照的拉取式 feed。
///
/// SnapshotStore 透過此 trait 取得資料，測試時以可腳本化的假來源替換。
#[async_trait]
pub trait QuoteFeed: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot>;
}
