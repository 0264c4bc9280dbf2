use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::text;

#[derive(Error, Debug)]
pub enum QuoteError {
    /// 數值欄位無法解析，保留原始字串方便除錯
    #[error("invalid numeric format: {0:?}")]
    InvalidNumericFormat(String),
    #[error("network error: {0}")]
    Network(String),
}

/// 個股報價，欄位維持來源送來的文字格式
///
/// 數值欄位（price、change_percent）以字串保存，解析失敗的資料仍可原樣顯示，
/// 要取得數值時一律透過 [`util::text`](crate::util::text) 解析。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Quote {
    pub name: String,
    /// 價格，小數點以逗號表示（例："1234,56"）
    pub price: String,
    /// 漲跌幅(%)，帶正負號
    pub change_percent: String,
    /// 來源最後更新此筆報價的時間標記
    pub observed_at: String,
}

impl Quote {
    pub fn price(&self) -> Result<Decimal, QuoteError> {
        text::parse_decimal(&self.price)
    }

    pub fn change_percent(&self) -> Result<Decimal, QuoteError> {
        text::parse_decimal(&self.change_percent)
    }
}

/// 單次抓取回來的完整報價集合，保留來源的排列順序
pub type Snapshot = Vec<Quote>;

/// 由快照推導出的統計，隨快照更新重算、隨快照一起丟棄
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Analysis {
    /// 漲幅前五名，由高至低
    pub top_gainers: Vec<Quote>,
    /// 跌幅前五名，跌最深的排最前
    pub top_losers: Vec<Quote>,
    /// 全體平均漲跌幅，四捨五入至小數兩位
    pub average_change: Decimal,
}

/// 更新週期的狀態機，狀態轉移只能由 SnapshotStore 執行
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchState {
    /// 載入中；重新整理時保留上一次成功的快照供顯示
    Loading { last_good: Option<Snapshot> },
    /// 已有可顯示的快照；stale_error 表示最近一次更新失敗但仍沿用舊資料
    Ready {
        snapshot: Snapshot,
        stale_error: Option<String>,
    },
    /// 尚無任何成功快照可以回退時的失敗狀態
    Failed { reason: String },
}

impl FetchState {
    /// 目前可供顯示的快照
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            FetchState::Loading { last_good } => last_good.as_ref(),
            FetchState::Ready { snapshot, .. } => Some(snapshot),
            FetchState::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_quote_accessors() {
        let quote = Quote {
            name: "THYAO".to_string(),
            price: "325,50".to_string(),
            change_percent: "-1,07".to_string(),
            observed_at: "18:05".to_string(),
        };

        assert_eq!(quote.price().unwrap(), dec!(325.50));
        assert_eq!(quote.change_percent().unwrap(), dec!(-1.07));
    }

    #[test]
    fn test_fetch_state_snapshot() {
        let quote = Quote {
            name: "GARAN".to_string(),
            price: "89,15".to_string(),
            change_percent: "0,42".to_string(),
            observed_at: "18:05".to_string(),
        };

        let loading_empty = FetchState::Loading { last_good: None };
        assert!(loading_empty.snapshot().is_none());

        let loading_retained = FetchState::Loading {
            last_good: Some(vec![quote.clone()]),
        };
        assert_eq!(loading_retained.snapshot().map(|s| s.len()), Some(1));

        let ready = FetchState::Ready {
            snapshot: vec![quote],
            stale_error: Some("timeout".to_string()),
        };
        assert_eq!(ready.snapshot().map(|s| s.len()), Some(1));

        let failed = FetchState::Failed {
            reason: "connection refused".to_string(),
        };
        assert!(failed.snapshot().is_none());
        assert!(failed.is_failed());
    }
}
