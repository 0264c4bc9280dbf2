use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::SETTINGS,
    crawler::QuoteFeed,
    declare::{Quote, QuoteError, Snapshot},
    logging, util,
};

/// 伊斯坦堡證券交易所(Borsa İstanbul)的報價來源
#[derive(Default)]
pub struct Bist;

#[derive(Serialize, Deserialize, Debug)]
struct FeedResponse {
    pub data: Option<Vec<FeedQuote>>,
}

/// 來源的數值欄位都是文字（小數點為逗號），不在這一層解析
#[derive(Serialize, Deserialize, Debug)]
struct FeedQuote {
    pub name: String,
    pub price: String,
    pub change: String,
    pub time: String,
}

impl From<FeedQuote> for Quote {
    fn from(item: FeedQuote) -> Self {
        Quote {
            name: item.name,
            price: item.price,
            change_percent: item.change,
            observed_at: item.time,
        }
    }
}

/// 抓取整份即時報價快照
pub async fn visit(url: &str) -> Result<Snapshot> {
    let response = util::http::get_json::<FeedResponse>(url)
        .await
        .map_err(|why| QuoteError::Network(why.to_string()))?;

    let quotes: Snapshot = match response.data {
        Some(data) => data.into_iter().map(Quote::from).collect(),
        None => {
            logging::warn_file_async(format!("Feed response has no data field, url:{}", url));
            Vec::new()
        }
    };

    Ok(quotes)
}

#[async_trait]
impl QuoteFeed for Bist {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        visit(&SETTINGS.feed.url).await
    }
}
