use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    declare::{Analysis, Quote},
    util::text,
};

/// 排行榜的名額
const TOP_N: usize = 5;

/// 依漲跌幅對快照排序，取出漲幅前五、跌幅前五與平均漲跌幅。
///
/// 漲跌幅無法解析的個股不列入排行與平均的計算，但仍保留在原始快照中。
/// 快照為空或沒有任何一筆可解析時回傳 `None`。
pub fn analyze(snapshot: &[Quote]) -> Option<Analysis> {
    let mut ranked: Vec<(&Quote, Decimal)> = snapshot
        .iter()
        .filter_map(|quote| {
            text::parse_decimal(&quote.change_percent)
                .ok()
                .map(|change| (quote, change))
        })
        .collect();

    if ranked.is_empty() {
        return None;
    }

    // 穩定排序：漲跌幅相同時維持快照原本的順序
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let take = TOP_N.min(ranked.len());
    let top_gainers: Vec<Quote> = ranked[..take].iter().map(|(q, _)| (*q).clone()).collect();
    // 名單不足五筆時，前五高與前五低會完全重疊
    let top_losers: Vec<Quote> = ranked[ranked.len() - take..]
        .iter()
        .rev()
        .map(|(q, _)| (*q).clone())
        .collect();

    let sum: Decimal = ranked.iter().map(|(_, change)| *change).sum();
    let average_change = (sum / Decimal::from(ranked.len()))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Some(Analysis {
        top_gainers,
        top_losers,
        average_change,
    })
}
