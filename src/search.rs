use crate::declare::Quote;

/// 以名稱做不分大小寫的子字串比對，空查詢回傳完整快照（順序不變）。
pub fn filter<'a>(snapshot: &'a [Quote], query: &str) -> Vec<&'a Quote> {
    if query.is_empty() {
        return snapshot.iter().collect();
    }

    let needle = query.to_lowercase();

    snapshot
        .iter()
        .filter(|quote| quote.name.to_lowercase().contains(&needle))
        .collect()
}

/// 以名稱取得個股；來源若送出重複名稱，以快照中最後一筆為準。
pub fn find_by_name<'a>(snapshot: &'a [Quote], name: &str) -> Option<&'a Quote> {
    snapshot.iter().rev().find(|quote| quote.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(name: &str, price: &str) -> Quote {
        Quote {
            name: name.to_string(),
            price: price.to_string(),
            change_percent: "0,00".to_string(),
            observed_at: "18:05".to_string(),
        }
    }

    fn sample() -> Vec<Quote> {
        vec![
            quote("THYAO", "325,50"),
            quote("GARAN", "89,15"),
            quote("ASELS", "61,20"),
        ]
    }

    #[test]
    fn test_filter_empty_query_returns_all() {
        let snapshot = sample();
        let filtered = filter(&snapshot, "");

        let names: Vec<&str> = filtered.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, ["THYAO", "GARAN", "ASELS"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let snapshot = sample();

        let filtered = filter(&snapshot, "thy");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "THYAO");

        let filtered = filter(&snapshot, "GaRaN");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "GARAN");
    }

    #[test]
    fn test_filter_no_match() {
        let snapshot = sample();

        assert!(filter(&snapshot, "XXXX").is_empty());
    }

    #[test]
    fn test_find_by_name_last_occurrence_wins() {
        let snapshot = vec![
            quote("THYAO", "325,50"),
            quote("GARAN", "89,15"),
            quote("THYAO", "326,00"),
        ];

        let found = find_by_name(&snapshot, "THYAO").unwrap();
        assert_eq!(found.price, "326,00");

        assert!(find_by_name(&snapshot, "MISSING").is_none());
    }
}
