//! Shared Macros

/// Deduplicate a collection while preserving order.
#[macro_export]
macro_rules! dedupe {
    // Deduplication
    ($list:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            if seen.insert(item.clone()) {
                result.push(item);
            }
        }
        result
    }};
    // Deduplication + cap on the number of kept items
    ($list:expr, max = $max:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            if result.len() >= $max {
                break;
            }
            if seen.insert(item.clone()) {
                result.push(item);
            }
        }
        result
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn dedupe_preserves_first_occurrence_order() {
        let items = vec!["b", "a", "b", "c", "a"];
        let out: Vec<&str> = crate::dedupe!(items);
        assert_eq!(out, vec!["b", "a", "c"]);
    }

    #[test]
    fn dedupe_with_cap_stops_early() {
        let items = vec![1, 1, 2, 3, 4];
        let out: Vec<i32> = crate::dedupe!(items, max = 2);
        assert_eq!(out, vec![1, 2]);
    }
}
