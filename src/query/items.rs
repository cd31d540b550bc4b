use serde::Serialize;

/// One page of results plus an optional total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
    /// Matching records across all pages, or `None` when not requested.
    pub total: Option<i64>,
}

impl<T> Items<T> {
    pub fn new(items: Vec<T>, total: Option<i64>) -> Self {
        Items { items, total }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_total() {
        let items = Items::new(vec![1, 2], Some(5));
        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!({ "items": [1, 2], "total": 5 })
        );
    }

    #[test]
    fn test_absent_total_is_null() {
        let items: Items<i32> = Items::new(Vec::new(), None);
        assert!(items.is_empty());
        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!({ "items": [], "total": null })
        );
    }
}
