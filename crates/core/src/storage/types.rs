/// A limit/offset window over an ordered listing. Both values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Creates a window, clamping negative values to zero.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.max(0),
            offset: offset.max(0),
        }
    }

    /// Applies the window to an already ordered slice.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset)
            .unwrap_or(usize::MAX)
            .min(items.len());
        let len = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(len).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_values_are_clamped() {
        assert_eq!(Pagination::new(-1, -5), Pagination::new(0, 0));
    }

    #[test]
    fn test_apply_window() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(Pagination::new(2, 0).apply(&items), &[1, 2]);
        assert_eq!(Pagination::new(2, 3).apply(&items), &[4, 5]);
        assert_eq!(Pagination::new(10, 4).apply(&items), &[5]);
    }

    #[test]
    fn test_apply_past_the_end_is_empty() {
        let items = [1, 2, 3];
        assert!(Pagination::new(5, 3).apply(&items).is_empty());
        assert!(Pagination::new(5, i64::MAX).apply(&items).is_empty());
    }
}
