use std::sync::Arc;

/// Which service instance serves a read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Read through the cache decorator.
    #[default]
    Cached,
    /// Go straight to the data source. The cache is neither read nor written.
    Bypass,
}

impl CacheMode {
    /// Maps the `no_cache` request flag to a mode.
    pub fn from_no_cache(no_cache: bool) -> Self {
        if no_cache {
            Self::Bypass
        } else {
            Self::Cached
        }
    }
}

/// A service built once over the cache decorator and once over the raw source.
pub struct ServicePair<T> {
    cached: Arc<T>,
    direct: Arc<T>,
}

impl<T> ServicePair<T> {
    pub fn new(cached: T, direct: T) -> Self {
        Self {
            cached: Arc::new(cached),
            direct: Arc::new(direct),
        }
    }

    /// Returns the instance for `mode`.
    pub fn select(&self, mode: CacheMode) -> &T {
        match mode {
            CacheMode::Cached => &self.cached,
            CacheMode::Bypass => &self.direct,
        }
    }

    /// The cache-backed instance. Writes always go through here so that
    /// invalidation runs.
    pub fn cached(&self) -> &T {
        &self.cached
    }
}

impl<T> Clone for ServicePair<T> {
    fn clone(&self) -> Self {
        Self {
            cached: Arc::clone(&self.cached),
            direct: Arc::clone(&self.direct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(CacheMode::from_no_cache(true), CacheMode::Bypass);
        assert_eq!(CacheMode::from_no_cache(false), CacheMode::Cached);
        assert_eq!(CacheMode::default(), CacheMode::Cached);
    }

    #[test]
    fn test_select_picks_instance() {
        let pair = ServicePair::new("cached", "direct");

        assert_eq!(*pair.select(CacheMode::Cached), "cached");
        assert_eq!(*pair.select(CacheMode::Bypass), "direct");
        assert_eq!(*pair.cached(), "cached");
    }

    #[test]
    fn test_clone_shares_instances() {
        let pair = ServicePair::new(vec![1], vec![2]);
        let clone = pair.clone();

        assert!(std::ptr::eq(pair.cached(), clone.cached()));
        assert!(std::ptr::eq(
            pair.select(CacheMode::Bypass),
            clone.select(CacheMode::Bypass)
        ));
    }
}
