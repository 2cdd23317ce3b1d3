use std::collections::HashMap;

use crate::frame::Shift;

use super::scoring::Score;

/// Per-frame memo of comparator results, keyed by candidate shift.
///
/// Sentinel (`None`) results are cached too, so a rejected candidate is
/// never recomputed within the same search.
#[derive(Debug, Default)]
pub struct ScoreCache {
    entries: HashMap<Shift, Score>,
    hits: usize,
}

impl ScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached score, counting the hit.
    pub fn get(&mut self, shift: Shift) -> Option<Score> {
        let cached = self.entries.get(&shift).copied();
        if cached.is_some() {
            self.hits += 1;
        }
        cached
    }

    pub fn insert(&mut self, shift: Shift, score: Score) {
        self.entries.insert(shift, score);
    }

    pub fn contains(&self, shift: Shift) -> bool {
        self.entries.contains_key(&shift)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_sentinel_distinct_from_miss() {
        let mut cache = ScoreCache::new();
        let s = Shift::new(2, -1);
        assert_eq!(cache.get(s), None);
        cache.insert(s, None);
        assert_eq!(cache.get(s), Some(None));
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn keys_do_not_collide_across_rows() {
        let mut cache = ScoreCache::new();
        cache.insert(Shift::new(-1, 1), Some(0.25));
        cache.insert(Shift::new(7, 0), Some(0.5));
        assert_eq!(cache.get(Shift::new(-1, 1)), Some(Some(0.25)));
        assert_eq!(cache.get(Shift::new(7, 0)), Some(Some(0.5)));
        assert_eq!(cache.len(), 2);
    }
}
