use std::collections::BTreeMap;

use crate::frame::{FrameAlignment, LimitFlags, OffsetOrigin};
use crate::io::hints::HintRecord;

/// Offset recorded for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoredOffset {
    pub dx: i32,
    pub dy: i32,
    pub score: Option<f64>,
    pub limit: LimitFlags,
    pub origin: OffsetOrigin,
}

impl StoredOffset {
    pub fn to_alignment(self, frame: usize) -> FrameAlignment {
        FrameAlignment {
            frame,
            dx: self.dx,
            dy: self.dy,
            score: self.score,
            limit: self.limit,
            origin: self.origin,
        }
    }
}

/// Run-wide map from frame index to offset.
///
/// Every frame is written at most once; the first entry, hinted or
/// searched, stays authoritative for the rest of the run.
#[derive(Debug, Default)]
pub struct FrameOffsetStore {
    entries: BTreeMap<usize, StoredOffset>,
}

impl FrameOffsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed from hint records. Returns how many were new.
    pub fn seed_hints<I>(&mut self, hints: I) -> usize
    where
        I: IntoIterator<Item = HintRecord>,
    {
        hints
            .into_iter()
            .filter(|h| {
                self.record(
                    h.frame,
                    StoredOffset {
                        dx: h.dx,
                        dy: h.dy,
                        score: h.score,
                        limit: h.limit,
                        origin: OffsetOrigin::Hint,
                    },
                )
            })
            .count()
    }

    pub fn get(&self, frame: usize) -> Option<&StoredOffset> {
        self.entries.get(&frame)
    }

    pub fn contains(&self, frame: usize) -> bool {
        self.entries.contains_key(&frame)
    }

    /// Write an entry unless the frame already has one.
    /// Returns whether the entry was written.
    pub fn record(&mut self, frame: usize, offset: StoredOffset) -> bool {
        match self.entries.entry(frame) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(offset);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &StoredOffset)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}
