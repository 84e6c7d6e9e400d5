//! Marker collection for the active dataset filter.

use super::model::PointOfInterest;
use super::surface::MarkerId;

/// One placed marker together with its source point.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEntry {
    pub id: MarkerId,
    pub point: PointOfInterest,
}

/// Ordered markers scoped to the currently selected dataset filter.
///
/// Invariant: before a new set renders, the previous set is drained and every
/// marker removed from the surface, so no overlay objects leak across filter
/// switches.
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    entries: Vec<MarkerEntry>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: MarkerId, point: PointOfInterest) {
        self.entries.push(MarkerEntry { id, point });
    }

    pub fn entries(&self) -> &[MarkerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and yields every entry, leaving the set empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, MarkerEntry> {
        self.entries.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str) -> PointOfInterest {
        PointOfInterest {
            name: name.to_string(),
            lat: 37.5,
            lng: 127.0,
            tel: None,
        }
    }

    #[test]
    fn drain_empties_the_set() {
        let mut set = MarkerSet::new();
        set.push(1, point("a"));
        set.push(2, point("b"));
        assert_eq!(set.len(), 2);

        let drained: Vec<MarkerId> = set.drain().map(|e| e.id).collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(set.is_empty());
    }
}
