//! The append-only sonar reading log.
//!
//! Readings are only ever read within a trailing time window, so the log
//! grows until [`ReadingStore::prune_older_than`] is called. Pruning is a
//! retention policy, not a correctness requirement.

use chrono::{DateTime, Utc};
use fishradar_types::SonarReading;

use crate::error::StoreError;

/// Inclusive bounds of a valid signal strength.
const SIGNAL_STRENGTH_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Append-only log of sonar readings in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReadingStore {
    /// All readings, oldest first.
    readings: Vec<SonarReading>,
}

impl ReadingStore {
    /// Create an empty reading log.
    pub const fn new() -> Self {
        Self {
            readings: Vec::new(),
        }
    }

    /// Append a reading.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SignalStrengthOutOfRange`] when the strength
    /// falls outside `1..=100`.
    pub fn insert(&mut self, reading: SonarReading) -> Result<(), StoreError> {
        if !SIGNAL_STRENGTH_RANGE.contains(&reading.signal_strength) {
            return Err(StoreError::SignalStrengthOutOfRange {
                value: reading.signal_strength,
            });
        }
        self.readings.push(reading);
        Ok(())
    }

    /// All readings detected strictly after `cutoff`, cloned out.
    pub fn readings_since(&self, cutoff: DateTime<Utc>) -> Vec<SonarReading> {
        self.readings
            .iter()
            .filter(|reading| reading.detected_at > cutoff)
            .cloned()
            .collect()
    }

    /// Physically delete readings detected strictly before `cutoff`.
    ///
    /// Returns the number of rows removed.
    pub fn prune_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.readings.len();
        self.readings.retain(|reading| reading.detected_at >= cutoff);
        before.saturating_sub(self.readings.len())
    }

    /// Total number of stored readings.
    pub fn reading_count(&self) -> usize {
        self.readings.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};
    use fishradar_types::{GeoPoint, ReadingId, VoyageId};

    use super::*;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn reading_at(detected_at: DateTime<Utc>, strength: u32) -> SonarReading {
        SonarReading {
            reading_id: ReadingId::new(),
            voyage_id: VoyageId::new(),
            position: GeoPoint::new(29.0, 41.0),
            signal_strength: strength,
            detected_at,
        }
    }

    #[test]
    fn insert_accepts_valid_strengths() {
        let mut store = ReadingStore::new();
        store.insert(reading_at(base_time(), 1)).unwrap();
        store.insert(reading_at(base_time(), 100)).unwrap();
        assert_eq!(store.reading_count(), 2);
    }

    #[test]
    fn insert_rejects_out_of_range_strengths() {
        let mut store = ReadingStore::new();
        for value in [0, 101, u32::MAX] {
            let err = store.insert(reading_at(base_time(), value)).unwrap_err();
            assert!(matches!(
                err,
                StoreError::SignalStrengthOutOfRange { .. }
            ));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn readings_since_is_a_strict_window() {
        let mut store = ReadingStore::new();
        let now = base_time();
        store.insert(reading_at(now - Duration::seconds(15), 50)).unwrap();
        store.insert(reading_at(now - Duration::seconds(10), 60)).unwrap();
        store.insert(reading_at(now - Duration::seconds(3), 70)).unwrap();

        let window = store.readings_since(now - Duration::seconds(10));
        assert_eq!(window.len(), 1);
        assert_eq!(window.first().map(|r| r.signal_strength), Some(70));
    }

    #[test]
    fn prune_removes_only_stale_rows() {
        let mut store = ReadingStore::new();
        let now = base_time();
        store.insert(reading_at(now - Duration::seconds(120), 10)).unwrap();
        store.insert(reading_at(now - Duration::seconds(5), 20)).unwrap();

        let removed = store.prune_older_than(now - Duration::seconds(60));
        assert_eq!(removed, 1);
        assert_eq!(store.reading_count(), 1);
    }
}
