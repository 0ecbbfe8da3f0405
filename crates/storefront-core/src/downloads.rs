use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::GameId;

/// Progress value at which a download is finished.
pub const COMPLETE_PERCENT: u8 = 100;

/// Where a single download stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "percent", rename_all = "snake_case")]
pub enum DownloadStatus {
    NotStarted,
    InProgress(u8),
    Complete,
}

/// Ids touched by a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Every download advanced by this tick, in id order.
    pub advanced: Vec<GameId>,
    /// Downloads that reached 100% on this tick.
    pub completed: Vec<GameId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.advanced.is_empty()
    }
}

/// Simulated download progress keyed by game id.
///
/// Entries are only created by [`Downloads::start`]. Progress never goes
/// down and finished entries stay at 100.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Downloads {
    progress: BTreeMap<GameId, u8>,
}

impl Downloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin downloading `id` at 0%. No-op if it was already started.
    pub fn start(&mut self, id: GameId) -> bool {
        if self.progress.contains_key(&id) {
            return false;
        }
        self.progress.insert(id, 0);
        true
    }

    pub fn status(&self, id: GameId) -> DownloadStatus {
        match self.progress.get(&id) {
            None => DownloadStatus::NotStarted,
            Some(&p) if p >= COMPLETE_PERCENT => DownloadStatus::Complete,
            Some(&p) => DownloadStatus::InProgress(p),
        }
    }

    pub fn progress(&self, id: GameId) -> Option<u8> {
        self.progress.get(&id).copied()
    }

    pub fn progress_by_id(&self) -> &BTreeMap<GameId, u8> {
        &self.progress
    }

    /// Number of downloads still below 100%.
    pub fn active_count(&self) -> usize {
        self.progress
            .values()
            .filter(|&&p| p < COMPLETE_PERCENT)
            .count()
    }

    /// Advance every in-progress download by one percent in a single pass.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        for (&id, percent) in self.progress.iter_mut() {
            if *percent >= COMPLETE_PERCENT {
                continue;
            }
            *percent = (*percent + 1).min(COMPLETE_PERCENT);
            report.advanced.push(id);
            if *percent == COMPLETE_PERCENT {
                report.completed.push(id);
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut downloads = Downloads::new();
        assert!(downloads.start(4));
        assert!(!downloads.start(4));
        assert_eq!(downloads.progress(4), Some(0));
        assert_eq!(downloads.status(4), DownloadStatus::InProgress(0));
    }

    #[test]
    fn start_does_not_reset_progress() {
        let mut downloads = Downloads::new();
        downloads.start(1);
        downloads.tick();
        downloads.tick();
        downloads.start(1);
        assert_eq!(downloads.progress(1), Some(2));
    }

    #[test]
    fn unknown_id_is_not_started() {
        let downloads = Downloads::new();
        assert_eq!(downloads.status(3), DownloadStatus::NotStarted);
        assert_eq!(downloads.progress(3), None);
    }

    #[test]
    fn tick_advances_every_active_entry_once() {
        let mut downloads = Downloads::new();
        downloads.start(2);
        downloads.start(7);
        let report = downloads.tick();
        assert_eq!(report.advanced, vec![2, 7]);
        assert!(report.completed.is_empty());
        assert_eq!(downloads.progress(2), Some(1));
        assert_eq!(downloads.progress(7), Some(1));
    }

    #[test]
    fn entries_started_later_lag_behind() {
        let mut downloads = Downloads::new();
        downloads.start(1);
        for _ in 0..10 {
            downloads.tick();
        }
        downloads.start(2);
        downloads.tick();
        assert_eq!(downloads.progress(1), Some(11));
        assert_eq!(downloads.progress(2), Some(1));
    }

    #[test]
    fn completes_at_hundred_and_stays() {
        let mut downloads = Downloads::new();
        downloads.start(5);
        let mut completed_on = None;
        for n in 1..=150 {
            let report = downloads.tick();
            if report.completed.contains(&5) {
                assert!(completed_on.is_none(), "completion reported twice");
                completed_on = Some(n);
            }
        }
        assert_eq!(completed_on, Some(100));
        assert_eq!(downloads.progress(5), Some(100));
        assert_eq!(downloads.status(5), DownloadStatus::Complete);
        assert_eq!(downloads.active_count(), 0);
        assert!(downloads.tick().is_empty());
    }

    #[test]
    fn status_serializes_with_state_tag() {
        let json = serde_json::to_value(DownloadStatus::InProgress(42)).unwrap();
        assert_eq!(json, serde_json::json!({"state": "in_progress", "percent": 42}));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn n_ticks_reach_min_of_n_and_hundred(
                warmup in 0usize..120,
                n in 0usize..150,
            ) {
                let mut downloads = Downloads::new();
                downloads.start(1);
                for _ in 0..warmup {
                    downloads.tick();
                }
                let p = downloads.progress(1).unwrap_or_default() as usize;
                prop_assert_eq!(p, warmup.min(100));
                for _ in 0..n {
                    downloads.tick();
                }
                let expected = (p + n).min(100) as u8;
                prop_assert_eq!(downloads.progress(1), Some(expected));
            }
        }
    }
}
