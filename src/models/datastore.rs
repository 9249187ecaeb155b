//! The persisted aggregate: every revision and every visit in one document.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{CreateRevisionRequest, RecordVisitRequest, Revision, Visit};

/// Author of the seeded example revisions.
pub const SEED_AUTHOR: &str = "System";

const SEED_REVISIONS: [(&str, bool); 4] = [
    ("調査対象場所の写真を追加する", false),
    ("リスクレベル表を色分けで見やすくする", false),
    ("UI配色をカラフルにする", true),
    ("ページアイコン（favicon）を設定する", false),
];

/// The root document stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datastore {
    #[serde(default)]
    pub revisions: Vec<Revision>,
    #[serde(default)]
    pub access_history: Vec<Visit>,
}

impl Datastore {
    /// The starting document used when nothing usable is on disk.
    pub fn seeded(now: NaiveDateTime) -> Self {
        let revisions = SEED_REVISIONS
            .iter()
            .zip(1..)
            .map(|(&(text, completed), id)| Revision {
                id,
                text: text.to_string(),
                completed,
                created_by: SEED_AUTHOR.to_string(),
                created_at: now,
            })
            .collect();

        Self {
            revisions,
            access_history: Vec::new(),
        }
    }

    /// One more than the largest id present, never below 1. Gaps are not filled.
    ///
    /// If the largest id is `i64::MAX`, the smallest unused positive id is
    /// taken instead.
    pub fn next_revision_id(&self) -> i64 {
        let max = self.revisions.iter().map(|r| r.id).fold(0, i64::max);
        max.checked_add(1).unwrap_or_else(|| self.lowest_free_id())
    }

    fn lowest_free_id(&self) -> i64 {
        let used: HashSet<i64> = self.revisions.iter().map(|r| r.id).collect();
        (1..=i64::MAX)
            .find(|id| !used.contains(id))
            .unwrap_or(i64::MAX)
    }

    /// Append a new revision and return a copy of it.
    pub fn add_revision(&mut self, request: CreateRevisionRequest, now: NaiveDateTime) -> Revision {
        let text = request.text.unwrap_or_default();
        let revision = Revision::new(self.next_revision_id(), &text, request.created_by, now);
        self.revisions.push(revision.clone());
        revision
    }

    /// Set `completed` on the first revision with this id.
    pub fn set_completed(&mut self, id: i64, completed: bool) -> Option<Revision> {
        let revision = self.revisions.iter_mut().find(|r| r.id == id)?;
        revision.completed = completed;
        Some(revision.clone())
    }

    /// Drop every revision with this id and return how many went.
    pub fn remove_revisions(&mut self, id: i64) -> usize {
        let before = self.revisions.len();
        self.revisions.retain(|r| r.id != id);
        before - self.revisions.len()
    }

    /// Append a visit numbered after the current length of the log.
    pub fn record_visit(&mut self, request: RecordVisitRequest, now: NaiveDateTime) -> Visit {
        let visit_number = self.access_history.len() as u64 + 1;
        let visit = Visit::new(request.user_name, now, visit_number);
        self.access_history.push(visit.clone());
        visit
    }

    /// Empty the access history.
    pub fn clear_history(&mut self) {
        self.access_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timestamp;

    fn create(text: &str) -> CreateRevisionRequest {
        CreateRevisionRequest {
            text: Some(text.to_string()),
            created_by: None,
        }
    }

    fn with_ids(ids: &[i64]) -> Datastore {
        let now = timestamp::now();
        Datastore {
            revisions: ids
                .iter()
                .map(|&id| Revision::new(id, "existing", None, now))
                .collect(),
            access_history: Vec::new(),
        }
    }

    #[test]
    fn test_seed_contents() {
        let seed = Datastore::seeded(timestamp::now());

        let ids: Vec<i64> = seed.revisions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(seed.revisions.iter().all(|r| r.created_by == SEED_AUTHOR));
        let completed: Vec<bool> = seed.revisions.iter().map(|r| r.completed).collect();
        assert_eq!(completed, vec![false, false, true, false]);
        assert!(seed.access_history.is_empty());
    }

    #[test]
    fn test_first_id_is_one() {
        let mut store = Datastore::default();
        assert_eq!(store.add_revision(create("first"), timestamp::now()).id, 1);
    }

    #[test]
    fn test_next_id_does_not_fill_gaps() {
        let mut store = with_ids(&[1, 3]);
        assert_eq!(store.add_revision(create("next"), timestamp::now()).id, 4);
    }

    #[test]
    fn test_next_id_ignores_negative_ids() {
        let store = with_ids(&[-5, -2]);
        assert_eq!(store.next_revision_id(), 1);
    }

    #[test]
    fn test_next_id_after_max_id_takes_lowest_free() {
        let mut store = with_ids(&[1, 2, i64::MAX]);
        let revision = store.add_revision(create("overflow"), timestamp::now());
        assert_eq!(revision.id, 3);
    }

    #[test]
    fn test_next_id_after_only_max_id_is_one() {
        let store = with_ids(&[i64::MAX]);
        assert_eq!(store.next_revision_id(), 1);
    }

    #[test]
    fn test_missing_text_becomes_empty() {
        let mut store = Datastore::default();
        let revision = store.add_revision(CreateRevisionRequest::default(), timestamp::now());
        assert_eq!(revision.text, "");
        assert_eq!(revision.created_by, "Unknown");
    }

    #[test]
    fn test_remaining_ids_are_never_resequenced() {
        let mut store = with_ids(&[1, 2, 3]);
        assert_eq!(store.remove_revisions(2), 1);

        let next = store.add_revision(create("after delete"), timestamp::now());
        assert_eq!(next.id, 4);
        let ids: Vec<i64> = store.revisions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_set_completed_touches_only_flag() {
        let mut store = with_ids(&[1, 2]);
        let before = store.revisions[1].clone();

        let updated = store.set_completed(2, true).unwrap();
        assert!(updated.completed);
        assert_eq!(updated.text, before.text);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(store.revisions[1], updated);
    }

    #[test]
    fn test_set_completed_missing_id() {
        let mut store = with_ids(&[1]);
        let before = store.clone();
        assert!(store.set_completed(42, true).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_drops_all_duplicates() {
        let mut store = with_ids(&[1, 2, 2, 3]);
        assert_eq!(store.remove_revisions(2), 2);
        assert_eq!(store.remove_revisions(99), 0);
        assert_eq!(store.revisions.len(), 2);
    }

    #[test]
    fn test_visit_numbers_restart_after_clear() {
        let mut store = Datastore::default();
        let now = timestamp::now();

        assert_eq!(store.record_visit(RecordVisitRequest::default(), now).visit_number, 1);
        assert_eq!(store.record_visit(RecordVisitRequest::default(), now).visit_number, 2);

        store.clear_history();
        assert_eq!(store.record_visit(RecordVisitRequest::default(), now).visit_number, 1);
    }

    #[test]
    fn test_missing_sections_load_empty() {
        let store: Datastore = serde_json::from_str("{}").unwrap();
        assert_eq!(store, Datastore::default());
    }
}
