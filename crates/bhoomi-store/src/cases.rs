//! Case store: analysed cases scoped by user.
//!
//! Cases live in memory behind a [`RwLock`]. A store opened with
//! [`open_persistent`](CaseStore::open_persistent) also rewrites a JSON
//! snapshot after every mutation, so the CLI can keep cases across runs.
//! The analysis is stored verbatim alongside its derived confidence score.

use std::path::{Path, PathBuf};

use bhoomi_core::{AnalysisRecord, CaseRecord, CaseStatus, CaseUpdate, DisputeCategory, NewCase};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::StoreError;
use crate::stats::UserStats;

pub const DEFAULT_PAGE_SIZE: usize = 50;

pub struct CaseStore {
    /// Insertion order; newest last.
    cases: RwLock<Vec<CaseRecord>>,
    snapshot: Option<PathBuf>,
}

impl Default for CaseStore {
    fn default() -> Self {
        Self::open()
    }
}

impl CaseStore {
    /// Open an in-memory store.
    pub fn open() -> Self {
        Self {
            cases: RwLock::new(Vec::new()),
            snapshot: None,
        }
    }

    /// Open or create a store backed by a JSON snapshot at `path`.
    ///
    /// A missing file starts an empty store; the file is created on the
    /// first mutation.
    pub async fn open_persistent(path: &Path) -> Result<Self, StoreError> {
        let cases = match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<CaseRecord>>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        info!(count = cases.len(), path = %path.display(), "opened case store");
        Ok(Self {
            cases: RwLock::new(cases),
            snapshot: Some(path.to_path_buf()),
        })
    }

    /// Total number of stored cases, including deleted ones.
    pub async fn len(&self) -> usize {
        self.cases.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cases.read().await.is_empty()
    }

    /// Store a new active case. Nothing is kept if the snapshot write fails.
    pub async fn create_case(
        &self,
        user_id: &str,
        case: NewCase,
        analysis: AnalysisRecord,
    ) -> Result<CaseRecord, StoreError> {
        let record = CaseRecord::new(user_id, case, analysis);
        let mut cases = self.cases.write().await;
        cases.push(record.clone());
        if let Err(e) = self.persist(&cases).await {
            cases.pop();
            return Err(e);
        }
        info!(id = %record.id, user_id, "case created");
        Ok(record)
    }

    /// Fetch a case owned by `user_id`, whatever its status.
    pub async fn get_case(&self, user_id: &str, id: Uuid) -> Option<CaseRecord> {
        self.cases
            .read()
            .await
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned()
    }

    /// Active cases for a user, newest first, optionally filtered by category.
    pub async fn list_cases(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
        dispute_type: Option<DisputeCategory>,
    ) -> Vec<CaseRecord> {
        self.cases
            .read()
            .await
            .iter()
            .rev()
            .filter(|c| c.user_id == user_id && c.status == CaseStatus::Active)
            .filter(|c| dispute_type.is_none_or(|t| c.dispute_type == t))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Apply an update. A supplied `analysis` replaces the stored record and
    /// its derived confidence score.
    ///
    /// If the snapshot cannot be written the previous record is restored.
    pub async fn update_case(
        &self,
        user_id: &str,
        id: Uuid,
        update: CaseUpdate,
        analysis: Option<AnalysisRecord>,
    ) -> Result<CaseRecord, StoreError> {
        let mut cases = self.cases.write().await;
        let idx = cases
            .iter()
            .position(|c| c.id == id && c.user_id == user_id)
            .ok_or(StoreError::NotFound(id))?;
        let previous = cases[idx].clone();
        let case = &mut cases[idx];

        if let Some(title) = update.title {
            case.title = title;
        }
        if let Some(text) = update.case_text {
            case.case_text = text;
        }
        if let Some(dispute_type) = update.dispute_type {
            case.dispute_type = dispute_type;
        }
        if let Some(status) = update.status {
            case.status = status;
        }
        if let Some(analysis) = analysis {
            case.replace_analysis(analysis);
        }
        case.updated_at = Utc::now();

        let updated = case.clone();
        if let Err(e) = self.persist(&cases).await {
            cases[idx] = previous;
            return Err(e);
        }
        info!(id = %id, "case updated");
        Ok(updated)
    }

    /// Soft delete: the case is kept with status `deleted`.
    pub async fn delete_case(&self, user_id: &str, id: Uuid) -> Result<(), StoreError> {
        let update = CaseUpdate {
            status: Some(CaseStatus::Deleted),
            ..Default::default()
        };
        self.update_case(user_id, id, update, None).await?;
        Ok(())
    }

    pub async fn user_stats(&self, user_id: &str) -> UserStats {
        let cases = self.cases.read().await;
        UserStats::from_cases(
            cases
                .iter()
                .rev()
                .filter(|c| c.user_id == user_id && c.status == CaseStatus::Active),
        )
    }

    async fn persist(&self, cases: &[CaseRecord]) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot else {
            return Ok(());
        };
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(cases)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
        debug!(count = cases.len(), path = %path.display(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhoomi_core::{ApplicableLaw, CaseSummary, Strategies};

    const USER: &str = "user-1";

    fn analysis(score: u8) -> AnalysisRecord {
        AnalysisRecord {
            case_summary: CaseSummary {
                facts: "facts".into(),
                claims: "claims".into(),
                dispute_nature: "nature".into(),
            },
            legal_issues: vec!["issue".into()],
            applicable_laws: vec![ApplicableLaw {
                law: "Registration Act, 1908".into(),
                relevance: "registration".into(),
            }],
            missing_evidence: vec!["sale deed".into()],
            strategies: Strategies {
                plaintiff: vec!["sue".into()],
                defendant: vec!["defend".into()],
            },
            confidence_score: score,
            next_steps: vec!["consult".into()],
            precedents: vec![],
            estimated_timeline: "3-6 months".into(),
            estimated_costs: "₹50,000".into(),
        }
    }

    fn new_case(title: &str, dispute_type: DisputeCategory) -> NewCase {
        NewCase {
            title: title.into(),
            case_text: "Long enough description of a property dispute in Bangalore.".into(),
            dispute_type,
        }
    }

    #[tokio::test]
    async fn create_and_get() {
        let store = CaseStore::open();
        let created = store
            .create_case(USER, new_case("Boundary wall", DisputeCategory::Boundary), analysis(7))
            .await
            .unwrap();

        assert_eq!(created.confidence_score, 7);
        assert_eq!(created.status, CaseStatus::Active);

        let fetched = store.get_case(USER, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(store.get_case("someone-else", created.id).await.is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first_filtered_and_paged() {
        let store = CaseStore::open();
        for (title, cat) in [
            ("first case", DisputeCategory::Tax),
            ("second case", DisputeCategory::Boundary),
            ("third case", DisputeCategory::Tax),
        ] {
            store.create_case(USER, new_case(title, cat), analysis(5)).await.unwrap();
        }
        store
            .create_case("other-user", new_case("not mine", DisputeCategory::Tax), analysis(5))
            .await
            .unwrap();

        let all = store.list_cases(USER, DEFAULT_PAGE_SIZE, 0, None).await;
        let titles: Vec<&str> = all.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["third case", "second case", "first case"]);

        let tax = store
            .list_cases(USER, DEFAULT_PAGE_SIZE, 0, Some(DisputeCategory::Tax))
            .await;
        assert_eq!(tax.len(), 2);

        let page = store.list_cases(USER, 1, 1, None).await;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "second case");
    }

    #[tokio::test]
    async fn reanalysis_replaces_record_and_score() {
        let store = CaseStore::open();
        let created = store
            .create_case(USER, new_case("Khata transfer", DisputeCategory::Mutation), analysis(3))
            .await
            .unwrap();

        let update = CaseUpdate {
            dispute_type: Some(DisputeCategory::BbmpBda),
            ..Default::default()
        };
        let updated = store
            .update_case(USER, created.id, update, Some(analysis(8)))
            .await
            .unwrap();

        assert_eq!(updated.dispute_type, DisputeCategory::BbmpBda);
        assert_eq!(updated.confidence_score, 8);
        assert_eq!(updated.analysis.confidence_score, 8);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_unknown_case_is_not_found() {
        let store = CaseStore::open();
        let id = Uuid::new_v4();
        let err = store
            .update_case(USER, id, CaseUpdate::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn delete_is_soft() {
        let store = CaseStore::open();
        let created = store
            .create_case(USER, new_case("Tax arrears", DisputeCategory::Tax), analysis(6))
            .await
            .unwrap();

        store.delete_case(USER, created.id).await.unwrap();

        assert!(store.list_cases(USER, DEFAULT_PAGE_SIZE, 0, None).await.is_empty());
        let kept = store.get_case(USER, created.id).await.unwrap();
        assert_eq!(kept.status, CaseStatus::Deleted);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.user_stats(USER).await.total_cases, 0);
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.json");

        let id = {
            let store = CaseStore::open_persistent(&path).await.unwrap();
            assert!(store.is_empty().await);
            store
                .create_case(USER, new_case("Partition suit", DisputeCategory::Inheritance), analysis(9))
                .await
                .unwrap()
                .id
        };

        let reopened = CaseStore::open_persistent(&path).await.unwrap();
        let case = reopened.get_case(USER, id).await.unwrap();
        assert_eq!(case.title, "Partition suit");
        assert_eq!(case.analysis.confidence_score, 9);
    }

    #[tokio::test]
    async fn failed_create_leaves_no_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("cases.json");
        let store = CaseStore::open_persistent(&path).await.unwrap();

        let err = store
            .create_case(USER, new_case("Boundary wall", DisputeCategory::Boundary), analysis(7))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert!(store.is_empty().await);
        assert!(store.list_cases(USER, DEFAULT_PAGE_SIZE, 0, None).await.is_empty());
        assert_eq!(store.user_stats(USER).await.total_cases, 0);
    }

    #[tokio::test]
    async fn failed_update_restores_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("db");
        std::fs::create_dir(&sub).unwrap();
        let store = CaseStore::open_persistent(&sub.join("cases.json")).await.unwrap();
        let created = store
            .create_case(USER, new_case("Khata transfer", DisputeCategory::Mutation), analysis(4))
            .await
            .unwrap();

        std::fs::remove_dir_all(&sub).unwrap();
        let update = CaseUpdate {
            title: Some("Renamed case".into()),
            ..Default::default()
        };
        let err = store
            .update_case(USER, created.id, update, Some(analysis(9)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        let kept = store.get_case(USER, created.id).await.unwrap();
        assert_eq!(kept, created);

        // A failed soft delete leaves the case listed.
        assert!(store.delete_case(USER, created.id).await.is_err());
        assert_eq!(store.list_cases(USER, DEFAULT_PAGE_SIZE, 0, None).await.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.json");
        std::fs::write(&path, b"not json").unwrap();
        let err = CaseStore::open_persistent(&path).await.err().unwrap();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
