//! Case catalog contract and the immutable case description type.
//!
//! The catalog is a read-only collaborator: session creation resolves a case
//! identifier against it and copies the resulting [`CaseContext`] into the
//! session by value. The engine never mutates catalog entries.

use async_trait::async_trait;
use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// Immutable description of one teaching case.
///
/// Loaded from the catalog at session creation and fixed for the lifetime of
/// the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseContext {
    /// Catalog identifier, e.g. `"case-001"`.
    pub case_id: String,
    /// Short display title.
    pub title: String,
    /// One-paragraph description shown before the exercise starts.
    pub brief: String,
    /// Detailed clinical narrative the learner works from.
    pub narrative: String,
    /// Free-form difficulty descriptor (e.g. `"intermediate"`).
    pub difficulty: String,
    /// Specialty tags, e.g. `["cardiology", "emergency"]`.
    pub specialty_tags: Vec<String>,
    /// Learning objectives the case is built around.
    pub learning_objectives: Vec<String>,
}

/// Errors from catalog lookups.
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    /// No catalog entry exists for the requested identifier.
    #[error("case not found: {case_id}")]
    #[diagnostic(
        code(caseflow::catalog::case_not_found),
        help("Check the case identifier against the catalog contents.")
    )]
    CaseNotFound { case_id: String },
}

/// Read-only source of case descriptions.
///
/// Implementations may be backed by anything from a static map to a remote
/// content service; the engine only requires lookup by identifier.
#[async_trait]
pub trait CaseCatalog: Send + Sync {
    /// Resolve a case identifier to its full context.
    async fn lookup(&self, case_id: &str) -> Result<CaseContext, CatalogError>;
}

/// Volatile in-memory catalog for tests, demos, and embedded deployments.
#[derive(Debug, Default)]
pub struct InMemoryCaseCatalog {
    cases: RwLock<FxHashMap<String, CaseContext>>,
}

impl InMemoryCaseCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from an iterator of cases, keyed by `case_id`.
    #[must_use]
    pub fn with_cases(cases: impl IntoIterator<Item = CaseContext>) -> Self {
        let map = cases
            .into_iter()
            .map(|c| (c.case_id.clone(), c))
            .collect::<FxHashMap<_, _>>();
        Self {
            cases: RwLock::new(map),
        }
    }

    /// Insert or replace a case entry.
    pub async fn insert(&self, case: CaseContext) {
        self.cases.write().await.insert(case.case_id.clone(), case);
    }
}

#[async_trait]
impl CaseCatalog for InMemoryCaseCatalog {
    async fn lookup(&self, case_id: &str) -> Result<CaseContext, CatalogError> {
        self.cases
            .read()
            .await
            .get(case_id)
            .cloned()
            .ok_or_else(|| CatalogError::CaseNotFound {
                case_id: case_id.to_string(),
            })
    }
}
