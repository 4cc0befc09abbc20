//! # Caseflow: Stepped Clinical Case-Presentation Session Engine
//!
//! Caseflow drives a multi-turn, strictly-ordered clinical simulation
//! exercise: a learner works through the six canonical SNAPPS steps
//! (Summarize, Narrow, Analyze, Probe, Plan, Select) for one case, each turn
//! pairing the learner's input with feedback from a pluggable generator, and
//! the engine compiles a final synthesis once all six steps are committed.
//!
//! ## Core Concepts
//!
//! - **Steps**: the fixed six-step order is the engine's defining invariant —
//!   no skips, repeats, or reordering, enforced server-side
//! - **Session**: the aggregate accumulating case context, committed step
//!   records, and learner summary state
//! - **Store**: keyed in-memory store with one lock per session, so same-
//!   session submits serialize while different sessions run concurrently
//! - **Collaborators**: a read-only [`cases::CaseCatalog`] and a black-box
//!   [`feedback::FeedbackGenerator`], both behind async traits
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use caseflow::cases::{CaseContext, InMemoryCaseCatalog};
//! use caseflow::engine::SessionEngine;
//! use caseflow::feedback::TemplateGenerator;
//! use caseflow::steps::StepKind;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), caseflow::engine::EngineError> {
//! let catalog = InMemoryCaseCatalog::with_cases([CaseContext {
//!     case_id: "case-001".into(),
//!     title: "Chest pain in a 54-year-old".into(),
//!     brief: "Acute chest pain presentation".into(),
//!     narrative: "A 54-year-old presents with two hours of chest pain...".into(),
//!     difficulty: "intermediate".into(),
//!     specialty_tags: vec!["cardiology".into()],
//!     learning_objectives: vec!["Build a focused differential".into()],
//! }]);
//! let engine = SessionEngine::new(
//!     Arc::new(catalog),
//!     Arc::new(TemplateGenerator::new()),
//! );
//!
//! let session = engine.initialize("case-001").await?;
//! let mut last = None;
//! for step in StepKind::SEQUENCE {
//!     last = Some(
//!         engine
//!             .submit(&session.session_id, step, "my work for this step")
//!             .await?,
//!     );
//! }
//! let outcome = last.expect("six steps submitted");
//! assert!(outcome.session.is_complete());
//! assert!(outcome.summary.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All failures surface as typed [`engine::EngineError`] values with miette
//! diagnostics; none of them corrupt session state. Validation errors carry
//! zero side effects, and a generator failure or timeout leaves the session
//! bit-for-bit unchanged so the same step can be resubmitted.
//!
//! ## Module Guide
//!
//! - [`steps`] - Canonical step vocabulary and ordering
//! - [`cases`] - Case context and catalog contract
//! - [`feedback`] - Feedback payload and generator contract
//! - [`session`] - Session aggregate and step records
//! - [`store`] - Keyed store with per-session locking
//! - [`engine`] - Initialize / get / submit state machine
//! - [`summary`] - Completion synthesis
//! - [`api`] - Transport-agnostic wire types
//! - [`config`] - Engine configuration
//! - [`telemetry`] - Tracing subscriber setup

pub mod api;
pub mod cases;
pub mod config;
pub mod engine;
pub mod feedback;
pub mod session;
pub mod steps;
pub mod store;
pub mod summary;
pub mod telemetry;
