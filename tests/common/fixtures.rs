use std::sync::Arc;

use caseflow::cases::{CaseContext, InMemoryCaseCatalog};
use caseflow::config::EngineConfig;
use caseflow::engine::SessionEngine;
use caseflow::feedback::FeedbackGenerator;

/// The catalog entry exercised by most scenarios.
pub const TEST_CASE_ID: &str = "case-001";

#[allow(dead_code)]
pub fn test_case() -> CaseContext {
    CaseContext {
        case_id: TEST_CASE_ID.to_string(),
        title: "Test Case Title".to_string(),
        brief: "A short presentation used by the test suite.".to_string(),
        narrative: "A 54-year-old presents with two hours of chest pain radiating to the left arm."
            .to_string(),
        difficulty: "intermediate".to_string(),
        specialty_tags: vec!["cardiology".to_string(), "emergency".to_string()],
        learning_objectives: vec!["Build a focused differential".to_string()],
    }
}

#[allow(dead_code)]
pub fn second_case() -> CaseContext {
    CaseContext {
        case_id: "case-002".to_string(),
        title: "Second Case".to_string(),
        brief: "Another presentation.".to_string(),
        narrative: "A 7-year-old with fever and a limp.".to_string(),
        difficulty: "basic".to_string(),
        specialty_tags: vec!["pediatrics".to_string()],
        learning_objectives: vec!["Recognize septic arthritis".to_string()],
    }
}

#[allow(dead_code)]
pub fn demo_catalog() -> InMemoryCaseCatalog {
    InMemoryCaseCatalog::with_cases([test_case(), second_case()])
}

/// Engine over the demo catalog with the given generator and default config.
#[allow(dead_code)]
pub fn engine_with(generator: Arc<dyn FeedbackGenerator>) -> SessionEngine {
    SessionEngine::new(Arc::new(demo_catalog()), generator)
}

/// Engine over the demo catalog with explicit config.
#[allow(dead_code)]
pub fn engine_with_config(
    generator: Arc<dyn FeedbackGenerator>,
    config: EngineConfig,
) -> SessionEngine {
    SessionEngine::with_config(Arc::new(demo_catalog()), generator, config)
}
