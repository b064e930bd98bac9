//! End-to-end analysis orchestration

use crate::error::{Result, ResumeLensError};
use crate::input::manager::InputManager;
use crate::llm::client::{CompletionBackend, ServiceErrorKind};
use crate::llm::prompts::{PromptParams, PromptTemplates};
use crate::processing::result::{AnalysisRequest, AnalysisResult};
use crate::processing::validator::{ResultValidator, ValidationErrorKind};
use log::{info, warn};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Lifecycle of a single analysis run. Owned by the engine; presentation only
/// ever sees snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Running,
    Success(AnalysisResult),
    Failed(FailureKind),
}

/// Which stage of the pipeline a failed run died in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingInput,
    EmptyDocument,
    Service(ServiceErrorKind),
    Validation(ValidationErrorKind),
    Internal,
}

impl FailureKind {
    fn from_error(err: &ResumeLensError) -> Self {
        match err {
            ResumeLensError::MissingInput(_) => FailureKind::MissingInput,
            ResumeLensError::EmptyDocument => FailureKind::EmptyDocument,
            ResumeLensError::Service(e) => FailureKind::Service(e.kind()),
            ResumeLensError::Validation(e) => FailureKind::Validation(e.kind()),
            _ => FailureKind::Internal,
        }
    }
}

/// Sequences extraction, prompt construction, the completion call, and
/// validation into one run with an at-most-one-in-flight guard.
///
/// A run, once started, proceeds to `Success` or `Failed` without
/// cancellation; a second `run` during that window is rejected with `Busy`
/// and leaves the in-flight run's eventual outcome untouched.
pub struct AnalysisEngine<C: CompletionBackend> {
    client: C,
    templates: PromptTemplates,
    input: InputManager,
    state: Mutex<AnalysisState>,
}

impl<C: CompletionBackend> AnalysisEngine<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            templates: PromptTemplates::default(),
            input: InputManager::new(),
            state: Mutex::new(AnalysisState::Idle),
        }
    }

    /// Snapshot of the current state for presentation.
    pub fn state(&self) -> AnalysisState {
        self.lock_state().clone()
    }

    /// Run the full pipeline for one document / job description pair.
    pub async fn run(&self, document: &Path, job_description: &str) -> Result<AnalysisResult> {
        self.begin()?;
        let outcome = self.execute(document, job_description).await;
        self.finish(&outcome);
        outcome
    }

    /// Busy guard: reject if a run is in flight, otherwise overwrite any prior
    /// terminal state and enter `Running`.
    fn begin(&self) -> Result<()> {
        let mut state = self.lock_state();
        if matches!(*state, AnalysisState::Running) {
            return Err(ResumeLensError::Busy);
        }
        *state = AnalysisState::Running;
        Ok(())
    }

    fn finish(&self, outcome: &Result<AnalysisResult>) {
        let mut state = self.lock_state();
        *state = match outcome {
            Ok(result) => AnalysisState::Success(result.clone()),
            Err(err) => {
                warn!("Analysis failed: {}", err);
                AnalysisState::Failed(FailureKind::from_error(err))
            }
        };
    }

    async fn execute(&self, document: &Path, job_description: &str) -> Result<AnalysisResult> {
        let started = Instant::now();

        if job_description.trim().is_empty() {
            return Err(ResumeLensError::MissingInput(
                "job description is empty".to_string(),
            ));
        }
        if !document.exists() {
            return Err(ResumeLensError::MissingInput(format!(
                "document does not exist: {}",
                document.display()
            )));
        }

        info!("Extracting text from {}", document.display());
        let resume_text = self.input.extract_text(document).await?;
        if resume_text.trim().is_empty() {
            return Err(ResumeLensError::EmptyDocument);
        }

        let request = AnalysisRequest::new(resume_text, job_description.to_string())?;
        let prompt = self.templates.render_analysis(&PromptParams {
            resume_text: request.resume_text.clone(),
            job_description: request.job_description.clone(),
        });

        info!("Requesting analysis completion ({} prompt chars)", prompt.len());
        let raw = self.client.complete(&prompt).await?;

        let result = ResultValidator::parse(&raw)?;
        info!(
            "Analysis completed in {}ms (resume score {:.0})",
            started.elapsed().as_millis(),
            result.resume_score
        );
        Ok(result)
    }

    fn lock_state(&self) -> MutexGuard<'_, AnalysisState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
