//! One pipeline stage: model call, retry, parse, fallback.

use crate::{RetryPolicy, SceneFallback, parse, prompts};
use quill_core::{
    Brief, Draft, FailureCause, GenerationConfig, Plan, ProjectContext, StageFailure, StageName,
    StageReport,
};
use quill_error::{ModelError, ModelErrorKind};
use quill_models::{ModelClient, ModelRequest, ModelResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Whether a run may use the model at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// AI turned off in configuration; no failure is recorded
    Disabled,
    /// Pre-run probe failed; every stage records this failure
    Unavailable(StageFailure),
    /// Stages call the model
    Available,
}

/// Stage output plus what happened producing it.
#[derive(Debug, Clone)]
pub struct StageOutcome<T> {
    /// The stage output
    pub output: T,
    /// Report entry for the stage
    pub report: StageReport,
}

/// What makes Planner, Writer and Editor different from each other.
pub trait StageRole: Send + Sync {
    /// Owned input handed to the stage.
    type Input: Send + Sync;
    /// Stage output.
    type Output: Send;

    /// Which stage this is.
    fn stage(&self) -> StageName;

    /// Prompt for the model.
    fn prompt(&self, input: &Self::Input, context: &ProjectContext) -> String;

    /// Interpret raw model text.
    fn parse(
        &self,
        input: &Self::Input,
        raw: &str,
        config: &GenerationConfig,
    ) -> Result<Self::Output, StageFailure>;

    /// Rule-based output. Never fails.
    fn fallback(&self, input: &Self::Input) -> Self::Output;
}

/// Brief to plan.
#[derive(Clone)]
pub struct PlannerRole {
    fallback: Arc<dyn SceneFallback>,
}

/// Input for the Writer.
#[derive(Debug, Clone)]
pub struct WriterInput {
    /// The scene request
    pub brief: Brief,
    /// Plan to follow
    pub plan: Plan,
}

/// Brief plus plan to draft.
#[derive(Clone)]
pub struct WriterRole {
    fallback: Arc<dyn SceneFallback>,
}

/// Input for the Editor.
#[derive(Debug, Clone)]
pub struct EditorInput {
    /// The scene request
    pub brief: Brief,
    /// Draft to polish
    pub draft: Draft,
}

/// Draft to final text.
#[derive(Clone)]
pub struct EditorRole {
    fallback: Arc<dyn SceneFallback>,
}

impl PlannerRole {
    /// Planner backed by `fallback`.
    pub fn new(fallback: Arc<dyn SceneFallback>) -> Self {
        Self { fallback }
    }
}

impl WriterRole {
    /// Writer backed by `fallback`.
    pub fn new(fallback: Arc<dyn SceneFallback>) -> Self {
        Self { fallback }
    }
}

impl EditorRole {
    /// Editor backed by `fallback`.
    pub fn new(fallback: Arc<dyn SceneFallback>) -> Self {
        Self { fallback }
    }
}

impl StageRole for PlannerRole {
    type Input = Brief;
    type Output = Plan;

    fn stage(&self) -> StageName {
        StageName::Planner
    }

    fn prompt(&self, brief: &Brief, context: &ProjectContext) -> String {
        prompts::planner_prompt(brief, context)
    }

    fn parse(
        &self,
        brief: &Brief,
        raw: &str,
        _config: &GenerationConfig,
    ) -> Result<Plan, StageFailure> {
        let default_tone = brief
            .hints()
            .mood()
            .as_deref()
            .filter(|mood| !mood.trim().is_empty())
            .unwrap_or("neutro");
        let beats = parse::parse_beats(raw, default_tone)?;
        Ok(Plan::new(beats, quill_core::Provenance::Ai))
    }

    fn fallback(&self, brief: &Brief) -> Plan {
        self.fallback.plan(brief)
    }
}

impl StageRole for WriterRole {
    type Input = WriterInput;
    type Output = Draft;

    fn stage(&self) -> StageName {
        StageName::Writer
    }

    fn prompt(&self, input: &WriterInput, context: &ProjectContext) -> String {
        prompts::writer_prompt(&input.brief, &input.plan, context)
    }

    fn parse(
        &self,
        _input: &WriterInput,
        raw: &str,
        config: &GenerationConfig,
    ) -> Result<Draft, StageFailure> {
        let text = parse::parse_prose(raw, config.min_response_chars())?;
        Ok(Draft::new(text, quill_core::Provenance::Ai))
    }

    fn fallback(&self, input: &WriterInput) -> Draft {
        self.fallback.write(&input.brief, &input.plan)
    }
}

impl StageRole for EditorRole {
    type Input = EditorInput;
    type Output = String;

    fn stage(&self) -> StageName {
        StageName::Editor
    }

    fn prompt(&self, input: &EditorInput, context: &ProjectContext) -> String {
        prompts::editor_prompt(&input.brief, &input.draft, context)
    }

    fn parse(
        &self,
        _input: &EditorInput,
        raw: &str,
        config: &GenerationConfig,
    ) -> Result<String, StageFailure> {
        parse::parse_prose(raw, config.min_response_chars())
    }

    fn fallback(&self, input: &EditorInput) -> String {
        self.fallback.edit(&input.draft)
    }
}

/// Map a classified model error onto a report cause.
pub fn failure_from_model_error(error: &ModelError) -> StageFailure {
    let (cause, detail) = match &error.kind {
        ModelErrorKind::Unreachable(detail) => (FailureCause::Unreachable, detail),
        ModelErrorKind::MalformedResponse(detail) => (FailureCause::MalformedResponse, detail),
        ModelErrorKind::ModelNotFound(detail) => (FailureCause::ModelNotFound, detail),
        ModelErrorKind::Unknown(detail) => (FailureCause::Unknown, detail),
    };
    StageFailure::new(cause, detail.clone())
}

/// Runs a role against the model with retry, falling back on failure.
pub struct AgentStage<R: StageRole> {
    role: R,
    client: Arc<dyn ModelClient>,
    config: Arc<GenerationConfig>,
    context: Arc<ProjectContext>,
    policy: RetryPolicy,
}

impl<R: StageRole> AgentStage<R> {
    /// Create a stage. The retry policy comes from `config`.
    pub fn new(
        role: R,
        client: Arc<dyn ModelClient>,
        config: Arc<GenerationConfig>,
        context: Arc<ProjectContext>,
    ) -> Self {
        let policy = RetryPolicy::from_settings(config.retry());
        Self {
            role,
            client,
            config,
            context,
            policy,
        }
    }

    /// Produce the stage output. Always returns an output.
    #[instrument(skip_all, fields(stage = %self.role.stage()))]
    pub async fn run(&self, input: R::Input, availability: &Availability) -> StageOutcome<R::Output> {
        let started = Instant::now();
        let stage = self.role.stage();

        match availability {
            Availability::Disabled => {
                debug!("AI disabled, using fallback");
                return self.fall_back(&input, started, 0, None);
            }
            Availability::Unavailable(failure) => {
                debug!(cause = %failure.cause(), "Model unavailable, using fallback");
                return self.fall_back(&input, started, 0, Some(failure.clone()));
            }
            Availability::Available => {}
        }

        let tuning = self.config.stages().for_stage(stage);
        let request = match ModelRequest::new(
            self.role.prompt(&input, &self.context),
            self.config.timeout(),
        ) {
            Ok(request) => request
                .with_max_tokens(*tuning.max_tokens())
                .with_temperature(*tuning.temperature()),
            Err(e) => {
                let failure = StageFailure::new(FailureCause::Unknown, e.to_string());
                return self.fall_back(&input, started, 0, Some(failure));
            }
        };

        let attempts = AtomicU32::new(0);
        let (counter, request, input_ref) = (&attempts, &request, &input);
        let result = self
            .policy
            .execute(move || async move {
                let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(attempt, "Calling model");
                match self.client.call(request).await {
                    ModelResult::Success(raw) => self.role.parse(input_ref, &raw, &self.config),
                    ModelResult::Timeout => Err(StageFailure::new(
                        FailureCause::Timeout,
                        format!("no answer within {}s", request.timeout().as_secs()),
                    )),
                    ModelResult::Error(e) => Err(failure_from_model_error(&e)),
                }
            })
            .await;
        let attempts = attempts.load(Ordering::SeqCst);

        match result {
            Ok(output) => {
                let report = StageReport::ai(stage, started.elapsed(), attempts);
                info!(
                    path = "ai",
                    attempts,
                    latency_ms = report.latency().as_millis() as u64,
                    "Stage complete"
                );
                StageOutcome { output, report }
            }
            Err(failure) => self.fall_back(&input, started, attempts, Some(failure)),
        }
    }

    fn fall_back(
        &self,
        input: &R::Input,
        started: Instant,
        attempts: u32,
        error: Option<StageFailure>,
    ) -> StageOutcome<R::Output> {
        let output = self.role.fallback(input);
        let report = StageReport::fallback(self.role.stage(), started.elapsed(), attempts, error);
        info!(
            path = "fallback",
            attempts,
            cause = ?report.cause(),
            latency_ms = report.latency().as_millis() as u64,
            "Stage complete"
        );
        StageOutcome { output, report }
    }
}
