//! Sequences Planner, Writer and Editor into one generation run.

use crate::{
    Availability, AgentStage, EditorInput, EditorRole, FallbackGenerator, PlannerRole,
    SceneFallback, StageOutcome, WriterInput, WriterRole, placeholder_plan, placeholder_prose,
};
use quill_core::{
    Brief, Draft, FailureCause, FinalScene, GenerationConfig, GenerationReport, GenerationTrace,
    Plan, ProjectContext, Provenance, StageFailure, StageName, StageReport,
};
use quill_error::{PipelineError, PipelineErrorKind, QuillResult};
use quill_models::{ModelClient, ProbeOutcome};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument, warn};

/// Runs the three-stage pipeline for a brief.
///
/// Every stage either uses the model's output or the deterministic
/// fallback, so a valid brief always produces a scene.
///
/// # Examples
///
/// ```no_run
/// use quill_core::{Brief, GenerationConfig};
/// use quill_models::OllamaClient;
/// use quill_narrative::PipelineOrchestrator;
/// use std::sync::Arc;
///
/// # async fn example() -> quill_error::QuillResult<()> {
/// let config = GenerationConfig::default();
/// let client = Arc::new(OllamaClient::from_config(config.provider())?);
/// let orchestrator = PipelineOrchestrator::new(client, config);
/// let scene = orchestrator
///     .generate(&Brief::new("Um encontro tenso no MASP, noite chuvosa"))
///     .await?;
/// println!("{}", scene.content());
/// # Ok(())
/// # }
/// ```
pub struct PipelineOrchestrator {
    client: Arc<dyn ModelClient>,
    config: Arc<GenerationConfig>,
    planner: AgentStage<PlannerRole>,
    writer: AgentStage<WriterRole>,
    editor: AgentStage<EditorRole>,
}

/// Assembles a [`PipelineOrchestrator`] with optional context and fallback.
pub struct PipelineBuilder {
    client: Arc<dyn ModelClient>,
    config: GenerationConfig,
    context: ProjectContext,
    fallback: Arc<dyn SceneFallback>,
}

impl PipelineBuilder {
    /// Project context pasted into every prompt.
    pub fn context(mut self, context: ProjectContext) -> Self {
        self.context = context;
        self
    }

    /// Replace the rule-based fallback.
    pub fn fallback(mut self, fallback: Arc<dyn SceneFallback>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Build the orchestrator.
    pub fn build(self) -> PipelineOrchestrator {
        let config = Arc::new(self.config);
        let context = Arc::new(self.context);
        let stage = |client: &Arc<dyn ModelClient>| {
            (Arc::clone(client), Arc::clone(&config), Arc::clone(&context))
        };

        let (client, cfg, ctx) = stage(&self.client);
        let planner = AgentStage::new(PlannerRole::new(Arc::clone(&self.fallback)), client, cfg, ctx);
        let (client, cfg, ctx) = stage(&self.client);
        let writer = AgentStage::new(WriterRole::new(Arc::clone(&self.fallback)), client, cfg, ctx);
        let (client, cfg, ctx) = stage(&self.client);
        let editor = AgentStage::new(EditorRole::new(self.fallback), client, cfg, ctx);

        PipelineOrchestrator {
            client: self.client,
            config,
            planner,
            writer,
            editor,
        }
    }
}

impl PipelineOrchestrator {
    /// Orchestrator with empty project context and the default fallback.
    pub fn new(client: Arc<dyn ModelClient>, config: GenerationConfig) -> Self {
        Self::builder(client, config).build()
    }

    /// Start building an orchestrator.
    pub fn builder(client: Arc<dyn ModelClient>, config: GenerationConfig) -> PipelineBuilder {
        PipelineBuilder {
            client,
            config,
            context: ProjectContext::default(),
            fallback: Arc::new(FallbackGenerator),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate a scene.
    ///
    /// # Errors
    ///
    /// Only an invalid brief fails. Model failures are absorbed by the fallback.
    pub async fn generate(&self, brief: &Brief) -> QuillResult<FinalScene> {
        Ok(self.run(brief, None).await?.into_scene())
    }

    /// Generate a scene and keep the intermediate plan and draft.
    pub async fn generate_traced(&self, brief: &Brief) -> QuillResult<GenerationTrace> {
        self.run(brief, None).await
    }

    /// Generate a scene, stopping between stages once `cancel` is set.
    ///
    /// # Errors
    ///
    /// Returns a cancellation error naming the last completed stage.
    pub async fn generate_with_cancel(
        &self,
        brief: &Brief,
        cancel: &AtomicBool,
    ) -> QuillResult<FinalScene> {
        Ok(self.run(brief, Some(cancel)).await?.into_scene())
    }

    /// Cancellable variant of [`generate_traced`](Self::generate_traced).
    pub async fn generate_traced_with_cancel(
        &self,
        brief: &Brief,
        cancel: &AtomicBool,
    ) -> QuillResult<GenerationTrace> {
        self.run(brief, Some(cancel)).await
    }

    /// Decide once per run whether stages may call the model.
    #[instrument(skip(self), fields(provider = self.client.provider_name(), model = self.client.model_name()))]
    pub async fn availability(&self) -> Availability {
        if !self.config.ai_enabled() {
            return Availability::Disabled;
        }
        if !self.config.probe_before_run() {
            return Availability::Available;
        }
        match self.client.probe().await {
            ProbeOutcome::Ready => Availability::Available,
            ProbeOutcome::ModelMissing { available } => {
                warn!(?available, "Configured model is not installed");
                Availability::Unavailable(StageFailure::new(
                    FailureCause::ModelNotFound,
                    format!(
                        "model '{}' not installed; available: {}",
                        self.client.model_name(),
                        available.join(", ")
                    ),
                ))
            }
            ProbeOutcome::Unreachable(detail) => {
                warn!(%detail, "Model server unreachable");
                Availability::Unavailable(StageFailure::new(FailureCause::Unreachable, detail))
            }
        }
    }

    #[instrument(skip_all, fields(brief_chars = brief.text().chars().count()))]
    async fn run(&self, brief: &Brief, cancel: Option<&AtomicBool>) -> QuillResult<GenerationTrace> {
        brief.validate()?;
        let availability = self.availability().await;
        let mut report = GenerationReport::default();

        let planned = self.planner.run(brief.clone(), &availability).await;
        let (plan, entry) = settle(planned, Plan::is_well_formed, placeholder_plan);
        report.record(entry)?;
        check_cancel(cancel, StageName::Planner)?;

        let written = self
            .writer
            .run(
                WriterInput {
                    brief: brief.clone(),
                    plan: plan.clone(),
                },
                &availability,
            )
            .await;
        let (draft, entry) = settle(written, Draft::is_well_formed, || {
            Draft::new(placeholder_prose(), Provenance::Fallback)
        });
        report.record(entry)?;
        check_cancel(cancel, StageName::Writer)?;

        let edited = self
            .editor
            .run(
                EditorInput {
                    brief: brief.clone(),
                    draft: draft.clone(),
                },
                &availability,
            )
            .await;
        let (content, entry) = settle(edited, |text: &String| !text.trim().is_empty(), || {
            placeholder_prose().to_string()
        });
        let provenance = *entry.path();
        report.record(entry)?;

        info!(
            ai_stages = report.ai_stage_count(),
            total_ms = report.total_latency().as_millis() as u64,
            "Generation complete"
        );

        let scene = FinalScene::new(content, provenance, report);
        Ok(GenerationTrace::new(plan, draft, scene))
    }
}

/// Keep a well-formed output, or substitute a minimal one and record why.
fn settle<T>(
    outcome: StageOutcome<T>,
    is_well_formed: impl Fn(&T) -> bool,
    substitute: impl FnOnce() -> T,
) -> (T, StageReport) {
    let StageOutcome { output, report } = outcome;
    if is_well_formed(&output) {
        return (output, report);
    }
    warn!(stage = %report.stage(), "Stage produced malformed output, substituting placeholder");
    let entry = StageReport::fallback(
        *report.stage(),
        *report.latency(),
        *report.attempts(),
        Some(StageFailure::new(
            FailureCause::FallbackExhausted,
            "stage output was empty or malformed",
        )),
    );
    (substitute(), entry)
}

fn check_cancel(cancel: Option<&AtomicBool>, completed: StageName) -> Result<(), PipelineError> {
    match cancel {
        Some(flag) if flag.load(Ordering::SeqCst) => {
            info!(after = %completed, "Generation cancelled");
            Err(PipelineError::new(PipelineErrorKind::Cancelled {
                after: completed.to_string(),
            }))
        }
        _ => Ok(()),
    }
}
