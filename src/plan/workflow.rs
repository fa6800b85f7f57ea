//! Section workflow controller.
//!
//! A linear state machine over a [`SectionTemplate`]:
//!
//! ```text
//! NotStarted(-1) --start--> Active(0) --next--> ... --> Active(N-1) --complete--> Done(N)
//! Active(i) --previous--> Active(i-1)    [i > 0]
//! any --reset--> NotStarted(-1)
//! ```
//!
//! Every forward move generates content for the section it lands on. The
//! generation call is awaited before `step` or any content slot changes, and
//! every command takes `&mut self`, so at most one call is ever in flight for
//! a workflow.

use std::time::Duration;

use crate::ai::{GenerationError, GenerationRequest, TextGenerator};

use super::document::{DocumentAccumulator, ExportArtifact, ExportFormat};
use super::error::{ExportError, GenerationFailure, PreconditionFailure};
use super::profile::BusinessProfile;
use super::prompt;
use super::template::SectionTemplate;

/// Default timeout for a single generation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Coarse position of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `step == -1`
    NotStarted,
    /// `0 <= step < N`
    Active(usize),
    /// `step == N`
    Done,
}

/// Result of a workflow command.
#[derive(Debug)]
#[must_use]
pub enum CommandOutcome {
    /// The transition happened and any generation succeeded.
    Applied,
    /// The command was not valid in the current state; nothing changed.
    Ignored(PreconditionFailure),
    /// The transition happened but generation failed; the slot is empty.
    Degraded(GenerationFailure),
}

impl CommandOutcome {
    /// Whether the command was applied cleanly.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Whether the command was rejected as a no-op.
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    /// Whether the state changed, with or without a generation failure.
    pub fn moved(&self) -> bool {
        !self.is_ignored()
    }

    /// The precondition that rejected the command, if any.
    pub fn precondition(&self) -> Option<&PreconditionFailure> {
        match self {
            Self::Ignored(reason) => Some(reason),
            _ => None,
        }
    }

    /// The generation failure, if any.
    pub fn failure(&self) -> Option<&GenerationFailure> {
        match self {
            Self::Degraded(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Drives generation of a plan one section at a time.
pub struct SectionWorkflow {
    template: SectionTemplate,
    generator: Box<dyn TextGenerator>,
    model: String,
    timeout: Duration,
    profile: Option<BusinessProfile>,
    step: isize,
    section_contents: Vec<String>,
    system_instruction: String,
    document: DocumentAccumulator,
}

impl SectionWorkflow {
    /// Create a workflow that has not started yet.
    pub fn new(
        template: SectionTemplate,
        generator: Box<dyn TextGenerator>,
        model: impl Into<String>,
    ) -> Self {
        let section_contents = vec![String::new(); template.len()];
        Self {
            template,
            generator,
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            profile: None,
            step: -1,
            section_contents,
            system_instruction: prompt::system_instruction(),
            document: DocumentAccumulator::new(),
        }
    }

    /// Set the generation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.document = DocumentAccumulator::with_title(title);
        self
    }

    /// Capture the business profile at construction.
    pub fn with_profile(mut self, profile: BusinessProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Capture or replace the business profile.
    ///
    /// The profile is fixed for a plan run, so this only succeeds before
    /// `start` (or after `reset`).
    pub fn set_profile(&mut self, profile: BusinessProfile) -> Result<(), PreconditionFailure> {
        if self.step != -1 {
            return Err(PreconditionFailure::ProfileLocked);
        }
        self.profile = Some(profile);
        Ok(())
    }

    /// Begin generation with the first section.
    pub async fn start(&mut self) -> CommandOutcome {
        if self.step != -1 {
            return CommandOutcome::Ignored(PreconditionFailure::AlreadyStarted { step: self.step });
        }
        if self.profile.is_none() {
            return CommandOutcome::Ignored(PreconditionFailure::MissingProfile);
        }

        tracing::info!(sections = self.template.len(), "Starting plan generation");
        self.advance_to(0).await
    }

    /// Move to the next section and generate it.
    pub async fn next(&mut self) -> CommandOutcome {
        let target = match self.phase() {
            Phase::NotStarted => return CommandOutcome::Ignored(PreconditionFailure::NotStarted),
            Phase::Done => return CommandOutcome::Ignored(PreconditionFailure::AlreadyComplete),
            Phase::Active(index) if index >= self.template.last_index() => {
                return CommandOutcome::Ignored(PreconditionFailure::AtLastSection);
            }
            Phase::Active(index) => index + 1,
        };

        self.advance_to(target).await
    }

    /// Move back one section without regenerating anything.
    pub fn previous(&mut self) -> CommandOutcome {
        match self.phase() {
            Phase::NotStarted => CommandOutcome::Ignored(PreconditionFailure::NotStarted),
            Phase::Done => CommandOutcome::Ignored(PreconditionFailure::AlreadyComplete),
            Phase::Active(0) => CommandOutcome::Ignored(PreconditionFailure::AtFirstSection),
            Phase::Active(_) => {
                self.step -= 1;
                tracing::info!(step = self.step, "Moved to previous section");
                CommandOutcome::Applied
            }
        }
    }

    /// Finish the plan. Only valid on the last section.
    pub fn complete(&mut self) -> CommandOutcome {
        match self.phase() {
            Phase::NotStarted => CommandOutcome::Ignored(PreconditionFailure::NotStarted),
            Phase::Done => CommandOutcome::Ignored(PreconditionFailure::AlreadyComplete),
            Phase::Active(index) if index != self.template.last_index() => {
                CommandOutcome::Ignored(PreconditionFailure::NotAtLastSection {
                    step: self.step,
                    last: self.template.last_index(),
                })
            }
            Phase::Active(_) => {
                self.step = self.template.len() as isize;
                tracing::info!(entries = self.document.len(), "Business plan complete");
                CommandOutcome::Applied
            }
        }
    }

    /// Return to the not-started state, discarding all generated content.
    ///
    /// The captured profile is kept so the plan can be generated again.
    pub fn reset(&mut self) -> CommandOutcome {
        self.step = -1;
        for slot in &mut self.section_contents {
            slot.clear();
        }
        self.document.clear();
        self.system_instruction = prompt::system_instruction();
        tracing::info!("Workflow reset");
        CommandOutcome::Applied
    }

    /// Serialize the finished plan. Only valid once complete.
    pub fn finalize(&self, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        if !self.is_done() {
            return Err(ExportError::NotComplete);
        }
        self.document.finalize(format)
    }

    async fn advance_to(&mut self, index: usize) -> CommandOutcome {
        // Nothing observable changes until the call resolves.
        let result = self.generate(index).await;

        self.step = index as isize;
        let section = self.template.get(index).unwrap_or_default().to_string();

        match result {
            Ok(text) => {
                tracing::info!(
                    step = index,
                    section = %section,
                    chars = text.len(),
                    "Generated section"
                );
                self.section_contents[index].clone_from(&text);
                self.document.supersede_section(section, text);
                CommandOutcome::Applied
            }
            Err(source) => {
                tracing::warn!(
                    step = index,
                    section = %section,
                    error = %source,
                    "Section generation failed"
                );
                self.section_contents[index].clear();
                self.document.remove_section(&section);
                CommandOutcome::Degraded(GenerationFailure { section, source })
            }
        }
    }

    async fn generate(&self, index: usize) -> Result<String, GenerationError> {
        let request = self.request_for(index);

        tracing::debug!(
            provider = self.generator.name(),
            model = %request.model,
            section = %request.section,
            "Requesting section content"
        );

        match tokio::time::timeout(self.timeout, self.generator.generate(&request)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout)),
        }
    }

    /// Build the generation request for the section at `index`.
    pub fn request_for(&self, index: usize) -> GenerationRequest {
        let section = self.template.get(index).unwrap_or_default().to_string();
        let user = self
            .profile
            .as_ref()
            .map(|profile| prompt::section_instruction(&section, profile))
            .unwrap_or_default();

        GenerationRequest {
            model: self.model.clone(),
            system: self.system_instruction.clone(),
            user,
            section,
        }
    }

    // Observables

    /// Raw step: -1 before start, N once complete.
    pub fn step(&self) -> isize {
        self.step
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self.step {
            -1 => Phase::NotStarted,
            s if s >= self.template.len() as isize => Phase::Done,
            s => Phase::Active(s as usize),
        }
    }

    /// Name of the active section.
    pub fn current_section(&self) -> Option<&str> {
        match self.phase() {
            Phase::Active(index) => self.template.get(index),
            _ => None,
        }
    }

    /// Content of the active section.
    pub fn current_content(&self) -> Option<&str> {
        match self.phase() {
            Phase::Active(index) => self.section_contents.get(index).map(String::as_str),
            _ => None,
        }
    }

    /// Content of the section at `index`.
    pub fn content(&self, index: usize) -> Option<&str> {
        self.section_contents.get(index).map(String::as_str)
    }

    /// Content of every section, in template order.
    pub fn section_contents(&self) -> &[String] {
        &self.section_contents
    }

    /// Fraction of the template traversed, for display.
    ///
    /// Computed as `max(0, step) / (N - 1)` and clamped to 1.0. A
    /// single-section template reports 0.0 before start and 1.0 after.
    pub fn progress(&self) -> f64 {
        let last = self.template.last_index();
        if last == 0 {
            return if self.step >= 0 { 1.0 } else { 0.0 };
        }
        (self.step.max(0) as f64 / last as f64).min(1.0)
    }

    /// "Section k of N" while a section is active.
    pub fn caption(&self) -> Option<String> {
        match self.phase() {
            Phase::Active(index) => {
                Some(format!("Section {} of {}", index + 1, self.template.len()))
            }
            _ => None,
        }
    }

    /// Whether `start` would be accepted.
    pub fn can_start(&self) -> bool {
        self.step == -1 && self.profile.is_some()
    }

    /// Whether `previous` would be accepted.
    pub fn can_previous(&self) -> bool {
        matches!(self.phase(), Phase::Active(index) if index > 0)
    }

    /// Whether `next` would be accepted.
    pub fn can_next(&self) -> bool {
        matches!(self.phase(), Phase::Active(index) if index < self.template.last_index())
    }

    /// Whether `complete` would be accepted.
    pub fn can_complete(&self) -> bool {
        matches!(self.phase(), Phase::Active(index) if index == self.template.last_index())
    }

    /// Whether the plan is complete.
    pub fn is_done(&self) -> bool {
        self.phase() == Phase::Done
    }

    /// The section template.
    pub fn template(&self) -> &SectionTemplate {
        &self.template
    }

    /// The captured profile.
    pub fn profile(&self) -> Option<&BusinessProfile> {
        self.profile.as_ref()
    }

    /// The accumulated document.
    pub fn document(&self) -> &DocumentAccumulator {
        &self.document
    }

    /// Model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Name of the text generator in use.
    pub fn provider_name(&self) -> &str {
        self.generator.name()
    }
}

impl std::fmt::Debug for SectionWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionWorkflow")
            .field("provider", &self.generator.name())
            .field("model", &self.model)
            .field("step", &self.step)
            .field("sections", &self.template.len())
            .field("entries", &self.document.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;

    /// Replays canned replies and records every request.
    struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, String>>>,
        requests: Arc<Mutex<Vec<GenerationRequest>>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Result<&str, &str>>) -> (Self, Arc<Mutex<Vec<GenerationRequest>>>) {
            let requests = Arc::new(Mutex::new(Vec::new()));
            let replies = replies
                .into_iter()
                .map(|r| r.map(str::to_string).map_err(str::to_string))
                .collect();
            (Self { replies: Mutex::new(replies), requests: Arc::clone(&requests) }, requests)
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(body)) => Err(GenerationError::Api { status: 500, body }),
                None => Err(GenerationError::EmptyResponse),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    fn profile() -> BusinessProfile {
        BusinessProfile::new("Acme Bikes", "retail", "e-bikes", "urban commuting")
    }

    fn workflow(
        sections: &[&str],
        replies: Vec<Result<&str, &str>>,
    ) -> (SectionWorkflow, Arc<Mutex<Vec<GenerationRequest>>>) {
        let (generator, requests) = ScriptedGenerator::new(replies);
        let template = SectionTemplate::new(sections.iter().copied()).unwrap();
        let workflow =
            SectionWorkflow::new(template, Box::new(generator), "test-model")
                .with_profile(profile());
        (workflow, requests)
    }

    #[tokio::test]
    async fn test_three_section_walkthrough() {
        let (mut wf, _) = workflow(
            &["A", "B", "C"],
            vec![Ok("textA"), Ok("textB"), Ok("textB2"), Ok("textC")],
        );

        assert!(wf.start().await.is_applied());
        assert_eq!(wf.step(), 0);
        assert_eq!(wf.section_contents(), ["textA", "", ""]);

        assert!(wf.next().await.is_applied());
        assert_eq!(wf.step(), 1);
        assert_eq!(wf.section_contents(), ["textA", "textB", ""]);

        assert!(wf.previous().is_applied());
        assert_eq!(wf.step(), 0);
        assert_eq!(wf.section_contents(), ["textA", "textB", ""]);
        assert_eq!(wf.current_content(), Some("textA"));

        assert!(wf.next().await.is_applied());
        assert_eq!(wf.section_contents(), ["textA", "textB2", ""]);

        assert!(wf.next().await.is_applied());
        assert_eq!(wf.step(), 2);

        assert!(wf.complete().is_applied());
        assert_eq!(wf.step(), 3);

        let entries: Vec<_> = wf
            .document()
            .entries()
            .iter()
            .map(|e| (e.heading.as_str(), e.body.as_str()))
            .collect();
        assert_eq!(entries, vec![("A", "textA"), ("B", "textB2"), ("C", "textC")]);

        let artifact = wf.finalize(ExportFormat::Markdown).unwrap();
        let text = String::from_utf8(artifact.bytes).unwrap();
        assert!(text.starts_with("# Business Plan\n"));
        assert!(text.contains("## B\n\ntextB2\n"));
        assert!(!text.contains("textB\n"));
    }

    #[tokio::test]
    async fn test_failed_start_still_advances() {
        let (mut wf, _) = workflow(&["A", "B", "C"], vec![Err("boom"), Ok("textB")]);

        let outcome = wf.start().await;
        let failure = outcome.failure().expect("generation failure");
        assert_eq!(failure.section, "A");
        assert!(failure.to_string().contains("boom"));

        assert_eq!(wf.step(), 0);
        assert_eq!(wf.section_contents(), ["", "", ""]);
        assert!(wf.document().is_empty());
        assert!(wf.can_next());

        assert!(wf.next().await.is_applied());
        assert_eq!(wf.step(), 1);
        assert_eq!(wf.document().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_regeneration_clears_slot() {
        let (mut wf, _) = workflow(&["A", "B"], vec![Ok("textA"), Ok("textB"), Err("down")]);

        let _ = wf.start().await;
        let _ = wf.next().await;
        let _ = wf.previous();
        let outcome = wf.next().await;

        assert!(outcome.failure().is_some());
        assert_eq!(wf.step(), 1);
        assert_eq!(wf.content(1), Some(""));
        assert!((wf.document().len() as isize) < wf.step() + 1);

        assert!(wf.complete().is_applied());
        let artifact = wf.finalize(ExportFormat::Markdown).unwrap();
        let text = String::from_utf8(artifact.bytes).unwrap();
        assert_eq!(text, "# Business Plan\n\n## A\n\ntextA\n");
        assert!(!text.contains("textB"));
    }

    #[tokio::test]
    async fn test_start_without_profile_is_ignored() {
        let (generator, requests) = ScriptedGenerator::new(vec![Ok("textA")]);
        let mut wf =
            SectionWorkflow::new(SectionTemplate::default(), Box::new(generator), "test-model");

        let outcome = wf.start().await;
        assert_eq!(outcome.precondition(), Some(&PreconditionFailure::MissingProfile));
        assert_eq!(wf.step(), -1);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_start_twice_is_ignored() {
        let (mut wf, requests) = workflow(&["A", "B"], vec![Ok("textA"), Ok("again")]);

        let _ = wf.start().await;
        let outcome = wf.start().await;

        assert!(outcome.is_ignored());
        assert_eq!(wf.step(), 0);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_next_rejected_on_last_section() {
        let (mut wf, requests) = workflow(&["A", "B"], vec![Ok("textA"), Ok("textB"), Ok("x")]);

        let _ = wf.start().await;
        let _ = wf.next().await;
        let outcome = wf.next().await;

        assert_eq!(outcome.precondition(), Some(&PreconditionFailure::AtLastSection));
        assert_eq!(wf.step(), 1);
        assert_eq!(requests.lock().unwrap().len(), 2);
        assert!(wf.can_complete());
    }

    #[tokio::test]
    async fn test_previous_rejected_on_first_section() {
        let (mut wf, _) = workflow(&["A", "B"], vec![Ok("textA")]);

        assert_eq!(wf.previous().precondition(), Some(&PreconditionFailure::NotStarted));
        let _ = wf.start().await;
        assert_eq!(wf.previous().precondition(), Some(&PreconditionFailure::AtFirstSection));
        assert_eq!(wf.step(), 0);
    }

    #[tokio::test]
    async fn test_complete_only_from_last_section() {
        let (mut wf, _) = workflow(&["A", "B"], vec![Ok("textA"), Ok("textB")]);

        let _ = wf.start().await;
        assert!(wf.complete().is_ignored());
        assert_eq!(wf.step(), 0);

        let _ = wf.next().await;
        assert!(wf.complete().is_applied());
        assert!(wf.is_done());
        assert!(wf.complete().is_ignored());
        assert!(wf.previous().is_ignored());
        assert!(wf.next().await.is_ignored());
    }

    #[tokio::test]
    async fn test_regenerate_reuses_request_shape() {
        let (mut wf, requests) =
            workflow(&["A", "B", "C"], vec![Ok("textA"), Ok("textB"), Ok("textB2")]);

        let _ = wf.start().await;
        let _ = wf.next().await;
        let _ = wf.previous();
        let _ = wf.next().await;

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1], requests[2]);
        assert_eq!(requests[1].section, "B");
        assert_eq!(requests[0].system, requests[2].system);
        assert!(requests[1].user.contains("'B' section for Acme Bikes"));
    }

    #[tokio::test]
    async fn test_contents_never_ahead_of_step() {
        let replies = vec![Ok("1"), Ok("2"), Ok("3"), Ok("4"), Ok("5"), Ok("6")];
        let (mut wf, _) = workflow(&["A", "B", "C", "D"], replies);

        let check = |wf: &SectionWorkflow| {
            for (i, content) in wf.section_contents().iter().enumerate() {
                if i as isize > wf.step() {
                    assert!(content.is_empty(), "slot {i} filled ahead of step {}", wf.step());
                }
            }
            assert!((-1..=4).contains(&wf.step()));
        };

        check(&wf);
        let _ = wf.start().await;
        check(&wf);
        let _ = wf.next().await;
        check(&wf);
        let _ = wf.previous();
        check(&wf);
        let _ = wf.next().await;
        let _ = wf.next().await;
        let _ = wf.next().await;
        check(&wf);
        let _ = wf.complete();
        check(&wf);
    }

    #[tokio::test]
    async fn test_reset_matches_fresh_workflow() {
        let (mut wf, _) = workflow(&["A", "B"], vec![Ok("textA"), Ok("textB")]);
        let (fresh, _) = workflow(&["A", "B"], vec![]);

        let _ = wf.start().await;
        let _ = wf.next().await;
        let _ = wf.complete();
        assert!(wf.reset().is_applied());

        assert_eq!(wf.step(), fresh.step());
        assert_eq!(wf.section_contents(), fresh.section_contents());
        assert_eq!(wf.document(), fresh.document());
        assert_eq!(wf.progress(), fresh.progress());
        assert_eq!(wf.current_section(), None);
        assert!(wf.can_start());
    }

    #[tokio::test]
    async fn test_profile_locked_after_start() {
        let (mut wf, _) = workflow(&["A"], vec![Ok("textA")]);
        assert!(wf.set_profile(profile()).is_ok());

        let _ = wf.start().await;
        assert_eq!(wf.set_profile(profile()), Err(PreconditionFailure::ProfileLocked));

        let _ = wf.reset();
        assert!(wf.set_profile(profile()).is_ok());
    }

    #[tokio::test]
    async fn test_finalize_requires_completion() {
        let (mut wf, _) = workflow(&["A"], vec![Ok("textA")]);

        assert!(matches!(wf.finalize(ExportFormat::Markdown), Err(ExportError::NotComplete)));
        let _ = wf.start().await;
        assert!(matches!(wf.finalize(ExportFormat::Markdown), Err(ExportError::NotComplete)));
        let _ = wf.complete();

        let artifact = wf.finalize(ExportFormat::Markdown).unwrap();
        assert_eq!(artifact.filename, "business_plan.md");
        assert_eq!(
            String::from_utf8(artifact.bytes).unwrap(),
            "# Business Plan\n\n## A\n\ntextA\n"
        );
    }

    #[tokio::test]
    async fn test_progress_and_caption() {
        let (mut wf, _) = workflow(&["A", "B", "C"], vec![Ok("a"), Ok("b"), Ok("c")]);

        assert_eq!(wf.progress(), 0.0);
        assert_eq!(wf.caption(), None);

        let _ = wf.start().await;
        assert_eq!(wf.progress(), 0.0);
        assert_eq!(wf.caption().as_deref(), Some("Section 1 of 3"));
        assert_eq!(wf.current_section(), Some("A"));

        let _ = wf.next().await;
        assert_eq!(wf.progress(), 0.5);

        let _ = wf.next().await;
        assert_eq!(wf.progress(), 1.0);

        let _ = wf.complete();
        assert_eq!(wf.progress(), 1.0);
        assert_eq!(wf.current_section(), None);
    }

    #[tokio::test]
    async fn test_single_section_template() {
        let (mut wf, _) = workflow(&["Only"], vec![Ok("text")]);

        assert_eq!(wf.progress(), 0.0);
        let _ = wf.start().await;
        assert_eq!(wf.progress(), 1.0);
        assert!(!wf.can_next());
        assert!(wf.can_complete());
        assert!(wf.next().await.is_ignored());
        assert!(wf.complete().is_applied());
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let template = SectionTemplate::new(["A", "B"]).unwrap();
        let mut wf = SectionWorkflow::new(template, Box::new(SlowGenerator), "test-model")
            .with_profile(profile())
            .with_timeout(Duration::from_millis(20));

        let outcome = wf.start().await;
        let failure = outcome.failure().expect("timeout failure");
        assert!(matches!(failure.source, GenerationError::Timeout(_)));
        assert_eq!(wf.step(), 0);
        assert!(wf.document().is_empty());
    }
}
