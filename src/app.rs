//! Application state for the interactive plan builder.
//!
//! The `App` struct holds everything the TUI renders: the credential setup
//! form, the business profile form, and the [`SectionWorkflow`] that produces
//! the plan. Key handlers only queue workflow commands; the event loop runs
//! them so the "Generating..." status is on screen while a call is in flight.

use std::path::PathBuf;

use anyhow::Context;

use crate::ai::generator_from_config;
use crate::core::Config;
use crate::plan::{BusinessProfile, CommandOutcome, SectionWorkflow};
use crate::tui::Theme;

/// Current screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Credential and model entry
    Setup,
    /// Business profile form
    Profile,
    /// Section-by-section generation
    Plan,
    /// Keyboard shortcuts overlay
    Help,
}

/// A workflow command queued by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowCommand {
    Start,
    Next,
    Previous,
    Complete,
    Reset,
}

impl WorkflowCommand {
    /// Whether the command calls the text generator.
    pub fn generates(self) -> bool {
        matches!(self, Self::Start | Self::Next)
    }
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Fields of the profile form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Industry,
    CoreProduct,
    ProblemSolved,
    AdditionalInfo,
}

impl ProfileField {
    /// All fields in display order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Industry,
        Self::CoreProduct,
        Self::ProblemSolved,
        Self::AdditionalInfo,
    ];

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Business Name",
            Self::Industry => "Industry",
            Self::CoreProduct => "Core Product or Service",
            Self::ProblemSolved => "Problem Solved",
            Self::AdditionalInfo => "Additional Information",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// The following field, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The preceding field, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether this is the last field of the form.
    pub fn is_last(self) -> bool {
        self == Self::AdditionalInfo
    }
}

/// Fields of the setup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    ApiKey,
    Model,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Application configuration
    pub config: Config,

    /// Plan workflow, available once a generator could be built
    pub workflow: Option<SectionWorkflow>,

    /// Current screen
    pub mode: AppMode,

    /// Screen to return to when help is dismissed
    pub previous_mode: AppMode,

    /// Profile being edited
    pub profile_form: BusinessProfile,

    /// Focused profile field
    pub profile_focus: ProfileField,

    /// API key typed into the setup form
    pub api_key_input: String,

    /// Model typed into the setup form
    pub model_input: String,

    /// Focused setup field
    pub setup_focus: SetupField,

    /// Status bar message
    pub status: Option<StatusMessage>,

    /// Scroll offset of the section content view
    pub content_scroll: u16,

    /// Command waiting to be run by the event loop
    pub pending: Option<WorkflowCommand>,

    /// Path of the last exported plan
    pub last_export: Option<PathBuf>,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Current theme
    pub theme: Theme,
}

impl App {
    /// Create the application from configuration.
    ///
    /// Opens the setup form when no usable credential is configured,
    /// otherwise goes straight to the profile form.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let ready = config.validate().is_ok();
        let workflow = if ready { Some(build_workflow(&config)?) } else { None };

        let mut app = Self::with_parts(config, workflow);
        if !ready {
            app.mode = AppMode::Setup;
            app.set_status(
                "Enter your API key and model to get started.",
                StatusLevel::Info,
            );
        }
        Ok(app)
    }

    /// Create the application around an existing workflow.
    pub fn with_workflow(config: Config, workflow: SectionWorkflow) -> Self {
        Self::with_parts(config, Some(workflow))
    }

    fn with_parts(config: Config, workflow: Option<SectionWorkflow>) -> Self {
        let theme = Theme::from_config(&config.ui.theme);
        let model_input = config.ai.model.clone();
        let profile_form = workflow
            .as_ref()
            .and_then(|w| w.profile().cloned())
            .unwrap_or_default();

        Self {
            config,
            workflow,
            mode: AppMode::Profile,
            previous_mode: AppMode::Profile,
            profile_form,
            profile_focus: ProfileField::Name,
            api_key_input: String::new(),
            model_input,
            setup_focus: SetupField::ApiKey,
            status: None,
            content_scroll: 0,
            pending: None,
            last_export: None,
            should_quit: false,
            theme,
        }
    }

    /// Set the status message.
    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage { text: message.into(), level });
    }

    /// Clear the status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Show the help overlay.
    pub fn show_help(&mut self) {
        if self.mode != AppMode::Help {
            self.previous_mode = self.mode;
            self.mode = AppMode::Help;
        }
    }

    /// Dismiss the help overlay.
    pub fn dismiss_help(&mut self) {
        if self.mode == AppMode::Help {
            self.mode = self.previous_mode;
        }
    }

    /// Text of the focused form field.
    pub fn focused_input(&self) -> &str {
        match self.mode {
            AppMode::Setup => match self.setup_focus {
                SetupField::ApiKey => &self.api_key_input,
                SetupField::Model => &self.model_input,
            },
            _ => profile_value(&self.profile_form, self.profile_focus),
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.mode {
            AppMode::Setup => Some(match self.setup_focus {
                SetupField::ApiKey => &mut self.api_key_input,
                SetupField::Model => &mut self.model_input,
            }),
            AppMode::Profile => Some(profile_value_mut(&mut self.profile_form, self.profile_focus)),
            _ => None,
        }
    }

    /// Type a character into the focused field.
    pub fn enter_char(&mut self, c: char) {
        if let Some(input) = self.focused_input_mut() {
            input.push(c);
        }
    }

    /// Delete the last character of the focused field.
    pub fn delete_char(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.pop();
        }
    }

    /// Move focus to the next form field.
    pub fn focus_next(&mut self) {
        match self.mode {
            AppMode::Setup => self.toggle_setup_focus(),
            AppMode::Profile => self.profile_focus = self.profile_focus.next(),
            _ => {}
        }
    }

    /// Move focus to the previous form field.
    pub fn focus_previous(&mut self) {
        match self.mode {
            AppMode::Setup => self.toggle_setup_focus(),
            AppMode::Profile => self.profile_focus = self.profile_focus.previous(),
            _ => {}
        }
    }

    fn toggle_setup_focus(&mut self) {
        self.setup_focus = match self.setup_focus {
            SetupField::ApiKey => SetupField::Model,
            SetupField::Model => SetupField::ApiKey,
        };
    }

    /// Apply the setup form and build the workflow.
    pub fn submit_setup(&mut self) {
        let key = self.api_key_input.trim();
        if !key.is_empty() {
            self.config.ai.api_key = Some(key.to_string());
        }
        let model = self.model_input.trim();
        if !model.is_empty() {
            self.config.ai.model = model.to_string();
        }

        if let Err(e) = self.config.validate() {
            self.set_status(e.to_string(), StatusLevel::Warning);
            return;
        }

        match build_workflow(&self.config) {
            Ok(workflow) => {
                tracing::debug!(model = %self.config.ai.model, "Setup complete");
                self.workflow = Some(workflow);
                self.api_key_input.clear();
                self.mode = AppMode::Profile;
                self.set_status("Describe your business.", StatusLevel::Info);
            }
            Err(e) => self.set_status(format!("{e:#}"), StatusLevel::Error),
        }
    }

    /// Capture the profile form into the workflow.
    pub fn submit_profile(&mut self) {
        if let Err(e) = self.profile_form.validate() {
            self.set_status(
                format!("Please fill in all required fields ({e})."),
                StatusLevel::Warning,
            );
            return;
        }

        let Some(workflow) = self.workflow.as_mut() else {
            self.mode = AppMode::Setup;
            return;
        };

        match workflow.set_profile(self.profile_form.clone()) {
            Ok(()) => {
                self.mode = AppMode::Plan;
                self.set_status("Press g to generate the first section.", StatusLevel::Info);
            }
            Err(reason) => {
                self.mode = AppMode::Plan;
                self.set_status(reason.to_string(), StatusLevel::Warning);
            }
        }
    }

    /// Return to the profile form.
    pub fn edit_profile(&mut self) {
        if self.workflow.as_ref().is_some_and(|w| w.step() != -1) {
            self.set_status("Reset the plan (r) before editing the profile.", StatusLevel::Warning);
            return;
        }
        self.mode = AppMode::Profile;
    }

    /// Queue a workflow command for the event loop.
    pub fn request(&mut self, command: WorkflowCommand) {
        if command.generates() {
            let target = self.workflow.as_ref().and_then(|w| {
                let allowed = match command {
                    WorkflowCommand::Start => w.can_start(),
                    _ => w.can_next(),
                };
                if !allowed {
                    return None;
                }
                let index = if command == WorkflowCommand::Start { 0 } else { w.step() + 1 };
                usize::try_from(index).ok().and_then(|i| w.template().get(i)).map(str::to_string)
            });
            if let Some(section) = target {
                self.set_status(format!("Generating {section}..."), StatusLevel::Info);
            }
        }
        self.pending = Some(command);
    }

    /// Run a queued command, if any.
    pub async fn run_pending(&mut self) {
        if let Some(command) = self.pending.take() {
            self.execute(command).await;
        }
    }

    /// Run a workflow command and report its outcome in the status bar.
    pub async fn execute(&mut self, command: WorkflowCommand) {
        let Some(workflow) = self.workflow.as_mut() else {
            self.set_status("Finish setup first.", StatusLevel::Warning);
            return;
        };

        let outcome = match command {
            WorkflowCommand::Start => workflow.start().await,
            WorkflowCommand::Next => workflow.next().await,
            WorkflowCommand::Previous => workflow.previous(),
            WorkflowCommand::Complete => workflow.complete(),
            WorkflowCommand::Reset => workflow.reset(),
        };
        let section = workflow.current_section().map(str::to_string);
        let step = workflow.step();

        if outcome.moved() {
            self.content_scroll = 0;
        }

        match outcome {
            CommandOutcome::Applied => {
                let message = match (command, section) {
                    (WorkflowCommand::Complete, _) => {
                        "Business plan complete. Press s to save it.".to_string()
                    }
                    (WorkflowCommand::Reset, _) => {
                        self.last_export = None;
                        self.mode = AppMode::Profile;
                        "Plan reset.".to_string()
                    }
                    (WorkflowCommand::Previous, Some(section)) => format!("Back to {section}."),
                    (_, Some(section)) => format!("Generated {section}."),
                    (_, None) => String::new(),
                };
                self.set_status(message, StatusLevel::Success);
            }
            CommandOutcome::Ignored(reason) => {
                tracing::debug!(?command, %reason, "Command ignored");
                self.set_status(reason.to_string(), StatusLevel::Warning);
            }
            CommandOutcome::Degraded(failure) => {
                tracing::warn!(?command, error = %failure, "Generation failed");
                let hint = if step == 0 {
                    "Press r to reset, then g to retry."
                } else {
                    "Press p then n to retry."
                };
                self.set_status(format!("{failure}. {hint}"), StatusLevel::Error);
            }
        }
    }

    /// Export the finished plan to the configured output directory.
    pub fn export(&mut self) -> Option<PathBuf> {
        let workflow = self.workflow.as_ref()?;

        let written = workflow
            .finalize(self.config.plan.format)
            .and_then(|artifact| artifact.write_to(&self.config.plan.output_dir));

        match written {
            Ok(path) => {
                self.set_status(format!("Saved {}", path.display()), StatusLevel::Success);
                self.last_export = Some(path.clone());
                Some(path)
            }
            Err(e) => {
                self.set_status(e.to_string(), StatusLevel::Error);
                None
            }
        }
    }

    /// Scroll the content view up.
    pub fn scroll_up(&mut self) {
        self.content_scroll = self.content_scroll.saturating_sub(1);
    }

    /// Scroll the content view down.
    pub fn scroll_down(&mut self) {
        self.content_scroll = self.content_scroll.saturating_add(1);
    }
}

/// Build a workflow from configuration.
pub fn build_workflow(config: &Config) -> anyhow::Result<SectionWorkflow> {
    let template = config.template().context("Invalid section template")?;
    let generator = generator_from_config(&config.ai).context("Could not create text generator")?;

    Ok(SectionWorkflow::new(template, generator, config.ai.model.clone())
        .with_timeout(config.timeout())
        .with_title(config.plan.title.clone()))
}

/// Value of a profile field.
pub fn profile_value(profile: &BusinessProfile, field: ProfileField) -> &str {
    match field {
        ProfileField::Name => &profile.name,
        ProfileField::Industry => &profile.industry,
        ProfileField::CoreProduct => &profile.core_product,
        ProfileField::ProblemSolved => &profile.problem_solved,
        ProfileField::AdditionalInfo => &profile.additional_info,
    }
}

fn profile_value_mut(profile: &mut BusinessProfile, field: ProfileField) -> &mut String {
    match field {
        ProfileField::Name => &mut profile.name,
        ProfileField::Industry => &mut profile.industry,
        ProfileField::CoreProduct => &mut profile.core_product,
        ProfileField::ProblemSolved => &mut profile.problem_solved,
        ProfileField::AdditionalInfo => &mut profile.additional_info,
    }
}
