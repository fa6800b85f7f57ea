//! UI rendering for the TUI.
//!
//! Handles layout and widget rendering using ratatui.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
    Frame,
};

use crate::app::{profile_value, AppMode, ProfileField, SetupField, StatusLevel};
use crate::plan::{Phase, SectionWorkflow};
use crate::tui::Theme;
use crate::App;

/// Draw the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    if app.mode == AppMode::Help {
        draw_help_screen(frame, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.mode {
        AppMode::Setup => draw_setup_form(frame, app, chunks[1]),
        AppMode::Profile => draw_profile_form(frame, app, chunks[1]),
        _ => draw_plan(frame, app, chunks[1]),
    }
    draw_status_bar(frame, app, chunks[2]);
}

/// Draw the title bar.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let title = app.config.plan.title.as_str();

    let model = match app.workflow.as_ref() {
        Some(w) => format!("{} / {}", w.provider_name(), w.model()),
        None => "not configured".to_string(),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {title} Generator "),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {model}"), Style::default().fg(theme.text_dim)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)));
    frame.render_widget(header, area);
}

/// Draw the credential setup form.
fn draw_setup_form(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let masked = "*".repeat(app.api_key_input.chars().count());

    let mut lines = vec![
        Line::from(Span::styled(
            "Setup",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(form_field(
        "OpenAI API Key",
        &masked,
        app.setup_focus == SetupField::ApiKey,
        theme,
    ));
    lines.extend(form_field(
        "Model",
        &app.model_input,
        app.setup_focus == SetupField::Model,
        theme,
    ));
    lines.push(Line::from(Span::styled(
        format!("  Suggested: {}", crate::core::SUGGESTED_MODELS.join(", ")),
        Style::default().fg(theme.text_dim),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab to switch fields, Enter to continue, Esc to quit",
        Style::default().fg(theme.text_dim),
    )));

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(form, area);
}

/// Draw the business profile form.
fn draw_profile_form(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let mut lines = vec![
        Line::from(Span::styled(
            "Business Information",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for field in ProfileField::ALL {
        lines.extend(form_field(
            field.label(),
            profile_value(&app.profile_form, field),
            app.profile_focus == field,
            theme,
        ));
    }
    lines.push(Line::from(Span::styled(
        "Tab/Enter for next field, Enter on the last field to submit",
        Style::default().fg(theme.text_dim),
    )));

    let form = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(form, area);
}

fn form_field<'a>(label: &'a str, value: &str, focused: bool, theme: &Theme) -> [Line<'a>; 3] {
    let (marker, style) = if focused {
        ("> ", Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(theme.text_dim))
    };
    let cursor = if focused { "_" } else { "" };

    [
        Line::from(Span::styled(format!("{marker}{label}"), style)),
        Line::from(Span::styled(format!("    {value}{cursor}"), Style::default().fg(theme.text))),
        Line::from(""),
    ]
}

/// Draw the generation screen.
fn draw_plan(frame: &mut Frame, app: &App, area: Rect) {
    let Some(workflow) = app.workflow.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress
            Constraint::Min(5),    // Section content
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    draw_progress(frame, app, workflow, chunks[0]);

    match workflow.phase() {
        Phase::NotStarted => draw_ready(frame, app, workflow, chunks[1]),
        Phase::Active(_) => draw_section(frame, app, workflow, chunks[1]),
        Phase::Done => draw_done(frame, app, workflow, chunks[1]),
    }

    draw_key_hints(frame, app, workflow, chunks[2]);
}

fn draw_progress(frame: &mut Frame, app: &App, workflow: &SectionWorkflow, area: Rect) {
    let theme = &app.theme;
    let label = match workflow.phase() {
        Phase::NotStarted => "Not started".to_string(),
        Phase::Active(_) => workflow.caption().unwrap_or_default(),
        Phase::Done => "Complete".to_string(),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" Progress "),
        )
        .gauge_style(Style::default().fg(theme.primary))
        .ratio(workflow.progress().clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

fn draw_ready(frame: &mut Frame, app: &App, workflow: &SectionWorkflow, area: Rect) {
    let theme = &app.theme;

    let mut lines = vec![
        Line::from(Span::styled(
            "Sections",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, name) in workflow.template().iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("  {}. {name}", i + 1),
            Style::default().fg(theme.text),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press g to generate the business plan.",
        Style::default().fg(theme.text_dim),
    )));

    let content = Paragraph::new(lines).block(content_block(" Ready ", theme));
    frame.render_widget(content, area);
}

fn draw_section(frame: &mut Frame, app: &App, workflow: &SectionWorkflow, area: Rect) {
    let theme = &app.theme;
    let section = workflow.current_section().unwrap_or_default();

    let lines = match workflow.current_content() {
        Some(text) if !text.is_empty() => render_markdown(text, theme),
        _ => vec![Line::from(Span::styled(
            "No content for this section. Go back (p) and forward (n) to regenerate.",
            Style::default().fg(theme.warning),
        ))],
    };

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.content_scroll, 0))
        .block(content_block(&format!(" {section} "), theme));
    frame.render_widget(content, area);
}

fn draw_done(frame: &mut Frame, app: &App, workflow: &SectionWorkflow, area: Rect) {
    let theme = &app.theme;

    let mut lines = vec![
        Line::from(Span::styled(
            "Business plan generation complete!",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for entry in workflow.document().entries() {
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.heading),
            Style::default().fg(theme.text),
        )));
    }
    lines.push(Line::from(""));

    let hint = match app.last_export.as_ref() {
        Some(path) => format!("Saved to {}", path.display()),
        None => format!("Press s to save as {}", app.config.plan.format.filename()),
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(theme.text_dim))));

    let content = Paragraph::new(lines)
        .scroll((app.content_scroll, 0))
        .block(content_block(" Done ", theme));
    frame.render_widget(content, area);
}

fn content_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1))
}

fn draw_key_hints(frame: &mut Frame, app: &App, workflow: &SectionWorkflow, area: Rect) {
    let theme = &app.theme;

    let mut hints: Vec<(&str, &str)> = Vec::new();
    if workflow.can_start() {
        hints.push(("g", "generate"));
    }
    if workflow.can_previous() {
        hints.push(("p", "previous"));
    }
    if workflow.can_next() {
        hints.push(("n", "next"));
    }
    if workflow.can_complete() {
        hints.push(("c", "complete"));
    }
    if workflow.is_done() {
        hints.push(("s", "save"));
    }
    hints.extend([("r", "reset"), ("?", "help"), ("q", "quit")]);

    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{action}  "), Style::default().fg(theme.text_dim)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = match app.status.as_ref() {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => theme.text_dim,
                StatusLevel::Success => theme.success,
                StatusLevel::Warning => theme.warning,
                StatusLevel::Error => theme.error,
            };
            Line::from(Span::styled(format!(" {}", status.text), Style::default().fg(color)))
        }
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keyboard shortcuts screen.
fn draw_help_screen(frame: &mut Frame, app: &App) {
    let theme = &app.theme;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Content
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        " Keyboard Shortcuts ",
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.primary)));
    frame.render_widget(title, chunks[0]);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        heading("Plan"),
        Line::from(""),
        help_line("g", "Generate the first section", theme),
        help_line("n / →", "Generate the next section", theme),
        help_line("p / ←", "Go back one section", theme),
        help_line("c", "Complete the plan (last section)", theme),
        help_line("s", "Save the finished plan", theme),
        help_line("r", "Reset and start over", theme),
        help_line("e", "Edit the business profile", theme),
        help_line("↑ ↓ PgUp PgDn", "Scroll section content", theme),
        Line::from(""),
        heading("Forms"),
        Line::from(""),
        help_line("Tab / ↓", "Next field", theme),
        help_line("Shift+Tab / ↑", "Previous field", theme),
        help_line("Enter", "Next field or submit", theme),
        Line::from(""),
        heading("General"),
        Line::from(""),
        help_line("?", "Toggle this help", theme),
        help_line("q / Esc", "Quit", theme),
        help_line("Ctrl+C", "Quit from anywhere", theme),
    ];

    let content = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(content, chunks[1]);

    let footer = Paragraph::new(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(theme.text_dim),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

fn help_line<'a>(key: &'a str, description: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {key:16}"),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(description, Style::default().fg(theme.text)),
    ])
}

/// Render generated Markdown into styled lines.
///
/// Handles headings, bullets and bold-only lines; everything else is shown
/// as plain text.
fn render_markdown<'a>(text: &'a str, theme: &Theme) -> Vec<Line<'a>> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            if let Some(heading) = trimmed.strip_prefix('#') {
                Line::from(Span::styled(
                    heading.trim_start_matches('#').trim(),
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                ))
            } else if let Some(item) =
                trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* "))
            {
                Line::from(vec![
                    Span::styled("  • ", Style::default().fg(theme.accent)),
                    Span::styled(item, Style::default().fg(theme.text)),
                ])
            } else if trimmed.len() > 4 && trimmed.starts_with("**") && trimmed.ends_with("**") {
                Line::from(Span::styled(
                    trimmed.trim_matches('*'),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(line, Style::default().fg(theme.text)))
            }
        })
        .collect()
}
