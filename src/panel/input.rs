//! Keyboard input handling and interactive loop.
//!
//! This module maps keyboard events to panel events and runs the
//! interactive terminal loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::SelectorResult;
use crate::source::NameSource;
use crate::ui::theme::{icon, icons, icons_ascii};

use super::render::fit_width;
use super::selector::{NodeSelectorPanel, PanelEvent, PanelOutput};

/// Whether keys navigate the tree or edit the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Navigate,
    Filter,
}

/// What a key press asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    /// Forward to the panel
    Panel(PanelEvent),
    /// Start editing the filter
    StartFilter,
    /// Append to the filter text
    FilterPush(char),
    /// Remove the last filter character
    FilterPop,
    /// Stop editing, keep the filter
    FinishFilter,
    /// Stop editing and clear the filter
    ClearFilter,
    /// Leave without selecting
    Quit,
}

/// Convert a keyboard event to a command for the current mode
pub fn key_to_command(key: KeyEvent, mode: InputMode) -> Option<KeyCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyCommand::Quit);
    }

    match mode {
        InputMode::Navigate => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(KeyCommand::Panel(PanelEvent::CursorUp)),
            KeyCode::Down | KeyCode::Char('j') => Some(KeyCommand::Panel(PanelEvent::CursorDown)),
            KeyCode::Right | KeyCode::Char('l') => Some(KeyCommand::Panel(PanelEvent::Expand)),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => {
                Some(KeyCommand::Panel(PanelEvent::Collapse))
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(KeyCommand::Panel(PanelEvent::Activate)),
            KeyCode::Char('e') => Some(KeyCommand::Panel(PanelEvent::ExpandAll)),
            KeyCode::Char('c') => Some(KeyCommand::Panel(PanelEvent::CollapseAll)),
            KeyCode::Char('r') => Some(KeyCommand::Panel(PanelEvent::Refresh)),
            KeyCode::Char('/') => Some(KeyCommand::StartFilter),
            KeyCode::Char('q') | KeyCode::Esc => Some(KeyCommand::Quit),
            _ => None,
        },
        InputMode::Filter => match key.code {
            KeyCode::Char(c) => Some(KeyCommand::FilterPush(c)),
            KeyCode::Backspace => Some(KeyCommand::FilterPop),
            KeyCode::Enter => Some(KeyCommand::FinishFilter),
            KeyCode::Esc => Some(KeyCommand::ClearFilter),
            _ => None,
        },
    }
}

/// Filter text being typed plus the mode it puts the keyboard in
#[derive(Debug, Default)]
pub struct InputState {
    pub mode: InputMode,
    pub filter: String,
    /// Last error or notice shown under the tree
    pub message: Option<String>,
}

/// Outcome of one command in the interactive loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopStep {
    /// Redraw and wait for the next key
    Continue,
    /// The panel emitted a selection
    Selected(String),
    /// The user left without selecting
    Quit,
}

/// Apply one command to the panel and the input state
pub fn apply_command<S: NameSource>(
    panel: &mut NodeSelectorPanel<S>,
    state: &mut InputState,
    command: KeyCommand,
) -> LoopStep {
    state.message = None;
    let event = match command {
        KeyCommand::Quit => return LoopStep::Quit,
        KeyCommand::StartFilter => {
            state.mode = InputMode::Filter;
            return LoopStep::Continue;
        }
        KeyCommand::FinishFilter => {
            state.mode = InputMode::Navigate;
            return LoopStep::Continue;
        }
        KeyCommand::ClearFilter => {
            state.mode = InputMode::Navigate;
            state.filter.clear();
            PanelEvent::FilterChanged(String::new())
        }
        KeyCommand::FilterPush(c) => {
            state.filter.push(c);
            PanelEvent::FilterChanged(state.filter.clone())
        }
        KeyCommand::FilterPop => {
            state.filter.pop();
            PanelEvent::FilterChanged(state.filter.clone())
        }
        KeyCommand::Panel(event) => event,
    };

    match panel.handle(event) {
        Ok(Some(PanelOutput::NodeSelected(name))) => LoopStep::Selected(name),
        Ok(None) => LoopStep::Continue,
        Err(e) => {
            // Discovery errors stay on screen; `r` retries
            state.message = Some(format!("Error: {}", e));
            LoopStep::Continue
        }
    }
}

/// Run the panel interactively.
/// Returns the selected node name, or None if the user quit.
pub fn run_interactive<S: NameSource>(
    panel: &mut NodeSelectorPanel<S>,
    supports_unicode: bool,
) -> SelectorResult<Option<String>> {
    use crossterm::{cursor, execute, terminal};
    use std::io::stdout;

    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, cursor::Hide)?;

    let result = event_loop(panel, supports_unicode, &mut stdout);

    // Restore terminal even when the loop failed
    let _ = execute!(
        stdout,
        cursor::Show,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    );
    terminal::disable_raw_mode()?;

    result
}

fn event_loop<S: NameSource>(
    panel: &mut NodeSelectorPanel<S>,
    supports_unicode: bool,
    stdout: &mut std::io::Stdout,
) -> SelectorResult<Option<String>> {
    use crossterm::event::{self, Event, KeyEventKind};

    let mut state = InputState::default();
    render_ui(stdout, panel, &state, supports_unicode)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let Some(command) = key_to_command(key, state.mode) else {
            continue;
        };

        match apply_command(panel, &mut state, command) {
            LoopStep::Quit => return Ok(None),
            LoopStep::Selected(name) => return Ok(Some(name)),
            LoopStep::Continue => render_ui(stdout, panel, &state, supports_unicode)?,
        }
    }
}

/// Separator line between the tree and the status bar
fn rule(width: usize, supports_unicode: bool) -> String {
    icon(supports_unicode, icons::RULE, icons_ascii::RULE).repeat(width)
}

fn render_ui<S: NameSource>(
    stdout: &mut std::io::Stdout,
    panel: &NodeSelectorPanel<S>,
    state: &InputState,
    supports_unicode: bool,
) -> SelectorResult<()> {
    use crossterm::{cursor, execute, terminal};
    use std::io::Write;

    let (width, _) = terminal::size().unwrap_or((80, 24));
    let width = width as usize;

    execute!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    let mut lines = vec!["Reconfigure nodes".to_string(), String::new()];
    lines.extend(panel.render(supports_unicode).lines().map(str::to_string));
    if panel.flattened_nodes().is_empty() {
        lines.push("  (no nodes)".to_string());
    }
    lines.push(rule(width.min(64), supports_unicode));
    lines.extend(panel.render_status_bar().lines().map(str::to_string));
    if state.mode == InputMode::Filter {
        lines.push(format!("Filter: {}_", state.filter));
    }
    if let Some(message) = &state.message {
        lines.push(message.clone());
    }
    lines.push(String::new());
    lines.extend(panel.render_help_bar().lines().map(str::to_string));

    for line in lines {
        write!(stdout, "{}\r\n", fit_width(&line, width))?;
    }
    stdout.flush()?;
    Ok(())
}
