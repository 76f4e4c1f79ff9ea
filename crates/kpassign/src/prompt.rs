//! Reading the database password without echoing it.

use crate::interrupt;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// The user pressed Ctrl-C at the prompt.
    #[error("interrupted")]
    Interrupted,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read a password, from the terminal when there is one, otherwise as a
/// single line from stdin.
pub fn read_password(prompt: &str) -> Result<String, PromptError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        read_from_terminal(prompt)
    } else {
        read_line(stdin.lock())
    }
}

/// Raw mode for as long as the guard lives.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        interrupt::save_terminal_mode();
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

fn read_from_terminal(prompt: &str) -> Result<String, PromptError> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    let result = {
        let _guard = RawModeGuard::enable()?;
        read_keys(event::read)
    };

    if !matches!(result, Err(PromptError::Interrupted)) {
        writeln!(stderr)?;
    }
    result
}

fn read_keys(mut next_event: impl FnMut() -> io::Result<Event>) -> Result<String, PromptError> {
    let mut secret = String::new();
    loop {
        if let Event::Key(key) = next_event()? {
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match apply_key(&mut secret, key) {
                KeyAction::Continue => {}
                KeyAction::Done => return Ok(secret),
                KeyAction::Interrupt => return Err(PromptError::Interrupted),
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Continue,
    Done,
    Interrupt,
}

fn apply_key(secret: &mut String, key: KeyEvent) -> KeyAction {
    // AltGr arrives as Ctrl+Alt on Windows and still types a character
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Interrupt,
        KeyCode::Char('d') if ctrl && secret.is_empty() => KeyAction::Done,
        KeyCode::Char(_) if ctrl => KeyAction::Continue,
        KeyCode::Char(c) => {
            secret.push(c);
            KeyAction::Continue
        }
        KeyCode::Backspace => {
            secret.pop();
            KeyAction::Continue
        }
        KeyCode::Enter => KeyAction::Done,
        _ => KeyAction::Continue,
    }
}

fn read_line(mut reader: impl BufRead) -> Result<String, PromptError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
