/// Raw key reader.
///
/// Blocks until one key press arrives and returns it as a `char`.
/// Raw mode (no echo, no line buffering) is required while waiting. If the
/// renderer already holds it for the session the reader leaves it alone;
/// otherwise it enables raw mode for the read and restores it afterwards.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// What Ctrl+C turns into: the quit key.
pub const QUIT_KEY: char = 'q';

pub struct KeyReader;

impl KeyReader {
    pub fn new() -> Self {
        KeyReader
    }

    /// Wait for the next key press. Terminal mode failures are fatal.
    pub fn read_key(&mut self) -> io::Result<char> {
        let raw = RawModeGuard::enable()?;
        let c = next_char()?;
        raw.restore()?;
        Ok(c)
    }
}

fn next_char() -> io::Result<char> {
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(c) = key_to_char(key) {
                return Ok(c);
            }
        }
    }
}

/// Translate a key event into the single character the game understands.
/// Releases and keys without a character are skipped.
pub fn key_to_char(key: KeyEvent) -> Option<char> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(QUIT_KEY)
        }
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        KeyCode::Esc => Some('\u{1b}'),
        _ => None,
    }
}

/// Enables raw mode on creation. `restore` puts the previous mode back and
/// reports failure; dropping without `restore` is the error-path fallback.
struct RawModeGuard {
    /// True while this guard is responsible for leaving raw mode.
    owns_raw: bool,
}

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        let was_raw = terminal::is_raw_mode_enabled()?;
        if !was_raw {
            terminal::enable_raw_mode()?;
        }
        Ok(RawModeGuard { owns_raw: !was_raw })
    }

    fn restore(mut self) -> io::Result<()> {
        self.release()
    }

    /// Leave raw mode if this guard entered it. Runs at most once.
    fn release(&mut self) -> io::Result<()> {
        if !self.owns_raw {
            return Ok(());
        }
        self.owns_raw = false;
        terminal::disable_raw_mode()
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::error!("could not restore terminal mode: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_chars_pass_through() {
        assert_eq!(key_to_char(press(KeyCode::Char('h'), KeyModifiers::NONE)), Some('h'));
        assert_eq!(key_to_char(press(KeyCode::Char(' '), KeyModifiers::NONE)), Some(' '));
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(key_to_char(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(QUIT_KEY));
        assert_eq!(key_to_char(press(KeyCode::Char('c'), KeyModifiers::NONE)), Some('c'));
    }

    #[test]
    fn guard_leaves_session_raw_mode_alone() {
        // Already raw when the guard was taken: restoring must not touch the terminal.
        let guard = RawModeGuard { owns_raw: false };
        assert!(guard.restore().is_ok());
    }

    #[test]
    fn releases_and_special_keys_are_skipped() {
        let mut release = press(KeyCode::Char('h'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_to_char(release), None);
        assert_eq!(key_to_char(press(KeyCode::F(1), KeyModifiers::NONE)), None);
        assert_eq!(key_to_char(press(KeyCode::Left, KeyModifiers::NONE)), None);
    }
}
