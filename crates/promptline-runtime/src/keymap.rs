#![forbid(unsafe_code)]

//! Key classification: raw key events to editor actions.
//!
//! One pure function maps a [`KeyEvent`] to the action the session
//! should take. The bindings are the classic emacs-style line-editing
//! set, with Ctrl+Shift alternates for the word operations (some hosts
//! swallow the Alt combinations).

use promptline_core::{KeyCode, KeyEvent, KeyEventKind};

/// A classified editing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Insert a printable character at the cursor.
    Insert(char),
    /// Submit the current line.
    Submit,
    /// Cancel: discard the line (and any pending challenge).
    Cancel,
    /// Clear the screen, keeping session state.
    ClearScreen,
    /// Attempt tab completion.
    Complete,
    /// Delete the grapheme before the cursor.
    DeleteBack,
    /// Delete the grapheme at the cursor.
    DeleteForward,
    /// Delete back to the previous word boundary.
    DeleteWordBack,
    /// Delete forward to the next word boundary.
    DeleteWordForward,
    /// Delete from line start to the cursor.
    KillToStart,
    /// Delete from the cursor to line end.
    KillToEnd,
    /// Move one grapheme left.
    MoveLeft,
    /// Move one grapheme right.
    MoveRight,
    /// Move to the start of the line.
    MoveLineStart,
    /// Move to the end of the line.
    MoveLineEnd,
    /// Move to the previous word boundary.
    MoveWordBack,
    /// Move past the next word boundary.
    MoveWordForward,
    /// Recall the previous history entry.
    HistoryPrev,
    /// Recall the next history entry (or the fresh line).
    HistoryNext,
}

/// Map a key event to an editor action, or `None` for keys the editor
/// ignores. Release events never produce an action.
#[must_use]
pub fn classify(key: &KeyEvent) -> Option<EditorAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.ctrl();
    let shift = key.shift();
    // Alt and Super are interchangeable for the word bindings: macOS
    // hosts report Option as either depending on the surface.
    let alt = key.alt() || key.super_key();

    match key.code {
        KeyCode::Enter => Some(EditorAction::Submit),
        KeyCode::Tab => Some(EditorAction::Complete),
        KeyCode::Backspace if ctrl => Some(EditorAction::DeleteWordBack),
        KeyCode::Backspace => Some(EditorAction::DeleteBack),
        KeyCode::Delete if ctrl => Some(EditorAction::DeleteWordForward),
        KeyCode::Delete => Some(EditorAction::DeleteForward),
        KeyCode::Left if ctrl => Some(EditorAction::MoveWordBack),
        KeyCode::Left => Some(EditorAction::MoveLeft),
        KeyCode::Right if ctrl => Some(EditorAction::MoveWordForward),
        KeyCode::Right => Some(EditorAction::MoveRight),
        KeyCode::Up => Some(EditorAction::HistoryPrev),
        KeyCode::Down => Some(EditorAction::HistoryNext),
        KeyCode::Home => Some(EditorAction::MoveLineStart),
        KeyCode::End => Some(EditorAction::MoveLineEnd),
        KeyCode::Escape => None,
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' => Some(EditorAction::Cancel),
            'l' => Some(EditorAction::ClearScreen),
            'a' => Some(EditorAction::MoveLineStart),
            'e' => Some(EditorAction::MoveLineEnd),
            'b' if shift => Some(EditorAction::MoveWordBack),
            'b' => Some(EditorAction::MoveLeft),
            'f' if shift => Some(EditorAction::MoveWordForward),
            'f' => Some(EditorAction::MoveRight),
            'd' if shift => Some(EditorAction::DeleteWordForward),
            'd' => Some(EditorAction::DeleteForward),
            'p' => Some(EditorAction::HistoryPrev),
            'n' => Some(EditorAction::HistoryNext),
            'w' => Some(EditorAction::DeleteWordBack),
            'u' => Some(EditorAction::KillToStart),
            'k' => Some(EditorAction::KillToEnd),
            _ => None,
        },
        KeyCode::Char(c) if alt => match c.to_ascii_lowercase() {
            'b' => Some(EditorAction::MoveWordBack),
            'f' => Some(EditorAction::MoveWordForward),
            'd' => Some(EditorAction::DeleteWordForward),
            _ => None,
        },
        KeyCode::Char(c) => Some(EditorAction::Insert(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptline_core::Modifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL)
    }

    fn alt(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::ALT)
    }

    #[test]
    fn printable_chars_insert() {
        assert_eq!(
            classify(&key(KeyCode::Char('x'))),
            Some(EditorAction::Insert('x'))
        );
    }

    #[test]
    fn shifted_chars_still_insert() {
        let event = KeyEvent::new(KeyCode::Char('X')).with_modifiers(Modifiers::SHIFT);
        assert_eq!(classify(&event), Some(EditorAction::Insert('X')));
    }

    #[test]
    fn enter_submits_and_tab_completes() {
        assert_eq!(classify(&key(KeyCode::Enter)), Some(EditorAction::Submit));
        assert_eq!(classify(&key(KeyCode::Tab)), Some(EditorAction::Complete));
    }

    #[test]
    fn emacs_motion_bindings() {
        assert_eq!(classify(&ctrl('a')), Some(EditorAction::MoveLineStart));
        assert_eq!(classify(&ctrl('e')), Some(EditorAction::MoveLineEnd));
        assert_eq!(classify(&ctrl('b')), Some(EditorAction::MoveLeft));
        assert_eq!(classify(&ctrl('f')), Some(EditorAction::MoveRight));
    }

    #[test]
    fn word_bindings_on_alt_and_super() {
        assert_eq!(classify(&alt('b')), Some(EditorAction::MoveWordBack));
        assert_eq!(classify(&alt('f')), Some(EditorAction::MoveWordForward));
        assert_eq!(classify(&alt('d')), Some(EditorAction::DeleteWordForward));
        let super_b = KeyEvent::new(KeyCode::Char('b')).with_modifiers(Modifiers::SUPER);
        assert_eq!(classify(&super_b), Some(EditorAction::MoveWordBack));
    }

    #[test]
    fn ctrl_shift_alternates_for_word_operations() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        let b = KeyEvent::new(KeyCode::Char('B')).with_modifiers(mods);
        let f = KeyEvent::new(KeyCode::Char('F')).with_modifiers(mods);
        let d = KeyEvent::new(KeyCode::Char('D')).with_modifiers(mods);
        assert_eq!(classify(&b), Some(EditorAction::MoveWordBack));
        assert_eq!(classify(&f), Some(EditorAction::MoveWordForward));
        assert_eq!(classify(&d), Some(EditorAction::DeleteWordForward));
    }

    #[test]
    fn kill_and_delete_bindings() {
        assert_eq!(classify(&ctrl('u')), Some(EditorAction::KillToStart));
        assert_eq!(classify(&ctrl('k')), Some(EditorAction::KillToEnd));
        assert_eq!(classify(&ctrl('w')), Some(EditorAction::DeleteWordBack));
        assert_eq!(classify(&ctrl('d')), Some(EditorAction::DeleteForward));
    }

    #[test]
    fn history_bindings() {
        assert_eq!(classify(&key(KeyCode::Up)), Some(EditorAction::HistoryPrev));
        assert_eq!(classify(&key(KeyCode::Down)), Some(EditorAction::HistoryNext));
        assert_eq!(classify(&ctrl('p')), Some(EditorAction::HistoryPrev));
        assert_eq!(classify(&ctrl('n')), Some(EditorAction::HistoryNext));
    }

    #[test]
    fn control_bindings() {
        assert_eq!(classify(&ctrl('c')), Some(EditorAction::Cancel));
        assert_eq!(classify(&ctrl('l')), Some(EditorAction::ClearScreen));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(classify(&key(KeyCode::Escape)), None);
        assert_eq!(classify(&ctrl('z')), None);
    }

    #[test]
    fn release_events_never_act() {
        let released = key(KeyCode::Enter).with_kind(KeyEventKind::Release);
        assert_eq!(classify(&released), None);
    }
}
