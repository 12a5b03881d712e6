//! Keyboard input from crossterm.

use std::collections::{HashSet, VecDeque};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strictly_simon::{DeviceError, EventKind, InputEvent, InputSource, Key, Quadrant};
use tracing::{debug, instrument, trace};

/// Maps a terminal key to a game key.
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Key {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Cancel,
        KeyCode::Esc => Key::Cancel,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Char(c @ '1'..='4') => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Quadrant::from_number)
            .map_or(Key::Other, Key::Square),
        _ => Key::Other,
    }
}

/// [`InputSource`] reading the terminal's event queue.
///
/// Whether a terminal reports key releases depends on the key and on the
/// platform, so it is learned per key. Until a real release has been seen for
/// a key, one is synthesized right after each press, and the real release
/// that may still follow is swallowed.
#[derive(Debug, Default)]
pub struct CrosstermInput {
    pending: VecDeque<InputEvent>,
    releasing: HashSet<Key>,
    synthesized: HashSet<Key>,
}

impl CrosstermInput {
    /// Creates an input source that has not seen any release yet.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a terminal event into zero or more game events, queueing them.
    pub fn translate(&mut self, event: Event) {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event
        else {
            trace!(?event, "Ignoring non-key event");
            return;
        };

        let key = map_key(code, modifiers);
        match kind {
            KeyEventKind::Press => {
                self.pending.push_back(InputEvent::down(key));
                if !self.releasing.contains(&key) {
                    self.pending.push_back(InputEvent::up(key));
                    self.synthesized.insert(key);
                }
            }
            KeyEventKind::Release => {
                if self.releasing.insert(key) {
                    debug!(?key, "Terminal reports releases for key");
                }
                if self.synthesized.remove(&key) {
                    trace!(?key, "Release already synthesized");
                } else {
                    self.pending.push_back(InputEvent::up(key));
                }
            }
            KeyEventKind::Repeat => {}
        }
    }

    /// Pops the next queued event matching `kind`, dropping the rest.
    ///
    /// A cancel matches either kind.
    pub fn next_queued(&mut self, kind: EventKind) -> Option<InputEvent> {
        while let Some(event) = self.pending.pop_front() {
            if event.kind == kind || event.key == Key::Cancel {
                return Some(event);
            }
            trace!(?event, ?kind, "Discarding event of other kind");
        }
        None
    }
}

impl InputSource for CrosstermInput {
    fn wait_for_event(&mut self, kind: EventKind) -> Result<InputEvent, DeviceError> {
        loop {
            if let Some(event) = self.next_queued(kind) {
                debug!(?event, "Key event");
                return Ok(event);
            }
            let event = event::read()?;
            self.translate(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Press,
        ))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    #[test]
    fn test_digits_map_to_squares() {
        assert_eq!(
            map_key(KeyCode::Char('1'), KeyModifiers::NONE),
            Key::Square(Quadrant::TopLeft)
        );
        assert_eq!(
            map_key(KeyCode::Char('4'), KeyModifiers::NONE),
            Key::Square(Quadrant::BottomRight)
        );
        assert_eq!(map_key(KeyCode::Char('5'), KeyModifiers::NONE), Key::Other);
        assert_eq!(map_key(KeyCode::Char('0'), KeyModifiers::NONE), Key::Other);
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(map_key(KeyCode::Enter, KeyModifiers::NONE), Key::Confirm);
        assert_eq!(map_key(KeyCode::Esc, KeyModifiers::NONE), Key::Cancel);
        assert_eq!(
            map_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Key::Cancel
        );
        assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::NONE), Key::Other);
    }

    #[test]
    fn test_release_is_synthesized_until_one_is_reported() {
        let mut input = CrosstermInput::new();
        input.translate(press(KeyCode::Char('2')));

        assert_eq!(
            input.next_queued(EventKind::KeyDown),
            Some(InputEvent::down(Key::Square(Quadrant::TopRight)))
        );
        assert_eq!(
            input.next_queued(EventKind::KeyUp),
            Some(InputEvent::up(Key::Square(Quadrant::TopRight)))
        );
    }

    #[test]
    fn test_press_without_release_still_yields_key_up() {
        // Enhanced terminals may report releases for some keys only.
        let mut input = CrosstermInput::new();
        input.translate(press(KeyCode::Esc));
        input.translate(release(KeyCode::Esc));
        input.next_queued(EventKind::KeyDown);
        input.next_queued(EventKind::KeyDown);

        input.translate(press(KeyCode::Char('1')));
        assert_eq!(
            input.next_queued(EventKind::KeyDown),
            Some(InputEvent::down(Key::Square(Quadrant::TopLeft)))
        );
        assert_eq!(
            input.next_queued(EventKind::KeyUp),
            Some(InputEvent::up(Key::Square(Quadrant::TopLeft)))
        );
    }

    #[test]
    fn test_late_release_does_not_confirm_twice() {
        let mut input = CrosstermInput::new();
        input.translate(press(KeyCode::Enter));
        assert_eq!(
            input.next_queued(EventKind::KeyUp),
            Some(InputEvent::up(Key::Confirm))
        );

        // The real release of the same press arrives during the pause.
        input.translate(release(KeyCode::Enter));
        assert_eq!(input.next_queued(EventKind::KeyUp), None);
    }

    #[test]
    fn test_real_releases_are_used_once_seen() {
        let mut input = CrosstermInput::new();
        input.translate(press(KeyCode::Enter));
        input.translate(release(KeyCode::Enter));
        assert_eq!(
            input.next_queued(EventKind::KeyUp),
            Some(InputEvent::up(Key::Confirm))
        );
        assert_eq!(input.next_queued(EventKind::KeyUp), None);

        input.translate(press(KeyCode::Enter));
        assert_eq!(input.next_queued(EventKind::KeyUp), None);

        input.translate(release(KeyCode::Enter));
        assert_eq!(
            input.next_queued(EventKind::KeyUp),
            Some(InputEvent::up(Key::Confirm))
        );
    }

    #[test]
    fn test_stale_events_of_other_kind_are_dropped() {
        let mut input = CrosstermInput::new();
        input.translate(press(KeyCode::Char('1')));
        input.translate(press(KeyCode::Char('3')));

        // Waiting for key-up skips the first press, then the next wait for
        // key-down must not see it again.
        assert_eq!(
            input.next_queued(EventKind::KeyUp),
            Some(InputEvent::up(Key::Square(Quadrant::TopLeft)))
        );
        assert_eq!(
            input.next_queued(EventKind::KeyDown),
            Some(InputEvent::down(Key::Square(Quadrant::BottomLeft)))
        );
    }

    #[test]
    fn test_cancel_matches_any_kind() {
        let mut input = CrosstermInput::new();
        input.translate(press(KeyCode::Esc));
        assert_eq!(
            input.next_queued(EventKind::KeyUp),
            Some(InputEvent::down(Key::Cancel))
        );
    }

    #[test]
    fn test_repeats_and_other_events_are_ignored() {
        let mut input = CrosstermInput::new();
        input.translate(Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('1'),
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
        )));
        input.translate(Event::FocusGained);
        assert_eq!(input.next_queued(EventKind::KeyDown), None);
    }
}
