use crate::snake::Direction;

/// A single key press, already decoded from the terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Arrow(Direction),
    Enter,
    Esc,
    /// Ctrl+C, or end of input when no terminal is attached.
    Interrupt,
}

pub trait InputSource {
    /// Returns a pending key without waiting.
    fn poll_key(&mut self) -> Option<Key>;

    /// Blocks until a key arrives. Only used between sessions.
    fn wait_for_any_key(&mut self) -> Key;
}

/// What a key means while a session is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Quit,
    Interrupt,
}

impl Command {
    pub fn from_key(key: Key) -> Option<Command> {
        let cmd = match key {
            Key::Arrow(dir) => Command::Turn(dir),
            Key::Char('w') | Key::Char('W') => Command::Turn(Direction::Up),
            Key::Char('a') | Key::Char('A') => Command::Turn(Direction::Left),
            Key::Char('s') | Key::Char('S') => Command::Turn(Direction::Down),
            Key::Char('d') | Key::Char('D') => Command::Turn(Direction::Right),
            Key::Char('q') | Key::Char('Q') => Command::Quit,
            Key::Char('p') | Key::Char('P') | Key::Esc => Command::TogglePause,
            Key::Interrupt => Command::Interrupt,
            _ => return None,
        };

        Some(cmd)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed sequence of polls. `None` entries are ticks with no key.
    pub(crate) struct ScriptedInput {
        polls: VecDeque<Option<Key>>,
        waits: VecDeque<Key>,
    }

    impl ScriptedInput {
        pub(crate) fn new(polls: Vec<Option<Key>>, waits: Vec<Key>) -> Self {
            ScriptedInput { polls: polls.into(), waits: waits.into() }
        }
    }

    impl InputSource for ScriptedInput {
        fn poll_key(&mut self) -> Option<Key> {
            self.polls.pop_front().flatten()
        }

        fn wait_for_any_key(&mut self) -> Key {
            self.waits.pop_front().unwrap_or(Key::Interrupt)
        }
    }

    #[test]
    fn arrows_and_wasd_turn() {
        assert_eq!(Command::from_key(Key::Arrow(Direction::Left)), Some(Command::Turn(Direction::Left)));
        assert_eq!(Command::from_key(Key::Char('w')), Some(Command::Turn(Direction::Up)));
        assert_eq!(Command::from_key(Key::Char('D')), Some(Command::Turn(Direction::Right)));
    }

    #[test]
    fn quit_is_case_insensitive() {
        assert_eq!(Command::from_key(Key::Char('q')), Some(Command::Quit));
        assert_eq!(Command::from_key(Key::Char('Q')), Some(Command::Quit));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(Command::from_key(Key::Char('x')), None);
        assert_eq!(Command::from_key(Key::Enter), None);
    }
}
