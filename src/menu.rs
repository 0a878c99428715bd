use crate::difficulty::Difficulty;
use crate::input::Key;
use crate::render::{boxed, BODY_CHAR, FOOD_CHAR, HEAD_CHAR, WALL_CHAR};
use crate::snake::Direction;

const ITEMS: usize = Difficulty::ALL.len() + 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Pending,
    Chosen(Difficulty),
    Quit,
}

/// Difficulty picker. Entries are the presets followed by "Quit".
#[derive(Clone, Debug, Default)]
pub struct DifficultyMenu {
    selected: usize,
}

impl DifficultyMenu {
    pub fn new(initial: Difficulty) -> Self {
        let selected = Difficulty::ALL.iter().position(|d| *d == initial).unwrap_or(0);
        DifficultyMenu { selected }
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle(&mut self, key: Key) -> MenuEvent {
        match key {
            Key::Arrow(Direction::Up) | Key::Char('w') | Key::Char('W') | Key::Char('k') => {
                self.selected = (self.selected + ITEMS - 1) % ITEMS;
                MenuEvent::Pending
            }
            Key::Arrow(Direction::Down) | Key::Char('s') | Key::Char('S') | Key::Char('j') => {
                self.selected = (self.selected + 1) % ITEMS;
                MenuEvent::Pending
            }
            Key::Enter | Key::Char(' ') => self.choose(self.selected),
            Key::Char(c @ '1'..='4') => self.choose(c as usize - '1' as usize),
            Key::Char('q') | Key::Char('Q') | Key::Esc | Key::Interrupt => MenuEvent::Quit,
            _ => MenuEvent::Pending,
        }
    }

    fn choose(&mut self, index: usize) -> MenuEvent {
        self.selected = index;
        match Difficulty::ALL.get(index) {
            Some(difficulty) => MenuEvent::Chosen(*difficulty),
            None => MenuEvent::Quit,
        }
    }

    pub fn screen(&self) -> Vec<String> {
        let mut lines = vec![
            "Terminal Edition".to_string(),
            String::new(),
            format!("[{}] Snake Head    [{}] Snake Body", HEAD_CHAR, BODY_CHAR),
            format!("[{}] Food          [{}] Wall      ", FOOD_CHAR, WALL_CHAR),
            String::new(),
            "Select Difficulty:".to_string(),
        ];

        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            let (h, w) = difficulty.base_size();
            let text = format!("{}. {:<6} ({}x{}, {})", i + 1, difficulty.label(), h, w, difficulty.speed_label());
            lines.push(self.marked(i, &text));
        }
        lines.push(self.marked(ITEMS - 1, "4. Quit"));

        lines.push(String::new());
        lines.push("Arrows/WASD: Move | Enter: Select | Q: Quit".to_string());

        boxed("SNAKE GAME", &lines)
    }

    fn marked(&self, index: usize, text: &str) -> String {
        let marker = if index == self.selected { '>' } else { ' ' };
        format!("{} {:<28}", marker, text)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReplayChoice {
    Restart,
    Exit,
}

/// Answer to "Play again? (y/n)". Unrecognised keys ask again.
pub fn replay_choice(key: Key) -> Option<ReplayChoice> {
    match key {
        Key::Char('y') | Key::Char('Y') | Key::Enter => Some(ReplayChoice::Restart),
        Key::Char('n') | Key::Char('N') | Key::Char('q') | Key::Char('Q') | Key::Esc | Key::Interrupt => {
            Some(ReplayChoice::Exit)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_around() {
        let mut menu = DifficultyMenu::default();
        assert_eq!(menu.handle(Key::Arrow(Direction::Up)), MenuEvent::Pending);
        assert_eq!(menu.selected(), ITEMS - 1);
        menu.handle(Key::Arrow(Direction::Down));
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn enter_picks_highlighted_entry() {
        let mut menu = DifficultyMenu::new(Difficulty::Medium);
        menu.handle(Key::Char('s'));
        assert_eq!(menu.handle(Key::Enter), MenuEvent::Chosen(Difficulty::Hard));

        menu.handle(Key::Arrow(Direction::Down));
        assert_eq!(menu.handle(Key::Enter), MenuEvent::Quit);
    }

    #[test]
    fn uppercase_wasd_navigates() {
        let mut menu = DifficultyMenu::default();
        menu.handle(Key::Char('S'));
        menu.handle(Key::Char('S'));
        assert_eq!(menu.selected(), 2);
        menu.handle(Key::Char('W'));
        assert_eq!(menu.selected(), 1);
    }

    #[test]
    fn digits_choose_directly() {
        let mut menu = DifficultyMenu::default();
        assert_eq!(menu.handle(Key::Char('2')), MenuEvent::Chosen(Difficulty::Medium));
        assert_eq!(menu.selected(), 1);
        assert_eq!(menu.handle(Key::Char('4')), MenuEvent::Quit);
        assert_eq!(menu.handle(Key::Char('9')), MenuEvent::Pending);
    }

    #[test]
    fn screen_marks_selection() {
        let menu = DifficultyMenu::new(Difficulty::Hard);
        let screen = menu.screen().join("\n");
        assert!(screen.contains("> 3. Hard"));
        assert!(screen.contains("  1. Easy"));
    }

    #[test]
    fn replay_answers() {
        assert_eq!(replay_choice(Key::Char('y')), Some(ReplayChoice::Restart));
        assert_eq!(replay_choice(Key::Char('N')), Some(ReplayChoice::Exit));
        assert_eq!(replay_choice(Key::Interrupt), Some(ReplayChoice::Exit));
        assert_eq!(replay_choice(Key::Char('x')), None);
    }
}
