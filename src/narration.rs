// Narration: the line-oriented console output every demo produces.
// Demos write through a `Narrator` so tests can capture the exact lines.

use colored::Colorize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

enum Sink {
    Stdout,
    Captured(Vec<String>),
}

/// Cheap-to-clone handle over the narration sink.
///
/// Participants that need to narrate keep a clone; all clones write to the
/// same sink in call order.
#[derive(Clone)]
pub struct Narrator {
    sink: Rc<RefCell<Sink>>,
}

impl Narrator {
    pub fn stdout() -> Self {
        Self {
            sink: Rc::new(RefCell::new(Sink::Stdout)),
        }
    }

    /// Keeps lines in memory instead of printing them.
    pub fn captured() -> Self {
        Self {
            sink: Rc::new(RefCell::new(Sink::Captured(Vec::new()))),
        }
    }

    /// Globally enables or disables ANSI colors for headings.
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    pub fn say(&self, line: impl fmt::Display) {
        match &mut *self.sink.borrow_mut() {
            Sink::Stdout => println!("{}", line),
            Sink::Captured(lines) => lines.push(line.to_string()),
        }
    }

    pub fn blank(&self) {
        self.say("");
    }

    pub fn bullet(&self, line: impl fmt::Display) {
        self.say(format_args!("  - {}", line));
    }

    pub fn heading(&self, title: &str) {
        let rule = "=".repeat(title.chars().count() + 8);
        match &mut *self.sink.borrow_mut() {
            Sink::Stdout => {
                println!("{}", rule.cyan());
                println!("{}", format!("=== {} ===", title).bold().cyan());
                println!("{}", rule.cyan());
            }
            Sink::Captured(lines) => {
                lines.push(rule.clone());
                lines.push(format!("=== {} ===", title));
                lines.push(rule);
            }
        }
    }

    pub fn section(&self, title: &str) {
        match &mut *self.sink.borrow_mut() {
            Sink::Stdout => println!("\n{}", format!("--- {} ---", title).yellow()),
            Sink::Captured(lines) => {
                lines.push(String::new());
                lines.push(format!("--- {} ---", title));
            }
        }
    }

    /// Lines written so far. Always empty for a stdout narrator.
    pub fn lines(&self) -> Vec<String> {
        match &*self.sink.borrow() {
            Sink::Stdout => Vec::new(),
            Sink::Captured(lines) => lines.clone(),
        }
    }

    /// True when any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        match &*self.sink.borrow() {
            Sink::Stdout => false,
            Sink::Captured(lines) => lines.iter().any(|line| line.contains(needle)),
        }
    }

    /// Number of captured lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        match &*self.sink.borrow() {
            Sink::Stdout => 0,
            Sink::Captured(lines) => lines.iter().filter(|line| line.contains(needle)).count(),
        }
    }
}

impl fmt::Debug for Narrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &*self.sink.borrow() {
            Sink::Stdout => "stdout",
            Sink::Captured(_) => "captured",
        };
        f.debug_struct("Narrator").field("sink", &kind).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_keeps_order() {
        let narrator = Narrator::captured();
        narrator.say("first");
        narrator.bullet("second");
        narrator.blank();

        assert_eq!(narrator.lines(), vec!["first", "  - second", ""]);
    }

    #[test]
    fn test_clones_share_sink() {
        let narrator = Narrator::captured();
        let clone = narrator.clone();
        clone.say("from clone");

        assert!(narrator.contains("from clone"));
        assert_eq!(narrator.count("clone"), 1);
    }

    #[test]
    fn test_heading_is_plain_when_captured() {
        let narrator = Narrator::captured();
        narrator.heading("Proxy");

        let lines = narrator.lines();
        assert_eq!(lines[1], "=== Proxy ===");
        assert_eq!(lines[0].len(), lines[1].len());
    }
}
