// Memento: the editor hands out opaque snapshots of its content; a separate
// history keeps them for undo.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use tracing::warn;

/// Snapshot of editor content. Only the editor can read it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorMemento {
    content: String,
}

#[derive(Debug, Default)]
pub struct TextEditor {
    content: String,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn save(&self) -> EditorMemento {
        EditorMemento {
            content: self.content.clone(),
        }
    }

    pub fn restore(&mut self, memento: EditorMemento) {
        self.content = memento.content;
    }
}

#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<EditorMemento>,
}

impl History {
    pub fn push(&mut self, memento: EditorMemento) {
        self.snapshots.push(memento);
    }

    pub fn pop(&mut self) -> Option<EditorMemento> {
        self.snapshots.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}

/// Restores the latest snapshot, narrating the outcome. Returns false when
/// the history was empty.
pub fn undo(editor: &mut TextEditor, history: &mut History, narrator: &Narrator) -> bool {
    match history.pop() {
        Some(memento) => {
            editor.restore(memento);
            narrator.say(format_args!("Undo -> \"{}\"", editor.content()));
            true
        }
        None => {
            warn!("no snapshot to restore");
            narrator.say("Nothing to undo");
            false
        }
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let mut editor = TextEditor::new();
    let mut history = History::default();

    for text in ["Hello", " World", "!!!"] {
        history.push(editor.save());
        editor.write(text);
        narrator.say(format_args!("Content: \"{}\"", editor.content()));
    }

    narrator.blank();
    undo(&mut editor, &mut history, narrator);
    undo(&mut editor, &mut history, narrator);
    narrator.say(format_args!("{} snapshot(s) left", history.len()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_restore() {
        let narrator = Narrator::captured();
        let mut editor = TextEditor::new();
        let mut history = History::default();

        editor.write("Hello");
        history.push(editor.save());
        editor.write(" World");
        history.push(editor.save());
        editor.write("!!!");

        assert!(undo(&mut editor, &mut history, &narrator));
        assert_eq!(editor.content(), "Hello World");
        assert!(undo(&mut editor, &mut history, &narrator));
        assert_eq!(editor.content(), "Hello");
        assert!(history.is_empty());
    }

    #[test]
    fn test_empty_history_is_soft() {
        let narrator = Narrator::captured();
        let mut editor = TextEditor::new();
        editor.write("keep");

        assert!(!undo(&mut editor, &mut History::default(), &narrator));
        assert_eq!(editor.content(), "keep");
        assert!(narrator.contains("Nothing to undo"));
    }

    #[test]
    fn test_memento_is_a_copy() {
        let mut editor = TextEditor::new();
        editor.write("a");
        let snapshot = editor.save();
        editor.write("b");

        editor.restore(snapshot);
        assert_eq!(editor.content(), "a");
    }
}
