//! Free-form notes opened from the header.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Markdown body
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct NoteBook {
    notes: Vec<Note>,
}

impl NoteBook {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Add an empty note titled `title` (trimmed). Blank titles are ignored.
    pub fn add(&mut self, title: &str, now_millis: i64) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let mut id = now_millis;
        while self.notes.iter().any(|n| n.id == id.to_string()) {
            id += 1;
        }
        let id = id.to_string();
        self.notes.push(Note {
            id: id.clone(),
            title: title.to_string(),
            content: String::new(),
        });
        Some(id)
    }

    #[cfg(test)]
    pub fn set_content(&mut self, id: &str, content: String) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.content = content;
                true
            }
            None => false,
        }
    }

    pub fn note_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }
}
