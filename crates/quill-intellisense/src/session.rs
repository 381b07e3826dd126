//! One live autocomplete interaction

use quill_core::Candidate;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Popup shown, nothing typed yet.
    Open,
    /// At least one keystroke has refined the selection.
    Filtering,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Committed,
    Cancelled,
}

/// Buffer edit produced by a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub range: Range<usize>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteSession {
    anchor: usize,
    typed_prefix: String,
    candidates: Vec<Candidate>,
    selected: Option<usize>,
    matched: bool,
    state: SessionState,
}

impl AutocompleteSession {
    /// Start a session anchored just after the trigger delimiter. There is no
    /// session without candidates.
    pub fn open(anchor: usize, candidates: Vec<Candidate>) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }
        Some(AutocompleteSession {
            anchor,
            typed_prefix: String::new(),
            candidates,
            selected: Some(0),
            matched: true,
            state: SessionState::Open,
        })
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    pub fn typed_prefix(&self) -> &str {
        &self.typed_prefix
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.selected.and_then(|i| self.candidates.get(i))
    }

    /// Whether the highlight reflects a real match.
    pub fn is_matched(&self) -> bool {
        self.matched && self.selected.is_some()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Append a typed character and re-select the first candidate whose
    /// completion starts with the prefix.
    pub fn type_char(&mut self, c: char) {
        self.typed_prefix.push(c);
        self.state = SessionState::Filtering;
        self.refilter();
    }

    /// Drop the last typed character. Returns false when nothing was typed,
    /// meaning the deletion removed the trigger delimiter itself.
    pub fn backspace(&mut self) -> bool {
        if self.typed_prefix.pop().is_none() {
            return false;
        }
        self.state = SessionState::Filtering;
        self.refilter();
        true
    }

    /// Move the highlight by `delta`, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        let last = self.candidates.len() - 1;
        let next = match self.selected {
            Some(current) => current.saturating_add_signed(delta).min(last),
            None => 0,
        };
        self.selected = Some(next);
        self.matched = true;
    }

    /// Highlight an item picked by pointer. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.candidates.len() {
            return false;
        }
        self.selected = Some(index);
        self.matched = true;
        true
    }

    /// The replacement a commit would apply, if a candidate is matched.
    pub fn commit(&self) -> Option<Commit> {
        if !self.is_matched() {
            return None;
        }
        let candidate = self.selected_candidate()?;
        Some(Commit {
            range: self.anchor..self.anchor + self.typed_prefix.len(),
            text: candidate.completion.clone(),
        })
    }

    fn refilter(&mut self) {
        let hit = self
            .candidates
            .iter()
            .position(|candidate| candidate.matches(&self.typed_prefix));
        self.selected = hit;
        self.matched = hit.is_some();
    }
}
