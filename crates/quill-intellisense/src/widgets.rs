//! Popup and tooltip widget seams, plus headless implementations

use crate::buffer::CaretPosition;
use quill_core::{Candidate, SymbolKind};

/// One row of the completion popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupItem {
    pub label: String,
    pub kind: Option<SymbolKind>,
}

impl From<&Candidate> for PopupItem {
    fn from(candidate: &Candidate) -> Self {
        PopupItem {
            label: candidate.label.clone(),
            kind: candidate.kind,
        }
    }
}

/// The host's completion list widget.
pub trait CompletionPopup {
    fn show(&mut self, at: CaretPosition, items: &[PopupItem]);
    fn highlight(&mut self, index: Option<usize>);
    fn hide(&mut self);
}

/// The host's tooltip widget.
pub trait Tooltip {
    fn show(&mut self, at: CaretPosition, layout: &TooltipLayout);
    fn hide(&mut self);
}

/// Tooltip text broken into lines no wider than the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipLayout {
    pub lines: Vec<String>,
    /// Widest line, in characters.
    pub width: usize,
}

impl TooltipLayout {
    /// Size the tooltip to the text, wrapping greedily on whitespace once it
    /// exceeds `max_width` characters. Words longer than the cap are split.
    pub fn wrap(text: &str, max_width: usize) -> Self {
        let max_width = max_width.max(1);
        let text = text.trim();

        if text.chars().count() <= max_width {
            return TooltipLayout {
                width: text.chars().count(),
                lines: vec![text.to_string()],
            };
        }

        let mut lines: Vec<String> = Vec::new();
        let mut line = String::new();
        let mut line_len = 0;

        for word in text.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(max_width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > max_width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }
        if line_len > 0 {
            lines.push(line);
        }

        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        TooltipLayout { lines, width }
    }
}

/// A popup that records what it was asked to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessPopup {
    pub visible: bool,
    pub at: Option<CaretPosition>,
    pub items: Vec<PopupItem>,
    pub highlighted: Option<usize>,
}

impl CompletionPopup for HeadlessPopup {
    fn show(&mut self, at: CaretPosition, items: &[PopupItem]) {
        self.visible = true;
        self.at = Some(at);
        self.items = items.to_vec();
        self.highlighted = None;
    }

    fn highlight(&mut self, index: Option<usize>) {
        self.highlighted = index;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.items.clear();
        self.highlighted = None;
    }
}

/// A tooltip that records what it was asked to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessTooltip {
    pub visible: bool,
    pub at: Option<CaretPosition>,
    pub layout: Option<TooltipLayout>,
}

impl Tooltip for HeadlessTooltip {
    fn show(&mut self, at: CaretPosition, layout: &TooltipLayout) {
        self.visible = true;
        self.at = Some(at);
        self.layout = Some(layout.clone());
    }

    fn hide(&mut self) {
        self.visible = false;
        self.layout = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_line() {
        let layout = TooltipLayout::wrap("table 1", 48);
        assert_eq!(layout.lines, vec!["table 1"]);
        assert_eq!(layout.width, 7);
    }

    #[test]
    fn test_long_text_wraps_at_cap() {
        let layout = TooltipLayout::wrap("Aggregated other reserves - Effects of changes in accounting policies", 24);
        assert_eq!(
            layout.lines,
            vec!["Aggregated other", "reserves - Effects of", "changes in accounting", "policies"]
        );
        assert!(layout.lines.iter().all(|l| l.chars().count() <= 24));
        assert_eq!(layout.width, 21);
    }

    #[test]
    fn test_overlong_word_is_split() {
        let layout = TooltipLayout::wrap("see share-based-payments", 8);
        assert_eq!(layout.lines, vec!["see", "share-ba", "sed-paym", "ents"]);
        assert_eq!(layout.width, 8);
    }
}
