//! Keystroke controller: routes input events to the session, the buffer,
//! and the popup/tooltip widgets

use crate::buffer::{floor_boundary, CaretPosition, TextBuffer};
use crate::config::IntellisenseConfig;
use crate::keys::{InputEvent, Key};
use crate::session::{AutocompleteSession, CloseReason};
use crate::widgets::{CompletionPopup, PopupItem, Tooltip, TooltipLayout};
use quill_core::SymbolTree;
use std::sync::Arc;
use tracing::{debug, warn};

/// What a single event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ordinary editing, no session involved.
    Edited,
    /// A trigger fired and the popup is showing.
    Opened,
    /// The typed prefix changed.
    Filtered,
    /// The highlight moved.
    Navigated,
    /// A candidate was written into the buffer.
    Committed,
    /// A commit key with nothing matched closed the popup.
    Closed,
    /// The session ended without writing anything.
    Cancelled,
    DefinitionShown,
    NoDefinition,
    Ignored,
}

/// Autocomplete and definition lookup for one focused buffer.
pub struct Intellisense<P: CompletionPopup, T: Tooltip> {
    tree: Arc<SymbolTree>,
    config: IntellisenseConfig,
    session: Option<AutocompleteSession>,
    popup: P,
    tooltip: T,
    tooltip_visible: bool,
}

impl<P: CompletionPopup, T: Tooltip> Intellisense<P, T> {
    pub fn new(tree: Arc<SymbolTree>, config: IntellisenseConfig, popup: P, tooltip: T) -> Self {
        if config.delimiter != tree.delimiter() {
            warn!(
                "Configured delimiter {:?} differs from the index delimiter {:?}; using the index's",
                config.delimiter,
                tree.delimiter()
            );
        }
        Self {
            tree,
            config,
            session: None,
            popup,
            tooltip,
            tooltip_visible: false,
        }
    }

    pub fn tree(&self) -> &SymbolTree {
        &self.tree
    }

    pub fn config(&self) -> &IntellisenseConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&AutocompleteSession> {
        self.session.as_ref()
    }

    pub fn popup(&self) -> &P {
        &self.popup
    }

    pub fn tooltip(&self) -> &T {
        &self.tooltip
    }

    pub fn is_tooltip_visible(&self) -> bool {
        self.tooltip_visible
    }

    /// Process one input event against `buffer`.
    pub fn handle(&mut self, buffer: &mut dyn TextBuffer, event: InputEvent) -> Outcome {
        if self.tooltip_visible {
            self.tooltip.hide();
            self.tooltip_visible = false;
        }

        let key = match event {
            InputEvent::Key(key) => key.normalized(),
            InputEvent::PointerOutside => {
                return match self.session {
                    Some(_) => self.close(CloseReason::Cancelled),
                    None => Outcome::Ignored,
                };
            }
            InputEvent::PointerSelect(index) => return self.pick(buffer, index),
        };

        if self.is_trigger(key) {
            return self.trigger(buffer);
        }
        if key == self.config.keys.definition.normalized() {
            if self.session.is_some() {
                self.close(CloseReason::Cancelled);
            }
            return self.show_definition(buffer);
        }

        if self.session.is_some() {
            if let Some(outcome) = self.session_key(buffer, key) {
                return outcome;
            }
            self.close(CloseReason::Cancelled);
            self.edit(buffer, key);
            return Outcome::Cancelled;
        }

        self.edit(buffer, key)
    }

    fn is_trigger(&self, key: Key) -> bool {
        key == self.config.keys.trigger.normalized()
            || (self.config.auto_trigger && key == Key::Char(self.tree.delimiter()))
    }

    /// Insert the delimiter and open a session on the word before it.
    fn trigger(&mut self, buffer: &mut dyn TextBuffer) -> Outcome {
        if self.session.is_some() {
            self.close(CloseReason::Cancelled);
        }

        let mut delimiter = [0u8; 4];
        buffer.insert(self.tree.delimiter().encode_utf8(&mut delimiter));

        let word = buffer.current_word();
        let Some((_, candidates)) = self.tree.complete(&word) else {
            debug!("Trigger on {:?}: nothing to complete", word);
            return Outcome::Edited;
        };
        let Some(session) = AutocompleteSession::open(buffer.caret(), candidates) else {
            return Outcome::Edited;
        };

        let caret = buffer.caret_position();
        let items: Vec<PopupItem> = session.candidates().iter().map(PopupItem::from).collect();
        self.popup.show(
            CaretPosition {
                line: caret.line + 1,
                column: caret.column,
            },
            &items,
        );
        self.popup.highlight(session.selected());
        debug!("Opened session on {:?} with {} candidates", word, items.len());

        self.session = Some(session);
        Outcome::Opened
    }

    /// Keys the open session consumes. `None` means the key cancels.
    fn session_key(&mut self, buffer: &mut dyn TextBuffer, key: Key) -> Option<Outcome> {
        let session = self.session.as_mut()?;
        let outcome = match key {
            Key::Char(c) if c.is_alphanumeric() => {
                buffer.insert(c.encode_utf8(&mut [0u8; 4]));
                session.type_char(c);
                debug!("Filter {:?} -> {:?}", session.typed_prefix(), session.selected());
                self.popup.highlight(session.selected());
                Outcome::Filtered
            }
            Key::Up | Key::Down => {
                session.move_selection(if key == Key::Up { -1 } else { 1 });
                self.popup.highlight(session.selected());
                Outcome::Navigated
            }
            Key::Backspace => {
                buffer.delete_before();
                if !session.backspace() {
                    debug!("Trigger delimiter deleted");
                    return Some(self.close(CloseReason::Cancelled));
                }
                self.popup.highlight(session.selected());
                Outcome::Filtered
            }
            Key::Enter | Key::Tab | Key::Char(' ') => self.commit(buffer),
            _ => return None,
        };
        Some(outcome)
    }

    fn pick(&mut self, buffer: &mut dyn TextBuffer, index: usize) -> Outcome {
        let Some(session) = self.session.as_mut() else {
            return Outcome::Ignored;
        };
        if !session.select(index) {
            return Outcome::Ignored;
        }
        self.commit(buffer)
    }

    fn commit(&mut self, buffer: &mut dyn TextBuffer) -> Outcome {
        let Some(session) = self.session.as_ref() else {
            return Outcome::Ignored;
        };
        match session.commit() {
            Some(commit) => {
                let caret = commit.range.start + commit.text.len();
                debug!("Commit {:?} over {:?}", commit.text, commit.range);
                buffer.replace(commit.range, &commit.text);
                buffer.set_caret(caret);
                self.close(CloseReason::Committed)
            }
            None => {
                debug!("Commit key with no match, closing");
                self.close(CloseReason::Committed);
                Outcome::Closed
            }
        }
    }

    fn close(&mut self, reason: CloseReason) -> Outcome {
        self.session = None;
        self.popup.hide();
        match reason {
            CloseReason::Committed => Outcome::Committed,
            CloseReason::Cancelled => Outcome::Cancelled,
        }
    }

    fn show_definition(&mut self, buffer: &dyn TextBuffer) -> Outcome {
        let word = buffer.current_word();
        let Some(definition) = self.tree.definition(&word) else {
            debug!("No definition for {:?}", word);
            return Outcome::NoDefinition;
        };

        let layout = TooltipLayout::wrap(definition.text, self.config.tooltip.max_width);
        let caret = buffer.caret_position();
        self.tooltip.show(
            CaretPosition {
                line: caret.line + 1,
                column: caret.column,
            },
            &layout,
        );
        self.tooltip_visible = true;
        Outcome::DefinitionShown
    }

    /// Ordinary editing for keys no session claims.
    fn edit(&mut self, buffer: &mut dyn TextBuffer, key: Key) -> Outcome {
        match key {
            Key::Char(c) => buffer.insert(c.encode_utf8(&mut [0u8; 4])),
            Key::Enter => buffer.insert("\n"),
            Key::Tab => buffer.insert("\t"),
            Key::Backspace => {
                if buffer.delete_before().is_none() {
                    return Outcome::Ignored;
                }
            }
            Key::Left => {
                let text = buffer.text();
                let caret = floor_boundary(&text, buffer.caret());
                let Some(c) = text[..caret].chars().next_back() else {
                    return Outcome::Ignored;
                };
                let target = caret - c.len_utf8();
                drop(text);
                buffer.set_caret(target);
            }
            Key::Right => {
                let text = buffer.text();
                let caret = floor_boundary(&text, buffer.caret());
                let Some(c) = text[caret..].chars().next() else {
                    return Outcome::Ignored;
                };
                let target = caret + c.len_utf8();
                drop(text);
                buffer.set_caret(target);
            }
            Key::Up | Key::Down | Key::Escape | Key::Ctrl(_) | Key::Function(_) => {
                return Outcome::Ignored;
            }
        }
        Outcome::Edited
    }
}
