//! Quill Intellisense — Autocomplete sessions and definition tooltips over a
//! host text buffer

pub mod buffer;
pub mod config;
pub mod controller;
pub mod keys;
pub mod session;
pub mod widgets;


pub use buffer::{CaretPosition, MemoryBuffer, TextBuffer};
pub use config::{ConfigError, IntellisenseConfig, KeyBindings, TooltipConfig, DEFAULT_TOOLTIP_WIDTH};
pub use controller::{Intellisense, Outcome};
pub use keys::{parse_script, InputEvent, Key, KeyParseError};
pub use session::{AutocompleteSession, CloseReason, Commit, SessionState};
pub use widgets::{CompletionPopup, HeadlessPopup, HeadlessTooltip, PopupItem, Tooltip, TooltipLayout};
