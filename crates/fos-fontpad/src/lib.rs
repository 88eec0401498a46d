//! fOS Fontpad - Font Preview Text Editor
//!
//! A text editor widget that previews its content in a chosen family,
//! weight and style:
//! - Editor state with pure transitions (text, family, weight, italic)
//! - Nearest-variant substitution when switching families
//! - Key/value persistence of the editor state
//! - Scoped activation of the selected font asset

pub mod config;
pub mod editor;
pub mod options;
pub mod shell;
pub mod state;
pub mod storage;
pub mod style;

pub use config::EditorConfig;
pub use editor::TextEditor;
pub use options::{family_options, italic_options, weight_options, SelectOption};
pub use shell::{execute, Command, Outcome};
pub use state::{EditorState, PreviewStyle};
pub use storage::{FileStorage, MemoryStorage, PersistedState, Storage, StorageError};
pub use style::{LinkElement, StyleHandle, StyleInjector, StyleSheetRegistry};

pub use fos_fonts as fonts;

use fos_fonts::FontError;

/// Editor error types
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Font(#[from] FontError),
    
    #[error(transparent)]
    Storage(#[from] StorageError),
    
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
    
    #[error("Invalid argument for {command}: {value}")]
    InvalidArgument { command: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, EditorError>;
