// Editor library - exposes all core modules for testing

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod event;
pub mod highlight;
pub mod row;
pub mod search;
pub mod syntax;
pub mod view;
pub mod viewport;

#[cfg(feature = "runtime")]
pub mod input;

// Re-export commonly used types
pub use config::Config;
pub use document::Document;
pub use editor::Editor;
pub use error::{EditorError, Result};
pub use highlight::HighlightClass;
pub use row::Row;
