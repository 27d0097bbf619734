//! Resume profile editing.

#![warn(missing_docs)]

mod editor;

pub use editor::{add_completed_skill, EditorError, ProfileEditor, Result};
