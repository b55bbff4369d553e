//! Turning editor state into terminal output

pub mod screen;

#[cfg(feature = "runtime")]
pub mod render;
#[cfg(feature = "runtime")]
pub mod theme;
