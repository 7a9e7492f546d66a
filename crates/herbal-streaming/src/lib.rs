//! Streaming primitives for shell-first pages.
//!
//! The shell goes out first with a placeholder per section; each section
//! is streamed later as a fill chunk that replaces its placeholder, in
//! whatever order the section's data arrives.
//!
//! - `Shell` / `HeadContent` - Page template around the slots
//! - `StreamingSink` - Enforces shell, then fills, then completion
//! - `slot` / `fill_slot` - Placeholder and fill chunk markup
//! - `escape_html` - Text and attribute escaping

mod html;
mod shell;
mod sink;
mod slots;

pub use html::*;
pub use shell::*;
pub use sink::*;
pub use slots::*;
