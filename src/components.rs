//! Reusable HTML components for page generation
//!
//! Maud component functions wrapping rendered markdown into a standalone
//! page.

pub mod layout;
pub mod readme;
