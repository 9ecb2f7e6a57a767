//! Document model types.
//!
//! A [`Document`] owns an ordered list of [`Section`]s; each section owns an
//! ordered list of [`Element`]s, which are either plain text or a [`Table`].
//! Documents are built from validated requests by [`crate::build`] and are
//! not modified afterwards except to flip their state once rendered.

mod document;
mod section;
mod table;

pub use document::{Document, DocumentId, DocumentState, Orientation, PageSize, DEFAULT_AUTHOR};
pub use section::{Element, HeadingLevel, Section};
pub use table::Table;
