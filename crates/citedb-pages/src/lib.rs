//! citedb-pages
//!
//! Links a ranked entry back to a physical page: citation parsing, page-index
//! arithmetic and PNG snapshots of the companion document.

pub mod memory;
#[cfg(feature = "pdfium")]
pub mod pdfium;
pub mod resolve;
pub mod snapshot;

pub use memory::InMemoryDocument;
pub use resolve::{resolve_first_page, resolve_pages};
pub use snapshot::{render, SNAPSHOT_SCALE};
