//! A document held entirely in memory: fixed page sizes, deterministic pixels.
//!
//! Used when no real document backend is compiled in, and by tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use citedb_core::error::SnapshotError;
use citedb_core::traits::{DocumentSource, OpenDocument};
use citedb_core::types::Raster;

pub struct InMemoryDocument {
    name: String,
    /// Unscaled `(width, height)` of each page.
    pages: Vec<(u32, u32)>,
    unavailable: Option<String>,
    opens: AtomicUsize,
}

impl InMemoryDocument {
    pub fn new(name: &str, pages: Vec<(u32, u32)>) -> Self {
        Self { name: name.to_string(), pages, unavailable: None, opens: AtomicUsize::new(0) }
    }

    /// A document whose every `open` fails with `reason`.
    pub fn unavailable(name: &str, reason: &str) -> Self {
        Self { unavailable: Some(reason.to_string()), ..Self::new(name, Vec::new()) }
    }

    /// How many handles have been opened so far.
    pub fn opens(&self) -> usize { self.opens.load(Ordering::SeqCst) }
}

impl DocumentSource for InMemoryDocument {
    fn identity(&self) -> String { format!("memory:{}", self.name) }

    fn open(&self) -> Result<Box<dyn OpenDocument + '_>, SnapshotError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.unavailable {
            return Err(SnapshotError::DocumentUnavailable(reason.clone()));
        }
        Ok(Box::new(Handle { pages: &self.pages }))
    }
}

struct Handle<'a> {
    pages: &'a [(u32, u32)],
}

impl OpenDocument for Handle<'_> {
    fn page_count(&self) -> usize { self.pages.len() }

    fn rasterize(&self, index: usize, scale: f32) -> Result<Raster, SnapshotError> {
        let page = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let &(w, h) = self.pages.get(index).ok_or(SnapshotError::PageOutOfRange { requested: page, page_count: self.pages.len() })?;
        let width = (w as f32 * scale).round() as u32;
        let height = (h as f32 * scale).round() as u32;
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                // Page index tints the red channel so pages are distinguishable.
                rgba.extend_from_slice(&[(index as u8).wrapping_mul(37), (x % 256) as u8, (y % 256) as u8, 255]);
            }
        }
        Ok(Raster { width, height, rgba })
    }
}
