//! PDF backend bound to a PDFium shared library.
//!
//! The library is bound once per source; the PDF file itself is parsed again on
//! every `open` and closed when the handle drops.

use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;

use citedb_core::error::SnapshotError;
use citedb_core::traits::{DocumentSource, OpenDocument};
use citedb_core::types::Raster;

pub struct PdfiumDocument {
    pdfium: Pdfium,
    path: PathBuf,
}

impl PdfiumDocument {
    /// Bind PDFium from `library_dir`, or from the system library path when `None`.
    pub fn new(path: &Path, library_dir: Option<&Path>) -> Result<Self, SnapshotError> {
        let bindings = match library_dir {
            Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| SnapshotError::DocumentUnavailable(format!("PDFium library not found: {e}")))?;
        Ok(Self { pdfium: Pdfium::new(bindings), path: path.to_path_buf() })
    }
}

impl DocumentSource for PdfiumDocument {
    fn identity(&self) -> String { format!("pdf:{}", self.path.display()) }

    fn open(&self) -> Result<Box<dyn OpenDocument + '_>, SnapshotError> {
        let document = self
            .pdfium
            .load_pdf_from_file(&self.path, None)
            .map_err(|e| SnapshotError::DocumentUnavailable(format!("{}: {e}", self.path.display())))?;
        Ok(Box::new(PdfHandle { document }))
    }
}

struct PdfHandle<'a> {
    document: PdfDocument<'a>,
}

impl OpenDocument for PdfHandle<'_> {
    fn page_count(&self) -> usize { self.document.pages().len() as usize }

    fn rasterize(&self, index: usize, scale: f32) -> Result<Raster, SnapshotError> {
        let page_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let render_err = |e: PdfiumError| SnapshotError::Render { page: page_number, reason: e.to_string() };
        let page_index: PdfPageIndex = index.try_into().map_err(|_| SnapshotError::PageOutOfRange { requested: page_number, page_count: self.page_count() })?;
        let page = self.document.pages().get(page_index).map_err(render_err)?;
        let bitmap = page.render_with_config(&PdfRenderConfig::new().scale_page_by_factor(scale)).map_err(render_err)?;
        Ok(Raster { width: bitmap.width() as u32, height: bitmap.height() as u32, rgba: bitmap.as_rgba_bytes() })
    }
}
