use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tracing::{debug, warn};

use citedb_core::error::SnapshotError;
use citedb_core::traits::DocumentSource;
use citedb_core::types::Raster;

/// Linear upscale applied to every page snapshot.
pub const SNAPSHOT_SCALE: f32 = 2.0;

/// Render 1-indexed `page_number` of `source` as PNG bytes.
///
/// Page 0 clamps to the first page. The document is opened for this call only
/// and released before encoding.
pub fn render(page_number: u32, source: &dyn DocumentSource) -> Result<Vec<u8>, SnapshotError> {
    let index = page_number.saturating_sub(1) as usize;
    let raster = {
        let document = source.open().inspect_err(|e| warn!(document = %source.identity(), error = %e, "document unavailable"))?;
        let page_count = document.page_count();
        if index >= page_count {
            return Err(SnapshotError::PageOutOfRange { requested: page_number, page_count });
        }
        document.rasterize(index, SNAPSHOT_SCALE)?
    };
    debug!(page = page_number, width = raster.width, height = raster.height, "rasterized page");
    encode_png(page_number, raster)
}

fn encode_png(page: u32, raster: Raster) -> Result<Vec<u8>, SnapshotError> {
    let Raster { width, height, rgba } = raster;
    let image = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| SnapshotError::Render {
        page,
        reason: format!("raster buffer does not match {width}x{height} RGBA"),
    })?;
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| SnapshotError::Render { page, reason: e.to_string() })?;
    Ok(bytes)
}
