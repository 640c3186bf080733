//! Background map raster.

use std::{fs, path::Path, sync::Arc};

use anyhow::{Context, Result, ensure};
use base64::Engine as _;

use crate::common;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// A PNG image drawn beneath the markers, stretched over the whole canvas.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl BackgroundImage {
    /// Read a PNG file.
    pub fn read(path: &Path) -> Result<Self> {
        common::require_file_exists(path)?;
        let bytes = fs::read(path)
            .with_context(|| format!("[image] Failed to read {}", path.display()))?;
        Self::from_png_bytes(bytes)
            .with_context(|| format!("[image] {} is not a usable PNG", path.display()))
    }

    /// Wrap PNG bytes, reading the pixel size from the IHDR header.
    pub fn from_png_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self> {
        let bytes: Arc<[u8]> = bytes.into();
        ensure!(bytes.len() >= 24 && bytes[..8] == PNG_SIGNATURE, "[image] missing PNG signature");
        ensure!(bytes[12..16] == *b"IHDR", "[image] first PNG chunk is not IHDR");

        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        ensure!(width > 0 && height > 0, "[image] PNG has zero size ({width}x{height})");

        Ok(Self { bytes, width, height })
    }

    #[inline] pub fn width(&self) -> u32 { self.width }

    #[inline] pub fn height(&self) -> u32 { self.height }

    #[inline] pub fn bytes(&self) -> &[u8] { &self.bytes }

    /// The image inlined as a `data:` URI, usable as an SVG href or a Plotly image source.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", base64::engine::general_purpose::STANDARD.encode(&self.bytes))
    }

    /// Whether the raster has exactly the size of the canvas it is stretched over.
    pub fn fits_canvas(&self, width: f64, height: f64) -> bool {
        self.width as f64 == width && self.height as f64 == height
    }
}

/// Smallest byte sequence that passes header parsing; for tests.
#[cfg(test)]
pub(crate) fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}
