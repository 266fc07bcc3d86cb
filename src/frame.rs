// SPDX-License-Identifier: GPL-3.0-only

//! Owned pixel buffers and the live camera boundary
//!
//! A [`Frame`] is always handed across thread boundaries by move or deep
//! copy; no buffer is ever aliased on the sending side.

use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageError, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// An owned RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Tightly packed RGBA8 data, `width * height * 4` bytes
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap raw RGBA8 data. Returns `None` if the byte length does not
    /// match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// A single-color frame; handy for tests and the idle fallback
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Decode an image file into a frame
    pub fn open(path: &Path) -> Result<Self, ImageError> {
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    /// Encode the frame as PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>, ImageError> {
        let img = RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(
            || {
                ImageError::Parameter(ParameterError::from_kind(
                    ParameterErrorKind::DimensionMismatch,
                ))
            },
        )?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Read the pixel at (x, y); panics outside bounds, test helper only
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// Boundary to the external live camera feed.
///
/// The surrounding application implements this; the session controller only
/// ever asks for the most recent frame, which it receives as an owned copy.
pub trait CameraFeed: Send + Sync {
    /// The latest available preview frame, if the feed has produced one
    fn latest_frame(&self) -> Option<Frame>;
}
