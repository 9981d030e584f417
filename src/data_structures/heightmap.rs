//! Heightmap images and nearest-sample height lookup.
//!
//! [`HeightImage`] owns decoded RGBA8 pixel data and hands out single bytes
//! through a bounds-checked accessor. [`HeightmapSampler`] maps terrain grid
//! coordinates onto that image without any interpolation: every vertex reads
//! exactly one texel.

use crate::error::SceneError;

/// A decoded, tightly packed RGBA8 image used as a displacement source.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl HeightImage {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Wraps raw RGBA8 bytes, rows top to bottom.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::DegenerateGeometry(format!(
                "heightmap has no pixels ({}x{})",
                width, height
            )));
        }
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(SceneError::DegenerateGeometry(format!(
                "heightmap {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_image(img: &image::DynamicImage) -> Result<Self, SceneError> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// First channel of the pixel at (`column`, `row`), or `None` outside the image.
    pub fn sample(&self, column: u32, row: u32) -> Option<u8> {
        if column >= self.width || row >= self.height {
            return None;
        }
        let offset = (row as usize * self.width as usize + column as usize) * Self::BYTES_PER_PIXEL;
        self.pixels.get(offset).copied()
    }
}

/// Maps a `verts_x` by `verts_z` vertex grid onto a [`HeightImage`].
#[derive(Clone, Debug)]
pub struct HeightmapSampler {
    image: HeightImage,
    divisor: f32,
}

impl HeightmapSampler {
    pub const DEFAULT_DIVISOR: f32 = 3.0;

    pub fn new(image: HeightImage) -> Self {
        Self {
            image,
            divisor: Self::DEFAULT_DIVISOR,
        }
    }

    pub fn with_divisor(mut self, divisor: f32) -> Self {
        self.divisor = divisor;
        self
    }

    pub fn image(&self) -> &HeightImage {
        &self.image
    }

    /// Image texel that grid vertex (`column`, `row`) reads from.
    ///
    /// The grid-to-image ratio is computed in floating point and the product
    /// truncated, so neighbouring vertices may share a texel on small images.
    pub fn texel_for(&self, column: u32, row: u32, verts_x: u32, verts_z: u32) -> (u32, u32) {
        let x_ratio = self.image.width as f32 / verts_x as f32;
        let z_ratio = self.image.height as f32 / verts_z as f32;
        let image_x = ((column as f32 * x_ratio) as u32).min(self.image.width - 1);
        let image_z = ((row as f32 * z_ratio) as u32).min(self.image.height - 1);
        (image_x, image_z)
    }

    pub fn height_at(&self, column: u32, row: u32, verts_x: u32, verts_z: u32) -> f32 {
        let (image_x, image_z) = self.texel_for(column, row, verts_x, verts_z);
        // texel_for clamps into the image, so the sample is always present
        let value = self.image.sample(image_x, image_z).unwrap_or(0);
        value as f32 / self.divisor
    }

    /// Heights for the whole grid, indexed `row * verts_x + column`.
    pub fn height_field(&self, verts_x: u32, verts_z: u32) -> Vec<f32> {
        (0..verts_z)
            .flat_map(|row| {
                (0..verts_x).map(move |column| self.height_at(column, row, verts_x, verts_z))
            })
            .collect()
    }
}
