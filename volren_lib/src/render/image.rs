use std::slice::ChunksExactMut;

use crate::color::{self, RGBA};

use super::RenderType;

/// Float image, four channels per pixel, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    render_type: RenderType,
    data: Vec<f32>,
}

impl Image {
    /// Zeroed image.
    pub fn new(width: usize, height: usize, render_type: RenderType) -> Image {
        Image {
            width,
            height,
            render_type,
            data: vec![0.0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn render_type(&self) -> RenderType {
        self.render_type
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<RGBA> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = &self.data[i..i + 4];
        Some(color::new(p[0], p[1], p[2], p[3]))
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: &RGBA) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(rgba.as_slice());
    }

    /// Mutable rows, `width * 4` floats each.
    pub fn rows_mut(&mut self) -> ChunksExactMut<'_, f32> {
        // Zero width images have no rows
        self.data.chunks_exact_mut(usize::max(self.width * 4, 4))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// 8 bit RGBA for display.
    ///
    /// Transmittance is turned into opacity, channels are clamped to `<0;1>`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let invert_last = self.render_type.is_transmittance();
        self.data
            .chunks_exact(4)
            .flat_map(|p| {
                let alpha = if invert_last { 1.0 - p[3] } else { p[3] };
                [p[0], p[1], p[2], alpha]
            })
            .map(|v| (v.clamp(0.0, 1.0) * 255.0) as u8)
            .collect()
    }
}
