//! Raster surfaces and the offscreen working buffer.

use crate::composite::over_in_place;
use crate::error::EngineError;

/// How committed pixels combine with what the surface already shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitMode {
    /// Composite over existing content (incremental deltas).
    Over,
    /// Overwrite existing content (full repaints).
    Replace,
}

/// A caller-supplied raster target.
///
/// The engine never owns the visible surface; it only commits premultiplied
/// RGBA8 pixels into it. `pixels` always covers the full surface
/// (`width * height * 4` bytes, row-major).
pub trait RasterSurface {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    fn blit(&mut self, pixels: &[u8], mode: BlitMode) -> Result<(), EngineError>;
}

/// An in-memory surface backed by a `vello_cpu` pixmap; the default target
/// for headless callers and tests.
pub struct PixmapSurface {
    pixmap: vello_cpu::Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            pixmap: vello_cpu::Pixmap::new(width, height),
        }
    }

    /// Premultiplied RGBA8 contents, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u16, y: u16) -> [u8; 4] {
        let idx = (usize::from(y) * usize::from(self.pixmap.width()) + usize::from(x)) * 4;
        let data = self.data();
        [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
    }

    /// Replace the backing pixmap. Contents are dropped; per the resize
    /// contract the caller follows up with `render()`.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.pixmap = vello_cpu::Pixmap::new(width, height);
    }
}

impl RasterSurface for PixmapSurface {
    fn width(&self) -> u16 {
        self.pixmap.width()
    }

    fn height(&self) -> u16 {
        self.pixmap.height()
    }

    fn blit(&mut self, pixels: &[u8], mode: BlitMode) -> Result<(), EngineError> {
        let data = self.pixmap.data_as_u8_slice_mut();
        if pixels.len() != data.len() {
            return Err(EngineError::BufferMismatch {
                expected: data.len(),
                got: pixels.len(),
            });
        }
        match mode {
            BlitMode::Replace => data.copy_from_slice(pixels),
            BlitMode::Over => over_in_place(data, pixels)?,
        }
        Ok(())
    }
}

/// The engine's offscreen working buffer. All drawing lands here first;
/// commit moves the pixels to the visible surface and clears this buffer.
pub struct Offscreen {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl Offscreen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Run drawing ops through a fresh context and rasterize them over the
    /// buffer's current content.
    pub fn paint(&mut self, ops: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ops(&mut ctx);
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_replace_then_over() {
        let mut surface = PixmapSurface::new(2, 1);
        let red = [255, 0, 0, 255, 255, 0, 0, 255];
        surface.blit(&red, BlitMode::Replace).unwrap();
        assert_eq!(surface.pixel(0, 0), [255, 0, 0, 255]);

        // Transparent delta leaves the base untouched.
        let clear = [0u8; 8];
        surface.blit(&clear, BlitMode::Over).unwrap();
        assert_eq!(surface.pixel(1, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_blit_size_mismatch_is_fatal() {
        let mut surface = PixmapSurface::new(2, 2);
        let err = surface.blit(&[0u8; 4], BlitMode::Replace).unwrap_err();
        assert!(matches!(err, EngineError::BufferMismatch { .. }));
    }

    #[test]
    fn test_offscreen_paint_and_clear() {
        let mut offscreen = Offscreen::new(4, 4);
        offscreen.paint(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 255, 0, 255));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 4.0, 4.0));
        });
        assert!(offscreen.data().iter().any(|&b| b != 0));

        offscreen.clear();
        assert!(offscreen.data().iter().all(|&b| b == 0));
    }
}
