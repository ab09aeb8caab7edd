//! Backends: where frames end up.
//!
//! A `Surface` consumes `Frame`s produced by the renderer. The text surface
//! keeps the rasterized grid in memory (snapshots, tests); the terminal host
//! drives a real terminal with crossterm.

pub mod raster;
pub mod terminal;

use anyhow::Result;

use crate::types::Frame;
use raster::Grid;

pub trait Surface {
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// In-memory surface holding the last presented frame as text cells.
#[derive(Debug, Default)]
pub struct TextSurface {
    grid: Grid,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        raster::to_text(&self.grid)
    }
}

impl Surface for TextSurface {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.grid = raster::rasterize(frame);
        Ok(())
    }
}
