//! Text rasterizer: turns a `Frame` into a grid of character cells.
//!
//! One cell covers `[col, col + 1) × [row, row + 1)` in frame coordinates.
//! Commands paint in ascending z-order; everything is clipped to the frame.

use crate::types::{Align, DrawCmd, Frame, Point, Primitive, Rect, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell { ch: ' ', style: Style::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

pub type Grid = Vec<Vec<Cell>>;

struct Canvas {
    grid: Grid,
    w: i64,
    h: i64,
}

impl Canvas {
    fn get_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.w || row >= self.h {
            return None;
        }
        Some(&mut self.grid[row as usize][col as usize])
    }

    /// Draw a glyph, keeping the background underneath unless the style sets one.
    fn put(&mut self, col: i64, row: i64, ch: char, style: &Style) {
        if let Some(cell) = self.get_mut(col, row) {
            let bg = style.bg.or(cell.style.bg);
            cell.ch = ch;
            cell.style = Style { bg, ..*style };
        }
    }

    fn paint_bg(&mut self, col: i64, row: i64, style: Style) {
        if let Some(cell) = self.get_mut(col, row) {
            cell.ch = ' ';
            cell.style = style;
        }
    }
}

fn cell_span(start: f64, end: f64) -> std::ops::Range<i64> {
    if !(start.is_finite() && end.is_finite()) {
        return 0..0;
    }
    (start.round() as i64)..(end.round() as i64)
}

fn cell_of(p: Point) -> Option<(i64, i64)> {
    (p.x.is_finite() && p.y.is_finite()).then(|| (p.x.floor() as i64, p.y.floor() as i64))
}

/// Rasterize a frame onto a fresh `height × width` grid.
pub fn rasterize(frame: &Frame) -> Grid {
    let mut canvas = Canvas {
        grid: vec![vec![Cell::default(); frame.width as usize]; frame.height as usize],
        w: frame.width as i64,
        h: frame.height as i64,
    };

    let mut cmds: Vec<&DrawCmd> = frame.cmds.iter().collect();
    // Stable sort: equal z keeps emission order.
    cmds.sort_by_key(|cmd| cmd.z_order);

    for cmd in cmds {
        match &cmd.prim {
            Primitive::Fill(rect) => fill(&mut canvas, rect, &cmd.style),
            Primitive::Stroke(rect) => stroke(&mut canvas, rect, &cmd.style),
            Primitive::Circle { center, radius, filled } => {
                circle(&mut canvas, *center, *radius, *filled, &cmd.style)
            }
            Primitive::Line { from, to } => line(&mut canvas, *from, *to, &cmd.style),
            Primitive::Text { at, text, align } => {
                draw_text(&mut canvas, *at, text, *align, &cmd.style)
            }
        }
    }

    canvas.grid
}

fn fill(canvas: &mut Canvas, rect: &Rect, style: &Style) {
    let paint = Style { fg: None, bold: false, ..*style };
    for row in cell_span(rect.y, rect.bottom()) {
        for col in cell_span(rect.x, rect.right()) {
            canvas.paint_bg(col, row, paint);
        }
    }
}

fn stroke(canvas: &mut Canvas, rect: &Rect, style: &Style) {
    let cols = cell_span(rect.x, rect.right());
    let rows = cell_span(rect.y, rect.bottom());
    if cols.is_empty() || rows.is_empty() {
        return;
    }
    let (left, right) = (cols.start, cols.end - 1);
    let (top, bottom) = (rows.start, rows.end - 1);

    for col in cols.clone() {
        canvas.put(col, top, '─', style);
        canvas.put(col, bottom, '─', style);
    }
    for row in rows {
        canvas.put(left, row, '│', style);
        canvas.put(right, row, '│', style);
    }
    if top != bottom && left != right {
        canvas.put(left, top, '┌', style);
        canvas.put(right, top, '┐', style);
        canvas.put(left, bottom, '└', style);
        canvas.put(right, bottom, '┘', style);
    }
}

/// Cells whose centers fall inside the circle. Filled circles paint their
/// foreground color as background; outlines draw a dot ring.
fn circle(canvas: &mut Canvas, center: Point, radius: f64, filled: bool, style: &Style) {
    if !(radius.is_finite() && radius > 0.0) {
        return;
    }
    let bounds = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
    let rows = (bounds.y.floor() as i64)..(bounds.bottom().ceil() as i64);
    let cols = (bounds.x.floor() as i64)..(bounds.right().ceil() as i64);

    for row in rows {
        for col in cols.clone() {
            let d = Point::new(col as f64 + 0.5, row as f64 + 0.5).distance(center);
            if filled && d <= radius {
                let bg = Style { fg: None, bg: style.fg.or(style.bg), ..*style };
                canvas.paint_bg(col, row, bg);
            } else if !filled && (d - radius).abs() < 0.5 {
                canvas.put(col, row, '·', style);
            }
        }
    }
}

fn line(canvas: &mut Canvas, from: Point, to: Point, style: &Style) {
    let (Some(_), Some(_)) = (cell_of(from), cell_of(to)) else {
        return;
    };
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let ch = if dy.abs() * 2.0 <= dx.abs() {
        '─'
    } else if dx.abs() * 2.0 <= dy.abs() {
        '│'
    } else if (dx > 0.0) == (dy > 0.0) {
        '╲'
    } else {
        '╱'
    };

    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        if let Some((col, row)) = cell_of(Point::new(from.x + dx * t, from.y + dy * t)) {
            canvas.put(col, row, ch, style);
        }
    }
}

fn draw_text(canvas: &mut Canvas, at: Point, text: &str, align: Align, style: &Style) {
    if !(at.x.is_finite() && at.y.is_finite()) {
        return;
    }
    let width = text.chars().count() as f64;
    let start = match align {
        Align::Left => at.x,
        Align::Center => at.x - width / 2.0,
        Align::Right => at.x - width,
    };
    let row = at.y.floor() as i64;
    let start = start.round() as i64;
    for (i, ch) in text.chars().enumerate() {
        canvas.put(start + i as i64, row, ch, style);
    }
}

/// Cell-level changes turning `prev` into `next`. Both grids must have the
/// same dimensions; callers repaint fully on resize.
pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
    let mut changes = Vec::new();
    for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
        for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
            if prev_cell != next_cell {
                changes.push(CellChange {
                    x: x as u16,
                    y: y as u16,
                    cell: next_cell.clone(),
                });
            }
        }
    }
    changes
}

/// Plain characters of a grid, one line per row, trailing blanks trimmed.
pub fn to_text(grid: &[Vec<Cell>]) -> String {
    let mut out = String::new();
    for row in grid {
        let line: String = row.iter().map(|c| c.ch).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "raster_test.rs"]
mod tests;
