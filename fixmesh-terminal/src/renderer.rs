/// ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use fixmesh_core::{Canvas, Polygon, ScreenPoint, Viewport};
use std::io::Write;

/// Character used for viewport borders.
const FRAME_CHAR: char = '.';

/// Renders stroked polygons into a character buffer.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Put `character` at `point`; anything off the buffer is ignored.
    pub fn mark(&mut self, point: ScreenPoint, character: char) {
        if point.x < 0 || point.y < 0 {
            return;
        }
        let (x, y) = (point.x as usize, point.y as usize);
        if x < self.width && y < self.height {
            self.char_buffer[y * self.width + x] = character;
        }
    }

    /// Outline `viewport` so the visible region is obvious on screen.
    pub fn frame(&mut self, viewport: Viewport) {
        let (x0, y0) = (viewport.x, viewport.y);
        let (x1, y1) = (viewport.x + viewport.width - 1, viewport.y + viewport.height - 1);
        for x in x0..=x1 {
            self.mark(ScreenPoint::new(x, y0), FRAME_CHAR);
            self.mark(ScreenPoint::new(x, y1), FRAME_CHAR);
        }
        for y in y0..=y1 {
            self.mark(ScreenPoint::new(x0, y), FRAME_CHAR);
            self.mark(ScreenPoint::new(x1, y), FRAME_CHAR);
        }
    }

    /// Bresenham line from `a` to `b`, glyph picked from the slope.
    fn line(&mut self, a: ScreenPoint, b: ScreenPoint) {
        let character = slope_char(a, b);
        let (dx, dy) = ((b.x - a.x).abs(), -(b.y - a.y).abs());
        let (sx, sy) = ((b.x - a.x).signum(), (b.y - a.y).signum());
        let (mut x, mut y) = (a.x, a.y);
        let mut err = dx + dy;

        loop {
            self.mark(ScreenPoint::new(x, y), character);
            if x == b.x && y == b.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    FRAME_CHAR => Color::DarkGrey,
                    '@' => Color::Yellow,
                    ' ' => Color::Reset,
                    _ => Color::Cyan,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Canvas for AsciiRenderer {
    fn stroke_polygon(&mut self, polygon: &Polygon) {
        for (a, b) in polygon.edges() {
            self.line(a, b);
        }
    }
}

fn slope_char(a: ScreenPoint, b: ScreenPoint) -> char {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    if dx == 0 && dy == 0 {
        '+'
    } else if dy.abs() * 2 < dx.abs() {
        '-'
    } else if dx.abs() * 2 < dy.abs() {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}
