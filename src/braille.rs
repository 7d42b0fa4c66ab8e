//! Sub-cell drawing surface: every terminal cell holds a 2x4 braille dot grid.

/// Dot bits of a braille cell, indexed by (row, column) inside the cell
const DOT_BITS: [[u8; 2]; 4] = [
    [0x01, 0x08],
    [0x02, 0x10],
    [0x04, 0x20],
    [0x40, 0x80],
];

/// Grid of dots with an intensity per dot (0 = empty)
pub struct BrailleCanvas {
    width: usize,
    height: usize,
    dots: Vec<Vec<u8>>,
}

impl BrailleCanvas {
    /// Canvas covering `cols` x `rows` terminal cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        let width = cols as usize * 2;
        let height = rows as usize * 4;
        Self {
            width,
            height,
            dots: vec![vec![0; width]; height],
        }
    }

    /// Size in dots.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    pub fn clear(&mut self) {
        for row in &mut self.dots {
            row.fill(0);
        }
    }

    /// Set a dot, keeping the brighter of the old and new intensity.
    pub fn plot(&mut self, x: i32, y: i32, intensity: u8) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let dot = &mut self.dots[y as usize][x as usize];
            *dot = (*dot).max(intensity);
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.dots.get(y).and_then(|row| row.get(x)).copied().unwrap_or(0)
    }

    /// Bresenham line between two dot positions.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, intensity: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.plot(x, y, intensity);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if x == x1 {
                    break;
                }
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                if y == y1 {
                    break;
                }
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled diamond of the given radius.
    pub fn diamond(&mut self, x: i32, y: i32, radius: i32, intensity: u8) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs() + dy.abs() <= radius {
                    self.plot(x + dx, y + dy, intensity);
                }
            }
        }
    }

    /// Braille character and peak intensity for terminal cell (cx, cy), or
    /// `None` when the cell is empty.
    pub fn cell(&self, cx: usize, cy: usize) -> Option<(char, u8)> {
        let mut bits: u8 = 0;
        let mut peak: u8 = 0;
        for (row, row_bits) in DOT_BITS.iter().enumerate() {
            for (col, &bit) in row_bits.iter().enumerate() {
                let value = self.get(cx * 2 + col, cy * 4 + row);
                if value > 0 {
                    bits |= bit;
                    peak = peak.max(value);
                }
            }
        }
        if bits == 0 {
            return None;
        }
        char::from_u32(0x2800 + bits as u32).map(|ch| (ch, peak))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cell_is_none() {
        let canvas = BrailleCanvas::new(2, 2);
        assert_eq!(canvas.cell(0, 0), None);
    }

    #[test]
    fn dot_bits_follow_braille_layout() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.plot(0, 0, 1);
        assert_eq!(canvas.cell(0, 0), Some(('\u{2801}', 1)));
        canvas.plot(1, 3, 2);
        assert_eq!(canvas.cell(0, 0), Some(('\u{2881}', 2)));
    }

    #[test]
    fn full_cell() {
        let mut canvas = BrailleCanvas::new(1, 1);
        for y in 0..4 {
            for x in 0..2 {
                canvas.plot(x, y, 1);
            }
        }
        assert_eq!(canvas.cell(0, 0), Some(('\u{28FF}', 1)));
    }

    #[test]
    fn plot_keeps_brightest() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.plot(0, 0, 3);
        canvas.plot(0, 0, 1);
        assert_eq!(canvas.get(0, 0), 3);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.plot(-1, 0, 1);
        canvas.plot(2, 0, 1);
        canvas.plot(0, 4, 1);
        assert_eq!(canvas.cell(0, 0), None);
    }

    #[test]
    fn line_covers_both_ends() {
        let mut canvas = BrailleCanvas::new(4, 2);
        canvas.line(0, 0, 7, 7, 1);
        assert_eq!(canvas.get(0, 0), 1);
        assert_eq!(canvas.get(7, 7), 1);
        assert_eq!(canvas.get(3, 3), 1);
    }
}
