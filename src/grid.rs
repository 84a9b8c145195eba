use crate::{helpers, point::*, KMeansError, Result};
use std::fmt;

const EMPTY_CELL: char = '.';

/// A bounded character grid, onto which samples and centroids are projected for rendering.
///
/// Cells are addressed Cartesian-style: `x` grows to the right, `y` grows upwards. When rendered
/// (see the [`fmt::Display`] implementation), the row with the highest `y` is printed first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>
}
impl Grid {
    /// Create an empty grid. Both dimensions have to be at least 1, and the cell count has to fit a `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        match width.checked_mul(height) {
            Some(cnt) if cnt > 0 => Ok(Self { width, height, cells: vec![EMPTY_CELL;cnt] }),
            _ => Err(KMeansError::InvalidGrid { width, height })
        }
    }

    /// Project a clustering result onto a **width** x **height** grid.
    ///
    /// Each coordinate is rounded to the nearest integer (halfway cases to even) and clamped into the grid.
    /// Samples are drawn first, marked with the last digit of their cluster index. Centroids are drawn
    /// afterwards in ascending order, marked with the letters `A`-`J` (cluster index modulo 10), so a
    /// centroid always hides samples in the same cell and later centroids hide earlier ones.
    pub fn project<T: Primitive>(samples: &[Point<T>], centroids: &[Point<T>], assignments: &[usize], width: usize, height: usize) -> Result<Self> {
        if samples.len() != assignments.len() {
            return Err(KMeansError::AssignmentLengthMismatch { expected: samples.len(), actual: assignments.len() });
        }
        let mut grid = Self::new(width, height)?;
        samples.iter().zip(assignments.iter().cloned())
            .for_each(|(s, cluster)| grid.mark(&s.to_f64(), helpers::sample_glyph(cluster)));
        centroids.iter().enumerate()
            .for_each(|(ci, c)| grid.mark(&c.to_f64(), helpers::centroid_glyph(ci)));
        Ok(grid)
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Cells of row **y**, from `x = 0` to `x = width - 1`.
    pub fn row(&self, y: usize) -> Option<&[char]> {
        if y < self.height {
            Some(&self.cells[y * self.width..(y + 1) * self.width])
        } else {
            None
        }
    }

    fn mark(&mut self, p: &Point<f64>, glyph: char) {
        let (x, y) = (to_cell(p.x, self.width), to_cell(p.y, self.height));
        self.cells[y * self.width + x] = glyph;
    }
}

fn to_cell(v: f64, size: usize) -> usize {
    let r = v.round_ties_even();
    if !(r > 0.0) { // also catches NaN
        0
    } else if r >= (size - 1) as f64 {
        size - 1
    } else {
        r as usize
    }
}

impl fmt::Display for Grid {
    /// Framed rendering with two header rows (tens and units of the x coordinate) and the y coordinate in
    /// front of every row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tens: String = (0..self.width)
            .map(|x| if x < 10 { ' ' } else { (b'0' + ((x / 10) % 10) as u8) as char })
            .collect();
        let units: String = (0..self.width).map(|x| (b'0' + (x % 10) as u8) as char).collect();
        let border = format!("  +{}+", "-".repeat(self.width));

        writeln!(f, "   {}", tens)?;
        writeln!(f, "   {}", units)?;
        writeln!(f, "{}", border)?;
        for y in (0..self.height).rev() {
            writeln!(f, "{:2}|{}|", y, self.cells[y * self.width..(y + 1) * self.width].iter().collect::<String>())?;
        }
        write!(f, "{}", border)
    }
}
