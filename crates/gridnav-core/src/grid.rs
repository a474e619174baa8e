//! The [`NavGrid`] type, a fixed-size 2D array of [`NavCell`]s.

use std::fmt;

use crate::cell::{CellFlags, NavCell};
use crate::error::{GridError, check_cost};
use crate::geom::{Point, Range};
use crate::policy::NavPolicy;

/// A fixed-size navigation grid that owns its cells in row-major order.
///
/// Dimensions never change after construction. Diagonal movement and corner
/// cutting are both off by default.
///
/// `Clone` copies cells as snapshots: payloads attached with
/// [`NavCell::set_user_data`] stay with the original grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct NavGrid {
    width: i32,
    height: i32,
    cells: Vec<NavCell>,
    allow_diagonal: bool,
    cut_corners: bool,
}

impl NavGrid {
    /// Create a `width` × `height` grid of walkable cells with cost 1.0.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let cells = Range::new(0, 0, width, height)
            .iter()
            .map(NavCell::open)
            .collect();
        Ok(Self {
            width,
            height,
            cells,
            allow_diagonal: false,
            cut_corners: false,
        })
    }

    /// Parse a grid from an ASCII map, one line per row.
    ///
    /// `.` is a walkable cell with cost 1, `#` a blocked cell, and a digit
    /// `0`-`9` a walkable cell with that cost. Surrounding whitespace of the
    /// whole text is ignored; every line must have the same width.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text.trim().lines().map(str::trim_end).collect();
        let width = lines.first().map_or(0, |l| l.chars().count()) as i32;
        let mut grid = Self::new(width, lines.len() as i32)?;
        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != width {
                return Err(GridError::InconsistentWidth { line: y });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let (flags, cost) = match ch {
                    '.' => (CellFlags::NONE, 1.0),
                    '#' => (CellFlags::BLOCKED, 1.0),
                    '0'..='9' => (CellFlags::NONE, ch.to_digit(10).unwrap_or(1) as f32),
                    _ => return Err(GridError::InvalidChar { ch, pos: p }),
                };
                let cell = grid.cell_mut(p).ok_or(GridError::OutOfBounds(p))?;
                cell.set_flags(flags);
                cell.set_cost(cost)?;
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (width, height).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The grid rectangle, `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.is_valid(p) {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn is_valid(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// The cell at `p`, or `None` if out of range.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&NavCell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutable access to the cell at `p`, or `None` if out of range.
    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut NavCell> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Cost of entering `p`, or `f32::INFINITY` if out of range.
    #[inline]
    pub fn cell_cost(&self, p: Point) -> f32 {
        NavPolicy::cell_cost(self, p)
    }

    /// Whether `p` is in range and not blocked.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        NavPolicy::is_walkable(self, p)
    }

    fn cell_checked(&mut self, p: Point) -> Result<&mut NavCell, GridError> {
        self.cell_mut(p).ok_or(GridError::OutOfBounds(p))
    }

    /// Set the movement cost of the cell at `p`.
    pub fn set_cell_cost(&mut self, p: Point, cost: f32) -> Result<(), GridError> {
        self.cell_checked(p)?.set_cost(cost)
    }

    /// Replace the flags of the cell at `p`.
    pub fn set_cell_flags(&mut self, p: Point, flags: CellFlags) -> Result<(), GridError> {
        self.cell_checked(p)?.set_flags(flags);
        Ok(())
    }

    /// Set or clear [`CellFlags::BLOCKED`] at `p`, keeping any other flags.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> Result<(), GridError> {
        let cell = self.cell_checked(p)?;
        let mut flags = cell.flags();
        flags.set(CellFlags::BLOCKED, blocked);
        cell.set_flags(flags);
        Ok(())
    }

    /// Assign `flags` and `cost` to every cell of `area`.
    ///
    /// The area is clipped to the grid; parts outside are ignored. Only an
    /// invalid cost is an error, in which case nothing is modified.
    pub fn fill_rect(&mut self, area: Range, flags: CellFlags, cost: f32) -> Result<(), GridError> {
        let cost = check_cost(cost)?;
        for p in area.intersect(self.bounds()) {
            if let Some(cell) = self.cell_mut(p) {
                cell.set_flags(flags);
                cell.set_cost(cost)?;
            }
        }
        Ok(())
    }

    /// Reset every cell to walkable with cost 1.0, dropping payloads.
    /// Dimensions and movement toggles are kept.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    #[inline]
    pub fn allow_diagonal(&self) -> bool {
        self.allow_diagonal
    }

    /// Enable or disable the four diagonal moves.
    #[inline]
    pub fn set_allow_diagonal(&mut self, allow: bool) {
        self.allow_diagonal = allow;
    }

    #[inline]
    pub fn cut_corners(&self) -> bool {
        self.cut_corners
    }

    /// Allow diagonal moves past a blocked flanking cell.
    #[inline]
    pub fn set_cut_corners(&mut self, cut: bool) {
        self.cut_corners = cut;
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[NavCell] {
        &self.cells
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, NavCell> {
        self.cells.iter()
    }
}

impl NavPolicy for NavGrid {
    #[inline]
    fn dimensions(&self) -> Point {
        self.size()
    }

    #[inline]
    fn cell(&self, p: Point) -> Option<&NavCell> {
        NavGrid::cell(self, p)
    }

    #[inline]
    fn allow_diagonal(&self) -> bool {
        self.allow_diagonal
    }

    #[inline]
    fn cut_corners(&self) -> bool {
        self.cut_corners
    }

    #[inline]
    fn is_valid(&self, p: Point) -> bool {
        NavGrid::is_valid(self, p)
    }
}

impl<'a> IntoIterator for &'a NavGrid {
    type Item = &'a NavCell;
    type IntoIter = std::slice::Iter<'a, NavCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for NavGrid {
    /// Render as ASCII: `#` blocked, `.` cost 1, a digit for other whole
    /// costs up to 9, `~` for anything else.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            for cell in row {
                let cost = cell.cost();
                let ch = if !cell.is_walkable() {
                    '#'
                } else if cost == 1.0 {
                    '.'
                } else if cost.fract() == 0.0 && cost <= 9.0 {
                    char::from_digit(cost as u32, 10).unwrap_or('~')
                } else {
                    '~'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    width: i32,
    height: i32,
    cells: Vec<NavCell>,
    allow_diagonal: bool,
    cut_corners: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for NavGrid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let mut grid = NavGrid::new(repr.width, repr.height)?;
        if repr.cells.len() != grid.cells.len() {
            return Err(GridError::CellCount {
                expected: grid.cells.len(),
                found: repr.cells.len(),
            });
        }
        for (slot, cell) in grid.cells.iter_mut().zip(repr.cells) {
            if slot.pos() != cell.pos() {
                return Err(GridError::OutOfBounds(cell.pos()));
            }
            *slot = cell;
        }
        grid.allow_diagonal = repr.allow_diagonal;
        grid.cut_corners = repr.cut_corners;
        Ok(grid)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = NavGrid::from_ascii(".#.\n.2.").unwrap();
        g.set_allow_diagonal(true);
        let json = serde_json::to_string(&g).unwrap();
        let back: NavGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        assert!(back.allow_diagonal());
    }

    #[test]
    fn mismatched_cells_rejected() {
        let g = NavGrid::new(2, 2).unwrap();
        let mut value = serde_json::to_value(&g).unwrap();
        value["width"] = serde_json::json!(3);
        assert!(serde_json::from_value::<NavGrid>(value).is_err());
    }
}
