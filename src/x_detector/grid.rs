//! Flat, column-major 2D grid shared by every pipeline stage
//!
//! Cells are addressed `[x][y]` and stored at `x * height + y`, which is also
//! the order raw color samples arrive in. Grids are never resized or mutated
//! after construction; every stage builds a new one with [`Grid::from_fn`].

/// The four axis directions (left, right, up, down) as unit offsets
pub const AXIS_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A 2D grid of cells with fixed dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell in storage order
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Wrap an existing x-major buffer; callers guarantee `cells.len() == width * height`
    pub(crate) fn from_raw(width: usize, height: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Storage index of cell (x, y)
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Value at (x, y). Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "cell ({x},{y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.cells[self.index(x, y)]
    }

    /// Coordinates of (x + dx, y + dy) if they fall inside the grid
    #[inline]
    pub fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    /// All cells in storage order
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate `(x, y, value)` in storage order (x outer, y inner)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &value)| (i / height, i % height, value))
    }

    /// True when both grids cover the same width and height
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}
