/// Canonical slot addressing for the unique edges of the triangulated grid.
///
/// Every cell contributes three slots (its diagonal, its left vertical edge,
/// and its top horizontal edge); the rightmost column's vertical edges and
/// the bottom row's horizontal edges are appended as remainders. Adjacent
/// triangles sharing an edge therefore address the same slot, which is what
/// welds crossing vertices across cell boundaries.
///
/// Total slot count is `3·W·H + W + H`, so every slot index stays far below
/// the restart sentinel for any legal grid.
#[derive(Debug, Copy, Clone)]
pub struct EdgeSlots {
    width: u32,
    height: u32,
}

impl EdgeSlots {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of unique edges: `3·W·H + W + H`.
    #[inline]
    pub fn count(&self) -> usize {
        let (w, h) = (self.width as usize, self.height as usize);
        3 * w * h + w + h
    }

    #[inline]
    fn cell_base(&self, i: u32, j: u32) -> u32 {
        3 * (i * self.height + j)
    }

    /// Slot of the diagonal edge of cell `(i, j)`, from corner `(i, j)` to
    /// corner `(i+1, j+1)`.
    #[inline]
    pub fn diagonal(&self, i: u32, j: u32) -> u32 {
        debug_assert!(i < self.width && j < self.height);
        self.cell_base(i, j)
    }

    /// Slot of the vertical edge from `(i, j)` to `(i, j+1)`.
    #[inline]
    pub fn vertical(&self, i: u32, j: u32) -> u32 {
        debug_assert!(i <= self.width && j < self.height);
        if i < self.width {
            self.cell_base(i, j) + 1
        } else {
            // Rightmost column remainder.
            3 * self.width * self.height + j
        }
    }

    /// Slot of the horizontal edge from `(i, j)` to `(i+1, j)`.
    #[inline]
    pub fn horizontal(&self, i: u32, j: u32) -> u32 {
        debug_assert!(i < self.width && j <= self.height);
        if j < self.height {
            self.cell_base(i, j) + 2
        } else {
            // Bottom row remainder.
            3 * self.width * self.height + self.height + i
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_edge_census() {
        // vertical: (W+1)·H, horizontal: W·(H+1), diagonal: W·H
        for (w, h) in [(1u32, 1u32), (2, 3), (5, 4), (7, 7)] {
            let s = EdgeSlots::new(w, h);
            let expected = (w + 1) * h + w * (h + 1) + w * h;
            assert_eq!(s.count(), expected as usize, "W={w} H={h}");
        }
    }

    #[test]
    fn addressing_is_a_bijection() {
        let (w, h) = (4u32, 3u32);
        let s = EdgeSlots::new(w, h);
        let mut seen = vec![false; s.count()];

        let mut mark = |slot: u32| {
            let slot = slot as usize;
            assert!(slot < seen.len());
            assert!(!seen[slot], "slot {slot} assigned twice");
            seen[slot] = true;
        };

        for i in 0..w {
            for j in 0..h {
                mark(s.diagonal(i, j));
            }
        }
        for i in 0..=w {
            for j in 0..h {
                mark(s.vertical(i, j));
            }
        }
        for i in 0..w {
            for j in 0..=h {
                mark(s.horizontal(i, j));
            }
        }

        assert!(seen.iter().all(|&b| b));
    }

    #[test]
    fn rightmost_column_has_no_special_gap() {
        let s = EdgeSlots::new(2, 2);
        // Interior verticals use cell slots; the i == W column appends after them.
        assert_eq!(s.vertical(0, 0), 1);
        assert_eq!(s.vertical(1, 0), 7);
        assert_eq!(s.vertical(2, 0), 12);
        assert_eq!(s.vertical(2, 1), 13);
        assert_eq!(s.horizontal(0, 2), 14);
        assert_eq!(s.horizontal(1, 2), 15);
        assert_eq!(s.count(), 16);
    }
}
