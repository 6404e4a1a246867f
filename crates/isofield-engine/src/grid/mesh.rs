use super::{GridConfig, RESTART_INDEX};

/// Rebuilds the grid-mesh index list for a strip-drawing renderer.
///
/// `width` columns; each emits `2·(height+1)` indices alternating between
/// column `i` and column `i+1` at every row, followed by one restart
/// sentinel. Total length is `width · (2·(height+1) + 1)`.
pub fn strip_indices(grid: &GridConfig, out: &mut Vec<u32>) {
    out.clear();
    out.reserve(grid.width as usize * (2 * (grid.height as usize + 1) + 1));

    for i in 0..grid.width {
        for j in 0..=grid.height {
            out.push(grid.vertex_index(i, j));
            out.push(grid.vertex_index(i + 1, j));
        }
        out.push(RESTART_INDEX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DomainBounds;

    fn indices(w: u32, h: u32) -> Vec<u32> {
        let mut out = Vec::new();
        strip_indices(&GridConfig::new(w, h, DomainBounds::default()), &mut out);
        out
    }

    #[test]
    fn length_matches_column_layout() {
        for (w, h) in [(1, 1), (2, 3), (7, 5), (100, 1)] {
            let idx = indices(w, h);
            assert_eq!(idx.len(), (w * (2 * (h + 1) + 1)) as usize, "W={w} H={h}");
        }
    }

    #[test]
    fn one_sentinel_per_column() {
        let idx = indices(6, 4);
        let sentinels = idx.iter().filter(|&&i| i == RESTART_INDEX).count();
        assert_eq!(sentinels, 6);
        // Each column ends in a sentinel.
        assert_eq!(*idx.last().unwrap(), RESTART_INDEX);
    }

    #[test]
    fn columns_alternate_adjacent_columns() {
        let idx = indices(2, 2);
        // First column: (0,0),(1,0),(0,1),(1,1),(0,2),(1,2) flattened with H+1=3.
        assert_eq!(&idx[..6], &[0, 3, 1, 4, 2, 5]);
        assert_eq!(idx[6], RESTART_INDEX);
        assert_eq!(&idx[7..13], &[3, 6, 4, 7, 5, 8]);
    }

    #[test]
    fn real_indices_stay_below_sentinel() {
        let idx = indices(8, 8);
        assert!(idx
            .iter()
            .filter(|&&i| i != RESTART_INDEX)
            .all(|&i| i < RESTART_INDEX));
    }
}
