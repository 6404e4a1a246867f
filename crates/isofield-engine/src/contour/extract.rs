use crate::coords::Vec2;
use crate::error::ContourError;
use crate::grid::{GridConfig, RESTART_INDEX};

use super::slots::EdgeSlots;
use super::IsolineGeometry;

/// One triangle of a cell's diagonal split.
///
/// `corners` are flattened lattice indices; `slots[k]` is the welded edge
/// slot for the edge between corner `k` and corner `(k+1) % 3`.
struct Triangle {
    corners: [u32; 3],
    slots: [u32; 3],
}

fn cell_triangles(grid: &GridConfig, slots: &EdgeSlots, i: u32, j: u32) -> [Triangle; 2] {
    let v00 = grid.vertex_index(i, j);
    let v10 = grid.vertex_index(i + 1, j);
    let v11 = grid.vertex_index(i + 1, j + 1);
    let v01 = grid.vertex_index(i, j + 1);

    [
        // Triangle A: {(i,j), (i+1,j), (i+1,j+1)}
        Triangle {
            corners: [v00, v10, v11],
            slots: [
                slots.horizontal(i, j),
                slots.vertical(i + 1, j),
                slots.diagonal(i, j),
            ],
        },
        // Triangle B: {(i+1,j+1), (i,j), (i,j+1)} — shares the diagonal with A.
        Triangle {
            corners: [v11, v00, v01],
            slots: [
                slots.diagonal(i, j),
                slots.vertical(i, j),
                slots.horizontal(i, j + 1),
            ],
        },
    ]
}

/// Point where the value `iso` is crossed on the segment `a → b`.
///
/// `q = (iso − va) / (vb − va)`; `q ≤ 0` yields `a` exactly and `q ≥ 1`
/// yields `b` exactly, so degenerate inputs clamp to an endpoint instead of
/// injecting a fixed fallback point into the strip.
pub fn crossing_point(a: Vec2, b: Vec2, va: f32, vb: f32, iso: f32) -> Vec2 {
    let denom = vb - va;
    if denom == 0.0 {
        return a;
    }
    let q = (iso - va) / denom;
    if q <= 0.0 {
        a
    } else if q >= 1.0 {
        b
    } else {
        a + (b - a) * q
    }
}

/// Appends a crossing segment to the index stream.
///
/// A segment sharing the stream's last welded slot continues the strip;
/// anything else is separated by a single restart sentinel.
fn push_segment(indices: &mut Vec<u32>, a: u32, b: u32) {
    match indices.last() {
        Some(&last) if last == a => indices.push(b),
        Some(&last) if last == b => indices.push(a),
        Some(&last) if last != RESTART_INDEX => {
            indices.push(RESTART_INDEX);
            indices.push(a);
            indices.push(b);
        }
        _ => {
            indices.push(a);
            indices.push(b);
        }
    }
}

/// Ends the current strip unless the stream is empty or already ends in a
/// sentinel; prevents degenerate zero-segment strips.
fn end_strip(indices: &mut Vec<u32>) {
    if let Some(&last) = indices.last() {
        if last != RESTART_INDEX {
            indices.push(RESTART_INDEX);
        }
    }
}

fn emit_triangle(
    values: &[f32],
    positions: &[Vec2],
    iso: f32,
    tri: &Triangle,
    out: &mut IsolineGeometry,
) {
    // 3-bit configuration: bit k set iff corner k's value is below iso.
    let mut config = 0u8;
    for (k, &c) in tri.corners.iter().enumerate() {
        if values[c as usize] < iso {
            config |= 1 << k;
        }
    }

    // Which two edges straddle the iso value.
    let (ea, eb) = match config {
        0 | 7 => {
            end_strip(&mut out.indices);
            return;
        }
        1 | 6 => (0, 2),
        2 | 5 => (0, 1),
        3 | 4 => (1, 2),
        _ => unreachable!("configuration is 3 bits"),
    };

    let sa = write_crossing(values, positions, iso, tri, ea, out);
    let sb = write_crossing(values, positions, iso, tri, eb, out);
    push_segment(&mut out.indices, sa, sb);
}

fn write_crossing(
    values: &[f32],
    positions: &[Vec2],
    iso: f32,
    tri: &Triangle,
    edge: usize,
    out: &mut IsolineGeometry,
) -> u32 {
    let a = tri.corners[edge] as usize;
    let b = tri.corners[(edge + 1) % 3] as usize;
    let slot = tri.slots[edge];
    out.positions[slot as usize] =
        crossing_point(positions[a], positions[b], values[a], values[b], iso);
    slot
}

/// Extracts one isoline level from the sampled grid into `out`.
///
/// Each cell is split along its `(i,j) → (i+1,j+1)` diagonal into two
/// triangles, classified independently against `iso`. Crossing points land in
/// welded per-edge slots; the index stream chains segments that share a slot
/// and separates the rest with the restart sentinel. One restart closes each
/// completed cell column.
///
/// `values` and `positions` must both have exactly `(W+1)·(H+1)` entries;
/// anything else corrupts slot addressing downstream and is rejected.
pub fn extract(
    values: &[f32],
    positions: &[Vec2],
    grid: &GridConfig,
    iso: f32,
    out: &mut IsolineGeometry,
) -> Result<(), ContourError> {
    let expected = grid.vertex_count();
    if values.len() != expected {
        return Err(ContourError::size_mismatch("sample array", expected, values.len()));
    }
    if positions.len() != expected {
        return Err(ContourError::size_mismatch("position array", expected, positions.len()));
    }

    let slots = EdgeSlots::new(grid.width, grid.height);
    out.positions.clear();
    out.positions.resize(slots.count(), Vec2::zero());
    out.indices.clear();

    for i in 0..grid.width {
        for j in 0..grid.height {
            for tri in &cell_triangles(grid, &slots, i, j) {
                emit_triangle(values, positions, iso, tri, out);
            }
        }
        end_strip(&mut out.indices);
    }

    Ok(())
}
