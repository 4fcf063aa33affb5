//! Coordinate conversion and brush footprints.
//!
//! Three coordinate spaces meet here:
//!
//! - *grid space*: continuous pixels in the unzoomed, unpanned grid (the
//!   camera maps screen positions into this space),
//! - *cell space*: grid space divided by the cell size, still continuous,
//! - *addresses*: a chunk position plus a voxel position local to that chunk.
//!
//! This module is the only place that quantizes continuous positions into
//! cells, so the brush preview and the committed edit always agree.

use crate::config::GridConfig;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Discrete integer position: a chunk, a voxel within a chunk, or a global cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Location of a single cell: its chunk and its position inside that chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    pub chunk: GridPos,
    pub voxel: GridPos,
}

impl CellAddress {
    pub const fn new(chunk: GridPos, voxel: GridPos) -> Self {
        Self { chunk, voxel }
    }

    /// Split a global cell coordinate into chunk and local voxel parts.
    ///
    /// Uses floor division so that negative coordinates land in negative
    /// chunks with a non-negative local offset.
    pub fn from_global(global: GridPos, config: &GridConfig) -> Self {
        let size = config.chunk_size as i32;
        Self {
            chunk: GridPos::new(global.x.div_euclid(size), global.y.div_euclid(size)),
            voxel: GridPos::new(global.x.rem_euclid(size), global.y.rem_euclid(size)),
        }
    }

    /// Global cell coordinate.
    pub fn global(&self, config: &GridConfig) -> GridPos {
        let size = config.chunk_size as i32;
        GridPos::new(
            self.chunk.x * size + self.voxel.x,
            self.chunk.y * size + self.voxel.y,
        )
    }
}

/// Check whether a global cell coordinate lies inside the grid.
pub fn in_bounds(global: GridPos, config: &GridConfig) -> bool {
    let extent = config.extent();
    (0..extent).contains(&global.x) && (0..extent).contains(&global.y)
}

/// Convert a grid-space pixel position into continuous cell space.
pub fn grid_to_cell_space(pos: Point, config: &GridConfig) -> Point {
    let cell = config.cell_size as f64;
    Point::new(pos.x / cell, pos.y / cell)
}

/// Global cell under a grid-space pixel position (not bounds-checked).
pub fn cell_at(pos: Point, config: &GridConfig) -> GridPos {
    let cell = grid_to_cell_space(pos, config);
    GridPos::new(cell.x.floor() as i32, cell.y.floor() as i32)
}

/// Address of the cell under a grid-space pixel position.
///
/// The result is not bounds-checked; callers filter with [`in_bounds`].
pub fn screen_to_cell(pos: Point, config: &GridConfig) -> CellAddress {
    CellAddress::from_global(cell_at(pos, config), config)
}

/// Top-left corner of a cell in grid-space pixels.
pub fn cell_origin(address: CellAddress, config: &GridConfig) -> Point {
    let global = address.global(config);
    let cell = config.cell_size as f64;
    Point::new(global.x as f64 * cell, global.y as f64 * cell)
}

/// Rectangle covered by a cell in grid-space pixels.
pub fn cell_rect(address: CellAddress, config: &GridConfig) -> Rect {
    let cell = config.cell_size as f64;
    Rect::from_origin_size(cell_origin(address, config), (cell, cell))
}

/// First cell (per axis) covered by a brush of `size` centered at `center`.
///
/// Computed in i64 so pointer positions far outside the grid cannot overflow.
fn brush_start(center: f64, size: u32) -> i64 {
    let half = size as f64 / 2.0;
    if size % 2 == 0 {
        // Even brushes center on a cell intersection.
        (center + 0.5 - half).floor() as i64
    } else {
        // Odd brushes center on a cell.
        (center.ceil() - half).floor() as i64
    }
}

/// Cells covered by a square brush centered at `center` (in cell space).
///
/// Emits `brush_size × brush_size` candidates row by row and drops the ones
/// outside the grid, so brushes at the edge cover fewer cells. A brush size of
/// zero is treated as one. Non-finite centers cover nothing.
pub fn brush_footprint(center: Point, brush_size: u32, config: &GridConfig) -> Vec<CellAddress> {
    if !center.is_finite() {
        return Vec::new();
    }
    let size = brush_size.max(1);
    let extent = config.extent() as i64;
    let start_x = brush_start(center.x, size);
    let start_y = brush_start(center.y, size);

    let axis = |start: i64| (start.max(0)..(start + size as i64).min(extent));
    let mut seen = HashSet::new();
    let mut cells = Vec::with_capacity((size * size) as usize);
    for y in axis(start_y) {
        for x in axis(start_x) {
            // Both coordinates lie in 0..extent, which fits in i32.
            let global = GridPos::new(x as i32, y as i32);
            if seen.insert(global) {
                cells.push(CellAddress::from_global(global, config));
            }
        }
    }
    cells
}

/// Evenly spaced points from `from` (exclusive) to `to` (inclusive), no more
/// than `max_step` apart.
pub fn interpolate_points(from: Point, to: Point, max_step: f64) -> Vec<Point> {
    let delta: Vec2 = to - from;
    let distance = delta.hypot();
    if distance < f64::EPSILON || max_step <= 0.0 {
        return vec![to];
    }
    let steps = (distance / max_step).ceil() as usize;
    (1..=steps)
        .map(|i| from + delta * (i as f64 / steps as f64))
        .collect()
}

/// The part of the segment `from`..`to` inside `rect`, if any.
pub fn clip_segment(from: Point, to: Point, rect: Rect) -> Option<(Point, Point)> {
    if !from.is_finite() || !to.is_finite() {
        return None;
    }
    let delta = to - from;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-delta.x, from.x - rect.x0),
        (delta.x, rect.x1 - from.x),
        (-delta.y, from.y - rect.y0),
        (delta.y, rect.y1 - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((from + delta * t0, from + delta * t1))
}

/// Brush centers for a drag from `from` (exclusive) to `to`, both in cell space.
///
/// Only the stretch of the drag that can reach the grid is sampled, so the
/// number of stamps is bounded by the grid extent however far the pointer went.
pub fn stroke_stamps(
    from: Point,
    to: Point,
    brush_size: u32,
    max_step: f64,
    config: &GridConfig,
) -> Vec<Point> {
    let pad = brush_size.max(1) as f64;
    let extent = config.extent() as f64;
    let reach = Rect::new(-pad, -pad, extent + pad, extent + pad);
    let Some((start, end)) = clip_segment(from, to, reach) else {
        return Vec::new();
    };
    let mut stamps = Vec::new();
    if start != from {
        stamps.push(start);
    }
    stamps.extend(interpolate_points(start, end, max_step));
    stamps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globals(cells: &[CellAddress], config: &GridConfig) -> Vec<(i32, i32)> {
        let mut out: Vec<_> = cells
            .iter()
            .map(|c| {
                let g = c.global(config);
                (g.x, g.y)
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_global_to_address() {
        let config = GridConfig::new(4, 8, 30).unwrap();
        assert_eq!(config.extent(), 32);

        let origin = CellAddress::from_global(GridPos::new(0, 0), &config);
        assert_eq!(origin.chunk, GridPos::new(0, 0));
        assert_eq!(origin.voxel, GridPos::new(0, 0));

        let next_chunk = CellAddress::from_global(GridPos::new(8, 0), &config);
        assert_eq!(next_chunk.chunk, GridPos::new(1, 0));
        assert_eq!(next_chunk.voxel, GridPos::new(0, 0));
        assert_eq!(next_chunk.global(&config), GridPos::new(8, 0));
    }

    #[test]
    fn test_screen_to_cell_floors() {
        let config = GridConfig::default();
        let addr = screen_to_cell(Point::new(245.0, 29.9), &config);
        assert_eq!(addr.chunk, GridPos::new(1, 0));
        assert_eq!(addr.voxel, GridPos::new(0, 0));

        // Negative positions floor instead of truncating toward zero.
        let addr = screen_to_cell(Point::new(-1.0, -31.0), &config);
        assert_eq!(addr.global(&config), GridPos::new(-1, -2));
        assert_eq!(addr.chunk, GridPos::new(-1, -1));
        assert_eq!(addr.voxel, GridPos::new(7, 6));
        assert!(!in_bounds(addr.global(&config), &config));
    }

    #[test]
    fn test_even_brush_centers_on_intersection() {
        let config = GridConfig::default();
        let cells = brush_footprint(Point::new(5.0, 5.0), 2, &config);
        assert_eq!(globals(&cells, &config), vec![(4, 4), (4, 5), (5, 4), (5, 5)]);
    }

    #[test]
    fn test_odd_brush_centers_on_cell() {
        let config = GridConfig::default();
        let cells = brush_footprint(Point::new(5.2, 5.2), 3, &config);
        assert_eq!(cells.len(), 9);
        let expected: Vec<_> = (4..=6)
            .flat_map(|x| (4..=6).map(move |y| (x, y)))
            .collect();
        assert_eq!(globals(&cells, &config), expected);
    }

    #[test]
    fn test_single_cell_brush() {
        let config = GridConfig::default();
        let cells = brush_footprint(Point::new(5.2, 7.9), 1, &config);
        assert_eq!(globals(&cells, &config), vec![(5, 7)]);
    }

    #[test]
    fn test_brush_clipped_at_corner() {
        let config = GridConfig::default();
        let cells = brush_footprint(Point::new(0.0, 0.0), 3, &config);
        assert!(cells.len() <= 4);
        assert!(cells.iter().all(|c| in_bounds(c.global(&config), &config)));

        let cells = brush_footprint(Point::new(0.5, 0.5), 3, &config);
        assert_eq!(globals(&cells, &config), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_brush_clipped_at_far_edge() {
        let config = GridConfig::default();
        let cells = brush_footprint(Point::new(31.5, 31.5), 3, &config);
        assert_eq!(globals(&cells, &config), vec![(30, 30), (30, 31), (31, 30), (31, 31)]);
    }

    #[test]
    fn test_brush_outside_grid_is_empty() {
        let config = GridConfig::default();
        assert!(brush_footprint(Point::new(-10.0, 3.0), 3, &config).is_empty());
        assert!(brush_footprint(Point::new(3.0, 100.0), 2, &config).is_empty());
    }

    #[test]
    fn test_brush_spans_chunks() {
        let config = GridConfig::default();
        let cells = brush_footprint(Point::new(8.0, 8.0), 2, &config);
        let chunks: HashSet<_> = cells.iter().map(|c| c.chunk).collect();
        assert_eq!(chunks.len(), 4);
    }

    #[test]
    fn test_cell_rect() {
        let config = GridConfig::default();
        let addr = CellAddress::new(GridPos::new(1, 0), GridPos::new(2, 3));
        let rect = cell_rect(addr, &config);
        assert!((rect.x0 - 300.0).abs() < f64::EPSILON);
        assert!((rect.y0 - 90.0).abs() < f64::EPSILON);
        assert!((rect.width() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interpolate_points() {
        let points = interpolate_points(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 3.0);
        assert_eq!(points.len(), 4);
        assert_eq!(points.last().copied(), Some(Point::new(10.0, 0.0)));
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x) <= 3.0 + 1e-9);
        }

        let same = interpolate_points(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 3.0);
        assert_eq!(same, vec![Point::new(1.0, 1.0)]);
    }

    #[test]
    fn test_far_off_brush_is_empty() {
        let config = GridConfig::default();
        for size in [2, 3] {
            assert!(brush_footprint(Point::new(1e12, 0.0), size, &config).is_empty());
            assert!(brush_footprint(Point::new(0.0, -1e12), size, &config).is_empty());
            assert!(brush_footprint(Point::new(f64::MAX, f64::MIN), size, &config).is_empty());
        }
        assert!(brush_footprint(Point::new(f64::NAN, 3.0), 1, &config).is_empty());
        assert!(brush_footprint(Point::new(f64::INFINITY, 3.0), 1, &config).is_empty());
    }

    #[test]
    fn test_clip_segment() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let (a, b) = clip_segment(Point::new(-5.0, 5.0), Point::new(20.0, 5.0), rect).unwrap();
        assert!((a.x - 0.0).abs() < 1e-9);
        assert!((b.x - 10.0).abs() < 1e-9);

        let inside = clip_segment(Point::new(1.0, 1.0), Point::new(2.0, 3.0), rect);
        assert_eq!(inside, Some((Point::new(1.0, 1.0), Point::new(2.0, 3.0))));

        assert!(clip_segment(Point::new(-5.0, 20.0), Point::new(20.0, 20.0), rect).is_none());
        assert!(clip_segment(Point::new(-5.0, -5.0), Point::new(-1.0, 20.0), rect).is_none());
    }

    #[test]
    fn test_stroke_stamps_stay_near_grid() {
        let config = GridConfig::default();
        let stamps = stroke_stamps(Point::new(0.5, 0.5), Point::new(1e8, 0.5), 1, 0.5, &config);
        // Extent 32 plus one cell of padding, sampled every half cell.
        assert!(stamps.len() <= 66);
        assert!(stamps.iter().all(|p| p.x <= 33.0 + 1e-9));

        let missed = stroke_stamps(Point::new(-1e9, -1e9), Point::new(1e9, -1e9), 3, 0.5, &config);
        assert!(missed.is_empty());

        let entering = stroke_stamps(Point::new(-100.0, 4.5), Point::new(2.0, 4.5), 1, 0.5, &config);
        assert!((entering[0].x + 1.0).abs() < 1e-9);
        let last = entering.last().copied().unwrap();
        assert!((last.x - 2.0).abs() < 1e-9 && (last.y - 4.5).abs() < 1e-9);
    }
}
