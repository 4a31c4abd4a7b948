//! Tile map collision oracle.
//!
//! The map is a 2D grid of unit cubes built once from an RGBA image: bright
//! pixels are walls, dark pixels are floor. It never changes afterwards.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::error::MapError;
use crate::physics::{cell_bounds, Aabb};

/// Offsets of the 3x3 window scanned around an actor, row-major (z outer).
pub const NEIGHBORHOOD: [(i32, i32); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Immutable occupancy grid of wall cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMap {
    width: usize,
    height: usize,
    origin: Vec3,
    /// Physics truth, row-major with row index = z.
    solid: Vec<bool>,
    /// Cells a debug view draws as wireframes. Never consulted by physics.
    wireframe: Vec<bool>,
}

impl GridMap {
    /// Build a map from RGBA8 pixels using the default [`MapConfig`].
    pub fn from_image(pixels: &[u8], width: usize, height: usize) -> Result<Self, MapError> {
        Self::from_rgba(pixels, width, height, &MapConfig::default())
    }

    /// Build a map from RGBA8 pixels, row-major, row index = z.
    ///
    /// A cell is solid when its red, green and blue channels all exceed
    /// `config.wall_threshold`. Alpha is ignored.
    pub fn from_rgba(
        pixels: &[u8],
        width: usize,
        height: usize,
        config: &MapConfig,
    ) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::EmptyDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(4))
            .ok_or(MapError::TooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(MapError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let above = |px: &[u8], threshold: u8| {
            px[0] > threshold && px[1] > threshold && px[2] > threshold
        };

        let solid: Vec<bool> = pixels
            .chunks_exact(4)
            .map(|px| above(px, config.wall_threshold))
            .collect();
        let wireframe: Vec<bool> = pixels
            .chunks_exact(4)
            .map(|px| above(px, config.debug_threshold))
            .collect();

        let map = Self {
            width,
            height,
            origin: config.origin,
            solid,
            wireframe,
        };
        tracing::info!(
            "Map built: {}x{} cells, {} solid, origin {:?}",
            width,
            height,
            map.solid_count(),
            map.origin
        );
        Ok(map)
    }

    /// Build a map from a text layout: `#` is a wall, anything else floor.
    ///
    /// Rows run along X, successive rows advance along Z. The layout is
    /// rasterised to white/black pixels and goes through [`Self::from_rgba`],
    /// so thresholds apply exactly as for an image.
    pub fn from_ascii<S: AsRef<str>>(rows: &[S], config: &MapConfig) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());

        let mut pixels = Vec::with_capacity(width * height * 4);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let len = line.chars().count();
            if len != width {
                return Err(MapError::RaggedRow {
                    row,
                    len,
                    expected: width,
                });
            }
            for c in line.chars() {
                let v = if c == '#' { 255 } else { 0 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }

        Self::from_rgba(&pixels, width, height, config)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// World-space position of cell (0, 0)'s center at floor level.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    fn index(&self, cell_x: i32, cell_z: i32) -> Option<usize> {
        if cell_x < 0 || cell_z < 0 {
            return None;
        }
        let (x, z) = (cell_x as usize, cell_z as usize);
        (x < self.width && z < self.height).then(|| z * self.width + x)
    }

    /// Whether a cell is a wall. Cells outside the grid are never solid.
    #[inline]
    pub fn is_solid(&self, cell_x: i32, cell_z: i32) -> bool {
        self.index(cell_x, cell_z).is_some_and(|i| self.solid[i])
    }

    /// Whether a debug view should outline this cell.
    pub fn shows_wireframe(&self, cell_x: i32, cell_z: i32) -> bool {
        self.index(cell_x, cell_z).is_some_and(|i| self.wireframe[i])
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    /// Cell containing a world position (truncating toward zero).
    #[inline]
    pub fn cell_of(&self, position: Vec3) -> (i32, i32) {
        (
            (position.x - self.origin.x) as i32,
            (position.z - self.origin.z) as i32,
        )
    }

    /// World bounds of a cell.
    #[inline]
    pub fn cell_bounds(&self, cell_x: i32, cell_z: i32) -> Aabb {
        cell_bounds(cell_x, cell_z, self.origin)
    }

    /// World-space height of every wall's top face.
    pub fn cell_top(&self) -> f32 {
        self.origin.y + 1.0
    }

    /// Bounding volume of the whole generated cube mesh.
    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.origin + Vec3::new(-0.5, 0.0, -0.5),
            max: self.origin
                + Vec3::new(self.width as f32 - 0.5, 1.0, self.height as f32 - 0.5),
        }
    }

    /// Solid cells of the 3x3 window around `position`, in scan order.
    pub fn solid_neighbors(&self, position: Vec3) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (cx, cz) = self.cell_of(position);
        NEIGHBORHOOD
            .iter()
            .map(move |&(dx, dz)| (cx + dx, cz + dz))
            .filter(|&(x, z)| self.is_solid(x, z))
    }

    /// Centers of the cells a debug view outlines.
    pub fn wireframe_cells(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.height as i32).flat_map(move |z| {
            (0..self.width as i32)
                .filter(move |&x| self.shows_wireframe(x, z))
                .map(move |x| self.origin + Vec3::new(x as f32, 0.5, z as f32))
        })
    }

    /// Position relative to the grid, as a fraction of its size (minimap).
    pub fn normalized(&self, position: Vec3) -> (f32, f32) {
        (
            (position.x - self.origin.x) / self.width as f32,
            (position.z - self.origin.z) / self.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at_origin() -> MapConfig {
        MapConfig {
            origin: Vec3::ZERO,
            ..MapConfig::default()
        }
    }

    fn rgba(values: &[u8]) -> Vec<u8> {
        values.iter().flat_map(|&v| [v, v, v, 255]).collect()
    }

    #[test]
    fn test_threshold_is_strict() {
        let pixels = rgba(&[50, 51, 0, 255]);
        let map = GridMap::from_rgba(&pixels, 2, 2, &config_at_origin()).unwrap();
        assert!(!map.is_solid(0, 0));
        assert!(map.is_solid(1, 0));
        assert!(!map.is_solid(0, 1));
        assert!(map.is_solid(1, 1));
    }

    #[test]
    fn test_every_channel_must_pass() {
        let pixels = vec![255, 255, 10, 255];
        let map = GridMap::from_rgba(&pixels, 1, 1, &config_at_origin()).unwrap();
        assert!(!map.is_solid(0, 0));
    }

    #[test]
    fn test_debug_threshold_is_independent() {
        let pixels = rgba(&[120, 220]);
        let map = GridMap::from_rgba(&pixels, 2, 1, &config_at_origin()).unwrap();
        assert!(map.is_solid(0, 0));
        assert!(!map.shows_wireframe(0, 0));
        assert!(map.is_solid(1, 0));
        assert!(map.shows_wireframe(1, 0));
        assert_eq!(map.wireframe_cells().collect::<Vec<_>>(), vec![Vec3::new(1.0, 0.5, 0.0)]);
    }

    #[test]
    fn test_out_of_range_is_not_solid() {
        let map = GridMap::from_ascii(&["##", "##"], &config_at_origin()).unwrap();
        assert!(map.is_solid(1, 1));
        assert!(!map.is_solid(-1, 0));
        assert!(!map.is_solid(0, -1));
        assert!(!map.is_solid(2, 0));
        assert!(!map.is_solid(0, 2));
    }

    #[test]
    fn test_bad_buffers_are_rejected() {
        let cfg = config_at_origin();
        assert_eq!(
            GridMap::from_rgba(&[], 0, 3, &cfg),
            Err(MapError::EmptyDimensions { width: 0, height: 3 })
        );
        assert_eq!(
            GridMap::from_rgba(&[0; 7], 1, 2, &cfg),
            Err(MapError::PixelCountMismatch { expected: 8, actual: 7 })
        );
        assert_eq!(
            GridMap::from_ascii(&["#.", "#"], &cfg),
            Err(MapError::RaggedRow { row: 1, len: 1, expected: 2 })
        );
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        let cfg = config_at_origin();
        assert_eq!(
            GridMap::from_rgba(&[], usize::MAX / 2, 3, &cfg),
            Err(MapError::TooLarge { width: usize::MAX / 2, height: 3 })
        );
        assert_eq!(
            GridMap::from_rgba(&[], usize::MAX / 4 + 1, 1, &cfg),
            Err(MapError::TooLarge { width: usize::MAX / 4 + 1, height: 1 })
        );
    }

    #[test]
    fn test_cell_of_truncates_toward_zero() {
        let map = GridMap::from_ascii(&["...."], &MapConfig::default()).unwrap();
        // origin.x = -16
        assert_eq!(map.cell_of(Vec3::new(-13.3, 0.5, -8.0)), (2, 0));
        assert_eq!(map.cell_of(Vec3::new(-16.7, 0.5, -8.2)), (0, 0));
    }

    #[test]
    fn test_bounds_cover_generated_mesh() {
        let map = GridMap::from_ascii(&["...", "..."], &MapConfig::default()).unwrap();
        let b = map.bounds();
        assert_eq!(b.min, Vec3::new(-16.5, 0.0, -8.5));
        assert_eq!(b.max, Vec3::new(-13.5, 1.0, -6.5));
    }

    #[test]
    fn test_solid_neighbors_scan_row_major() {
        let map = GridMap::from_ascii(&["#.#", "...", "#.#"], &config_at_origin()).unwrap();
        let found: Vec<_> = map.solid_neighbors(Vec3::new(1.2, 0.5, 1.2)).collect();
        assert_eq!(found, vec![(0, 0), (2, 0), (0, 2), (2, 2)]);
    }

    #[test]
    fn test_from_image_uses_default_placement() {
        let map = GridMap::from_image(&rgba(&[255, 0, 0]), 3, 1).unwrap();
        assert_eq!(map.origin(), MapConfig::default().origin);
        assert_eq!(map.solid_count(), 1);
    }

    #[test]
    fn test_normalized_position() {
        let map = GridMap::from_ascii(&["....", "...."], &config_at_origin()).unwrap();
        assert_eq!(map.normalized(Vec3::new(2.0, 0.0, 1.0)), (0.5, 0.5));
    }
}
