//! Map bounds, terrain types and fog of war.

use std::collections::HashSet;

use ordnance_core::types::{CPos, WPos};

/// Rectangular cell grid with one terrain type per cell.
#[derive(Debug, Clone)]
pub struct Map {
    width: i32,
    height: i32,
    terrain: Vec<String>,
}

impl Map {
    /// Map of `width` x `height` cells, all of `default_terrain`.
    pub fn new(width: i32, height: i32, default_terrain: &str) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            terrain: vec![default_terrain.to_string(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, cell: CPos) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    /// Set the terrain type of a cell. Cells outside the map are ignored.
    pub fn set_terrain(&mut self, cell: CPos, terrain: &str) {
        if let Some(i) = self.index(cell) {
            self.terrain[i] = terrain.to_string();
        }
    }

    pub fn cell_containing(&self, pos: WPos) -> CPos {
        CPos::containing(pos)
    }

    pub fn contains(&self, cell: CPos) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Terrain type of a cell, `None` outside the map.
    pub fn terrain_type(&self, cell: CPos) -> Option<&str> {
        self.index(cell).map(|i| self.terrain[i].as_str())
    }
}

/// What the local viewer can currently see.
///
/// `None` means the whole map is revealed.
#[derive(Debug, Clone, Default)]
pub struct FogOfWar {
    visible: Option<HashSet<CPos>>,
}

impl FogOfWar {
    /// Everything visible.
    pub fn revealed() -> Self {
        Self { visible: None }
    }

    /// Only the listed cells visible.
    pub fn with_visible(cells: impl IntoIterator<Item = CPos>) -> Self {
        Self {
            visible: Some(cells.into_iter().collect()),
        }
    }

    pub fn reveal(&mut self, cell: CPos) {
        if let Some(visible) = &mut self.visible {
            visible.insert(cell);
        }
    }

    /// True when the cell is hidden from the viewer.
    pub fn obscures(&self, cell: CPos) -> bool {
        match &self.visible {
            None => false,
            Some(visible) => !visible.contains(&cell),
        }
    }
}
