//! Square grids for monsters and lands
//!
//! The monster board is 6x6. The land board is 7x7 and sits "under" the
//! monster board offset by half a tile, so every monster tile touches four
//! land tiles. Both boards store [`CardId`]s; the cards live in the
//! [`EntityStore`](crate::core::EntityStore).

use crate::core::entity::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monster board side length
pub const BOARD_SIZE: usize = 6;
/// Land board side length
pub const LAND_BOARD_SIZE: usize = 7;

/// The four middle tiles of the monster board, contested for center control
pub const CENTER_TILES: [Pos; 4] = [
    Pos { x: 2, y: 2 },
    Pos { x: 3, y: 2 },
    Pos { x: 2, y: 3 },
    Pos { x: 3, y: 3 },
];

/// A tile coordinate; x is the column, y the row
///
/// Serialized as a `[x, y]` pair to match the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    pub fn new(x: u8, y: u8) -> Self {
        Pos { x, y }
    }

    /// Offset by a signed delta, or None when it leaves a `size` board
    pub fn step(&self, dx: i8, dy: i8, size: usize) -> Option<Pos> {
        let nx = self.x as i16 + dx as i16;
        let ny = self.y as i16 + dy as i16;
        if nx < 0 || ny < 0 || nx >= size as i16 || ny >= size as i16 {
            None
        } else {
            Some(Pos::new(nx as u8, ny as u8))
        }
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        (self.x as usize) < size && (self.y as usize) < size
    }
}

impl From<[u8; 2]> for Pos {
    fn from(v: [u8; 2]) -> Self {
        Pos { x: v[0], y: v[1] }
    }
}

impl From<Pos> for [u8; 2] {
    fn from(p: Pos) -> [u8; 2] {
        [p.x, p.y]
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A square grid of optional card ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    tiles: Vec<Option<CardId>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            tiles: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.size + pos.x as usize
    }

    pub fn get(&self, pos: Pos) -> Option<CardId> {
        if !pos.in_bounds(self.size) {
            return None;
        }
        self.tiles[self.index(pos)]
    }

    pub fn is_empty_tile(&self, pos: Pos) -> bool {
        pos.in_bounds(self.size) && self.get(pos).is_none()
    }

    /// Out-of-bounds positions are ignored; callers validate coordinates
    /// before placement
    pub fn place(&mut self, pos: Pos, id: CardId) {
        if !pos.in_bounds(self.size) {
            return;
        }
        let i = self.index(pos);
        self.tiles[i] = Some(id);
    }

    pub fn take(&mut self, pos: Pos) -> Option<CardId> {
        if !pos.in_bounds(self.size) {
            return None;
        }
        let i = self.index(pos);
        self.tiles[i].take()
    }

    /// All occupied tiles
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, CardId)> + '_ {
        self.tiles.iter().enumerate().filter_map(move |(i, slot)| {
            slot.map(|id| {
                let pos = Pos::new((i % self.size) as u8, (i / self.size) as u8);
                (pos, id)
            })
        })
    }

    /// Position of a card on this grid, if present
    pub fn position_of(&self, id: CardId) -> Option<Pos> {
        self.occupied().find(|(_, c)| *c == id).map(|(p, _)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_step_bounds() {
        let p = Pos::new(0, 0);
        assert_eq!(p.step(-1, 0, BOARD_SIZE), None);
        assert_eq!(p.step(1, 1, BOARD_SIZE), Some(Pos::new(1, 1)));
        let edge = Pos::new(5, 5);
        assert_eq!(edge.step(1, 0, BOARD_SIZE), None);
        assert_eq!(edge.step(1, 0, LAND_BOARD_SIZE), Some(Pos::new(6, 5)));
    }

    #[test]
    fn test_grid_place_take() {
        let mut grid = Grid::new(BOARD_SIZE);
        let id = CardId::new(3);
        assert!(grid.is_empty_tile(Pos::new(2, 4)));
        grid.place(Pos::new(2, 4), id);
        assert_eq!(grid.get(Pos::new(2, 4)), Some(id));
        assert_eq!(grid.position_of(id), Some(Pos::new(2, 4)));
        assert_eq!(grid.take(Pos::new(2, 4)), Some(id));
        assert!(grid.is_empty_tile(Pos::new(2, 4)));
    }

    #[test]
    fn test_occupied_iteration() {
        let mut grid = Grid::new(BOARD_SIZE);
        grid.place(Pos::new(1, 0), CardId::new(1));
        grid.place(Pos::new(5, 5), CardId::new(2));
        let tiles: Vec<_> = grid.occupied().collect();
        assert_eq!(tiles.len(), 2);
        assert!(tiles.contains(&(Pos::new(1, 0), CardId::new(1))));
    }

    #[test]
    fn test_out_of_bounds_get() {
        let grid = Grid::new(BOARD_SIZE);
        assert_eq!(grid.get(Pos::new(6, 0)), None);
        assert!(!grid.is_empty_tile(Pos::new(0, 6)));
    }

    #[test]
    fn test_out_of_bounds_place_does_not_alias() {
        let mut grid = Grid::new(BOARD_SIZE);
        // (7,2) would flat-index to (1,3) if not rejected
        grid.place(Pos::new(7, 2), CardId::new(9));
        assert_eq!(grid.get(Pos::new(1, 3)), None);
        assert_eq!(grid.occupied().count(), 0);
        assert_eq!(grid.take(Pos::new(7, 2)), None);
    }
}
