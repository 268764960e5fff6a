//! Playing grid and cell classification.
//!
//! A [`GameMap`] is an immutable rectangle of single-character cells. All
//! coordinates handed out by this module are relative to the grid center
//! `(width / 2, height / 2)`, so `(0, 0)` is the middle of the map and the
//! same point a renderer draws at the middle of its viewport.
//!
//! # Example
//!
//! ```
//! use shooter_core::map::{GameMap, MapElement};
//! use shooter_core::point::Point;
//!
//! let map = GameMap::parse("███\n█S█\n███").unwrap();
//! assert_eq!(map.dimensions(), (3, 3));
//! assert_eq!(map.spawn_points(), vec![Point::new(0, 0)]);
//! assert!(map.is_wall(Point::new(-1, 0)));
//! assert_eq!(map.element_at(Point::new(0, 0)), MapElement::Spawn);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShooterError};
use crate::point::Point;

/// Cell symbol for walls.
pub const WALL_SYMBOL: char = '█';

/// Cell symbol for bot spawn points.
pub const SPAWN_SYMBOL: char = 'S';

/// Cell symbol for open floor. Any other symbol is also treated as floor.
pub const EMPTY_SYMBOL: char = ' ';

/// What occupies a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapElement {
    /// Open floor.
    None,
    /// Impassable wall.
    Wall,
    /// Bot spawn point (passable).
    Spawn,
}

impl MapElement {
    /// Every element kind.
    pub const ALL: [Self; 3] = [Self::None, Self::Wall, Self::Spawn];

    /// Classify a cell symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Self {
        match symbol {
            WALL_SYMBOL => Self::Wall,
            SPAWN_SYMBOL => Self::Spawn,
            _ => Self::None,
        }
    }
}

/// Index from element kind to the center-relative points holding it.
///
/// Always contains an entry for every [`MapElement`], possibly empty.
/// Points are listed in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapElements {
    by_kind: HashMap<MapElement, Vec<Point>>,
}

impl MapElements {
    fn empty() -> Self {
        Self {
            by_kind: MapElement::ALL.iter().map(|k| (*k, Vec::new())).collect(),
        }
    }

    /// Points classified as `kind`.
    #[must_use]
    pub fn get(&self, kind: MapElement) -> &[Point] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Number of points classified as `kind`.
    #[must_use]
    pub fn count(&self, kind: MapElement) -> usize {
        self.get(kind).len()
    }
}

/// Rectangular grid of cell symbols.
///
/// Serialized as a list of row strings so maps read naturally in RON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct GameMap {
    cells: Vec<Vec<char>>,
}

impl GameMap {
    /// Build a map from rows of symbols.
    ///
    /// Fails if the rows are not all the same length. An empty row list is
    /// a valid, empty map.
    pub fn from_rows<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        if let Some(first) = cells.first() {
            let expected = first.len();
            if let Some((row, found)) = cells
                .iter()
                .enumerate()
                .find(|(_, r)| r.len() != expected)
                .map(|(i, r)| (i, r.len()))
            {
                return Err(ShooterError::RaggedMap {
                    row,
                    expected,
                    found,
                });
            }
        }

        Ok(Self { cells })
    }

    /// Parse a map from newline-separated text.
    ///
    /// Trailing empty lines are ignored. Lines of spaces are open floor and
    /// are kept.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        Self::from_rows(rows)
    }

    /// `(width, height)` of the grid, `(0, 0)` when empty.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        match self.cells.first() {
            Some(row) => (row.len(), self.cells.len()),
            None => (0, 0),
        }
    }

    /// The grid cell that maps to [`Point::ORIGIN`].
    #[must_use]
    pub fn center(&self) -> Point {
        let (width, height) = self.dimensions();
        Point::new((width / 2) as i32, (height / 2) as i32)
    }

    /// Whether the map has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Classify every cell, keyed by element kind.
    ///
    /// Recomputed on every call; callers that query often should cache it.
    #[must_use]
    pub fn elements_by_kind(&self) -> MapElements {
        let center = self.center();
        let mut elements = MapElements::empty();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, symbol) in row.iter().enumerate() {
                let point = Point::new(x as i32 - center.x, y as i32 - center.y);
                elements
                    .by_kind
                    .entry(MapElement::from_symbol(*symbol))
                    .or_default()
                    .push(point);
            }
        }
        elements
    }

    /// Spawn points in row-major order.
    #[must_use]
    pub fn spawn_points(&self) -> Vec<Point> {
        self.elements_by_kind().get(MapElement::Spawn).to_vec()
    }

    /// Classification of a single center-relative point.
    ///
    /// Points outside the grid are walls.
    #[must_use]
    pub fn element_at(&self, p: Point) -> MapElement {
        self.cell(p)
            .map_or(MapElement::Wall, MapElement::from_symbol)
    }

    /// Whether `p` is blocked. Out-of-bounds points are always blocked.
    #[must_use]
    pub fn is_wall(&self, p: Point) -> bool {
        self.element_at(p) == MapElement::Wall
    }

    /// Rows rendered back to strings.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.cells.iter().map(|r| r.iter().collect()).collect()
    }

    fn cell(&self, p: Point) -> Option<char> {
        let center = self.center();
        let x = usize::try_from(p.x.checked_add(center.x)?).ok()?;
        let y = usize::try_from(p.y.checked_add(center.y)?).ok()?;
        self.cells.get(y)?.get(x).copied()
    }
}

impl TryFrom<Vec<String>> for GameMap {
    type Error = ShooterError;

    fn try_from(rows: Vec<String>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<GameMap> for Vec<String> {
    fn from(map: GameMap) -> Self {
        map.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [&str; 8] = [
        "████████",
        "█      █",
        "█    █ █",
        "█  S   █",
        "██     █",
        "█   █  █",
        "█     S█",
        "████████",
    ];

    const RECTANGLE: [&str; 5] = [
        "████████",
        "█      █",
        "█    █ █",
        "█  S   █",
        "████████",
    ];

    const SMALL: [&str; 4] = ["███", "█S█", "█ █", "███"];

    fn map(rows: &[&str]) -> GameMap {
        GameMap::from_rows(rows).unwrap()
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(GameMap::default().dimensions(), (0, 0));
        assert_eq!(map(&SQUARE).dimensions(), (8, 8));
        assert_eq!(map(&RECTANGLE).dimensions(), (8, 5));
    }

    #[test]
    fn test_center() {
        assert_eq!(GameMap::default().center(), Point::ORIGIN);
        assert_eq!(map(&SQUARE).center(), Point::new(4, 4));
        assert_eq!(map(&RECTANGLE).center(), Point::new(4, 2));
    }

    #[test]
    fn test_element_counts() {
        let empty = GameMap::default().elements_by_kind();
        for kind in MapElement::ALL {
            assert_eq!(empty.count(kind), 0);
        }

        let square = map(&SQUARE).elements_by_kind();
        assert_eq!(square.count(MapElement::Wall), 31);
        assert_eq!(square.count(MapElement::None), 31);
        assert_eq!(square.count(MapElement::Spawn), 2);

        let rect = map(&RECTANGLE).elements_by_kind();
        assert_eq!(rect.count(MapElement::Wall), 23);
        assert_eq!(rect.count(MapElement::None), 16);
        assert_eq!(rect.count(MapElement::Spawn), 1);
    }

    #[test]
    fn test_element_positions_are_center_relative() {
        // 3x4 grid, center is grid cell (1, 2).
        let elements = map(&SMALL).elements_by_kind();
        assert_eq!(elements.get(MapElement::Spawn), &[Point::new(0, -1)]);
        assert_eq!(elements.get(MapElement::None), &[Point::new(0, 0)]);
        assert_eq!(
            elements.get(MapElement::Wall),
            &[
                Point::new(-1, -2),
                Point::new(0, -2),
                Point::new(1, -2),
                Point::new(-1, -1),
                Point::new(1, -1),
                Point::new(-1, 0),
                Point::new(1, 0),
                Point::new(-1, 1),
                Point::new(0, 1),
                Point::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_spawn_points_row_major() {
        assert_eq!(
            map(&SQUARE).spawn_points(),
            vec![Point::new(-1, -1), Point::new(2, 2)]
        );
    }

    #[test]
    fn test_is_wall_agrees_with_index() {
        let m = map(&SQUARE);
        let elements = m.elements_by_kind();
        for p in elements.get(MapElement::Wall) {
            assert!(m.is_wall(*p), "{p:?} should be a wall");
        }
        for p in elements.get(MapElement::None) {
            assert!(!m.is_wall(*p), "{p:?} should be open");
        }
        for p in elements.get(MapElement::Spawn) {
            assert!(!m.is_wall(*p), "{p:?} spawn should be open");
        }
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let m = map(&SQUARE);
        assert!(m.is_wall(Point::new(100, 0)));
        assert!(m.is_wall(Point::new(0, -5)));
        assert!(m.is_wall(Point::new(-5, -5)));
        assert!(GameMap::default().is_wall(Point::ORIGIN));
    }

    #[test]
    fn test_extreme_points_are_wall() {
        let m = map(&SQUARE);
        for p in [
            Point::new(i32::MAX, 0),
            Point::new(0, i32::MAX),
            Point::new(i32::MIN, 0),
            Point::new(i32::MIN, i32::MAX),
        ] {
            assert!(m.is_wall(p), "{p:?} should be blocked");
            assert_eq!(m.element_at(p), MapElement::Wall);
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = GameMap::from_rows(["███", "█ ", "███"]).unwrap_err();
        assert!(matches!(
            err,
            ShooterError::RaggedMap {
                row: 1,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_parse_ignores_trailing_blank_lines() {
        let m = GameMap::parse("███\n█ █\n███\n\n").unwrap();
        assert_eq!(m.dimensions(), (3, 3));
        assert_eq!(m.rows()[1], "█ █");
    }

    #[test]
    fn test_parse_keeps_trailing_open_rows() {
        let m = GameMap::parse("█ █\n   \n   \n").unwrap();
        assert_eq!(m.dimensions(), (3, 3));
        assert_eq!(m.center(), Point::new(1, 1));
        assert!(!m.is_wall(Point::new(0, 1)));
    }
}
