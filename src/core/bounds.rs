use crate::core::models::Vec2;

/// A bounding box with one corner fixed at 0,0 and assumed to have positive extent.
/// `extent.i` is the number of rows, `extent.j` the number of columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundsOriginRoot {
    pub extent: Vec2,
}

impl BoundsOriginRoot {
    /// Size of every level file.
    pub const STANDARD: BoundsOriginRoot = BoundsOriginRoot::new(12, 12);

    pub const fn new(rows: i32, cols: i32) -> BoundsOriginRoot {
        BoundsOriginRoot {
            extent: Vec2 { i: rows, j: cols },
        }
    }

    pub fn rows(&self) -> i32 {
        self.extent.i
    }

    pub fn cols(&self) -> i32 {
        self.extent.j
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        pos.i >= 0 && pos.i < self.extent.i && pos.j >= 0 && pos.j < self.extent.j
    }

    pub fn area(&self) -> i32 {
        self.extent.i * self.extent.j
    }

    /// Row-major positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + use<> {
        let cols = self.extent.j;
        (0..self.area()).map(move |k| Vec2 {
            i: k / cols,
            j: k % cols,
        })
    }
}
