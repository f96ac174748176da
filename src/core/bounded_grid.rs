use crate::core::bounds::BoundsOriginRoot;
use crate::core::models::Vec2;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundedGrid<T> {
    bounds: BoundsOriginRoot,
    cells: Vec<T>,
}

impl<T> BoundedGrid<T> {
    /// Takes ownership of row-major `cells`. Returns `None` when the count
    /// does not match the bounds.
    pub fn from_cells(bounds: BoundsOriginRoot, cells: Vec<T>) -> Option<Self> {
        if cells.len() != bounds.area() as usize {
            return None;
        }
        Some(BoundedGrid { bounds, cells })
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.bounds
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        self.bounds.contains(pos)
    }

    pub fn get(&self, pos: &Vec2) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    /// Row-major cells paired with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (Vec2, &T)> {
        self.bounds.positions().zip(self.cells.iter())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.bounds.cols().max(1) as usize)
    }

    pub fn map<U, F>(&self, f: F) -> BoundedGrid<U>
    where
        F: Fn(&T) -> U,
    {
        BoundedGrid {
            bounds: self.bounds,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> std::ops::Index<&Vec2> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Vec2) -> &Self::Output {
        &self.cells[(index.i * self.bounds.extent.j + index.j) as usize]
    }
}

impl<T> std::ops::IndexMut<&Vec2> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Vec2) -> &mut Self::Output {
        &mut self.cells[(index.i * self.bounds.extent.j + index.j) as usize]
    }
}
