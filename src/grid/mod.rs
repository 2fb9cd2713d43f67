//! Cell classification and iteration order for the pressure solvers.
//!
//! A [`Grid`] classifies every cell of a `(size_x + 2) × (size_y + 2)` block,
//! ghost ring included, into exactly one [`CellType`]. The per-category cell
//! lists are built once and are read-only afterwards. The fluid list is the
//! canonical iteration order of every solver: row by row, `i` fastest.
//!
//! Fluid cells may sit on the ring (for instance the halo of a subdomain),
//! so solvers additionally filter with [`Grid::is_interior`].

mod cell;

pub use cell::{Border, Cell, CellType};

use crate::error::PError;

/// Extents and spacing of one (sub)domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Interior cells in x.
    pub size_x: usize,
    /// Interior cells in y.
    pub size_y: usize,
    pub dx: f64,
    pub dy: f64,
}

impl Domain {
    pub fn new(size_x: usize, size_y: usize, dx: f64, dy: f64) -> Self {
        Self { size_x, size_y, dx, dy }
    }

    /// Unit square split into `size_x × size_y` cells.
    pub fn unit_square(size_x: usize, size_y: usize) -> Self {
        Self::new(size_x, size_y, 1.0 / size_x as f64, 1.0 / size_y as f64)
    }

    /// Check the spacing is usable by the stencils.
    pub fn validate(&self) -> Result<(), PError> {
        let ok = |h: f64| h.is_finite() && h > 0.0;
        if ok(self.dx) && ok(self.dy) {
            Ok(())
        } else {
            Err(PError::InvalidSpacing { dx: self.dx, dy: self.dy })
        }
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    domain: Domain,
    cells: Vec<Cell>,
    by_type: [Vec<Cell>; CellType::COUNT],
}

impl Grid {
    /// Classify every cell, ghost ring included, with `kind(i, j)`.
    pub fn from_fn<F>(domain: Domain, mut kind: F) -> Self
    where
        F: FnMut(usize, usize) -> CellType,
    {
        let imaxb = domain.size_x + 2;
        let jmaxb = domain.size_y + 2;
        let mut types = Vec::with_capacity(imaxb * jmaxb);
        for j in 0..jmaxb {
            for i in 0..imaxb {
                types.push(kind(i, j));
            }
        }
        let is_fluid = |i: usize, j: usize| types[j * imaxb + i] == CellType::Fluid;

        let mut cells = Vec::with_capacity(types.len());
        let mut by_type: [Vec<Cell>; CellType::COUNT] = Default::default();
        for j in 0..jmaxb {
            for i in 0..imaxb {
                let cell_type = types[j * imaxb + i];
                let mut borders = Border::empty();
                if cell_type != CellType::Fluid {
                    borders.set(Border::TOP, j + 1 < jmaxb && is_fluid(i, j + 1));
                    borders.set(Border::BOTTOM, j > 0 && is_fluid(i, j - 1));
                    borders.set(Border::LEFT, i > 0 && is_fluid(i - 1, j));
                    borders.set(Border::RIGHT, i + 1 < imaxb && is_fluid(i + 1, j));
                }
                let cell = Cell::new(i, j, cell_type, borders);
                by_type[cell_type.index()].push(cell);
                cells.push(cell);
            }
        }
        Self { domain, cells, by_type }
    }

    /// Lid-driven cavity: moving lid on top, fixed walls elsewhere.
    pub fn lid_driven_cavity(domain: Domain) -> Self {
        let (imaxb, jmaxb) = (domain.size_x + 1, domain.size_y + 1);
        Self::from_fn(domain, |i, j| {
            if j == jmaxb && i != 0 && i != imaxb {
                CellType::MovingWall
            } else if i == 0 || j == 0 || i == imaxb || j == jmaxb {
                CellType::FixedWall
            } else {
                CellType::Fluid
            }
        })
    }

    /// Plane shear flow: inflow left, outflow right, fixed walls top and bottom.
    pub fn channel(domain: Domain) -> Self {
        let (imaxb, jmaxb) = (domain.size_x + 1, domain.size_y + 1);
        Self::from_fn(domain, |i, j| {
            if j == 0 || j == jmaxb {
                CellType::FixedWall
            } else if i == 0 {
                CellType::Inflow
            } else if i == imaxb {
                CellType::Outflow
            } else {
                CellType::Fluid
            }
        })
    }

    /// Fluid interior surrounded by a ring of a single category.
    pub fn enclosed(domain: Domain, ring: CellType) -> Self {
        let (imaxb, jmaxb) = (domain.size_x + 1, domain.size_y + 1);
        Self::from_fn(domain, |i, j| {
            if i == 0 || j == 0 || i == imaxb || j == jmaxb {
                ring
            } else {
                CellType::Fluid
            }
        })
    }

    /// Next multigrid level: half the cells per direction, twice the spacing.
    ///
    /// Ring cells inherit the category of the matching fine ring cell. An
    /// interior coarse cell is fluid unless all four fine children are solid,
    /// in which case it takes the category of child `(2i, 2j)`.
    pub fn coarsen(&self) -> Result<Grid, PError> {
        self.coarsen_level(0)
    }

    fn coarsen_level(&self, level: usize) -> Result<Grid, PError> {
        let (imax, jmax) = (self.imax(), self.jmax());
        if imax < 2 || jmax < 2 || imax % 2 != 0 || jmax % 2 != 0 {
            return Err(PError::UncoarsenableGrid { level, imax, jmax });
        }
        let domain = Domain::new(imax / 2, jmax / 2, 2.0 * self.dx(), 2.0 * self.dy());
        let (ic_ring, jc_ring) = (domain.size_x + 1, domain.size_y + 1);
        let fine_index = |c: usize, ring: usize, fine_ring: usize| {
            if c == 0 {
                0
            } else if c == ring {
                fine_ring
            } else {
                2 * c
            }
        };
        Ok(Grid::from_fn(domain, |i, j| {
            if i == 0 || j == 0 || i == ic_ring || j == jc_ring {
                let fi = fine_index(i, ic_ring, imax + 1);
                let fj = fine_index(j, jc_ring, jmax + 1);
                return self.cell(fi, fj).cell_type();
            }
            let children = [
                (2 * i - 1, 2 * j - 1),
                (2 * i, 2 * j - 1),
                (2 * i - 1, 2 * j),
                (2 * i, 2 * j),
            ];
            if children.iter().any(|&(fi, fj)| self.cell(fi, fj).is_fluid()) {
                CellType::Fluid
            } else {
                self.cell(2 * i, 2 * j).cell_type()
            }
        }))
    }

    /// This grid followed by `levels - 1` successive coarsenings.
    pub fn hierarchy(&self, levels: usize) -> Result<Vec<Grid>, PError> {
        if levels == 0 {
            return Err(PError::InvalidLevels);
        }
        let mut grids = Vec::with_capacity(levels);
        grids.push(self.clone());
        for level in 1..levels {
            let next = grids[level - 1].coarsen_level(level - 1)?;
            grids.push(next);
        }
        Ok(grids)
    }

    /// Index based cell access, ghost ring included.
    pub fn cell(&self, i: usize, j: usize) -> Cell {
        self.cells[j * self.imaxb() + i]
    }

    /// Number of interior cells in x.
    pub fn imax(&self) -> usize {
        self.domain.size_x
    }

    /// Number of interior cells in y.
    pub fn jmax(&self) -> usize {
        self.domain.size_y
    }

    /// Number of cells in x including the ghost ring.
    pub fn imaxb(&self) -> usize {
        self.domain.size_x + 2
    }

    /// Number of cells in y including the ghost ring.
    pub fn jmaxb(&self) -> usize {
        self.domain.size_y + 2
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn dx(&self) -> f64 {
        self.domain.dx
    }

    pub fn dy(&self) -> f64 {
        self.domain.dy
    }

    /// Guard shared by every stencil update: excludes the ring indices.
    #[inline]
    pub fn is_interior(&self, i: usize, j: usize) -> bool {
        i != 0 && j != 0 && i != self.domain.size_x + 1 && j != self.domain.size_y + 1
    }

    /// Cells of one category in canonical order.
    pub fn cells_of(&self, cell_type: CellType) -> &[Cell] {
        &self.by_type[cell_type.index()]
    }

    pub fn fluid_cells(&self) -> &[Cell] {
        self.cells_of(CellType::Fluid)
    }

    pub fn fixed_wall_cells(&self) -> &[Cell] {
        self.cells_of(CellType::FixedWall)
    }

    pub fn moving_wall_cells(&self) -> &[Cell] {
        self.cells_of(CellType::MovingWall)
    }

    pub fn inflow_cells(&self) -> &[Cell] {
        self.cells_of(CellType::Inflow)
    }

    pub fn outflow_cells(&self) -> &[Cell] {
        self.cells_of(CellType::Outflow)
    }

    pub fn hot_fixed_wall_cells(&self) -> &[Cell] {
        self.cells_of(CellType::HotFixedWall)
    }

    pub fn cold_fixed_wall_cells(&self) -> &[Cell] {
        self.cells_of(CellType::ColdFixedWall)
    }

    pub fn adiabatic_fixed_wall_cells(&self) -> &[Cell] {
        self.cells_of(CellType::AdiabaticFixedWall)
    }

    /// Fluid cells that pass the interior guard, as `(i, j)` pairs.
    pub fn interior_fluid(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.fluid_cells()
            .iter()
            .map(|c| (c.i(), c.j()))
            .filter(|&(i, j)| self.is_interior(i, j))
    }

    /// Number of fluid cells that take part in the stencil updates.
    pub fn interior_fluid_count(&self) -> usize {
        self.interior_fluid().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cavity_classification() {
        let grid = Grid::lid_driven_cavity(Domain::new(4, 3, 0.25, 1.0 / 3.0));
        assert_eq!(grid.fluid_cells().len(), 12);
        assert_eq!(grid.moving_wall_cells().len(), 4);
        // two side columns of 5 plus the bottom row of 4 interior + 2 top corners
        assert_eq!(grid.fixed_wall_cells().len(), 5 + 5 + 4);
        assert_eq!(grid.cell(0, 4).cell_type(), CellType::FixedWall);
        assert_eq!(grid.cell(2, 4).cell_type(), CellType::MovingWall);
    }

    #[test]
    fn fluid_order_is_row_major() {
        let grid = Grid::enclosed(Domain::new(3, 2, 1.0, 1.0), CellType::Outflow);
        let order: Vec<_> = grid.interior_fluid().collect();
        assert_eq!(order, vec![(1, 1), (2, 1), (3, 1), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn borders_point_at_fluid_neighbours() {
        let grid = Grid::lid_driven_cavity(Domain::new(3, 3, 1.0, 1.0));
        assert_eq!(grid.cell(0, 2).borders(), Border::RIGHT);
        assert_eq!(grid.cell(2, 4).borders(), Border::BOTTOM);
        assert_eq!(grid.cell(0, 0).borders(), Border::empty());

        let step = Grid::from_fn(Domain::new(3, 3, 1.0, 1.0), |i, j| {
            if (i, j) == (1, 1) || i == 0 || j == 0 || i == 4 || j == 4 {
                CellType::FixedWall
            } else {
                CellType::Fluid
            }
        });
        assert_eq!(step.cell(1, 1).borders(), Border::TOP | Border::RIGHT);
    }

    #[test]
    fn ring_fluid_cells_fail_the_guard() {
        // right ring acts as a halo of a neighbouring subdomain
        let grid = Grid::from_fn(Domain::new(2, 2, 1.0, 1.0), |i, j| {
            if j == 0 || j == 3 || i == 0 {
                CellType::FixedWall
            } else {
                CellType::Fluid
            }
        });
        assert_eq!(grid.fluid_cells().len(), 6);
        assert_eq!(grid.interior_fluid_count(), 4);
        assert!(!grid.is_interior(3, 1));
    }

    #[test]
    fn coarsen_halves_extents() {
        let fine = Grid::channel(Domain::new(8, 4, 0.125, 0.25));
        let coarse = fine.coarsen().unwrap();
        assert_eq!((coarse.imax(), coarse.jmax()), (4, 2));
        assert_eq!(coarse.dx(), 0.25);
        assert_eq!(coarse.dy(), 0.5);
        assert_eq!(coarse.inflow_cells().len(), 2);
        assert_eq!(coarse.outflow_cells().len(), 2);
        assert_eq!(coarse.fluid_cells().len(), 8);
    }

    #[test]
    fn coarsen_rejects_odd_extents() {
        let grid = Grid::lid_driven_cavity(Domain::new(6, 6, 1.0, 1.0));
        let err = grid.hierarchy(3).unwrap_err();
        assert_eq!(err, PError::UncoarsenableGrid { level: 1, imax: 3, jmax: 3 });
        assert_eq!(grid.hierarchy(0).unwrap_err(), PError::InvalidLevels);
    }

    #[test]
    fn domain_validation() {
        assert!(Domain::new(2, 2, 0.5, 0.5).validate().is_ok());
        assert!(Domain::new(2, 2, -0.5, 0.5).validate().is_err());
        assert!(Domain::new(2, 2, 0.5, f64::NAN).validate().is_err());
    }
}
