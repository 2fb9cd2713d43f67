//! Pressure boundary conditions.
//!
//! Every boundary governs a list of non-fluid cells of one category and
//! rewrites their pressure from the fluid side (walls, inflow) or from a
//! configured value (outflow). Applying a boundary twice without touching the
//! interior gives the same ghost values.

use crate::fields::FieldSet;
use crate::grid::{Cell, CellType, Grid};

/// A pressure boundary condition over a fixed set of cells.
pub trait Boundary: Send + Sync {
    /// Overwrite the pressure of the governed cells.
    fn apply_pressures(&self, fields: &mut FieldSet);

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Cells this boundary writes to.
    fn cells(&self) -> &[Cell];
}

pub type BoundaryList = Vec<Box<dyn Boundary>>;

/// Homogeneous Neumann: copy the single fluid neighbour, or average the
/// fluid neighbours of a corner cell.
fn apply_neumann(cells: &[Cell], fields: &mut FieldSet) {
    for cell in cells {
        let (mut sum, mut n) = (0.0, 0usize);
        for (i, j) in cell.fluid_neighbours() {
            sum += fields.p(i, j);
            n += 1;
        }
        if n > 0 {
            *fields.p_mut(cell.i(), cell.j()) = sum / n as f64;
        }
    }
}

/// No-slip wall. Hot and cold walls are fixed walls with a temperature.
#[derive(Clone, Debug)]
pub struct FixedWallBoundary {
    cells: Vec<Cell>,
    wall_temperature: Option<f64>,
}

impl FixedWallBoundary {
    pub fn new(cells: &[Cell]) -> Self {
        Self { cells: cells.to_vec(), wall_temperature: None }
    }

    pub fn with_temperature(cells: &[Cell], wall_temperature: f64) -> Self {
        Self { cells: cells.to_vec(), wall_temperature: Some(wall_temperature) }
    }

    pub fn wall_temperature(&self) -> Option<f64> {
        self.wall_temperature
    }
}

impl Boundary for FixedWallBoundary {
    fn apply_pressures(&self, fields: &mut FieldSet) {
        apply_neumann(&self.cells, fields);
    }

    fn name(&self) -> &'static str {
        "fixed wall"
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Wall sliding tangentially with a fixed velocity.
#[derive(Clone, Debug)]
pub struct MovingWallBoundary {
    cells: Vec<Cell>,
    wall_velocity: f64,
}

impl MovingWallBoundary {
    pub fn new(cells: &[Cell], wall_velocity: f64) -> Self {
        Self { cells: cells.to_vec(), wall_velocity }
    }

    pub fn wall_velocity(&self) -> f64 {
        self.wall_velocity
    }
}

impl Boundary for MovingWallBoundary {
    fn apply_pressures(&self, fields: &mut FieldSet) {
        apply_neumann(&self.cells, fields);
    }

    fn name(&self) -> &'static str {
        "moving wall"
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Thermally insulated wall.
#[derive(Clone, Debug)]
pub struct AdiabaticWallBoundary {
    cells: Vec<Cell>,
}

impl AdiabaticWallBoundary {
    pub fn new(cells: &[Cell]) -> Self {
        Self { cells: cells.to_vec() }
    }
}

impl Boundary for AdiabaticWallBoundary {
    fn apply_pressures(&self, fields: &mut FieldSet) {
        apply_neumann(&self.cells, fields);
    }

    fn name(&self) -> &'static str {
        "adiabatic wall"
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Prescribed inflow velocity; pressure is extrapolated from the fluid side.
#[derive(Clone, Debug)]
pub struct InFlow {
    cells: Vec<Cell>,
    velocity: f64,
}

impl InFlow {
    pub fn new(cells: &[Cell], velocity: f64) -> Self {
        Self { cells: cells.to_vec(), velocity }
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

impl Boundary for InFlow {
    fn apply_pressures(&self, fields: &mut FieldSet) {
        apply_neumann(&self.cells, fields);
    }

    fn name(&self) -> &'static str {
        "inflow"
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Fixed outflow pressure (Dirichlet).
#[derive(Clone, Debug)]
pub struct OutFlow {
    cells: Vec<Cell>,
    pressure: f64,
}

impl OutFlow {
    pub fn new(cells: &[Cell], pressure: f64) -> Self {
        Self { cells: cells.to_vec(), pressure }
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }
}

impl Boundary for OutFlow {
    fn apply_pressures(&self, fields: &mut FieldSet) {
        for cell in &self.cells {
            *fields.p_mut(cell.i(), cell.j()) = self.pressure;
        }
    }

    fn name(&self) -> &'static str {
        "outflow"
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Zero outflow for the correction equation of a coarse multigrid level.
///
/// Coarse cell `i` sits on fine cell `2i`, so the coarse low-side ring lands
/// on the fine ring while the high-side ring lands one fine cell beyond it.
/// High-side cells with a single fluid neighbour take its negated value,
/// which puts the zero of the linear profile half a coarse cell out, on the
/// fine ring. Every other cell is held at zero.
#[derive(Clone, Debug)]
pub struct CoarseOutFlow {
    cells: Vec<Cell>,
    mirror: Vec<Option<(usize, usize)>>,
}

impl CoarseOutFlow {
    pub fn new(grid: &Grid) -> Self {
        let cells = grid.cells_of(CellType::Outflow).to_vec();
        let mirror = cells
            .iter()
            .map(|cell| {
                let high_side = cell.i() == grid.imax() + 1 || cell.j() == grid.jmax() + 1;
                let mut fluid = cell.fluid_neighbours();
                match (fluid.next(), fluid.next()) {
                    (Some(source), None) if high_side => Some(source),
                    _ => None,
                }
            })
            .collect();
        Self { cells, mirror }
    }
}

impl Boundary for CoarseOutFlow {
    fn apply_pressures(&self, fields: &mut FieldSet) {
        for (cell, mirror) in self.cells.iter().zip(&self.mirror) {
            let value = match *mirror {
                Some((i, j)) => -fields.p(i, j),
                None => 0.0,
            };
            *fields.p_mut(cell.i(), cell.j()) = value;
        }
    }

    fn name(&self) -> &'static str {
        "coarse outflow"
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Values the boundary family is configured with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryValues {
    pub wall_velocity: f64,
    pub inflow_velocity: f64,
    pub outflow_pressure: f64,
    pub hot_wall_temperature: f64,
    pub cold_wall_temperature: f64,
}

impl Default for BoundaryValues {
    fn default() -> Self {
        Self {
            wall_velocity: 1.0,
            inflow_velocity: 1.0,
            outflow_pressure: 0.0,
            hot_wall_temperature: 0.0,
            cold_wall_temperature: 0.0,
        }
    }
}

/// One boundary per non-empty category of `grid`, in the order
/// fixed, moving, hot, cold, adiabatic, inflow, outflow.
pub fn boundaries_for(grid: &Grid, values: &BoundaryValues) -> BoundaryList {
    let mut list = neumann_boundaries(grid, values);
    if !grid.cells_of(CellType::Outflow).is_empty() {
        list.push(Box::new(OutFlow::new(grid.cells_of(CellType::Outflow), values.outflow_pressure)));
    }
    list
}

/// Boundaries of a coarse multigrid level: the walls and inflow of
/// [`boundaries_for`], with outflow replaced by [`CoarseOutFlow`].
pub fn correction_boundaries_for(grid: &Grid, values: &BoundaryValues) -> BoundaryList {
    let mut list = neumann_boundaries(grid, values);
    if !grid.cells_of(CellType::Outflow).is_empty() {
        list.push(Box::new(CoarseOutFlow::new(grid)));
    }
    list
}

fn neumann_boundaries(grid: &Grid, values: &BoundaryValues) -> BoundaryList {
    let mut list: BoundaryList = Vec::new();
    let cells = |t: CellType| grid.cells_of(t);

    if !cells(CellType::FixedWall).is_empty() {
        list.push(Box::new(FixedWallBoundary::new(cells(CellType::FixedWall))));
    }
    if !cells(CellType::MovingWall).is_empty() {
        list.push(Box::new(MovingWallBoundary::new(cells(CellType::MovingWall), values.wall_velocity)));
    }
    if !cells(CellType::HotFixedWall).is_empty() {
        list.push(Box::new(FixedWallBoundary::with_temperature(
            cells(CellType::HotFixedWall),
            values.hot_wall_temperature,
        )));
    }
    if !cells(CellType::ColdFixedWall).is_empty() {
        list.push(Box::new(FixedWallBoundary::with_temperature(
            cells(CellType::ColdFixedWall),
            values.cold_wall_temperature,
        )));
    }
    if !cells(CellType::AdiabaticFixedWall).is_empty() {
        list.push(Box::new(AdiabaticWallBoundary::new(cells(CellType::AdiabaticFixedWall))));
    }
    if !cells(CellType::Inflow).is_empty() {
        list.push(Box::new(InFlow::new(cells(CellType::Inflow), values.inflow_velocity)));
    }
    list
}

/// Apply every boundary in order.
pub fn apply_all(boundaries: &[Box<dyn Boundary>], fields: &mut FieldSet) {
    for boundary in boundaries {
        boundary.apply_pressures(fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Domain;

    fn ramp(grid: &Grid) -> FieldSet {
        let mut fields = FieldSet::for_grid(grid);
        for j in 0..grid.jmaxb() {
            for i in 0..grid.imaxb() {
                *fields.p_mut(i, j) = (3 * i + 5 * j) as f64;
            }
        }
        fields
    }

    #[test]
    fn walls_copy_fluid_neighbour() {
        let grid = Grid::lid_driven_cavity(Domain::new(3, 3, 1.0, 1.0));
        let mut fields = ramp(&grid);
        let list = boundaries_for(&grid, &BoundaryValues::default());
        assert_eq!(list.iter().map(|b| b.name()).collect::<Vec<_>>(), vec!["fixed wall", "moving wall"]);
        apply_all(&list, &mut fields);
        assert_eq!(fields.p(0, 2), fields.p(1, 2));
        assert_eq!(fields.p(4, 1), fields.p(3, 1));
        assert_eq!(fields.p(2, 0), fields.p(2, 1));
        assert_eq!(fields.p(2, 4), fields.p(2, 3));
        // corners have no fluid neighbour and keep their value
        assert_eq!(fields.p(0, 0), 0.0);
    }

    #[test]
    fn obstacle_corner_averages() {
        let grid = Grid::from_fn(Domain::new(3, 3, 1.0, 1.0), |i, j| {
            if (i, j) == (1, 1) || i == 0 || j == 0 || i == 4 || j == 4 {
                CellType::FixedWall
            } else {
                CellType::Fluid
            }
        });
        let mut fields = ramp(&grid);
        apply_all(&boundaries_for(&grid, &BoundaryValues::default()), &mut fields);
        assert_eq!(fields.p(1, 1), 0.5 * (fields.p(1, 2) + fields.p(2, 1)));
    }

    #[test]
    fn outflow_is_dirichlet() {
        let grid = Grid::channel(Domain::new(4, 2, 1.0, 1.0));
        let values = BoundaryValues { outflow_pressure: 2.5, ..Default::default() };
        let list = boundaries_for(&grid, &values);
        assert_eq!(list.len(), 3);
        let mut fields = ramp(&grid);
        apply_all(&list, &mut fields);
        assert_eq!(fields.p(5, 1), 2.5);
        assert_eq!(fields.p(5, 2), 2.5);
        assert_eq!(fields.p(0, 2), fields.p(1, 2));
    }

    #[test]
    fn coarse_outflow_mirrors_the_high_side() {
        let grid = Grid::enclosed(Domain::new(4, 3, 1.0, 1.0), CellType::Outflow);
        let list = correction_boundaries_for(&grid, &BoundaryValues { outflow_pressure: 2.5, ..Default::default() });
        assert_eq!(list.iter().map(|b| b.name()).collect::<Vec<_>>(), vec!["coarse outflow"]);
        let mut fields = ramp(&grid);
        apply_all(&list, &mut fields);
        for j in 1..=3 {
            assert_eq!(fields.p(0, j), 0.0);
            assert_eq!(fields.p(5, j), -fields.p(4, j));
        }
        for i in 1..=4 {
            assert_eq!(fields.p(i, 0), 0.0);
            assert_eq!(fields.p(i, 4), -fields.p(i, 3));
        }
        assert_eq!(fields.p(5, 4), 0.0);
        assert_eq!(fields.p(0, 4), 0.0);
    }

    #[test]
    fn correction_boundaries_keep_walls() {
        let grid = Grid::channel(Domain::new(4, 2, 1.0, 1.0));
        let plain = boundaries_for(&grid, &BoundaryValues::default());
        let coarse = correction_boundaries_for(&grid, &BoundaryValues::default());
        let names = |list: &BoundaryList| list.iter().map(|b| b.name()).collect::<Vec<_>>();
        assert_eq!(names(&plain)[..2], names(&coarse)[..2]);
        assert_eq!(names(&coarse)[2], "coarse outflow");
    }

    #[test]
    fn application_is_idempotent() {
        let grid = Grid::channel(Domain::new(4, 4, 1.0, 1.0));
        let list = boundaries_for(&grid, &BoundaryValues::default());
        let mut once = ramp(&grid);
        apply_all(&list, &mut once);
        let mut twice = once.clone();
        apply_all(&list, &mut twice);
        for j in 0..grid.jmaxb() {
            for i in 0..grid.imaxb() {
                assert_eq!(once.p(i, j), twice.p(i, j));
            }
        }
    }
}
