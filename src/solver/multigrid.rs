//! Geometric multigrid over a hierarchy of staggered grids.
//!
//! The hierarchy is an arena of [`Level`]s indexed `0..L`; level 0 is the
//! finest and every further level halves the cell count per direction. The
//! V-cycle recurses on the level index. Level fields are scratch space that
//! is rewritten on every cycle; only the grids and boundary lists persist.
//!
//! Each smoothing sweep computes a fresh field from the level's stored
//! pressure, stores it back and re-applies the level's boundaries before the
//! next sweep reads neighbours. On coarse levels the stored "pressure" is the
//! error correction, so their outflow cells hold a homogeneous condition
//! placed on the finest grid's ring (see [`CoarseOutFlow`]).
//!
//! [`CoarseOutFlow`]: crate::boundary::CoarseOutFlow

use crate::boundary::{Boundary, BoundaryList, BoundaryValues, apply_all, boundaries_for, correction_boundaries_for};
use crate::config::options::MultigridOptions;
use crate::core::Discretization;
use crate::error::PError;
use crate::fields::FieldSet;
use crate::grid::Grid;
use crate::matrix::DenseField;
use crate::solver::transfer::{RestrictionStencil, prolongate, restrict};
use crate::solver::{PressureSolver, residual_sum_squares};
use tracing::{debug, trace};

struct Level {
    grid: Grid,
    disc: Discretization,
    fields: FieldSet,
    boundaries: BoundaryList,
}

/// Multigrid hierarchy with its smoother and transfer operators.
pub struct MultiGrid {
    levels: Vec<Level>,
    pre_smooth: usize,
    post_smooth: usize,
    smoother_omega: f64,
    restriction: RestrictionStencil,
}

impl MultiGrid {
    /// Build from an externally prepared hierarchy, finest grid first.
    /// Grids beyond `options.levels` are ignored.
    pub fn new(options: &MultigridOptions, values: &BoundaryValues, mut grids: Vec<Grid>) -> Result<Self, PError> {
        if options.levels == 0 {
            return Err(PError::InvalidLevels);
        }
        if grids.len() < options.levels {
            return Err(PError::HierarchyTooShallow { requested: options.levels, supplied: grids.len() });
        }
        grids.truncate(options.levels);
        for (k, pair) in grids.windows(2).enumerate() {
            let (fine, coarse) = (&pair[0], &pair[1]);
            if fine.imax() != 2 * coarse.imax() || fine.jmax() != 2 * coarse.jmax() {
                return Err(PError::UncoarsenableGrid { level: k, imax: fine.imax(), jmax: fine.jmax() });
            }
        }
        for grid in &grids {
            grid.domain().validate()?;
        }

        let levels = grids
            .into_iter()
            .enumerate()
            .map(|(k, grid)| {
                let boundaries =
                    if k == 0 { boundaries_for(&grid, values) } else { correction_boundaries_for(&grid, values) };
                Level { disc: Discretization::for_grid(&grid), fields: FieldSet::for_grid(&grid), grid, boundaries }
            })
            .collect();

        Ok(Self {
            levels,
            pre_smooth: options.pre_smooth,
            post_smooth: options.post_smooth,
            smoother_omega: options.smoother_omega,
            restriction: options.restriction,
        })
    }

    /// Coarsen `finest` `options.levels - 1` times and build on the result.
    pub fn from_finest(finest: &Grid, options: &MultigridOptions, values: &BoundaryValues) -> Result<Self, PError> {
        let grids = finest.hierarchy(options.levels)?;
        Self::new(options, values, grids)
    }

    pub fn levels(&self) -> usize {
        self.levels.len()
    }

    pub fn level_grid(&self, level: usize) -> &Grid {
        &self.levels[level].grid
    }

    pub fn level_fields(&self, level: usize) -> &FieldSet {
        &self.levels[level].fields
    }

    pub fn level_fields_mut(&mut self, level: usize) -> &mut FieldSet {
        &mut self.levels[level].fields
    }

    /// Sweeps spent on the coarsest level in place of a direct solve.
    pub fn coarsest_sweeps(&self) -> usize {
        5 * (self.pre_smooth + self.post_smooth)
    }

    /// One V-cycle starting at `level`, using that level's stored `p` as the
    /// initial guess and its `rs` as right-hand side. The result is left in
    /// the level's `p`.
    pub fn cycle(&mut self, level: usize) {
        if level + 1 == self.levels.len() {
            self.smooth(level, self.coarsest_sweeps());
            return;
        }

        self.smooth(level, self.pre_smooth);

        let residual = self.residual(level);
        let coarse_rs = restrict(&residual, self.restriction);
        {
            let coarse = &mut self.levels[level + 1].fields;
            coarse.rs_matrix_mut().copy_from(&coarse_rs);
            coarse.p_matrix_mut().fill(0.0);
        }

        self.cycle(level + 1);

        let correction = prolongate(self.levels[level + 1].fields.p_matrix());
        let Level { grid, fields, boundaries, .. } = &mut self.levels[level];
        let p = fields.p_matrix_mut();
        for j in 1..=grid.jmax() {
            for i in 1..=grid.imax() {
                p[(i, j)] += correction[(i, j)];
            }
        }
        apply_all(boundaries, fields);

        self.smooth(level, self.post_smooth);

        if tracing::enabled!(tracing::Level::TRACE) {
            let res = residual_sum_squares(&self.levels[level].fields, &self.levels[level].grid);
            trace!(level, res, "v-cycle level finished");
        }
    }

    /// `sweeps` damped-Jacobi sweeps over every interior cell of `level`,
    /// re-applying the level's boundaries after each one.
    pub fn smooth(&mut self, level: usize, sweeps: usize) {
        let omega = self.smoother_omega;
        let Level { grid, disc, fields, boundaries } = &mut self.levels[level];
        let coeff = disc.diagonal_coeff();
        let (imax, jmax) = (grid.imax(), grid.jmax());

        for _ in 0..sweeps {
            let fresh = {
                let p = fields.p_matrix();
                let mut fresh = p.clone();
                for j in 1..=jmax {
                    for i in 1..=imax {
                        let jacobi = coeff * (disc.sor_helper(p, i, j) - fields.rs(i, j));
                        fresh[(i, j)] = (1.0 - omega) * p[(i, j)] + omega * jacobi;
                    }
                }
                fresh
            };
            *fields.p_matrix_mut() = fresh;
            apply_all(boundaries, fields);
        }
    }

    /// `rs − laplacian(p)` on every interior cell of `level`; zero ring.
    pub fn residual(&self, level: usize) -> DenseField {
        let Level { grid, disc, fields, .. } = &self.levels[level];
        let mut r = DenseField::zeros(grid.imax(), grid.jmax());
        for j in 1..=grid.jmax() {
            for i in 1..=grid.imax() {
                r[(i, j)] = fields.rs(i, j) - disc.laplacian(fields.p_matrix(), i, j);
            }
        }
        r
    }
}

/// Multigrid V-cycle as a [`PressureSolver`]: one full cycle per call.
pub struct MultiGridVCycle {
    engine: MultiGrid,
}

impl MultiGridVCycle {
    pub fn new(engine: MultiGrid) -> Self {
        Self { engine }
    }

    pub fn from_finest(finest: &Grid, options: &MultigridOptions, values: &BoundaryValues) -> Result<Self, PError> {
        Ok(Self::new(MultiGrid::from_finest(finest, options, values)?))
    }

    pub fn engine(&self) -> &MultiGrid {
        &self.engine
    }
}

impl PressureSolver for MultiGridVCycle {
    /// Runs one V-cycle on a copy of `fields` and writes the pressure back.
    /// The passed boundary list is ignored in favour of the per-level lists.
    fn solve(&mut self, fields: &mut FieldSet, grid: &Grid, _boundaries: &[Box<dyn Boundary>]) -> f64 {
        {
            let finest = self.engine.level_fields_mut(0);
            finest.p_matrix_mut().copy_from(fields.p_matrix());
            finest.rs_matrix_mut().copy_from(fields.rs_matrix());
        }

        self.engine.cycle(0);

        fields.p_matrix_mut().copy_from(self.engine.level_fields(0).p_matrix());
        let res = residual_sum_squares(fields, grid);
        debug!(levels = self.engine.levels(), res, "v-cycle finished");
        res
    }

    fn name(&self) -> &'static str {
        "multigrid v-cycle"
    }
}
