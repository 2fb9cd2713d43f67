//! The pressure iteration driver over every solver kind.

use presto::boundary::{BoundaryValues, boundaries_for};
use presto::config::{MultigridOptions, SolverKind, SolverOptions};
use presto::context::PressureContext;
use presto::error::PError;
use presto::fields::FieldSet;
use presto::grid::{CellType, Domain, Grid};
use presto::parallel::{Comm, SerialComm};
use presto::solver::Jacobi;

fn dirichlet_problem(n: usize) -> (Grid, FieldSet) {
    let grid = Grid::enclosed(Domain::unit_square(n, n), CellType::Outflow);
    let mut fields = FieldSet::for_grid(&grid);
    for (i, j) in grid.interior_fluid() {
        *fields.rs_mut(i, j) = 1.0;
    }
    (grid, fields)
}

fn damped_multigrid(levels: usize) -> MultigridOptions {
    MultigridOptions { levels, smoother_omega: 0.8, ..Default::default() }
}

/// Pretends to be one of `ranks` identical processes.
struct MirroredComm {
    ranks: usize,
}

impl Comm for MirroredComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        self.ranks
    }
    fn barrier(&self) {}
    fn all_reduce(&self, x: f64) -> f64 {
        x * self.ranks as f64
    }
}

#[test]
fn every_kind_reaches_tolerance() {
    let (grid, source) = dirichlet_problem(16);
    let kinds = [
        (SolverKind::Jacobi, 1.0),
        (SolverKind::WeightedJacobi, 0.8),
        (SolverKind::Sor, 1.7),
        (SolverKind::GaussSeidel, 1.0),
        (SolverKind::Richardson, -4e-4),
        (SolverKind::ConjugateGradient, 1.0),
        (SolverKind::MultiGridVCycle, 1.0),
    ];
    for (kind, omega) in kinds {
        let options = SolverOptions::new(kind).with_omega(omega).with_multigrid(damped_multigrid(3));
        let mut ctx = PressureContext::from_options(&options, &grid, 1e-6, 20_000).unwrap();
        let mut fields = source.clone();
        let stats = ctx.solve_context(&mut fields, &grid, &SerialComm).unwrap();
        assert!(stats.converged, "{kind} stopped at {} with {}", stats.iterations, stats.final_residual);
        assert!(stats.final_residual <= 1e-6);
    }
}

#[test]
fn multigrid_needs_fewer_iterations_than_sor() {
    let (grid, source) = dirichlet_problem(32);
    let iterations = |options: SolverOptions| {
        let mut ctx = PressureContext::from_options(&options, &grid, 1e-6, 20_000).unwrap();
        let mut fields = source.clone();
        ctx.solve_context(&mut fields, &grid, &SerialComm).unwrap().iterations
    };
    let mg = iterations(SolverOptions::new(SolverKind::MultiGridVCycle).with_multigrid(damped_multigrid(4)));
    let sor = iterations(SolverOptions::new(SolverKind::Sor).with_omega(1.7));
    assert!(mg < sor, "multigrid {mg} vs sor {sor}");
}

#[test]
fn identical_ranks_give_the_serial_residual() {
    let (grid, source) = dirichlet_problem(8);
    // a zero tolerance runs the full budget
    let context = || PressureContext::from_options(&SolverOptions::default(), &grid, 0.0, 5).unwrap();

    let mut fields = source.clone();
    let serial = context().solve_context(&mut fields, &grid, &SerialComm).unwrap();
    let mut fields = source.clone();
    let mirrored = context().solve_context(&mut fields, &grid, &MirroredComm { ranks: 4 }).unwrap();

    assert_eq!(serial.iterations, 5);
    assert_eq!(mirrored.iterations, 5);
    approx::assert_relative_eq!(serial.final_residual, mirrored.final_residual, max_relative = 1e-12);
}

#[test]
fn unknown_solver_names_are_rejected() {
    assert_eq!("bicgstab".parse::<SolverKind>(), Err(PError::UnknownSolver("bicgstab".into())));
    assert_eq!("Multigrid".parse::<SolverKind>(), Ok(SolverKind::MultiGridVCycle));
}

#[test]
fn hand_built_context() {
    let (grid, mut fields) = dirichlet_problem(4);
    let boundaries = boundaries_for(&grid, &BoundaryValues::default());
    let mut ctx = PressureContext::new(Box::new(Jacobi::new()), boundaries, 1e-8, 2000);
    assert_eq!(ctx.solver_name(), "jacobi");
    assert_eq!(ctx.boundaries().len(), 1);
    assert!(ctx.solve_context(&mut fields, &grid, &SerialComm).unwrap().converged);
}

#[test]
fn nonzero_outflow_pressure_shifts_the_solution() {
    let grid = Grid::enclosed(Domain::unit_square(8, 8), CellType::Outflow);
    let values = BoundaryValues { outflow_pressure: 2.0, ..Default::default() };
    let options = SolverOptions::new(SolverKind::MultiGridVCycle)
        .with_multigrid(damped_multigrid(3))
        .with_boundary_values(values);
    let mut ctx = PressureContext::from_options(&options, &grid, 1e-10, 500).unwrap();
    // laplacian(p) = 0 with p = 2 on the ring is solved by p = 2
    let mut fields = FieldSet::for_grid(&grid);
    let stats = ctx.solve_context(&mut fields, &grid, &SerialComm).unwrap();
    assert!(stats.converged);
    for (i, j) in grid.interior_fluid() {
        approx::assert_abs_diff_eq!(fields.p(i, j), 2.0, epsilon = 1e-9);
    }
}

#[cfg(feature = "rayon")]
#[test]
fn subdomains_iterate_in_parallel() {
    use presto::context::Subdomain;
    use presto::parallel::{RayonComm, solve_subdomains};

    let comm = RayonComm::new();
    assert_eq!(comm.size(), 1);
    assert!(comm.threads() >= 1);

    let mut subdomains: Vec<Subdomain> = (0..4)
        .map(|_| {
            let (grid, fields) = dirichlet_problem(8);
            let ctx = PressureContext::from_options(&SolverOptions::default(), &grid, 1e-8, 100).unwrap();
            Subdomain::new(grid, fields, ctx)
        })
        .collect();

    let (grid, mut fields) = dirichlet_problem(8);
    let mut reference = PressureContext::from_options(&SolverOptions::default(), &grid, 1e-8, 100).unwrap();

    for _ in 0..5 {
        let total = solve_subdomains(&mut subdomains);
        let single = reference.iterate(&mut fields, &grid);
        approx::assert_relative_eq!(total, 4.0 * single, max_relative = 1e-12);
    }
}
