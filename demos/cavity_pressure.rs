use presto::config::{MultigridOptions, SolverKind, SolverOptions};
use presto::context::PressureContext;
use presto::fields::FieldSet;
use presto::grid::{Domain, Grid};
use presto::parallel::SerialComm;
use rand::Rng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), presto::PError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let n = 32;
    let grid = Grid::lid_driven_cavity(Domain::unit_square(n, n));

    // random source, shifted to zero mean so the Neumann problem is solvable
    let mut rng = rand::thread_rng();
    let mut source = FieldSet::for_grid(&grid);
    let cells: Vec<_> = grid.interior_fluid().collect();
    for &(i, j) in &cells {
        *source.rs_mut(i, j) = rng.gen_range(-1.0..1.0);
    }
    let mean = cells.iter().map(|&(i, j)| source.rs(i, j)).sum::<f64>() / cells.len() as f64;
    for &(i, j) in &cells {
        *source.rs_mut(i, j) -= mean;
    }

    let runs = [
        ("jacobi", 1.0),
        ("wjacobi", 0.8),
        ("sor", 1.7),
        ("gs", 1.0),
        ("richardson", -2.0e-4),
        ("cg", 1.0),
        ("mg", 1.0),
    ];
    for (name, omega) in runs {
        let kind: SolverKind = name.parse()?;
        let options = SolverOptions::new(kind)
            .with_omega(omega)
            .with_multigrid(MultigridOptions { levels: 4, smoother_omega: 0.8, ..Default::default() });
        let mut ctx = PressureContext::from_options(&options, &grid, 1e-6, 10_000)?;
        let mut fields = source.clone();
        match ctx.solve_context(&mut fields, &grid, &SerialComm) {
            Ok(stats) => println!(
                "{:<12} iterations = {:>5}  residual = {:.3e}  converged = {}",
                kind, stats.iterations, stats.final_residual, stats.converged
            ),
            Err(e) => println!("{:<12} failed: {e}", kind),
        }
    }
    Ok(())
}
