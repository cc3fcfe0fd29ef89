use clap::{Parser, ValueEnum};
use lbm_core::{
    kinetic_energy, max_speed, total_mass, FieldStats, LatticeConfig, LatticeSolver, Scenario,
    Vec2,
};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Initial condition selectable from the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ScenarioKind {
    /// Fluid at rest
    Uniform,
    /// Uniform flow along +x
    Flow,
    /// Square of doubled eastward population
    Jet,
    /// Rest state with seeded noise
    Random,
}

/// Lattice Boltzmann demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "lbm-headless")]
#[command(about = "Headless D2Q9 Lattice Boltzmann run", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 100)]
    height: usize,

    /// Lattice spacing
    #[arg(long, default_value_t = 1.0)]
    dx: f32,

    /// Timestep
    #[arg(long, default_value_t = 1.0)]
    dt: f32,

    /// Relaxation time (must exceed 0.5)
    #[arg(short, long, default_value_t = 1.0)]
    tau: f32,

    /// Initial condition
    #[arg(short, long, value_enum, default_value_t = ScenarioKind::Jet)]
    scenario: ScenarioKind,

    /// Initial density for uniform, flow and random scenarios
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Flow speed for the flow scenario
    #[arg(long, default_value_t = 0.05)]
    speed: f32,

    /// Noise amplitude for the random scenario
    #[arg(long, default_value_t = 0.1)]
    amplitude: f32,

    /// RNG seed for the random scenario
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of steps to run
    #[arg(short = 'n', long, default_value_t = 1000)]
    steps: u64,

    /// Steps between report lines
    #[arg(short, long, default_value_t = 100)]
    report_interval: u64,

    /// Run validation checks after the simulation
    #[arg(short, long)]
    validate: bool,
}

impl Args {
    fn scenario(&self) -> Scenario {
        match self.scenario {
            ScenarioKind::Uniform => Scenario::Uniform {
                density: self.density,
            },
            ScenarioKind::Flow => Scenario::UniformFlow {
                density: self.density,
                velocity: Vec2::new(self.speed, 0.0),
            },
            ScenarioKind::Jet => Scenario::SquareJet,
            ScenarioKind::Random => Scenario::RandomPerturbation {
                density: self.density,
                amplitude: self.amplitude,
                seed: self.seed,
            },
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Lattice Boltzmann Demo ===\n");

    let config = LatticeConfig::new(args.width, args.height, args.dx, args.dt, args.tau);
    let mut solver = match LatticeSolver::new(config) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Created {}x{} lattice, tau={:.3}, viscosity={:.5}, c={:.3}",
        args.width,
        args.height,
        args.tau,
        solver.viscosity(),
        solver.lattice_speed()
    );

    let scenario = args.scenario();
    if let Err(e) = solver.seed(&scenario) {
        eprintln!("Invalid scenario: {e}");
        return ExitCode::FAILURE;
    }
    let initial_mass = total_mass(solver.populations());
    println!(
        "Scenario: {}, initial mass {:.6}\n",
        scenario.name(),
        initial_mass
    );

    println!("   Step | Min rho  | Max rho  | Mass drift | Max |u|  | Kinetic energy");
    println!("--------|----------|----------|------------|----------|---------------");

    let started = Instant::now();
    let report_interval = args.report_interval.max(1);
    for step in 1..=args.steps {
        if let Err(e) = solver.step() {
            eprintln!("\nSimulation aborted: {e}");
            return ExitCode::FAILURE;
        }

        if step % report_interval == 0 || step == args.steps {
            let stats = FieldStats::from_field(solver.density());
            let drift = (stats.total - initial_mass) / initial_mass;
            println!(
                "{:7} | {:8.5} | {:8.5} | {:10.2e} | {:8.5} | {:14.6e}",
                step,
                stats.min,
                stats.max,
                drift,
                max_speed(solver.velocity()),
                kinetic_energy(solver.density(), solver.velocity())
            );
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    let cells = (args.width * args.height) as f64;
    println!("\n=== Simulation Complete ===");
    println!("Steps: {}", solver.steps_taken());
    println!("Wall time: {:.3}s", elapsed);
    if elapsed > 0.0 {
        println!(
            "Throughput: {:.2} MLUPS",
            cells * solver.steps_taken() as f64 / elapsed / 1.0e6
        );
    }

    if args.validate && !run_validation_tests() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_validation_tests() -> bool {
    println!("\n=== Running Validation Tests ===\n");
    let mut all_passed = true;

    // Test 1: uniform rest state is a fixed point
    println!("Test 1: Uniform Equilibrium");
    let mut solver = match LatticeSolver::new(LatticeConfig::new(32, 32, 1.0, 1.0, 1.0)) {
        Ok(solver) => solver,
        Err(e) => {
            println!("  ✗ FAIL: {e}");
            return false;
        }
    };
    let result = solver
        .seed(&Scenario::Uniform { density: 1.0 })
        .and_then(|()| solver.step());
    let stats = FieldStats::from_field(solver.density());
    let speed = max_speed(solver.velocity());
    println!(
        "  Density range: [{:.7}, {:.7}], max |u|: {:.2e}",
        stats.min, stats.max, speed
    );
    if result.is_ok()
        && (stats.min - 1.0).abs() < 1e-5
        && (stats.max - 1.0).abs() < 1e-5
        && speed < 1e-6
    {
        println!("  ✓ PASS: Uniform state unchanged");
    } else {
        println!("  ✗ FAIL: Uniform state drifted");
        all_passed = false;
    }

    // Test 2: mass conservation over a jet run
    println!("\nTest 2: Mass Conservation");
    let mut solver = match LatticeSolver::new(LatticeConfig::new(64, 64, 1.0, 1.0, 0.8)) {
        Ok(solver) => solver,
        Err(e) => {
            println!("  ✗ FAIL: {e}");
            return false;
        }
    };
    let result = solver.seed(&Scenario::SquareJet).and_then(|()| {
        let before = total_mass(solver.populations());
        solver.run(500).map(|()| before)
    });
    match result {
        Ok(before) => {
            let after = total_mass(solver.populations());
            let drift = (after - before).abs() / before;
            println!(
                "  Mass before: {:.6}, after: {:.6}, drift: {:.2e}",
                before, after, drift
            );
            if drift < 1e-5 {
                println!("  ✓ PASS: Mass conserved");
            } else {
                println!("  ✗ FAIL: Mass drift too large");
                all_passed = false;
            }
        }
        Err(e) => {
            println!("  ✗ FAIL: {e}");
            all_passed = false;
        }
    }

    println!("\n=== Validation Complete ===");
    all_passed
}
