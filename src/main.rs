use std::process;

use clap::{Parser, ValueEnum};
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use rayon::ThreadPoolBuilder;

use kmeans2d::{
    generate_points, CoordinateBounds, Execution, IterationPolicy, KMeans, KMeansConfig, KMeansError,
    KMeansState, Reduction, Result,
};

#[derive(Parser, Debug)]
#[command(name = "kmeans2d")]
#[command(about = "Lloyd's k-means clustering of random 2-D points", long_about = None)]
struct Args {
    /// Number of clusters
    #[arg(short, long, default_value_t = 2)]
    k: usize,

    /// Number of points to generate
    #[arg(short = 'n', long, default_value_t = 20)]
    points: usize,

    /// Lower coordinate bound (inclusive)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lower: f64,

    /// Upper coordinate bound (exclusive)
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    upper: f64,

    /// When to stop iterating
    #[arg(long, value_enum, default_value_t = PolicyArg::Converge)]
    policy: PolicyArg,

    /// Iteration count for --policy fixed
    #[arg(long, default_value_t = 5)]
    iterations: usize,

    /// Iteration cap for --policy converge
    #[arg(long, default_value_t = 100)]
    max_iter: usize,

    /// Scheduling of the assignment and update steps
    #[arg(long, value_enum, default_value_t = ExecutionArg::Sequential)]
    execution: ExecutionArg,

    /// Reduction used by the parallel update step
    #[arg(long, value_enum, default_value_t = ReductionArg::PerThread)]
    reduction: ReductionArg,

    /// Centroid initialization method
    #[arg(long, value_enum, default_value_t = InitArg::Random)]
    init: InitArg,

    /// RNG seed used for point generation and initialization
    #[arg(long, default_value_t = 42u64)]
    seed: u64,

    /// Override Rayon global thread pool size
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    Converge,
    Fixed,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ExecutionArg {
    Sequential,
    Parallel,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ReductionArg {
    Atomic,
    PerThread,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum InitArg {
    FirstK,
    Random,
}

impl Args {
    fn iteration_policy(&self) -> IterationPolicy {
        match self.policy {
            PolicyArg::Converge => IterationPolicy::Converge { max_iter: self.max_iter },
            PolicyArg::Fixed => IterationPolicy::Fixed { iterations: self.iterations },
        }
    }

    fn execution(&self) -> Execution {
        match self.execution {
            ExecutionArg::Sequential => Execution::Sequential,
            ExecutionArg::Parallel => Execution::Parallel {
                reduction: match self.reduction {
                    ReductionArg::Atomic => Reduction::Atomic,
                    ReductionArg::PerThread => Reduction::PerThread,
                },
            },
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("kmeans run failed: {}", err);
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(threads) = args.threads {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|err| KMeansError::InvalidConfiguration(format!(
                "failed to configure rayon threadpool: {}", err
            )))?;
        info!("Configured rayon global thread pool with {} threads", threads);
    }

    let mut rnd = StdRng::seed_from_u64(args.seed);
    let bounds = CoordinateBounds::new(args.lower, args.upper)?;
    info!("Generating {} points within [{}, {})", args.points, bounds.lower, bounds.upper);
    let points = generate_points(args.points, bounds, &mut rnd)?;

    let conf = KMeansConfig::build()
        .random_generator(rnd)
        .iteration_policy(args.iteration_policy())
        .execution(args.execution())
        .build();

    let kmean = KMeans::new(points)?;
    let result = match args.init {
        InitArg::FirstK => kmean.kmeans_lloyd(args.k, KMeans::init_first_k, &conf)?,
        InitArg::Random => kmean.kmeans_lloyd(args.k, KMeans::init_random_sample, &conf)?,
    };

    print_result(&result);
    Ok(())
}

fn print_result(result: &KMeansState<f64>) {
    for p in &result.points {
        println!("{}", p);
    }
    for (idx, c) in result.centroids.iter().enumerate() {
        println!("Centroid {} at ({}, {}) with {} points", idx + 1, c.x, c.y, result.centroid_frequency[idx]);
    }
    println!("Iterations: {} ({:?}, {:?})", result.iterations, result.policy, result.termination);
    for d in &result.degenerate_clusters {
        println!("Cluster {} was empty in iteration {}", d.cluster + 1, d.iteration);
    }
}
