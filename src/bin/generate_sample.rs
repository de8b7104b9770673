use std::path::PathBuf;

use clap::Parser;

use mrexo_viewer::synthetic::{write_result_dir, SyntheticSpec};

/// Write a synthetic result directory for trying the viewer.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output directory.
    #[arg(default_value = "sample_result")]
    out_dir: PathBuf,

    /// Number of bootstrap replicates.
    #[arg(long, default_value_t = 50)]
    n_boot: usize,

    /// Polynomial degree of the fabricated weights.
    #[arg(long, default_value_t = 12)]
    degree: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let spec = SyntheticSpec {
        n_boot: args.n_boot,
        degree: args.degree,
        seed: args.seed,
        ..SyntheticSpec::default()
    };
    write_result_dir(&args.out_dir, &spec)?;

    println!("Wrote {}", args.out_dir.display());
    println!("  degree:     {}", spec.degree);
    println!("  bootstraps: {}", spec.n_boot);
    println!("  grid:       {} points", spec.n_grid);
    Ok(())
}
