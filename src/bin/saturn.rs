//! Saturn Binary
//!
//! Parallel saturating histogram benchmark.
//!
//! Commands: run, generate

use clap::Parser;
use saturn::*;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
enum Command {
    #[command(about = "Compute the saturating histogram of an input image")]
    Run {
        #[arg(required = true, help = "Number of timed iterations (positive)")]
        iterations: NonZeroUsize,
        #[arg(short, long, required = true, help = "Input image file")]
        input: PathBuf,
        #[arg(short, long, help = "Output histogram image (PGM)")]
        output: Option<PathBuf>,
        #[arg(short, long, help = "Worker threads [default: logical cores]")]
        threads: Option<usize>,
    },
    #[command(about = "Write a pseudo-random input image", alias = "gen")]
    Generate {
        #[arg(short, long, required = true)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_IMG_WIDTH)]
        width: u32,
        #[arg(long, default_value_t = DEFAULT_IMG_HEIGHT)]
        height: u32,
        #[arg(long, default_value_t = DEFAULT_HISTO_WIDTH)]
        histo_width: u32,
        #[arg(long, default_value_t = DEFAULT_HISTO_HEIGHT)]
        histo_height: u32,
        #[arg(long, default_value_t = 4096, help = "Samples are drawn from [0, levels)")]
        levels: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() {
    log();
    if let Err(e) = Command::parse().execute() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

impl Command {
    fn execute(self) -> anyhow::Result<()> {
        match self {
            Self::Run {
                iterations,
                input,
                output,
                threads,
            } => run(iterations, input, output, threads.unwrap_or_else(workers)),
            Self::Generate {
                output,
                width,
                height,
                histo_width,
                histo_height,
                levels,
                seed,
            } => Image::generate(width, height, histo_width, histo_height, levels, seed)?
                .save(output),
        }
    }
}

fn run(
    iterations: NonZeroUsize,
    input: PathBuf,
    output: Option<PathBuf>,
    threads: usize,
) -> anyhow::Result<()> {
    let ref mut timers = Timers::new();
    timers.switch_sub(Phase::Io, "Input");
    let image = Image::load(&input)?;
    timers.switch(Phase::Compute);
    let mut kernel = Kernel::new(&image, threads)?;
    println!("{}\n", kernel.range());
    let histogram = kernel.run(iterations);
    log::debug!("occupied bins\n{}", histogram);
    if let Some(ref path) = output {
        timers.switch_sub(Phase::Io, "Output");
        histogram.dump(path)?;
    }
    timers.report();
    Ok(())
}
