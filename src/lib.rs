//! Parallel saturating histogram kernel.
//!
//! A benchmark workload that bins a large array of `u32` pixel samples into
//! saturating byte counters, using a fixed pool of workers that each own a
//! partial histogram. Partials are merged into one global histogram after
//! every pass, and passes are repeated for stable timing.
//!
//! Data flow:
//!
//! ```text
//! Image -> Range::reduce -> Builder::build (partials) -> Merger::merge -> Histogram
//! ```

pub mod builder;
pub mod count;
pub mod histogram;
pub mod image;
pub mod kernel;
pub mod merger;
pub mod partial;
pub mod partition;
pub mod range;
pub mod timer;

pub use builder::*;
pub use count::*;
pub use histogram::*;
pub use image::*;
pub use kernel::*;
pub use merger::*;
pub use partial::*;
pub use partition::*;
pub use range::*;
pub use timer::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// One input value to be binned.
pub type Sample = u32;
/// Stable index of a worker in the pool, assigned at pool creation.
pub type WorkerId = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// KERNEL PARAMETERS
// ============================================================================
/// Ceiling of every counter, partial or global.
pub const SATURATION: u8 = u8::MAX;
/// Sample grid width of generated inputs.
pub const DEFAULT_IMG_WIDTH: u32 = 996;
/// Sample grid height of generated inputs.
pub const DEFAULT_IMG_HEIGHT: u32 = 1040;
/// Output grid width of generated inputs.
pub const DEFAULT_HISTO_WIDTH: u32 = 256;
/// Output grid height of generated inputs (256 x 8192 bins).
pub const DEFAULT_HISTO_HEIGHT: u32 = 8192;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at INFO.
#[cfg(feature = "cli")]
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}

/// Default worker count: one per logical core.
pub fn workers() -> usize {
    num_cpus::get()
}
