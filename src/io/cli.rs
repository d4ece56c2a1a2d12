//! Command-line interface: generate a tiling and plot its vertex statistics

use crate::algorithm::engine::{EngineConfig, SubstitutionEngine};
use crate::analysis::histogram::{DensityGrid, Histogram, data_range};
use crate::analysis::statistics::Statistic;
use crate::catalog::{self, Mesh};
use crate::io::configuration::{
    BIN_SWEEP, DEDUP_DECIMALS, DEFAULT_CONFIG_PATH, DEFAULT_MAX_PAIRS, DEFAULT_MAX_TILES,
    DEFAULT_STEPS, DEFAULT_TILING, DENSITY_GRID_SIZE, HISTOGRAM_IMAGE_HEIGHT,
    HISTOGRAM_IMAGE_WIDTH, OUTPUT_DIR, TILING_IMAGE_MARGIN, TILING_IMAGE_SIZE,
};
use crate::io::error::{Result, WithContext};
use crate::io::image::{
    density_image_path, histogram_image_path, render_density, render_histogram, render_mesh, save,
    tiling_image_path,
};
use crate::io::progress::GenerationProgress;
use crate::io::ranges::PlotRanges;
use crate::math::scalar::Equality;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "inflatile")]
#[command(
    author,
    version,
    about = "Generate substitution tilings and histogram their vertex statistics"
)]
/// Command-line arguments for the tiling generator
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tiling family to generate
    #[arg(short, long, default_value = DEFAULT_TILING)]
    pub tiling: String,

    /// Number of substitution steps
    #[arg(short = 'n', long, default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    /// Statistic to histogram; repeat for several, all when omitted
    #[arg(short, long, value_enum)]
    pub statistic: Vec<Statistic>,

    /// Histogram bin count; repeat for several, a fixed sweep when omitted
    #[arg(short, long)]
    pub bins: Vec<usize>,

    /// Plot-range file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory images are written to
    #[arg(short, long, default_value = OUTPUT_DIR)]
    pub output: PathBuf,

    /// Compute statistics without writing any image
    #[arg(long)]
    pub no_image: bool,

    /// Also write a vertex density heat map
    #[arg(long)]
    pub density: bool,

    /// Largest generation allowed before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_TILES)]
    pub max_tiles: usize,

    /// Most pair distances a pair statistic may collect
    #[arg(long, default_value_t = DEFAULT_MAX_PAIRS)]
    pub max_pairs: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log debug details
    #[arg(short, long)]
    pub verbose: bool,

    /// List the available tilings and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Statistics to compute, all of them when none were named
    pub fn statistics(&self) -> Vec<Statistic> {
        if self.statistic.is_empty() {
            Statistic::ALL.to_vec()
        } else {
            self.statistic.clone()
        }
    }

    /// Bin counts to plot, the sweep when none were given
    pub fn bin_counts(&self) -> Vec<usize> {
        if self.bins.is_empty() {
            BIN_SWEEP.to_vec()
        } else {
            self.bins.clone()
        }
    }
}

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Tiles in the final generation
    pub tiles: usize,
    /// Distinct vertices
    pub vertices: usize,
    /// Histograms computed, as (statistic, bins, values binned)
    pub histograms: Vec<(Statistic, usize, u64)>,
    /// Every image written
    pub images: Vec<PathBuf>,
}

/// Runs one tiling from the command line through to images
pub struct TilingRunner {
    cli: Cli,
}

impl TilingRunner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Catalog listing, one `name  description` line per tiling
    pub fn listing() -> String {
        catalog::catalog()
            .iter()
            .map(|tiling| format!("{:<12}{}\n", tiling.name(), tiling.description()))
            .collect()
    }

    // Listing is the requested output
    #[allow(clippy::print_stdout)]
    fn print_listing() {
        print!("{}", Self::listing());
    }

    /// Execute the run described by the arguments
    ///
    /// # Errors
    ///
    /// Returns `UnknownTiling` for a bad name, `Config` for a malformed
    /// plot-range file, and propagates engine and export failures
    pub fn process(&self) -> Result<RunSummary> {
        if self.cli.list {
            Self::print_listing();
            return Ok(RunSummary::default());
        }

        let mesh = self.generate()?;
        let mut summary = RunSummary {
            tiles: mesh.tiles.len(),
            vertices: mesh.vertices.len(),
            ..RunSummary::default()
        };

        if !self.cli.no_image {
            let path = tiling_image_path(&self.cli.output, mesh.name, mesh.steps);
            save(&render_mesh(&mesh, TILING_IMAGE_SIZE, TILING_IMAGE_MARGIN)?, &path)?;
            summary.images.push(path);
        }

        let ranges = PlotRanges::from_optional_path(&self.cli.config)?;
        for statistic in self.cli.statistics() {
            self.histogram(&mesh, &ranges, statistic, &mut summary)?;
        }

        if self.cli.density {
            let grid = DensityGrid::from_points(&mesh.vertices, DENSITY_GRID_SIZE)?;
            if !self.cli.no_image {
                let path = density_image_path(&self.cli.output, mesh.name, mesh.steps);
                save(&render_density(&grid), &path)?;
                summary.images.push(path);
            }
        }

        tracing::info!(
            tiling = mesh.name,
            steps = mesh.steps,
            tiles = summary.tiles,
            vertices = summary.vertices,
            images = summary.images.len(),
            "run complete"
        );
        Ok(summary)
    }

    fn generate(&self) -> Result<Mesh> {
        let tiling = catalog::find(&self.cli.tiling)?;
        let engine = SubstitutionEngine::new(EngineConfig {
            max_tiles: self.cli.max_tiles,
            ..EngineConfig::default()
        })?;

        let progress = if self.cli.should_show_progress() {
            GenerationProgress::new(tiling.name(), self.cli.steps)
        } else {
            GenerationProgress::hidden(self.cli.steps)
        };
        let mesh = tiling.generate(&engine, self.cli.steps, &mut |report| progress.record(report));
        progress.finish();
        mesh
    }

    fn histogram(
        &self,
        mesh: &Mesh,
        ranges: &PlotRanges,
        statistic: Statistic,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let values = statistic.rescale(
            statistic
                .compute(
                    &mesh.vertices,
                    Equality::Decimals(DEDUP_DECIMALS),
                    self.cli.max_pairs,
                )
                .at_step(mesh.steps)?,
        );
        let range = if ranges.contains(mesh.name) {
            ranges.range(mesh.name, statistic)?
        } else if let Some(range) = data_range(&values) {
            range
        } else {
            tracing::warn!(
                tiling = mesh.name,
                statistic = statistic.key(),
                "no values to histogram"
            );
            return Ok(());
        };

        for bins in self.cli.bin_counts() {
            let histogram = Histogram::new(&values, bins, range)?;
            tracing::info!(
                statistic = statistic.key(),
                bins,
                values = values.len(),
                binned = histogram.total(),
                "histogram built"
            );
            summary.histograms.push((statistic, bins, histogram.total()));
            if !self.cli.no_image {
                let path =
                    histogram_image_path(&self.cli.output, mesh.name, bins, mesh.steps, statistic);
                save(
                    &render_histogram(&histogram, HISTOGRAM_IMAGE_WIDTH, HISTOGRAM_IMAGE_HEIGHT),
                    &path,
                )?;
                summary.images.push(path);
            }
        }
        Ok(())
    }
}
