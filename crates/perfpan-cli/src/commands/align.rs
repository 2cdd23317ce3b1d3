use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use perfpan_core::align::ScoringPolicy;
use perfpan_core::consts::DEFAULT_BINARIZE_LEVEL;
use perfpan_core::io::{Binarized, FrameSource};
use perfpan_core::mask::Threshold;
use perfpan_core::pipeline::{run_alignment_reported, ProgressReporter};
use perfpan_core::{AlignConfig, PanEstimator};

use super::open_source;
use crate::summary::{print_align_summary, print_results};

#[derive(Clone, Copy, ValueEnum)]
pub enum ScoringArg {
    /// Fraction of differing pixels (lower is better)
    Mismatch,
    /// Weighted hole/background agreement (higher is better)
    Weighted,
}

impl From<ScoringArg> for ScoringPolicy {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Mismatch => ScoringPolicy::MismatchRatio,
            ScoringArg::Weighted => ScoringPolicy::WeightedAgreement,
        }
    }
}

#[derive(Args)]
pub struct AlignArgs {
    /// Input SER file or image directory holding the perforation mask
    pub file: PathBuf,

    /// Alignment config file (TOML); flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Index of the reference frame
    #[arg(long)]
    pub reference: Option<usize>,

    /// Ring search radius; -1 scores every candidate shift
    #[arg(long, allow_hyphen_values = true)]
    pub max_search: Option<i32>,

    /// Fraction of the overlap below which a color marks a blank region
    #[arg(long)]
    pub blank_threshold: Option<f64>,

    /// Reuse the previous frame's offset when a search ends on a bound
    #[arg(long)]
    pub copy_on_limit: bool,

    /// Override the scoring convention of the chosen search
    #[arg(long, value_enum)]
    pub scoring: Option<ScoringArg>,

    /// Hint file with offsets to reuse instead of searching
    #[arg(long)]
    pub hints: Option<PathBuf>,

    /// Per-frame result log (also usable as a hint file)
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Score surface dump for exhaustive searches
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Binarize input frames at this level (samples >= level become white);
    /// a bare `--level` uses the default level
    #[arg(long, conflicts_with = "otsu", num_args = 0..=1)]
    pub level: Option<Option<u8>>,

    /// Binarize input frames with a per-frame Otsu threshold
    #[arg(long)]
    pub otsu: bool,

    /// First frame to align
    #[arg(long, default_value = "0")]
    pub first: usize,

    /// Last frame to align (inclusive)
    #[arg(long)]
    pub last: Option<usize>,

    /// Only print the summary, not the per-frame table
    #[arg(short, long)]
    pub quiet: bool,
}

struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin(&self, total_frames: usize) {
        self.pb.set_length(total_frames as u64);
        self.pb.set_message("Aligning frames");
    }

    fn advance(&self, frames_done: usize) {
        self.pb.set_position(frames_done as u64);
    }

    fn finish(&self) {
        self.pb.finish_with_message("Done");
    }
}

pub fn run(args: &AlignArgs) -> Result<()> {
    let config = build_config(args)?;
    let threshold = binarize_threshold(args);

    let source = open_source(&args.file)?;
    let source: Box<dyn FrameSource> = match threshold {
        Some(threshold) => Box::new(Binarized::new(source, threshold)),
        None => source,
    };

    let total = source.frame_count();
    let end = args.last.map_or(total, |last| last.saturating_add(1));
    if args.first >= end.min(total) {
        bail!(
            "Empty frame range {}..{} for a clip of {} frames",
            args.first,
            end,
            total
        );
    }

    let mut estimator = PanEstimator::new(config)?;
    print_align_summary(&args.file, total, &estimator, threshold.as_ref());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { pb };

    let results =
        run_alignment_reported(source.as_ref(), &mut estimator, args.first..end, &reporter)?;

    print_results(&results, &estimator, args.quiet);
    Ok(())
}

fn binarize_threshold(args: &AlignArgs) -> Option<Threshold> {
    if args.otsu {
        Some(Threshold::Otsu)
    } else {
        args.level
            .map(|level| Threshold::Fixed(level.unwrap_or(DEFAULT_BINARIZE_LEVEL)))
    }
}

fn build_config(args: &AlignArgs) -> Result<AlignConfig> {
    let mut config = if let Some(ref path) = args.config {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str::<AlignConfig>(&contents).context("Invalid alignment config")?
    } else {
        AlignConfig::default()
    };

    if let Some(reference) = args.reference {
        config.reference_frame = reference;
    }
    if let Some(max_search) = args.max_search {
        config.max_search = max_search;
    }
    if let Some(bt) = args.blank_threshold {
        config.blank_threshold = bt;
    }
    if args.copy_on_limit {
        config.copy_on_limit = true;
    }
    if let Some(scoring) = args.scoring {
        config.scoring = Some(scoring.into());
    }
    if args.hints.is_some() {
        config.hint_file = args.hints.clone();
    }
    if args.log.is_some() {
        config.log_file = args.log.clone();
    }
    if args.plot.is_some() {
        config.plot_file = args.plot.clone();
    }
    Ok(config)
}
