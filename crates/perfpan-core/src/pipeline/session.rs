use tracing::{debug, info, warn};

use crate::align::{run_search, MaskComparator, ScoringPolicy, SearchOutcome, SearchStrategy, SearchTrace};
use crate::error::Result;
use crate::frame::{FrameAlignment, MaskView, OffsetOrigin};
use crate::io::hints::load_hint_file;
use crate::io::log::{PlotWriter, ResultLog};
use crate::io::FrameSource;

use super::config::AlignConfig;
use super::store::{FrameOffsetStore, StoredOffset};

/// One frame's search: a comparator (with its own score cache) bound to a
/// reference/current pair, and the strategy that drives it.
///
/// Dropped once the search completes, so no cached score can leak into
/// another frame.
pub struct AlignmentSession<'a> {
    comparator: MaskComparator<'a>,
    strategy: SearchStrategy,
}

impl<'a> AlignmentSession<'a> {
    pub fn new(
        reference: MaskView<'a>,
        current: MaskView<'a>,
        strategy: SearchStrategy,
        policy: ScoringPolicy,
        blank_threshold: f64,
    ) -> Result<Self> {
        Ok(Self {
            comparator: MaskComparator::new(reference, current, policy, blank_threshold)?,
            strategy,
        })
    }

    pub fn run(self) -> Result<SearchOutcome> {
        run_search(self.comparator, self.strategy)
    }
}

/// Run-scoped alignment driver.
///
/// Owns the frame offset store and the optional log and plot outputs for a
/// whole clip. Each [`align`](Self::align) call either returns a stored
/// offset or runs a fresh [`AlignmentSession`] and records its result.
pub struct PanEstimator {
    config: AlignConfig,
    strategy: SearchStrategy,
    policy: ScoringPolicy,
    store: FrameOffsetStore,
    log: Option<ResultLog>,
    plot: Option<PlotWriter>,
    searches: usize,
}

impl PanEstimator {
    /// Validate the config, seed hints and open output files.
    pub fn new(config: AlignConfig) -> Result<Self> {
        config.validate()?;
        let strategy = config.strategy()?;
        let policy = config.scoring_policy()?;

        let mut store = FrameOffsetStore::new();
        if let Some(path) = config.hint_path() {
            let hints = load_hint_file(path)?;
            let seeded = store.seed_hints(hints);
            info!(path = %path.display(), seeded, "Loaded frame hints");
        }

        let log = config.log_path().map(ResultLog::create).transpose()?;

        let plot = match (config.plot_path(), strategy) {
            (Some(path), SearchStrategy::Exhaustive) => Some(PlotWriter::create(path)?),
            (Some(path), _) => {
                warn!(
                    path = %path.display(),
                    "Score plots are only written by the exhaustive search, ignoring"
                );
                None
            }
            (None, _) => None,
        };

        info!(
            strategy = %strategy,
            scoring = %policy,
            reference = config.reference_frame,
            copy_on_limit = config.copy_on_limit,
            "Alignment run configured"
        );

        Ok(Self {
            config,
            strategy,
            policy,
            store,
            log,
            plot,
            searches: 0,
        })
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    pub fn store(&self) -> &FrameOffsetStore {
        &self.store
    }

    /// Number of frames that actually ran a search.
    pub fn searches_run(&self) -> usize {
        self.searches
    }

    /// The stored alignment for `frame`, if any.
    pub fn stored(&self, frame: usize) -> Option<FrameAlignment> {
        self.store.get(frame).map(|o| o.to_alignment(frame))
    }

    /// Align `frame` of `source` against the configured reference frame.
    pub fn align<S>(&mut self, source: &S, frame: usize) -> Result<FrameAlignment>
    where
        S: FrameSource + ?Sized,
    {
        if let Some(stored) = self.stored(frame) {
            return Ok(stored);
        }
        let reference = source.read_mask(self.config.reference_frame)?;
        let current = source.read_mask(frame)?;
        self.align_masks(frame, reference.view(), current.view())
    }

    /// Align `frame` given its reference and current buffers directly.
    pub fn align_masks<'a>(
        &mut self,
        frame: usize,
        reference: MaskView<'a>,
        current: MaskView<'a>,
    ) -> Result<FrameAlignment> {
        if let Some(stored) = self.stored(frame) {
            debug!(frame, origin = %stored.origin, "Reusing stored offset");
            return Ok(stored);
        }

        let session = AlignmentSession::new(
            reference,
            current,
            self.strategy,
            self.policy,
            self.config.blank_threshold,
        )?;
        let outcome = session.run()?;
        self.searches += 1;

        let best = outcome.result;
        let limit = outcome.bounds.limit_flags(best.shift);
        let mut offset = StoredOffset {
            dx: best.shift.x,
            dy: best.shift.y,
            score: best.best_score(),
            limit,
            origin: OffsetOrigin::Search,
        };

        if !limit.is_empty() && self.config.copy_on_limit {
            let previous = frame.checked_sub(1).and_then(|p| self.store.get(p));
            if let Some(previous) = previous {
                warn!(
                    frame,
                    shift = %best.shift,
                    limit = %limit,
                    dx = previous.dx,
                    dy = previous.dy,
                    "Shift at search limit, copying previous frame's offset"
                );
                offset.dx = previous.dx;
                offset.dy = previous.dy;
                offset.origin = OffsetOrigin::CopiedOnLimit;
            }
        }

        self.store.record(frame, offset);
        let alignment = offset.to_alignment(frame);

        debug!(
            frame,
            dx = alignment.dx,
            dy = alignment.dy,
            score = ?alignment.score,
            limit = %alignment.limit,
            evaluations = outcome.evaluations,
            cache_hits = outcome.cache_hits,
            "Frame aligned"
        );

        if let Some(log) = self.log.as_mut() {
            log.write_alignment(&alignment)?;
        }
        if let (Some(plot), SearchTrace::Exhaustive(sweep)) = (self.plot.as_mut(), &outcome.trace) {
            plot.write_sweep(frame, sweep)?;
        }

        Ok(alignment)
    }
}
