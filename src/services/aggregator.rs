//! Folds heuristic results into the final reports.

use crate::domain::models::{ErrorReport, HeuristicResult, SignalReport};

/// Accumulates [`HeuristicResult`]s in any order.
///
/// Signals are OR-combined; each error slot keeps the latest non-empty value.
/// No I/O happens here.
#[derive(Debug, Default)]
pub struct Aggregator {
    signals: SignalReport,
    errors: ErrorReport,
    absorbed: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, result: HeuristicResult) {
        self.signals.merge(result.signals);
        self.errors.merge(result.errors);
        self.absorbed += 1;
    }

    /// Number of results absorbed so far.
    pub fn absorbed(&self) -> usize {
        self.absorbed
    }

    /// The merged signals plus the combined error, if any slot is non-empty.
    pub fn finish(self) -> (SignalReport, Option<ErrorReport>) {
        (self.signals, self.errors.into_option())
    }

    /// Aggregate a complete set of results.
    pub fn aggregate<I>(results: I) -> (SignalReport, Option<ErrorReport>)
    where
        I: IntoIterator<Item = HeuristicResult>,
    {
        results
            .into_iter()
            .fold(Self::new(), |mut agg, result| {
                agg.absorb(result);
                agg
            })
            .finish()
    }
}
