use rayon::prelude::*;

use crate::repeat_analysis::sequence_repeat_analyzer::SequenceRepeatAnalyzer;
use crate::utils::errors::RepeatAnalyzerError;

/**
 * Per-position summary of the repeat structure of one sequence: the period
 * length with the most repeats at each position and that period's repeat count.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatProfile {
    pub best_periods: Vec<usize>,
    pub best_period_repeat_counts: Vec<usize>,
}

/**
 * Profiles a batch of sequences in parallel.
 *
 * <p>The analyzer mutates its tables in place during a load, so it cannot be
 * shared across concurrent loads. Each rayon worker therefore owns one analyzer,
 * sized to the longest sequence of the batch, and reuses it for every sequence
 * that lands on that worker.</p>
 */
pub fn profile_sequences(
    sequences: &[&[u8]],
    max_period: usize,
) -> Result<Vec<RepeatProfile>, RepeatAnalyzerError> {
    if sequences.is_empty() {
        return Ok(Vec::new());
    }
    let max_sequence_length = sequences
        .iter()
        .map(|sequence| sequence.len())
        .max()
        .unwrap_or(0)
        .max(1);
    debug!(
        "profiling {} sequences with period lengths up to {}",
        sequences.len(),
        max_period
    );
    sequences
        .par_iter()
        .map_init(
            || SequenceRepeatAnalyzer::new(max_sequence_length, max_period),
            |analyzer, sequence| {
                let analyzer = analyzer.as_mut().map_err(|error| error.clone())?;
                profile_with(analyzer, sequence)
            },
        )
        .collect()
}

fn profile_with(
    analyzer: &mut SequenceRepeatAnalyzer,
    sequence: &[u8],
) -> Result<RepeatProfile, RepeatAnalyzerError> {
    analyzer.load(sequence)?;
    let mut best_periods = Vec::with_capacity(sequence.len());
    let mut best_period_repeat_counts = Vec::with_capacity(sequence.len());
    for position in 0..sequence.len() {
        best_periods.push(analyzer.best_period(position)?);
        best_period_repeat_counts.push(analyzer.best_period_repeat_count(position)?);
    }
    Ok(RepeatProfile {
        best_periods,
        best_period_repeat_counts,
    })
}
