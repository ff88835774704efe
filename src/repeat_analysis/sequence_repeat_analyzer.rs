use std::cmp::max;

use crate::utils::errors::RepeatAnalyzerError;

/**
 * Per-position short tandem repeat profiler for a read or any other short byte
 * sequence.
 *
 * <p>For every period length between 1 and a configured maximum, and for every
 * position of the loaded sequence, the analyzer holds the number of consecutive
 * repeats of a period-sized unit that overlap that position. From those counts it
 * derives, per position, the period with the most repeats.</p>
 *
 * <p>All storage is allocated up-front at construction and reused across
 * {@link #load} calls, so a single instance can profile many reads in a row
 * without touching the allocator. Values at positions beyond the currently loaded
 * length are stale leftovers from earlier loads and are never exposed by the
 * query methods.</p>
 *
 * <p>Queries take a 1-based period length. The row for period length {@code p}
 * is stored at index {@code p - 1}.</p>
 */
pub struct SequenceRepeatAnalyzer {
    repeats_by_period_and_position: Vec<Vec<i32>>,
    period_with_most_repeats: Vec<usize>,
    // reduction scratch row, pre-sized so that load never allocates.
    most_repeats: Vec<i32>,
    max_period: usize,
    seq_length: usize,
}

impl SequenceRepeatAnalyzer {
    /**
     * Creates an analyzer able to hold sequences of up to {@code max_sequence_length}
     * bases and period lengths of up to {@code max_period}.
     *
     * @return a {@link RepeatAnalyzerError::Configuration} error if either capacity is zero.
     */
    pub fn new(
        max_sequence_length: usize,
        max_period: usize,
    ) -> Result<SequenceRepeatAnalyzer, RepeatAnalyzerError> {
        if max_sequence_length == 0 {
            return Err(RepeatAnalyzerError::Configuration(
                "the maximum sequence length must be greater than 0".to_string(),
            ));
        }
        if max_period == 0 {
            return Err(RepeatAnalyzerError::Configuration(
                "the maximum period must be greater than 0".to_string(),
            ));
        }
        Ok(SequenceRepeatAnalyzer {
            repeats_by_period_and_position: vec![vec![0; max_sequence_length]; max_period],
            period_with_most_repeats: vec![0; max_sequence_length],
            most_repeats: vec![0; max_sequence_length],
            max_period,
            seq_length: 0,
        })
    }

    /// Maximum sequence length fixed at construction.
    pub fn max_sequence_length(&self) -> usize {
        self.repeats_by_period_and_position[0].len()
    }

    /// Maximum period length fixed at construction.
    pub fn max_period(&self) -> usize {
        self.max_period
    }

    /// Length of the most recently loaded sequence, 0 before the first load.
    pub fn loaded_length(&self) -> usize {
        self.seq_length
    }

    /**
     * Returns the number of consecutive repeats of a {@code period}-sized unit
     * overlapping {@code position} in the loaded sequence.
     *
     * <p>Periods of 0 or beyond the configured maximum are valid degenerate
     * queries and simply report 0 repeats.</p>
     *
     * @return a {@link RepeatAnalyzerError::OutOfRange} error if {@code position}
     *         is not covered by the loaded sequence.
     */
    pub fn repeat_count(
        &self,
        position: usize,
        period: usize,
    ) -> Result<usize, RepeatAnalyzerError> {
        if period == 0 || period > self.max_period {
            return Ok(0);
        }
        self.check_position(position)?;
        Ok(self.repeats_by_period_and_position[period - 1][position] as usize)
    }

    /**
     * Returns the period length with the largest repeat count at {@code position}.
     * Ties resolve to the smallest period.
     */
    pub fn best_period(&self, position: usize) -> Result<usize, RepeatAnalyzerError> {
        self.check_position(position)?;
        Ok(self.period_with_most_repeats[position])
    }

    /**
     * Returns the repeat count at {@code position} for that position's best period.
     */
    pub fn best_period_repeat_count(
        &self,
        position: usize,
    ) -> Result<usize, RepeatAnalyzerError> {
        self.check_position(position)?;
        let period = self.period_with_most_repeats[position];
        Ok(self.repeats_by_period_and_position[period - 1][position] as usize)
    }

    /**
     * Recomputes every repeat count and the best-period table for {@code sequence}.
     *
     * <p>Loading a sequence longer than the configured capacity fails with
     * {@link RepeatAnalyzerError::InputTooLong} before anything is modified. An
     * empty sequence is a valid load after which every positional query is out of
     * range.</p>
     */
    pub fn load(&mut self, sequence: &[u8]) -> Result<(), RepeatAnalyzerError> {
        if sequence.len() > self.max_sequence_length() {
            return Err(RepeatAnalyzerError::InputTooLong(format!(
                "the input sequence length {} exceeds the maximum of {}",
                sequence.len(),
                self.max_sequence_length()
            )));
        }
        self.seq_length = sequence.len();
        if sequence.is_empty() {
            return Ok(());
        }

        self.load_period_one(sequence);
        for period_index in 1..self.max_period {
            let period_length = period_index + 1;
            let values =
                &mut self.repeats_by_period_and_position[period_index][..sequence.len()];
            if sequence.len() < period_length {
                // no unit of this size fits, the whole row reports no repeats.
                for value in values.iter_mut() {
                    *value = 0;
                }
                continue;
            }
            Self::compute_run_totals(sequence, values, period_length);
            Self::propagate_run_totals(values, period_length);
            Self::apply_window_maximum(values, period_length);
        }

        self.update_period_with_most_repeats();
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<(), RepeatAnalyzerError> {
        if position >= self.seq_length {
            Err(RepeatAnalyzerError::OutOfRange(format!(
                "position {} is outside the loaded sequence of length {}",
                position, self.seq_length
            )))
        } else {
            Ok(())
        }
    }

    /**
     * Reverse cycle scan for one period length.
     *
     * <p>Walking right to left, each base is compared with the one exactly one
     * period ahead. Completing a period's worth of consecutive matches closes one
     * more full unit, so the running repeat total goes up by one; a mismatch ends
     * the run and resets the total to a lone unit. Afterwards the first position
     * of every maximal run holds the true repeat total of that run, while interior
     * positions hold values counting down toward the run's end.</p>
     *
     * <p>The trailing {@code period_length - 1} positions cannot start a whole
     * unit and are primed to 0. Callers guarantee that at least one unit fits,
     * i.e. {@code sequence.len() >= period_length}.</p>
     */
    fn compute_run_totals(sequence: &[u8], values: &mut [i32], period_length: usize) {
        let seq_length = sequence.len();
        for value in values[seq_length + 1 - period_length..].iter_mut() {
            *value = 0;
        }
        let mut position = seq_length - period_length;
        values[position] = 1;
        let mut prev_value = 1;
        let mut matched_cycles = 0;
        while position > 0 {
            position -= 1;
            if sequence[position] == sequence[position + period_length] {
                matched_cycles += 1;
                if matched_cycles == period_length {
                    // one more full unit matched, the run grows by one repeat.
                    prev_value += 1;
                    values[position] = prev_value;
                    matched_cycles = 0;
                } else {
                    values[position] = prev_value;
                }
            } else {
                // the run ends here, downstream of this position stands a lone unit.
                prev_value = 1;
                values[position] = 1;
                matched_cycles = 0;
            }
        }
    }

    /**
     * Forward propagation of each run's total to all of the run's members.
     *
     * <p>For each of the {@code period_length} phase offsets the row is walked in
     * strides of one period. The first member of each run holds the authoritative
     * total after the reverse scan; that total tells how many further members
     * belong to the same run, and each of them is overwritten with it. The walk
     * then resumes at the first member of the next run.</p>
     */
    fn propagate_run_totals(values: &mut [i32], period_length: usize) {
        let seq_length = values.len();
        for phase in 0..period_length {
            let mut position = phase;
            while position < seq_length {
                let total_run_length = values[position];
                for _ in 1..total_run_length {
                    position += period_length;
                    values[position] = total_run_length;
                }
                position += period_length;
            }
        }
    }

    /**
     * Sliding-maximum sweep for one period length.
     *
     * <p>The window of one period length is swept from the right end of the row to
     * the left, retiring one value and admitting one value per step. The value
     * stored at the retiring position becomes the maximum over the window together
     * with the newly admitted value. The running window maximum only needs a full
     * rescan when the retiring value was the current maximum and the admitted
     * value does not dominate it; with short repeat runs that stays a handful of
     * bounded rescans rather than one per step.</p>
     */
    fn apply_window_maximum(values: &mut [i32], period_length: usize) {
        let seq_length = values.len();
        let mut window_start = (seq_length - period_length) as isize;
        let mut window_end = seq_length;
        let mut max_in_window = values[window_start as usize];
        // the very first value already holds its own window maximum.
        while window_end > 1 {
            window_end -= 1;
            let value_out = values[window_end];
            window_start -= 1;
            let value_in = if window_start < 0 {
                -1
            } else {
                values[window_start as usize]
            };
            values[window_end] = max(max_in_window, value_in);
            if value_in < value_out && value_out >= max_in_window {
                // the retired value was the window maximum and the admitted one
                // does not replace it, so the maximum must be rescanned.
                max_in_window =
                    Self::slice_maximum(values, max(window_start, 0) as usize, window_end);
            } else if value_in > max_in_window {
                max_in_window = value_in;
            }
        }
    }

    fn slice_maximum(values: &[i32], from: usize, to: usize) -> i32 {
        values[from..to].iter().copied().max().unwrap_or(-1)
    }

    /**
     * Period-1 rows come out of a specialized two-pass routine since cycle
     * detection is degenerate for single-base units.
     *
     * <p>The reverse pass counts identical bases from each position to the end of
     * its run. The forward pass adds a carry that grows while the run continues
     * and takes a maximum with the previous position's pre-maximum value. The
     * carry resets at run boundaries, which lets a run's magnitude reach one
     * position into the following run and can leave late members of a run that
     * starts mid-sequence one repeat short. Both behaviors are kept as observed
     * and pinned by regression tests.</p>
     */
    fn load_period_one(&mut self, sequence: &[u8]) {
        let run_lengths = &mut self.repeats_by_period_and_position[0];
        let right_margin = sequence.len() - 1;
        let mut last = sequence[right_margin];
        run_lengths[right_margin] = 1;
        let mut carry_back = 1;
        for position in (0..right_margin).rev() {
            let next = sequence[position];
            if next == last {
                carry_back += 1;
                run_lengths[position] = carry_back;
            } else {
                carry_back = 1;
                run_lengths[position] = 1;
            }
            last = next;
        }
        // forward phase.
        last = sequence[0];
        let mut prev_run_length = 0;
        let mut carry_forward = 0;
        for position in 0..=right_margin {
            let next = sequence[position];
            if next == last {
                run_lengths[position] += carry_forward;
                carry_forward += 1;
            } else {
                carry_forward = 0;
            }
            last = next;
            let this_run_length = run_lengths[position];
            run_lengths[position] = max(this_run_length, prev_run_length);
            prev_run_length = this_run_length;
        }
    }

    /**
     * Reduces all period rows into the per-position best period. Period 1 seeds
     * the running maximum and a later period takes over only on a strictly
     * greater count, so ties always resolve to the smallest period.
     */
    fn update_period_with_most_repeats(&mut self) {
        let seq_length = self.seq_length;
        for best in self.period_with_most_repeats[..seq_length].iter_mut() {
            *best = 1;
        }
        self.most_repeats[..seq_length]
            .copy_from_slice(&self.repeats_by_period_and_position[0][..seq_length]);
        for period_index in 1..self.max_period {
            let period_length = period_index + 1;
            let period_values = &self.repeats_by_period_and_position[period_index];
            for position in 0..seq_length {
                let repeats = period_values[position];
                if repeats > self.most_repeats[position] {
                    self.most_repeats[position] = repeats;
                    self.period_with_most_repeats[position] = period_length;
                }
            }
        }
    }
}
