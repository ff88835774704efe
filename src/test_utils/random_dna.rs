use rand::prelude::*;

lazy_static! {
    static ref DNA_SET: &'static [u8] = b"ACGT";
}

/**
 * Random DNA sequence generator for tests and benches.
 *
 * <p>
 *     Returned bases are always in upper case and one of the valid four nucleotides
 *     'A', 'C', 'G' and 'T'.
 * </p>
 * <p>
 *     The generator is parameterized over the random number generator so tests can
 *     hand it a seeded {@link StdRng} and stay reproducible.
 * </p>
 */
pub struct RandomDNA<R: Rng> {
    random: R,
}

impl<R: Rng> RandomDNA<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Uniform random DNA of the requested length.
    pub fn next_bases(&mut self, length: usize) -> Vec<u8> {
        (0..length)
            .map(|_| {
                let index = self.random.gen_range(0, DNA_SET.len());
                DNA_SET[index]
            })
            .collect()
    }

    /**
     * Random DNA enriched for tandem repeats: a concatenation of random units of
     * up to {@code max_unit_length} bases, each repeated a small random number of
     * times. Uniform DNA almost never contains runs longer than a couple of
     * repeats, so repeat-heavy inputs have to be built on purpose.
     */
    pub fn next_repetitive_bases(&mut self, length: usize, max_unit_length: usize) -> Vec<u8> {
        let mut bases = Vec::with_capacity(length);
        while bases.len() < length {
            let unit_length = self.random.gen_range(1, max_unit_length + 1);
            let unit = self.next_bases(unit_length);
            let repeats = self.random.gen_range(1, 6);
            for _ in 0..repeats {
                bases.extend_from_slice(&unit);
                if bases.len() >= length {
                    break;
                }
            }
        }
        bases.truncate(length);
        bases
    }
}
