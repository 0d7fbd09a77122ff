//! Tunable parameters of the range-proof system.

/// Parameters shared by every `RangeProver` instance.
///
/// There is exactly one sensible configuration for this protocol version
/// (`Config::default()`); it is exposed as a struct rather than bare
/// constants so that the generator derivation and the brute-force decoding
/// bound are visible in one place and can be overridden in tests that probe
/// smaller ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Bit length of a single range proof (`N` in the component design).
    pub range_bits: u64,
    /// Number of values folded into one aggregated range proof.
    pub aggregate_count: u64,
    /// Exclusive upper bound for brute-force commitment decryption.
    pub decrypt_upper_bound: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            range_bits: 32,
            aggregate_count: 2,
            decrypt_upper_bound: 1u64 << 32,
        }
    }
}

impl Config {
    /// Length of the generator vectors required by the aggregated proof.
    pub fn aggregate_len(&self) -> usize {
        (self.range_bits * self.aggregate_count) as usize
    }
}
