//! Error kinds produced across the crate.
//!
//! Errors are grouped into the five kinds the component design calls for:
//! input, decoding, proof-invalidity, internal and fatal. `PROOF_INVALID`
//! is deliberately a single variant with no detail attached, so that a
//! verifier can never leak *which* equation failed.

/// Errors that can occur while building or verifying a proof, or while
/// encoding/decoding the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fail)]
#[repr(u8)]
pub enum Error {
    /// The amount supplied to a prover does not fit the configured range.
    #[fail(display = "amount is out of the configured range")]
    AmountOutOfRange = 0,

    /// The ledger has no commitment registered for the given public key.
    #[fail(display = "unknown public key")]
    UnknownPublicKey = 1,

    /// A public key was registered twice.
    #[fail(display = "public key is already registered")]
    DuplicateRegistration = 2,

    /// A claimed plaintext value did not match the value hidden in a
    /// commitment (e.g. a burn proof's claimed balance).
    #[fail(display = "claimed value does not match the commitment")]
    ValueMismatch = 3,

    /// A byte slice was not a valid canonical Ristretto255 point encoding.
    #[fail(display = "invalid Ristretto255 point encoding")]
    InvalidPointEncoding = 4,

    /// A byte slice was not a valid canonical scalar encoding.
    #[fail(display = "invalid scalar encoding")]
    InvalidScalarEncoding = 5,

    /// A varuint prefix used a non-canonical (longer than necessary) form.
    #[fail(display = "non-canonical varuint encoding")]
    IrregularVarint = 6,

    /// The source ran out of bytes before a value could be fully decoded.
    #[fail(display = "unexpected end of input")]
    UnexpectedEof = 7,

    /// A proof verification equation failed. Carries no detail about which
    /// equation, by design.
    #[fail(display = "proof does not verify")]
    ProofInvalid = 8,

    /// A generator vector was malformed (wrong length, or a requested
    /// index is out of bounds).
    #[fail(display = "malformed generator set")]
    MalformedGenerators = 9,

    /// The sink ran out of memory while growing its backing buffer.
    #[fail(display = "allocation failure while serializing")]
    SinkOverflow = 10,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = ::std::result::Result<T, Error>;

impl Error {
    /// True for the errors that a prover or verifier should propagate
    /// to its caller as-is (the `INPUT` and `INTERNAL` kinds of the
    /// component design).
    pub fn is_caller_fault(self) -> bool {
        !matches!(self, Error::ProofInvalid)
    }
}
