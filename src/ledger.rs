//! The ledger ("smart contract"): the canonical pk→commitment map and the
//! verifiers for every proof type.
//!
//! Unlike the source this is grounded on, which keeps a single
//! process-global ledger, callers here construct an explicit [`Ledger`]
//! handle and pass it around; tests build fresh ones freely.

use std::collections::HashMap;

use curve25519_dalek::ristretto::RistrettoPoint;
use log::{debug, warn};
use parking_lot::{Mutex, RwLock};

use crate::crypto::commitment::{self, Commitment};
use crate::crypto::commitment_proof::{self, CommitmentProof};
use crate::crypto::generators::RangeProver;
use crate::crypto::transcript::Transcript;
use crate::crypto::transfer_proof::{self, TransferProof};
use crate::crypto::withdraw_proof::{self, WithdrawProof};
use crate::error::{Error, Result};

type Key = [u8; 32];

fn pk_key(pk: &RistrettoPoint) -> Key {
    *pk.compress().as_bytes()
}

/// The ledger's (pk → commitment) and (pk → public balance) maps. Reads
/// (verification) may run concurrently; writes (register, and the
/// post-verify commitment replacement) are serialized through an internal
/// mutex so two verified transactions touching the same account can never
/// interleave their map updates, even though `parking_lot::RwLock` itself
/// makes no writer-preference guarantee.
pub struct Ledger {
    commitments: RwLock<HashMap<Key, Commitment>>,
    public_balances: RwLock<HashMap<Key, u64>>,
    write_lock: Mutex<()>,
    prover: &'static RangeProver,
}

impl Ledger {
    pub fn new(prover: &'static RangeProver) -> Ledger {
        Ledger {
            commitments: RwLock::new(HashMap::new()),
            public_balances: RwLock::new(HashMap::new()),
            write_lock: Mutex::new(()),
            prover,
        }
    }

    /// Registers `pk` with an initial commitment, replacing any prior
    /// entry unconditionally.
    pub fn register(&self, pk: RistrettoPoint, comm: Commitment) {
        let _guard = self.write_lock.lock();
        let key = pk_key(&pk);
        self.commitments.write().insert(key, comm);
        self.public_balances.write().insert(key, 0);
        debug!("registered account");
    }

    pub fn get_commitment(&self, pk: &RistrettoPoint) -> Result<Commitment> {
        self.commitments
            .read()
            .get(&pk_key(pk))
            .copied()
            .ok_or(Error::UnknownPublicKey)
    }

    fn replace_commitment(&self, pk: &RistrettoPoint, comm: Commitment) {
        let _guard = self.write_lock.lock();
        self.commitments.write().insert(pk_key(pk), comm);
    }

    /// Verifies a deposit's [`CommitmentProof`] against the freshly
    /// deposited commitment, without consulting stored state.
    pub fn verify_commitment_proof(&self, pk: &RistrettoPoint, comm: &Commitment, proof: &CommitmentProof) -> bool {
        commitment_proof::verify(proof, pk, &comm.c_l, &comm.c_r, &self.prover.g)
    }

    /// Verifies a burn proof against the account's registered commitment.
    pub fn verify_burn_proof(&self, pk: &RistrettoPoint, proof: &CommitmentProof) -> Result<bool> {
        let comm = self.get_commitment(pk)?;
        Ok(commitment_proof::verify(proof, pk, &comm.c_l, &comm.c_r, &self.prover.g))
    }

    /// Verifies a transfer proof and, if valid, replaces the sender's
    /// stored commitment with `C_old − C_diff`.
    pub fn verify_transfer_proof(
        &self,
        transcript: &mut Transcript,
        y: &RistrettoPoint,
        y_prime: &RistrettoPoint,
        proof: &TransferProof,
    ) -> Result<bool> {
        let c_old = self.get_commitment(y)?;
        let ok = transfer_proof::verify(self.prover, transcript, *y, *y_prime, &c_old, proof)?;
        if !ok {
            warn!("transfer proof failed verification");
            return Ok(false);
        }
        let c_new = c_old.sub(&proof.c_comm);
        self.replace_commitment(y, c_new);
        Ok(true)
    }

    /// Verifies a withdraw proof and, if valid, replaces the sender's
    /// stored commitment with `C_old − C_WD`.
    pub fn verify_withdraw_proof(
        &self,
        transcript: &mut Transcript,
        y: &RistrettoPoint,
        amount: u64,
        proof: &WithdrawProof,
    ) -> Result<bool> {
        let c_old = self.get_commitment(y)?;
        let ok = withdraw_proof::verify(self.prover, transcript, *y, &c_old, amount, proof)?;
        if !ok {
            warn!("withdraw proof failed verification");
            return Ok(false);
        }
        let c_new = c_old.sub(&proof.comm_wd);
        self.replace_commitment(y, c_new);
        Ok(true)
    }

    /// Applies a received transfer's commitment to the receiver's stored
    /// balance, for callers that want the receiver side kept in sync too.
    /// The source never wires this up automatically; the receiver brute-
    /// forces its own balance independently (§8 P3).
    pub fn credit_receiver(&self, y_prime: &RistrettoPoint, c_prime: Commitment) -> Result<()> {
        let current = self.get_commitment(y_prime)?;
        self.replace_commitment(y_prime, current.add(&c_prime));
        Ok(())
    }
}

/// Decodes a 32-byte canonical Ristretto255 public key encoding.
pub fn decode_pk(bytes: &[u8]) -> Result<RistrettoPoint> {
    commitment::decompress(bytes)
}
