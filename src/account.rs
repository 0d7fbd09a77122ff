//! Confidential account state: assembles the crypto layer into
//! Deposit/Transfer/Withdraw/Burn operations.

use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use log::debug;

use crate::crypto::commitment::Commitment;
use crate::crypto::commitment_proof::{self, CommitmentProof};
use crate::crypto::generators::RangeProver;
use crate::crypto::transcript::Transcript;
use crate::crypto::transfer_proof::{self, TransferProof};
use crate::crypto::util::scalar_from_u64;
use crate::crypto::withdraw_proof::{self, WithdrawProof};
use crate::crypto::xof::Xof;
use crate::error::{Error, Result};

/// A confidential account: a secret key, a public commitment to a hidden
/// balance, and the XOF that is the sole source of its randomness.
///
/// Not safe to share across threads: every proof-generating operation
/// mutates the XOF, and concurrent calls would desynchronize the account
/// from anyone later verifying its proofs.
pub struct Account {
    sk: Scalar,
    pk: RistrettoPoint,
    xof: Xof,
    commitment: Commitment,
    public_balance: u64,
    prover: &'static RangeProver,
}

impl Account {
    /// Derives a fresh account from a 32-byte seed: the seed feeds the
    /// account's own XOF, which in turn derives the secret key and the
    /// initial zero-value commitment.
    pub fn init(seed: [u8; 32], prover: &'static RangeProver) -> Account {
        let mut xof = Xof::new(seed);
        let sk = xof.random_scalar();
        let pk = sk * prover.g;
        let mut account = Account {
            sk,
            pk,
            xof,
            commitment: Commitment::new(RistrettoPoint::default(), RistrettoPoint::default()),
            public_balance: 0,
            prover,
        };
        let (_, commitment) = account.commit(Scalar::ZERO);
        account.commitment = commitment;
        account
    }

    pub fn pk(&self) -> RistrettoPoint {
        self.pk
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    pub fn public_balance(&self) -> u64 {
        self.public_balance
    }

    /// Encrypts `v` under the account's own public key with fresh
    /// randomness drawn from its XOF.
    fn commit(&mut self, v: Scalar) -> (Scalar, Commitment) {
        let r = self.xof.random_scalar();
        let commitment = Commitment::encrypt(v, r, &self.pk, &self.prover.g);
        (r, commitment)
    }

    /// Recovers the account's plaintext balance by brute-forcing the
    /// discrete log of its own commitment.
    pub fn balance(&self) -> Option<u64> {
        let point = self.commitment.decrypt_point(&self.sk);
        Commitment::guess_value(&point, &self.prover.g, self.prover.config.decrypt_upper_bound)
    }

    /// Replaces the account's commitment with a fresh encryption of
    /// `amount`. Mirrors the source exactly: repeated deposits REPLACE the
    /// stored balance rather than accumulate it; this is a deliberately
    /// preserved quirk, not a bug to paper over.
    pub fn deposit(&mut self, amount: u64) -> Commitment {
        let v = scalar_from_u64(amount);
        let (_, commitment) = self.commit(v);
        self.commitment = commitment;
        debug!("account deposited {} (balance replaced, not accumulated)", amount);
        commitment
    }

    /// Proves that `comm` (the commitment just produced by
    /// [`Account::deposit`]) opens to `amount` under this account's key.
    pub fn gen_deposit_proof(&mut self, amount: u64, comm: &Commitment) -> CommitmentProof {
        let proof = commitment_proof::prove(&mut self.xof, self.sk, comm.c_r, &self.prover.g, amount);
        debug!("generated deposit proof");
        proof
    }

    /// Proves that the account's current commitment opens to its
    /// brute-forced balance, for a ledger-side reveal.
    pub fn gen_burn_proof(&mut self) -> Result<CommitmentProof> {
        let balance = self.balance().ok_or(Error::AmountOutOfRange)?;
        let c_r = self.commitment.c_r;
        let proof = commitment_proof::prove(&mut self.xof, self.sk, c_r, &self.prover.g, balance);
        debug!("generated burn proof");
        Ok(proof)
    }

    /// Builds a transfer proof moving `amount` to `receiver_pk` and
    /// subtracts it from the account's own commitment.
    pub fn gen_transfer_proof(
        &mut self,
        transcript: &mut Transcript,
        amount: u64,
        receiver_pk: RistrettoPoint,
    ) -> Result<TransferProof> {
        let balance = self.balance().ok_or(Error::AmountOutOfRange)?;
        let prover = self.prover;
        let sk = self.sk;
        let pk = self.pk;
        let c_old = self.commitment;
        let proof = transfer_proof::prove(prover, &mut self.xof, transcript, sk, pk, receiver_pk, &c_old, amount, balance)?;
        self.commitment = c_old.sub(&proof.c_comm);
        debug!("generated transfer proof");
        Ok(proof)
    }

    /// Builds a withdraw proof revealing `amount` and subtracts it from
    /// the account's own commitment.
    pub fn gen_withdraw_proof(&mut self, transcript: &mut Transcript, amount: u64) -> Result<WithdrawProof> {
        let balance = self.balance().ok_or(Error::AmountOutOfRange)?;
        let remaining = balance.checked_sub(amount).ok_or(Error::AmountOutOfRange)?;
        let prover = self.prover;
        let sk = self.sk;
        let pk = self.pk;
        let c_old = self.commitment;
        let proof = withdraw_proof::prove(prover, &mut self.xof, transcript, sk, pk, &c_old, amount, remaining)?;
        self.commitment = c_old.sub(&proof.comm_wd);
        debug!("generated withdraw proof");
        Ok(proof)
    }
}
