// Copyright 2018 The Exonum Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cryptographic primitives underlying confidential accounts.
//!
//! [`Commitment`] holds an ElGamal-style encryption of a balance under an
//! account's Ristretto255 public key. [`xof`] is the single source of
//! randomness an account draws from, and [`transcript`] is the running
//! Fiat-Shamir state threaded through every proof in an operation.
//!
//! [`range_proof`] and [`sigma_range_proof`] implement the two
//! Bulletproofs-style range statements used by Withdraw and Transfer
//! respectively, both built on the parity-folding [`inner_product`]
//! argument and the shared generators in [`generators`].
//! [`withdraw_proof`] and [`transfer_proof`] wrap those into the full
//! outer Sigma protocols, and [`commitment_proof`] is the simpler
//! Chaum-Pedersen proof shared by Deposit and Burn.

pub mod commitment;
pub mod commitment_proof;
pub mod generators;
pub mod inner_product;
pub mod range_proof;
pub mod sigma_range_proof;
pub mod transcript;
pub mod transfer_proof;
pub mod util;
pub mod withdraw_proof;
pub mod xof;

pub use self::commitment::Commitment;
pub use self::commitment_proof::CommitmentProof;
pub use self::generators::RangeProver;
pub use self::range_proof::RangeProof;
pub use self::sigma_range_proof::SigmaRangeProof;
pub use self::transfer_proof::TransferProof;
pub use self::withdraw_proof::WithdrawProof;
pub use self::xof::Xof;
