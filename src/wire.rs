//! Length-prefixed little-endian wire framing (§6): a minimal varuint/
//! varbytes codec, and `encode`/`decode` for every proof type built on it.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

use crate::crypto::commitment::{self, Commitment};
use crate::crypto::commitment_proof::CommitmentProof;
use crate::crypto::inner_product::InnerProductProof;
use crate::crypto::range_proof::RangeProof;
use crate::crypto::sigma_range_proof::SigmaRangeProof;
use crate::crypto::transfer_proof::TransferProof;
use crate::crypto::withdraw_proof::WithdrawProof;
use crate::error::{Error, Result};

/// An append-only byte buffer implementing varuint/varbytes framing:
/// 1 byte for values below `0xFD`, else an `0xFD`/`0xFE`/`0xFF` tag
/// followed by a little-endian `u16`/`u32`/`u64`.
#[derive(Debug, Default)]
pub struct Sink {
    buf: Vec<u8>,
}

impl Sink {
    pub fn new() -> Sink {
        Sink { buf: Vec::new() }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_varuint(&mut self, v: u64) {
        if v < 0xFD {
            self.buf.push(v as u8);
        } else if v <= u64::from(u16::MAX) {
            self.buf.push(0xFD);
            self.buf.write_u16::<LittleEndian>(v as u16).expect("Vec<u8> writes never fail");
        } else if v <= u64::from(u32::MAX) {
            self.buf.push(0xFE);
            self.buf.write_u32::<LittleEndian>(v as u32).expect("Vec<u8> writes never fail");
        } else {
            self.buf.push(0xFF);
            self.buf.write_u64::<LittleEndian>(v).expect("Vec<u8> writes never fail");
        }
    }

    pub fn write_varbytes(&mut self, bytes: &[u8]) {
        self.write_varuint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_point(&mut self, p: &RistrettoPoint) {
        self.write_varbytes(p.compress().as_bytes());
    }

    pub fn write_scalar(&mut self, s: &Scalar) {
        self.write_varbytes(s.as_bytes());
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.write_i32::<LittleEndian>(v).expect("Vec<u8> writes never fail");
    }
}

/// A cursor over a borrowed byte slice implementing the matching varuint/
/// varbytes decoder.
pub struct Source<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Source<'a> {
    pub fn new(buf: &'a [u8]) -> Source<'a> {
        Source { buf, pos: 0 }
    }

    fn read_slice(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            return Err(Error::UnexpectedEof);
        }
        let s = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_slice(1)?[0])
    }

    pub fn read_varuint(&mut self) -> Result<u64> {
        match self.read_u8()? {
            0xFD => Ok(u64::from(
                self.read_slice(2)?.read_u16::<LittleEndian>().expect("length checked above"),
            )),
            0xFE => Ok(u64::from(
                self.read_slice(4)?.read_u32::<LittleEndian>().expect("length checked above"),
            )),
            0xFF => Ok(self.read_slice(8)?.read_u64::<LittleEndian>().expect("length checked above")),
            tag => Ok(u64::from(tag)),
        }
    }

    pub fn read_varbytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_varuint()? as usize;
        self.read_slice(len)
    }

    pub fn read_point(&mut self) -> Result<RistrettoPoint> {
        commitment::decompress(self.read_varbytes()?)
    }

    pub fn read_scalar(&mut self) -> Result<Scalar> {
        commitment::decode_scalar(self.read_varbytes()?)
    }

    pub fn read_raw(&mut self, n: usize) -> Result<&'a [u8]> {
        self.read_slice(n)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_slice(4)?.read_i32::<LittleEndian>().expect("length checked above"))
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

impl CommitmentProof {
    pub fn encode(&self) -> Vec<u8> {
        let mut sink = Sink::new();
        sink.write_point(&self.a_y);
        sink.write_point(&self.a_cr);
        sink.write_scalar(&self.s_sk);
        sink.write_scalar(&self.b);
        sink.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut src = Source::new(bytes);
        let a_y = src.read_point()?;
        let a_cr = src.read_point()?;
        let s_sk = src.read_scalar()?;
        let b = src.read_scalar()?;
        Ok(CommitmentProof { a_y, a_cr, s_sk, b })
    }
}

impl InnerProductProof {
    pub fn encode(&self) -> Vec<u8> {
        let mut sink = Sink::new();
        sink.write_i32(self.l_vec.len() as i32);
        sink.write_raw(self.a.as_bytes());
        sink.write_raw(self.b.as_bytes());
        for p in &self.l_vec {
            sink.write_raw(p.compress().as_bytes());
        }
        for p in &self.r_vec {
            sink.write_raw(p.compress().as_bytes());
        }
        sink.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut src = Source::new(bytes);
        let n = src.read_i32()?;
        if n < 0 {
            return Err(Error::IrregularVarint);
        }
        let n = n as usize;
        let a = commitment::decode_scalar(src.read_raw(32)?)?;
        let b = commitment::decode_scalar(src.read_raw(32)?)?;
        let mut l_vec = Vec::with_capacity(n);
        for _ in 0..n {
            l_vec.push(commitment::decompress(src.read_raw(32)?)?);
        }
        let mut r_vec = Vec::with_capacity(n);
        for _ in 0..n {
            r_vec.push(commitment::decompress(src.read_raw(32)?)?);
        }
        Ok(InnerProductProof { l_vec, r_vec, a, b })
    }
}

impl RangeProof {
    pub fn encode(&self) -> Vec<u8> {
        let mut sink = Sink::new();
        sink.write_point(&self.g);
        sink.write_point(&self.h);
        sink.write_scalar(&self.tau_x);
        sink.write_scalar(&self.mu);
        sink.write_scalar(&self.t_hat);
        sink.write_point(&self.t1);
        sink.write_point(&self.t2);
        sink.write_point(&self.a);
        sink.write_point(&self.s);
        sink.write_varbytes(&self.inner.encode());
        sink.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut src = Source::new(bytes);
        let g = src.read_point()?;
        let h = src.read_point()?;
        let tau_x = src.read_scalar()?;
        let mu = src.read_scalar()?;
        let t_hat = src.read_scalar()?;
        let t1 = src.read_point()?;
        let t2 = src.read_point()?;
        let a = src.read_point()?;
        let s = src.read_point()?;
        let inner = InnerProductProof::decode(src.read_varbytes()?)?;
        Ok(RangeProof { g, h, tau_x, mu, t_hat, t1, t2, a, s, inner })
    }
}

impl SigmaRangeProof {
    pub fn encode(&self) -> Vec<u8> {
        let mut sink = Sink::new();
        sink.write_scalar(&self.tau_x);
        sink.write_scalar(&self.mu);
        sink.write_scalar(&self.t_hat);
        sink.write_point(&self.t1);
        sink.write_point(&self.t2);
        sink.write_point(&self.a);
        sink.write_point(&self.s);
        sink.write_varbytes(&self.inner.encode());
        sink.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut src = Source::new(bytes);
        let tau_x = src.read_scalar()?;
        let mu = src.read_scalar()?;
        let t_hat = src.read_scalar()?;
        let t1 = src.read_point()?;
        let t2 = src.read_point()?;
        let a = src.read_point()?;
        let s = src.read_point()?;
        let inner = InnerProductProof::decode(src.read_varbytes()?)?;
        Ok(SigmaRangeProof { tau_x, mu, t_hat, t1, t2, a, s, inner })
    }
}

impl TransferProof {
    pub fn encode(&self) -> Vec<u8> {
        let mut sink = Sink::new();
        sink.write_point(&self.ay);
        sink.write_point(&self.ad);
        sink.write_point(&self.ab);
        sink.write_point(&self.ay_prime);
        sink.write_point(&self.at);
        sink.write_scalar(&self.ssk);
        sink.write_scalar(&self.sr);
        sink.write_scalar(&self.sb);
        sink.write_scalar(&self.stau);
        sink.write_varbytes(&self.c_comm.encode());
        sink.write_varbytes(&self.c_prime_comm.encode());
        sink.write_varbytes(&self.sigma_range_proof.encode());
        sink.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut src = Source::new(bytes);
        let ay = src.read_point()?;
        let ad = src.read_point()?;
        let ab = src.read_point()?;
        let ay_prime = src.read_point()?;
        let at = src.read_point()?;
        let ssk = src.read_scalar()?;
        let sr = src.read_scalar()?;
        let sb = src.read_scalar()?;
        let stau = src.read_scalar()?;
        let c_comm = Commitment::decode(src.read_varbytes()?)?;
        let c_prime_comm = Commitment::decode(src.read_varbytes()?)?;
        let sigma_range_proof = SigmaRangeProof::decode(src.read_varbytes()?)?;
        Ok(TransferProof {
            sigma_range_proof,
            ay,
            ad,
            ab,
            ay_prime,
            at,
            ssk,
            sr,
            sb,
            stau,
            c_comm,
            c_prime_comm,
        })
    }
}

impl WithdrawProof {
    pub fn encode(&self) -> Vec<u8> {
        let mut sink = Sink::new();
        sink.write_point(&self.a_d);
        sink.write_point(&self.a_y);
        sink.write_point(&self.a_g);
        sink.write_scalar(&self.s_sk);
        sink.write_scalar(&self.s_r);
        sink.write_varbytes(&self.comm_wd.encode());
        sink.write_varbytes(&self.range_proof.encode());
        sink.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut src = Source::new(bytes);
        let a_d = src.read_point()?;
        let a_y = src.read_point()?;
        let a_g = src.read_point()?;
        let s_sk = src.read_scalar()?;
        let s_r = src.read_scalar()?;
        let comm_wd = Commitment::decode(src.read_varbytes()?)?;
        let range_proof = RangeProof::decode(src.read_varbytes()?)?;
        Ok(WithdrawProof {
            comm_wd,
            range_proof,
            a_d,
            a_y,
            a_g,
            s_sk,
            s_r,
        })
    }
}
