//! Seeded pseudo random numbers for reproducible mazes.
//!
//! The generator is Mulberry32: one 32 bit word of state, a Weyl sequence increment and a
//! couple of multiply-xorshift rounds of output mixing. Small, fast and, importantly for shareable
//! seeds, the same sequence on every platform.

use rand::{Error, RngCore, SeedableRng};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

const WEYL_INCREMENT: u32 = 0x6D2B_79F5;
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Whatever a maze is seeded with. Text seeds are hashed down to a number first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Seed {
    Number(u32),
    Text(String),
}

impl Seed {
    /// Seed from the wall clock, for when nobody asked for a particular maze.
    pub fn from_time() -> Seed {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Seed::from(millis)
    }

    /// Read a seed as typed by a person: digits make a number, anything else is text.
    pub fn parse(text: &str) -> Seed {
        match text.trim().parse::<u64>() {
            Ok(n) => Seed::from(n),
            Err(_) => Seed::Text(text.to_string()),
        }
    }

    /// The 32 bit state the generator starts from.
    pub fn state(&self) -> u32 {
        match *self {
            Seed::Number(n) => n,
            Seed::Text(ref s) => hash_text(s),
        }
    }
}

impl From<u32> for Seed {
    fn from(n: u32) -> Seed {
        Seed::Number(n)
    }
}

/// Wider integers wrap modulo 2^32.
impl From<u64> for Seed {
    fn from(n: u64) -> Seed {
        Seed::Number((n & 0xFFFF_FFFF) as u32)
    }
}

impl<'a> From<&'a str> for Seed {
    fn from(s: &'a str) -> Seed {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Seed {
        Seed::Text(s)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Seed::Number(n) => write!(f, "{}", n),
            Seed::Text(ref s) => write!(f, "{:?}", s),
        }
    }
}

/// 32 bit FNV-1a over the UTF-16 code units of the text.
pub fn hash_text(text: &str) -> u32 {
    text.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(state: u32) -> Mulberry32 {
        Mulberry32 { state }
    }

    pub fn from_seed_value(seed: &Seed) -> Mulberry32 {
        Mulberry32::new(seed.state())
    }

    /// Uniform in [0, 1), with 32 bits of resolution.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        unit_from_bits(self.next_u32())
    }

    /// Uniform index in [0, n). n must be non zero.
    #[inline]
    pub fn below(&mut self, n: usize) -> usize {
        index_from_bits(self.next_u32(), n)
    }
}

/// Map one raw output onto [0, 1).
#[inline]
pub fn unit_from_bits(bits: u32) -> f64 {
    f64::from(bits) / 4_294_967_296.0
}

/// Map one raw output onto [0, n), the same as `floor(unit * n)` but in integers.
#[inline]
pub fn index_from_bits(bits: u32, n: usize) -> usize {
    ((u64::from(bits) * n as u64) >> 32) as usize
}

impl RngCore for Mulberry32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: [u8; 4]) -> Mulberry32 {
        Mulberry32::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Mulberry32 {
        Mulberry32::new((state & 0xFFFF_FFFF) as u32)
    }
}

fn next_u64_via_u32<R: RngCore + ?Sized>(rng: &mut R) -> u64 {
    let low = u64::from(rng.next_u32());
    let high = u64::from(rng.next_u32());
    (high << 32) | low
}

fn fill_bytes_via_next<R: RngCore + ?Sized>(rng: &mut R, dest: &mut [u8]) {
    for chunk in dest.chunks_mut(4) {
        let bytes = rng.next_u32().to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}
