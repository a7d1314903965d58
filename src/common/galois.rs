use std::ops::{Add, AddAssign, Mul};

// Galois field GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct G(pub u8);

impl G {
    /// α^i
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn log(self) -> usize {
        debug_assert!(self.0 != 0, "Log of zero is undefined");
        LOG_TABLE[self.0 as usize] as usize
    }
}

impl Add for G {
    type Output = Self;
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.0 == 0 || rhs.0 == 0 {
            return Self(0);
        }
        Self::gen_pow(self.log() + rhs.log())
    }
}

/// Coefficients of ∏(x - α^i) for i in 0..degree, highest degree first with
/// the leading 1 dropped.
pub fn generator_poly(degree: usize) -> Vec<G> {
    let mut poly = vec![G(1)];
    for i in 0..degree {
        let root = G::gen_pow(i);
        let mut next = vec![G(0); poly.len() + 1];
        for (j, &c) in poly.iter().enumerate() {
            next[j] += c;
            next[j + 1] += c * root;
        }
        poly = next;
    }
    poly.split_off(1)
}

const fn exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    table[255] = table[0];
    table
}

const fn log_table() -> [u8; 256] {
    let exp = exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

const PRIMITIVE: u16 = 0x11D;

pub static EXP_TABLE: [u8; 256] = exp_table();

pub static LOG_TABLE: [u8; 256] = log_table();
