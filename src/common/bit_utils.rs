use num_traits::PrimInt;

/// Bits packed most significant first into bytes, bounded by a bit
/// capacity. The last byte is zero filled past the final bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    bytes: Vec<u8>,
    bits: usize,
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { bytes: Vec::with_capacity(capacity.div_ceil(8)), bits: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bits that can still be pushed.
    pub fn remaining(&self) -> usize {
        self.capacity - self.bits
    }

    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(self.bits < self.capacity, "bit stream full at {} bits", self.capacity);
        let offset = self.bits % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bits += 1;
    }

    /// Appends the `count` low bits of `value`, most significant first.
    pub fn push_bits<T: PrimInt>(&mut self, value: T, count: usize) {
        debug_assert!(
            count >= T::zero().count_zeros() as usize - value.leading_zeros() as usize,
            "{count} bits can't hold the value"
        );
        for i in (0..count).rev() {
            self.push((value >> i) & T::one() == T::one());
        }
    }
}
