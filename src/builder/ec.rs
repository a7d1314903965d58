use crate::common::{
    galois::{generator_poly, G},
    metadata::{BlockLayout, ECLevel, Version},
};

/// Final codeword sequence of a symbol: the data codewords interleaved
/// across blocks, then the error correction codewords interleaved the same
/// way.
pub(crate) fn build_payload(data: &[u8], version: Version, ecl: ECLevel) -> Vec<u8> {
    let blocks = split_blocks(data, version.block_layout(ecl));
    let generator = generator_poly(version.ecc_per_block(ecl));
    let ecc = blocks.iter().map(|block| remainder(block, &generator)).collect::<Vec<_>>();

    let mut payload = interleave(&blocks);
    payload.extend(interleave(&ecc));
    payload
}

fn split_blocks(data: &[u8], layout: BlockLayout) -> Vec<&[u8]> {
    debug_assert_eq!(data.len(), layout.block_lens().sum::<usize>());
    let mut rest = data;
    layout
        .block_lens()
        .map(|len| {
            let (block, tail) = rest.split_at(len.min(rest.len()));
            rest = tail;
            block
        })
        .collect()
}

// Remainder of block(x) * x^n modulo the generator, run through an n codeword
// shift register
fn remainder(block: &[u8], generator: &[G]) -> Vec<u8> {
    let mut reg = vec![G(0); generator.len()];
    for &byte in block {
        let factor = G(byte) + reg[0];
        reg.rotate_left(1);
        if let Some(last) = reg.last_mut() {
            *last = G(0);
        }
        for (r, &g) in reg.iter_mut().zip(generator) {
            *r += g * factor;
        }
    }
    reg.into_iter().map(|g| g.0).collect()
}

// Codeword i of every block in turn, short blocks drop out when exhausted
fn interleave<B: AsRef<[u8]>>(blocks: &[B]) -> Vec<u8> {
    let longest = blocks.iter().map(|b| b.as_ref().len()).max().unwrap_or(0);
    (0..longest)
        .flat_map(|i| blocks.iter().filter_map(move |b| b.as_ref().get(i).copied()))
        .collect()
}

/// Codewords that can be lost and still decode, for sizing a logo over the
/// symbol. Small symbols hold back a few codewords against misdecodes.
pub fn error_correction_capacity(version: Version, ec_level: ECLevel) -> usize {
    let held_back = match (*version, ec_level) {
        (1, ECLevel::L) => 3,
        (2, ECLevel::L) | (1, ECLevel::M) => 2,
        (1, _) | (3, ECLevel::L) => 1,
        _ => 0,
    };
    let ecc_total = version.block_count(ec_level) * version.ecc_per_block(ec_level);
    (ecc_total - held_back) / 2
}
