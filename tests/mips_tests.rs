// Host-side tests for mip chain sizing.

#![allow(dead_code)]
mod mips {
    include!("../src/core/mips.rs");
}

use mips::*;

#[test]
fn square_texture_halves_down_to_one_pixel() {
    let chain = mip_chain(512, 512);
    assert_eq!(chain.len(), 10);
    assert_eq!(chain[0], (512, 512));
    assert_eq!(chain[1], (256, 256));
    assert_eq!(*chain.last().unwrap(), (1, 1));
}

#[test]
fn short_side_stops_at_one_while_long_side_keeps_halving() {
    assert_eq!(mip_chain(8, 2), vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
}

#[test]
fn odd_and_degenerate_sizes_round_down() {
    assert_eq!(mip_chain(5, 3), vec![(5, 3), (2, 1), (1, 1)]);
    assert_eq!(mip_chain(1, 1), vec![(1, 1)]);
    assert_eq!(mip_chain(0, 4), vec![(1, 4), (1, 2), (1, 1)]);
}
