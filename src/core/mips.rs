/// Sizes of a full mip chain, base level first, halving down to 1×1.
/// A zero side counts as 1.
pub fn mip_chain(width: u32, height: u32) -> Vec<(u32, u32)> {
    let (mut w, mut h) = (width.max(1), height.max(1));
    let mut levels = vec![(w, h)];
    while w > 1 || h > 1 {
        w = (w / 2).max(1);
        h = (h / 2).max(1);
        levels.push((w, h));
    }
    levels
}
