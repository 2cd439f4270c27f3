//! Alpha matte cleanup
//!
//! Post-process pass over a converted RGBA buffer that erodes and then
//! blurs the alpha channel to knock down the one-pixel halo of
//! semi-transparent edge fringes left by indexed-to-RGBA conversion.

/// Erode then box-blur the alpha channel of a row-major RGBA buffer.
///
/// Erosion replaces each interior pixel's alpha (where it is positive) with
/// the minimum alpha of its four axis neighbors; the blur is an unweighted
/// integer-mean 3x3 filter over the eroded values. Border pixels are left
/// untouched by both passes.
pub(crate) fn clean_alpha(width: usize, height: usize, rgba: &mut [u8]) {
    debug_assert_eq!(rgba.len(), width * height * 4);

    let alpha: Vec<u8> = rgba.chunks_exact(4).map(|px| px[3]).collect();

    // Erode interior pixels that have any coverage
    let mut eroded = alpha.clone();
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let i = y * width + x;
            if alpha[i] > 0 {
                let min = alpha[i - 1]
                    .min(alpha[i + 1])
                    .min(alpha[i - width])
                    .min(alpha[i + width]);
                eroded[i] = min;
            }
        }
    }

    // 3x3 integer-mean blur over the eroded buffer
    let mut blurred = eroded.clone();
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut sum: u32 = 0;
            for dy in 0..3 {
                for dx in 0..3 {
                    sum += u32::from(eroded[(y + dy - 1) * width + (x + dx - 1)]);
                }
            }
            blurred[y * width + x] = (sum / 9) as u8;
        }
    }

    for (px, &a) in rgba.chunks_exact_mut(4).zip(&blurred) {
        px[3] = a;
    }
}
