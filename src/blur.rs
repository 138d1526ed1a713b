// Soft shadows: a Gaussian-ish blur over an alpha mask.
// Visual: the hard edge of a shape's silhouette turns into the fuzzy shadow
// you see under the classic stroke, the shadow card and the neon glow.
use crate::types::Mask;

/// Box widths whose three successive passes approximate a Gaussian of `sigma`.
fn boxes_for_gauss(sigma: f32, passes: usize) -> Vec<usize> {
    let n = passes as f32;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i32;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wu = wl + 2;
    let wlf = wl as f32;
    let m_ideal = (12.0 * sigma * sigma - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round() as i32;
    (0..passes as i32)
        .map(|i| if i < m { wl } else { wu })
        .map(|w| w.max(1) as usize)
        .collect()
}

/// One box pass along rows (`horizontal`) or columns, sliding a window of
/// 2r+1 samples. Samples outside the mask count as 0 (nothing casts a shadow there).
fn box_pass(src: &Mask, dst: &mut Mask, radius: usize, horizontal: bool) {
    let (w, h) = (src.width, src.height);
    let win = (2 * radius + 1) as f32;
    let (lines, len) = if horizontal { (h, w) } else { (w, h) };
    let at = |line: usize, i: usize| if horizontal { line * w + i } else { i * w + line };
    let r = radius as isize;

    for line in 0..lines {
        // Prime the window [0..r] (left half lies outside -> zeros)
        let mut sum = 0.0f32;
        for i in 0..=r {
            if (i as usize) < len {
                sum += src.alpha[at(line, i as usize)];
            }
        }

        // Slide: write the average, then add the entering sample and drop the leaving one
        for i in 0..len as isize {
            dst.alpha[at(line, i as usize)] = sum / win;

            let add = i + r + 1;
            let sub = i - r;
            if add < len as isize {
                sum += src.alpha[at(line, add as usize)];
            }
            if sub >= 0 {
                sum -= src.alpha[at(line, sub as usize)];
            }
        }
    }
}

/// Blur `mask` in place with a Gaussian of standard deviation `sigma` (pixels).
/// sigma <= 0 leaves the mask untouched.
pub fn gaussian_blur_mask(mask: &mut Mask, sigma: f32) {
    if sigma <= 0.0 || mask.width == 0 || mask.height == 0 {
        return;
    }
    let mut tmp = Mask::new(mask.width, mask.height);
    for size in boxes_for_gauss(sigma, 3) {
        let radius = (size - 1) / 2;
        if radius == 0 {
            continue;
        }
        box_pass(mask, &mut tmp, radius, true);
        box_pass(&tmp, mask, radius, false);
    }
    // Float drift from the running sums must not leave [0,1]
    for a in &mut mask.alpha {
        *a = a.clamp(0.0, 1.0);
    }
}
