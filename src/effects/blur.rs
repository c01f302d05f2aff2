use rayon::prelude::*;

use crate::foundation::error::{BoothError, BoothResult};

/// Separable Gaussian blur over premultiplied RGBA8. Samples past the edge repeat the edge pixel.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> BoothResult<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BoothError::render("blur buffer size overflow"))?;
    if src.len() != len {
        return Err(BoothError::render(format!(
            "blur input is {} bytes, expected {len} for {width}x{height}",
            src.len()
        )));
    }
    if radius == 0 || len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let (w, h) = (width as usize, height as usize);
    let mut rows = vec![0u8; len];
    convolve(src, &mut rows, w, h, &kernel, Axis::X);
    let mut out = vec![0u8; len];
    convolve(&rows, &mut out, w, h, &kernel, Axis::Y);
    Ok(out)
}

/// Normalized kernel of `2 * radius + 1` taps in Q16; the taps sum to exactly `1 << 16`.
pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BoothResult<Vec<u32>> {
    const ONE: i64 = 1 << 16;
    if radius == 0 {
        return Ok(vec![ONE as u32]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BoothError::validation("blur sigma must be finite and > 0"));
    }

    let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
    let r = i64::from(radius);
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let total: f64 = raw.iter().sum();

    let mut taps: Vec<i64> = raw
        .iter()
        .map(|w| ((w / total) * ONE as f64).round() as i64)
        .collect();
    // Rounding drift goes to the center tap so a flat image stays flat.
    let drift = ONE - taps.iter().sum::<i64>();
    taps[radius as usize] = (taps[radius as usize] + drift).clamp(0, ONE);

    Ok(taps.into_iter().map(|t| t.clamp(0, ONE) as u32).collect())
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// One 1-D convolution pass, one output row per rayon task.
fn convolve(src: &[u8], dst: &mut [u8], w: usize, h: usize, kernel: &[u32], axis: Axis) {
    let radius = (kernel.len() / 2) as isize;
    dst.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let d = k as isize - radius;
                let (sx, sy) = match axis {
                    Axis::X => (clamp_index(x as isize + d, w), y),
                    Axis::Y => (x, clamp_index(y as isize + d, h)),
                };
                let i = (sy * w + sx) * 4;
                for (a, &s) in acc.iter_mut().zip(&src[i..i + 4]) {
                    *a += u64::from(weight) * u64::from(s);
                }
            }
            for (o, a) in row[x * 4..x * 4 + 4].iter_mut().zip(acc) {
                *o = ((a + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    });
}

fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
