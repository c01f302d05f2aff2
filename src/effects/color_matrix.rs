//! 5x4 color matrices (row-major, last column is the constant offset) over straight sRGB.

pub type ColorMatrix = [f32; 20];

pub const IDENTITY_MATRIX: ColorMatrix = [
    1.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
];

/// Desaturation; `amount` 1.0 is fully gray.
pub fn grayscale_matrix(amount: f32) -> ColorMatrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        0.2126 + 0.7874 * k,
        0.7152 - 0.7152 * k,
        0.0722 - 0.0722 * k,
        0.0,
        0.0,
        0.2126 - 0.2126 * k,
        0.7152 + 0.2848 * k,
        0.0722 - 0.0722 * k,
        0.0,
        0.0,
        0.2126 - 0.2126 * k,
        0.7152 - 0.7152 * k,
        0.0722 + 0.9278 * k,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

/// Warm-tone desaturation; `amount` 1.0 is full sepia.
pub fn sepia_matrix(amount: f32) -> ColorMatrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        0.393 + 0.607 * k,
        0.769 - 0.769 * k,
        0.189 - 0.189 * k,
        0.0,
        0.0,
        0.349 - 0.349 * k,
        0.686 + 0.314 * k,
        0.168 - 0.168 * k,
        0.0,
        0.0,
        0.272 - 0.272 * k,
        0.534 - 0.534 * k,
        0.131 + 0.869 * k,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

/// Color inversion; `amount` 1.0 maps c to 1 - c.
pub fn invert_matrix(amount: f32) -> ColorMatrix {
    let a = amount.clamp(0.0, 1.0);
    let d = 1.0 - 2.0 * a;
    [
        d, 0.0, 0.0, 0.0, a, //
        0.0, d, 0.0, 0.0, a, //
        0.0, 0.0, d, 0.0, a, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]
}

/// Apply `m` to every premultiplied pixel of `src`, writing premultiplied results to `dst`.
pub fn color_matrix_rgba8_premul(src: &[u8], dst: &mut [u8], m: ColorMatrix) {
    debug_assert_eq!(src.len(), dst.len());
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        d.copy_from_slice(&apply_px([s[0], s[1], s[2], s[3]], &m));
    }
}

pub fn color_matrix_rgba8_premul_in_place(buf: &mut [u8], m: ColorMatrix) {
    for px in buf.chunks_exact_mut(4) {
        let out = apply_px([px[0], px[1], px[2], px[3]], &m);
        px.copy_from_slice(&out);
    }
}

fn apply_px(px: [u8; 4], m: &ColorMatrix) -> [u8; 4] {
    let alpha = f32::from(px[3]) / 255.0;
    let unpremul = if alpha > 0.0 { 1.0 / alpha } else { 0.0 };
    let straight = [
        f32::from(px[0]) / 255.0 * unpremul,
        f32::from(px[1]) / 255.0 * unpremul,
        f32::from(px[2]) / 255.0 * unpremul,
        alpha,
    ];

    let mut out = [0.0f32; 4];
    for (row, o) in m.chunks_exact(5).zip(out.iter_mut()) {
        let dot: f32 = row[..4].iter().zip(straight).map(|(c, v)| c * v).sum();
        *o = (dot + row[4]).clamp(0.0, 1.0);
    }

    let a = out[3];
    let to_u8 = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_u8(out[0] * a), to_u8(out[1] * a), to_u8(out[2] * a), to_u8(a)]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color_matrix.rs"]
mod tests;
