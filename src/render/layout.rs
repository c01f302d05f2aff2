//! Geometry for every layer of the composite, kept separate from rasterization so it can be
//! checked without drawing.

use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8Premul};

/// Destination rect for "cover" scaling: fill the canvas, keep aspect, center-crop overflow.
pub fn cover_rect(canvas: Canvas, img_w: u32, img_h: u32) -> Rect {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let iw = f64::from(img_w.max(1));
    let ih = f64::from(img_h.max(1));

    if iw / ih > canvas.aspect() {
        let draw_w = iw * (ch / ih);
        let offset_x = -(draw_w - cw) / 2.0;
        Rect::new(offset_x, 0.0, offset_x + draw_w, ch)
    } else {
        let draw_h = ih * (cw / iw);
        let offset_y = -(draw_h - ch) / 2.0;
        Rect::new(0.0, offset_y, cw, offset_y + draw_h)
    }
}

/// Map an image's pixel space `(0,0)-(w,h)` onto `dst`.
pub fn image_to_rect(img_w: u32, img_h: u32, dst: Rect) -> Affine {
    let sx = dst.width() / f64::from(img_w.max(1));
    let sy = dst.height() / f64::from(img_h.max(1));
    Affine::translate((dst.x0, dst.y0)) * Affine::scale_non_uniform(sx, sy)
}

/// Stretch an image over the whole canvas, flipped left-right (selfie view).
pub fn mirrored_fill(canvas: Canvas, img_w: u32, img_h: u32) -> Affine {
    let cw = f64::from(canvas.width);
    let flip = Affine::new([-1.0, 0.0, 0.0, 1.0, cw, 0.0]);
    flip * image_to_rect(img_w, img_h, canvas.rect())
}

/// Stretch an image over the whole canvas, ignoring its aspect ratio.
pub fn stretched_fill(canvas: Canvas, img_w: u32, img_h: u32) -> Affine {
    image_to_rect(img_w, img_h, canvas.rect())
}

/// Rect of an image of natural size `w x h` drawn centered on `center` at `scale`.
pub fn centered_rect(center: Point, img_w: u32, img_h: u32, scale: f64) -> Rect {
    let w = f64::from(img_w) * scale;
    let h = f64::from(img_h) * scale;
    Rect::new(
        center.x - w / 2.0,
        center.y - h / 2.0,
        center.x + w / 2.0,
        center.y + h / 2.0,
    )
}

pub const PLACEHOLDER_BACKGROUND: Rgba8Premul = Rgba8Premul {
    r: 0xf0,
    g: 0xf0,
    b: 0xf0,
    a: 0xff,
};

pub const PLACEHOLDER_TEXT: Rgba8Premul = Rgba8Premul {
    r: 0x66,
    g: 0x66,
    b: 0x66,
    a: 0xff,
};

pub const PLACEHOLDER_TITLE: &str = "Camera unavailable";
pub const PLACEHOLDER_HINT: &str = "Retry the camera or upload a background image instead";

/// One centered line of placeholder text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: &'static str,
    pub font_px: f64,
    /// Anchor point: horizontal center and alphabetic baseline.
    pub anchor: Point,
}

/// The two lines drawn when there is no camera and no background.
pub fn placeholder_lines(canvas: Canvas) -> [TextLine; 2] {
    let c = canvas.center();
    [
        TextLine {
            text: PLACEHOLDER_TITLE,
            font_px: 16.0,
            anchor: Point::new(c.x, c.y - 10.0),
        },
        TextLine {
            text: PLACEHOLDER_HINT,
            font_px: 13.0,
            anchor: Point::new(c.x, c.y + 14.0),
        },
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
