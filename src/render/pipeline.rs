use crate::assets::decode::{PreparedImage, unpremultiply_rgba8_in_place};
use crate::effects::blur::blur_rgba8_premul;
use crate::effects::color_matrix::color_matrix_rgba8_premul_in_place;
use crate::effects::composite::over_in_place;
use crate::effects::filter::{FilterKey, FilterTransform};
use crate::foundation::core::Canvas;
use crate::foundation::error::{BoothError, BoothResult};
use crate::render::layout::{centered_rect, cover_rect, image_to_rect, mirrored_fill, stretched_fill};
use crate::render::placeholder::render_placeholder;
use crate::render::raster::LayerPainter;
use crate::render::source::VisualSource;
use crate::session::Sticker;

/// A composited frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Everything one draw depends on.
#[derive(Clone, Copy, Debug)]
pub struct RenderInputs<'a> {
    pub source: VisualSource<'a>,
    pub filter: FilterKey,
    pub stickers: &'a [Sticker],
    pub frame: Option<&'a PreparedImage>,
}

/// Composite one frame: filtered base layer, then stickers in order, then the frame on top.
///
/// Pure: the same inputs always produce the same bytes.
#[tracing::instrument(
    skip(inputs),
    fields(
        source = inputs.source.kind(),
        filter = %inputs.filter,
        stickers = inputs.stickers.len(),
        frame = inputs.frame.is_some(),
    )
)]
pub fn render_composite(canvas: Canvas, inputs: &RenderInputs<'_>) -> BoothResult<FrameRGBA> {
    let canvas = Canvas::new(canvas.width, canvas.height)?;

    let mut data = render_base(canvas, &inputs.source)?;
    apply_filter(&mut data, canvas, inputs.filter.transform())?;

    if let Some(overlay) = render_overlays(canvas, inputs.stickers, inputs.frame)? {
        over_in_place(&mut data, &overlay)?;
    }

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data,
        premultiplied: true,
    })
}

fn render_base(canvas: Canvas, source: &VisualSource<'_>) -> BoothResult<Vec<u8>> {
    let (img, transform) = match *source {
        VisualSource::LiveVideo(img) => (img, mirrored_fill(canvas, img.width, img.height)),
        VisualSource::StaticImage(img) => (
            img,
            image_to_rect(img.width, img.height, cover_rect(canvas, img.width, img.height)),
        ),
        VisualSource::Unavailable => return render_placeholder(canvas),
    };
    let mut painter = LayerPainter::new(canvas)?;
    painter.draw_image(img, transform)?;
    Ok(painter.finish())
}

/// Apply a filter to the base layer in place.
pub fn apply_filter(data: &mut Vec<u8>, canvas: Canvas, transform: FilterTransform) -> BoothResult<()> {
    if data.len() != canvas.byte_len() {
        return Err(BoothError::render("filter input does not match canvas size"));
    }
    match transform {
        FilterTransform::Identity => {}
        FilterTransform::ColorMatrix(m) => color_matrix_rgba8_premul_in_place(data, m),
        FilterTransform::Blur { radius_px, sigma } => {
            *data = blur_rgba8_premul(data, canvas.width, canvas.height, radius_px, sigma)?;
        }
    }
    Ok(())
}

/// Stickers and frame on a transparent layer; `None` when there is nothing to draw.
fn render_overlays(
    canvas: Canvas,
    stickers: &[Sticker],
    frame: Option<&PreparedImage>,
) -> BoothResult<Option<Vec<u8>>> {
    let ready = stickers.iter().filter(|s| s.is_ready()).count();
    if ready < stickers.len() {
        tracing::debug!(pending = stickers.len() - ready, "skipping stickers still decoding");
    }
    if ready == 0 && frame.is_none() {
        return Ok(None);
    }

    let mut painter = LayerPainter::new(canvas)?;
    for s in stickers {
        let Some(img) = s.image.as_ref() else {
            continue;
        };
        let rect = centered_rect(s.center, img.width, img.height, s.scale);
        painter.draw_image(img, image_to_rect(img.width, img.height, rect))?;
    }
    if let Some(img) = frame {
        painter.draw_image(img, stretched_fill(canvas, img.width, img.height))?;
    }
    Ok(Some(painter.finish()))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
