//! Thin layer over `vello_cpu`: every layer of the composite is an image drawn under an affine.

use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{BoothError, BoothResult};

/// Draw list for one offscreen layer, rasterized in submission order.
pub(crate) struct LayerPainter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl LayerPainter {
    pub(crate) fn new(canvas: Canvas) -> BoothResult<Self> {
        let width = canvas_dim(canvas.width)?;
        let height = canvas_dim(canvas.height)?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    /// Paint `img` so that its pixel-space rect `(0,0)-(w,h)` lands under `transform`.
    pub(crate) fn draw_image(&mut self, img: &PreparedImage, transform: Affine) -> BoothResult<()> {
        let paint = image_paint(img)?;
        self.ctx
            .set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(img.width),
            f64::from(img.height),
        ));
        Ok(())
    }

    /// Rasterize everything drawn so far into premultiplied RGBA8 bytes.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap.data_as_u8_slice().to_vec()
    }
}

fn canvas_dim(v: u32) -> BoothResult<u16> {
    v.try_into()
        .map_err(|_| BoothError::render("canvas dimension exceeds u16"))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_paint(img: &PreparedImage) -> BoothResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BoothResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BoothError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BoothError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BoothError::render("pixmap byte len mismatch"));
    }
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}
