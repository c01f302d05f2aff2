//! Placeholder base layer: flat background with two centered lines of text.
//!
//! Text goes through `usvg`/`resvg` so font discovery and shaping come from the same stack used
//! for SVG assets. If the system has no usable fonts the background is still drawn.

use std::sync::{Arc, OnceLock};

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{BoothError, BoothResult};
use crate::render::layout::{
    PLACEHOLDER_BACKGROUND, PLACEHOLDER_TEXT, TextLine, placeholder_lines,
};

const FALLBACK_FAMILIES: [&str; 5] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

/// Rasterize the placeholder at canvas size into premultiplied RGBA8.
pub fn render_placeholder(canvas: Canvas) -> BoothResult<Vec<u8>> {
    let svg = placeholder_svg(canvas);
    let opts = usvg::Options {
        fontdb: system_fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts).context("parse placeholder svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| BoothError::render("failed to allocate placeholder pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap.data().to_vec())
}

/// SVG document for the placeholder layer.
pub(crate) fn placeholder_svg(canvas: Canvas) -> String {
    let (w, h) = (canvas.width, canvas.height);
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    out.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        PLACEHOLDER_BACKGROUND.to_hex_rgb()
    ));
    for line in placeholder_lines(canvas) {
        out.push_str(&text_element(&line));
    }
    out.push_str("</svg>");
    out
}

fn text_element(line: &TextLine) -> String {
    let families = std::iter::once("sans-serif")
        .chain(FALLBACK_FAMILIES)
        .map(|f| {
            if f.contains(' ') {
                format!("'{f}'")
            } else {
                f.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"<text x="{x}" y="{y}" font-family="{families}" font-size="{size}" text-anchor="middle" fill="{fill}">{text}</text>"#,
        x = line.anchor.x,
        y = line.anchor.y,
        size = line.font_px,
        fill = PLACEHOLDER_TEXT.to_hex_rgb(),
        text = xml_escape(line.text),
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// System fonts, loaded once per process.
fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        // fontdb maps `sans-serif` to Arial unless told otherwise.
        let preferred = FALLBACK_FAMILIES.iter().find(|name| {
            db.faces()
                .any(|f| f.families.iter().any(|(fam, _)| fam.as_str() == **name))
        });
        let chosen = preferred.map(|s| (*s).to_owned()).or_else(|| {
            db.faces()
                .next()
                .and_then(|f| f.families.first().map(|(fam, _)| fam.clone()))
        });
        if let Some(family) = chosen {
            db.set_sans_serif_family(family);
        }
        tracing::debug!(faces = db.len(), "loaded system fonts for placeholder");
        Arc::new(db)
    })
    .clone()
}

#[cfg(test)]
#[path = "../../tests/unit/render/placeholder.rs"]
mod tests;
