use std::sync::Arc;

use crate::assets::decode::DecodedImage;
use crate::assets::fonts::{FontBook, TextBrushRgba8};
use crate::assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_raster_size};
use crate::foundation::core::{Affine, BezPath, Color, Point, Rect, is_usable_len};
use crate::foundation::error::{EaselError, EaselResult};
use crate::render::frame::FrameRGBA;
use crate::render::state::{DrawState, LineCap, StateStack, TextAlign, TextBaseline};
use crate::render::surface::Surface;

/// [`Surface`] rasterized on the CPU with `vello_cpu`.
///
/// Draw calls accumulate in a render context. [`Surface::commit`] flushes it and
/// [`Surface::snapshot`] rasterizes everything drawn since the last resize.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    states: StateStack,
    path: BezPath,
    open_layers: usize,
    fonts: FontBook,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("save_depth", &self.states.depth())
            .field("fonts", &self.fonts)
            .finish()
    }
}

impl CpuSurface {
    /// A surface with no fonts. Text draws are skipped until one is registered.
    pub fn new(width: u32, height: u32) -> EaselResult<Self> {
        Self::with_fonts(width, height, FontBook::new())
    }

    /// A surface using `fonts` for text.
    pub fn with_fonts(width: u32, height: u32, fonts: FontBook) -> EaselResult<Self> {
        let (w, h) = surface_dims(width, height)?;
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            states: StateStack::default(),
            path: BezPath::new(),
            open_layers: 0,
            fonts,
        })
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    fn prepare(&mut self, color: Color) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    fn apply_stroke_style(&mut self) {
        let st = self.states.current();
        let cap = match st.line_cap {
            LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
            LineCap::Round => vello_cpu::kurbo::Cap::Round,
            LineCap::Square => vello_cpu::kurbo::Cap::Square,
        };
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(st.line_width).with_caps(cap));
    }

    fn pop_layers(&mut self, n: usize) {
        for _ in 0..n.min(self.open_layers) {
            self.ctx.pop_layer();
            self.open_layers -= 1;
        }
    }

    fn image_paint(
        &self,
        image: &DecodedImage,
        dst: Rect,
    ) -> EaselResult<(vello_cpu::Image, f64, f64)> {
        let (w, h, rgba8_premul) = match image {
            DecodedImage::Raster(img) => (img.width, img.height, Arc::clone(&img.rgba8_premul)),
            DecodedImage::Svg(svg) => {
                let (w, h) = svg_raster_size(&svg.tree, dst.width(), dst.height())?;
                let bytes = rasterize_svg_to_premul_rgba8(&svg.tree, w, h)?;
                (w, h, Arc::new(bytes))
            }
        };
        let pixmap = premul_bytes_to_pixmap(rgba8_premul.as_slice(), w, h)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        Ok((paint, f64::from(w), f64::from(h)))
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> EaselResult<()> {
        let (w, h) = surface_dims(width, height)?;
        self.width = w;
        self.height = h;
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.states = StateStack::default();
        self.path = BezPath::new();
        self.open_layers = 0;
        Ok(())
    }

    fn save(&mut self) {
        self.states.save();
    }

    fn restore(&mut self) {
        if let Some(dropped) = self.states.restore() {
            self.pop_layers(dropped);
        }
    }

    fn save_depth(&self) -> usize {
        self.states.depth()
    }

    fn state(&self) -> &DrawState {
        self.states.current()
    }

    fn state_mut(&mut self) -> &mut DrawState {
        self.states.current_mut()
    }

    fn path_mut(&mut self) -> &mut BezPath {
        &mut self.path
    }

    fn fill(&mut self) {
        let color = self.states.current().effective_fill();
        if color.is_invisible() || self.path.elements().is_empty() {
            return;
        }
        self.prepare(color);
        self.ctx.fill_path(&bezpath_to_cpu(&self.path));
    }

    fn stroke(&mut self) {
        let color = self.states.current().effective_stroke();
        if color.is_invisible() || self.path.elements().is_empty() {
            return;
        }
        self.prepare(color);
        self.apply_stroke_style();
        self.ctx.stroke_path(&bezpath_to_cpu(&self.path));
    }

    fn clip(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.push_clip_layer(&bezpath_to_cpu(&self.path));
        self.open_layers += 1;
        self.states.current_mut().clip_depth += 1;
    }

    fn fill_rect(&mut self, rect: Rect) {
        let color = self.states.current().effective_fill();
        if color.is_invisible() || !is_drawable_rect(rect) {
            return;
        }
        self.prepare(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let color = self.states.current().effective_stroke();
        if color.is_invisible() || !is_drawable_rect(rect) {
            return;
        }
        self.prepare(color);
        self.apply_stroke_style();
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        let font = self.states.current().font.clone();
        self.fonts.measure(text, &font)
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        let st = self.states.current().clone();
        let color = st.effective_fill();
        if text.is_empty() || color.is_invisible() || !at.x.is_finite() || !at.y.is_finite() {
            return;
        }
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let Some(shaped) = self.fonts.shape_line(text, &st.font, brush) else {
            tracing::warn!(font = %st.font.css(), "no usable font, text skipped");
            return;
        };

        let width = f64::from(shaped.layout.width());
        let dx = match st.text_align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        let dy = shaped
            .layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                let (baseline, ascent, descent) = (
                    f64::from(m.baseline),
                    f64::from(m.ascent),
                    f64::from(m.descent),
                );
                match st.text_baseline {
                    TextBaseline::Alphabetic => -baseline,
                    TextBaseline::Top => -(baseline - ascent),
                    TextBaseline::Middle => -(baseline - ascent + (ascent + descent) / 2.0),
                    TextBaseline::Bottom => -(baseline + descent),
                }
            })
            .unwrap_or(0.0);

        self.ctx
            .set_transform(affine_to_cpu(Affine::translate((at.x + dx, at.y + dy))));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&shaped.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    fn draw_image(&mut self, image: &DecodedImage, dst: Rect) -> EaselResult<()> {
        if !is_drawable_rect(dst) {
            return Ok(());
        }
        let alpha = self.states.current().global_alpha;
        if alpha <= 0.0 {
            return Ok(());
        }
        let (paint, w, h) = self.image_paint(image, dst)?;
        if w <= 0.0 || h <= 0.0 {
            return Ok(());
        }

        let tr = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / w, dst.height() / h);
        self.ctx.set_transform(affine_to_cpu(tr));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        if alpha < 1.0 {
            self.ctx.push_opacity_layer(alpha);
        }
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        if alpha < 1.0 {
            self.ctx.pop_layer();
        }
        Ok(())
    }

    fn commit(&mut self) -> EaselResult<()> {
        self.ctx.flush();
        Ok(())
    }

    fn snapshot(&mut self) -> EaselResult<FrameRGBA> {
        if self.open_layers > 0 {
            tracing::warn!(
                layers = self.open_layers,
                "closing clip layers left open before snapshot"
            );
            self.pop_layers(self.open_layers);
            self.states.current_mut().clip_depth = 0;
        }
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn surface_dims(width: u32, height: u32) -> EaselResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(EaselError::render("surface dimensions must be non-zero"));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| EaselError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| EaselError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn is_drawable_rect(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && is_usable_len(r.width()) && is_usable_len(r.height())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> EaselResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| EaselError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| EaselError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(EaselError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
