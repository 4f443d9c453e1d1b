use std::ops::Range;

use crate::context::InterpolationContext;
use volition_common::ColorArgb;
use volition_kernel::Material;

/// Per-pixel shading unit driven by the rasterizer.
///
/// `start` runs once per primitive or scanline and pulls whatever it needs out
/// of the context; `process_pixel` runs once per covered pixel and rewrites
/// `ctx.pixel`. Implementations are called through generics so the pixel loop
/// is monomorphized per variant; there is no vtable in the inner loop.
pub trait Interpolator {
    fn start(&mut self, ctx: &InterpolationContext<'_>);
    fn process_pixel(&mut self, ctx: &mut InterpolationContext<'_>);
}

/// 8-bit fixed-point blend of `src` over `dst` with weight `alpha`.
///
/// `(alpha * src + (255 - alpha) * dst) >> 8` per RGB channel. The shift
/// truncates, so the extremes land within one unit of `dst` (alpha 0) or
/// `src` (alpha 255). The result is opaque.
#[inline]
pub fn blend_alpha(alpha: i32, src: ColorArgb, dst: ColorArgb) -> ColorArgb {
    let mix = |s: u8, d: u8| (((alpha * s as i32) + ((255 - alpha) * d as i32)) >> 8) as u8;
    ColorArgb::from_xrgb(mix(src.r(), dst.r()), mix(src.g(), dst.g()), mix(src.b(), dst.b()))
}

/// Blends the incoming pixel over the frame buffer using the alpha of the
/// first lit-color sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlphaInterpolator {
    alpha: i32,
}

impl AlphaInterpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alpha captured by the last `start`.
    pub fn alpha(&self) -> i32 {
        self.alpha
    }
}

impl Interpolator for AlphaInterpolator {
    #[inline]
    fn start(&mut self, ctx: &InterpolationContext<'_>) {
        self.alpha = ctx.lit_color[0].a() as i32;
    }

    #[inline]
    fn process_pixel(&mut self, ctx: &mut InterpolationContext<'_>) {
        ctx.pixel = blend_alpha(self.alpha, ctx.pixel, ctx.buffer_pixel());
    }
}

/// Fills with the first lit-color sample, ignoring the destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatInterpolator {
    color: ColorArgb,
}

impl FlatInterpolator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Interpolator for FlatInterpolator {
    #[inline]
    fn start(&mut self, ctx: &InterpolationContext<'_>) {
        let c = ctx.lit_color[0];
        self.color = ColorArgb::from_xrgb(c.r(), c.g(), c.b());
    }

    #[inline]
    fn process_pixel(&mut self, ctx: &mut InterpolationContext<'_>) {
        ctx.pixel = self.color;
    }
}

/// Closed set of interpolators for callers that pick one at runtime.
/// Dispatch is a match, resolved once per pixel without indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanInterpolator {
    Flat(FlatInterpolator),
    Alpha(AlphaInterpolator),
}

impl SpanInterpolator {
    /// Transparent materials blend; everything else is flat.
    pub fn for_material(material: &Material) -> Self {
        if material.is_transparent() {
            Self::Alpha(AlphaInterpolator::new())
        } else {
            Self::Flat(FlatInterpolator::new())
        }
    }
}

impl Interpolator for SpanInterpolator {
    #[inline]
    fn start(&mut self, ctx: &InterpolationContext<'_>) {
        match self {
            Self::Flat(i) => i.start(ctx),
            Self::Alpha(i) => i.start(ctx),
        }
    }

    #[inline]
    fn process_pixel(&mut self, ctx: &mut InterpolationContext<'_>) {
        match self {
            Self::Flat(i) => i.process_pixel(ctx),
            Self::Alpha(i) => i.process_pixel(ctx),
        }
    }
}

/// Shade pixels `xs` of row `y`: one `start`, then per pixel seed `ctx.pixel`
/// from the first lit color, `process_pixel`, and store. The span is clipped
/// to the buffer; returns the number of pixels written.
pub fn shade_span<I: Interpolator>(
    interpolator: &mut I,
    ctx: &mut InterpolationContext<'_>,
    y: usize,
    xs: Range<usize>,
) -> usize {
    if y >= ctx.rows() {
        return 0;
    }
    let end = xs.end.min(ctx.buffer_pitch);
    if xs.start >= end {
        return 0;
    }

    ctx.y = y;
    interpolator.start(ctx);
    for x in xs.start..end {
        ctx.x = x;
        ctx.pixel = ctx.lit_color[0];
        interpolator.process_pixel(ctx);
        ctx.store_pixel();
    }
    end - xs.start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_diff(a: ColorArgb, b: ColorArgb) -> i32 {
        [
            (a.r() as i32 - b.r() as i32).abs(),
            (a.g() as i32 - b.g() as i32).abs(),
            (a.b() as i32 - b.b() as i32).abs(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// Run the alpha interpolator over a single pixel.
    fn blend_one(src: ColorArgb, dst: ColorArgb) -> ColorArgb {
        let mut buffer = vec![dst];
        let mut ctx = InterpolationContext::new(&mut buffer, 1);
        ctx.lit_color[0] = src;
        let mut interp = AlphaInterpolator::new();
        interp.start(&ctx);
        ctx.pixel = src;
        interp.process_pixel(&mut ctx);
        ctx.pixel
    }

    #[test]
    fn start_reads_alpha_from_first_sample() {
        let mut buffer = vec![ColorArgb::BLACK];
        let mut ctx = InterpolationContext::new(&mut buffer, 1);
        ctx.lit_color = [
            ColorArgb::from_argb(0x40, 1, 2, 3),
            ColorArgb::from_argb(0x80, 0, 0, 0),
            ColorArgb::from_argb(0xC0, 0, 0, 0),
        ];
        let mut interp = AlphaInterpolator::new();
        interp.start(&ctx);
        assert_eq!(interp.alpha(), 0x40);
    }

    #[test]
    fn alpha_zero_keeps_destination() {
        let dsts = [
            ColorArgb::from_xrgb(0, 0, 0),
            ColorArgb::from_xrgb(255, 255, 255),
            ColorArgb::from_xrgb(17, 128, 200),
        ];
        for dst in dsts {
            let out = blend_one(ColorArgb::from_argb(0, 250, 10, 99), dst);
            assert!(channel_diff(out, dst) <= 1, "{dst} -> {out}");
        }
    }

    #[test]
    fn alpha_full_keeps_source() {
        let srcs = [
            ColorArgb::from_argb(255, 0, 0, 0),
            ColorArgb::from_argb(255, 255, 255, 255),
            ColorArgb::from_argb(255, 33, 66, 99),
        ];
        for src in srcs {
            let out = blend_one(src, ColorArgb::from_xrgb(200, 7, 140));
            assert!(channel_diff(out, src) <= 1, "{src} -> {out}");
        }
    }

    #[test]
    fn blend_truncates_like_fixed_point() {
        // (128 * 200 + 127 * 100) >> 8 = 38300 >> 8 = 149
        let out = blend_alpha(128, ColorArgb::from_xrgb(200, 200, 200), ColorArgb::from_xrgb(100, 100, 100));
        assert_eq!(out, ColorArgb::from_xrgb(149, 149, 149));
        // Full weight on white: 255 * 255 >> 8 = 254, never 255.
        let out = blend_alpha(255, ColorArgb::WHITE, ColorArgb::BLACK);
        assert_eq!(out.r(), 254);
        assert_eq!(out.a(), 0xFF);
    }

    #[test]
    fn flat_fills_first_sample_opaque() {
        let mut buffer = vec![ColorArgb::WHITE; 8];
        let mut ctx = InterpolationContext::new(&mut buffer, 4);
        ctx.lit_color[0] = ColorArgb::from_argb(0x10, 9, 8, 7);
        let written = shade_span(&mut FlatInterpolator::new(), &mut ctx, 1, 1..3);
        assert_eq!(written, 2);
        assert_eq!(buffer[5], ColorArgb::from_xrgb(9, 8, 7));
        assert_eq!(buffer[6], ColorArgb::from_xrgb(9, 8, 7));
        assert_eq!(buffer[4], ColorArgb::WHITE);
        assert_eq!(buffer[1], ColorArgb::WHITE);
    }

    #[test]
    fn span_blends_against_buffer() {
        let mut buffer = vec![ColorArgb::from_xrgb(0, 0, 200); 4];
        let mut ctx = InterpolationContext::new(&mut buffer, 4);
        ctx.lit_color[0] = ColorArgb::from_argb(128, 200, 0, 0);
        shade_span(&mut AlphaInterpolator::new(), &mut ctx, 0, 0..4);
        for px in &buffer {
            assert_eq!(*px, ColorArgb::from_xrgb(100, 0, 99));
        }
    }

    #[test]
    fn span_is_clipped() {
        let mut buffer = vec![ColorArgb::BLACK; 6];
        let mut ctx = InterpolationContext::new(&mut buffer, 3);
        ctx.lit_color[0] = ColorArgb::WHITE;
        let mut interp = FlatInterpolator::new();
        assert_eq!(shade_span(&mut interp, &mut ctx, 1, 2..10), 1);
        assert_eq!(shade_span(&mut interp, &mut ctx, 2, 0..3), 0);
        assert_eq!(shade_span(&mut interp, &mut ctx, 0, 3..3), 0);
        assert_eq!(buffer.iter().filter(|p| **p == ColorArgb::WHITE).count(), 1);
        assert_eq!(buffer[5], ColorArgb::WHITE);
    }

    #[test]
    fn span_interpolator_follows_material() {
        let mut material = Material::default();
        material.init();
        assert!(matches!(
            SpanInterpolator::for_material(&material),
            SpanInterpolator::Flat(_)
        ));
        material.alpha = 0x80;
        let mut interp = SpanInterpolator::for_material(&material);
        assert!(matches!(interp, SpanInterpolator::Alpha(_)));

        let mut buffer = vec![ColorArgb::BLACK; 1];
        let mut ctx = InterpolationContext::new(&mut buffer, 1);
        ctx.lit_color[0] = ColorArgb::from_argb(255, 255, 0, 0);
        shade_span(&mut interp, &mut ctx, 0, 0..1);
        assert_eq!(buffer[0], ColorArgb::from_xrgb(254, 0, 0));
    }
}
