use volition_common::ColorArgb;

/// Lit-color samples per primitive, one per vertex.
pub const LIT_COLOR_SAMPLES: usize = 3;

/// State the rasterizer shares with an interpolator while walking a span.
///
/// Lives for one scanline span. The rasterizer sets `x`/`y` and seeds
/// `pixel` before each `process_pixel`; the interpolator rewrites `pixel`,
/// and the rasterizer stores it into `buffer` afterwards.
#[derive(Debug)]
pub struct InterpolationContext<'a> {
    pub lit_color: [ColorArgb; LIT_COLOR_SAMPLES],
    pub pixel: ColorArgb,
    pub buffer: &'a mut [ColorArgb],
    pub buffer_pitch: usize,
    pub x: usize,
    pub y: usize,
}

impl<'a> InterpolationContext<'a> {
    pub fn new(buffer: &'a mut [ColorArgb], buffer_pitch: usize) -> Self {
        Self {
            lit_color: [ColorArgb::default(); LIT_COLOR_SAMPLES],
            pixel: ColorArgb::default(),
            buffer,
            buffer_pitch,
            x: 0,
            y: 0,
        }
    }

    /// Number of whole rows in the destination buffer.
    pub fn rows(&self) -> usize {
        if self.buffer_pitch == 0 {
            return 0;
        }
        self.buffer.len() / self.buffer_pitch
    }

    /// `y * pitch + x`.
    #[inline]
    pub fn buffer_index(&self) -> usize {
        self.y * self.buffer_pitch + self.x
    }

    /// Destination pixel under the current coordinates.
    #[inline]
    pub fn buffer_pixel(&self) -> ColorArgb {
        self.buffer[self.buffer_index()]
    }

    /// Store the current output pixel at the current coordinates.
    #[inline]
    pub fn store_pixel(&mut self) {
        let index = self.buffer_index();
        self.buffer[index] = self.pixel;
    }
}
