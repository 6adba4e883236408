pub mod blend;
pub mod draw;

use blend::Argb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct P2(pub i32, pub i32);

/// Off-screen ARGB canvas the bubbles are stroked into. Presentation into
/// the window backbuffer happens through [`PixelBuffer::scale_to`].
pub struct PixelBuffer {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    background: Argb,
}

impl PixelBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![blend::TRANSPARENT; w * h],
            width: w,
            height: h,

            background: 0xFF_10_14_18,
        }
    }

    pub fn set_background(&mut self, bg: Argb) {
        self.background = bg;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn sizeu(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.buffer.fill(blend::TRANSPARENT);
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        let len = w * h;
        if len > self.buffer.len() {
            self.buffer.resize(len, blend::TRANSPARENT);
        }
        self.width = w;
        self.height = h;
    }

    pub fn pixel(&self, i: usize) -> Argb {
        self.buffer[i]
    }

    /// Blits the canvas into `dest`, magnified by `scale`, composited over
    /// the background color with the whole canvas faded by `opacity`
    /// (0 = fully hidden, 255 = fully shown).
    ///
    /// On Winit Wayland, resize increments aren't implemented, so the
    /// `dest_width` parameter is there to keep the horizontal lines aligned.
    pub fn scale_to(&self, scale: usize, dest: &mut [Argb], dest_width: Option<usize>, opacity: u8) {
        if self.width == 0 || scale == 0 {
            return;
        }

        let dst_width = dest_width.unwrap_or(self.width * scale);

        if dst_width == 0 {
            return;
        }

        for (sy, src_row) in self.buffer[..self.width * self.height]
            .chunks_exact(self.width)
            .enumerate()
        {
            for dy in 0..scale {
                let start = (sy * scale + dy) * dst_width;

                let Some(dst_row) = dest.get_mut(start..start + dst_width) else {
                    return;
                };

                src_row
                    .iter()
                    .cycle()
                    .zip(dst_row.chunks_mut(scale))
                    .for_each(|(src_pixel, dst_chunk)| {
                        dst_chunk.fill(blend::mix(self.background, blend::fade(*src_pixel, opacity)))
                    });
            }
        }
    }
}
