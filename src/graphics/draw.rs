use std::f32::consts::TAU;

use super::{
    blend::{Argb, Mixer},
    PixelBuffer, P2,
};

impl PixelBuffer {
    pub fn set_pixel_xy(&mut self, p: P2, c: Argb, b: Mixer) {
        if p.0 < 0 || p.1 < 0 || p.0 >= self.width() as i32 || p.1 >= self.height() as i32 {
            return;
        }

        let i = p.1 as usize * self.width() + p.0 as usize;
        self.buffer[i] = b(self.buffer[i], c);
    }

    /// Strokes a one-pixel-wide arc of `sweep` radians starting at `start`,
    /// sampled densely enough that no gaps appear at the given radius.
    /// Angles follow canvas convention: clockwise from the positive x axis.
    pub fn stroke_arc(&mut self, center: P2, radius: f32, start: f32, sweep: f32, c: Argb, b: Mixer) {
        if radius < 0.5 {
            return;
        }

        let steps = ((radius * sweep.abs()).ceil() as usize * 2).max(8);

        for i in 0..=steps {
            let angle = start + sweep * i as f32 / steps as f32;
            let (sin, cos) = angle.sin_cos();

            let p = P2(
                center.0 + (cos * radius).round() as i32,
                center.1 + (sin * radius).round() as i32,
            );

            self.set_pixel_xy(p, c, b);
        }
    }

    /// Full-circle outline with a stroke `thickness` pixels wide, centered
    /// on the nominal radius.
    pub fn stroke_circle(&mut self, center: P2, radius: f32, thickness: u32, c: Argb, b: Mixer) {
        let half = thickness as f32 / 2.0;
        let mut r = radius - half;

        while r <= radius + half {
            self.stroke_arc(center, r.max(0.5), 0.0, TAU, c, b);
            r += 0.5;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::blend;

    fn lit_pixels(pix: &PixelBuffer) -> usize {
        let (w, h) = pix.sizeu();
        (0..w * h).filter(|&i| pix.pixel(i) != 0).count()
    }

    #[test]
    fn plot_outside_bounds_is_ignored() {
        let mut pix = PixelBuffer::new(4, 4);
        pix.set_pixel_xy(P2(-1, 0), 0xFF_FF_FF_FF, blend::over);
        pix.set_pixel_xy(P2(0, 9), 0xFF_FF_FF_FF, blend::over);
        assert_eq!(lit_pixels(&pix), 0);
    }

    #[test]
    fn circle_stays_on_its_ring() {
        let mut pix = PixelBuffer::new(41, 41);
        pix.stroke_circle(P2(20, 20), 10.0, 1, 0xFF_FF_FF_FF, blend::over);

        assert!(lit_pixels(&pix) > 0);

        for y in 0..41i32 {
            for x in 0..41i32 {
                if pix.pixel(y as usize * 41 + x as usize) == 0 {
                    continue;
                }
                let dx = (x - 20) as f32;
                let dy = (y - 20) as f32;
                let dist = (dx * dx + dy * dy).sqrt();
                assert!((dist - 10.0).abs() < 1.5, "stray pixel at {x},{y}");
            }
        }
    }

    #[test]
    fn partial_arc_lights_fewer_pixels_than_full_circle() {
        let mut full = PixelBuffer::new(41, 41);
        full.stroke_arc(P2(20, 20), 10.0, 0.0, std::f32::consts::TAU, 0xFF_FF_FF_FF, blend::over);

        let mut part = PixelBuffer::new(41, 41);
        part.stroke_arc(P2(20, 20), 10.0, 0.0, 0.8 * std::f32::consts::PI, 0xFF_FF_FF_FF, blend::over);

        assert!(lit_pixels(&part) < lit_pixels(&full));
    }

    #[test]
    fn zero_radius_draws_nothing() {
        let mut pix = PixelBuffer::new(8, 8);
        pix.stroke_arc(P2(4, 4), 0.0, 0.0, 1.0, 0xFF_FF_FF_FF, blend::over);
        assert_eq!(lit_pixels(&pix), 0);
    }
}
