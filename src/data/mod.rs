pub mod config;
pub mod log;

use std::cmp::Ordering;
use std::f32::consts::PI;
use std::time::Duration;

use crate::bubbles::{BubbleField, LINE_WIDTH};
use crate::graphics::{blend, blend::Argb, PixelBuffer, P2};

pub const DEFAULT_COUNT: usize = 8;
pub const MAX_COUNT: usize = 64;

/// Easing divisor: each frame a bubble covers 1/ease of the distance left
/// to its target. Larger = slower convergence.
pub const DEFAULT_EASE: f32 = 60.0;
pub const MIN_EASE: f32 = 1.0;
pub const MAX_EASE: f32 = 600.0;

/// #07a, the dashboard accent blue.
pub const DEFAULT_COLOR: Argb = 0xFF_00_77_AA;

pub const DEFAULT_SIZE_WIN: u16 = 300;
pub const DEFAULT_WIN_SCALE: u8 = 1;
pub const MAX_SCALE_FACTOR: u8 = 8;

pub const MAX_WIDTH: u16 = 1920;
pub const MAX_HEIGHT: u16 = 1080;

pub const DEFAULT_MILLI_HZ: u32 = 60 * 1000;
pub const CAP_MILLI_HZ: u32 = 144 * 1000;

/// Opacity change per frame during show/hide and reconfiguration fades.
/// 16/frame is roughly a 300ms transition at 60hz.
pub const FADE_STEP: u8 = 16;

/// Alpha of the first and second flourish arc, standing in for the
/// thinner stroke widths of the decorative lines.
const FLOURISH_ALPHA: [u8; 2] = [170, 110];

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum RefreshRateMode {
    Sync,
    Specified,
}

/// Owner of the whole widget state: the bubble field, the canvas, the
/// presentation flags and the frame cadence parameters. All mutation
/// happens on the event-loop thread.
pub struct Program {
    quiet: bool,

    scale: u8,

    /// Allow window resizing.
    resize: bool,

    /// Host occlusion, distinct from the widget's own `visible` flag.
    hidden: bool,

    visible: bool,
    spread: bool,
    ease: f32,
    count: usize,
    color: Argb,

    /// Whole-canvas opacity, ramped toward 255 when shown and toward 0
    /// when hidden or awaiting a field rebuild.
    opacity: u8,

    /// Count waiting to be applied once the canvas has faded out.
    pending_count: Option<usize>,

    /// Set after the first successful `load`; reconfiguration is a no-op
    /// before that.
    loaded: bool,

    pub pix: PixelBuffer,

    field: BubbleField,

    milli_hz: u32,
    refresh_rate_mode: RefreshRateMode,
    refresh_rate: Duration,

    win_w: u16,
    win_h: u16,
}

impl Program {
    pub fn new() -> Self {
        let rate = Duration::from_nanos(1_000_000_000_000 / DEFAULT_MILLI_HZ as u64);

        Self {
            quiet: false,
            scale: DEFAULT_WIN_SCALE,
            resize: false,

            hidden: false,
            visible: true,
            spread: false,
            ease: DEFAULT_EASE,
            count: DEFAULT_COUNT,
            color: DEFAULT_COLOR,

            opacity: 0,
            pending_count: None,
            loaded: false,

            pix: PixelBuffer::new(DEFAULT_SIZE_WIN as usize, DEFAULT_SIZE_WIN as usize),

            field: BubbleField::generate(0.0, 0.0, 0),

            milli_hz: DEFAULT_MILLI_HZ,
            refresh_rate_mode: RefreshRateMode::Sync,
            refresh_rate: rate,

            win_w: DEFAULT_SIZE_WIN,
            win_h: DEFAULT_SIZE_WIN,
        }
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_resizable(&self) -> bool {
        self.resize
    }

    pub fn set_hidden(&mut self, b: bool) {
        self.hidden = b;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_spread(&self) -> bool {
        self.spread
    }

    pub fn count(&self) -> usize {
        self.pending_count.unwrap_or(self.count)
    }

    pub fn ease(&self) -> f32 {
        self.ease
    }

    pub fn color(&self) -> Argb {
        self.color
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn field(&self) -> &BubbleField {
        &self.field
    }

    pub fn win_size(&self) -> (u16, u16) {
        (self.win_w, self.win_h)
    }

    pub fn milli_hz(&self) -> u32 {
        self.milli_hz
    }

    pub fn rr_mode(&self) -> RefreshRateMode {
        self.refresh_rate_mode
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_rate
    }

    pub fn change_fps_frac(&mut self, milli_hz: u32) {
        self.milli_hz = milli_hz.max(1);
        self.refresh_rate = Duration::from_nanos(1_000_000_000_000 / self.milli_hz as u64);
    }

    /// Sizes the canvas to the current window box and generates a fresh
    /// bubble field. Safe to call repeatedly; every call replaces the
    /// previous generation wholesale.
    pub fn load(&mut self) {
        let scale = self.scale as usize;
        let w = (self.win_w as usize / scale).max(1);
        let h = (self.win_h as usize / scale).max(1);

        self.pix.resize(w, h);
        self.field = BubbleField::generate(w as f32, h as f32, self.count);
        self.pending_count = None;
        self.loaded = true;
    }

    pub fn update_size(&mut self, s: (u16, u16)) {
        self.win_w = s.0.min(MAX_WIDTH);
        self.win_h = s.1.min(MAX_HEIGHT);
        self.load();
    }

    /// Requests a bubble-count change. The actual rebuild is deferred to
    /// `update_frame`: the canvas fades out first, then the field is
    /// swapped between frames. No-op before the first `load`.
    pub fn set_count(&mut self, count: usize) {
        let count = count.min(MAX_COUNT);

        if !self.loaded {
            self.count = count;
            return;
        }

        if count == self.count && self.pending_count.is_none() {
            return;
        }

        self.pending_count = Some(count);
    }

    pub fn increase_count(&mut self) {
        self.set_count(self.count().saturating_add(1));
    }

    pub fn decrease_count(&mut self) {
        self.set_count(self.count().saturating_sub(1));
    }

    pub fn set_ease(&mut self, ease: f32) {
        self.ease = ease.clamp(MIN_EASE, MAX_EASE);
    }

    pub fn increase_ease(&mut self) {
        self.set_ease(self.ease * 1.2);
    }

    pub fn decrease_ease(&mut self) {
        self.set_ease(self.ease / 1.2);
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle_spread(&mut self) {
        self.spread = !self.spread;
    }

    pub fn to_corners(&mut self) {
        self.spread = true;
    }

    pub fn back_in(&mut self) {
        self.spread = false;
    }

    pub fn reset_parameters(&mut self) {
        self.ease = DEFAULT_EASE;
        self.spread = false;
        self.visible = true;
    }

    fn fade_target(&self) -> u8 {
        if self.visible && self.pending_count.is_none() {
            255
        } else {
            0
        }
    }

    fn advance_fade(&mut self) {
        let target = self.fade_target();

        self.opacity = match self.opacity.cmp(&target) {
            Ordering::Less => self.opacity.saturating_add(FADE_STEP).min(target),
            Ordering::Greater => self.opacity.saturating_sub(FADE_STEP).max(target),
            Ordering::Equal => self.opacity,
        };
    }

    /// One frame of widget logic: advance the fade ramp, apply a pending
    /// field rebuild if the canvas is fully faded, then step every bubble.
    ///
    /// The field swap only ever happens here, between frames. The previous
    /// generation is dropped whole; nothing can still be stepping it.
    pub fn update_frame(&mut self) {
        self.advance_fade();

        if self.opacity == 0 {
            if let Some(count) = self.pending_count.take() {
                self.count = count;
                self.load();
            }
        }

        self.field.step(self.spread, self.ease);
    }

    /// Strokes the current field into the canvas: per bubble an outer ring
    /// plus two partial arcs rotating with it.
    pub fn render(&mut self) {
        self.pix.clear();

        let color = self.color;

        for bubble in self.field.bubbles() {
            let center = P2(bubble.pos.x.round() as i32, bubble.pos.y.round() as i32);
            let radius = bubble.radius();
            let angle = bubble.angle.to_radians();

            self.pix
                .stroke_circle(center, radius, LINE_WIDTH as u32, color, blend::over);

            self.pix.stroke_arc(
                center,
                radius - LINE_WIDTH,
                angle,
                0.8 * PI,
                blend::fade(color, FLOURISH_ALPHA[0]),
                blend::over,
            );

            self.pix.stroke_arc(
                center,
                radius - LINE_WIDTH * 2.0,
                angle + 25.0f32.to_radians(),
                0.5 * PI,
                blend::fade(color, FLOURISH_ALPHA[1]),
                blend::over,
            );
        }
    }

    pub fn print_message(&self, message: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        use std::io::Write;

        print!("{}", message.as_ref());
        let _ = std::io::stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_program() -> Program {
        let mut prog = Program::new();
        prog.update_size((100, 100));
        prog
    }

    fn settle_fade(prog: &mut Program) {
        for _ in 0..64 {
            prog.update_frame();
        }
    }

    #[test]
    fn set_count_before_load_only_records() {
        let mut prog = Program::new();
        prog.set_count(3);
        assert_eq!(prog.count(), 3);
        assert!(prog.field().is_empty());
    }

    #[test]
    fn count_change_fades_out_then_swaps_once() {
        let mut prog = loaded_program();
        settle_fade(&mut prog);
        assert_eq!(prog.opacity(), 255);
        assert_eq!(prog.field().len(), DEFAULT_COUNT);

        prog.set_count(3);

        // fading out; the old field must stay installed until opacity
        // reaches zero
        prog.update_frame();
        assert!(prog.opacity() < 255);
        assert_eq!(prog.field().len(), DEFAULT_COUNT);

        settle_fade(&mut prog);

        assert_eq!(prog.field().len(), 3);
        assert_eq!(prog.count(), 3);
        assert_eq!(prog.field().corners().len(), 8);
        // faded back in, nothing pending
        assert_eq!(prog.opacity(), 255);
    }

    #[test]
    fn redundant_count_change_is_ignored() {
        let mut prog = loaded_program();
        settle_fade(&mut prog);

        prog.set_count(DEFAULT_COUNT);
        prog.update_frame();
        assert_eq!(prog.opacity(), 255);
    }

    #[test]
    fn hide_and_show_ramp_opacity() {
        let mut prog = loaded_program();
        settle_fade(&mut prog);

        prog.hide();
        settle_fade(&mut prog);
        assert_eq!(prog.opacity(), 0);

        prog.show();
        settle_fade(&mut prog);
        assert_eq!(prog.opacity(), 255);
    }

    #[test]
    fn hidden_widget_keeps_animating() {
        let mut prog = loaded_program();
        settle_fade(&mut prog);
        prog.hide();
        settle_fade(&mut prog);

        let angles: Vec<f32> = prog.field().bubbles().iter().map(|b| b.angle).collect();
        prog.update_frame();

        for (b, old) in prog.field().bubbles().iter().zip(angles) {
            assert_ne!(b.angle, old);
        }
    }

    #[test]
    fn spread_controls() {
        let mut prog = Program::new();
        assert!(!prog.is_spread());

        prog.to_corners();
        assert!(prog.is_spread());

        prog.back_in();
        assert!(!prog.is_spread());

        prog.toggle_spread();
        assert!(prog.is_spread());
    }

    #[test]
    fn visibility_controls() {
        let mut prog = Program::new();
        assert!(prog.is_visible());

        prog.hide();
        assert!(!prog.is_visible());

        prog.show();
        assert!(prog.is_visible());

        prog.toggle();
        assert!(!prog.is_visible());
    }

    #[test]
    fn ease_is_clamped() {
        let mut prog = Program::new();

        prog.set_ease(0.0);
        assert_eq!(prog.ease(), MIN_EASE);

        prog.set_ease(1.0e9);
        assert_eq!(prog.ease(), MAX_EASE);
    }

    #[test]
    fn render_paints_bubbles() {
        let mut prog = loaded_program();
        settle_fade(&mut prog);
        prog.render();

        let (w, h) = prog.pix.sizeu();
        let lit = (0..w * h).filter(|&i| prog.pix.pixel(i) != 0).count();
        assert!(lit > 0);
    }
}
