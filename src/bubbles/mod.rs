//! The animation model: a batch of bubbles oscillating inside a canvas,
//! each cycling its diameter and rotation while its center eases toward
//! either its birth position or an assigned corner target.

use crate::math::{rng, Vec2};

pub const CANVAS_PADDING: f32 = 10.0;
pub const LINE_WIDTH: f32 = 3.0;

/// Initial diameters are drawn from `[DIAMETER_MIN, DIAMETER_MIN + DIAMETER_SPAN)`.
pub const DIAMETER_MIN: f32 = 25.0;
pub const DIAMETER_SPAN: f32 = 35.0;

/// Diameter change per frame while pulsing.
pub const GROW_STEP: f32 = 0.1;

/// Rotation change per frame, in degrees.
pub const SPIN_STEP: f32 = 1.0;

/// Four rectangle corners plus four edge midpoints.
pub const CORNER_COUNT: usize = 8;

// Initial angles land in [1, 220] rather than the full circle. Kept narrow
// on purpose: the flourish arcs read better when they start off-axis.
const INITIAL_ANGLE_SPAN: f32 = 220.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Growth {
    Out,
    In,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spin {
    Forward,
    Backward,
}

#[derive(Debug, Clone)]
pub struct Bubble {
    pub pos: Vec2,
    /// Birth position the bubble eases back to when not spread.
    pub origin: Vec2,
    pub diameter: f32,
    pub min_diameter: f32,
    pub max_diameter: f32,
    pub growth: Growth,
    /// Degrees, kept within [0, 360].
    pub angle: f32,
    pub spin: Spin,
}

impl Bubble {
    /// Generates one bubble placed so that it fits inside the canvas even
    /// at full expansion, `inset` pixels away from every border.
    fn generate(width: f32, height: f32, inset: f32) -> Self {
        let d = (rng::random_float(DIAMETER_SPAN) + DIAMETER_MIN).floor();
        let reach = (d + inset) * 1.1;

        let x = (rng::random_float(width - reach - inset) + reach).floor() - d / 2.0;
        let y = (rng::random_float(height - reach - inset) + reach).floor() - d / 2.0;

        let swing = d / 10.0;

        Self {
            pos: Vec2::new(x, y),
            origin: Vec2::new(x, y),
            diameter: d,
            min_diameter: (d - swing).max(0.0),
            max_diameter: d + swing,
            growth: Growth::Out,
            angle: rng::random_float(INITIAL_ANGLE_SPAN).floor() + 1.0,
            spin: if rng::random_bool() {
                Spin::Forward
            } else {
                Spin::Backward
            },
        }
    }

    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }

    /// One diameter cycle step. The diameter is clamped to its bounds and
    /// the growth direction flips only once per bound crossing.
    fn pulse(&mut self) {
        match self.growth {
            Growth::Out => {
                if self.diameter < self.max_diameter {
                    self.diameter = (self.diameter + GROW_STEP).min(self.max_diameter);
                } else {
                    self.growth = Growth::In;
                }
            }
            Growth::In => {
                if self.diameter > self.min_diameter {
                    self.diameter = (self.diameter - GROW_STEP).max(self.min_diameter);
                } else {
                    self.growth = Growth::Out;
                }
            }
        }
    }

    /// One rotation step. Wraps at the 0/360 boundary without changing
    /// the spin direction.
    fn rotate(&mut self) {
        match self.spin {
            Spin::Forward => {
                self.angle += SPIN_STEP;
                if self.angle > 360.0 {
                    self.angle = 0.0;
                }
            }
            Spin::Backward => {
                self.angle -= SPIN_STEP;
                if self.angle < 0.0 {
                    self.angle = 360.0;
                }
            }
        }
    }
}

/// One generation of bubbles plus the corner targets they spread to.
/// A count or size change discards the whole field and builds a new one;
/// individual bubbles are never added or removed in place.
pub struct BubbleField {
    bubbles: Vec<Bubble>,
    corners: [Vec2; CORNER_COUNT],
}

impl BubbleField {
    pub fn generate(width: f32, height: f32, count: usize) -> Self {
        let inset = CANVAS_PADDING + LINE_WIDTH;

        let mut bubbles = Vec::with_capacity(count);
        let mut largest: f32 = 0.0;

        for _ in 0..count {
            let bubble = Bubble::generate(width, height, inset);
            largest = largest.max(bubble.diameter);
            bubbles.push(bubble);
        }

        // Corner targets sit one maximal radius plus the inset away from
        // the borders so a fully grown bubble never clips.
        let pad = (largest / 2.0 + inset).floor();

        let corners = [
            Vec2::new(pad, pad),
            Vec2::new(width - pad, pad),
            Vec2::new(width - pad, height - pad),
            Vec2::new(pad, height - pad),
            Vec2::new(pad, height / 2.0),
            Vec2::new(width / 2.0, pad),
            Vec2::new(width - pad, height / 2.0),
            Vec2::new(width / 2.0, height - pad),
        ];

        Self { bubbles, corners }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn corners(&self) -> &[Vec2; CORNER_COUNT] {
        &self.corners
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// The point the bubble at `index` is currently easing toward:
    /// its round-robin corner when spread, its origin otherwise.
    pub fn target_of(&self, index: usize, spread: bool) -> Vec2 {
        if spread {
            self.corners[index % CORNER_COUNT]
        } else {
            self.bubbles[index].origin
        }
    }

    /// Advances every bubble by one frame: pulse, rotate, then ease the
    /// center toward its current target by `1/ease` of the remaining
    /// distance.
    pub fn step(&mut self, spread: bool, ease: f32) {
        for i in 0..self.bubbles.len() {
            let target = self.target_of(i, spread);

            let bubble = &mut self.bubbles[i];
            bubble.pulse();
            bubble.rotate();
            bubble.pos = bubble.pos.ease_toward(target, ease);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASE: f32 = 60.0;

    fn test_bubble() -> Bubble {
        Bubble {
            pos: Vec2::new(50.0, 50.0),
            origin: Vec2::new(50.0, 50.0),
            diameter: 40.0,
            min_diameter: 36.0,
            max_diameter: 44.0,
            growth: Growth::Out,
            angle: 100.0,
            spin: Spin::Forward,
        }
    }

    #[test]
    fn diameter_stays_within_bounds() {
        let mut b = test_bubble();
        let mut flips = 0;
        let mut last_growth = b.growth;

        for _ in 0..10_000 {
            b.pulse();

            assert!(
                b.diameter >= b.min_diameter && b.diameter <= b.max_diameter,
                "diameter {} escaped [{}, {}]",
                b.diameter,
                b.min_diameter,
                b.max_diameter
            );

            if b.growth != last_growth {
                // a flip may only happen at a bound
                let at_bound = b.diameter >= b.max_diameter - GROW_STEP
                    || b.diameter <= b.min_diameter + GROW_STEP;
                assert!(at_bound);
                flips += 1;
                last_growth = b.growth;
            }
        }

        assert!(flips > 1, "bubble never cycled");
    }

    #[test]
    fn rotation_wraps_without_changing_spin() {
        let mut b = test_bubble();
        b.angle = 359.5;
        b.spin = Spin::Forward;

        for _ in 0..720 {
            b.rotate();
            assert!((0.0..=360.0).contains(&b.angle));
            assert_eq!(b.spin, Spin::Forward);
        }

        b.spin = Spin::Backward;
        b.angle = 0.5;

        for _ in 0..720 {
            b.rotate();
            assert!((0.0..=360.0).contains(&b.angle));
            assert_eq!(b.spin, Spin::Backward);
        }
    }

    #[test]
    fn generate_produces_requested_count_and_eight_corners() {
        for count in [0, 1, 8, 23] {
            let field = BubbleField::generate(300.0, 300.0, count);
            assert_eq!(field.len(), count);
            assert_eq!(field.corners().len(), CORNER_COUNT);
        }
    }

    #[test]
    fn spread_closes_in_on_assigned_corner() {
        let mut field = BubbleField::generate(300.0, 300.0, 8);

        let mut dists: Vec<f32> = (0..field.len())
            .map(|i| field.bubbles()[i].pos.distance(field.target_of(i, true)))
            .collect();

        for _ in 0..500 {
            field.step(true, EASE);

            for i in 0..field.len() {
                let d = field.bubbles()[i].pos.distance(field.target_of(i, true));
                assert!(d < dists[i] || d < 1.0e-3);
                dists[i] = d;
            }
        }

        for d in dists {
            assert!(d < 10.0, "bubble still {d} away from its corner");
        }
    }

    #[test]
    fn unspreading_eases_back_toward_origin() {
        let mut field = BubbleField::generate(300.0, 300.0, 4);

        for _ in 0..200 {
            field.step(true, EASE);
        }

        let before: Vec<f32> = field
            .bubbles()
            .iter()
            .map(|b| b.pos.distance(b.origin))
            .collect();

        field.step(false, EASE);

        for (b, before) in field.bubbles().iter().zip(before) {
            let after = b.pos.distance(b.origin);
            assert!(after < before || after < 1.0e-3);
        }
    }

    #[test]
    fn single_bubble_end_to_end() {
        let mut field = BubbleField::generate(100.0, 100.0, 1);
        assert_eq!(field.len(), 1);

        let b = &field.bubbles()[0];
        let inset = CANVAS_PADDING + LINE_WIDTH;

        assert!(b.pos.x - b.radius() >= 0.0 && b.pos.x + b.radius() <= 100.0 + inset);
        assert!(b.pos.y - b.radius() >= 0.0 && b.pos.y + b.radius() <= 100.0 + inset);

        let initial = b.diameter;
        assert!(b.min_diameter >= initial - initial / 10.0 - 1.0e-3);
        assert!(b.max_diameter <= initial + initial / 10.0 + 1.0e-3);

        // With spread off and the bubble at its origin, stepping must keep
        // it pinned there while the pulse cycle runs.
        let origin = b.origin;
        for _ in 0..10 {
            field.step(false, EASE);
            let b = &field.bubbles()[0];
            assert!(b.pos.distance(origin) < 1.0e-3);
            assert!(b.diameter >= b.min_diameter && b.diameter <= b.max_diameter);
        }
    }

    #[test]
    fn corner_assignment_is_round_robin() {
        let field = BubbleField::generate(300.0, 300.0, 12);

        for i in 0..field.len() {
            assert_eq!(field.target_of(i, true), field.corners()[i % CORNER_COUNT]);
        }
    }
}
