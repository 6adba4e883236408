pub type Argb = u32;

pub type Mixer = fn(Argb, Argb) -> Argb;

pub const TRANSPARENT: Argb = 0x0;

pub fn decompose(c: Argb) -> [u8; 4] {
    c.to_be_bytes()
}

pub fn compose(channels: [u8; 4]) -> Argb {
    Argb::from_be_bytes(channels)
}

pub fn u8_mul(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16) / 255) as u8
}

/// Scales the alpha channel of `c` by `alpha`, leaving color intact.
pub fn fade(c: Argb, alpha: u8) -> Argb {
    let [a, r, g, b] = decompose(c);
    compose([u8_mul(a, alpha), r, g, b])
}

/// Source-over compositing of `top` onto `bottom`.
pub fn over(bottom: Argb, top: Argb) -> Argb {
    let [ab, rb, gb, bb] = decompose(bottom);
    let [at, rt, gt, bt] = decompose(top);

    if at == 255 {
        return top;
    }

    if at == 0 {
        return bottom;
    }

    let at = at as u32;
    let remainder = ab as u32 * (255 - at) / 255;
    let a = at + remainder;

    if a == 0 {
        return TRANSPARENT;
    }

    let channel = |cb: u8, ct: u8| -> u8 {
        ((ct as u32 * at + cb as u32 * remainder) / a) as u8
    };

    compose([a as u8, channel(rb, rt), channel(gb, gt), channel(bb, bt)])
}

/// Plain alpha-weighted replacement, cheaper than [`over`] and good enough
/// when the destination is known to be opaque (the window backbuffer).
pub fn mix(bottom: Argb, top: Argb) -> Argb {
    let [at, rt, gt, bt] = decompose(top);

    if at == 255 {
        return top;
    }

    if at == 0 {
        return bottom;
    }

    let [_, rb, gb, bb] = decompose(bottom);

    let channel = |cb: u8, ct: u8| -> u8 {
        let blended = ct as u16 * at as u16 + cb as u16 * (255 - at as u16);
        (blended / 255) as u8
    };

    compose([255, channel(rb, rt), channel(gb, gt), channel(bb, bt)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_keeps_opaque_top() {
        assert_eq!(over(0xFF_12_34_56, 0xFF_AB_CD_EF), 0xFF_AB_CD_EF);
    }

    #[test]
    fn over_keeps_bottom_under_transparent_top() {
        assert_eq!(over(0xFF_12_34_56, TRANSPARENT), 0xFF_12_34_56);
    }

    #[test]
    fn fade_scales_alpha_only() {
        let c = fade(0xFF_00_77_AA, 128);
        let [a, r, g, b] = decompose(c);
        assert_eq!((r, g, b), (0x00, 0x77, 0xAA));
        assert!(a < 0xFF);
    }

    #[test]
    fn mix_is_opaque() {
        let c = mix(0xFF_00_00_00, 0x80_FF_FF_FF);
        assert_eq!(decompose(c)[0], 255);
    }
}
