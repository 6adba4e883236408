use crate::alert;
use crate::data::*;
use crate::graphics::blend::Argb;

impl Program {
    pub fn eval_args(mut self, args: &mut dyn Iterator<Item = &String>) -> Self {
        let mut args = args.peekable();
        args.next();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quiet" => self.quiet = true,

                "--spread" => self.spread = true,

                "--hidden" => self.visible = false,

                "--resize" => self.resize = true,

                "--size" => {
                    let s = args
                        .next()
                        .expect("Argument error: Expected value for size.")
                        .split('x')
                        .map(|x| x.parse::<u16>().expect("Argument error: Invalid value"))
                        .collect::<Vec<_>>();

                    if s.len() != 2 {
                        panic!("Argument error: size must be WIDTHxHEIGHT.");
                    }

                    (self.win_w, self.win_h) = (s[0].min(MAX_WIDTH), s[1].min(MAX_HEIGHT));
                }

                "--scale" => {
                    let scale = args
                        .next()
                        .expect("Argument error: Expected u8 value for scale")
                        .parse::<u8>()
                        .expect("Argument error: Scale must be a positive integer");

                    if scale > MAX_SCALE_FACTOR {
                        panic!("Argument error: scale exceeds maximum allowed {MAX_SCALE_FACTOR}.");
                    }

                    if scale == 0 {
                        panic!("Argument error: scale needs to be larger than 0.");
                    }

                    self.scale = scale;
                }

                "--count" => {
                    let count = args
                        .next()
                        .expect("Argument error: Expected value for count.")
                        .parse::<usize>()
                        .expect("Argument error: Count must be a non-negative integer");

                    self.count = count.min(MAX_COUNT);
                }

                "--ease" => {
                    let ease = args
                        .next()
                        .expect("Argument error: Expected value for ease.")
                        .parse::<f32>()
                        .expect("Argument error: Invalid value.");

                    self.set_ease(ease);
                }

                "--fps" => {
                    let rate = args
                        .next()
                        .expect("Argument error: Expected value for refresh rate.")
                        .parse::<f32>()
                        .expect("Argument error: Invalid value.");

                    if rate <= 0.0 {
                        panic!("...What?");
                    }

                    self.refresh_rate_mode = RefreshRateMode::Specified;
                    self.change_fps_frac((rate * 1000.0) as u32);
                }

                "--color" => {
                    let color = args
                        .next()
                        .expect("Argument error: Expected hex value for color.");

                    self.color = parse_color(color);
                }

                _ => panic!("Argument error: unknown flag {}.", arg),
            }
        }

        self
    }

    pub fn print_startup_info(&self) {
        let mut string_out = String::new();

        string_out += "Welcome to Bubblevis!\n\
        Decorative bubble animation by khoidauminh (Cas Pascal on github)\n";

        string_out += "Startup configurations (may change):\n";

        string_out += &format!("Refresh rate: {}hz\n", self.milli_hz as f32 / 1000.0);

        string_out += &format!("Bubbles: {}\n", self.count);

        string_out += &format!("Ease divisor: {}\n", self.ease);

        string_out += &format!("Spread: {}\n", if self.spread { "on" } else { "off" });

        string_out += "\
        Controls: space spreads, v toggles visibility, -/= change the \
        bubble count, [/] change the easing, / resets.\n";

        self.print_message(string_out);

        if self.resize {
            alert!(
                "Note: resizing regenerates the bubbles, \
                positions are not carried over."
            );
        }

        {
            let w = self.win_w as u32;
            let h = self.win_h as u32;

            if self.resize || w * h > 700_000 {
                alert!(
                    "\
                Bubblevis renders on the CPU, it is not advised \
                to run it at a large size.\
                "
                );
            }
        }
    }
}

/// Parses `#rgb`, `#rrggbb`, `rgb` or `rrggbb` into an opaque ARGB color.
pub fn parse_color(s: &str) -> Argb {
    let hex = s.strip_prefix('#').unwrap_or(s);

    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => panic!("Argument error: color must be 3 or 6 hex digits."),
    };

    let rgb = u32::from_str_radix(&expanded, 16)
        .expect("Argument error: color must be hexadecimal.");

    0xFF_00_00_00 | rgb
}
