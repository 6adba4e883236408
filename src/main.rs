mod bubbles;
mod data;
mod graphics;
mod math;
mod modes;

use data::Program;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let prog = Program::new().eval_args(&mut args.iter());

    modes::windowed_mode::winit_main(prog);
}
