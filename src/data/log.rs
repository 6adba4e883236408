//! Terminal message helpers. Runtime chatter goes through
//! `Program::print_message` so `--quiet` can silence it; these macros are
//! for warnings that should stand out regardless.

#[macro_export]
macro_rules! format_red {
    ($arg:tt) => {
        format!("\x1B[31;1m{}\x1B[0m", $arg)
    };
}

#[macro_export]
macro_rules! alert {
    ($arg:tt) => {
        eprintln!("\x1B[33;1m{}\x1B[0m", $arg)
    };
}
