use std::{
    sync::Mutex,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

// Xorshift state, lazily seeded from the clock on first use.
static STATE: Mutex<u32> = Mutex::new(0);

fn next() -> u32 {
    let mut state = STATE.lock().unwrap_or_else(|e| e.into_inner());

    if *state == 0 {
        *state = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(1))
            .subsec_nanos()
            | 1;
    }

    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;

    x
}

pub fn random_int(bound: u32) -> u32 {
    if bound == 0 {
        return 0;
    }

    next() % bound
}

pub fn random_float(bound: f32) -> f32 {
    next() as f32 / u32::MAX as f32 * bound
}

pub fn random_bool() -> bool {
    next() & 1 == 1
}
