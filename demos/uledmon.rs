//! Creates a single userspace LED and prints a timestamped line each time its brightness
//! changes.
//!
//! Usage: uledmon <device-name> [default-trigger]
//!
//! Pressing Ctrl+C exits.

use nix::time::{clock_gettime, ClockId};
use uleds::{Config, Registrar};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(name) = args.next() else {
        eprintln!("Usage:\n    uledmon <device-name> [default-trigger]");
        std::process::exit(1);
    };
    let trigger = args.next();

    let config = Config::new().max_brightness(100).default_trigger(trigger);
    let led = Registrar::new(config).register_one(&name)?;

    loop {
        let Some(brightness) = led.read_brightness()? else {
            continue;
        };
        let ts = clock_gettime(ClockId::CLOCK_MONOTONIC)?;
        println!("[{}.{:09}] {}", ts.tv_sec(), ts.tv_nsec(), brightness);
    }
}
