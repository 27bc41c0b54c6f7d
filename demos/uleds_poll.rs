// Registers two userspace LEDs and prints every brightness written to them.
// Generally this requires root. Try `echo 128 > /sys/class/leds/uleds::test0/brightness`.

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use uleds::{Config, Dedup, Error, Registrar};

const LED_NAMES: [&str; 2] = ["uleds::test0", "uleds::test1"];

extern "C" fn on_sigint(_: libc::c_int) {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // With a handler installed, Ctrl+C interrupts the wait instead of killing the process,
    // so the event loop gets to clean up.
    let action = SigAction::new(
        SigHandler::Handler(on_sigint),
        SaFlags::empty(),
        SigSet::empty(),
    );
    unsafe { sigaction(Signal::SIGINT, &action) }?;

    let config = Config::default().default_trigger(Some("utest0"));
    let leds = Registrar::new(config).register(LED_NAMES)?;
    for led in &leds {
        println!("{} available at {}", led.name(), led.sysfs_path().display());
    }

    match uleds::monitor(&leds, Dedup::Off, |obs| println!("{}", obs)) {
        Err(Error::ReadInterrupted) => {
            eprintln!("interrupted");
            drop(leds);
            std::process::exit(130)
        }
        Err(e) => Err(e.into()),
        Ok(never) => match never {},
    }
}
