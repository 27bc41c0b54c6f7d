#![cfg(feature = "device-test")]

// These talk to the real driver: they need the uleds module loaded and root.

use std::fs;
use std::io::Write;
use std::thread;
use std::time::Duration;

use uleds::{
    Config, ControlOp, Dedup, Error, EventLoop, Observation, Registrar, SetupMethod, SetupRecord,
};

fn write_sysfs_brightness(led: &uleds::Registration, value: u32) -> std::io::Result<()> {
    fs::write(led.sysfs_path().join("brightness"), value.to_string())
}

fn settle() {
    // Give udev a moment to create the class device before touching sysfs.
    thread::sleep(Duration::from_millis(100));
}

#[test]
pub fn test_register_two_leds() -> Result<(), Box<dyn std::error::Error>> {
    let leds = Registrar::new(Config::default()).register(["uleds::test0", "uleds::test1"])?;
    settle();

    assert_eq!(leds.len(), 2);
    assert_eq!(leds[0].name(), "uleds::test0");
    assert_eq!(leds[1].name(), "uleds::test1");
    for led in &leds {
        assert!(led.sysfs_path().exists());
        let max = fs::read_to_string(led.sysfs_path().join("max_brightness"))?;
        assert_eq!(max.trim(), "255");
    }
    Ok(())
}

#[test]
pub fn test_brightness_write_is_observed() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default().setup_method(SetupMethod::Write);
    let leds = Registrar::new(config).register(["uleds::test2", "uleds::test3"])?;
    settle();

    let mut event_loop = EventLoop::with_epoll(&leds, Dedup::Off)?;
    // A freshly registered LED reports its initial brightness once.
    let initial = event_loop.wait()?;
    assert!(initial.iter().all(|obs| obs.brightness.value() == 0));
    if initial.len() < 2 {
        event_loop.wait()?;
    }

    write_sysfs_brightness(&leds[0], 128)?;
    assert_eq!(
        event_loop.wait()?,
        vec![Observation::new("uleds::test2", 128)]
    );
    Ok(())
}

#[test]
pub fn test_second_setup_is_busy() -> Result<(), Box<dyn std::error::Error>> {
    let led = Registrar::new(Config::default()).register_one("uleds::test4")?;

    let again = SetupRecord::new("uleds::test4b", 1).to_bytes();
    let err = led.file().write(&again).unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EBUSY));
    Ok(())
}

#[test]
pub fn test_invalid_setup_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let cases = [
        (Config::default(), "uleds/bad"),
        (Config::default().max_brightness(0), "uleds::test6"),
    ];
    for (config, name) in cases {
        match Registrar::new(config).register_one(name) {
            Err(err @ Error::ControlOperation { op: ControlOp::DevSetup, .. }) => {
                assert_eq!(err.errno(), Some(libc::EINVAL))
            }
            other => panic!("expected a rejected setup for {:?}, got {:?}", name, other),
        }
    }
    Ok(())
}

#[test]
pub fn test_invalid_trigger_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default().default_trigger(Some("not a trigger!"));
    match Registrar::new(config).register_one("uleds::test5") {
        Err(err @ Error::ControlOperation { op: ControlOp::SetDefaultTrigger, .. }) => {
            assert_eq!(err.errno(), Some(libc::EINVAL))
        }
        other => panic!("expected a rejected trigger, got {:?}", other),
    }
    Ok(())
}
