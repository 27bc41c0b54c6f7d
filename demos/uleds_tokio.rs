//! Watching a userspace LED with tokio.

use uleds::{Config, Registrar};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "uleds::test0".to_owned());
    let led = Registrar::new(Config::default()).register_one(&name)?;
    println!("{} available at {}", led.name(), led.sysfs_path().display());

    let mut stream = led.into_brightness_stream()?;
    while let Some(brightness) = stream.next_brightness().await? {
        println!("Brightness {}", brightness);
    }
    Ok(())
}
