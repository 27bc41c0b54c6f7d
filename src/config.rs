use std::path::{Path, PathBuf};

/// Where the uleds control device lives on a stock system.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/uleds";
pub const DEFAULT_MAX_BRIGHTNESS: u32 = 255;

/// How the setup record reaches the driver.
///
/// The driver treats both the same way; `Write` exists for kernels or sandboxes where the
/// ioctl path is unavailable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SetupMethod {
    /// `ioctl(ULEDS_IOC_DEV_SETUP)`
    #[default]
    Ioctl,
    /// A single `write(2)` of the whole setup record.
    Write,
}

/// Settings shared by every LED a [`Registrar`](crate::Registrar) creates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    pub device_path: PathBuf,
    pub max_brightness: u32,
    /// Trigger to apply right after setup. `None` skips the step; an empty string clears it.
    pub default_trigger: Option<String>,
    pub setup_method: SetupMethod,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            device_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
            default_trigger: None,
            setup_method: SetupMethod::Ioctl,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_path(mut self, path: impl AsRef<Path>) -> Self {
        self.device_path = path.as_ref().to_path_buf();
        self
    }

    pub fn max_brightness(mut self, max_brightness: u32) -> Self {
        self.max_brightness = max_brightness;
        self
    }

    pub fn default_trigger<S: Into<String>>(mut self, trigger: Option<S>) -> Self {
        self.default_trigger = trigger.map(Into::into);
        self
    }

    pub fn setup_method(mut self, method: SetupMethod) -> Self {
        self.setup_method = method;
        self
    }
}
