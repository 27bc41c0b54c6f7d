//! Fixed-layout records exchanged with the uleds driver.
//!
//! All multi-byte fields use the host's native byte order, as the kernel reads and writes them
//! straight out of its own structs.
//!
//! | record     | offset | size | field            |
//! |------------|--------|------|------------------|
//! | setup      | 0      | 64   | `name`           |
//! | setup      | 64     | 4    | `max_brightness` |
//! | trigger    | 0      | 64   | `name`           |
//! | brightness | 0      | 4    | `brightness`     |

use std::array::TryFromSliceError;
use std::fmt;

use crate::sys::{uleds_user_dev, uleds_user_trigger};

/// Size of the name field of a setup record, including the terminating nul.
pub const LED_MAX_NAME_SIZE: usize = 64;
/// Size of the name field of a trigger record, including the terminating nul.
pub const TRIGGER_MAX_NAME_SIZE: usize = 64;

pub const SETUP_RECORD_SIZE: usize = LED_MAX_NAME_SIZE + 4;
pub const TRIGGER_RECORD_SIZE: usize = TRIGGER_MAX_NAME_SIZE;
pub const BRIGHTNESS_RECORD_SIZE: usize = 4;

/// Copies `name` into a zeroed buffer, keeping at most `N - 1` bytes so the field stays
/// nul-terminated. Longer names are cut off at that byte, even inside a UTF-8 sequence.
pub(crate) fn encode_name<const N: usize>(name: &str) -> [u8; N] {
    let mut buf = [0u8; N];
    let bytes = name.as_bytes();
    let len = bytes.len().min(N - 1);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf
}

fn name_field(buf: &[u8]) -> &[u8] {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    &buf[..end]
}

/// The record that registers an LED: its name and the highest brightness it accepts.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct SetupRecord(pub(crate) uleds_user_dev);

impl SetupRecord {
    pub fn new(name: &str, max_brightness: u32) -> Self {
        Self(uleds_user_dev {
            name: encode_name(name),
            max_brightness,
        })
    }

    /// The name bytes up to (not including) the first nul.
    pub fn name(&self) -> &[u8] {
        name_field(&self.0.name)
    }

    pub fn max_brightness(&self) -> u32 {
        self.0.max_brightness
    }

    pub fn to_bytes(&self) -> [u8; SETUP_RECORD_SIZE] {
        let mut buf = [0u8; SETUP_RECORD_SIZE];
        buf[..LED_MAX_NAME_SIZE].copy_from_slice(&self.0.name);
        buf[LED_MAX_NAME_SIZE..].copy_from_slice(&self.0.max_brightness.to_ne_bytes());
        buf
    }

    pub fn from_bytes(buf: &[u8; SETUP_RECORD_SIZE]) -> Self {
        let mut name = [0u8; LED_MAX_NAME_SIZE];
        name.copy_from_slice(&buf[..LED_MAX_NAME_SIZE]);
        let mut max_brightness = [0u8; 4];
        max_brightness.copy_from_slice(&buf[LED_MAX_NAME_SIZE..]);
        Self(uleds_user_dev {
            name,
            max_brightness: u32::from_ne_bytes(max_brightness),
        })
    }
}

impl TryFrom<&[u8]> for SetupRecord {
    type Error = TryFromSliceError;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        <&[u8; SETUP_RECORD_SIZE]>::try_from(buf).map(Self::from_bytes)
    }
}

impl fmt::Debug for SetupRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SetupRecord")
            .field("name", &String::from_utf8_lossy(self.name()))
            .field("max_brightness", &self.max_brightness())
            .finish()
    }
}

/// The record naming the trigger an LED starts out with.
///
/// An empty name clears a previously set default trigger.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct TriggerRecord(pub(crate) uleds_user_trigger);

impl TriggerRecord {
    pub fn new(name: &str) -> Self {
        Self(uleds_user_trigger {
            name: encode_name(name),
        })
    }

    pub fn name(&self) -> &[u8] {
        name_field(&self.0.name)
    }

    pub fn to_bytes(&self) -> [u8; TRIGGER_RECORD_SIZE] {
        self.0.name
    }

    pub fn from_bytes(buf: &[u8; TRIGGER_RECORD_SIZE]) -> Self {
        Self(uleds_user_trigger { name: *buf })
    }
}

impl fmt::Debug for TriggerRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("TriggerRecord")
            .field(&String::from_utf8_lossy(self.name()))
            .finish()
    }
}

/// A brightness sample as reported by the kernel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Brightness(pub u32);

impl Brightness {
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; BRIGHTNESS_RECORD_SIZE] {
        self.0.to_ne_bytes()
    }

    #[inline]
    pub fn from_bytes(buf: [u8; BRIGHTNESS_RECORD_SIZE]) -> Self {
        Self(u32::from_ne_bytes(buf))
    }
}

impl TryFrom<&[u8]> for Brightness {
    type Error = TryFromSliceError;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        <[u8; BRIGHTNESS_RECORD_SIZE]>::try_from(buf).map(Self::from_bytes)
    }
}

impl From<u32> for Brightness {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_record_layout() {
        let record = SetupRecord::new("uleds::test0", 255);
        let bytes = record.to_bytes();

        assert_eq!(bytes.len(), SETUP_RECORD_SIZE);
        assert_eq!(&bytes[..12], b"uleds::test0");
        assert!(bytes[12..LED_MAX_NAME_SIZE].iter().all(|&b| b == 0));
        assert_eq!(&bytes[LED_MAX_NAME_SIZE..], &255u32.to_ne_bytes());
    }

    #[test]
    fn setup_record_matches_kernel_struct() {
        let record = SetupRecord::new("mainboard:green:battery", 100);
        let raw: [u8; SETUP_RECORD_SIZE] = unsafe { std::mem::transmute(record.0) };
        assert_eq!(raw, record.to_bytes());
    }

    #[test]
    fn max_brightness_survives_encoding() {
        for max in [0, 1, 255, 0x0102_0304, u32::MAX - 1, u32::MAX] {
            let bytes = SetupRecord::new("led", max).to_bytes();
            let decoded = SetupRecord::try_from(&bytes[..]).unwrap();
            assert_eq!(decoded.max_brightness(), max);
            assert_eq!(decoded.name(), b"led");
        }
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "x".repeat(100);
        let record = SetupRecord::new(&name, 1);
        assert_eq!(record.name().len(), LED_MAX_NAME_SIZE - 1);
        assert_eq!(record.to_bytes()[LED_MAX_NAME_SIZE - 1], 0);

        let exact = "y".repeat(LED_MAX_NAME_SIZE - 1);
        assert_eq!(SetupRecord::new(&exact, 1).name(), exact.as_bytes());
    }

    #[test]
    fn empty_name_is_all_zeroes() {
        let bytes = SetupRecord::new("", 7).to_bytes();
        assert!(bytes[..LED_MAX_NAME_SIZE].iter().all(|&b| b == 0));
    }

    #[test]
    fn trigger_record_layout() {
        let record = TriggerRecord::new("utest0");
        let bytes = record.to_bytes();
        assert_eq!(bytes.len(), TRIGGER_RECORD_SIZE);
        assert_eq!(&bytes[..6], b"utest0");
        assert!(bytes[6..].iter().all(|&b| b == 0));
        assert_eq!(TriggerRecord::from_bytes(&bytes).name(), b"utest0");
    }

    #[test]
    fn brightness_record() {
        let b = Brightness(128);
        assert_eq!(b.to_bytes().len(), BRIGHTNESS_RECORD_SIZE);
        assert_eq!(Brightness::from_bytes(b.to_bytes()), b);
        assert_eq!(
            Brightness::try_from(&u32::MAX.to_ne_bytes()[..]).unwrap(),
            Brightness(u32::MAX)
        );
        assert!(Brightness::try_from(&[1u8, 2, 3][..]).is_err());
        assert!(SetupRecord::try_from(&[0u8; 64][..]).is_err());
    }
}
