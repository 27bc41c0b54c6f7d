use crate::record::{
    LED_MAX_NAME_SIZE, SETUP_RECORD_SIZE, TRIGGER_MAX_NAME_SIZE, TRIGGER_RECORD_SIZE,
};
use nix::ioctl_write_ptr;

pub const ULEDS_IOC_MAGIC: u8 = b'l';

#[repr(C)]
#[derive(Clone, Copy)]
pub struct uleds_user_dev {
    pub name: [u8; LED_MAX_NAME_SIZE],
    pub max_brightness: u32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct uleds_user_trigger {
    pub name: [u8; TRIGGER_MAX_NAME_SIZE],
}

const _: () = assert!(std::mem::size_of::<uleds_user_dev>() == SETUP_RECORD_SIZE);
const _: () = assert!(std::mem::size_of::<uleds_user_trigger>() == TRIGGER_RECORD_SIZE);

ioctl_write_ptr!(uleds_ioc_dev_setup, ULEDS_IOC_MAGIC, 0x01, uleds_user_dev);
ioctl_write_ptr!(
    uleds_ioc_set_default_trigger,
    ULEDS_IOC_MAGIC,
    0x02,
    uleds_user_trigger
);
