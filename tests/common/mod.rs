#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::os::unix::io::OwnedFd;
use std::os::unix::net::UnixStream;

use uleds::Registration;

/// A registration backed by one end of a socket pair, standing in for a uleds handle. Writing
/// a record into the returned peer has the same effect as the kernel queueing a brightness.
pub fn fake_led(name: &str) -> (Registration, UnixStream) {
    let (ours, theirs) = UnixStream::pair().unwrap();
    let file = File::from(OwnedFd::from(ours));
    (Registration::from_file(name, 255, file), theirs)
}

pub fn fake_leds(names: &[&str]) -> (Vec<Registration>, Vec<UnixStream>) {
    names.iter().map(|name| fake_led(name)).unzip()
}

pub fn send_brightness(peer: &mut UnixStream, value: u32) {
    peer.write_all(&value.to_ne_bytes()).unwrap();
}
