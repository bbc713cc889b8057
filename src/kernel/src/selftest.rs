//! Boot-time self-checks.
//!
//! Runs on the real machine right after interrupts come up. Each check is
//! pure and touches no hardware, so a failure points at the build rather
//! than the board.

use crate::keyboard::{Decoder, InputRing, CAPACITY};
use log::{error, info};
use turban_common::bcd_to_binary;

type Check = (&'static str, fn() -> Result<(), &'static str>);

const CHECKS: [Check; 3] = [
    ("bcd", check_bcd),
    ("input ring", check_ring),
    ("scancode decoder", check_decoder),
];

/// Runs all self-checks, logging each result.
///
/// Returns the number of failed checks.
pub fn run_all() -> usize {
    info!("selftest: running {} checks", CHECKS.len());
    let mut failed = 0;
    for (name, check) in CHECKS {
        match check() {
            Ok(()) => info!("selftest: {} [ok]", name),
            Err(reason) => {
                error!("selftest: {} failed: {}", name, reason);
                failed += 1;
            }
        }
    }
    failed
}

fn check_bcd() -> Result<(), &'static str> {
    if bcd_to_binary(0x59) != 59 || bcd_to_binary(0x00) != 0 || bcd_to_binary(0x23) != 23 {
        return Err("wrong conversion");
    }
    Ok(())
}

fn check_ring() -> Result<(), &'static str> {
    let ring = InputRing::new();
    let (producer, mut consumer) = ring.split().ok_or("split refused")?;
    if ring.split().is_some() {
        return Err("split twice");
    }
    if consumer.try_read().is_some() {
        return Err("fresh ring not empty");
    }

    for byte in b"ok" {
        producer.push(*byte);
    }
    if consumer.try_read() != Some(b'o') || consumer.try_read() != Some(b'k') {
        return Err("bytes out of order");
    }

    // one lap plus one: the oldest byte is lost
    for i in 0..=CAPACITY {
        producer.push(i as u8);
    }
    if consumer.try_read() != Some(1) {
        return Err("overflow kept the oldest byte");
    }
    Ok(())
}

fn check_decoder() -> Result<(), &'static str> {
    let mut decoder = Decoder::new();
    let typed = [
        decoder.decode(0x23),
        decoder.decode(0x2A),
        decoder.decode(0x17),
        decoder.decode(0xAA),
        decoder.decode(0x1C),
    ];
    if typed != [Some(b'h'), None, Some(b'I'), None, Some(b'\n')] {
        return Err("wrong bytes");
    }
    if decoder.decode(0x58).is_some() {
        return Err("unmapped scancode produced a byte");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_checks_pass_on_the_host() {
        assert_eq!(run_all(), 0);
    }
}
