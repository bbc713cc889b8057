//! PS/2 keyboard input pipeline.
//!
//! The interrupt half ([`Decoder::on_interrupt`]) turns scancode set 1 events
//! into bytes and pushes them into the input ring; the foreground half reads
//! them back through a [`Consumer`]. The decoder and the producer are only
//! ever touched from the keyboard interrupt.

pub mod ring;

pub use ring::{Consumer, InputRing, Producer, CAPACITY};

use spin::{Mutex, Once};
use turban_common::Modifiers;
use turban_hal::{InterruptController, PortIo};

/// PS/2 controller data port.
pub const DATA_PORT: u16 = 0x60;

/// IRQ line of the keyboard on the primary PIC.
pub const KEYBOARD_IRQ: u8 = 1;

const RELEASE_BIT: u8 = 0x80;
const LEFT_SHIFT: u8 = 0x2A;
const RIGHT_SHIFT: u8 = 0x36;
const CAPS_LOCK: u8 = 0x3A;

/// Number of entries in each translation table (scancodes 0x00..=0x39).
pub const KEYMAP_LEN: usize = 58;

#[rustfmt::skip]
static KEYMAP_LOWER: [u8; KEYMAP_LEN] = [
    0, 0x1B, b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'0', b'-', b'=', 0x08,
    b'\t', b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', b'o', b'p', b'[', b']', b'\n',
    0, b'a', b's', b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', b'\'', b'`', 0, b'\\',
    b'z', b'x', b'c', b'v', b'b', b'n', b'm', b',', b'.', b'/', 0, b'*', 0, b' ',
];

#[rustfmt::skip]
static KEYMAP_UPPER: [u8; KEYMAP_LEN] = [
    0, 0x1B, b'!', b'@', b'#', b'$', b'%', b'^', b'&', b'*', b'(', b')', b'_', b'+', 0x08,
    b'\t', b'Q', b'W', b'E', b'R', b'T', b'Y', b'U', b'I', b'O', b'P', b'{', b'}', b'\n',
    0, b'A', b'S', b'D', b'F', b'G', b'H', b'J', b'K', b'L', b':', b'"', b'~', 0, b'|',
    b'Z', b'X', b'C', b'V', b'B', b'N', b'M', b'<', b'>', b'?', 0, b'*', 0, b' ',
];

/// Scancode-to-byte decoder with shift and caps-lock state.
#[derive(Debug, Default)]
pub struct Decoder {
    modifiers: Modifiers,
}

impl Decoder {
    /// Creates a decoder with no modifiers active.
    pub const fn new() -> Self {
        Decoder {
            modifiers: Modifiers::empty(),
        }
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Feeds one scancode, returning the byte it produces, if any.
    ///
    /// Scancodes beyond the tables (function keys, keypad, the 0xE0 prefix)
    /// produce nothing.
    pub fn decode(&mut self, scancode: u8) -> Option<u8> {
        if scancode & RELEASE_BIT != 0 {
            let key = scancode & !RELEASE_BIT;
            if key == LEFT_SHIFT || key == RIGHT_SHIFT {
                self.modifiers.remove(Modifiers::SHIFT);
            }
            return None;
        }

        match scancode {
            LEFT_SHIFT | RIGHT_SHIFT => {
                self.modifiers.insert(Modifiers::SHIFT);
                None
            }
            CAPS_LOCK => {
                self.modifiers.toggle(Modifiers::CAPS_LOCK);
                None
            }
            _ => {
                let table = if self.modifiers.upper_case() {
                    &KEYMAP_UPPER
                } else {
                    &KEYMAP_LOWER
                };
                table
                    .get(usize::from(scancode))
                    .copied()
                    .filter(|&byte| byte != 0)
            }
        }
    }

    /// Services one keyboard interrupt.
    ///
    /// Reads the scancode, pushes any resulting byte and always acknowledges
    /// the interrupt.
    pub fn on_interrupt<P, I>(&mut self, ports: &mut P, pic: &mut I, input: &Producer<'_>)
    where
        P: PortIo,
        I: InterruptController,
    {
        let scancode = ports.read_port(DATA_PORT);
        if let Some(byte) = self.decode(scancode) {
            input.push(byte);
        }
        pic.end_of_interrupt(KEYBOARD_IRQ);
    }
}

/// The ring between the keyboard interrupt and the shell.
static INPUT: InputRing = InputRing::new();

/// Producer end, claimed at boot for the interrupt handler.
static PRODUCER: Once<Producer<'static>> = Once::new();

/// Decoder state; locked only from the keyboard interrupt.
static DECODER: Mutex<Decoder> = Mutex::new(Decoder::new());

/// Splits the global input ring and returns the reading end.
///
/// Returns `None` if the ring was already claimed.
pub fn init() -> Option<Consumer<'static>> {
    let (producer, consumer) = INPUT.split()?;
    PRODUCER.call_once(|| producer);
    Some(consumer)
}

/// Entry point for the keyboard interrupt handler.
pub fn handle_interrupt<P, I>(ports: &mut P, pic: &mut I)
where
    P: PortIo,
    I: InterruptController,
{
    let mut decoder = DECODER.lock();
    match PRODUCER.get() {
        Some(producer) => decoder.on_interrupt(ports, pic, producer),
        None => {
            // nobody reads yet; drain the controller anyway
            let _ = ports.read_port(DATA_PORT);
            pic.end_of_interrupt(KEYBOARD_IRQ);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{IrqEvent, MockIrq, MockPorts};

    fn type_keys(decoder: &mut Decoder, scancodes: &[u8]) -> Vec<u8> {
        scancodes.iter().filter_map(|&sc| decoder.decode(sc)).collect()
    }

    #[test]
    fn plain_press_is_lower_case() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(0x1E), Some(b'a'));
    }

    #[test]
    fn shift_press_selects_upper_table() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.decode(LEFT_SHIFT), None);
        assert_eq!(decoder.decode(0x1E), Some(b'A'));
        assert_eq!(decoder.decode(0x02), Some(b'!'));
    }

    #[test]
    fn shift_release_clears_shift() {
        let mut decoder = Decoder::new();
        decoder.decode(LEFT_SHIFT);
        assert!(decoder.modifiers().contains(Modifiers::SHIFT));
        assert_eq!(decoder.decode(0xAA), None);
        assert!(!decoder.modifiers().contains(Modifiers::SHIFT));
        assert_eq!(decoder.decode(0x1E), Some(b'a'));
    }

    #[test]
    fn right_shift_behaves_like_left() {
        let mut decoder = Decoder::new();
        assert_eq!(type_keys(&mut decoder, &[RIGHT_SHIFT, 0x23, 0xB6, 0x23]), b"Hh");
    }

    #[test]
    fn caps_lock_toggles_and_inverts_shift() {
        let mut decoder = Decoder::new();
        decoder.decode(CAPS_LOCK);
        assert_eq!(decoder.decode(0x1E), Some(b'A'));
        decoder.decode(LEFT_SHIFT);
        assert_eq!(decoder.decode(0x1E), Some(b'a'));
        decoder.decode(0xAA);
        // releasing caps lock does not toggle it back
        decoder.decode(CAPS_LOCK | RELEASE_BIT);
        assert_eq!(decoder.decode(0x1E), Some(b'A'));
        decoder.decode(CAPS_LOCK);
        assert_eq!(decoder.decode(0x1E), Some(b'a'));
    }

    #[test]
    fn other_releases_are_ignored() {
        let mut decoder = Decoder::new();
        decoder.decode(LEFT_SHIFT);
        assert_eq!(decoder.decode(0x9E), None);
        assert!(decoder.modifiers().contains(Modifiers::SHIFT));
    }

    #[test]
    fn control_keys_translate() {
        let mut decoder = Decoder::new();
        assert_eq!(type_keys(&mut decoder, &[0x1C, 0x0E, 0x0F, 0x39]), b"\n\x08\t ");
    }

    #[test]
    fn unmapped_and_out_of_range_scancodes_produce_nothing() {
        let mut decoder = Decoder::new();
        // left ctrl maps to 0, F1 and keypad lie past the table
        assert_eq!(type_keys(&mut decoder, &[0x1D, 0x3B, 0x47, 0x7F]), b"");
    }

    #[test]
    fn interrupt_pushes_byte_and_acknowledges() {
        let ring = InputRing::new();
        let (producer, mut consumer) = ring.split().unwrap();
        let mut ports = MockPorts::new();
        let mut pic = MockIrq::new();
        let mut decoder = Decoder::new();

        ports.queue_reads(DATA_PORT, &[LEFT_SHIFT, 0x23, 0xAA, 0x17]);
        for _ in 0..4 {
            decoder.on_interrupt(&mut ports, &mut pic, &producer);
        }

        assert_eq!(consumer.try_read(), Some(b'H'));
        assert_eq!(consumer.try_read(), Some(b'i'));
        assert_eq!(consumer.try_read(), None);
        assert_eq!(pic.events(), &[IrqEvent::EndOfInterrupt(KEYBOARD_IRQ); 4]);
    }
}
