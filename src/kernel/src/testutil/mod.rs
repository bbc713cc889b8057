//! In-memory stand-ins for the hardware traits, used by the unit tests.
//!
//! Each double records what the code under test did to it, so tests can
//! assert on port traffic, interrupt masking and processor control.

use crate::config::KernelConfig;
use crate::display::BUFFER_SIZE;
use crate::keyboard::Producer;
use crate::terminal::Machine;
use std::collections::{HashMap, VecDeque};
use turban_hal::{Console, Cpu, InterruptController, MemoryWindow, PortIo};

const CMOS_ADDRESS: u16 = 0x70;
const CMOS_DATA: u16 = 0x71;
const CMOS_STATUS_A: u8 = 0x0A;

/// One recorded port access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortAccess {
    Read(u16),
    Write(u16, u8),
    WriteWord(u16, u16),
}

/// Port bus with a CMOS register file and scripted reads elsewhere.
#[derive(Debug)]
pub struct MockPorts {
    accesses: Vec<PortAccess>,
    queued: HashMap<u16, VecDeque<u8>>,
    defaults: HashMap<u16, u8>,
    cmos: [u8; 128],
    cmos_index: u8,
    update_polls: usize,
}

impl MockPorts {
    pub fn new() -> Self {
        MockPorts {
            accesses: Vec::new(),
            queued: HashMap::new(),
            defaults: HashMap::new(),
            cmos: [0; 128],
            cmos_index: 0,
            update_polls: 0,
        }
    }

    /// Loads BCD values into the clock registers.
    pub fn set_clock(&mut self, hour: u8, minute: u8, second: u8, day: u8, month: u8, year: u8) {
        self.cmos[0x04] = hour;
        self.cmos[0x02] = minute;
        self.cmos[0x00] = second;
        self.cmos[0x07] = day;
        self.cmos[0x08] = month;
        self.cmos[0x09] = year;
    }

    /// Reports an update in progress for the next `polls` status reads.
    pub fn set_update_in_progress(&mut self, polls: usize) {
        self.update_polls = polls;
    }

    /// Values returned, in order, by the next reads of `port`.
    pub fn queue_reads(&mut self, port: u16, values: &[u8]) {
        self.queued.entry(port).or_default().extend(values);
    }

    /// Value returned by reads of `port` once its queue is empty.
    pub fn set_default_read(&mut self, port: u16, value: u8) {
        self.defaults.insert(port, value);
    }

    pub fn accesses(&self) -> &[PortAccess] {
        &self.accesses
    }

    /// All byte writes, in order.
    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.accesses
            .iter()
            .filter_map(|access| match *access {
                PortAccess::Write(port, value) => Some((port, value)),
                _ => None,
            })
            .collect()
    }

    /// The last `count` byte writes.
    pub fn writes_tail(&self, count: usize) -> Vec<(u16, u8)> {
        let writes = self.writes();
        writes[writes.len().saturating_sub(count)..].to_vec()
    }

    pub fn reads_of(&self, port: u16) -> usize {
        self.accesses
            .iter()
            .filter(|access| **access == PortAccess::Read(port))
            .count()
    }

    fn read_cmos(&mut self) -> u8 {
        if self.cmos_index == CMOS_STATUS_A {
            if self.update_polls > 0 {
                self.update_polls -= 1;
                0xA6
            } else {
                0x26
            }
        } else {
            self.cmos[usize::from(self.cmos_index)]
        }
    }
}

impl PortIo for MockPorts {
    fn read_port(&mut self, port: u16) -> u8 {
        self.accesses.push(PortAccess::Read(port));
        if port == CMOS_DATA {
            return self.read_cmos();
        }
        self.queued
            .get_mut(&port)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.defaults.get(&port).copied())
            .unwrap_or(0)
    }

    fn write_port(&mut self, port: u16, value: u8) {
        self.accesses.push(PortAccess::Write(port, value));
        if port == CMOS_ADDRESS {
            self.cmos_index = value & 0x7F;
        }
    }

    fn write_port_u16(&mut self, port: u16, value: u16) {
        self.accesses.push(PortAccess::WriteWord(port, value));
    }
}

/// Heap-backed text-mode window.
pub struct TextBuffer {
    bytes: Vec<u8>,
}

impl TextBuffer {
    pub fn new() -> Self {
        TextBuffer {
            bytes: vec![0; BUFFER_SIZE],
        }
    }
}

impl MemoryWindow for TextBuffer {
    fn read(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    fn write(&mut self, offset: usize, value: u8) {
        self.bytes[offset] = value;
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqEvent {
    Enable,
    Disable,
    EndOfInterrupt(u8),
}

/// Interrupt controller that only records calls.
#[derive(Debug, Default)]
pub struct MockIrq {
    events: Vec<IrqEvent>,
}

impl MockIrq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[IrqEvent] {
        &self.events
    }
}

impl InterruptController for MockIrq {
    fn enable(&mut self) {
        self.events.push(IrqEvent::Enable);
    }

    fn disable(&mut self) {
        self.events.push(IrqEvent::Disable);
    }

    fn end_of_interrupt(&mut self, irq: u8) {
        self.events.push(IrqEvent::EndOfInterrupt(irq));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuEvent {
    Wait,
    Spin(u32),
    TripleFault,
}

/// Processor double.
///
/// Each `wait_for_interrupt` delivers the next scripted key through the
/// producer, like one keyboard interrupt would. Waiting with nothing left to
/// deliver, and halting, panic.
pub struct MockCpu<'a> {
    events: Vec<CpuEvent>,
    keys: VecDeque<u8>,
    producer: Option<Producer<'a>>,
}

impl MockCpu<'static> {
    pub fn new() -> Self {
        MockCpu {
            events: Vec::new(),
            keys: VecDeque::new(),
            producer: None,
        }
    }
}

impl<'a> MockCpu<'a> {
    pub fn with_keys(producer: Producer<'a>, keys: &[u8]) -> Self {
        MockCpu {
            events: Vec::new(),
            keys: keys.iter().copied().collect(),
            producer: Some(producer),
        }
    }

    pub fn events(&self) -> &[CpuEvent] {
        &self.events
    }

    pub fn waits(&self) -> usize {
        self.events
            .iter()
            .filter(|event| **event == CpuEvent::Wait)
            .count()
    }
}

impl Cpu for MockCpu<'_> {
    fn wait_for_interrupt(&mut self) {
        self.events.push(CpuEvent::Wait);
        match (&self.producer, self.keys.pop_front()) {
            (Some(producer), Some(key)) => producer.push(key),
            _ => panic!("blocked forever waiting for input"),
        }
    }

    fn spin(&mut self, iterations: u32) {
        self.events.push(CpuEvent::Spin(iterations));
    }

    fn force_triple_fault(&mut self) {
        self.events.push(CpuEvent::TripleFault);
    }

    fn halt(&mut self) -> ! {
        panic!("cpu halted");
    }
}

/// Console that captures output as a string.
#[derive(Debug, Default)]
pub struct CapturedConsole {
    output: String,
    clears: usize,
}

impl CapturedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Console for CapturedConsole {
    fn write_str(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.output.clear();
    }
}

/// A machine built entirely from doubles, with the default configuration.
pub fn test_machine() -> Machine<CapturedConsole, MockPorts, MockIrq, MockCpu<'static>> {
    Machine {
        display: CapturedConsole::new(),
        ports: MockPorts::new(),
        interrupts: MockIrq::new(),
        cpu: MockCpu::new(),
        config: KernelConfig::DEFAULT,
    }
}
