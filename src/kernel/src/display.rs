//! Text-mode display surface.
//!
//! Owns the 80x25 grid of character/attribute cells, the cursor and the
//! scrolling logic. The grid itself lives behind a [`MemoryWindow`] and the
//! hardware cursor behind [`PortIo`], so the surface can be driven against
//! real VGA memory or an in-memory buffer alike.
//!
//! Cursor invariant: after every operation `column < WIDTH` and
//! `row < HEIGHT`.

use core::fmt;
use turban_hal::{Console, MemoryWindow, PortIo};

/// Number of columns in text mode.
pub const WIDTH: usize = 80;

/// Number of rows in text mode.
pub const HEIGHT: usize = 25;

/// Size of the text buffer in bytes (two bytes per cell).
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT * 2;

/// CRT controller index register.
const CURSOR_INDEX_PORT: u16 = 0x3D4;
/// CRT controller data register.
const CURSOR_DATA_PORT: u16 = 0x3D5;
/// Cursor location, low byte.
const CURSOR_LOCATION_LOW: u8 = 0x0F;
/// Cursor location, high byte.
const CURSOR_LOCATION_HIGH: u8 = 0x0E;

/// Columns per tab stop.
const TAB_WIDTH: usize = 4;

/// Text-mode color codes.
///
/// Standard 16-color VGA palette.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// Combined foreground and background color of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Attribute(u8);

impl Attribute {
    /// Creates an attribute from foreground and background colors.
    pub const fn new(foreground: Color, background: Color) -> Attribute {
        Attribute((background as u8) << 4 | (foreground as u8))
    }

    /// Raw attribute byte.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Light gray on black (0x07).
pub const DEFAULT_ATTRIBUTE: Attribute = Attribute::new(Color::LightGray, Color::Black);

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Code page 437 character byte.
    pub character: u8,
    /// Color attribute byte.
    pub attribute: Attribute,
}

impl Cell {
    /// A space in the default attribute.
    pub const BLANK: Cell = Cell {
        character: b' ',
        attribute: DEFAULT_ATTRIBUTE,
    };
}

/// Cursor position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column, 0 to `WIDTH - 1`.
    pub column: usize,
    /// Row, 0 to `HEIGHT - 1`.
    pub row: usize,
}

impl Cursor {
    /// Linear cell index as programmed into the CRT controller.
    pub const fn offset(self) -> u16 {
        (self.row * WIDTH + self.column) as u16
    }
}

/// The display surface: sole owner of the text grid.
pub struct Display<W, P> {
    window: W,
    ports: P,
    cursor: Cursor,
    attribute: Attribute,
}

impl<W: MemoryWindow, P: PortIo> Display<W, P> {
    /// Wraps a text window and the ports of its CRT controller.
    ///
    /// The grid is left untouched; call [`Display::clear`] to start fresh.
    pub fn new(window: W, ports: P) -> Self {
        debug_assert!(window.len() >= BUFFER_SIZE, "text window too small");
        Display {
            window,
            ports,
            cursor: Cursor::default(),
            attribute: DEFAULT_ATTRIBUTE,
        }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Reads back the cell at `(column, row)`.
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        let offset = Self::cell_offset(column, row);
        Cell {
            character: self.window.read(offset),
            attribute: Attribute(self.window.read(offset + 1)),
        }
    }

    /// Sets the attribute used for subsequent characters.
    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.attribute = Attribute::new(foreground, background);
    }

    /// Restores the default attribute for subsequent characters.
    pub fn reset_color(&mut self) {
        self.attribute = DEFAULT_ATTRIBUTE;
    }

    /// Blanks every cell and homes the cursor.
    pub fn clear(&mut self) {
        for row in 0..HEIGHT {
            self.clear_row(row);
        }
        self.cursor = Cursor::default();
        self.sync_cursor();
    }

    /// Writes one byte, interpreting newline, backspace and tab.
    pub fn put_char(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.cursor.column = 0;
                self.cursor.row += 1;
            }
            0x08 => {
                if self.cursor.column > 0 {
                    self.cursor.column -= 1;
                    let offset = Self::cell_offset(self.cursor.column, self.cursor.row);
                    self.window.write(offset, b' ');
                }
            }
            b'\t' => {
                self.cursor.column = (self.cursor.column + TAB_WIDTH) & !(TAB_WIDTH - 1);
            }
            byte => {
                let cell = Cell {
                    character: byte,
                    attribute: self.attribute,
                };
                self.write_cell(self.cursor.column, self.cursor.row, cell);
                self.cursor.column += 1;
            }
        }

        if self.cursor.column >= WIDTH {
            self.cursor.column = 0;
            self.cursor.row += 1;
        }
        if self.cursor.row >= HEIGHT {
            self.scroll();
            self.cursor.row = HEIGHT - 1;
        }
        self.sync_cursor();
    }

    /// Writes every byte of `bytes` in order.
    pub fn print(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put_char(byte);
        }
    }

    /// Moves rows 1.. up by one and blanks the last row.
    fn scroll(&mut self) {
        for row in 1..HEIGHT {
            for column in 0..WIDTH {
                let cell = self.cell(column, row);
                self.write_cell(column, row - 1, cell);
            }
        }
        self.clear_row(HEIGHT - 1);
    }

    fn clear_row(&mut self, row: usize) {
        debug_assert!(row < HEIGHT, "row index out of bounds");
        for column in 0..WIDTH {
            self.write_cell(column, row, Cell::BLANK);
        }
    }

    fn write_cell(&mut self, column: usize, row: usize, cell: Cell) {
        let offset = Self::cell_offset(column, row);
        self.window.write(offset, cell.character);
        self.window.write(offset + 1, cell.attribute.bits());
    }

    /// Mirrors the cursor into the CRT controller, low byte first.
    fn sync_cursor(&mut self) {
        let [low, high] = self.cursor.offset().to_le_bytes();
        self.ports.write_port(CURSOR_INDEX_PORT, CURSOR_LOCATION_LOW);
        self.ports.write_port(CURSOR_DATA_PORT, low);
        self.ports.write_port(CURSOR_INDEX_PORT, CURSOR_LOCATION_HIGH);
        self.ports.write_port(CURSOR_DATA_PORT, high);
    }

    const fn cell_offset(column: usize, row: usize) -> usize {
        (row * WIDTH + column) * 2
    }
}

impl<W: MemoryWindow, P: PortIo> fmt::Write for Display<W, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            match byte {
                // Printable ASCII and the control bytes put_char understands
                0x20..=0x7e | b'\n' | b'\t' | 0x08 => self.put_char(byte),
                // Anything else: show placeholder
                _ => self.put_char(0xfe),
            }
        }
        Ok(())
    }
}

impl<W: MemoryWindow, P: PortIo> Console for Display<W, P> {
    fn write_str(&mut self, s: &str) {
        let _ = <Self as fmt::Write>::write_str(self, s);
    }

    fn clear(&mut self) {
        Display::clear(self);
    }
}
