//! HT16K33-class fourteen-segment display adapter.
//!
//! Keeps an eight-position frame buffer and pushes it over I2C on `show`.
//! A `.` in the text merges into the decimal-point segment of the previous
//! glyph, matching how the panel is wired.

use heapless::String;
use obc_core::hal::{BlinkRate, SegmentDisplay};

use super::SharedI2c;

const DISPLAY_ADDR: u8 = 0x70;
const POSITIONS: usize = 8;

const CMD_OSCILLATOR_ON: u8 = 0x21;
const CMD_DISPLAY_SETUP: u8 = 0x80;
const CMD_BRIGHTNESS: u8 = 0xE0;
const DECIMAL_POINT: u16 = 0x4000;

pub struct SegDisplay {
    bus: &'static SharedI2c,
    text: String<16>,
    brightness: u8,
}

impl SegDisplay {
    /// Initializes the controller: oscillator on, display on, mid
    /// brightness.
    pub fn new(bus: &'static SharedI2c) -> Self {
        let mut display = Self {
            bus,
            text: String::new(),
            brightness: 8,
        };
        display.command(CMD_OSCILLATOR_ON);
        display.command(CMD_DISPLAY_SETUP | 0x01);
        display.command(CMD_BRIGHTNESS | display.brightness);
        display
    }

    fn command(&mut self, command: u8) {
        if self
            .bus
            .borrow_mut()
            .blocking_write(DISPLAY_ADDR, &[command])
            .is_err()
        {
            defmt::warn!("display: command write failed");
        }
    }

    fn write_ram(&mut self, glyphs: &[u16; POSITIONS]) {
        let mut frame = [0_u8; 1 + POSITIONS * 2];
        for (index, glyph) in glyphs.iter().enumerate() {
            frame[1 + index * 2] = (*glyph & 0xFF) as u8;
            frame[2 + index * 2] = (*glyph >> 8) as u8;
        }
        if self
            .bus
            .borrow_mut()
            .blocking_write(DISPLAY_ADDR, &frame)
            .is_err()
        {
            defmt::warn!("display: frame write failed");
        }
    }
}

impl SegmentDisplay for SegDisplay {
    fn clear(&mut self) {
        self.text.clear();
    }

    fn put_text(&mut self, text: &str) {
        self.text.clear();
        let _ = self.text.push_str(text);
    }

    fn show(&mut self) {
        let mut glyphs = [0_u16; POSITIONS];
        let mut position = 0;
        for character in self.text.chars() {
            // A dot folds into the previous glyph's decimal point.
            if character == '.' && position > 0 {
                glyphs[position - 1] |= DECIMAL_POINT;
                continue;
            }
            if position >= POSITIONS {
                break;
            }
            glyphs[position] = glyph_for(character);
            position += 1;
        }
        self.write_ram(&glyphs);
    }

    fn fill(&mut self) {
        self.write_ram(&[0x7FFF; POSITIONS]);
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(15);
        let command = CMD_BRIGHTNESS | self.brightness;
        self.command(command);
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn blink_rate(&mut self, rate: BlinkRate) {
        // HT16K33 blink field: 00 steady, 01 fastest. The edit cadence uses
        // the slower 1 Hz setting so the two states read differently.
        let bits = match rate {
            BlinkRate::Off => 0b00,
            BlinkRate::Edit => 0b10,
            BlinkRate::Alert => 0b01,
        };
        self.command(CMD_DISPLAY_SETUP | 0x01 | (bits << 1));
    }
}

/// Fourteen-segment glyphs for the character set the renderers emit.
fn glyph_for(character: char) -> u16 {
    match character.to_ascii_uppercase() {
        '0' => 0x0C3F,
        '1' => 0x0006,
        '2' => 0x00DB,
        '3' => 0x008F,
        '4' => 0x00E6,
        '5' => 0x00ED,
        '6' => 0x00FD,
        '7' => 0x0007,
        '8' => 0x00FF,
        '9' => 0x00EF,
        'A' => 0x00F7,
        'B' => 0x128F,
        'C' => 0x0039,
        'D' => 0x120F,
        'E' => 0x00F9,
        'F' => 0x0071,
        'G' => 0x00BD,
        'H' => 0x00F6,
        'I' => 0x1209,
        'J' => 0x001E,
        'K' => 0x2470,
        'L' => 0x0038,
        'M' => 0x0536,
        'N' => 0x2136,
        'O' => 0x003F,
        'P' => 0x00F3,
        'Q' => 0x203F,
        'R' => 0x20F3,
        'S' => 0x012D,
        'T' => 0x1201,
        'U' => 0x003E,
        'V' => 0x0C30,
        'W' => 0x2836,
        'X' => 0x2D00,
        'Y' => 0x1500,
        'Z' => 0x0C09,
        '-' => 0x00C0,
        '+' => 0x12C0,
        '/' => 0x0C00,
        _ => 0x0000,
    }
}
