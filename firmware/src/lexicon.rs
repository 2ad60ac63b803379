//! Display-word translation tables for the three supported languages.
//!
//! The tables live on the collaborator side of the `Lexicon` seam; spellings
//! are constrained to what the fourteen-segment glyphs can draw.

#![allow(dead_code)]

use obc_core::lexicon::{Lexicon, Word};
use obc_core::settings::Language;

/// Static translation tables.
pub struct Translations;

impl Lexicon for Translations {
    fn word(&self, language: Language, word: Word) -> &'static str {
        match language {
            Language::English => english(word),
            Language::French => french(word),
            Language::German => german(word),
        }
    }

    fn month(&self, language: Language, month: u8) -> &'static str {
        let index = usize::from(month.clamp(1, 12)) - 1;
        match language {
            Language::English => MONTHS_EN[index],
            Language::French => MONTHS_FR[index],
            Language::German => MONTHS_DE[index],
        }
    }
}

const MONTHS_EN: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const MONTHS_FR: [&str; 12] = [
    "JAN", "FEV", "MAR", "AVR", "MAI", "JUN", "JUL", "AOU", "SEP", "OCT", "NOV", "DEC",
];
const MONTHS_DE: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAI", "JUN", "JUL", "AUG", "SEP", "OKT", "NOV", "DEZ",
];

fn english(word: Word) -> &'static str {
    match word {
        Word::Hour => "HOUR",
        Word::Date => "DATE",
        Word::Speed => "SPEED",
        Word::Signal => "SIGNAL",
        Word::Limit => "LIMIT",
        Word::Accel => "ACCEL",
        Word::Stop => "STOP",
        Word::Ready => "READY",
        Word::Lap => "LAP",
        Word::Odo => "ODO",
        Word::Timer => "TIMER",
        Word::Oil => "OIL",
        Word::Temp => "TEMP",
        Word::Volt => "VOLT",
        Word::Alt => "ALT",
        Word::Hdg => "HDG",
        Word::GSens => "G SENS",
    }
}

fn french(word: Word) -> &'static str {
    match word {
        Word::Hour => "HEURE",
        Word::Date => "DATE",
        Word::Speed => "VITESSE",
        Word::Signal => "SIGNAL",
        Word::Limit => "LIMITE",
        Word::Accel => "ACCEL",
        Word::Stop => "STOP",
        Word::Ready => "PRET",
        Word::Lap => "TOUR",
        Word::Odo => "ODO",
        Word::Timer => "CHRONO",
        Word::Oil => "HUILE",
        Word::Temp => "TEMP",
        Word::Volt => "VOLT",
        Word::Alt => "ALT",
        Word::Hdg => "CAP",
        Word::GSens => "G SENS",
    }
}

fn german(word: Word) -> &'static str {
    match word {
        Word::Hour => "UHR",
        Word::Date => "DATUM",
        Word::Speed => "TEMPO",
        Word::Signal => "SIGNAL",
        Word::Limit => "LIMIT",
        Word::Accel => "ACCEL",
        Word::Stop => "STOP",
        Word::Ready => "BEREIT",
        Word::Lap => "RUNDE",
        Word::Odo => "ODO",
        Word::Timer => "TIMER",
        Word::Oil => "OEL",
        Word::Temp => "TEMP",
        Word::Volt => "VOLT",
        Word::Alt => "HOEHE",
        Word::Hdg => "KURS",
        Word::GSens => "G SENS",
    }
}
