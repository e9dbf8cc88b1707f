//! Arabic/English language detection.
//!
//! Script-based: counts letters in the Arabic Unicode blocks against all
//! other letters. Persian and Urdu share the script, so any letter those
//! alphabets add on top of Arabic's marks the text as not Arabic. Anything
//! that is not clearly Arabic is English, so detection never fails.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Arabic,
    English,
}

impl Lang {
    /// ISO 639-1 code used on the translation wire.
    pub fn code(self) -> &'static str {
        match self {
            Lang::Arabic => "ar",
            Lang::English => "en",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn is_arabic_letter(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    ) && c.is_alphabetic()
}

/// Letters of the Persian and Urdu alphabets that Arabic itself never uses.
fn is_persian_or_urdu_letter(c: char) -> bool {
    matches!(
        c,
        '\u{067E}' // peh
            | '\u{0686}' // tcheh
            | '\u{0698}' // jeh
            | '\u{06A9}' // keheh
            | '\u{06AF}' // gaf
            | '\u{06CC}' // farsi yeh
            | '\u{0679}' // tteh
            | '\u{0688}' // ddal
            | '\u{0691}' // rreh
            | '\u{06BA}' // noon ghunna
            | '\u{06BE}' // heh doachashmee
            | '\u{06C1}' // heh goal
            | '\u{06D2}' // yeh barree
    )
}

/// Detect whether `text` is Arabic or English.
pub fn detect(text: &str) -> Lang {
    let mut arabic = 0usize;
    let mut other = 0usize;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        if is_persian_or_urdu_letter(c) {
            return Lang::English;
        }
        if is_arabic_letter(c) {
            arabic += 1;
        } else {
            other += 1;
        }
    }

    if arabic > other { Lang::Arabic } else { Lang::English }
}
