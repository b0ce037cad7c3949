use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::Error;

bitflags! {
    /// Host match flags, plus the quirk flags inferred from the pattern shape.
    #[derive(Default)]
    pub struct Flags: u32 {
        /// Case-insensitive matching (`i`).
        const FOLD = 1 << 0;
        /// `^` and `$` match at line boundaries (`m`).
        const MULTILINE = 1 << 1;
        /// `.` also matches a newline (`s`).
        const SINGLELINE = 1 << 2;
        /// Free-spacing mode (`x`).
        const EXTENDED = 1 << 3;
        /// The pattern carries Unicode semantics.
        const UTF8 = 1 << 4;
        /// The pattern was compiled for a split operation.
        const SPLIT = 1 << 5;

        /// Split by character, for the empty pattern.
        const NULL = 1 << 16;
        /// Split at line starts, for the pattern `^`.
        const START_ONLY = 1 << 17;
        /// Split on runs of whitespace.
        const WHITE = 1 << 18;
        /// Skip leading whitespace before splitting.
        const SKIPWHITE = 1 << 19;
    }
}

impl Flags {
    /// Flags the backing engine accepts as inline modifiers, in canonical order.
    pub(crate) const INLINE: [(Flags, char); 3] =
        [(Flags::FOLD, 'i'), (Flags::MULTILINE, 'm'), (Flags::SINGLELINE, 's')];

    /// Flags describing split behaviour rather than matching.
    pub const QUIRKS: Flags = Flags::from_bits_truncate(
        Flags::NULL.bits() | Flags::START_ONLY.bits() | Flags::WHITE.bits() | Flags::SKIPWHITE.bits(),
    );
}

impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::empty();

        for c in s.chars() {
            match c {
                'i' => flags |= Flags::FOLD,
                'm' => flags |= Flags::MULTILINE,
                's' => flags |= Flags::SINGLELINE,
                'x' => flags |= Flags::EXTENDED,
                'u' => flags |= Flags::UTF8,
                _ => {
                    return Err(Error::InvalidFlag(c));
                }
            }
        }

        Ok(flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Flags::FOLD) {
            write!(f, "i")?
        }
        if self.contains(Flags::MULTILINE) {
            write!(f, "m")?
        }
        if self.contains(Flags::SINGLELINE) {
            write!(f, "s")?
        }
        if self.contains(Flags::EXTENDED) {
            write!(f, "x")?
        }
        if self.contains(Flags::UTF8) {
            write!(f, "u")?
        }
        Ok(())
    }
}
