//! Grammar notation rendering.
//!
//! Trees render in a compact BNF-like notation: quoted terminals, `|`
//! between alternatives, space-separated sequences and postfix
//! `?`/`*`/`+`/`{m,n}` repetition qualifiers. The output describes the
//! pattern for humans and logs; it is not meant to be parsed back.

use std::fmt;

use itertools::Itertools;

use crate::element::{
    Alternation,
    Concatenation,
    Element,
    Repetition,
};

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(value) => write!(f, "\"{}\"", value.escape_debug()),
            Self::Alternation(alternation) => write!(f, "{}", alternation),
            Self::Concatenation(concatenation) => write!(f, "{}", concatenation),
            Self::Repetition(repetition) => write!(f, "{}", repetition),
        }
    }
}

impl fmt::Display for Alternation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.elements().iter().format(" | "))
    }
}

impl fmt::Display for Concatenation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.elements().iter().format(" "))
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element())?;
        match (self.minimum(), self.maximum()) {
            (0, None) => write!(f, "*"),
            (1, None) => write!(f, "+"),
            (0, Some(1)) => write!(f, "?"),
            (minimum, None) => write!(f, "{{{},}}", minimum),
            (minimum, Some(maximum)) => write!(f, "{{{},{}}}", minimum, maximum),
        }
    }
}
