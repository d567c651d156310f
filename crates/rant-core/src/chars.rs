//! POSIX-style character classes over the ASCII range.
//!
//! Every named class is an ordered subset of code points `0..=127`,
//! computed once per process and shared read-only afterwards.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::UsageError;

/// Number of named classes.
const CLASSES_COUNT: usize = 13;

/// A named character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassName {
    Alnum,
    Alpha,
    Blank,
    Cntrl,
    Digit,
    Graph,
    Lower,
    Print,
    Punct,
    Space,
    Upper,
    Xdigit,
    /// Every code point in `0..=127`.
    Ascii,
}

impl ClassName {
    /// All classes, in table order.
    pub const ALL: [ClassName; CLASSES_COUNT] = [
        ClassName::Alnum,
        ClassName::Alpha,
        ClassName::Blank,
        ClassName::Cntrl,
        ClassName::Digit,
        ClassName::Graph,
        ClassName::Lower,
        ClassName::Print,
        ClassName::Punct,
        ClassName::Space,
        ClassName::Upper,
        ClassName::Xdigit,
        ClassName::Ascii,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ClassName::Alnum => "alnum",
            ClassName::Alpha => "alpha",
            ClassName::Blank => "blank",
            ClassName::Cntrl => "cntrl",
            ClassName::Digit => "digit",
            ClassName::Graph => "graph",
            ClassName::Lower => "lower",
            ClassName::Print => "print",
            ClassName::Punct => "punct",
            ClassName::Space => "space",
            ClassName::Upper => "upper",
            ClassName::Xdigit => "xdigit",
            ClassName::Ascii => "ascii",
        }
    }

    /// Whether `c` belongs to this class.
    #[must_use]
    pub fn matches(self, c: char) -> bool {
        match self {
            ClassName::Alnum => c.is_ascii_alphanumeric(),
            ClassName::Alpha => c.is_ascii_alphabetic(),
            ClassName::Blank => c == ' ' || c == '\t',
            ClassName::Cntrl => c.is_ascii_control(),
            ClassName::Digit => c.is_ascii_digit(),
            ClassName::Graph => c.is_ascii_graphic(),
            ClassName::Lower => c.is_ascii_lowercase(),
            ClassName::Print => c.is_ascii_graphic() || c == ' ',
            ClassName::Punct => c.is_ascii_punctuation(),
            // POSIX space includes vertical tab, which is_ascii_whitespace omits.
            ClassName::Space => matches!(c, ' ' | '\t'..='\r'),
            ClassName::Upper => c.is_ascii_uppercase(),
            ClassName::Xdigit => c.is_ascii_hexdigit(),
            ClassName::Ascii => c.is_ascii(),
        }
    }

    /// The class members, in code-point order.
    #[must_use]
    pub fn chars(self) -> &'static [char] {
        &table()[self as usize]
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassName {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassName::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| UsageError::UnknownCharClass(s.to_string()))
    }
}

/// The ASCII range, in code-point order.
pub fn ascii() -> impl Iterator<Item = char> {
    (0u8..=127).map(char::from)
}

fn table() -> &'static [Vec<char>; CLASSES_COUNT] {
    static TABLE: OnceLock<[Vec<char>; CLASSES_COUNT]> = OnceLock::new();
    TABLE.get_or_init(|| {
        ClassName::ALL.map(|class| ascii().filter(|&c| class.matches(c)).collect())
    })
}

/// A class to draw characters from: named, or any predicate over ASCII.
#[derive(Clone)]
pub enum CharClass {
    Named(ClassName),
    Matching(Rc<dyn Fn(char) -> bool>),
}

impl CharClass {
    /// Ad-hoc class of the ASCII characters accepted by `predicate`.
    pub fn matching(predicate: impl Fn(char) -> bool + 'static) -> Self {
        CharClass::Matching(Rc::new(predicate))
    }

    /// Resolve to the ordered member characters.
    ///
    /// Fails if the class has no members.
    pub fn resolve(&self) -> Result<Cow<'static, [char]>, UsageError> {
        let chars: Cow<'static, [char]> = match self {
            CharClass::Named(class) => Cow::Borrowed(class.chars()),
            CharClass::Matching(predicate) => {
                Cow::Owned(ascii().filter(|&c| predicate(c)).collect())
            }
        };
        if chars.is_empty() {
            return Err(UsageError::EmptyCharClass(self.to_string()));
        }
        Ok(chars)
    }
}

impl From<ClassName> for CharClass {
    fn from(class: ClassName) -> Self {
        CharClass::Named(class)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Named(class) => write!(f, "{}", class),
            CharClass::Matching(_) => f.write_str("<matcher>"),
        }
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Named(class) => f.debug_tuple("Named").field(class).finish(),
            CharClass::Matching(_) => f.write_str("Matching(..)"),
        }
    }
}
