//! Character requirements a password is checked against.

/// Symbols that satisfy the special-symbol requirement.
pub const SPECIAL_SYMBOLS: &str = "$&+,:;=?@#|'<>.^*()%!-";

/// A fixed character requirement: the password meets it when any of its
/// characters satisfies `predicate`.
#[derive(Clone, Copy)]
pub struct Requirement {
    pub label: &'static str,
    predicate: fn(char) -> bool,
}

impl Requirement {
    const fn new(label: &'static str, predicate: fn(char) -> bool) -> Self {
        Self { label, predicate }
    }

    #[must_use]
    pub fn is_met(&self, password: &str) -> bool {
        password.chars().any(self.predicate)
    }
}

impl std::fmt::Debug for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requirement")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Requirement {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Requirement {}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_special(c: char) -> bool {
    SPECIAL_SYMBOLS.contains(c)
}

/// Display order: number, letter, special symbol.
pub const REQUIREMENTS: [Requirement; 3] = [
    Requirement::new("Includes at least one number", is_digit),
    Requirement::new("Includes at least one letter", is_letter),
    Requirement::new("Includes at least one special symbol", is_special),
];

/// Password length in UTF-16 code units, the length a browser reports for
/// the input. Characters outside the Basic Multilingual Plane count twice.
#[must_use]
pub fn char_count(password: &str) -> usize {
    password.encode_utf16().count()
}
