use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported bead category: '{0}'")]
pub struct ParseCategoryError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed bead type name: '{0}'")]
pub struct ParseBeadTypeError(String);

/// The nineteen bead categories of the non-bonded interaction table.
///
/// Declaration order is the row/column order of the interaction matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum BeadCategory {
    Qda = 0,
    Qd,
    Qa,
    Q0,
    P5,
    P4,
    P3,
    P2,
    P1,
    Nda,
    Nd,
    Na,
    N0,
    C5,
    C4,
    C3,
    C2,
    C1,
    BP4 = 18,
}

impl BeadCategory {
    pub const COUNT: usize = 19;

    pub const ALL: [BeadCategory; Self::COUNT] = [
        BeadCategory::Qda,
        BeadCategory::Qd,
        BeadCategory::Qa,
        BeadCategory::Q0,
        BeadCategory::P5,
        BeadCategory::P4,
        BeadCategory::P3,
        BeadCategory::P2,
        BeadCategory::P1,
        BeadCategory::Nda,
        BeadCategory::Nd,
        BeadCategory::Na,
        BeadCategory::N0,
        BeadCategory::C5,
        BeadCategory::C4,
        BeadCategory::C3,
        BeadCategory::C2,
        BeadCategory::C1,
        BeadCategory::BP4,
    ];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Looks up the category for a `(family, subtype)` pair, e.g. `("N", "da")`.
    pub fn from_parts(family: &str, subtype: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.family() == family && c.subtype() == subtype)
    }

    pub fn family(&self) -> &'static str {
        match self {
            BeadCategory::Qda | BeadCategory::Qd | BeadCategory::Qa | BeadCategory::Q0 => "Q",
            BeadCategory::P5
            | BeadCategory::P4
            | BeadCategory::P3
            | BeadCategory::P2
            | BeadCategory::P1 => "P",
            BeadCategory::Nda | BeadCategory::Nd | BeadCategory::Na | BeadCategory::N0 => "N",
            BeadCategory::C5
            | BeadCategory::C4
            | BeadCategory::C3
            | BeadCategory::C2
            | BeadCategory::C1 => "C",
            BeadCategory::BP4 => "BP",
        }
    }

    pub fn subtype(&self) -> &'static str {
        match self {
            BeadCategory::Qda | BeadCategory::Nda => "da",
            BeadCategory::Qd | BeadCategory::Nd => "d",
            BeadCategory::Qa | BeadCategory::Na => "a",
            BeadCategory::Q0 | BeadCategory::N0 => "0",
            BeadCategory::P5 | BeadCategory::C5 => "5",
            BeadCategory::P4 | BeadCategory::C4 | BeadCategory::BP4 => "4",
            BeadCategory::P3 | BeadCategory::C3 => "3",
            BeadCategory::P2 | BeadCategory::C2 => "2",
            BeadCategory::P1 | BeadCategory::C1 => "1",
        }
    }
}

impl fmt::Display for BeadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family(), self.subtype())
    }
}

impl FromStr for BeadCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bead_type: BeadType = s.parse().map_err(|_| ParseCategoryError(s.to_string()))?;
        bead_type
            .category()
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Size class of a bead. Small beads sit in rings and interact more weakly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeClass {
    #[default]
    Regular,
    Small,
}

impl SizeClass {
    #[inline]
    pub fn is_small(&self) -> bool {
        matches!(self, SizeClass::Small)
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeClass::Regular => write!(f, "R"),
            SizeClass::Small => write!(f, "S"),
        }
    }
}

/// A bead's type letter(s) and subtype qualifier, e.g. `N` + `da`.
///
/// Any well-formed pair is accepted, including pairs the interaction table
/// does not know; [`BeadType::category`] returns `None` for those.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeadType {
    family: String,
    subtype: String,
}

impl BeadType {
    pub fn new(family: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            subtype: subtype.into(),
        }
    }

    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    #[inline]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn category(&self) -> Option<BeadCategory> {
        BeadCategory::from_parts(&self.family, &self.subtype)
    }

    #[inline]
    pub fn is_charged(&self) -> bool {
        self.family == "Q"
    }

    /// Parses a full Martini type name, including the optional `S` prefix.
    ///
    /// `"SP1"` is a small `P1` bead, `"BP4"` a regular `BP4` bead. The prefix
    /// is only read as a size marker when the remainder is a known category.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBeadTypeError`] if the name has no uppercase family or
    /// no subtype.
    pub fn parse_martini(name: &str) -> Result<(SizeClass, BeadType), ParseBeadTypeError> {
        if let Some(rest) = name.strip_prefix('S') {
            if let Ok(inner) = rest.parse::<BeadType>() {
                if inner.category().is_some() {
                    return Ok((SizeClass::Small, inner));
                }
            }
        }
        Ok((SizeClass::Regular, name.parse()?))
    }
}

impl From<BeadCategory> for BeadType {
    fn from(category: BeadCategory) -> Self {
        BeadType::new(category.family(), category.subtype())
    }
}

impl fmt::Display for BeadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family, self.subtype)
    }
}

impl FromStr for BeadType {
    type Err = ParseBeadTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .char_indices()
            .find(|(_, c)| !c.is_ascii_uppercase())
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (family, subtype) = s.split_at(split);

        if family.is_empty()
            || subtype.is_empty()
            || !subtype.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ParseBeadTypeError(s.to_string()));
        }

        Ok(BeadType::new(family, subtype))
    }
}
