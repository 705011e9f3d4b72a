use super::types::{BeadType, ParseBeadTypeError, SizeClass};

#[derive(Debug, Clone, PartialEq)]
pub struct Bead {
    pub index: usize,
    pub bead_type: BeadType,
    pub size: SizeClass,
    pub position: [f64; 3],
    pub mass: f64,
}

impl Bead {
    pub fn new(
        index: usize,
        bead_type: BeadType,
        size: SizeClass,
        position: [f64; 3],
        mass: f64,
    ) -> Self {
        Self {
            index,
            bead_type,
            size,
            position,
            mass,
        }
    }

    /// Builds a bead from a Martini type name such as `"SP1"` or `"Nda"`.
    pub fn from_martini(
        index: usize,
        name: &str,
        position: [f64; 3],
        mass: f64,
    ) -> Result<Self, ParseBeadTypeError> {
        let (size, bead_type) = BeadType::parse_martini(name)?;
        Ok(Self::new(index, bead_type, size, position, mass))
    }
}
