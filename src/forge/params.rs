use super::error::Error;
use crate::model::topology::TermParams;
use crate::model::types::BeadType;
use serde::Deserialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::OnceLock;

const DEFAULT_PARAMS_TOML: &str = include_str!("../../resources/default.params.toml");

static DEFAULT_PARAMS: OnceLock<ParameterStore> = OnceLock::new();

#[derive(Debug, Clone, Deserialize)]
struct ParameterTables {
    #[serde(default)]
    bonds: Vec<BondEntry>,
    #[serde(default)]
    angles: Vec<AngleEntry>,
    #[serde(default)]
    dihedrals: Vec<DihedralEntry>,
    #[serde(default)]
    angle_defaults: Vec<TypeDefaultEntry>,
    #[serde(default)]
    dihedral_defaults: Vec<TypeDefaultEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct BondEntry {
    beads: [usize; 2],
    length: f64,
    k: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct AngleEntry {
    beads: [usize; 3],
    angle: f64,
    k: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct DihedralEntry {
    beads: [usize; 4],
    angle: f64,
    k: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct TypeDefaultEntry {
    types: Vec<String>,
    angle: f64,
    k: f64,
}

/// Read-only bonded parameter tables.
///
/// Values are stored as imported: lengths in system units, angles in
/// degrees, force constants before the configured import scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterStore {
    bonds: HashMap<[usize; 2], TermParams>,
    angles: HashMap<[usize; 3], TermParams>,
    dihedrals: HashMap<[usize; 4], TermParams>,
    angle_defaults: HashMap<[BeadType; 3], TermParams>,
    dihedral_defaults: HashMap<[BeadType; 4], TermParams>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses parameter tables from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterParse`] for malformed TOML and
    /// [`Error::InvalidParameterEntry`] for a type-default key that is not a
    /// bead type name or has the wrong arity.
    pub fn from_toml(toml: &str) -> Result<Self, Error> {
        let tables: ParameterTables = toml::from_str(toml)?;
        let mut store = Self::new();

        for entry in tables.bonds {
            store.insert_bond(entry.beads, TermParams::new(entry.length, entry.k));
        }
        for entry in tables.angles {
            store.insert_angle(entry.beads, TermParams::new(entry.angle, entry.k));
        }
        for entry in tables.dihedrals {
            store.insert_dihedral(entry.beads, TermParams::new(entry.angle, entry.k));
        }
        for entry in tables.angle_defaults {
            let types = parse_type_key::<3>("angle_defaults", &entry.types)?;
            store.insert_angle_default(types, TermParams::new(entry.angle, entry.k));
        }
        for entry in tables.dihedral_defaults {
            let types = parse_type_key::<4>("dihedral_defaults", &entry.types)?;
            store.insert_dihedral_default(types, TermParams::new(entry.angle, entry.k));
        }

        Ok(store)
    }

    pub fn insert_bond(&mut self, beads: [usize; 2], params: TermParams) {
        self.bonds.insert(beads, params);
    }

    pub fn insert_angle(&mut self, beads: [usize; 3], params: TermParams) {
        self.angles.insert(beads, params);
    }

    pub fn insert_dihedral(&mut self, beads: [usize; 4], params: TermParams) {
        self.dihedrals.insert(beads, params);
    }

    pub fn insert_angle_default(&mut self, types: [BeadType; 3], params: TermParams) {
        self.angle_defaults.insert(types, params);
    }

    pub fn insert_dihedral_default(&mut self, types: [BeadType; 4], params: TermParams) {
        self.dihedral_defaults.insert(types, params);
    }

    /// Bond parameters for `beads`, probing the key and then its reversal.
    pub fn bond(&self, beads: [usize; 2]) -> Option<TermParams> {
        probe(&self.bonds, &beads)
    }

    pub fn angle(&self, beads: [usize; 3]) -> Option<TermParams> {
        probe(&self.angles, &beads)
    }

    pub fn dihedral(&self, beads: [usize; 4]) -> Option<TermParams> {
        probe(&self.dihedrals, &beads)
    }

    pub fn angle_default(&self, types: &[BeadType; 3]) -> Option<TermParams> {
        probe(&self.angle_defaults, types)
    }

    pub fn dihedral_default(&self, types: &[BeadType; 4]) -> Option<TermParams> {
        probe(&self.dihedral_defaults, types)
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
            && self.angles.is_empty()
            && self.dihedrals.is_empty()
            && self.angle_defaults.is_empty()
            && self.dihedral_defaults.is_empty()
    }

    /// Checks that every per-index entry names distinct beads below `n_beads`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameterEntry`] for the first offending entry.
    pub fn validate(&self, n_beads: usize) -> Result<(), Error> {
        check_keys("bonds", self.bonds.keys(), n_beads)?;
        check_keys("angles", self.angles.keys(), n_beads)?;
        check_keys("dihedrals", self.dihedrals.keys(), n_beads)?;
        Ok(())
    }
}

fn probe<K, const N: usize>(map: &HashMap<[K; N], TermParams>, key: &[K; N]) -> Option<TermParams>
where
    K: Hash + Eq + Clone,
{
    if let Some(params) = map.get(key) {
        return Some(*params);
    }
    let mut reversed = key.clone();
    reversed.reverse();
    map.get(&reversed).copied()
}

fn check_keys<'a, const N: usize>(
    table: &'static str,
    keys: impl Iterator<Item = &'a [usize; N]>,
    n_beads: usize,
) -> Result<(), Error> {
    for key in keys {
        if let Some(&bad) = key.iter().find(|&&b| b >= n_beads) {
            return Err(Error::invalid_parameter_entry(
                table,
                key,
                format!("bead {} out of bounds (n_beads = {})", bad, n_beads),
            ));
        }
        for (pos, bead) in key.iter().enumerate() {
            if key[pos + 1..].contains(bead) {
                return Err(Error::invalid_parameter_entry(
                    table,
                    key,
                    format!("bead {} repeats", bead),
                ));
            }
        }
    }
    Ok(())
}

fn parse_type_key<const N: usize>(
    table: &'static str,
    names: &[String],
) -> Result<[BeadType; N], Error> {
    if names.len() != N {
        return Err(Error::invalid_parameter_entry(
            table,
            names,
            format!("expected {} bead types, found {}", N, names.len()),
        ));
    }

    let parsed = names
        .iter()
        .map(|name| {
            name.parse::<BeadType>()
                .map_err(|e| Error::invalid_parameter_entry(table, names, e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    parsed
        .try_into()
        .map_err(|_| Error::invalid_parameter_entry(table, names, "arity mismatch"))
}

pub fn load_parameters(custom_toml: Option<&str>) -> Result<ParameterStore, Error> {
    match custom_toml {
        Some(toml) => ParameterStore::from_toml(toml),
        None => Ok(get_default_parameters().clone()),
    }
}

pub fn get_default_parameters() -> &'static ParameterStore {
    DEFAULT_PARAMS.get_or_init(|| {
        ParameterStore::from_toml(DEFAULT_PARAMS_TOML)
            .expect("Failed to parse embedded default parameters. This is a library bug.")
    })
}
