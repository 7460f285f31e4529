// ********* Input data structures ***********

use std::collections::BTreeMap;

use crate::groups::Temperament;

/// One raw row of the countries table: a country name and the counts
/// recorded under each labelled column, in file order.
///
/// Column labels are expected to follow the `"<Type>-<Variant>"` convention
/// (e.g. `"INFJ-A"`). A missing cell is kept as `None` and treated as zero
/// by the aggregation.
#[derive(PartialEq, Debug, Clone)]
pub struct SurveyRow {
    pub country: String,
    pub counts: Vec<(String, Option<f64>)>,
}

/// One raw row of the types table, before derivation of the trait
/// direction strings.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TypeRow {
    pub label: String,
    pub nickname: String,
    pub description: String,
    /// Extraverted (true) or Introverted.
    pub extraverted: bool,
    /// Intuitive (true) or Sensing.
    pub intuitive: bool,
    /// Thinking (true) or Feeling.
    pub thinking: bool,
    /// Judging (true) or Prospecting.
    pub judging: bool,
}

// ******** Output data structures *********

/// Percentage of the national total held by each of the four temperaments.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct TemperamentShare {
    pub nf: f64,
    pub nt: f64,
    pub sp: f64,
    pub sj: f64,
}

impl TemperamentShare {
    pub fn get(&self, t: Temperament) -> f64 {
        match t {
            Temperament::Nf => self.nf,
            Temperament::Nt => self.nt,
            Temperament::Sp => self.sp,
            Temperament::Sj => self.sj,
        }
    }

    pub(crate) fn get_mut(&mut self, t: Temperament) -> &mut f64 {
        match t {
            Temperament::Nf => &mut self.nf,
            Temperament::Nt => &mut self.nt,
            Temperament::Sp => &mut self.sp,
            Temperament::Sj => &mut self.sj,
        }
    }
}

/// Percentage of the national total held by each survey variant.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct VariantShare {
    pub assertive: f64,
    pub turbulent: f64,
}

/// The aggregated profile of a single country.
///
/// All the percentage fields are computed against the same national total,
/// so the type percentages sum to 100 (up to rounding), as do the
/// temperament percentages.
#[derive(PartialEq, Debug, Clone)]
pub struct CountryProfile {
    pub country: String,
    /// ISO 3166-1 alpha-3 code. Countries that cannot be resolved do not
    /// appear in the output at all.
    pub country_code: String,
    /// The type with the largest accumulated count. Ties go to the
    /// lexicographically first label.
    pub dominant_type: String,
    /// The temperament with the largest accumulated count. Ties go to the
    /// first in declaration order (NF, NT, SP, SJ).
    pub dominant_temperament: Temperament,
    pub temperaments: TemperamentShare,
    pub variants: VariantShare,
    /// Percentage per base type label, in lexicographic order.
    pub types: BTreeMap<String, f64>,
}

/// Unweighted means of every percentage field across all country profiles.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct GlobalStats {
    pub temperaments: TemperamentShare,
    pub variants: VariantShare,
    pub types: BTreeMap<String, f64>,
}

/// Derived metadata for one personality type, keyed by its 4-letter label.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TypeMetadata {
    pub nickname: String,
    pub description: String,
    /// "Extraverted" or "Introverted"
    pub attitude: &'static str,
    /// "Intuitive" or "Sensing"
    pub perception: &'static str,
    /// "Thinking" or "Feeling"
    pub judgment: &'static str,
    /// "Judging" or "Prospecting"
    pub lifestyle: &'static str,
    /// None for labels outside the known 16-type partition.
    pub temperament: Option<Temperament>,
}
