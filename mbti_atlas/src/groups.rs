// The static partition of the 16 type codes into the 4 Keirsey
// temperaments, and the two survey variants.

/// One of the four temperament groups. Together they partition the 16
/// type codes: every code belongs to exactly one temperament.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Temperament {
    /// Idealists: INFJ, INFP, ENFJ, ENFP
    Nf,
    /// Rationals: INTJ, INTP, ENTJ, ENTP
    Nt,
    /// Artisans: ISTP, ISFP, ESTP, ESFP
    Sp,
    /// Guardians: ISTJ, ISFJ, ESTJ, ESFJ
    Sj,
}

impl Temperament {
    /// Declaration order, which is also the tie-breaking order for
    /// dominant-temperament computation.
    pub const ALL: [Temperament; 4] = [
        Temperament::Nf,
        Temperament::Nt,
        Temperament::Sp,
        Temperament::Sj,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Temperament::Nf => "NF",
            Temperament::Nt => "NT",
            Temperament::Sp => "SP",
            Temperament::Sj => "SJ",
        }
    }

    pub fn nickname(&self) -> &'static str {
        match self {
            Temperament::Nf => "Idealists",
            Temperament::Nt => "Rationals",
            Temperament::Sp => "Artisans",
            Temperament::Sj => "Guardians",
        }
    }
}

/// The complete set of recognized type codes, grouped by temperament.
pub const TYPE_CODES: [(&str, Temperament); 16] = [
    ("INFJ", Temperament::Nf),
    ("INFP", Temperament::Nf),
    ("ENFJ", Temperament::Nf),
    ("ENFP", Temperament::Nf),
    ("INTJ", Temperament::Nt),
    ("INTP", Temperament::Nt),
    ("ENTJ", Temperament::Nt),
    ("ENTP", Temperament::Nt),
    ("ISTP", Temperament::Sp),
    ("ISFP", Temperament::Sp),
    ("ESTP", Temperament::Sp),
    ("ESFP", Temperament::Sp),
    ("ISTJ", Temperament::Sj),
    ("ISFJ", Temperament::Sj),
    ("ESTJ", Temperament::Sj),
    ("ESFJ", Temperament::Sj),
];

/// Returns the temperament of a type label, or `None` for a label outside
/// the known partition. A trailing `-<variant>` suffix is ignored, so both
/// `"INFJ"` and `"INFJ-A"` map to NF. Never panics.
pub fn temperament_of(label: &str) -> Option<Temperament> {
    let base = match label.split_once('-') {
        Some((base, _)) => base,
        None => label,
    };
    TYPE_CODES
        .iter()
        .find(|(code, _)| *code == base)
        .map(|(_, t)| *t)
}

/// One of the two survey sub-variants suffixed to a type label in the raw
/// column names.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Variant {
    Assertive,
    Turbulent,
}

impl Variant {
    pub fn code(&self) -> &'static str {
        match self {
            Variant::Assertive => "A",
            Variant::Turbulent => "T",
        }
    }

    /// Parses a variant id as found in a column label. Unknown ids are
    /// `None` and are excluded from variant totals only.
    pub fn from_id(id: &str) -> Option<Variant> {
        match id {
            "A" => Some(Variant::Assertive),
            "T" => Some(Variant::Turbulent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let codes: HashSet<&str> = TYPE_CODES.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.len(), 16);
        for t in Temperament::ALL {
            let members = TYPE_CODES.iter().filter(|(_, g)| *g == t).count();
            assert_eq!(members, 4, "temperament {:?} should have 4 types", t);
        }
    }

    #[test]
    fn strips_variant_suffix() {
        assert_eq!(temperament_of("INFJ"), Some(Temperament::Nf));
        assert_eq!(temperament_of("INFJ-A"), Some(Temperament::Nf));
        assert_eq!(temperament_of("ESTP-T"), Some(Temperament::Sp));
    }

    #[test]
    fn unknown_labels_are_none() {
        assert_eq!(temperament_of("ZZZZ"), None);
        assert_eq!(temperament_of(""), None);
        assert_eq!(temperament_of("INFJ-A-B"), Some(Temperament::Nf));
    }

    #[test]
    fn variant_ids() {
        assert_eq!(Variant::from_id("A"), Some(Variant::Assertive));
        assert_eq!(Variant::from_id("T"), Some(Variant::Turbulent));
        assert_eq!(Variant::from_id("X"), None);
        assert_eq!(Variant::from_id(""), None);
    }
}
