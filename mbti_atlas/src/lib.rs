mod config;
mod countries;
mod groups;

use log::{debug, info};

use std::collections::BTreeMap;

pub use crate::config::*;
pub use crate::countries::resolve_code;
pub use crate::groups::{temperament_of, Temperament, Variant, TYPE_CODES};

// **** Private structures ****

// Accumulated raw sums for one country, before conversion to percentages.
#[derive(Debug, Clone, Default)]
struct CountryTally {
    types: BTreeMap<String, f64>,
    temperaments: TemperamentShare,
    variants: VariantShare,
    total: f64,
}

/// Aggregates the raw survey rows into one profile per retained country.
///
/// A row is dropped when its country name cannot be resolved to an alpha-3
/// code or when the sum of its counts is zero; everything else is
/// best-effort, so malformed columns shrink the tallies instead of failing
/// the whole aggregation. Output order is input row order.
///
/// Tie-breaking for the dominant fields is deterministic: the
/// lexicographically first type label wins, and temperaments are tried in
/// declaration order (NF, NT, SP, SJ).
pub fn run_survey_stats(rows: &[SurveyRow]) -> Vec<CountryProfile> {
    info!("run_survey_stats: processing {} survey rows", rows.len());
    let mut profiles: Vec<CountryProfile> = Vec::new();
    for row in rows.iter() {
        let code = match countries::resolve_code(&row.country) {
            Some(c) => c,
            None => {
                debug!("dropping row, unresolved country: {:?}", row.country);
                continue;
            }
        };

        let tally = tally_row(row);
        if tally.total == 0.0 {
            debug!("dropping row, zero total: {:?}", row.country);
            continue;
        }

        profiles.push(tally_to_profile(&row.country, code, &tally));
    }
    info!(
        "run_survey_stats: retained {} of {} rows",
        profiles.len(),
        rows.len()
    );
    profiles
}

fn tally_row(row: &SurveyRow) -> CountryTally {
    let mut tally = CountryTally::default();

    // The national total spans every present cell, including columns whose
    // label does not follow the <Type>-<Variant> convention.
    for (_, value) in row.counts.iter() {
        if let Some(v) = value {
            tally.total += v;
        }
    }

    for (label, value) in row.counts.iter() {
        let v = match value {
            Some(v) if *v > 0.0 => *v,
            _ => continue,
        };

        let (base, variant_id) = match split_label(label) {
            Some(parts) => parts,
            None => {
                debug!("column label not <type>-<variant>, skipped: {:?}", label);
                continue;
            }
        };

        *tally.types.entry(base.to_string()).or_insert(0.0) += v;

        // Unknown variant ids still count towards the type and temperament
        // sums, just not towards the variant split.
        match groups::Variant::from_id(variant_id) {
            Some(groups::Variant::Assertive) => tally.variants.assertive += v,
            Some(groups::Variant::Turbulent) => tally.variants.turbulent += v,
            None => {}
        }

        if let Some(t) = groups::temperament_of(base) {
            *tally.temperaments.get_mut(t) += v;
        }
    }
    tally
}

// A label is usable only when it splits into exactly two parts.
fn split_label(label: &str) -> Option<(&str, &str)> {
    let mut parts = label.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(base), Some(variant), None) => Some((base, variant)),
        _ => None,
    }
}

fn tally_to_profile(country: &str, code: &str, tally: &CountryTally) -> CountryProfile {
    let total = tally.total;

    // BTreeMap iteration is lexicographic, so with a strict comparison the
    // first label of a tie wins.
    let mut dominant_type = String::new();
    let mut best = f64::MIN;
    for (label, v) in tally.types.iter() {
        if *v > best {
            best = *v;
            dominant_type = label.clone();
        }
    }

    let mut dominant_temperament = Temperament::Nf;
    let mut best = f64::MIN;
    for t in Temperament::ALL {
        let v = tally.temperaments.get(t);
        if v > best {
            best = v;
            dominant_temperament = t;
        }
    }

    let types: BTreeMap<String, f64> = tally
        .types
        .iter()
        .map(|(label, v)| (label.clone(), v * 100.0 / total))
        .collect();

    CountryProfile {
        country: country.to_string(),
        country_code: code.to_string(),
        dominant_type,
        dominant_temperament,
        temperaments: TemperamentShare {
            nf: tally.temperaments.nf * 100.0 / total,
            nt: tally.temperaments.nt * 100.0 / total,
            sp: tally.temperaments.sp * 100.0 / total,
            sj: tally.temperaments.sj * 100.0 / total,
        },
        variants: VariantShare {
            assertive: tally.variants.assertive * 100.0 / total,
            turbulent: tally.variants.turbulent * 100.0 / total,
        },
        types,
    }
}

/// Builds the label -> metadata directory from the raw type rows.
///
/// Rows with an empty label are skipped. The four binary flags are turned
/// into their trait direction strings.
pub fn build_type_directory(rows: &[TypeRow]) -> BTreeMap<String, TypeMetadata> {
    let mut directory: BTreeMap<String, TypeMetadata> = BTreeMap::new();
    for row in rows.iter() {
        if row.label.is_empty() {
            debug!("skipping type row with empty label");
            continue;
        }
        directory.insert(
            row.label.clone(),
            TypeMetadata {
                nickname: row.nickname.clone(),
                description: row.description.clone(),
                attitude: if row.extraverted {
                    "Extraverted"
                } else {
                    "Introverted"
                },
                perception: if row.intuitive { "Intuitive" } else { "Sensing" },
                judgment: if row.thinking { "Thinking" } else { "Feeling" },
                lifestyle: if row.judging { "Judging" } else { "Prospecting" },
                temperament: groups::temperament_of(&row.label),
            },
        );
    }
    directory
}

/// Computes the unweighted mean of every percentage field across the given
/// profiles. Order-independent and pure.
///
/// A profile without an entry for some type label contributes 0 to that
/// label's mean; the divisor is always the full number of profiles. An
/// empty input yields all-zero means and an empty type map.
pub fn global_survey_stats(profiles: &[CountryProfile]) -> GlobalStats {
    if profiles.is_empty() {
        return GlobalStats::default();
    }
    let n = profiles.len() as f64;

    let mut stats = GlobalStats::default();
    for p in profiles.iter() {
        stats.temperaments.nf += p.temperaments.nf;
        stats.temperaments.nt += p.temperaments.nt;
        stats.temperaments.sp += p.temperaments.sp;
        stats.temperaments.sj += p.temperaments.sj;
        stats.variants.assertive += p.variants.assertive;
        stats.variants.turbulent += p.variants.turbulent;
        for (label, v) in p.types.iter() {
            *stats.types.entry(label.clone()).or_insert(0.0) += v;
        }
    }

    stats.temperaments.nf /= n;
    stats.temperaments.nt /= n;
    stats.temperaments.sp /= n;
    stats.temperaments.sj /= n;
    stats.variants.assertive /= n;
    stats.variants.turbulent /= n;
    for v in stats.types.values_mut() {
        *v /= n;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn row(country: &str, counts: &[(&str, Option<f64>)]) -> SurveyRow {
        SurveyRow {
            country: country.to_string(),
            counts: counts
                .iter()
                .map(|(l, v)| (l.to_string(), *v))
                .collect(),
        }
    }

    #[test]
    fn round_trip_single_country() {
        // AAAA and BBBB are not part of the 16-type partition on purpose:
        // they exercise the unknown-temperament path as well.
        let rows = vec![row(
            "Japan",
            &[
                ("AAAA-X", Some(10.0)),
                ("AAAA-Y", Some(30.0)),
                ("BBBB-X", Some(60.0)),
            ],
        )];
        let profiles = run_survey_stats(&rows);
        assert_eq!(profiles.len(), 1);
        let p = &profiles[0];
        assert_eq!(p.country_code, "JPN");
        assert_eq!(p.dominant_type, "BBBB");
        assert!((p.types["AAAA"] - 40.0).abs() < EPS);
        assert!((p.types["BBBB"] - 60.0).abs() < EPS);
        // X and Y are not known variant ids, so the variant split is empty.
        assert!(p.variants.assertive.abs() < EPS);
        assert!(p.variants.turbulent.abs() < EPS);
    }

    #[test]
    fn variant_split_with_known_ids() {
        let rows = vec![row(
            "France",
            &[
                ("INFJ-A", Some(10.0)),
                ("INFJ-T", Some(30.0)),
                ("ESTJ-A", Some(60.0)),
            ],
        )];
        let profiles = run_survey_stats(&rows);
        let p = &profiles[0];
        assert!((p.variants.assertive - 70.0).abs() < EPS);
        assert!((p.variants.turbulent - 30.0).abs() < EPS);
        assert_eq!(p.dominant_type, "ESTJ");
        assert_eq!(p.dominant_temperament, Temperament::Sj);
        assert!((p.temperaments.nf - 40.0).abs() < EPS);
        assert!((p.temperaments.sj - 60.0).abs() < EPS);
    }

    #[test]
    fn percentages_sum_to_100() {
        let rows = vec![row(
            "Germany",
            &[
                ("INFJ-A", Some(3.0)),
                ("INTP-T", Some(7.0)),
                ("ESFP-A", Some(11.0)),
                ("ISTJ-T", Some(19.0)),
                ("ENFP-A", Some(2.0)),
            ],
        )];
        let profiles = run_survey_stats(&rows);
        let p = &profiles[0];
        let type_sum: f64 = p.types.values().sum();
        assert!((type_sum - 100.0).abs() < EPS);
        let temp_sum =
            p.temperaments.nf + p.temperaments.nt + p.temperaments.sp + p.temperaments.sj;
        assert!((temp_sum - 100.0).abs() < EPS);
        let variant_sum = p.variants.assertive + p.variants.turbulent;
        assert!((variant_sum - 100.0).abs() < EPS);
    }

    #[test]
    fn dominant_is_maximal() {
        let rows = vec![row(
            "Italy",
            &[
                ("INFJ-A", Some(25.0)),
                ("INTP-A", Some(40.0)),
                ("ISTP-A", Some(35.0)),
            ],
        )];
        let profiles = run_survey_stats(&rows);
        let p = &profiles[0];
        let best = p.types[&p.dominant_type];
        for v in p.types.values() {
            assert!(best >= *v);
        }
        let best_temp = p.temperaments.get(p.dominant_temperament);
        for t in Temperament::ALL {
            assert!(best_temp >= p.temperaments.get(t));
        }
    }

    #[test]
    fn tie_break_is_lexicographic() {
        let rows = vec![row(
            "Spain",
            &[("INTP-A", Some(50.0)), ("INFJ-A", Some(50.0))],
        )];
        let profiles = run_survey_stats(&rows);
        // INFJ (NF) sorts before INTP (NT); both tie at 50.
        assert_eq!(profiles[0].dominant_type, "INFJ");
        assert_eq!(profiles[0].dominant_temperament, Temperament::Nf);
    }

    #[test]
    fn zero_total_and_unresolved_rows_are_dropped() {
        let rows = vec![
            row("Japan", &[("INFJ-A", Some(0.0)), ("INTP-A", None)]),
            row("Nowhereland", &[("INFJ-A", Some(10.0))]),
            row("France", &[("INFJ-A", Some(10.0))]),
        ];
        let profiles = run_survey_stats(&rows);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].country, "France");
    }

    #[test]
    fn unsplittable_columns_count_towards_total_only() {
        let rows = vec![row(
            "France",
            &[
                ("INFJ-A", Some(50.0)),
                ("Population", Some(50.0)),
                ("INFJ-A-extra", Some(25.0)),
            ],
        )];
        let profiles = run_survey_stats(&rows);
        let p = &profiles[0];
        // total = 125, only INFJ-A lands in a type bucket.
        assert_eq!(p.types.len(), 1);
        assert!((p.types["INFJ"] - 40.0).abs() < EPS);
    }

    #[test]
    fn input_row_order_is_preserved() {
        let rows = vec![
            row("Japan", &[("INFJ-A", Some(1.0))]),
            row("France", &[("INFJ-A", Some(1.0))]),
            row("Germany", &[("INFJ-A", Some(1.0))]),
        ];
        let profiles = run_survey_stats(&rows);
        let names: Vec<&str> = profiles.iter().map(|p| p.country.as_str()).collect();
        assert_eq!(names, vec!["Japan", "France", "Germany"]);
    }

    #[test]
    fn global_stats_empty() {
        let stats = global_survey_stats(&[]);
        assert_eq!(stats.temperaments, TemperamentShare::default());
        assert_eq!(stats.variants, VariantShare::default());
        assert!(stats.types.is_empty());
    }

    #[test]
    fn global_stats_means() {
        let rows = vec![
            row("Japan", &[("INFJ-A", Some(1.0))]),
            row("France", &[("INFJ-A", Some(1.0)), ("INTP-T", Some(1.0))]),
            row("Germany", &[("INTP-T", Some(1.0))]),
        ];
        let profiles = run_survey_stats(&rows);
        let stats = global_survey_stats(&profiles);
        // Profiles: INFJ = 100, 50, absent(0) -> mean 50. Same for INTP.
        assert!((stats.types["INFJ"] - 50.0).abs() < EPS);
        assert!((stats.types["INTP"] - 50.0).abs() < EPS);
        assert!((stats.temperaments.nf - 50.0).abs() < EPS);
        assert!((stats.temperaments.nt - 50.0).abs() < EPS);
        assert!((stats.variants.assertive - 50.0).abs() < EPS);
        assert!((stats.variants.turbulent - 50.0).abs() < EPS);
    }

    #[test]
    fn type_directory_skips_empty_labels() {
        let rows = vec![
            TypeRow {
                label: "INFJ".to_string(),
                nickname: "Advocate".to_string(),
                description: "Quiet and mystical".to_string(),
                extraverted: false,
                intuitive: true,
                thinking: false,
                judging: true,
            },
            TypeRow {
                label: "".to_string(),
                nickname: "".to_string(),
                description: "".to_string(),
                extraverted: false,
                intuitive: false,
                thinking: false,
                judging: false,
            },
        ];
        let directory = build_type_directory(&rows);
        assert_eq!(directory.len(), 1);
        let meta = &directory["INFJ"];
        assert_eq!(meta.attitude, "Introverted");
        assert_eq!(meta.perception, "Intuitive");
        assert_eq!(meta.judgment, "Feeling");
        assert_eq!(meta.lifestyle, "Judging");
        assert_eq!(meta.temperament, Some(Temperament::Nf));
    }
}
