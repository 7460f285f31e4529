// Primitives for reading the two CSV input files.

use log::{debug, warn};
use snafu::prelude::*;

use mbti_atlas::{SurveyRow, TypeRow};

use crate::atlas::{AtlasResult, CsvLineParseSnafu, CsvOpenSnafu, MissingColumnSnafu};

/// Reads the countries table: a `Country` column plus one numeric column
/// per `<Type>-<Variant>` label.
///
/// Cells that are empty or do not parse as a non-negative number are kept
/// as `None`; records that cannot be decoded at all are skipped with a
/// warning. Only a missing file-level structure (no `Country` column) is
/// fatal.
pub fn read_countries_csv(path: &str) -> AtlasResult<Vec<SurveyRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let headers = rdr.headers().context(CsvLineParseSnafu {})?.clone();
    let country_idx = headers
        .iter()
        .position(|h| h == "Country")
        .context(MissingColumnSnafu {
            name: "Country",
            path,
        })?;
    let labels: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != country_idx)
        .map(|(idx, h)| (idx, h.to_string()))
        .collect();

    let mut res: Vec<SurveyRow> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        // The header occupies line 1.
        let lineno = idx + 2;
        let record = match record_r {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping unreadable record at line {}: {}", lineno, e);
                continue;
            }
        };
        let country = match record.get(country_idx) {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => {
                warn!("skipping line {}: empty country name", lineno);
                continue;
            }
        };
        let counts: Vec<(String, Option<f64>)> = labels
            .iter()
            .map(|(col, label)| {
                let cell = record.get(*col).unwrap_or("");
                (label.clone(), parse_count(cell, label, lineno))
            })
            .collect();
        debug!("read_countries_csv: line {}: {:?}", lineno, country);
        res.push(SurveyRow { country, counts });
    }
    Ok(res)
}

fn parse_count(cell: &str, label: &str, lineno: usize) -> Option<f64> {
    let s = cell.trim();
    if s.is_empty() || s == "NA" {
        return None;
    }
    match s.parse::<f64>() {
        Ok(v) if v >= 0.0 => Some(v),
        Ok(v) => {
            warn!(
                "line {}: negative count {} for {:?}, treated as missing",
                lineno, v, label
            );
            None
        }
        Err(_) => {
            warn!(
                "line {}: non-numeric cell {:?} for {:?}, treated as missing",
                lineno, s, label
            );
            None
        }
    }
}

/// Reads the types table: `Type`, `Nickname`, `Description` and the four
/// binary trait columns `E`, `N`, `T`, `J`.
///
/// Only the `Type` column is required. Missing text columns default to
/// empty strings; a missing or non-`1` flag cell reads as 0.
pub fn read_types_csv(path: &str) -> AtlasResult<Vec<TypeRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let headers = rdr.headers().context(CsvLineParseSnafu {})?.clone();
    let col = |name: &str| headers.iter().position(|h| h == name);
    let label_idx = col("Type").context(MissingColumnSnafu { name: "Type", path })?;
    let nickname_idx = col("Nickname");
    let description_idx = col("Description");
    let e_idx = col("E");
    let n_idx = col("N");
    let t_idx = col("T");
    let j_idx = col("J");

    let text = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };
    let flag = |record: &csv::StringRecord, idx: Option<usize>| -> bool {
        idx.and_then(|i| record.get(i)).map_or(false, |c| c.trim() == "1")
    };

    let mut res: Vec<TypeRow> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let lineno = idx + 2;
        let record = match record_r {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping unreadable record at line {}: {}", lineno, e);
                continue;
            }
        };
        let label = text(&record, Some(label_idx));
        if label.is_empty() {
            debug!("skipping line {}: empty type label", lineno);
            continue;
        }
        res.push(TypeRow {
            label,
            nickname: text(&record, nickname_idx),
            description: text(&record, description_idx),
            extraverted: flag(&record, e_idx),
            intuitive: flag(&record, n_idx),
            thinking: flag(&record, t_idx),
            judging: flag(&record, j_idx),
        });
    }
    Ok(res)
}
