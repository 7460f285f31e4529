use log::{info, warn};

use mbti_atlas::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod cache;
pub mod io_csv;

#[derive(Debug, Snafu)]
pub enum AtlasError {
    #[snafu(display("Input file not found: {path}"))]
    MissingFile { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV record"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Missing required column {name} in {path}"))]
    MissingColumn { name: String, path: String },
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary { source: std::io::Error, path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AtlasResult<T> = Result<T, AtlasError>;

/// The session-scoped result of one load: everything the presentation
/// layer reads. Computed once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAtlas {
    pub profiles: Vec<CountryProfile>,
    pub directory: BTreeMap<String, TypeMetadata>,
    pub global: GlobalStats,
}

/// Reads the two input files and runs the aggregation. Both files must
/// exist; malformed rows inside them are skipped, not fatal.
pub fn load_and_process(countries_path: &str, types_path: &str) -> AtlasResult<LoadedAtlas> {
    ensure!(
        Path::new(countries_path).exists(),
        MissingFileSnafu {
            path: countries_path
        }
    );
    ensure!(
        Path::new(types_path).exists(),
        MissingFileSnafu { path: types_path }
    );

    let rows = io_csv::read_countries_csv(countries_path)?;
    let type_rows = io_csv::read_types_csv(types_path)?;

    let profiles = run_survey_stats(&rows);
    let directory = build_type_directory(&type_rows);
    let global = global_survey_stats(&profiles);
    info!(
        "loaded {} country profiles and {} type entries",
        profiles.len(),
        directory.len()
    );

    Ok(LoadedAtlas {
        profiles,
        directory,
        global,
    })
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SummaryHeader {
    #[serde(rename = "countryCount")]
    pub country_count: usize,
    #[serde(rename = "typeCount")]
    pub type_count: usize,
}

fn temperaments_to_json(t: &TemperamentShare) -> JSValue {
    json!({
        "NF": t.nf,
        "NT": t.nt,
        "SP": t.sp,
        "SJ": t.sj,
    })
}

fn variants_to_json(v: &VariantShare) -> JSValue {
    json!({
        "A": v.assertive,
        "T": v.turbulent,
    })
}

fn profile_to_json(p: &CountryProfile) -> JSValue {
    let mut types: JSMap<String, JSValue> = JSMap::new();
    for (label, v) in p.types.iter() {
        types.insert(label.clone(), json!(v));
    }
    json!({
        "country": p.country,
        "countryCode": p.country_code,
        "dominantType": p.dominant_type,
        "dominantTemperament": p.dominant_temperament.code(),
        "temperaments": temperaments_to_json(&p.temperaments),
        "variants": variants_to_json(&p.variants),
        "types": types,
    })
}

fn metadata_to_json(m: &TypeMetadata) -> JSValue {
    json!({
        "nickname": m.nickname,
        "description": m.description,
        "attitude": m.attitude,
        "perception": m.perception,
        "judgment": m.judgment,
        "lifestyle": m.lifestyle,
        "temperament": m.temperament.map(|t| t.code()),
    })
}

/// Assembles the JSON summary. `selection` restricts the emitted profiles
/// when non-empty; the global statistics always cover the full load.
pub fn build_summary_js(atlas: &LoadedAtlas, selection: &[String]) -> JSValue {
    for name in selection.iter() {
        if !atlas.profiles.iter().any(|p| p.country == *name) {
            warn!("requested country not in the loaded profiles: {:?}", name);
        }
    }
    let profiles: Vec<JSValue> = atlas
        .profiles
        .iter()
        .filter(|p| selection.is_empty() || selection.contains(&p.country))
        .map(profile_to_json)
        .collect();

    let mut types: JSMap<String, JSValue> = JSMap::new();
    for (label, m) in atlas.directory.iter() {
        types.insert(label.clone(), metadata_to_json(m));
    }

    let header = SummaryHeader {
        country_count: profiles.len(),
        type_count: atlas.directory.len(),
    };
    json!({
        "config": header,
        "profiles": profiles,
        "global": {
            "temperaments": temperaments_to_json(&atlas.global.temperaments),
            "variants": variants_to_json(&atlas.global.variants),
            "types": atlas.global.types.iter().map(|(l, v)| (l.clone(), json!(v))).collect::<JSMap<String, JSValue>>(),
        },
        "typeDirectory": types,
    })
}

pub fn read_summary(path: &str) -> AtlasResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// The main entry point of the command line: load (through the session
/// cache), emit the summary, optionally check it against a reference.
pub fn run_report(args: &Args) -> AtlasResult<()> {
    let mut cache = cache::LoadCache::new();
    let atlas = cache.get_or_load(&args.countries, &args.types)?;

    let summary = build_summary_js(&atlas, &args.country);
    let pretty = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;

    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty),
        Some(path) => fs::write(path, &pretty).context(WritingSummarySnafu { path })?,
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        let reference = read_summary(reference_path)?;
        let pretty_reference =
            serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
        if pretty_reference != pretty {
            warn!("Found differences with the reference summary");
            print_diff(pretty_reference.as_str(), pretty.as_str(), "\n");
            whatever!("Difference detected between computed summary and reference summary");
        }
    }

    Ok(())
}
