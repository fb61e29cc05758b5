use excipient_core::{
    AsymmetryPolicy, GridError, LoadOptions, ReferenceData, ReferenceError, TableError,
    NO_DESCRIPTION, NO_EXPLANATION,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const GRID_CSV: &str = "\
,Lactose ,Magnesium Stearate,Talc
 Lactose,0,2.0,1
Magnesium Stearate,2,0,0
Talc,1,0,0
";

#[test]
fn loads_grid_and_lookups_from_mixed_formats() {
    let dir = TempDir::new().unwrap();
    let grid = write(dir.path(), "grid.csv", GRID_CSV);
    let explanations = write(
        dir.path(),
        "explanations.tsv",
        "Excipient1\tExcipient2\tRationale\nTalc\tLactose\tSurface adsorption\n\tTalc\tbad row\n",
    );
    let descriptions = write(
        dir.path(),
        "descriptions.json",
        r#"{"header": ["Excipient", "Description"], "rows": [["Talc ", "Glidant and lubricant"]]}"#,
    );

    let options = LoadOptions::new(grid)
        .with_explanations(explanations)
        .with_descriptions(descriptions);
    let reference = ReferenceData::load(&options).unwrap();

    let names: Vec<String> = reference
        .excipient_list()
        .into_iter()
        .map(|name| name.into_string())
        .collect();
    assert_eq!(names, vec!["Lactose", "Magnesium Stearate", "Talc"]);
    assert_eq!(reference.explanations().len(), 1);
    assert_eq!(
        reference.explanations().explain_names("Lactose", "Talc"),
        "Surface adsorption"
    );
    assert_eq!(
        reference.descriptions().describe("Talc"),
        "Glidant and lubricant"
    );
    assert_eq!(reference.descriptions().describe("Lactose"), NO_DESCRIPTION);
}

#[test]
fn missing_grid_is_fatal() {
    let dir = TempDir::new().unwrap();
    let options = LoadOptions::new(dir.path().join("absent.csv"));
    let err = ReferenceData::load(&options).unwrap_err();
    assert!(matches!(
        err,
        ReferenceError::Grid(GridError::Table(TableError::Io { .. }))
    ));
}

#[test]
fn asymmetric_grid_is_fatal_only_under_reject() {
    let dir = TempDir::new().unwrap();
    let grid = write(dir.path(), "grid.csv", ",A,B\nA,,1\nB,2,\n");

    let flagged = ReferenceData::load(&LoadOptions::new(&grid)).unwrap();
    assert_eq!(flagged.relation().conflicts().len(), 1);

    let strict = LoadOptions::new(&grid).with_asymmetry_policy(AsymmetryPolicy::Reject);
    let err = ReferenceData::load(&strict).unwrap_err();
    assert!(err.to_string().contains("asymmetric"));
}

#[test]
fn broken_lookup_tables_degrade_to_fallbacks() {
    let dir = TempDir::new().unwrap();
    let grid = write(dir.path(), "grid.csv", GRID_CSV);
    let explanations = write(dir.path(), "explanations.csv", "Excipient1,Rationale\nA,B\n");
    let descriptions = write(dir.path(), "descriptions.json", "{not json");

    let options = LoadOptions::new(grid)
        .with_explanations(explanations)
        .with_descriptions(descriptions);
    let reference = ReferenceData::load(&options).unwrap();

    assert!(reference.explanations().is_empty());
    assert!(reference.descriptions().is_empty());
    assert_eq!(
        reference.explanations().explain_names("Lactose", "Talc"),
        NO_EXPLANATION
    );
}
