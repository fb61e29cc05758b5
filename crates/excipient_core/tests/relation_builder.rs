use excipient_core::{
    AsymmetryPolicy, GridError, IncompatibilityGrid, IncompatibilityPair, IncompatibilityRelation,
    Severity, Table,
};

fn build(text: &str, policy: AsymmetryPolicy) -> Result<IncompatibilityRelation, GridError> {
    let table = Table::from_delimited_str(text, ',').unwrap();
    let grid = IncompatibilityGrid::from_table(&table)?;
    IncompatibilityRelation::build(&grid, policy)
}

fn pair(a: &str, b: &str) -> IncompatibilityPair {
    IncompatibilityPair::new(a, b).unwrap()
}

#[test]
fn codes_map_to_major_minor_and_nothing() {
    let relation = build(
        ",Magnesium Stearate,Talc,Mannitol\nLactose,2,1,0\n",
        AsymmetryPolicy::Reject,
    )
    .unwrap();

    assert!(relation.major().contains(&pair("Lactose", "Magnesium Stearate")));
    assert!(relation.minor().contains(&pair("Talc", "Lactose")));
    assert_eq!(relation.severity_of(&pair("Lactose", "Mannitol")), None);
    assert_eq!(relation.major().len() + relation.minor().len(), 2);
}

#[test]
fn universe_is_union_of_row_and_column_labels() {
    let relation = build(",Talc\nLactose,1\nStarch,\n", AsymmetryPolicy::Flag).unwrap();
    let names: Vec<String> = relation
        .excipient_list()
        .into_iter()
        .map(|name| name.into_string())
        .collect();
    assert_eq!(names, vec!["Lactose", "Starch", "Talc"]);
    assert!(relation.contains_excipient(" Starch "));
}

#[test]
fn major_and_minor_sets_stay_disjoint_under_conflicts() {
    let relation = build(
        ",A,B,C\nA,,1,2\nB,2,,1\nC,1,1,\n",
        AsymmetryPolicy::Flag,
    )
    .unwrap();

    for major in relation.major() {
        assert!(!relation.minor().contains(major));
    }
    // A-B: 1 then 2 -> Major. A-C: 2 then 1 -> Minor. B-C: 1 and 1 -> Minor.
    assert_eq!(relation.severity_of(&pair("A", "B")), Some(Severity::Major));
    assert_eq!(relation.severity_of(&pair("A", "C")), Some(Severity::Minor));
    assert_eq!(relation.severity_of(&pair("B", "C")), Some(Severity::Minor));
    assert_eq!(relation.conflicts().len(), 2);
}

#[test]
fn reject_policy_lists_every_conflict() {
    let err = build(",A,B,C\nA,,1,2\nB,2,,1\nC,1,1,\n", AsymmetryPolicy::Reject).unwrap_err();
    match err {
        GridError::Asymmetric(conflicts) => {
            let pairs: Vec<String> = conflicts.iter().map(|c| c.pair.to_string()).collect();
            assert_eq!(pairs, vec!["A & B", "A & C"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unrecognized_cells_mean_no_finding() {
    let relation = build(",B,C\nA,yes,1\n", AsymmetryPolicy::Reject).unwrap();
    assert_eq!(relation.severity_of(&pair("A", "B")), None);
    assert_eq!(relation.severity_of(&pair("A", "C")), Some(Severity::Minor));
}

#[test]
fn malformed_grid_is_an_error_not_an_empty_relation() {
    let table = Table::from_delimited_str(",A\n,1\n", ',').unwrap();
    assert!(IncompatibilityGrid::from_table(&table).is_err());

    assert!(Table::from_delimited_str("", ',').is_err());
}
