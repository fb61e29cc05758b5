use excipient_core::{
    evaluate, evaluate_with_sets, normalize_selection, IncompatibilityGrid, IncompatibilityPair,
    IncompatibilityRelation, Severity, Table, Verdict,
};

const SCENARIO_GRID: &str = "\
,Lactose,Magnesium Stearate,Talc
Lactose,0,2,1
Magnesium Stearate,2,0,0
Talc,1,0,0
";

fn scenario() -> IncompatibilityRelation {
    let table = Table::from_delimited_str(SCENARIO_GRID, ',').unwrap();
    let grid = IncompatibilityGrid::from_table(&table).unwrap();
    IncompatibilityRelation::build(&grid, Default::default()).unwrap()
}

fn pair(a: &str, b: &str) -> IncompatibilityPair {
    IncompatibilityPair::new(a, b).unwrap()
}

#[test]
fn documented_scenario_produces_expected_findings() {
    let relation = scenario();
    let selection = normalize_selection(["Lactose", "Magnesium Stearate", "Talc"]);
    let findings = evaluate(&selection, &relation);

    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].pair, pair("Lactose", "Magnesium Stearate"));
    assert_eq!(findings[0].severity, Severity::Major);
    assert_eq!(findings[1].pair, pair("Lactose", "Talc"));
    assert_eq!(findings[1].severity, Severity::Minor);
    assert!(!findings
        .iter()
        .any(|finding| finding.pair == pair("Magnesium Stearate", "Talc")));
}

#[test]
fn two_element_evaluation_is_order_independent() {
    let relation = scenario();
    for (a, b, expected) in [
        ("Lactose", "Magnesium Stearate", Some(Severity::Major)),
        ("Lactose", "Talc", Some(Severity::Minor)),
        ("Magnesium Stearate", "Talc", None),
    ] {
        let forward = evaluate(&normalize_selection([a, b]), &relation);
        let backward = evaluate(&normalize_selection([b, a]), &relation);
        assert_eq!(forward, backward);
        assert_eq!(forward.first().map(|finding| finding.severity), expected);
    }
}

#[test]
fn findings_never_exceed_pair_count() {
    let relation = scenario();
    let selection = normalize_selection(["Talc", "Lactose", "Magnesium Stearate", "Unknown"]);
    let n = selection.len();
    let findings = evaluate(&selection, &relation);
    assert!(findings.len() <= n * (n - 1) / 2);
    assert_eq!(findings.len(), 2);
}

#[test]
fn fully_incompatible_selection_hits_pair_count() {
    let relation = IncompatibilityRelation::from_pairs(
        [pair("A", "B"), pair("B", "C")],
        [pair("A", "C")],
    );
    let findings = evaluate(&normalize_selection(["A", "B", "C"]), &relation);
    assert_eq!(findings.len(), 3);
}

#[test]
fn selection_names_are_normalized_before_lookup() {
    let relation = scenario();
    let findings = evaluate(&normalize_selection([" Talc ", "Lactose\t"]), &relation);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Minor);
}

#[test]
fn explicit_sets_match_relation_evaluation() {
    let relation = scenario();
    let selection = normalize_selection(["Talc", "Magnesium Stearate", "Lactose"]);
    assert_eq!(
        evaluate_with_sets(&selection, relation.major(), relation.minor()),
        evaluate(&selection, &relation)
    );
}

#[test]
fn empty_selection_is_not_compatible() {
    let relation = scenario();
    let findings = evaluate(&[], &relation);
    assert!(findings.is_empty());
    assert_eq!(Verdict::from_findings(&[], &findings), Verdict::NoExcipients);
}
