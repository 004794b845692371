mod common;

use common::{rate_of, two_cluster_docs, DocBuilder};
use provenance::config::{AnalyzerConfig, OutOfRangePolicy, ScoringStrategyKind};
use provenance::model::PropertyModel;
use provenance::scorer::Scorer;
use provenance::store::{MemorySource, RecordStore};
use regex::Regex;
use serde_json::json;

fn scorer_of(docs: &[DocBuilder], kind: ScoringStrategyKind) -> Scorer {
    let mut rng = fastrand::Rng::with_seed(1);
    let source = MemorySource::new(docs.iter().map(|d| d.doc()).collect());
    let store = RecordStore::load(&source, &mut rng, '!');
    Scorer::new(PropertyModel::build(&store, &[]), kind)
}

fn friends_docs() -> Vec<DocBuilder> {
    vec![
        DocBuilder::new("Casual rel").series("x", &[0.0, 10.0]),
        DocBuilder::new("Close rel").series("x", &[20.0, 30.0]),
        DocBuilder::new("Other").series("x", &[90.0, 100.0]),
    ]
}

#[test]
fn test_low_value_scores_low_cluster() {
    let scorer = scorer_of(&two_cluster_docs(), ScoringStrategyKind::InverseDistance);
    let rates = scorer.score("x", 5.0, OutOfRangePolicy::Clamp);
    assert_eq!(rates.len(), 2);
    assert!(rate_of(&rates, "A") > rate_of(&rates, "B"));
}

#[test]
fn test_high_value_scores_high_cluster() {
    let scorer = scorer_of(&two_cluster_docs(), ScoringStrategyKind::InverseDistance);
    let rates = scorer.score("x", 95.0, OutOfRangePolicy::Clamp);
    assert!(rate_of(&rates, "B") > rate_of(&rates, "A"));
}

#[test]
fn test_unknown_and_degenerate_properties_rate_nobody() {
    let docs = vec![
        DocBuilder::new("A").month("2019-01", json!({"x": 0, "flat": 1})),
        DocBuilder::new("B").month("2019-01", json!({"x": 9, "flat": 1})),
    ];
    let scorer = scorer_of(&docs, ScoringStrategyKind::InverseDistance);
    assert!(scorer.score("missing", 1.0, OutOfRangePolicy::Clamp).is_empty());
    assert!(scorer.score("flat", 1.0, OutOfRangePolicy::Clamp).is_empty());
}

#[test]
fn test_out_of_range_policies() {
    let scorer = scorer_of(&two_cluster_docs(), ScoringStrategyKind::InverseDistance);

    let clamped = scorer.score("x", 200.0, OutOfRangePolicy::Clamp);
    let extrapolated = scorer.score("x", 200.0, OutOfRangePolicy::Extrapolate);

    // Clamped to the last bin, where B holds mass 0.5.
    assert!(rate_of(&clamped, "B") >= 0.5);
    assert!(rate_of(&extrapolated, "B") < 1e-9);
    assert!(rate_of(&extrapolated, "B") > rate_of(&extrapolated, "A"));

    let below = scorer.score("x", -50.0, OutOfRangePolicy::Clamp);
    assert!(rate_of(&below, "A") > rate_of(&below, "B"));
}

#[test]
fn test_extrapolated_classify_survives_extreme_values() {
    let config = AnalyzerConfig {
        out_of_range: OutOfRangePolicy::Extrapolate,
        ..AnalyzerConfig::default()
    };
    let sample = DocBuilder::new("?").series("x", &[-1.0e300, 1.0e300]).doc();
    for kind in [ScoringStrategyKind::InverseDistance, ScoringStrategyKind::GapInterpolated] {
        let scorer = scorer_of(&two_cluster_docs(), kind);
        let evaluation = scorer.evaluate(&sample, &config);

        assert!(evaluation
            .ranking
            .iter()
            .all(|s| s.rate.is_finite() && s.rate >= 0.0 && s.percent.is_finite()));
        for m in &evaluation.months {
            assert!(m.shares.iter().all(|s| s.rate.is_finite() && s.rate >= 0.0));
        }
    }
}

#[test]
fn test_gap_interpolated_exact_hit() {
    let scorer = scorer_of(&two_cluster_docs(), ScoringStrategyKind::GapInterpolated);
    let rates = scorer.score("x", 100.0, OutOfRangePolicy::Clamp);
    assert!((rate_of(&rates, "B") - 0.5).abs() < 1e-12);
    assert!(rate_of(&rates, "A") < 0.001);
}

#[test]
fn test_classify_picks_winner_and_formats() {
    let scorer = scorer_of(&two_cluster_docs(), ScoringStrategyKind::InverseDistance);
    let sample = DocBuilder::new("?")
        .month("2020-01", json!({"x": 4}))
        .month("2020-02", json!({"x": 8}))
        .doc();

    let result = scorer.classify(&sample, &AnalyzerConfig::default());
    assert_eq!(result.result, "A");
    assert!(result.percents.starts_with("A ("));

    let line = Regex::new(r"^\d{4}-\d{2}: [^,]+ \(\d+(\.\d)?%\)(, [^,]+ \(\d+(\.\d)?%\))*$").unwrap();
    let lines: Vec<&str> = result.string.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2020-01: A ("));
    for l in lines {
        assert!(line.is_match(l), "bad month line: {}", l);
    }
}

#[test]
fn test_month_percentages_never_exceed_100() {
    let scorer = scorer_of(&two_cluster_docs(), ScoringStrategyKind::InverseDistance);
    let sample = DocBuilder::new("?").series("x", &[3.0, 50.0, 97.0]).doc();
    let evaluation = scorer.evaluate(&sample, &AnalyzerConfig::default());

    assert_eq!(evaluation.months.len(), 3);
    for m in &evaluation.months {
        let total: f64 = m.shares.iter().map(|s| s.percent).sum();
        assert!(total <= 100.0 + 1e-9, "{}: {}", m.month, total);
        assert!(m.shares.iter().all(|s| s.rate > 0.0));
    }
}

#[test]
fn test_checked_map_records_scored_values() {
    let scorer = scorer_of(&two_cluster_docs(), ScoringStrategyKind::InverseDistance);
    let sample = DocBuilder::new("?")
        .month("2020-01", json!({"x": 4, "unknown": 1}))
        .month("2020-02", json!({"x": 8}))
        .doc();
    let evaluation = scorer.evaluate(&sample, &AnalyzerConfig::default());

    assert_eq!(evaluation.checked.len(), 1);
    let x = &evaluation.checked["x"];
    assert_eq!(x.len(), 2);
    assert_eq!(x[0].month, "2020-01");
    assert_eq!(x[0].value, 4.0);
    assert_eq!(x[0].minimum, 0.0);
    assert_eq!(x[0].maximum, 100.0);
    assert_eq!(x[1].property, "x");
}

#[test]
fn test_allow_list_filters_scoring() {
    let docs = vec![
        DocBuilder::new("A").month("2019-01", json!({"x": 0, "y": 100})),
        DocBuilder::new("B").month("2019-01", json!({"x": 100, "y": 0})),
    ];
    let scorer = scorer_of(&docs, ScoringStrategyKind::InverseDistance);
    let sample = DocBuilder::new("?").month("2020-01", json!({"x": 0, "y": 0})).doc();

    let only_x = AnalyzerConfig {
        properties: vec!["x".to_string()],
        ..Default::default()
    };
    let only_y = AnalyzerConfig {
        properties: vec!["y".to_string()],
        ..Default::default()
    };
    let by_x = scorer.evaluate(&sample, &only_x);
    let by_y = scorer.evaluate(&sample, &only_y);
    assert!(by_x.checked.contains_key("x") && !by_x.checked.contains_key("y"));
    assert!(by_y.checked.contains_key("y") && !by_y.checked.contains_key("x"));
}

#[test]
fn test_unmatched_sample_is_empty() {
    let scorer = scorer_of(&two_cluster_docs(), ScoringStrategyKind::InverseDistance);
    let config = AnalyzerConfig::default();

    let unknown = DocBuilder::new("?").month("2020-01", json!({"zzz": 3})).doc();
    let evaluation = scorer.evaluate(&unknown, &config);
    assert!(evaluation.classification.is_empty());
    assert!(evaluation.checked.is_empty());

    let no_months = DocBuilder::new("?").doc();
    assert_eq!(scorer.classify(&no_months, &config).result, "");
}

#[test]
fn test_friends_mode_merges_relations() {
    let scorer = scorer_of(&friends_docs(), ScoringStrategyKind::InverseDistance);
    let sample = DocBuilder::new("?").month("2020-01", json!({"x": 15})).doc();

    let plain = scorer.classify(&sample, &AnalyzerConfig::default());
    assert_eq!(plain.result, "Close rel");

    let friends = AnalyzerConfig {
        friends_mode: true,
        ..Default::default()
    };
    let merged = scorer.classify(&sample, &friends);
    assert_eq!(merged.result, "Friends (Close rel)");
    assert!(!merged.percents.contains("Friends"));
    assert!(merged.percents.contains("Casual rel"));
}

#[test]
fn test_friends_mode_disambiguates_to_casual() {
    let scorer = scorer_of(&friends_docs(), ScoringStrategyKind::InverseDistance);
    let sample = DocBuilder::new("?").month("2020-01", json!({"x": 9})).doc();
    let friends = AnalyzerConfig {
        friends_mode: true,
        ..Default::default()
    };
    assert_eq!(scorer.classify(&sample, &friends).result, "Friends (Casual rel)");
}

#[test]
fn test_friends_mode_keeps_stronger_outsider() {
    let scorer = scorer_of(&friends_docs(), ScoringStrategyKind::InverseDistance);
    let sample = DocBuilder::new("?").month("2020-01", json!({"x": 98})).doc();
    let friends = AnalyzerConfig {
        friends_mode: true,
        ..Default::default()
    };
    assert_eq!(scorer.classify(&sample, &friends).result, "Other");
}
