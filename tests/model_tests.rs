mod common;

use common::DocBuilder;
use provenance::model::PropertyModel;
use provenance::store::{MemorySource, RecordStore};
use serde_json::json;

fn store_of(docs: Vec<DocBuilder>) -> RecordStore {
    let mut rng = fastrand::Rng::with_seed(1);
    let source = MemorySource::new(docs.iter().map(|d| d.doc()).collect());
    RecordStore::load(&source, &mut rng, '!')
}

#[test]
fn test_global_statistics() {
    let store = store_of(vec![
        DocBuilder::new("A").series("x", &[2.0, 4.0]),
        DocBuilder::new("B").series("x", &[10.0]),
    ]);
    let model = PropertyModel::build(&store, &[]);

    let x = model.get("x").unwrap();
    assert_eq!(x.minimum, 2.0);
    assert_eq!(x.maximum, 10.0);
    assert_eq!(x.sum, 16.0);
    assert_eq!(x.count, 3);
    assert!((x.average() - 16.0 / 3.0).abs() < 1e-12);
    assert!(!x.is_degenerate());
}

#[test]
fn test_values_are_attributed_to_labels() {
    let store = store_of(vec![
        DocBuilder::new("A").series("x", &[2.0, 4.0]),
        DocBuilder::new("B").series("x", &[10.0]),
    ]);
    let model = PropertyModel::build(&store, &[]);
    let x = model.get("x").unwrap();

    assert_eq!(x.labels.len(), 2);
    let a = &x.labels[&0];
    assert_eq!(a.label, "A");
    assert_eq!(a.values.len(), 2);
    assert_eq!(a.values[0].month.as_deref(), Some("2019-01"));
    assert_eq!(x.labels[&1].values[0].value, 10.0);
}

#[test]
fn test_containers_and_text_are_not_features() {
    let store = store_of(vec![DocBuilder::new("A").month(
        "2019-01",
        json!({"x": 1, "nested": {"y": 2}, "list": [1, 2], "name": "bob", "flag": true}),
    )]);
    let model = PropertyModel::build(&store, &[]);

    assert!(model.get("nested").is_none());
    assert!(model.get("list").is_none());
    assert!(model.get("name").is_none());
    assert_eq!(model.get("flag").unwrap().maximum, 1.0);
    assert_eq!(model.len(), 2);
}

#[test]
fn test_zero_variance_is_degenerate() {
    let store = store_of(vec![
        DocBuilder::new("A").series("flat", &[5.0, 5.0]),
        DocBuilder::new("B").series("flat", &[5.0]),
    ]);
    let model = PropertyModel::build(&store, &[]);

    assert!(model.get("flat").unwrap().is_degenerate());
    assert_eq!(model.scorable().count(), 0);
}

#[test]
fn test_overflowing_range_is_degenerate() {
    let store = store_of(vec![
        DocBuilder::new("A").series("huge", &[-1.0e308, 0.0]),
        DocBuilder::new("B").series("huge", &[1.0e308]),
    ]);
    let model = PropertyModel::build(&store, &[]);

    let huge = model.get("huge").unwrap();
    assert_eq!(huge.count, 3);
    assert!(huge.is_degenerate());
    assert_eq!(model.scorable().count(), 0);
}

#[test]
fn test_allow_list_limits_properties() {
    let store = store_of(vec![DocBuilder::new("A")
        .month("2019-01", json!({"x": 1, "y": 2}))
        .month("2019-02", json!({"x": 3, "y": 4}))]);
    let model = PropertyModel::build(&store, &["y".to_string()]);

    assert!(model.get("x").is_none());
    assert_eq!(model.get("y").unwrap().count, 2);
}

#[test]
fn test_empty_store_gives_empty_model() {
    let model = PropertyModel::build(&RecordStore::default(), &[]);
    assert!(model.is_empty());
}
