use proptest::prelude::*;
use spooky_recordset::{FieldMeta, Lane, Record, Value, record, record_members};
use std::collections::BTreeSet;

fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::from),
    ]
}

#[derive(Debug, Default)]
struct Row {
    amount: i64,
    label: String,
}

record_members!(Row {
    amount: i64,
    label: String,
});

proptest! {
    #[test]
    fn distinct_names_get_distinct_indices(names in prop::collection::btree_set(field_name(), 0..24)) {
        let rec = Record::from_pairs(names.iter().map(|n| (n.as_str(), 0i64)));
        prop_assert_eq!(rec.length(), names.len());
        prop_assert_eq!(rec.is_empty(), names.is_empty());

        let mut seen = BTreeSet::new();
        for name in &names {
            let index = rec.field_index(name).unwrap();
            prop_assert!(index < rec.length());
            prop_assert!(seen.insert(index));
        }
    }

    #[test]
    fn unknown_names_read_as_empty(
        names in prop::collection::btree_set(field_name(), 0..8),
        probe in "[A-Z]{1,8}",
    ) {
        let rec = Record::from_pairs(names.iter().map(|n| (n.as_str(), 1i64)));
        prop_assert_eq!(rec.get_by_name(&probe, Lane::Primary), Value::empty());
        prop_assert_eq!(rec.get_by_name(&probe, Lane::Classic), Value::empty());
    }

    #[test]
    fn set_by_name_grows_only_for_new_names(
        writes in prop::collection::vec((field_name(), scalar(), any::<bool>()), 1..32),
    ) {
        let mut rec = Record::new();
        for (name, value, classic) in writes {
            let before = rec.length();
            let known = rec.has_field(&name);
            let lane = Lane::from(classic);
            let mut meta = FieldMeta::new(name.as_str());

            prop_assert!(rec.set_by_name(Some(&mut meta), &name, value.clone(), lane));
            prop_assert!(meta.is_valid);
            prop_assert_eq!(rec.length(), if known { before } else { before + 1 });

            let index = rec.field_index(&name).unwrap();
            prop_assert!(index < rec.length());
            let stored = rec.slot(index).and_then(|slot| slot.lane(lane));
            prop_assert_eq!(stored, Some(&value));
        }
        prop_assert_eq!(rec.fields().len(), rec.length());
    }

    #[test]
    fn str_map_matches_itf_map_keys(pairs in prop::collection::vec((field_name(), scalar()), 0..16)) {
        let rec = Record::from_pairs(pairs);
        let strs = rec.as_str_map();
        let values = rec.as_itf_map();
        prop_assert_eq!(strs.len(), rec.length());
        prop_assert!(strs.keys().eq(values.keys()));
    }

    #[test]
    fn json_export_parses_back(pairs in prop::collection::vec((field_name(), scalar()), 0..16)) {
        let rec = Record::from_pairs(pairs);
        let text = rec.as_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let object = parsed.as_object().unwrap();
        prop_assert_eq!(object.len(), rec.length());
        for name in rec.fields() {
            prop_assert!(object.contains_key(name.as_str()));
        }
    }

    #[test]
    fn projection_never_clears_with_nil(amount in any::<i64>(), label in "[a-z]{0,8}") {
        let mut row = Row { amount, label: label.clone() };
        let rec = record! { "amount" => Value::Null, "label" => Value::Null, "other" => 1i64 };
        let report = rec.as_struct(&mut row, Lane::Primary);
        prop_assert_eq!(report.diagnostics.len(), 1);
        prop_assert_eq!(row.amount, amount);
        prop_assert_eq!(row.label, label);
    }

    #[test]
    fn projection_parses_integer_strings(amount in any::<i64>()) {
        let mut row = Row::default();
        let rec = record! { "amount" => amount.to_string() };
        let report = rec.as_struct(&mut row, Lane::Primary);
        prop_assert!(report.is_clean());
        prop_assert_eq!(row.amount, amount);
    }
}

#[test]
fn field_by_index_at_length_is_absent() {
    let rec = record! { "a" => 1i64, "b" => "x" };
    assert!(rec.field_by_index(rec.length()).is_none());
    assert!(rec.field_by_index(1).is_some());
}
