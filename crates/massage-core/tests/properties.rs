//! Property tests for the county normalization invariants.

use csv::StringRecord;
use massage_core::{NormalizeOptions, normalize_county, normalize_record, normalize_stream};
use proptest::prelude::*;

fn county_name() -> impl Strategy<Value = String> {
    (
        "[A-Za-z][A-Za-z .']{0,20}",
        prop_oneof![
            Just(String::new()),
            Just(" County".to_string()),
            Just("  County ".to_string()),
            Just(" county".to_string()),
            Just(" city".to_string()),
        ],
    )
        .prop_map(|(name, suffix)| format!("{name}{suffix}"))
}

fn field() -> impl Strategy<Value = String> {
    "[ -~]{0,12}"
}

proptest! {
    #[test]
    fn normalize_is_idempotent(value in county_name()) {
        let once = normalize_county(&value);
        prop_assert_eq!(normalize_county(&once), once);
    }

    #[test]
    fn normalized_value_has_no_lowercase_ascii(value in county_name()) {
        let normalized = normalize_county(&value);
        prop_assert!(!normalized.chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn only_the_county_field_changes(
        before in prop::collection::vec(field(), 2),
        county in county_name(),
        after in prop::collection::vec(field(), 0..4),
    ) {
        let mut fields = before.clone();
        fields.push(county.clone());
        fields.extend(after.iter().cloned());
        let record = StringRecord::from(fields.clone());

        let result = normalize_record(&record, 2, 1).unwrap();

        prop_assert_eq!(result.record.len(), fields.len());
        for (idx, original) in fields.iter().enumerate() {
            if idx == 2 {
                let expected = normalize_county(&county);
                prop_assert_eq!(&result.record[idx], expected.as_str());
            } else {
                prop_assert_eq!(&result.record[idx], original.as_str());
            }
        }
    }

    #[test]
    fn stream_preserves_row_count_and_order(
        rows in prop::collection::vec((field(), county_name(), field()), 1..20),
    ) {
        let mut input = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut input);
            for (id, county, state) in &rows {
                writer.write_record([id.as_str(), "2015", county.as_str(), state.as_str()]).unwrap();
            }
            writer.flush().unwrap();
        }

        let mut output = Vec::new();
        let stats =
            normalize_stream(input.as_slice(), &mut output, &NormalizeOptions::default()).unwrap();
        prop_assert_eq!(stats.rows, rows.len() as u64);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(output.as_slice());
        let records: Vec<StringRecord> = reader.records().map(Result::unwrap).collect();
        prop_assert_eq!(records.len(), rows.len());
        for (record, (id, county, state)) in records.iter().zip(&rows) {
            prop_assert_eq!(&record[0], id.as_str());
            let expected_county = normalize_county(county);
            prop_assert_eq!(&record[2], expected_county.as_str());
            prop_assert_eq!(&record[3], state.as_str());
        }
    }
}
