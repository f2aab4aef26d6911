use proptest::prelude::*;

use sheetlink_map::{DetectionEngine, ScoreThresholds, detect_mapping};
use sheetlink_model::RequiredColumn;

fn headers(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|h| (*h).to_string()).collect()
}

#[test]
fn detects_purchase_log_headers() {
    let mapping = detect_mapping(&headers(&[
        "Order Date",
        "Item Name",
        "ASIN",
        "Unit Cost",
        "PO Number",
    ]));

    assert_eq!(mapping.get(RequiredColumn::Date), "Order Date");
    assert_eq!(mapping.get(RequiredColumn::Name), "Item Name");
    assert_eq!(mapping.get(RequiredColumn::Asin), "ASIN");
    assert_eq!(mapping.get(RequiredColumn::Cogs), "Unit Cost");
    assert_eq!(mapping.get(RequiredColumn::OrderNumber), "PO Number");

    assert_eq!(mapping.get(RequiredColumn::SalePrice), "");
    assert_eq!(mapping.get(RequiredColumn::SizeColor), "");
    assert_eq!(mapping.get(RequiredColumn::UnitsInBundle), "");
    assert_eq!(mapping.get(RequiredColumn::AmountPurchased), "");
    assert_eq!(mapping.get(RequiredColumn::PrepNotes), "");
}

#[test]
fn exact_match_wins_regardless_of_input_order() {
    // "Purchased!" scores 9/10 * 50 = 45 for Date; the exact "Date" header
    // must win from either position.
    let first = detect_mapping(&headers(&["Date", "Purchased!"]));
    assert_eq!(first.get(RequiredColumn::Date), "Date");

    let second = detect_mapping(&headers(&["Purchased!", "Date"]));
    assert_eq!(second.get(RequiredColumn::Date), "Date");
}

#[test]
fn below_threshold_headers_stay_unmapped() {
    let engine = DetectionEngine::default();
    // "date" covers 4 of 24 chars: ≈ 8.3, well under the accept threshold.
    let result = engine.detect(&headers(&["Transaction Date Archive"]));

    assert_eq!(result.matched_count(), 0);
    assert_eq!(
        result.unmatched_headers,
        vec!["Transaction Date Archive".to_string()]
    );
    for column in RequiredColumn::ALL {
        assert_eq!(result.mapping.get(column), "");
    }
}

#[test]
fn matches_report_scores_and_completeness() {
    let engine = DetectionEngine::default();
    let result = engine.detect(&headers(&["Order Date", "ASIN"]));

    assert_eq!(result.matched_count(), 2);
    assert!(!result.is_complete());
    assert_eq!(result.score_for(RequiredColumn::Date), Some(100.0));
    assert_eq!(result.score_for(RequiredColumn::SalePrice), None);
    assert_eq!(result.min_score(), Some(100.0));
    assert!(result.unmatched_headers.is_empty());
}

#[test]
fn unclaimed_headers_keep_input_order() {
    let engine = DetectionEngine::default();
    let result = engine.detect(&headers(&["zzz", "Order Date", "aaa"]));
    assert_eq!(
        result.unmatched_headers,
        vec!["zzz".to_string(), "aaa".to_string()]
    );
}

fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,24}",
        proptest::sample::select(vec![
            "Order Date",
            "date",
            "Item Name",
            "Price",
            "Unit Cost",
            "Bundles",
            "qty",
            "ASIN",
            "PO Number",
            "Prep Notes",
            "misc",
        ])
        .prop_map(String::from),
    ]
}

proptest! {
    /// Detection is pure: the same header list always produces the same
    /// result, and the mapping always covers exactly the ten columns.
    #[test]
    fn detect_is_deterministic_and_shape_stable(
        input in proptest::collection::vec(header_strategy(), 0..12)
    ) {
        let engine = DetectionEngine::default();
        let first = engine.detect(&input);
        let second = engine.detect(&input);

        prop_assert_eq!(&first.mapping, &second.mapping);
        prop_assert_eq!(&first.unmatched_headers, &second.unmatched_headers);
        prop_assert_eq!(first.mapping.iter().count(), 10);

        for (_, header) in first.mapping.iter() {
            if !header.is_empty() {
                prop_assert!(input.iter().any(|h| h == header));
            }
        }
        for m in &first.matches {
            prop_assert!(m.score > ScoreThresholds::default().accept);
        }
    }
}
