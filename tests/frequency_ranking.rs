use lexigraph_core::frequency::{frequency_table, FrequencyAggregator, FREQUENCY_TABLE_SIZE};

fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn counts_descending_with_first_occurrence_tiebreak() {
    let seq = tokens(&["b", "a", "c", "a", "c", "d", "c"]);
    let table = frequency_table(&seq);

    let rows: Vec<(&str, u32)> = table
        .iter()
        .map(|e| (e.token.as_str(), e.count))
        .collect();

    // "b" and "d" tie at 1; "b" occurs first.
    assert_eq!(rows, vec![("c", 3), ("a", 2), ("b", 1), ("d", 1)]);
}

#[test]
fn empty_sequence_is_an_empty_table() {
    let table = frequency_table(&[]);
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
}

#[test]
fn truncates_to_twenty_entries() {
    let seq: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
    let table = frequency_table(&seq);

    assert_eq!(table.len(), FREQUENCY_TABLE_SIZE);
    // All counts tie at 1, so the survivors are the first twenty seen.
    assert_eq!(table.entries()[0].token, "w0");
    assert_eq!(table.entries()[19].token, "w19");
    assert_eq!(table.count("w20"), None);
}

#[test]
fn tie_at_truncation_boundary_keeps_earliest() {
    let mut seq = tokens(&["late"]);
    for i in 0..19 {
        seq.push(format!("x{i}"));
        seq.push(format!("x{i}"));
    }
    seq.push("later".to_string());

    let table = frequency_table(&seq);
    assert_eq!(table.len(), 20);
    assert_eq!(table.entries()[19].token, "late");
    assert_eq!(table.count("later"), None);
}

#[test]
fn custom_limit_and_repeat_calls() {
    let seq = tokens(&["x", "y", "y", "z", "z", "z"]);
    let aggregator = FrequencyAggregator::new(2);

    let first = aggregator.aggregate(&seq);
    let second = aggregator.aggregate(&seq);

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first.count("z"), Some(3));
    assert_eq!(first.count("y"), Some(2));
}

#[test]
fn frequency_counts_every_token_unfiltered() {
    let seq = tokens(&["，", "，", "的", "42"]);
    let table = frequency_table(&seq);

    assert_eq!(table.count("，"), Some(2));
    assert_eq!(table.count("的"), Some(1));
    assert_eq!(table.count("42"), Some(1));
}
