use playlist_converter::types::TrackQuery;
use playlist_converter::utils::*;

// Helper function to create an expected query
fn query(title: &str, artist: &str) -> TrackQuery {
    TrackQuery::new(title, artist)
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Should be exactly STATE_LENGTH characters, well above the 16 minimum
    assert_eq!(state.len(), STATE_LENGTH);
    assert!(state.len() >= 16);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    let state2 = generate_state();
    assert_ne!(state, state2);
}

#[test]
fn test_track_uri() {
    assert_eq!(track_uri("4uLU6hMCjMI75M1A2tKUQC"), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
}

#[test]
fn test_parse_track_list() {
    let input = "Imagine - John Lennon\nBohemian Rhapsody - Queen\n";
    let (queries, invalid) = parse_track_list(input);

    assert_eq!(
        queries,
        vec![
            query("Imagine", "John Lennon"),
            query("Bohemian Rhapsody", "Queen")
        ]
    );
    assert!(invalid.is_empty());
}

#[test]
fn test_parse_track_list_splits_on_last_separator() {
    let (queries, _) = parse_track_list("Let It Be - Remastered 2009 - The Beatles");

    // Title keeps its own " - "
    assert_eq!(queries, vec![query("Let It Be - Remastered 2009", "The Beatles")]);
}

#[test]
fn test_parse_track_list_skips_blank_and_comment_lines() {
    let input = "\n# my favourites\n   \nImagine - John Lennon\n\n";
    let (queries, invalid) = parse_track_list(input);

    assert_eq!(queries, vec![query("Imagine", "John Lennon")]);
    assert!(invalid.is_empty());
}

#[test]
fn test_parse_track_list_reports_invalid_lines() {
    let input = "Imagine - John Lennon\njust a title\n - Queen\nYesterday - \nHey Jude - The Beatles";
    let (queries, invalid) = parse_track_list(input);

    assert_eq!(
        queries,
        vec![
            query("Imagine", "John Lennon"),
            query("Hey Jude", "The Beatles")
        ]
    );

    // Line numbers are 1-based and refer to the raw input
    let numbers: Vec<usize> = invalid.iter().map(|l| l.number).collect();
    assert_eq!(numbers, vec![2, 3, 4]);
    assert_eq!(invalid[0].content, "just a title");
}

#[test]
fn test_parse_track_list_trims_whitespace() {
    let (queries, _) = parse_track_list("   Imagine   -   John Lennon   ");
    assert_eq!(queries, vec![query("Imagine", "John Lennon")]);
}

#[test]
fn test_parse_track_list_empty_input() {
    let (queries, invalid) = parse_track_list("");
    assert!(queries.is_empty());
    assert!(invalid.is_empty());
}
