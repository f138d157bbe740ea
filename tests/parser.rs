use chrono::NaiveDate;
use commitrank::parser::{parse_log, HeaderLayout, LogStreamParser, ParserState};
use commitrank::period::Granularity;
use pretty_assertions::assert_eq;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const SAMPLE: &str = "\
a1b2c3d|2024-05-14|Alice|Add parser
10\t2\tsrc/parser.rs
3\t0\tsrc/lib.rs

e4f5a6b|2024-05-02|Bob|Empty commit
9c8d7e6|2024-04-30|Alice|Add logo
-\t-\tassets/logo.png
1\t1\tREADME.md
";

#[test]
fn parses_headers_and_accumulates_numstat() {
    let (commits, stats) = parse_log(SAMPLE, &Granularity::Month, HeaderLayout::Standard);

    assert_eq!(commits.len(), 3);

    let first = &commits[0];
    assert_eq!(first.hash, "a1b2c3d");
    assert_eq!(first.author, "Alice");
    assert_eq!(first.date, date("2024-05-14"));
    assert_eq!(first.message, "Add parser");
    assert_eq!((first.additions, first.deletions), (13, 2));
    assert_eq!(first.period_key, "2024-05");
    assert!(!first.is_merge);

    let empty = &commits[1];
    assert_eq!(empty.author, "Bob");
    assert_eq!((empty.additions, empty.deletions), (0, 0));

    let binary = &commits[2];
    assert_eq!(binary.period_key, "2024-04");
    assert_eq!((binary.additions, binary.deletions), (1, 1));

    assert_eq!(stats.headers, 3);
    assert_eq!(stats.commits, 3);
    assert_eq!(stats.numstat_lines, 3);
    assert_eq!(stats.binary_lines, 1);
    assert_eq!(stats.duplicates, 0);
}

#[test]
fn subject_keeps_embedded_delimiters() {
    let log = "abc1234|2024-01-09|Carol|fix: a|b pipeline | cleanup\n4\t4\tsrc/x.rs\n";
    let (commits, stats) = parse_log(log, &Granularity::Month, HeaderLayout::Standard);

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "fix: a|b pipeline | cleanup");
    assert_eq!(commits[0].author, "Carol");
    assert_eq!(stats.malformed_headers, 0);
}

#[test]
fn duplicate_hash_is_consumed_but_not_emitted() {
    let log = "\
aaa1111|2024-02-01|Alice|first
5\t1\ta.rs

aaa1111|2024-02-01|Alice|first again
50\t10\ta.rs

bbb2222|2024-02-03|Bob|second
1\t0\tb.rs
";
    let (commits, stats) = parse_log(log, &Granularity::Month, HeaderLayout::Standard);

    let hashes: Vec<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
    assert_eq!(hashes, vec!["aaa1111", "bbb2222"]);
    assert_eq!((commits[0].additions, commits[0].deletions), (5, 1));
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.headers, 3);
    assert_eq!(stats.commits, 2);
}

#[test]
fn malformed_header_without_open_commit_drops_following_changes() {
    let log = "\
not|a header
7\t7\tlost.rs

ccc3333|2024-03-01|Dana|real
2\t1\tkept.rs
";
    let (commits, stats) = parse_log(log, &Granularity::Month, HeaderLayout::Standard);

    assert_eq!(commits.len(), 1);
    assert_eq!((commits[0].additions, commits[0].deletions), (2, 1));
    assert_eq!(stats.malformed_headers, 1);
    assert_eq!(stats.orphan_lines, 1);
}

#[test]
fn malformed_header_inside_commit_keeps_accumulating() {
    let log = "\
ddd4444|2024-03-02|Eve|work
1\t1\ta.rs
broken|header
2\t2\tb.rs
";
    let (commits, stats) = parse_log(log, &Granularity::Month, HeaderLayout::Standard);

    assert_eq!(commits.len(), 1);
    assert_eq!((commits[0].additions, commits[0].deletions), (3, 3));
    assert_eq!(stats.malformed_headers, 1);
}

#[test]
fn header_with_unparseable_date_is_malformed() {
    let log = "eee5555|yesterday|Frank|oops\n1\t1\ta.rs\n";
    let (commits, stats) = parse_log(log, &Granularity::Month, HeaderLayout::Standard);

    assert!(commits.is_empty());
    assert_eq!(stats.malformed_headers, 1);
    assert_eq!(stats.orphan_lines, 1);
}

#[test]
fn numstat_path_containing_delimiter_is_not_a_header() {
    let log = "fff6666|2024-06-01|Gina|odd path\n3\t1\tdocs/a|b.md\n";
    let (commits, stats) = parse_log(log, &Granularity::Month, HeaderLayout::Standard);

    assert_eq!((commits[0].additions, commits[0].deletions), (3, 1));
    assert_eq!(stats.malformed_headers, 0);
}

#[test]
fn with_parents_layout_detects_merges() {
    let log = "\
1111111|2024-07-01|Hank|1234567 89abcde|Merge branch 'feature'

2222222|2024-06-30|Hank|1234567|feature: add|remove flags
4\t1\tflags.rs
";
    let (commits, _) = parse_log(log, &Granularity::Month, HeaderLayout::WithParents);

    assert_eq!(commits.len(), 2);
    assert!(commits[0].is_merge);
    assert_eq!(commits[0].message, "Merge branch 'feature'");
    assert!(!commits[1].is_merge);
    assert_eq!(commits[1].message, "feature: add|remove flags");
}

#[test]
fn handles_crlf_line_endings() {
    let log = "abc0001|2024-01-01|Ivy|windows\r\n2\t3\ta.rs\r\n";
    let (commits, _) = parse_log(log, &Granularity::Day, HeaderLayout::Standard);

    assert_eq!(commits[0].message, "windows");
    assert_eq!((commits[0].additions, commits[0].deletions), (2, 3));
    assert_eq!(commits[0].period_key, "2024-01-01");
}

#[test]
fn parser_state_follows_headers() {
    let log = "abc0002|2024-01-01|Jon|one\n1\t0\ta.rs\n\n";
    let mut parser = LogStreamParser::new(log, &Granularity::Month, HeaderLayout::Standard);
    assert_eq!(parser.state(), ParserState::AwaitingHeader);

    let commit = parser.next().unwrap();
    assert_eq!(commit.hash, "abc0002");
    assert_eq!(parser.state(), ParserState::AwaitingHeader);
    assert!(parser.next().is_none());
    assert!(parser.next().is_none());
}

#[test]
fn empty_input_yields_nothing() {
    let (commits, stats) = parse_log("", &Granularity::Month, HeaderLayout::Standard);
    assert!(commits.is_empty());
    assert_eq!(stats.lines, 0);
}

#[test]
fn oversized_counts_saturate() {
    let log = "abc0003|2024-01-01|Kim|huge\n18446744073709551615\t1\ta.bin\n5\t0\tb.rs\n";
    let (commits, stats) = parse_log(log, &Granularity::Month, HeaderLayout::Standard);

    assert_eq!(commits[0].additions, u64::MAX);
    assert_eq!(commits[0].deletions, 1);
    assert_eq!(commits[0].churn(), u64::MAX);
    assert_eq!(stats.numstat_lines, 2);
}
