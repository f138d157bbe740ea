use crate::model::{Commit, ParseStats};
use crate::period::PeriodKeyer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::{FromStr, Lines};
use tracing::debug;

pub const HEADER_DELIMITER: char = '|';
pub const NUMSTAT_DELIMITER: char = '\t';
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shape of the per-commit header line requested from `git log`.
///
/// The subject is always the last field and keeps any delimiter it contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderLayout {
    /// `%h|%ad|%an|%s`
    #[default]
    Standard,
    /// `%h|%ad|%an|%p|%s`, parents listed so merges can be told apart.
    WithParents,
}

impl HeaderLayout {
    pub fn pretty_format(&self) -> &'static str {
        match self {
            HeaderLayout::Standard => "%h|%ad|%an|%s",
            HeaderLayout::WithParents => "%h|%ad|%an|%p|%s",
        }
    }

    fn field_count(&self) -> usize {
        match self {
            HeaderLayout::Standard => 4,
            HeaderLayout::WithParents => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderLayout::Standard => "standard",
            HeaderLayout::WithParents => "with-parents",
        }
    }
}

impl fmt::Display for HeaderLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(HeaderLayout::Standard),
            "with-parents" | "with_parents" | "parents" => Ok(HeaderLayout::WithParents),
            other => Err(format!(
                "unknown header layout '{other}' (expected standard or with-parents)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    AwaitingHeader,
    AccumulatingChanges,
}

struct Header<'l> {
    hash: &'l str,
    date: NaiveDate,
    author: &'l str,
    parents: usize,
    subject: &'l str,
}

enum LineKind<'l> {
    Blank,
    Header(Header<'l>),
    Changes(Option<(u64, u64)>),
    Malformed,
    Other,
}

struct OpenCommit {
    commit: Commit,
    duplicate: bool,
}

/// Turns `git log --pretty=format:<layout> --date=short --numstat` output
/// into commits.
///
/// Each yielded commit is complete: its numstat lines have all been folded
/// in. Commits whose hash was already seen earlier in the same stream are
/// consumed but never yielded.
pub struct LogStreamParser<'a, K: PeriodKeyer + ?Sized> {
    lines: Lines<'a>,
    keyer: &'a K,
    layout: HeaderLayout,
    seen: HashSet<String>,
    open: Option<OpenCommit>,
    stats: ParseStats,
}

impl<'a, K: PeriodKeyer + ?Sized> LogStreamParser<'a, K> {
    pub fn new(text: &'a str, keyer: &'a K, layout: HeaderLayout) -> Self {
        Self {
            lines: text.lines(),
            keyer,
            layout,
            seen: HashSet::new(),
            open: None,
            stats: ParseStats::default(),
        }
    }

    pub fn state(&self) -> ParserState {
        if self.open.is_some() {
            ParserState::AccumulatingChanges
        } else {
            ParserState::AwaitingHeader
        }
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn into_stats(self) -> ParseStats {
        self.stats
    }

    fn open_commit(&mut self, header: Header<'_>) {
        self.stats.headers += 1;
        let duplicate = !self.seen.insert(header.hash.to_string());
        if duplicate {
            self.stats.duplicates += 1;
            debug!(hash = header.hash, "duplicate commit header, excluded from aggregation");
        }

        self.open = Some(OpenCommit {
            commit: Commit {
                hash: header.hash.to_string(),
                author: header.author.to_string(),
                date: header.date,
                message: header.subject.to_string(),
                additions: 0,
                deletions: 0,
                is_merge: header.parents > 1,
                period_key: self.keyer.period_key(header.date),
            },
            duplicate,
        });
    }

    fn close_commit(&mut self) -> Option<Commit> {
        let open = self.open.take()?;
        if open.duplicate {
            return None;
        }
        self.stats.commits += 1;
        Some(open.commit)
    }

    fn classify<'l>(&self, line: &'l str) -> LineKind<'l> {
        if line.trim().is_empty() {
            return LineKind::Blank;
        }
        if let Some(header) = parse_header(line, self.layout) {
            return LineKind::Header(header);
        }
        if line.contains(NUMSTAT_DELIMITER) {
            return LineKind::Changes(parse_numstat(line));
        }
        if line.contains(HEADER_DELIMITER) {
            return LineKind::Malformed;
        }
        LineKind::Other
    }
}

impl<K: PeriodKeyer + ?Sized> Iterator for LogStreamParser<'_, K> {
    type Item = Commit;

    fn next(&mut self) -> Option<Commit> {
        while let Some(raw) = self.lines.next() {
            self.stats.lines += 1;
            let line = raw.trim_end_matches('\r');

            match self.classify(line) {
                LineKind::Blank => {
                    if let Some(commit) = self.close_commit() {
                        return Some(commit);
                    }
                }
                LineKind::Header(header) => {
                    let finished = self.close_commit();
                    self.open_commit(header);
                    if finished.is_some() {
                        return finished;
                    }
                }
                LineKind::Changes(counts) => match (&mut self.open, counts) {
                    (Some(open), Some((additions, deletions))) => {
                        self.stats.numstat_lines += 1;
                        open.commit.additions = open.commit.additions.saturating_add(additions);
                        open.commit.deletions = open.commit.deletions.saturating_add(deletions);
                    }
                    (Some(_), None) => {
                        self.stats.binary_lines += 1;
                    }
                    (None, _) => {
                        self.stats.orphan_lines += 1;
                        debug!(line = self.stats.lines, "change line outside any commit ignored");
                    }
                },
                LineKind::Malformed => {
                    self.stats.malformed_headers += 1;
                    debug!(line = self.stats.lines, "malformed header ignored");
                }
                LineKind::Other => {
                    if self.open.is_none() {
                        self.stats.orphan_lines += 1;
                    }
                }
            }
        }

        self.close_commit()
    }
}

/// Parses a whole log text and returns the unique commits with line stats.
pub fn parse_log<K: PeriodKeyer + ?Sized>(
    text: &str,
    keyer: &K,
    layout: HeaderLayout,
) -> (Vec<Commit>, ParseStats) {
    let mut parser = LogStreamParser::new(text, keyer, layout);
    let commits: Vec<Commit> = parser.by_ref().collect();
    (commits, parser.into_stats())
}

fn parse_header(line: &str, layout: HeaderLayout) -> Option<Header<'_>> {
    let fields: Vec<&str> = line.splitn(layout.field_count(), HEADER_DELIMITER).collect();
    if fields.len() != layout.field_count() {
        return None;
    }

    let hash = fields[0].trim();
    if hash.is_empty() || hash.contains(char::is_whitespace) {
        return None;
    }
    let date = NaiveDate::parse_from_str(fields[1].trim(), DATE_FORMAT).ok()?;
    let author = fields[2].trim();

    let (parents, subject) = match layout {
        HeaderLayout::Standard => (0, fields[3]),
        HeaderLayout::WithParents => (fields[3].split_whitespace().count(), fields[4]),
    };

    Some(Header {
        hash,
        date,
        author,
        parents,
        subject,
    })
}

/// `None` when either count is not a plain integer (binary files report `-`).
fn parse_numstat(line: &str) -> Option<(u64, u64)> {
    let mut fields = line.splitn(3, NUMSTAT_DELIMITER);
    let additions = fields.next()?.trim().parse::<u64>().ok()?;
    let deletions = fields.next()?.trim().parse::<u64>().ok()?;
    Some((additions, deletions))
}
