//! Match validation against surrounding LaTeX syntax
//!
//! These are line-local heuristics, not a parser. All offsets are byte
//! offsets into the line as it currently stands, with `end` exclusive.

/// Why a match was rejected as invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Concept text looks like a reference or citation fragment
    ConceptContent,
    /// Match sits inside a `{...}` group
    InsideBraces,
    /// Match sits inside a `[...]` group
    InsideBrackets,
    /// Match is the tail of a command name such as `\hypergraph`
    CommandName,
}

/// Outcome of checking a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    /// Counted as an invalid match
    Invalid(InvalidReason),
    /// Part of a longer word; skipped without being counted
    NotAWord,
}

/// Concepts with `/` or `et al` are never indexed
pub fn is_invalid_concept(concept: &str) -> bool {
    concept.contains('/') || concept.contains("et al")
}

/// True when `open` is unbalanced before the match and `close` is
/// unbalanced after it. Counts span the whole line on each side.
pub fn is_inside_command(line: &str, start: usize, end: usize, open: char, close: char) -> bool {
    let before = &line[..start];
    let after = &line[end..];

    let before_count = balance(before, open, close);
    let after_count = balance(after, open, close);

    before_count > 0 && after_count < 0
}

fn balance(text: &str, open: char, close: char) -> i64 {
    text.chars().fold(0, |acc, c| {
        if c == open {
            acc + 1
        } else if c == close {
            acc - 1
        } else {
            acc
        }
    })
}

/// True when reading backwards from the last character of the match, only
/// ASCII letters stand between it and a backslash.
///
/// The last character itself is not inspected. A match whose last character
/// is the first character of the line is read against the whole line.
pub fn is_part_of_command(line: &str, start: usize, end: usize) -> bool {
    let last_char_start = line[start..end]
        .char_indices()
        .last()
        .map(|(i, _)| start + i)
        .unwrap_or(start);

    let prefix = if last_char_start == 0 {
        line
    } else {
        &line[..last_char_start]
    };

    prefix
        .chars()
        .rev()
        .find(|c| !c.is_ascii_alphabetic())
        .is_some_and(|c| c == '\\')
}

/// Both neighbours of the match must be non-word characters. A match at
/// either edge of the line has no neighbour on that side; a match at offset 0
/// is never checked against the last character of the line.
pub fn has_word_boundaries(line: &str, start: usize, end: usize) -> bool {
    let after_ok = line[end..].chars().next().map_or(true, |c| !is_word_char(c));
    let before_ok = line[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    after_ok && before_ok
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Run every rule in order: concept content, braces, brackets, command
/// name, then word boundaries.
pub fn check_match(line: &str, start: usize, end: usize, concept: &str) -> Verdict {
    if is_invalid_concept(concept) {
        return Verdict::Invalid(InvalidReason::ConceptContent);
    }
    if is_inside_command(line, start, end, '{', '}') {
        return Verdict::Invalid(InvalidReason::InsideBraces);
    }
    if is_inside_command(line, start, end, '[', ']') {
        return Verdict::Invalid(InvalidReason::InsideBrackets);
    }
    if is_part_of_command(line, start, end) {
        return Verdict::Invalid(InvalidReason::CommandName);
    }
    if !has_word_boundaries(line, start, end) {
        return Verdict::NotAWord;
    }
    Verdict::Accept
}
