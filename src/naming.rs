//! Filename parsing for the `hwN_questionM` convention.
//!
//! Homework pages are usually named like `hw3_question2.html`. This module
//! extracts the numeric groups used for ordering and builds the display label
//! shown in the index:
//!
//! - `hw1_question2.html` → homework=Some(1), question=Some(2), label="Homework 1 - Question 2"
//! - `hw4.html` → homework=Some(4), question=None, label="hw4"
//! - `notes.html` → homework=None, question=None, label="notes"
//!
//! Matching of `hw` and `question` is ASCII case-insensitive. Names without
//! either group sort with key 0, and [`natural_cmp`] orders them among
//! themselves.

use std::cmp::Ordering;

/// Result of parsing a page filename like `hw1_question2.html`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Filename with the extension stripped.
    pub stem: String,
    /// Number following the first `hw` group, if any.
    pub homework: Option<u32>,
    /// Number following the first `question` group, if any.
    pub question: Option<u32>,
    /// Human-readable label for the index.
    pub label: String,
}

/// Composite ordering key: homework number, then question number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SortKey {
    pub homework: u32,
    pub question: u32,
}

impl ParsedName {
    /// Missing groups count as 0.
    pub fn sort_key(&self) -> SortKey {
        SortKey {
            homework: self.homework.unwrap_or(0),
            question: self.question.unwrap_or(0),
        }
    }
}

/// Parse a page filename.
pub fn parse_entry_name(filename: &str) -> ParsedName {
    let stem = strip_extension(filename);
    ParsedName {
        stem: stem.to_string(),
        homework: number_after(stem, "hw").map(|(n, _)| n),
        question: number_after(stem, "question").map(|(n, _)| n),
        label: display_label(stem),
    }
}

/// Strip the last `.ext` from a filename. Dotfiles keep their name.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(0) | None => filename,
        Some(pos) => &filename[..pos],
    }
}

/// Find the first `tag` immediately followed by ASCII digits and parse them.
///
/// Returns the number and the byte range covering tag and digits.
fn number_after(haystack: &str, tag: &str) -> Option<(u32, std::ops::Range<usize>)> {
    let lower = haystack.to_ascii_lowercase();
    let mut from = 0;
    while let Some(rel) = lower[from..].find(tag) {
        let start = from + rel;
        let digits_start = start + tag.len();
        let digits_len = lower[digits_start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits_len > 0 {
            let end = digits_start + digits_len;
            if let Ok(n) = lower[digits_start..end].parse::<u32>() {
                return Some((n, start..end));
            }
        }
        from = digits_start;
    }
    None
}

/// Replace the first `hwN_questionM` group with `Homework N - Question M`.
fn display_label(stem: &str) -> String {
    let lower = stem.to_ascii_lowercase();
    let mut from = 0;
    while let Some((hw, hw_range)) = number_after(&stem[from..], "hw") {
        let hw_start = from + hw_range.start;
        let hw_end = from + hw_range.end;
        let rest = &lower[hw_end..];
        if rest.starts_with("_question") {
            if let Some((q, q_range)) = number_after(&stem[hw_end..], "question") {
                // Only accept the question group directly after the underscore.
                if q_range.start == 1 {
                    let q_end = hw_end + q_range.end;
                    return format!(
                        "{}Homework {} - Question {}{}",
                        &stem[..hw_start],
                        hw,
                        q,
                        &stem[q_end..]
                    );
                }
            }
        }
        from = hw_end;
    }
    stem.to_string()
}

/// Numeric-aware string comparison.
///
/// Digit runs compare by value (`hw2` < `hw10`), other runs compare
/// case-insensitively. Falls back to plain byte order so distinct names never
/// compare equal.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = chunks(a);
    let mut cb = chunks(b);
    loop {
        match (ca.next(), cb.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_digit_chunk(x), is_digit_chunk(y)) {
                    (true, true) => cmp_digits(x, y),
                    _ => x.to_lowercase().cmp(&y.to_lowercase()),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_digit_chunk(s: &str) -> bool {
    s.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Compare two digit runs by numeric value without overflow.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Split into alternating digit / non-digit runs.
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        rest = tail;
        Some(head)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homework_and_question() {
        let p = parse_entry_name("hw1_question2.html");
        assert_eq!(p.stem, "hw1_question2");
        assert_eq!(p.homework, Some(1));
        assert_eq!(p.question, Some(2));
        assert_eq!(p.label, "Homework 1 - Question 2");
        assert_eq!(
            p.sort_key(),
            SortKey {
                homework: 1,
                question: 2
            }
        );
    }

    #[test]
    fn multi_digit_numbers() {
        let p = parse_entry_name("hw12_question10.html");
        assert_eq!(p.homework, Some(12));
        assert_eq!(p.question, Some(10));
        assert_eq!(p.label, "Homework 12 - Question 10");
    }

    #[test]
    fn homework_only() {
        let p = parse_entry_name("hw4.html");
        assert_eq!(p.homework, Some(4));
        assert_eq!(p.question, None);
        assert_eq!(p.label, "hw4");
        assert_eq!(
            p.sort_key(),
            SortKey {
                homework: 4,
                question: 0
            }
        );
    }

    #[test]
    fn no_groups_defaults_to_zero() {
        let p = parse_entry_name("notes.html");
        assert_eq!(p.homework, None);
        assert_eq!(p.question, None);
        assert_eq!(p.label, "notes");
        assert_eq!(p.sort_key(), SortKey::default());
    }

    #[test]
    fn label_keeps_surrounding_text() {
        let p = parse_entry_name("final_hw3_question1_solution.html");
        assert_eq!(p.label, "final_Homework 3 - Question 1_solution");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let p = parse_entry_name("HW2_Question5.html");
        assert_eq!(p.homework, Some(2));
        assert_eq!(p.question, Some(5));
        assert_eq!(p.label, "Homework 2 - Question 5");
    }

    #[test]
    fn hw_without_digits_is_skipped() {
        // The first "hw" has no digits; the second one does.
        let p = parse_entry_name("hw_review_hw7.html");
        assert_eq!(p.homework, Some(7));
    }

    #[test]
    fn question_not_adjacent_keeps_label() {
        let p = parse_entry_name("hw1_extra_question2.html");
        assert_eq!(p.homework, Some(1));
        assert_eq!(p.question, Some(2));
        assert_eq!(p.label, "hw1_extra_question2");
    }

    #[test]
    fn strip_extension_variants() {
        assert_eq!(strip_extension("a.b.html"), "a.b");
        assert_eq!(strip_extension("plain"), "plain");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn natural_cmp_orders_numbers_by_value() {
        assert_eq!(natural_cmp("hw2", "hw10"), Ordering::Less);
        assert_eq!(natural_cmp("hw10", "hw9"), Ordering::Greater);
        assert_eq!(natural_cmp("hw007", "hw7"), Ordering::Less);
        assert_eq!(natural_cmp("a", "a"), Ordering::Equal);
    }

    #[test]
    fn natural_cmp_ignores_case_first() {
        assert_eq!(natural_cmp("Alpha", "beta"), Ordering::Less);
        assert_eq!(natural_cmp("lab", "Lab1"), Ordering::Less);
    }

    #[test]
    fn natural_cmp_huge_numbers_do_not_overflow() {
        assert_eq!(
            natural_cmp("x99999999999999999999", "x100000000000000000000"),
            Ordering::Less
        );
    }
}
