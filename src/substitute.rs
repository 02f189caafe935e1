//! Word-level search and replace over text.

use crate::map::Map;

/// Replaces every word of `text` that has a rule in `rules`.
///
/// A word is a maximal run of alphabetic characters; everything else is
/// copied unchanged. Lines are rejoined with `\n` and the result is trimmed
/// of leading and trailing whitespace.
///
/// ```rust
/// use wordmap::{Backend, replace_words, resolve_rules};
///
/// let rules = resolve_rules([("cat", "dog"), ("dog", "wolf")], Backend::RedBlack).unwrap();
/// assert_eq!(replace_words("The cat, the dog.\n", &rules), "The wolf, the wolf.");
/// ```
pub fn replace_words<M>(text: &str, rules: &M) -> String
where
    M: Map<String, String>,
{
    let mut output = String::with_capacity(text.len());
    let mut word = String::new();
    for line in text.lines() {
        for ch in line.chars() {
            if ch.is_alphabetic() {
                word.push(ch);
                continue;
            }
            flush_word(&mut output, &mut word, rules);
            output.push(ch);
        }
        flush_word(&mut output, &mut word, rules);
        output.push('\n');
    }
    output.trim().to_owned()
}

/// Appends the pending word, or its replacement, and clears it
fn flush_word<M>(output: &mut String, word: &mut String, rules: &M)
where
    M: Map<String, String>,
{
    if word.is_empty() {
        return;
    }
    let replacement = rules.get(word).map_or(word.as_str(), String::as_str);
    output.push_str(replacement);
    word.clear();
}
