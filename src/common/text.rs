//! Fragment joining heuristics for text extraction.
//!
//! Word splits visible text across many runs. Concatenating the fragments
//! verbatim glues words together, while joining them with spaces breaks
//! punctuation. [`join_smart`] decides per boundary whether a space belongs
//! there, looking only at the last character written and the first
//! character of the next fragment.

/// Characters after which no space is ever inserted.
const CLOSERS: [char; 7] = ['"', '\'', '\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}', ')'];

/// Punctuation treated as a word separator.
const SEPARATORS: [char; 9] = ['.', ',', '[', ']', '(', ')', ';', ':', '!'];

/// Separators that end a clause and take a space before the next word.
const SENTENCE_PUNCTUATION: [char; 5] = ['.', ',', ';', ':', '!'];

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Whether a space should be placed between `last` and `first`.
///
/// The rules are checked in order:
/// 1. `last` is a quote or closing parenthesis: no space
/// 2. either side is whitespace: no space
/// 3. both sides are separators: no space
/// 4. neither side is a separator: space
/// 5. `last` is sentence punctuation (`. , ; : !`) before a word: space
/// 6. otherwise (an opening bracket, or punctuation after a word): no space
///
/// # Examples
///
/// ```
/// use wordml_dom::common::text::needs_space;
/// assert!(needs_space('o', 'W'));
/// assert!(needs_space('.', 'c'));
/// assert!(!needs_space('o', ','));
/// assert!(!needs_space('(', 't'));
/// ```
pub fn needs_space(last: char, first: char) -> bool {
    if CLOSERS.contains(&last) {
        return false;
    }
    if first.is_whitespace() || last.is_whitespace() {
        return false;
    }
    match (is_separator(last), is_separator(first)) {
        (true, true) => false,
        (false, false) => true,
        (true, false) => SENTENCE_PUNCTUATION.contains(&last),
        (false, true) => false,
    }
}

/// Append `fragment` to `acc`, inserting a space when [`needs_space`] says so.
pub fn push_smart(acc: &mut String, fragment: &str) {
    let Some(first) = fragment.chars().next() else {
        return;
    };
    if let Some(last) = acc.chars().next_back()
        && needs_space(last, first)
    {
        acc.push(' ');
    }
    acc.push_str(fragment);
}

/// Join text fragments with [`push_smart`].
///
/// # Examples
///
/// ```
/// use wordml_dom::common::text::join_smart;
/// assert_eq!(join_smart(["Hello", "World"]), "Hello World");
/// assert_eq!(join_smart(["Hello", ","]), "Hello,");
/// assert_eq!(join_smart(["(", "text", ")"]), "(text)");
/// assert_eq!(join_smart(["ab.", "cd"]), "ab. cd");
/// ```
pub fn join_smart<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut acc = String::new();
    for fragment in fragments {
        push_smart(&mut acc, fragment);
    }
    acc
}
