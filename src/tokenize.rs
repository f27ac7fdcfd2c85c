//! Whitespace tokenization.
//!
//! The engine's notion of a word is deliberately narrow: runs of non-space
//! bytes separated by ASCII spaces. No case folding, no Unicode segmentation,
//! no punctuation stripping. Anything smarter belongs to the caller, which
//! keeps the index byte-exact with what was admitted.

/// Split `text` on ASCII spaces, yielding non-empty word views.
///
/// Lazy and allocation-free: each item borrows from `text`. Leading,
/// trailing, and repeated spaces produce no tokens.
///
/// ```
/// let words: Vec<&str> = talpa::split_into_words("  fluffy cat  ").collect();
/// assert_eq!(words, ["fluffy", "cat"]);
/// ```
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it contains no control character in `[0x00, 0x20)`.
///
/// Checked on document text, stop words, and query tokens alike. Byte-wise
/// is sufficient: UTF-8 continuation bytes are all above the control range.
#[inline]
pub(crate) fn is_valid_word(word: &str) -> bool {
    word.bytes().all(|byte| byte >= 0x20)
}
