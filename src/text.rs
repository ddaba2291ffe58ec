pub const PUNCTUATION: &str = r###",."'!?&-/:;()#$%*+<=>@[\]^_`{|}~"###;

/// Returns an iterator over all words of the text.
///
/// Apostrophes inside a word are kept, so `don't` stays one token.
pub fn words(txt: &str) -> impl Iterator<Item = &str> {
    txt.split(|c: char| c.is_whitespace() || (c != '\'' && is_punctuation(c)))
        .map(|s| s.trim_matches('\''))
        .filter(|s| !s.is_empty())
}

/// Whether the char is a punctuation.
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(c)
}
