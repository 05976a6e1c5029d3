use crate::tables;

/// Output of a modifier chord on `key`, if the key has one.
///
/// Vowels keep their case (Alt+a gives ā, Alt+Shift+a arrives as `A` and
/// gives Ā). Every apostrophe-equivalent gives the ʻokina.
pub fn chord_output(key: char) -> Option<char> {
    tables::macron(key).or_else(|| tables::okina_for(key))
}
