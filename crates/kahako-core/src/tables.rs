// Kahako Character Tables
// Kahakō vowels, the ʻokina and the trigger characters

/// Trigger for lowercase kahakō and the ʻokina (grave accent key).
pub const LOWER_TRIGGER: char = '`';

/// Trigger for uppercase kahakō (backslash key).
pub const UPPER_TRIGGER: char = '\\';

/// ʻOkina, U+02BB MODIFIER LETTER TURNED COMMA.
pub const OKINA: char = '\u{02BB}';

/// Characters a keyboard or autocorrect may produce where an ʻokina was meant.
pub const APOSTROPHE_EQUIVALENTS: [char; 6] = [
    '\u{0027}', // '
    '\u{2018}', // ‘
    '\u{2019}', // ’
    '\u{02BC}', // ʼ
    '\u{00B4}', // ´
    OKINA,
];

/// Plain vowels accepted by the engine, lowercase first.
pub const VOWELS: [char; 10] = ['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'];

/// Map a plain vowel (either case) to its kahakō form, preserving case.
pub fn macron(base: char) -> Option<char> {
    let out = match base {
        'a' => 'ā',
        'e' => 'ē',
        'i' => 'ī',
        'o' => 'ō',
        'u' => 'ū',
        'A' => 'Ā',
        'E' => 'Ē',
        'I' => 'Ī',
        'O' => 'Ō',
        'U' => 'Ū',
        _ => return None,
    };
    Some(out)
}

/// Kahakō for a lowercase vowel only.
pub fn lower_macron(base: char) -> Option<char> {
    if base.is_ascii_lowercase() {
        macron(base)
    } else {
        None
    }
}

/// Uppercase kahakō for a vowel of either case.
pub fn upper_macron(base: char) -> Option<char> {
    macron(base.to_ascii_uppercase())
}

pub fn is_apostrophe_equivalent(ch: char) -> bool {
    APOSTROPHE_EQUIVALENTS.contains(&ch)
}

/// ʻOkina for any apostrophe-equivalent character.
pub fn okina_for(ch: char) -> Option<char> {
    is_apostrophe_equivalent(ch).then_some(OKINA)
}

pub fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch)
}
