// src/keys.rs
//
// Key-name normalization. The macOS recorder reports names like "space" and
// "return"; kanata wants "spc" and "ret". Everything here is lowercase
// kanata tokens.

/// macOS / long-form name -> kanata token.
const NAME_TABLE: &[(&str, &str)] = &[
    ("space", "spc"),
    ("return", "ret"),
    ("enter", "ret"),
    ("escape", "esc"),
    ("tab", "tab"),
    // On a Mac keyboard "delete" is the backspace-position key.
    ("delete", "bspc"),
    ("backspace", "bspc"),
    ("forwarddelete", "del"),
    ("capslock", "caps"),
    ("command", "lmet"),
    ("rightcommand", "rmet"),
    ("option", "lalt"),
    ("rightoption", "ralt"),
    ("control", "lctl"),
    ("rightcontrol", "rctl"),
    ("shift", "lsft"),
    ("rightshift", "rsft"),
    ("up", "up"),
    ("down", "down"),
    ("left", "left"),
    ("right", "right"),
    ("home", "home"),
    ("end", "end"),
    ("pageup", "pgup"),
    ("pagedown", "pgdn"),
];

/// Tokens kanata accepts that are not single printable characters.
const KNOWN_TOKENS: &[&str] = &[
    "spc", "ret", "esc", "tab", "bspc", "del", "caps", "lsft", "rsft", "lctl", "rctl", "lalt",
    "ralt", "lmet", "rmet", "up", "down", "left", "right", "home", "end", "pgup", "pgdn", "f1",
    "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
];

/// Punctuation that is a valid kanata token as-is, with the slug used when
/// the character has to appear in an alias name.
const PUNCT_TABLE: &[(char, &str)] = &[
    ('-', "mins"),
    ('=', "eql"),
    ('[', "lbrc"),
    (']', "rbrc"),
    (';', "semi"),
    ('\'', "quot"),
    ('`', "grv"),
    ('\\', "bksl"),
    (',', "comm"),
    ('.', "dot"),
    ('/', "slsh"),
];

/// Normalize a captured key name to its kanata token. Single printable
/// characters and already-canonical tokens pass through; unknown multi-char
/// names are returned unchanged (validation diagnoses them later).
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some((_, token)) = NAME_TABLE.iter().find(|(long, _)| *long == lower) {
        return (*token).to_string();
    }
    if is_key_token(&lower) {
        return lower;
    }
    trimmed.to_string()
}

/// True if `s` is a single token kanata understands: one printable ASCII
/// character (letter, digit, listed punctuation) or a known named token.
pub fn is_key_token(s: &str) -> bool {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_ascii_lowercase() || c.is_ascii_digit() || PUNCT_TABLE.iter().any(|(p, _)| *p == c);
    }
    KNOWN_TOKENS.contains(&s)
}

/// Identifier-safe slug for a physical key, used to name defaliases.
/// "a" -> "a", ";" -> "semi", "spc" -> "spc".
pub fn alias_slug(key: &str) -> String {
    key.chars()
        .map(|c| {
            if let Some((_, slug)) = PUNCT_TABLE.iter().find(|(p, _)| *p == c) {
                (*slug).to_string()
            } else if c.is_ascii_alphanumeric() {
                c.to_string()
            } else {
                "_".to_string()
            }
        })
        .collect()
}

/// Break an output sequence into kanata macro tokens.
///
/// Whole words that are already key tokens are kept; anything else is spelled
/// out character by character, with uppercase letters emitted as shifted
/// chords and spaces between words as `spc`.
pub fn macro_tokens(sequence: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut first = true;
    for word in sequence.split_whitespace() {
        if !first {
            tokens.push("spc".to_string());
        }
        first = false;

        // Multi-char words may be named keys ("esc", "Return"); single chars
        // are always literal so that "A" keeps its shift.
        if word.chars().count() > 1 {
            let normalized = normalize(word);
            if is_key_token(&normalized) {
                tokens.push(normalized);
                continue;
            }
        }
        for c in word.chars() {
            if c.is_ascii_uppercase() {
                tokens.push(format!("S-{}", c.to_ascii_lowercase()));
            } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
                tokens.push(c.to_string());
            } else if PUNCT_TABLE.iter().any(|(p, _)| *p == c) {
                tokens.push(c.to_string());
            } else {
                return Err(format!("cannot type character '{c}' in sequence '{sequence}'"));
            }
        }
    }
    if tokens.is_empty() {
        return Err(format!("empty output sequence '{sequence}'"));
    }
    Ok(tokens)
}
