use once_cell::sync::Lazy;
use regex::Regex;

// Pre-compiled regex for whitespace normalization (compile once, use many times)
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex pattern")
});

/// A digit-led run with embedded group separators ("12 345", "1.995", "15,000")
static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d(?:[\d.,\s]*\d)?").expect("Invalid digit run regex pattern")
});

/// Space-like code points that listing sites use as thousands separators
const SPACE_LIKE: &[char] = &[
    '\u{00A0}', // no-break space
    '\u{2007}', // figure space
    '\u{2009}', // thin space
    '\u{200A}', // hair space
    '\u{202F}', // narrow no-break space
];

/// Canonicalize whitespace: space-like code points become ordinary spaces,
/// runs collapse to one space, ends are trimmed.
pub fn normalize(text: &str) -> String {
    let spaced: String = text
        .chars()
        .map(|c| if SPACE_LIKE.contains(&c) { ' ' } else { c })
        .collect();
    WHITESPACE_RE.replace_all(&spaced, " ").trim().to_string()
}

/// Parse the first digit run in `text`, ignoring separators inside it.
///
/// Returns `None` when there is no digit run or the digits overflow.
pub fn extract_integer(text: &str) -> Option<u64> {
    let normalized = normalize(text);
    let run = DIGIT_RUN_RE.find(&normalized)?;
    let digits: String = run.as_str().chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Map Romanian diacritics (both cedilla and comma-below forms) to ASCII
pub fn fold_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ă' | 'â' => 'a',
            'Ă' | 'Â' => 'A',
            'î' => 'i',
            'Î' => 'I',
            'ș' | 'ş' => 's',
            'Ș' | 'Ş' => 'S',
            'ț' | 'ţ' => 't',
            'Ț' | 'Ţ' => 'T',
            other => other,
        })
        .collect()
}

/// Lower-cased, diacritic-free, whitespace-normalized form used for keyword scans
pub fn fold(text: &str) -> String {
    fold_diacritics(&normalize(text)).to_lowercase()
}

/// Render an integer with `,` between digit groups ("20,000")
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
