//! Name normalisation.

use regex::Regex;
use std::sync::OnceLock;

static NON_WORD: OnceLock<Option<Regex>> = OnceLock::new();

/// Everything outside the ASCII word class `[0-9A-Za-z_]`.
fn non_word() -> Option<&'static Regex> {
    NON_WORD
        .get_or_init(|| Regex::new(r"[^0-9A-Za-z_]").ok())
        .as_ref()
}

/// Strips every non-word character and space from `name`, then uppercases it.
///
/// The word class is ASCII only, so accented letters are removed rather than kept:
/// `"Jöhn Doe #1"` becomes `"JHNDOE1"`.
pub fn convert_to_alphabet_only(name: &str) -> String {
    let filtered = match non_word() {
        Some(re) => re.replace_all(name, ""),
        None => name.into(),
    };

    filtered.replace(' ', "").to_uppercase()
}
