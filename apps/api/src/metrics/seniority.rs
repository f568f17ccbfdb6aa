/// Canonical seniority buckets, checked in this order. The first needle found wins,
/// so "Senior Lead" lands in `Lead`.
const SENIORITY_RULES: &[(&[&str], &str)] = &[
    (&["lead"], "Lead"),
    (&["senior"], "Senior"),
    (&["mid"], "Mid"),
    (&["junior", "jr"], "Junior"),
];

/// Maps a loosely-worded seniority token ("Tech Lead", "Senior Dev", "jr") onto
/// `Lead | Senior | Mid | Junior`. Unknown values keep their text with the first
/// character upper-cased.
pub fn canonicalize_seniority(raw: &str) -> String {
    let lower = raw.to_lowercase();

    for (needles, canonical) in SENIORITY_RULES {
        if needles.iter().any(|n| lower.contains(n)) {
            return (*canonical).to_string();
        }
    }

    let mut chars = raw.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}
