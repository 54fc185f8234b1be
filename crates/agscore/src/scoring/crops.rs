/// Lowercase, whitespace-collapsed form used for every table comparison.
pub(crate) fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

const CROP_ALIASES: &[(&[&str], &str)] = &[
    (&["palay", "rice", "palay (rice)", "palay rice"], "Palay (Rice)"),
    (&["corn", "maize"], "Corn"),
    (&["potato", "potatoes"], "Potato"),
];

/// Canonical benchmark crop name; unknown crops are title-cased.
pub fn canonical_crop_name(value: &str) -> String {
    let key = normalize_key(value);
    if let Some((_, canonical)) = CROP_ALIASES
        .iter()
        .find(|(aliases, _)| aliases.contains(&key.as_str()))
    {
        return (*canonical).to_string();
    }

    key.split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `value` names a known crop alias.
pub(crate) fn is_crop_alias(value: &str) -> bool {
    let key = normalize_key(value);
    CROP_ALIASES
        .iter()
        .any(|(aliases, _)| aliases.contains(&key.as_str()))
}
