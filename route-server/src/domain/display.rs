//! Display formatting shared by leg labels and itinerary warnings.

/// Formats a node from its short codes and optional name.
///
/// - name and codes present, and not the same single value: `"Name (A/B)"`
/// - no name: the codes joined by `/` (possibly empty)
/// - otherwise: the bare name
///
/// An empty name counts as no name.
///
/// # Examples
///
/// ```
/// use route_server::domain::display_name;
///
/// assert_eq!(display_name(&["KGX", "KX"], Some("Kings Cross")), "Kings Cross (KGX/KX)");
/// assert_eq!(display_name(&["KGX"], None), "KGX");
/// assert_eq!(display_name(&["Spawn"], Some("Spawn")), "Spawn");
/// assert_eq!(display_name::<&str>(&[], Some("Spawn")), "Spawn");
/// ```
pub fn display_name<S: AsRef<str>>(codes: &[S], name: Option<&str>) -> String {
    let name = name.filter(|n| !n.is_empty());
    let joined_codes = || {
        codes
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/")
    };

    match name {
        None => joined_codes(),
        Some(name) if codes.is_empty() => name.to_string(),
        Some(name) if codes.len() == 1 && codes[0].as_ref() == name => name.to_string(),
        Some(name) => format!("{} ({})", name, joined_codes()),
    }
}

/// Joins a list of alternative names with `/`, or `None` for an empty list.
pub fn join_names(names: &[String]) -> Option<String> {
    if names.is_empty() {
        None
    } else {
        Some(names.join("/"))
    }
}
