//! Species naming: display labels, variant forms and checklist keys

/// Name suffix of Gigantamax forms
pub const GMAX_SUFFIX: &str = "-gmax";

/// Check whether a species name is a Gigantamax form (`charizard-gmax`)
pub fn is_gigantamax(name: &str) -> bool {
    name.len() > GMAX_SUFFIX.len() && name.ends_with(GMAX_SUFFIX)
}

/// Name of the principal form a variant shares its sprite and id with
///
/// Names that are not a variant are returned unchanged.
pub fn principal_name(name: &str) -> &str {
    if is_gigantamax(name) {
        &name[..name.len() - GMAX_SUFFIX.len()]
    } else {
        name
    }
}

/// Title-case a hyphenated name (`mr-mime` → `Mr Mime`)
pub fn title_case(name: &str) -> String {
    name.split('-')
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

/// Label shown in the checklist name column
pub fn display_name(name: &str) -> String {
    if is_gigantamax(name) {
        format!("Gigantamax {}", title_case(principal_name(name)))
    } else {
        title_case(name)
    }
}

/// Checklist key of a box slot: `pid-form` for a variant, else `pid`
pub fn variant_key(pid: &str, form: Option<&str>) -> String {
    match form {
        Some(form) if !form.is_empty() => format!("{}-{}", pid, form),
        _ => pid.to_string(),
    }
}
