//! Shared identifier casing helpers.

/// Convert a string to PascalCase (e.g., "get_user" -> "GetUser")
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', ' ', '-'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to camelCase (e.g., "get_user" -> "getUser")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}
