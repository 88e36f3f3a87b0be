//! Well-known role names and authority-string helpers.
//!
//! An authority is a role name carrying the `ROLE_` prefix. Users store
//! their authorities as one comma-separated string, e.g.
//! `"ROLE_ADMIN,ROLE_USER"`.

pub const ROLE_PREFIX: &str = "ROLE_";
pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Split a comma-separated authorities string into trimmed, non-empty tags.
///
/// Order is preserved and duplicates are dropped.
pub fn parse_authorities(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !out.iter().any(|existing| existing == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Join authorities back into the stored comma-separated form.
pub fn join_authorities<S: AsRef<str>>(authorities: &[S]) -> String {
    authorities
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Turn a bare role name (`"ADMIN"`) into its authority (`"ROLE_ADMIN"`).
///
/// Names that already carry the prefix are returned unchanged.
pub fn role_authority(role: &str) -> String {
    if role.starts_with(ROLE_PREFIX) {
        role.to_string()
    } else {
        format!("{ROLE_PREFIX}{role}")
    }
}
