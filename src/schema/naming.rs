// src/schema/naming.rs

use std::collections::{HashMap, HashSet};

/// Substitute for headers that sanitize down to nothing.
pub const UNNAMED_COLUMN: &str = "unnamed_column";

/// Map one header cell to a safe column name.
///
/// Every character outside `[a-zA-Z0-9_]` becomes `_`, runs of `_` collapse to
/// one, leading/trailing `_` are trimmed, a leading digit gets a `col_` prefix
/// and an empty result becomes [`UNNAMED_COLUMN`]. Never fails.
pub fn sanitize_column_name(header: &str) -> String {
    let mut name = String::with_capacity(header.len());
    for ch in header.chars() {
        let ch = if ch.is_ascii_alphanumeric() || ch == '_' {
            ch
        } else {
            '_'
        };
        if ch == '_' && name.ends_with('_') {
            continue;
        }
        name.push(ch);
    }

    let name = name.trim_matches('_');
    if name.is_empty() {
        return UNNAMED_COLUMN.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("col_{name}");
    }
    name.to_string()
}

/// Sanitize an ordered header list into unique column names, one per header.
///
/// The N-th occurrence (N >= 2) of a sanitized name gets `_N` appended. Names
/// compare case-insensitively, and everything in `reserved` counts as already
/// used once. The result depends only on the arguments, so the table definition
/// and the insert statement always agree on names and order.
pub fn column_names(headers: &[String], reserved: &[&str]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    for name in reserved {
        let key = name.to_ascii_lowercase();
        seen.insert(key.clone(), 1);
        taken.insert(key);
    }

    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        let base = sanitize_column_name(header);
        let key = base.to_ascii_lowercase();

        let count = seen.entry(key).or_insert(0);
        *count += 1;

        let mut name = if *count == 1 {
            base.clone()
        } else {
            format!("{base}_{count}")
        };
        // a literal header may already occupy the suffixed name
        while taken.contains(&name.to_ascii_lowercase()) {
            *count += 1;
            name = format!("{base}_{count}");
        }

        taken.insert(name.to_ascii_lowercase());
        out.push(name);
    }
    out
}
