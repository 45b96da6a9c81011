//! Map literal expansion.
//!
//! A value such as `(primary: blue, sizes: (sm: 1px, lg: 4px))` is split
//! into entries; each entry is parsed as a declaration of its own and
//! expanded again, so nested maps become nested `map_value`s.

use super::declaration::parse_declaration;
use super::grammar::{contains_annotation, parse_map_entry};
use crate::types::Declaration;

/// Returns the declaration with `map_value` filled in when its value holds
/// `key: value` entries. Plain values come back unchanged.
pub fn expand_map(declaration: Declaration) -> Declaration {
    let entries = map_entries(&declaration.value);
    if entries.is_empty() {
        return declaration;
    }

    let map_value = entries
        .into_iter()
        .filter_map(|entry| {
            let entry = separate_annotation(entry);
            parse_declaration(&format!("${entry};")).map(expand_map)
        })
        .collect();

    Declaration {
        map_value: Some(map_value),
        ..declaration
    }
}

/// Finds every map entry in `value`, left to right.
pub fn map_entries(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while let Some(c) = value[pos..].chars().next() {
        match parse_map_entry(&value[pos..]) {
            Ok((rest, entry)) => {
                entries.push(entry);
                pos = value.len() - rest.len();
            }
            Err(_) => pos += c.len_utf8(),
        }
    }

    entries
}

/// Rewrites `key: value, // note` to `key: value; // note` so the wrapped
/// entry ends before its annotation.
fn separate_annotation(entry: &str) -> String {
    if !contains_annotation(entry) {
        return entry.to_string();
    }

    let comma = entry.match_indices(',').map(|(i, _)| i).find(|&i| {
        let after = entry[i + 1..].trim_start();
        after.starts_with("/*") || after.starts_with("//")
    });

    match comma {
        Some(i) => format!("{};{}", &entry[..i], &entry[i + 1..]),
        None => entry.to_string(),
    }
}
