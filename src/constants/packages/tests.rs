use super::*;
use crate::core::specifier;

#[test]
fn test_supplemental_entries_all_parse() {
    for line in SUPPLEMENTAL {
        assert!(specifier::parse(line).is_some(), "unparseable: {}", line);
    }
}

#[test]
fn test_default_exclusions_all_parse() {
    for line in DEFAULT_EXCLUSIONS {
        assert!(specifier::parse(line).is_some(), "unparseable: {}", line);
    }
}

#[test]
fn test_supplemental_has_no_duplicate_names() {
    let mut names: Vec<String> = SUPPLEMENTAL
        .iter()
        .filter_map(|line| specifier::parse(line))
        .map(|entry| entry.name)
        .collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn test_runtime_provided_names_are_lowercase() {
    for name in RUNTIME_PROVIDED {
        assert_eq!(*name, name.to_lowercase());
    }
}

#[test]
fn test_supplemental_not_excluded_by_default() {
    let excluded: Vec<String> = DEFAULT_EXCLUSIONS
        .iter()
        .filter_map(|line| specifier::parse(line))
        .map(|entry| entry.name)
        .collect();

    for line in SUPPLEMENTAL {
        let entry = specifier::parse(line).unwrap();
        assert!(!excluded.contains(&entry.name));
    }
}
