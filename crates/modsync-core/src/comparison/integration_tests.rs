//! Integration tests for the comparison module

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::{DiffSummary, ModStatus, diff};
use crate::model::{Inventory, Mod};
use crate::scanner::scan;
use crate::status::NullSink;
use crate::sync::resolve;
use crate::version::CATEGORY_MARKER;

fn inventory(root: &str, entries: &[(&str, &str)]) -> Inventory {
    let mut inventory = Inventory::new(root);
    for (category, folder) in entries {
        inventory.insert(category, Mod::parse(folder, CATEGORY_MARKER));
    }
    inventory
}

fn create_mod(root: &Path, category: &str, folder: &str, bytes: usize) {
    let dir = root.join(category).join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("entry.lua"), vec![b'x'; bytes]).unwrap();
}

#[test]
fn test_diff_against_itself() {
    let a = inventory(
        "/a",
        &[
            ("skins", "ModA 1.0.0"),
            ("skins", "ModA 1.1.0"),
            ("skins", "ModB 2.0.0"),
            ("terrain", "Map 1.0.0"),
        ],
    );

    let (own, other) = diff(&a, &a);

    for result in [&own, &other] {
        assert!(result.unique_categories.is_empty());
        assert!(result.unique_per_category.is_empty());
        assert!(result.updates_per_category.is_empty());
        assert!(result.is_in_sync());
        let duplicates: Vec<_> = result.duplicates_in("skins").iter().map(|c| &c.name).collect();
        assert_eq!(duplicates, vec!["ModA"]);
        assert!(result.duplicates_in("terrain").is_empty());
    }
}

#[test]
fn test_highest_version_on_one_side_yields_update() {
    let a = inventory("/a", &[("skins", "ModX 1.0.0")]);
    let b = inventory("/b", &[("skins", "ModX 1.0.0"), ("skins", "ModX 2.0.0")]);

    let (a_result, b_result) = diff(&a, &b);

    // B alone reports the duplicate.
    assert!(a_result.duplicates_per_category.is_empty());
    assert_eq!(b_result.duplicates_in("skins")[0].name, "ModX");

    // B provides 2.0.0 toward A's stale collection.
    assert!(a_result.updates_per_category.is_empty());
    let record = &b_result.updates_in("skins")[0];
    assert_eq!(record.candidate.version, "2.0.0");
    assert_eq!(record.candidate.folder_name, "ModX 2.0.0");
    assert_eq!(record.stale.versions, vec!["1.0.0"]);
}

#[test]
fn test_updates_are_compared_numerically() {
    let a = inventory("/a", &[("skins", "ModX 1.9.0")]);
    let b = inventory("/b", &[("skins", "ModX 1.10.0")]);

    let (a_result, b_result) = diff(&a, &b);

    assert!(a_result.updates_per_category.is_empty());
    assert_eq!(b_result.updates_in("skins")[0].candidate.version, "1.10.0");
}

#[test]
fn test_unique_categories_and_mods_are_sorted() {
    let a = inventory(
        "/a",
        &[
            ("weapons", "Gun 1.0.0"),
            ("terrain", "Map 1.0.0"),
            ("skins", "Zeta 1.0.0"),
            ("skins", "Alpha 1.0.0"),
        ],
    );
    let b = inventory("/b", &[("skins", "Beta 1.0.0"), ("aircraft", "Jet 1.0.0")]);

    let (a_result, b_result) = diff(&a, &b);

    assert_eq!(a_result.unique_categories, vec!["terrain", "weapons"]);
    assert_eq!(b_result.unique_categories, vec!["aircraft"]);

    let a_names: Vec<_> = a_result.unique_in("skins").iter().map(|m| m.name.as_str()).collect();
    assert_eq!(a_names, vec!["Alpha", "Zeta"]);
    assert_eq!(b_result.unique_in("skins")[0].name, "Beta");
    assert!(!a_result.is_in_sync());
}

#[test]
fn test_duplicates_cover_unshared_categories() {
    let a = inventory("/a", &[("terrain", "Map 1.0.0"), ("terrain", "Map 1.1.0")]);
    let b = inventory("/b", &[("skins", "ModA 1.0.0")]);

    let (a_result, _) = diff(&a, &b);

    assert_eq!(a_result.duplicates_in("terrain").len(), 1);
}

#[test]
fn test_unparseable_version_is_skipped_not_fatal() {
    let a = inventory("/a", &[("skins", "ModX"), ("skins", "ModY 1.0.0")]);
    let b = inventory("/b", &[("skins", "ModX 1.0.0"), ("skins", "ModY 2.0.0")]);

    let (a_result, b_result) = diff(&a, &b);

    assert_eq!(a_result.skipped.len(), 1);
    assert_eq!(a_result.skipped[0].name, "ModX");
    assert_eq!(b_result.skipped[0].category, "skins");
    // The rest of the category is still classified.
    assert_eq!(b_result.updates_in("skins")[0].candidate.name, "ModY");
}

#[test]
fn test_transfer_bytes() {
    let tmp_a = TempDir::new().unwrap();
    let tmp_b = TempDir::new().unwrap();
    create_mod(tmp_a.path(), "terrain", "Map 1.0.0", 100);
    create_mod(tmp_a.path(), "terrain", "Island 1.0.0", 50);
    create_mod(tmp_a.path(), "skins", "ModA 1.0.0", 7);
    create_mod(tmp_a.path(), "skins", "Shared 1.0.0", 1000);
    create_mod(tmp_b.path(), "skins", "Shared 1.0.0", 1000);

    let a = scan(tmp_a.path(), &mut NullSink).unwrap();
    let b = scan(tmp_b.path(), &mut NullSink).unwrap();
    let (a_result, b_result) = diff(&a, &b);

    assert_eq!(a_result.transfer_bytes(&a), 157);
    assert_eq!(b_result.transfer_bytes(&b), 0);
}

#[test]
fn test_transfer_bytes_counts_every_installed_version() {
    let tmp_a = TempDir::new().unwrap();
    let tmp_b = TempDir::new().unwrap();
    create_mod(tmp_a.path(), "skins", "ModA 1.0.0", 7);
    create_mod(tmp_a.path(), "skins", "ModA 1.1.0", 9);
    create_mod(tmp_a.path(), "terrain", "Map 1.0.0", 100);
    create_mod(tmp_a.path(), "terrain", "Map 2.0.0", 40);
    fs::create_dir(tmp_b.path().join("skins")).unwrap();

    let a = scan(tmp_a.path(), &mut NullSink).unwrap();
    let b = scan(tmp_b.path(), &mut NullSink).unwrap();
    let (a_result, _) = diff(&a, &b);

    assert_eq!(a_result.transfer_bytes(&a), 156);

    let report = resolve(&a, &b, &mut NullSink).unwrap();
    assert_eq!(report.bytes_copied, a_result.transfer_bytes(&a));
}

#[test]
fn test_summary_and_statuses() {
    let a = inventory(
        "/a",
        &[
            ("skins", "Mine 1.0.0"),
            ("skins", "Newer 2.0.0"),
            ("skins", "Older 1.0.0"),
            ("skins", "Twice 1.0.0"),
            ("skins", "Twice 1.1.0"),
            ("terrain", "Map 1.0.0"),
        ],
    );
    let b = inventory(
        "/b",
        &[
            ("skins", "Theirs 1.0.0"),
            ("skins", "Newer 1.0.0"),
            ("skins", "Older 3.0.0"),
            ("skins", "Twice 1.1.0"),
        ],
    );

    let (a_result, b_result) = diff(&a, &b);

    let summary = DiffSummary::new(&a_result, &b_result);
    assert_eq!(summary.changes_per_category.get("skins"), Some(&5));
    assert!(summary.changes_per_category.get("terrain").is_none());
    assert_eq!(summary.changed_categories().collect::<Vec<_>>(), vec!["skins"]);

    let statuses = ModStatus::classify(&a_result, &b_result, "skins");
    assert_eq!(
        statuses,
        vec![
            ("Mine".to_string(), ModStatus::Unique),
            ("Newer".to_string(), ModStatus::UpdateProvider),
            ("Older".to_string(), ModStatus::UpdateConsumer),
            ("Theirs".to_string(), ModStatus::Missing),
            ("Twice".to_string(), ModStatus::Duplicate),
        ]
    );
}

#[test]
fn test_diff_result_serializes() {
    let a = inventory("/a", &[("skins", "ModA 1.0.0")]);
    let b = inventory("/b", &[]);

    let (a_result, _) = diff(&a, &b);
    let json = serde_json::to_value(&a_result).unwrap();

    assert_eq!(json["unique_categories"][0], "skins");
    assert!(json["skipped"].as_array().unwrap().is_empty());
}
