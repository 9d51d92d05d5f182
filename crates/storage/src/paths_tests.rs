// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use super::*;

#[test]
fn unset_paths_default_to_projects_path() {
    let resolved = ResourcePaths::resolve(Some(PathBuf::from("/data/projects")), None, None, None);
    assert_eq!(resolved.images_path, PathBuf::from("/data/projects"));
    assert_eq!(resolved.configs_path, PathBuf::from("/data/projects"));
    assert_eq!(resolved.appliances_path, PathBuf::from("/data/projects"));
}

#[test]
fn explicit_overrides_are_respected() {
    let resolved = ResourcePaths::resolve(
        Some(PathBuf::from("/data/projects")),
        Some(PathBuf::from("/data/images")),
        None,
        None,
    );
    assert_eq!(resolved.images_path, PathBuf::from("/data/images"));
    assert_eq!(resolved.configs_path, PathBuf::from("/data/projects"));
}

#[test]
fn ensure_all_exist_creates_missing_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let projects = tmp.path().join("projects");
    let resolved = ResourcePaths::resolve(Some(projects.clone()), None, None, None);
    resolved.ensure_all_exist().unwrap();
    assert!(projects.is_dir());
}

#[test]
fn copy_default_configs_seeds_missing_files_only() {
    let tmp = tempfile::tempdir().unwrap();
    let built_in = tmp.path().join("built-in");
    let dest = tmp.path().join("dest");
    std::fs::create_dir_all(&built_in).unwrap();
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(built_in.join("a.conf"), "default-a").unwrap();
    std::fs::write(built_in.join("b.conf"), "default-b").unwrap();
    std::fs::write(dest.join("b.conf"), "already-customized").unwrap();

    copy_default_configs(&built_in, &dest);

    assert_eq!(std::fs::read_to_string(dest.join("a.conf")).unwrap(), "default-a");
    assert_eq!(std::fs::read_to_string(dest.join("b.conf")).unwrap(), "already-customized");
}

#[test]
fn copy_default_configs_tolerates_a_missing_source_dir() {
    let tmp = tempfile::tempdir().unwrap();
    copy_default_configs(&tmp.path().join("nonexistent"), tmp.path());
}
