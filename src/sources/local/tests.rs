use super::*;
use std::fs;

fn touch(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn finds_manifests_at_any_depth_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("custom_nodes");
    touch(&root.join("zeta/requirements.txt"), "z\n");
    touch(&root.join("alpha/requirements.txt"), "a\n");
    touch(&root.join("alpha/deep/er/requirements.txt"), "d\n");
    touch(&root.join("alpha/other.txt"), "x\n");

    let found = discover_manifest_paths(&root, "requirements.txt", None, None);

    assert_eq!(
        found,
        vec![
            root.join("alpha/deep/er/requirements.txt"),
            root.join("alpha/requirements.txt"),
            root.join("zeta/requirements.txt"),
        ]
    );
}

#[test]
fn ordering_is_bytewise_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    touch(&root.join("b/c/requirements.txt"), "");
    touch(&root.join("b-c/requirements.txt"), "");

    let found = discover_manifest_paths(&root, "requirements.txt", None, None);

    // '-' sorts before '/' byte-wise
    assert_eq!(
        found,
        vec![
            root.join("b-c/requirements.txt"),
            root.join("b/c/requirements.txt"),
        ]
    );
}

#[test]
fn includes_top_level_manifest_once() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path();
    let root = app.join("custom_nodes");
    touch(&root.join("node/requirements.txt"), "");
    let top = app.join("requirements.txt");
    touch(&top, "");

    let found = discover_manifest_paths(&root, "requirements.txt", Some(&top), None);
    assert_eq!(found, vec![root.join("node/requirements.txt"), top.clone()]);

    // Top-level inside the scanned tree is not listed twice
    let found = discover_manifest_paths(app, "requirements.txt", Some(&top), Some(&top));
    assert_eq!(found.iter().filter(|p| **p == top).count(), 1);
}

#[test]
fn missing_top_level_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let found = discover_manifest_paths(
        dir.path(),
        "requirements.txt",
        Some(&dir.path().join("absent/requirements.txt")),
        None,
    );
    assert!(found.is_empty());
}

#[test]
fn missing_root_yields_only_top_level() {
    let dir = tempfile::tempdir().unwrap();
    let top = dir.path().join("requirements.txt");
    touch(&top, "");

    let found = discover_manifest_paths(
        &dir.path().join("nope"),
        "requirements.txt",
        Some(&top),
        None,
    );
    assert_eq!(found, vec![top]);
}

#[test]
fn custom_manifest_name() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("x/deps.txt"), "");
    touch(&dir.path().join("x/requirements.txt"), "");

    let found = discover_manifest_paths(dir.path(), "deps.txt", None, None);
    assert_eq!(found, vec![dir.path().join("x/deps.txt")]);
}

#[cfg(unix)]
#[test]
fn symlinked_manifest_is_found() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nodes");
    let shared = dir.path().join("shared.txt");
    touch(&shared, "alpha==1.0\n");
    fs::create_dir_all(root.join("a")).unwrap();
    std::os::unix::fs::symlink(&shared, root.join("a/requirements.txt")).unwrap();

    let found = discover_manifest_paths(&root, "requirements.txt", None, None);

    assert_eq!(found, vec![root.join("a/requirements.txt")]);
    let source = LocalFileSource::new(found[0].clone());
    assert_eq!(source.read_lines().unwrap(), vec!["alpha==1.0"]);
}

#[cfg(unix)]
#[test]
fn symlinked_directory_is_not_descended() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nodes");
    let outside = dir.path().join("outside");
    touch(&outside.join("requirements.txt"), "beta\n");
    fs::create_dir_all(&root).unwrap();
    std::os::unix::fs::symlink(&outside, root.join("linked")).unwrap();

    let found = discover_manifest_paths(&root, "requirements.txt", None, None);
    assert!(found.is_empty());
}

#[cfg(unix)]
#[test]
fn dangling_symlink_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nodes");
    fs::create_dir_all(root.join("a")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.txt"), root.join("a/requirements.txt"))
        .unwrap();

    assert!(discover_manifest_paths(&root, "requirements.txt", None, None).is_empty());
}

#[test]
fn output_under_root_is_not_walked() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nodes");
    let output = root.join("a_out/requirements.txt");
    touch(&output, "alpha==1.0\n");
    touch(&root.join("b/requirements.txt"), "alpha==2.0\n");

    let found = discover_manifest_paths(&root, "requirements.txt", None, Some(&output));
    assert_eq!(found, vec![root.join("b/requirements.txt")]);
}

#[test]
fn output_kept_when_it_is_the_top_level() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nodes");
    let output = root.join("requirements.txt");
    touch(&output, "alpha==1.0\n");

    let found = discover_manifest_paths(&root, "requirements.txt", Some(&output), Some(&output));
    assert_eq!(found, vec![output]);
}

#[test]
fn read_lines_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("requirements.txt");
    touch(&path, "b==1\n# note\n\na\n");

    let source = LocalFileSource::new(path.clone());
    assert_eq!(source.id(), path.display().to_string());
    assert_eq!(source.read_lines().unwrap(), vec!["b==1", "# note", "", "a"]);
}

#[test]
fn unreadable_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = LocalFileSource::new(dir.path().join("gone.txt"));
    assert!(matches!(
        source.read_lines(),
        Err(ReqgatherError::IoError { .. })
    ));
}
