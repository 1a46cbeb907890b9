use super::*;
use crate::config::types::RawConfig;
use std::fs;
use std::path::Path;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "pkg\n").unwrap();
}

fn config_for(app: &Path, remotes: &[&str], remote_first: bool) -> GatherConfig {
    RawConfig {
        app_root: Some(app.to_path_buf()),
        remote_urls: Some(remotes.iter().map(|u| u.to_string()).collect()),
        remote_first: Some(remote_first),
        ..Default::default()
    }
    .resolve()
    .unwrap()
}

#[test]
fn local_sources_then_remote_in_list_order() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("custom_nodes/b/requirements.txt"));
    touch(&dir.path().join("custom_nodes/a/requirements.txt"));

    let cfg = config_for(
        dir.path(),
        &["https://z.example/r.txt", "https://a.example/r.txt"],
        false,
    );
    let described = describe(&discover(&cfg));

    let ids: Vec<&str> = described.iter().map(|d| d.id.as_str()).collect();
    let a = dir.path().join("custom_nodes/a/requirements.txt");
    let b = dir.path().join("custom_nodes/b/requirements.txt");
    assert_eq!(
        ids,
        vec![
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "https://z.example/r.txt",
            "https://a.example/r.txt",
        ]
    );
    assert_eq!(described[0].position, 1);
    assert_eq!(described[0].origin, "local");
    assert_eq!(described[3].origin, "remote");
}

#[test]
fn remote_first_flips_groups() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("custom_nodes/a/requirements.txt"));

    let cfg = config_for(dir.path(), &["https://x.example/r.txt"], true);
    let described = describe(&discover(&cfg));

    assert_eq!(described[0].origin, "remote");
    assert_eq!(described[1].origin, "local");
}

#[test]
fn no_sources_when_nothing_exists() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_for(dir.path(), &[], false);
    assert!(discover(&cfg).is_empty());
}

#[test]
fn discovery_does_not_read_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom_nodes/a/requirements.txt");
    touch(&path);

    let cfg = config_for(dir.path(), &[], false);
    let sources = discover(&cfg);
    fs::remove_file(&path).unwrap();

    // Reading happens later; the vanished file surfaces as an error then
    assert_eq!(sources.len(), 1);
    assert!(sources[0].read_lines().is_err());
}

#[test]
fn previous_output_under_root_does_not_shadow_components() {
    let dir = tempfile::tempdir().unwrap();
    let nodes = dir.path().join("nodes");
    let output = nodes.join("a_out/requirements.txt");
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    fs::write(&output, "alpha==1.0\n").unwrap();
    fs::create_dir_all(nodes.join("b")).unwrap();
    fs::write(nodes.join("b/requirements.txt"), "alpha==2.0\n").unwrap();

    let cfg = RawConfig {
        app_root: Some(dir.path().to_path_buf()),
        discovery_root: Some(nodes.clone()),
        output: Some(output.clone()),
        supplemental: Some(vec![]),
        ..Default::default()
    }
    .resolve()
    .unwrap();

    let outcome = crate::pipeline::gather(&cfg);
    let ids: Vec<&str> = outcome.sources.iter().map(|d| d.id.as_str()).collect();
    let component = nodes.join("b/requirements.txt");
    assert_eq!(ids, vec![component.to_str().unwrap()]);
    assert_eq!(outcome.lines, vec!["alpha==2.0"]);
}
