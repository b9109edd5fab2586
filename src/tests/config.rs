use super::Config;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.root_id, "reg-content");
    assert_eq!(cfg.container_tag, "ol");
    assert_eq!(cfg.max_depth, crate::extract::DEFAULT_MAX_DEPTH);
    assert_eq!(cfg.file_extensions, ["html", "htm"]);
}

#[test]
fn test_parse_overrides_given_keys() {
    let cfg = Config::parse("root_id = \"content\"\nmax_depth = 8\n").unwrap();

    assert_eq!(cfg.root_id, "content");
    assert_eq!(cfg.max_depth, 8);
    assert_eq!(cfg.container_tag, "ol", "Absent keys should keep defaults");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join("regtree.toml"));

    assert_eq!(cfg.root_id, "reg-content");
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("regtree.toml");
    fs::write(&path, "container_tag = \"ul\"\nfile_extensions = [\"xhtml\"]\n").unwrap();

    let cfg = Config::load_from(&path);

    assert_eq!(cfg.container_tag, "ul");
    assert_eq!(cfg.file_extensions, ["xhtml"]);
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("regtree.toml");
    fs::write(&path, "max_depth = \"deep\"").unwrap();

    let cfg = Config::load_from(&path);

    assert_eq!(cfg.max_depth, crate::extract::DEFAULT_MAX_DEPTH);
}
