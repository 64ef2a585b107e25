use assert_cmd::Command;

fn strata() -> Command {
    Command::new(assert_cmd::cargo_bin!("strata"))
}

#[test]
fn renders_dot_from_stdin_to_svg() {
    let out = strata()
        .arg("render")
        .write_stdin("digraph { a -> b; b -> c }")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(out).unwrap();
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let vertices = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("vertex"))
        .count();
    assert_eq!(vertices, 3);
    assert!(doc.root_element().attribute("width").is_none());
}

#[test]
fn renders_json_to_a_file_with_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.dot");
    let config = dir.path().join("config.json");
    let out = dir.path().join("out.json");
    std::fs::write(&input, "digraph { a -> b }").unwrap();
    std::fs::write(&config, r#"{ "layout": { "rank_dir": "LR" } }"#).unwrap();

    strata()
        .args(["render", "--format", "json", "--pretty", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .arg(&input)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["rank_dir"], "LR");
}

#[test]
fn sized_svg_has_width_and_height() {
    let out = strata()
        .arg("--size")
        .arg("-")
        .write_stdin("digraph { a }")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(out).unwrap();
    let doc = roxmltree::Document::parse(&svg).unwrap();
    assert!(doc.root_element().attribute("width").is_some());
    assert!(doc.root_element().attribute("height").is_some());
}

#[test]
fn diff_writes_both_drawings() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.dot");
    let new = dir.path().join("new.dot");
    let out_a = dir.path().join("a.svg");
    let out_b = dir.path().join("b.svg");
    std::fs::write(&old, "digraph { a -> b; b -> c }").unwrap();
    std::fs::write(&new, "digraph { a -> b; b -> x }").unwrap();

    strata()
        .arg("diff")
        .arg("--out-a")
        .arg(&out_a)
        .arg("--out-b")
        .arg(&out_b)
        .arg(&old)
        .arg(&new)
        .assert()
        .success();

    let a = std::fs::read_to_string(&out_a).unwrap();
    let b = std::fs::read_to_string(&out_b).unwrap();
    assert!(a.contains(strata::diff::REMOVED_COLOR));
    assert!(!a.contains(strata::diff::ADDED_COLOR));
    assert!(b.contains(strata::diff::ADDED_COLOR));
    assert!(!b.contains(strata::diff::REMOVED_COLOR));
}

#[test]
fn usage_errors_exit_with_two() {
    strata().arg("--bogus").assert().code(2);
    strata().args(["--format", "png"]).assert().code(2);
    strata().args(["diff", "only-one.dot"]).assert().code(2);
}

#[test]
fn invalid_input_exits_with_one() {
    strata()
        .write_stdin("digraph { a -> }")
        .assert()
        .code(1);
    strata()
        .write_stdin("graph { a -- b }")
        .assert()
        .code(1);
    strata().arg("does-not-exist.dot").assert().code(1);
}
