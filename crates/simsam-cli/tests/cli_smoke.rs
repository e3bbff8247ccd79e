use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

fn seed(dir: &Path) {
    fs::create_dir_all(dir.join("fromZ1M")).unwrap();
    fs::write(
        dir.join("fromZ1M/elements.json"),
        r#"[
  {"id": "E1", "type": "Resource"},
  {"id": "A1", "type": "Action", "subType": "Mail Outgoing"},
  {"id": "D1", "type": "Decision"},
  {"id": "S1", "type": "State"}
]"#,
    )
    .unwrap();
    fs::write(
        dir.join("fromZ1M/connections.json"),
        r#"[
  {"id": "E1->A1", "fromId": "E1", "toId": "A1"},
  {"id": "A1->D1", "fromId": "A1", "toId": "D1", "probability": 0.5},
  {"id": "D1->S1", "fromId": "D1", "toId": "S1"}
]"#,
    )
    .unwrap();
}

#[test]
fn cli_converts_with_default_folders() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed(tmp.path());

    Command::cargo_bin("simsam-cli")
        .unwrap()
        .current_dir(tmp.path())
        .assert()
        .success();

    let xml = fs::read_to_string(tmp.path().join("toBPMN/simsam_fixed.bpmn")).expect("read bpmn");
    assert!(xml.contains(r#"<sendTask id="A1" name="">"#));
    assert_eq!(xml.matches("<sequenceFlow ").count(), 3);
    assert_eq!(xml.matches("<conditionExpression").count(), 1);
    assert_eq!(xml.matches("<bpmndi:BPMNShape ").count(), 4);
    assert_eq!(xml.matches("<bpmndi:BPMNEdge ").count(), 3);
}

#[test]
fn cli_reverses_with_path_overrides() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed(tmp.path());
    let bpmn = tmp.path().join("model.bpmn");
    let out = tmp.path().join("json");

    Command::cargo_bin("simsam-cli")
        .unwrap()
        .current_dir(tmp.path())
        .args(["--out-bpmn", bpmn.to_string_lossy().as_ref()])
        .assert()
        .success();

    Command::cargo_bin("simsam-cli")
        .unwrap()
        .current_dir(tmp.path())
        .args([
            "--reverse",
            "--bpmn",
            bpmn.to_string_lossy().as_ref(),
            "--out-elements",
            out.join("e.json").to_string_lossy().as_ref(),
            "--out-connections",
            out.join("c.json").to_string_lossy().as_ref(),
            "--out-variables",
            out.join("v.json").to_string_lossy().as_ref(),
            "--out-layout",
            out.join("l.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let elements: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("e.json")).unwrap()).unwrap();
    assert_eq!(elements.as_array().map(Vec::len), Some(4));
    let variables = fs::read_to_string(out.join("v.json")).unwrap();
    assert_eq!(variables, "{}");
}

#[test]
fn cli_fails_on_missing_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    Command::cargo_bin("simsam-cli")
        .unwrap()
        .current_dir(tmp.path())
        .assert()
        .code(1);
    assert!(!tmp.path().join("toBPMN").exists());
}

#[test]
fn cli_rejects_unknown_flags() {
    Command::cargo_bin("simsam-cli")
        .unwrap()
        .arg("--frobnicate")
        .assert()
        .code(2);
}
