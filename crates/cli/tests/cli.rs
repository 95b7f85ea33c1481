use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const NOTES: &str = "Rust ownership rules keep memory safe without a garbage collector.";

#[allow(deprecated)]
fn ragkit() -> Command {
    let mut cmd = Command::cargo_bin("ragkit").expect("binary");
    cmd.env("RAGKIT_EMBEDDING_DIM", "32")
        .env_remove("RAGKIT_EMBEDDING_BATCH")
        .env_remove("RUST_LOG");
    cmd
}

fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn write_transcript(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("lecture.vtt");
    fs::write(
        &path,
        "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.000\n<v Host>Welcome back</v>\n\n\
         2\n00:00:02.000 --> 00:00:04.000 align:start\ntoday we cover traits\n",
    )
    .unwrap();
    path
}

#[test]
fn exact_chunk_text_scores_highest() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("notes.txt"), NOTES).unwrap();
    fs::write(temp.path().join("other.txt"), "Bread needs flour, water and time.").unwrap();

    let body = run_json(
        ragkit()
            .arg("search")
            .arg("--text")
            .arg(temp.path())
            .arg("--query")
            .arg(NOTES)
            .arg("-k")
            .arg("2"),
    );

    assert_eq!(body["measure"], "cosine");
    assert_eq!(body["count"], 2);
    let top = &body["results"][0];
    assert_eq!(top["key"], NOTES);
    assert!((top["score"].as_f64().unwrap() - 1.0).abs() < 1e-4);
    assert_eq!(top["metadata"]["source"], "notes");
    assert_eq!(top["metadata"]["source_type"], "text");
    assert_eq!(top["metadata"]["chunk_index"], 0);
}

#[test]
fn filter_that_matches_nothing_returns_no_results() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, NOTES).unwrap();

    let body = run_json(
        ragkit()
            .arg("search")
            .arg("--text")
            .arg(&file)
            .arg("--query")
            .arg("memory")
            .arg("--filter")
            .arg("source=nope"),
    );

    assert_eq!(body["count"], 0);
    assert_eq!(body["results"], Value::Array(Vec::new()));
}

#[test]
fn keys_output_is_a_list_of_strings() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, NOTES).unwrap();
    let transcript = write_transcript(temp.path());

    let body = run_json(
        ragkit()
            .arg("search")
            .arg("--text")
            .arg(&file)
            .arg("--transcript")
            .arg(&transcript)
            .arg("--query")
            .arg("traits")
            .arg("--output")
            .arg("keys")
            .arg("--filter")
            .arg("source_type=transcript"),
    );

    let keys = body["results"].as_array().expect("array");
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0], "Welcome back today we cover traits");
}

#[test]
fn summary_counts_text_and_transcript_chunks() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, "a".repeat(25)).unwrap();
    let transcript = write_transcript(temp.path());

    let body = run_json(
        ragkit()
            .arg("summary")
            .arg("--text")
            .arg(&file)
            .arg("--chunk-size")
            .arg("10")
            .arg("--chunk-overlap")
            .arg("0")
            .arg("--transcript")
            .arg(&transcript),
    );

    // "aaaaaaaaaa" twice collapses onto one key; "aaaaa" is the third window.
    assert_eq!(body["total_chunks"], 3);
    assert_eq!(body["sources"], serde_json::json!(["lecture", "notes"]));
    assert_eq!(
        body["source_types"],
        serde_json::json!(["text", "transcript"])
    );
    assert_eq!(body["chunks_per_source"]["notes"], 2);
    assert_eq!(body["chunks_per_source"]["lecture"], 1);
}

#[test]
fn missing_sources_fail_with_a_message() {
    ragkit()
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sources given"));
}

#[test]
fn zero_k_is_rejected() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, NOTES).unwrap();

    ragkit()
        .arg("search")
        .arg("--text")
        .arg(&file)
        .arg("--query")
        .arg("memory")
        .arg("-k")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search failed"));
}

#[test]
fn logging_level_follows_flags_and_stays_off_stdout() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, NOTES).unwrap();

    let output = ragkit()
        .arg("summary")
        .arg("--text")
        .arg(&file)
        .output()
        .expect("command run");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Database ready with 1 records"));
    let body: Value = serde_json::from_slice(&output.stdout).expect("stdout is pure json");
    assert_eq!(body["total_chunks"], 1);

    ragkit()
        .arg("--quiet")
        .arg("summary")
        .arg("--text")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    ragkit()
        .arg("--verbose")
        .arg("summary")
        .arg("--text")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("Hash embedder: dimension 32"));
}
