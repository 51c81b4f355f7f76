use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn seqls() -> Command {
	Command::cargo_bin("seqls").unwrap()
}

fn touch_all(dir: &Path, names: &[&str]) {
	for name in names {
		fs::write(dir.join(name), b"").unwrap();
	}
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
	let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
		.lines()
		.map(str::to_owned)
		.collect();
	lines.sort();
	lines
}

#[test]
fn list_collapses_sequences() {
	let temp_dir = TempDir::new().unwrap();
	touch_all(
		temp_dir.path(),
		&[
			"file",
			"seq.1.exr",
			"seq.2.exr",
			"seq.3.exr",
			"seq.0001.tiff",
			"seq.0002.tiff",
			"seq.0003.tiff",
			".hidden",
		],
	);

	let output = seqls().arg("list").arg(temp_dir.path()).output().unwrap();
	assert!(output.status.success());
	assert_eq!(
		stdout_lines(&output),
		vec!["file", "seq.0001-0003.tiff", "seq.1-3.exr"]
	);
}

#[test]
fn list_flags_show_everything() {
	let temp_dir = TempDir::new().unwrap();
	touch_all(temp_dir.path(), &[".hidden", "seq.1.exr", "seq.2.exr"]);

	let output = seqls()
		.args(["list", "--all", "--dot-dirs", "--no-sequence"])
		.arg(temp_dir.path())
		.output()
		.unwrap();
	assert!(output.status.success());
	assert_eq!(
		stdout_lines(&output),
		vec![".", "..", ".hidden", "seq.1.exr", "seq.2.exr"]
	);
}

#[test]
fn list_missing_dir_fails() {
	let temp_dir = TempDir::new().unwrap();
	let missing = temp_dir.path().join("missing");

	let output = seqls().arg("list").arg(&missing).output().unwrap();
	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("cannot read"), "stderr: {stderr}");
	assert!(output.stdout.is_empty());
}

#[test]
fn list_json() {
	let temp_dir = TempDir::new().unwrap();
	touch_all(temp_dir.path(), &["beauty.0010.exr", "beauty.0020.exr"]);

	let output = seqls()
		.args(["list", "--json"])
		.arg(temp_dir.path())
		.output()
		.unwrap();
	assert!(output.status.success());
	let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
	let entries = doc["entries"].as_array().unwrap();
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0]["display"], "beauty.0010-0020.exr");
	assert_eq!(entries[0]["frame_min"], 10);
	assert_eq!(entries[0]["frame_max"], 20);
	assert_eq!(entries[0]["frame_padding"], 4);
	assert!(doc["error"].is_null());
}

#[test]
fn random_then_list() {
	let temp_dir = TempDir::new().unwrap();
	let dir = temp_dir.path().join("renders");

	let output = seqls()
		.args(["random", "--seed", "7"])
		.arg(&dir)
		.args(["30", "3"])
		.output()
		.unwrap();
	assert!(output.status.success());
	assert_eq!(fs::read_dir(&dir).unwrap().count(), 30);

	let output = seqls().arg("list").arg(&dir).output().unwrap();
	assert!(output.status.success());
	let lines = stdout_lines(&output);
	assert_eq!(lines.len(), 3, "{lines:?}");
	for line in &lines {
		assert!(line.starts_with("shot") && line.ends_with(".tif"), "{line}");
	}
}

#[test]
fn list_full_path() {
	let temp_dir = TempDir::new().unwrap();
	touch_all(temp_dir.path(), &["shot_a.0001.png", "shot_a.0002.png"]);

	let output = seqls()
		.args(["list", "--full-path"])
		.arg(temp_dir.path())
		.output()
		.unwrap();
	assert!(output.status.success());
	// Scanned names carry no directory, so there is no path to prefix.
	assert_eq!(stdout_lines(&output), vec!["shot_a.0001-0002.png"]);
}

#[test]
fn list_negative_frames() {
	let temp_dir = TempDir::new().unwrap();
	touch_all(temp_dir.path(), &["f.-3.exr", "f.-1.exr", "f.2.exr"]);

	let output = seqls().arg("list").arg(temp_dir.path()).output().unwrap();
	assert!(output.status.success());
	assert_eq!(stdout_lines(&output), vec!["f.-1-3.exr", "f.2.exr"]);

	let output = seqls()
		.args(["list", "--negative"])
		.arg(temp_dir.path())
		.output()
		.unwrap();
	assert!(output.status.success());
	assert_eq!(stdout_lines(&output), vec!["f.-3-2.exr"]);
}

#[test]
fn list_config_file() {
	let temp_dir = TempDir::new().unwrap();
	let dir = temp_dir.path().join("renders");
	fs::create_dir(&dir).unwrap();
	touch_all(&dir, &[".hidden", "averyverylongname.0001.exr", "averyverylongname.0002.exr"]);
	let config = temp_dir.path().join("seqls.json");
	fs::write(
		&config,
		r#"{"dir_options": {"include_dot_files": true}, "max_len": 26}"#,
	)
	.unwrap();

	let output = seqls()
		.arg("list")
		.arg("--config")
		.arg(&config)
		.arg(&dir)
		.output()
		.unwrap();
	assert!(output.status.success());
	assert_eq!(
		stdout_lines(&output),
		vec![".hidden", "averyverylongname.0001-000"]
	);
}

#[test]
fn list_bad_config_fails() {
	let temp_dir = TempDir::new().unwrap();
	let config = temp_dir.path().join("seqls.json");
	fs::write(&config, r#"{"max_len": 0}"#).unwrap();

	let output = seqls()
		.arg("list")
		.arg("--config")
		.arg(&config)
		.arg(temp_dir.path())
		.output()
		.unwrap();
	assert!(!output.status.success());
	assert!(output.stdout.is_empty());
}
