use test_util::*;

use std::fs;

#[test]
fn cd_changes_directory_for_later_groups() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join("sub")).unwrap();
	let out = run_in(dir.path(), &["cd", "sub", ";", "/bin/pwd"]);
	assert_eq!(out.status.code(), Some(0));
	assert_eq!(stderr(&out), "");
	let expected = dir.path().join("sub").canonicalize().unwrap();
	assert_eq!(stdout(&out).trim_end(), expected.to_str().unwrap());
}

#[test]
fn cd_without_argument() {
	let dir = tempfile::tempdir().unwrap();
	let out = run_in(dir.path(), &["cd", ";", "/bin/pwd"]);
	assert_eq!(out.status.code(), Some(0));
	assert_eq!(stderr(&out), "error: cd: bad arguments\n");
	assert_eq!(stdout(&out).trim_end(), dir.path().canonicalize().unwrap().to_str().unwrap());
}

#[test]
fn cd_with_too_many_arguments() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join("sub")).unwrap();
	let out = run_in(dir.path(), &["cd", "sub", "sub", ";", "/bin/pwd"]);
	assert_eq!(stderr(&out), "error: cd: bad arguments\n");
	assert_eq!(stdout(&out).trim_end(), dir.path().canonicalize().unwrap().to_str().unwrap());
}

#[test]
fn cd_to_missing_directory() {
	let dir = tempfile::tempdir().unwrap();
	let out = run_in(dir.path(), &["cd", "/nonexistent", ";", "/bin/pwd"]);
	assert_eq!(out.status.code(), Some(0));
	assert_eq!(stderr(&out), "error: cd: cannot change directory to /nonexistent\n");
	assert_eq!(stdout(&out).trim_end(), dir.path().canonicalize().unwrap().to_str().unwrap());
}

#[test]
fn cd_after_pipeline() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join("sub")).unwrap();
	let out = run_in(dir.path(), &["/bin/echo", "x", "|", "/bin/cat", ";", "cd", "sub", ";", "/bin/pwd"]);
	let expected = dir.path().join("sub").canonicalize().unwrap();
	assert_eq!(stdout(&out), format!("x\n{}\n", expected.to_str().unwrap()));
}

#[test]
fn relative_executable_resolves_against_new_directory() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir(dir.path().join("bin")).unwrap();
	let out = run_in(dir.path(), &["cd", "bin", ";", "./missing-tool"]);
	assert_eq!(stderr(&out), "error: cannot execute ./missing-tool\n");
}
