use super::*;
use std::fs;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[tokio::test]
async fn test_bash_runner_captures_output() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "up.sh", "echo out\necho err 1>&2\n");

    let result = BashRunner.run(&script).await.unwrap();
    assert!(result.success());
    assert_eq!(result.output, "out\nerr\n");
}

#[tokio::test]
async fn test_bash_runner_reports_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "up.sh", "echo failing\nexit 3\n");

    let result = BashRunner.run(&script).await.unwrap();
    assert_eq!(result.code, Some(3));

    let err = result.into_result(&script).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("exit code 3"), "{msg}");
    assert!(msg.contains("failing"), "{msg}");
}

#[test]
fn test_into_result_success_returns_output() {
    let output = ScriptOutput {
        code: Some(0),
        output: "done\n".to_string(),
    };
    assert_eq!(output.into_result(Path::new("x.sh")).unwrap(), "done\n");
}

#[test]
fn test_signal_is_failure() {
    let output = ScriptOutput {
        code: None,
        output: String::new(),
    };
    assert!(!output.success());
    let err = output.into_result(Path::new("x.sh")).unwrap_err();
    assert!(matches!(err, ScriptError::Failed { ref status, .. } if status == "a signal"));
}
