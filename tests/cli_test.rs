use std::process::Command;

fn bikefinder(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_bikefinder"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_invalid_url_exits_with_one() {
    let output = bikefinder(&["www.car.gr/classifieds/bikes"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let errors: Vec<&str> = stderr.lines().filter(|line| line.contains("ERROR")).collect();
    assert_eq!(errors.len(), 1, "{stderr}");
    assert!(errors[0].contains("www.car.gr/classifieds/bikes"));
}

#[test]
fn test_version_flag() {
    let output = bikefinder(&["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("bikefinder {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_missing_url_is_a_usage_error() {
    let output = bikefinder(&[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
