use assert_cmd::{crate_name, Command};
use assertables::{assert_contains, assert_not_contains};
use pathsplit::cli::{run, split_file, Config};
use pathsplit::{Error, PathError, SplitConfig, TagStatus};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const INPUT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <path d="M0,0h5v5zM10,0h5v5z"/>
</svg>
"#;

const EXPECTED: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <path d="M0,0h5v5z"/>
  <path d="M10,0h5v5z"/>
</svg>
"#;

fn input_file(content: &str) -> NamedTempFile {
    let mut tmpfile = NamedTempFile::new().expect("could not create tmpfile");
    write!(tmpfile, "{content}").expect("tmpfile write failed");
    tmpfile
}

#[test]
fn test_cmdline_help() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    let output = String::from_utf8(cmd.arg("-h").assert().success().get_output().stdout.clone())
        .expect("non-UTF8");
    assert_contains!(output, "Usage");
    assert_contains!(output, "--attribute");
}

#[test]
fn test_cmdline_bad_arg() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    cmd.arg("--no-such-arg").assert().failure().code(2);
}

#[test]
fn test_cmdline_stdin() {
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    cmd.write_stdin(INPUT).assert().success().stdout(EXPECTED);
}

#[test]
fn test_cmdline_stdin_unchanged() {
    let input = "<svg>\n  <path d=\"M0,0h5v5z\"/>\n</svg>\n";
    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    cmd.write_stdin(input).assert().success().stdout(input);
}

#[test]
fn test_cmdline_files() {
    let infile = input_file(INPUT);
    let outfile = NamedTempFile::new().expect("could not create outfile");

    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    cmd.arg(infile.path())
        .arg("-o")
        .arg(outfile.path())
        .assert()
        .success();
    let output = fs::read_to_string(outfile.path()).expect("readable output");
    assert_eq!(output, EXPECTED);
}

#[test]
fn test_cmdline_strict() {
    let input = "<g>\n<path d=\"M0,0zM1,1,\"/>\n<path d=\"M0,0zM1,1z\"/>\n</g>\n";

    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    let output = cmd.write_stdin(input).assert().success().get_output().clone();
    let stdout = String::from_utf8(output.stdout).expect("non-UTF8");
    assert_contains!(stdout, "<path d=\"M1,1z\"/>");
    let stderr = String::from_utf8(output.stderr).expect("non-UTF8");
    assert_contains!(stderr, "line 2");

    let mut cmd = Command::cargo_bin(crate_name!()).unwrap();
    let output = cmd
        .arg("--strict")
        .write_stdin(input)
        .assert()
        .failure()
        .get_output()
        .clone();
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("non-UTF8");
    assert_contains!(stderr, "Path(2, MissingArgs)");
}

#[test]
fn test_cmdline_config() {
    let config = Config::from_cmdline(&format!("{} --help", crate_name!()));
    assert!(config.is_err());

    let infile = input_file(INPUT);
    let outfile = NamedTempFile::new().expect("could not create outfile");
    let config = Config::from_cmdline(&format!(
        "{} {} -o {}",
        crate_name!(),
        infile.path().to_str().unwrap(),
        outfile.path().to_str().unwrap()
    ))
    .expect("cmdline should be valid");
    run(config).expect("run failed");
    assert_eq!(fs::read_to_string(outfile.path()).unwrap(), EXPECTED);

    // Running again with the same config is fine
    let config = Config::from_cmdline(&format!(
        "{} {} -o {} -v",
        crate_name!(),
        infile.path().to_str().unwrap(),
        outfile.path().to_str().unwrap()
    ))
    .expect("cmdline should be valid");
    run(config).expect("run failed");
}

#[test]
fn test_cmdline_same_file() {
    let infile = input_file(INPUT);
    let path = infile.path().to_str().unwrap();
    let config = Config::from_cmdline(&format!("{} {path} -o {path}", crate_name!()));
    assert!(matches!(config, Err(Error::Cli(_))));
}

#[test]
fn test_split_file_custom_names() {
    let infile = input_file("<glyph data='M0,0zM1,1z'/>\n<path d='M0,0zM1,1z'/>\n");
    let outfile = NamedTempFile::new().expect("could not create outfile");
    let cfg = SplitConfig {
        elements: vec!["glyph".into()],
        attributes: vec!["data".into()],
    };
    let report = split_file(
        infile.path().to_str().unwrap(),
        outfile.path().to_str().unwrap(),
        &cfg,
        false,
    )
    .expect("split failed");
    assert_eq!(report.tags.len(), 1);
    assert_eq!(report.tags[0].status, TagStatus::Split(2));

    let output = fs::read_to_string(outfile.path()).unwrap();
    assert_contains!(output, "<glyph data='M1,1z'/>");
    assert_contains!(output, "<path d='M0,0zM1,1z'/>");
    assert_not_contains!(output, "<glyph data='M0,0zM1,1z'/>");
}

#[test]
fn test_split_file_strict_keeps_output() {
    let infile = input_file("<path d='M0,0zL1'/>\n");
    let outfile = input_file("previous");
    let result = split_file(
        infile.path().to_str().unwrap(),
        outfile.path().to_str().unwrap(),
        &SplitConfig::default(),
        true,
    );
    assert!(matches!(result, Err(Error::Path(1, PathError::MissingArgs))));
    assert_eq!(fs::read_to_string(outfile.path()).unwrap(), "previous");
}
