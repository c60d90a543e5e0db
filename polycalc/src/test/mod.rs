use difference::{Changeset, Difference};
use libtest_mimic::{run_tests, Arguments, Outcome, Test};
use std::error::Error;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

#[macro_use]
mod common;

use calc_emit_test::CalcEmitTest;
use common::*;
use exec::*;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Arguments::from_args();
    let test_files = collect_test_files()?;
    let tests = test_files.into_iter().map(TestCase::new).collect();
    run_tests(&args, tests, TestCase::drive_test).exit();
}

/// Collects all `.polycalc` system test files, starting from polycalc/src/test and visiting all
/// nested directories.
fn collect_test_files() -> Result<Vec<Test<PathBuf>>, Box<dyn Error>> {
    let root_test_path = Path::new("src/test");
    let mut dirs_to_visit = vec![root_test_path.to_path_buf()];
    let mut tests = Vec::with_capacity(64);
    while let Some(dir) = dirs_to_visit.pop() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                dirs_to_visit.push(path);
                continue;
            }
            if path.extension() == Some(OsStr::new("polycalc")) {
                let name = path.strip_prefix(root_test_path)?.display().to_string();

                tests.push(Test {
                    name,
                    kind: "system".to_owned(),
                    is_ignored: false,
                    is_bench: false,
                    data: path,
                });
            }
        }
    }
    tests.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tests)
}

#[derive(Clone)]
struct TestCase {
    path: PathBuf,
    variant: TestCaseVariant,
}

#[derive(Clone)]
enum TestCaseVariant {
    CalcEmit(CalcEmitTest),
    FailedTestConstruction(String),
}

impl TestCase {
    /// Executes a polycalc system test.
    fn drive_test(test: &Test<Self>) -> Outcome {
        match test.data.variant.clone() {
            TestCaseVariant::FailedTestConstruction(msg) => fail!(msg),
            TestCaseVariant::CalcEmit(tc) => tc.drive_test(test.name.clone(), test.data.path.clone()),
        }
    }

    /// Creates a test case from a polycalc system test file.
    fn new(test_file: Test<PathBuf>) -> Test<Self> {
        let variant = match fs::read_to_string(&test_file.data) {
            Ok(content) => match CalcEmitTest::new(&test_file, content) {
                Ok(test) => TestCaseVariant::CalcEmit(test),
                Err(msg) => TestCaseVariant::FailedTestConstruction(msg),
            },
            Err(e) => TestCaseVariant::FailedTestConstruction(report! { Failure: "{}", e; }),
        };

        Test {
            name: test_file.name,
            kind: test_file.kind,
            is_ignored: test_file.is_ignored,
            is_bench: test_file.is_bench,
            data: TestCase {
                path: test_file.data,
                variant,
            },
        }
    }
}

/// Returns the command to bless a test file.
fn get_bless_cmd(test_name: &str) -> String {
    format!(
        "BLESS=1 cargo test -p polycalc --test system_tests -- \"{}\"",
        test_name
    )
}
