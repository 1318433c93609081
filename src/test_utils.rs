//! Test utilities: recording progress sinks, fixture documents and
//! temporary input directories.
//!
//! This module is only compiled for tests and benchmarks.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;

use crate::ast::{Ast, NodeId};
use crate::progress::{CancelToken, Progress};

/// `const greeting = `hello ${name}`; console.log(greeting);` as ESTree JSON.
pub const SAMPLE_PROGRAM: &str = r#"{
  "type": "Program",
  "sourceType": "script",
  "body": [
    {
      "type": "VariableDeclaration",
      "kind": "const",
      "declarations": [
        {
          "type": "VariableDeclarator",
          "id": {"type": "Identifier", "name": "greeting"},
          "init": {
            "type": "TemplateLiteral",
            "quasis": [
              {"type": "TemplateElement", "value": {"raw": "hello ", "cooked": "hello "}, "tail": false},
              {"type": "TemplateElement", "value": {"raw": "", "cooked": ""}, "tail": true}
            ],
            "expressions": [{"type": "Identifier", "name": "name"}]
          }
        }
      ]
    },
    {
      "type": "ExpressionStatement",
      "expression": {
        "type": "CallExpression",
        "callee": {
          "type": "MemberExpression",
          "computed": false,
          "object": {"type": "Identifier", "name": "console"},
          "property": {"type": "Identifier", "name": "log"}
        },
        "arguments": [{"type": "Identifier", "name": "greeting"}]
      }
    }
  ]
}"#;

/// Parse a fixture document, panicking on malformed input.
pub fn parse(text: &str) -> (Ast, NodeId) {
    Ast::from_json(text).expect("fixture should be a valid ESTree document")
}

pub fn sample_program() -> (Ast, NodeId) {
    parse(SAMPLE_PROGRAM)
}

#[derive(Debug, Default)]
struct ProgressLog {
    total_work: Option<f64>,
    worked: Vec<f64>,
    titles: Vec<String>,
    done_calls: usize,
    ticks: usize,
    cancel_after: Option<usize>,
}

/// Progress sink that records every report.
///
/// Clones share the same log, so a test can hand one clone to the code
/// under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgress {
    log: Rc<RefCell<ProgressLog>>,
    cancel: CancelToken,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report cancellation once `ticks` units have been added with `worked`.
    pub fn cancel_after(self, ticks: usize) -> Self {
        self.log.borrow_mut().cancel_after = Some(ticks);
        self
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn total_work(&self) -> Option<f64> {
        self.log.borrow().total_work
    }

    pub fn worked_history(&self) -> Vec<f64> {
        self.log.borrow().worked.clone()
    }

    pub fn last_worked(&self) -> Option<f64> {
        self.log.borrow().worked.last().copied()
    }

    pub fn titles(&self) -> Vec<String> {
        self.log.borrow().titles.clone()
    }

    pub fn done_calls(&self) -> usize {
        self.log.borrow().done_calls
    }
}

impl Progress for RecordingProgress {
    fn set_total_work(&mut self, total_work: f64) {
        self.log.borrow_mut().total_work = Some(total_work);
    }

    fn set_title(&mut self, title: &str) {
        self.log.borrow_mut().titles.push(title.to_string());
    }

    fn set_worked(&mut self, worked: f64, title: Option<&str>) {
        let mut log = self.log.borrow_mut();
        log.worked.push(worked);
        if let Some(title) = title {
            log.titles.push(title.to_string());
        }
    }

    fn worked(&mut self, amount: f64) {
        let current = self.last_worked().unwrap_or(0.0);
        self.set_worked(current + amount, None);

        let mut log = self.log.borrow_mut();
        log.ticks += 1;
        if log.cancel_after.is_some_and(|limit| log.ticks >= limit) {
            self.cancel.cancel();
        }
    }

    fn done(&mut self) {
        self.log.borrow_mut().done_calls += 1;
    }

    fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }
}

/// A temporary directory of input documents.
///
/// Cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
