//! The built-in demo tools: add and list_files.

use async_trait::async_trait;
use registry::{Arguments, ParamSpec, ParamType, Tool, ToolError, ToolSpec};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;

/// `add(a, b)` — integer addition.
pub struct AddTool {
    spec: ToolSpec,
}

impl AddTool {
    pub fn new() -> Self {
        Self {
            spec: ToolSpec::new("add", "Add two numbers", ParamType::Integer)
                .param(ParamSpec::required("a", ParamType::Integer, "First addend"))
                .param(ParamSpec::required("b", ParamType::Integer, "Second addend")),
        }
    }
}

impl Default for AddTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct AddArgs {
    a: i64,
    b: i64,
}

#[async_trait]
impl Tool for AddTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn call(&self, args: Arguments) -> Result<Value, ToolError> {
        let AddArgs { a, b } = args.parse()?;
        let sum = a
            .checked_add(b)
            .ok_or_else(|| ToolError::Execution(format!("integer overflow: {a} + {b}")))?;
        Ok(json!(sum))
    }
}

/// `list_files(path = ".")` — names of files and folders in a directory,
/// resolved against a configured root.
pub struct ListFilesTool {
    spec: ToolSpec,
    root: PathBuf,
}

impl ListFilesTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            spec: ToolSpec::new(
                "list_files",
                "List files and folders in the given path",
                ParamType::Array,
            )
            .param(
                ParamSpec::optional("path", ParamType::String, "Directory to list")
                    .with_default(json!(".")),
            ),
            root: root.into(),
        }
    }
}

#[derive(Deserialize)]
struct ListFilesArgs {
    path: String,
}

#[async_trait]
impl Tool for ListFilesTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn call(&self, args: Arguments) -> Result<Value, ToolError> {
        let ListFilesArgs { path } = args.parse()?;
        let dir = self.root.join(&path);

        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| ToolError::Execution(format!("{}: {e}", dir.display())))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ToolError::Execution(format!("{}: {e}", dir.display())))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        Ok(json!(names))
    }
}
