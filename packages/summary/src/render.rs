//! Writing the LaTeX source and compiling it to PDF.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::error::Result;
use crate::latex::Document;

/// Default LaTeX build driver.
pub const LATEX_COMPILER: &str = "latexmk";

/// File produced by a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Compiled PDF.
    Pdf(PathBuf),
    /// LaTeX source, either requested or left behind by a failed compile.
    Tex(PathBuf),
}

impl Artifact {
    pub fn path(&self) -> &Path {
        match self {
            Self::Pdf(path) | Self::Tex(path) => path,
        }
    }
}

/// Renders documents to `<stem>.tex` and, optionally, `<stem>.pdf`.
#[derive(Debug, Clone)]
pub struct Renderer {
    stem: PathBuf,
    compile: bool,
    compiler: String,
}

impl Renderer {
    /// Create a renderer writing to the config's output stem.
    ///
    /// With `compile` false only the LaTeX source is written.
    pub fn new(config: &Config, compile: bool) -> Self {
        Self {
            stem: config.output_stem(),
            compile,
            compiler: LATEX_COMPILER.to_string(),
        }
    }

    /// Use a different latexmk-compatible program.
    #[must_use]
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Serialize `document` and compile it when enabled.
    ///
    /// A failed compile is not an error: the source is kept and returned.
    pub fn render(&self, document: &Document) -> Result<Artifact> {
        let mut tex_path = self.stem.clone().into_os_string();
        tex_path.push(".tex");
        let tex_path = PathBuf::from(tex_path);
        write_atomic(&tex_path, &document.dumps())?;
        tracing::info!(path = %tex_path.display(), "wrote LaTeX source");

        if !self.compile {
            return Ok(Artifact::Tex(tex_path));
        }

        match self.compile_pdf(&tex_path) {
            Ok(pdf_path) => Ok(Artifact::Pdf(pdf_path)),
            Err(message) => {
                tracing::warn!(path = %tex_path.display(), %message, "PDF compilation failed, keeping LaTeX source");
                Ok(Artifact::Tex(tex_path))
            }
        }
    }

    /// Run the compiler next to the source, then clean up intermediates.
    fn compile_pdf(&self, tex_path: &Path) -> std::result::Result<PathBuf, String> {
        let dir = match tex_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = tex_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| format!("no file name in {}", tex_path.display()))?;

        self.run(dir, &["-pdf", "-interaction=nonstopmode", &file_name])?;

        let pdf_path = tex_path.with_extension("pdf");
        if !pdf_path.exists() {
            return Err(format!("{} not produced", pdf_path.display()));
        }

        if let Err(message) = self.run(dir, &["-c", &file_name]) {
            tracing::debug!(%message, "cleanup of intermediate files failed");
        }
        if let Err(e) = fs::remove_file(tex_path) {
            tracing::debug!(error = %e, "could not remove LaTeX source");
        }

        tracing::info!(path = %pdf_path.display(), "compiled PDF");
        Ok(pdf_path)
    }

    fn run(&self, dir: &Path, args: &[&str]) -> std::result::Result<(), String> {
        tracing::debug!(cwd = %dir.display(), compiler = %self.compiler, args = ?args, "running LaTeX compiler");

        let output = Command::new(&self.compiler)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| format!("failed to execute {}: {e}", self.compiler))?;

        if !output.status.success() {
            return Err(format!(
                "{} {} failed with exit code {:?}",
                self.compiler,
                args.join(" "),
                output.status.code()
            ));
        }
        Ok(())
    }
}

/// Write `content` to a temp file beside `path`, then rename it into place.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_path, path)?;
    Ok(())
}
