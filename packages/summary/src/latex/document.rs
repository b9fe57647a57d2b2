//! Typed LaTeX document tree.
//!
//! A [`Document`] is assembled from [`Element`]s and serialized exactly
//! once with [`Document::dumps`]. Plain text is escaped at serialization
//! time; command arguments and raw elements are emitted verbatim, so
//! callers escape any user data they put there.

use std::fmt::Write as _;

use super::text::escape;

/// Sectioning depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLevel {
    Chapter,
    Section,
    Subsection,
}

impl SectionLevel {
    fn command(self) -> &'static str {
        match self {
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::Subsection => "subsection",
        }
    }
}

/// A LaTeX command: `\name[options]{arg1}{arg2}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub options: Vec<String>,
    pub arguments: Vec<String>,
}

impl Command {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Append a raw argument.
    #[must_use]
    pub fn arg(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Append a raw option.
    #[must_use]
    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    fn write(&self, out: &mut String) {
        out.push('\\');
        out.push_str(&self.name);
        if !self.options.is_empty() {
            let _ = write!(out, "[{}]", self.options.join(","));
        }
        for argument in &self.arguments {
            let _ = write!(out, "{{{argument}}}");
        }
    }
}

/// A node of the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Plain text, escaped on output.
    Text(String),
    /// Markup emitted verbatim.
    Raw(String),
    Command(Command),
    /// Chapter, section or subsection with its content.
    Section {
        level: SectionLevel,
        title: String,
        content: Vec<Element>,
    },
    /// `\begin{name}[options] ... \end{name}`.
    Environment {
        name: String,
        options: Vec<String>,
        arguments: Vec<String>,
        content: Vec<Element>,
    },
    /// Bulleted list; each item is a sequence of elements.
    Itemize(Vec<Vec<Element>>),
    /// Table with a column spec such as `l l`.
    Tabular { spec: String, rows: Vec<Vec<Element>> },
    /// Floating figure with an optional caption.
    Figure {
        position: String,
        content: Vec<Element>,
        caption: Option<String>,
    },
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        Self::Raw(markup.into())
    }

    pub fn chapter(title: impl Into<String>, content: Vec<Element>) -> Self {
        Self::section_at(SectionLevel::Chapter, title, content)
    }

    pub fn section(title: impl Into<String>, content: Vec<Element>) -> Self {
        Self::section_at(SectionLevel::Section, title, content)
    }

    pub fn subsection(title: impl Into<String>, content: Vec<Element>) -> Self {
        Self::section_at(SectionLevel::Subsection, title, content)
    }

    fn section_at(level: SectionLevel, title: impl Into<String>, content: Vec<Element>) -> Self {
        Self::Section {
            level,
            title: title.into(),
            content,
        }
    }

    /// Bold text, escaped.
    pub fn bold(text: &str) -> Self {
        Self::Command(Command::new("textbf").arg(escape(text)))
    }

    /// Colored text, escaped.
    pub fn colored(color: &str, text: &str) -> Self {
        Self::Command(Command::new("textcolor").arg(color).arg(escape(text)))
    }

    fn write(&self, out: &mut String) {
        match self {
            Self::Text(text) => {
                out.push_str(&escape(text));
                out.push('\n');
            }
            Self::Raw(markup) => {
                out.push_str(markup);
                out.push('\n');
            }
            Self::Command(command) => {
                command.write(out);
                out.push('\n');
            }
            Self::Section {
                level,
                title,
                content,
            } => {
                let _ = writeln!(out, "\\{}{{{}}}", level.command(), escape(title));
                write_all(content, out);
            }
            Self::Environment {
                name,
                options,
                arguments,
                content,
            } => {
                let _ = write!(out, "\\begin{{{name}}}");
                if !options.is_empty() {
                    let _ = write!(out, "[{}]", options.join(","));
                }
                for argument in arguments {
                    let _ = write!(out, "{{{argument}}}");
                }
                out.push('\n');
                write_all(content, out);
                let _ = writeln!(out, "\\end{{{name}}}");
            }
            Self::Itemize(items) => {
                out.push_str("\\begin{itemize}\n");
                for item in items {
                    out.push_str("\\item ");
                    write_inline(item, out);
                    out.push('\n');
                }
                out.push_str("\\end{itemize}\n");
            }
            Self::Tabular { spec, rows } => {
                let _ = writeln!(out, "\\begin{{tabular}}{{{spec}}}");
                for row in rows {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|cell| {
                            let mut buf = String::new();
                            write_inline(std::slice::from_ref(cell), &mut buf);
                            buf
                        })
                        .collect();
                    let _ = writeln!(out, "{}\\\\", cells.join(" & "));
                }
                out.push_str("\\end{tabular}\n");
            }
            Self::Figure {
                position,
                content,
                caption,
            } => {
                let _ = writeln!(out, "\\begin{{figure}}[{position}]");
                out.push_str("\\centering\n");
                write_all(content, out);
                if let Some(caption) = caption {
                    let _ = writeln!(out, "\\caption{{{}}}", escape(caption));
                }
                out.push_str("\\end{figure}\n");
            }
        }
    }
}

fn write_all(elements: &[Element], out: &mut String) {
    for element in elements {
        element.write(out);
    }
}

/// Write elements on one line, separated by spaces.
fn write_inline(elements: &[Element], out: &mut String) {
    let mut buf = String::new();
    write_all(elements, &mut buf);
    let line = buf.lines().collect::<Vec<_>>().join(" ");
    out.push_str(line.trim_end());
}

/// A package import with options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub options: Vec<String>,
}

impl Package {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }
}

/// A complete LaTeX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub class: String,
    pub class_options: Vec<String>,
    pub packages: Vec<Package>,
    /// Commands placed after the packages, before `\begin{document}`.
    pub preamble: Vec<Element>,
    pub body: Vec<Element>,
}

impl Document {
    /// Create an empty document of the given class.
    #[must_use]
    pub fn new(class: impl Into<String>, class_options: &[&str]) -> Self {
        Self {
            class: class.into(),
            class_options: class_options.iter().map(|s| (*s).to_string()).collect(),
            packages: Vec::new(),
            preamble: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Serialize the document to LaTeX source.
    #[must_use]
    pub fn dumps(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "\\documentclass");
        if !self.class_options.is_empty() {
            let _ = write!(out, "[{}]", self.class_options.join(","));
        }
        let _ = writeln!(out, "{{{}}}", self.class);

        for package in &self.packages {
            let command = package
                .options
                .iter()
                .fold(Command::new("usepackage"), |c, o| c.option(o.clone()))
                .arg(package.name.clone());
            command.write(&mut out);
            out.push('\n');
        }
        out.push('\n');

        write_all(&self.preamble, &mut out);
        out.push_str("\n\\begin{document}\n");
        write_all(&self.body, &mut out);
        out.push_str("\\end{document}\n");
        out
    }
}
