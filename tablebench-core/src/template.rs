//! Template Loading and Rendering
//!
//! The template engine is minijinja. A template document defines its
//! sub-templates as macros; rendering a sub-template means importing the
//! document from a small entry template, picking the macro by name and
//! calling it with the record sequence.
//!
//! ```text
//! {% macro table(items) %}
//!   {% for item in items %}<tr><td>{{ item.id }}</td></tr>{% endfor %}
//! {% endmacro %}
//! ```

use crate::data::Record;
use minijinja::{Environment, ErrorKind, Value, context};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Template could not be acquired; fatal for a session
#[derive(Debug, Error)]
pub enum TemplateLoadError {
    /// Template file is missing or unreadable
    #[error("open {}: {source}", path.display())]
    Read {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// Template source is blank
    #[error("template: {name}: empty template")]
    Empty {
        /// Template name (file name for file-backed templates)
        name: String,
    },
    /// Template source failed to compile
    #[error("template: {name}: {source}")]
    Parse {
        /// Template name (file name for file-backed templates)
        name: String,
        /// Engine syntax error
        source: minijinja::Error,
    },
}

/// Failure of a single render call
#[derive(Debug, Error)]
pub enum RenderError {
    /// The document does not define the requested sub-template
    #[error("no sub-template named {0:?}")]
    MissingSubTemplate(String),
    /// Engine error while evaluating or rendering
    #[error("render error: {0}")]
    Engine(#[from] minijinja::Error),
    /// Output sink rejected the rendered bytes
    #[error("sink error: {0}")]
    Io(#[from] io::Error),
}

/// Anything that can render a named sub-template over the record sequence.
///
/// Implementations write their output to `sink`; the benchmark loop never
/// inspects it.
pub trait Render {
    /// Render `sub_template` with `items` into `sink`
    fn render_to(
        &self,
        sub_template: &str,
        items: &[Record],
        sink: &mut dyn Write,
    ) -> Result<(), RenderError>;
}

// Entry templates import the document and pick a macro by name. Their names
// end with the document name so both get the same auto-escaping.
const RENDER_PREFIX: &str = "tablebench-render:";
const RENDER_SOURCE: &str = "{% import source as doc %}{% set table = doc[name] %}\
    {% if table is defined %}{{ table(items) }}{% else %}{{ missing_sub_template(name) }}{% endif %}";

const CHECK_PREFIX: &str = "tablebench-check:";
const CHECK_SOURCE: &str = "{% import source as doc %}{{ doc[name] is defined }}";

fn missing_sub_template(name: String) -> Result<String, minijinja::Error> {
    Err(minijinja::Error::new(
        ErrorKind::InvalidOperation,
        format!("no sub-template named {:?}", name),
    ))
}

/// A compiled template document
pub struct TableTemplate {
    env: Environment<'static>,
    name: String,
    render_entry: String,
    check_entry: String,
}

impl std::fmt::Debug for TableTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TableTemplate {
    /// Read and compile the template at `path`.
    ///
    /// The file name becomes the template name, so a `.html` file gets HTML
    /// auto-escaping.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TemplateLoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TemplateLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_source(name, source)
    }

    /// Compile a template from an in-memory source.
    ///
    /// A blank source is rejected: it cannot define any sub-template.
    pub fn from_source(
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, TemplateLoadError> {
        let name = name.into();
        let source = source.into();
        if source.trim().is_empty() {
            return Err(TemplateLoadError::Empty { name });
        }

        let mut env = Environment::new();
        env.add_function("missing_sub_template", missing_sub_template);
        env.add_template_owned(name.clone(), source)
            .map_err(|source| TemplateLoadError::Parse {
                name: name.clone(),
                source,
            })?;

        let render_entry = format!("{}{}", RENDER_PREFIX, name);
        let check_entry = format!("{}{}", CHECK_PREFIX, name);
        for (entry, entry_source) in [(&render_entry, RENDER_SOURCE), (&check_entry, CHECK_SOURCE)] {
            env.add_template_owned(entry.clone(), entry_source)
                .map_err(|source| TemplateLoadError::Parse {
                    name: entry.clone(),
                    source,
                })?;
        }

        tracing::debug!(template = %name, "template compiled");
        Ok(Self {
            env,
            name,
            render_entry,
            check_entry,
        })
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the document defines `sub_template`
    pub fn has_sub_template(&self, sub_template: &str) -> bool {
        self.env
            .get_template(&self.check_entry)
            .and_then(|t| t.render(context! { source => &self.name, name => sub_template }))
            .map(|defined| defined == "true")
            .unwrap_or(false)
    }
}

impl Render for TableTemplate {
    fn render_to(
        &self,
        sub_template: &str,
        items: &[Record],
        sink: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let entry = self.env.get_template(&self.render_entry)?;
        let ctx = context! {
            source => &self.name,
            name => sub_template,
            items => Value::from_serialize(items),
        };
        match entry.render_to_write(ctx, &mut *sink) {
            Ok(_) => Ok(()),
            Err(_) if !self.has_sub_template(sub_template) => {
                Err(RenderError::MissingSubTemplate(sub_template.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
