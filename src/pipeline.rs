//! The four-stage pipeline runner.
//!
//! A run loads its four input resources, validates the input document,
//! transforms it, validates the result, and serializes it to the output
//! path. Control flow is strictly linear with short-circuit-on-failure:
//! any stage failure records a detailed diagnostic and aborts the run
//! without touching the output path.
//!
//! Failures surface as [`PipelineError`], whose display text is
//! deliberately terse ("see the diagnostic log"). The detailed cause is
//! recorded only in the log; callers that need to branch on the failure
//! can match on [`PipelineError::kind`].

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::diag::DiagnosticSink;
use crate::model::Document;
use crate::parser;
use crate::render;
use crate::schema::{RulesetValidator, SchemaValidator};
use crate::transform::{RuleTransformer, Transformer};

/// The five resource paths of one run, in their fixed order.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    /// Path of the document to process.
    pub input: PathBuf,

    /// Path of the schema definition the input is checked against.
    pub input_schema: PathBuf,

    /// Path of the transform definition.
    pub transform: PathBuf,

    /// Path of the schema definition the transformed output is checked against.
    pub output_schema: PathBuf,

    /// Path the serialized output is written to.
    pub output: PathBuf,
}

impl PipelineInputs {
    /// Bundle the five paths of a run.
    pub fn new(
        input: impl Into<PathBuf>,
        input_schema: impl Into<PathBuf>,
        transform: impl Into<PathBuf>,
        output_schema: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            input_schema: input_schema.into(),
            transform: transform.into(),
            output_schema: output_schema.into(),
            output: output.into(),
        }
    }
}

/// Which validation stage a validation failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    /// Validation of the input document.
    Input,

    /// Validation of the transformed document.
    Output,
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStage::Input => f.write_str("input"),
            ValidationStage::Output => f.write_str("output"),
        }
    }
}

/// The stage class a run failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A resource could not be opened or parsed as well-formed XML.
    ResourceLoad,

    /// A document failed schema validation (compile errors included).
    Validation(ValidationStage),

    /// The transform failed to compile or to apply.
    Transform,

    /// The output could not be persisted.
    Write,
}

/// Terse surfaced error for a failed run.
///
/// The message never carries the underlying cause; that detail lives
/// only in the diagnostic log. The failure kind stays available for
/// programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineError {
    kind: FailureKind,
}

impl PipelineError {
    fn new(kind: FailureKind) -> Self {
        Self { kind }
    }

    /// The stage class the run failed in.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("XML processing failed, see the diagnostic log")
    }
}

impl std::error::Error for PipelineError {}

/// The pipeline runner.
///
/// Generic over its validation and transformation engines; defaults to
/// the built-in ruleset engines. The diagnostic sink is injected so
/// callers and tests decide where stage outcomes are recorded.
pub struct Pipeline<'a, V = RulesetValidator, T = RuleTransformer> {
    validator: V,
    transformer: T,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Pipeline<'a> {
    /// Create a runner with the built-in engines.
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            validator: RulesetValidator::new(),
            transformer: RuleTransformer::new(),
            sink,
        }
    }
}

impl<'a, V: SchemaValidator, T: Transformer> Pipeline<'a, V, T> {
    /// Create a runner with custom engines.
    pub fn with_engine(sink: &'a dyn DiagnosticSink, validator: V, transformer: T) -> Self {
        Self {
            validator,
            transformer,
            sink,
        }
    }

    /// Execute one run over the given resources.
    ///
    /// On success the output file holds the rendered transformed
    /// document and four success diagnostics have been appended. On
    /// failure the output path is untouched, exactly one failure
    /// diagnostic has been appended, and the returned error names the
    /// failed stage class.
    pub fn run(&self, inputs: &PipelineInputs) -> Result<(), PipelineError> {
        // Stage 1: load all four input resources
        let input_doc = self.load(&inputs.input)?;
        let input_schema_def = self.load(&inputs.input_schema)?;
        let transform_def = self.load(&inputs.transform)?;
        let output_schema_def = self.load(&inputs.output_schema)?;

        // Stage 2: validate the input document
        match self.validator.validate(&input_doc, &input_schema_def) {
            Ok(()) => self.diag(format!(
                "validation of input document {} against schema {} succeeded",
                inputs.input.display(),
                inputs.input_schema.display()
            )),
            Err(err) => {
                self.diag(format!(
                    "validation of input document {} against schema {} failed: {}",
                    inputs.input.display(),
                    inputs.input_schema.display(),
                    err
                ));
                return Err(PipelineError::new(FailureKind::Validation(
                    ValidationStage::Input,
                )));
            }
        }

        // Stage 3: transform into a new document tree
        let output_doc = match self.transformer.apply(&input_doc, &transform_def) {
            Ok(doc) => {
                self.diag(format!(
                    "transformation of {} by {} succeeded",
                    inputs.input.display(),
                    inputs.transform.display()
                ));
                doc
            }
            Err(err) => {
                self.diag(format!(
                    "transformation of {} by {} failed: {}",
                    inputs.input.display(),
                    inputs.transform.display(),
                    err
                ));
                return Err(PipelineError::new(FailureKind::Transform));
            }
        };
        drop(input_doc);

        // Stage 4: validate the transformed document
        match self.validator.validate(&output_doc, &output_schema_def) {
            Ok(()) => self.diag(format!(
                "validation of transformed document against schema {} succeeded",
                inputs.output_schema.display()
            )),
            Err(err) => {
                self.diag(format!(
                    "validation of transformed document against schema {} failed: {}",
                    inputs.output_schema.display(),
                    err
                ));
                return Err(PipelineError::new(FailureKind::Validation(
                    ValidationStage::Output,
                )));
            }
        }

        // Stage 5: serialize and persist atomically
        let rendered = render::to_xml(&output_doc);
        match write_atomic(&inputs.output, &rendered) {
            Ok(()) => {
                self.diag(format!("wrote output document {}", inputs.output.display()));
                Ok(())
            }
            Err(err) => {
                self.diag(format!(
                    "failed to write output document {}: {}",
                    inputs.output.display(),
                    err
                ));
                Err(PipelineError::new(FailureKind::Write))
            }
        }
    }

    /// Load one resource; failure aborts the run before any later stage.
    fn load(&self, path: &Path) -> Result<Document, PipelineError> {
        log::debug!("loading resource {}", path.display());
        parser::parse_file(path).map_err(|err| {
            self.diag(format!("failed to load resource {}: {}", path.display(), err));
            PipelineError::new(FailureKind::ResourceLoad)
        })
    }

    /// Record a diagnostic. Sink failures do not abort the run.
    fn diag(&self, message: String) {
        if let Err(err) = self.sink.append(&message) {
            log::warn!("diagnostic sink write failed: {}", err);
        }
    }
}

/// Write `content` to `path` via a temp file in the same directory,
/// renamed over the target so the output is never partially visible.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
