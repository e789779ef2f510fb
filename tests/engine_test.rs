//! Integration tests for the engine trait seams and the built-in engines.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use xmlpipe::error::{Error, Result};
use xmlpipe::{
    Document, FailureKind, MemoryLog, Pipeline, PipelineInputs, SchemaValidator, Transformer,
    ValidationStage,
};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn minimal_inputs(dir: &Path) -> PipelineInputs {
    PipelineInputs::new(
        write(dir, "in.xml", "<doc/>"),
        write(dir, "s1.xml", "<ignored/>"),
        write(dir, "t.xml", "<ignored/>"),
        write(dir, "s2.xml", "<ignored/>"),
        dir.join("out.xml"),
    )
}

/// Validator that counts invocations and fails on request.
struct MockValidator {
    calls: AtomicU32,
    fail_on_call: Option<u32>,
}

impl MockValidator {
    fn passing() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_on_call: None,
        }
    }

    fn failing_on(call: u32) -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_on_call: Some(call),
        }
    }
}

impl SchemaValidator for MockValidator {
    fn validate(&self, _doc: &Document, _schema_def: &Document) -> Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            Err(Error::SchemaViolation(format!("mock failure on call {}", call)))
        } else {
            Ok(())
        }
    }
}

/// Transformer that copies the tree, or fails on request.
struct MockTransformer {
    fail: bool,
    applied: AtomicU32,
}

impl MockTransformer {
    fn passing() -> Self {
        Self {
            fail: false,
            applied: AtomicU32::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            applied: AtomicU32::new(0),
        }
    }
}

impl Transformer for MockTransformer {
    fn apply(&self, doc: &Document, _transform_def: &Document) -> Result<Document> {
        self.applied.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(Error::TransformApply("mock transform failure".to_string()))
        } else {
            Ok(doc.clone())
        }
    }
}

#[test]
fn test_custom_engines_drive_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = minimal_inputs(dir.path());
    let log = MemoryLog::new();
    let validator = MockValidator::passing();
    let transformer = MockTransformer::passing();

    Pipeline::with_engine(&log, &validator, &transformer)
        .run(&inputs)
        .unwrap();

    assert_eq!(validator.calls.load(Ordering::SeqCst), 2);
    assert_eq!(transformer.applied.load(Ordering::SeqCst), 1);
    assert!(inputs.output.exists());
}

#[test]
fn test_input_validation_failure_stops_before_transform() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = minimal_inputs(dir.path());
    let log = MemoryLog::new();
    let validator = MockValidator::failing_on(1);
    let transformer = MockTransformer::passing();

    let err = Pipeline::with_engine(&log, &validator, &transformer)
        .run(&inputs)
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Validation(ValidationStage::Input));
    assert_eq!(transformer.applied.load(Ordering::SeqCst), 0);
    assert!(!inputs.output.exists());
    assert!(log.messages()[0].contains("mock failure on call 1"));
}

#[test]
fn test_transform_failure_stops_before_output_validation() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = minimal_inputs(dir.path());
    let log = MemoryLog::new();
    let validator = MockValidator::passing();
    let transformer = MockTransformer::failing();

    let err = Pipeline::with_engine(&log, &validator, &transformer)
        .run(&inputs)
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transform);
    // One validation call (input), never the second (output)
    assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
    assert!(!inputs.output.exists());
}

#[test]
fn test_output_validation_failure_stops_before_write() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = minimal_inputs(dir.path());
    let log = MemoryLog::new();
    let validator = MockValidator::failing_on(2);
    let transformer = MockTransformer::passing();

    let err = Pipeline::with_engine(&log, &validator, &transformer)
        .run(&inputs)
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Validation(ValidationStage::Output));
    assert!(!inputs.output.exists());
}

#[test]
fn test_builtin_engines_handle_a_realistic_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = PipelineInputs::new(
        write(
            dir.path(),
            "order.xml",
            r#"<order number="7001">
                 <line sku="A-1"><qty>2</qty></line>
                 <line sku="B-9"><qty>1</qty></line>
                 <internal-note>rush this one</internal-note>
               </order>"#,
        ),
        write(
            dir.path(),
            "order.schema.xml",
            r#"<schema root="order">
                 <element name="order">
                   <attribute name="number" required="true"/>
                   <child name="line" min="1" max="unbounded"/>
                   <child name="internal-note" min="0" max="1"/>
                 </element>
                 <element name="line">
                   <attribute name="sku" required="true"/>
                   <child name="qty"/>
                 </element>
                 <element name="qty"><text pattern="[0-9]+"/></element>
                 <element name="internal-note"/>
               </schema>"#,
        ),
        write(
            dir.path(),
            "order-to-shipment.xml",
            r#"<transform>
                 <rule match="order"><rename to="shipment"/></rule>
                 <rule match="line"><rename to="parcel"/><set-attribute name="carrier" value="ups"/></rule>
                 <rule match="internal-note"><drop/></rule>
               </transform>"#,
        ),
        write(
            dir.path(),
            "shipment.schema.xml",
            r#"<schema root="shipment">
                 <element name="shipment">
                   <attribute name="number" required="true"/>
                   <child name="parcel" min="1" max="unbounded"/>
                 </element>
                 <element name="parcel">
                   <attribute name="sku" required="true"/>
                   <attribute name="carrier" required="true"/>
                   <child name="qty"/>
                 </element>
                 <element name="qty"><text pattern="[0-9]+"/></element>
               </schema>"#,
        ),
        dir.path().join("shipment.xml"),
    );
    let log = MemoryLog::new();

    Pipeline::new(&log).run(&inputs).unwrap();

    let output = fs::read_to_string(&inputs.output).unwrap();
    assert!(output.starts_with("<shipment number=\"7001\">"));
    assert!(output.contains("carrier=\"ups\""));
    assert!(!output.contains("internal-note"));
}
