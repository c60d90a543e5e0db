//! User-facing polycalc diagnostics.
//!
//! The diagnostics module demarshalls [libpolycalc diagnostics][libpolycalc::diagnostics] into a
//! form pleasant for a terminal.

use libpolycalc::diagnostics::{AssociatedDiagnostic, Diagnostic, DiagnosticKind};

use annotate_snippets::{
    display_list::{DisplayList, FormatOptions},
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};

/// Maps one line of input to printable text with one character per input byte, so that byte
/// spans index the text directly.
pub fn sanitize_source_for_diagnostics(line: &[u8]) -> String {
    let mut source: String = line
        .iter()
        .map(|&b| {
            if b == b' ' || b.is_ascii_graphic() {
                char::from(b)
            } else {
                '?'
            }
        })
        .collect();
    source.push(' '); // we might emit an end-of-line diagnostic, so add extra space.
    source
}

/// Renders a diagnostic against the line of input it was emitted for.
pub fn emit_line_diagnostic(
    file: Option<&str>,
    line_no: usize,
    source: &str,
    diagnostic: &Diagnostic,
    color: bool,
) -> String {
    let main_annotation_type = convert_diagnostic_kind(&diagnostic.kind);
    let clamp = |(lo, hi): (usize, usize)| {
        let hi = hi.min(source.len()).max(1);
        (lo.min(hi - 1), hi)
    };

    let mut annotations = Vec::with_capacity(diagnostic.associated_diagnostics.len() + 1);
    // The first annotation always points to the input that generated this diagnostic.
    let label = diagnostic.msg.clone().unwrap_or_default();
    annotations.push(SourceAnnotation {
        label: &label,
        annotation_type: main_annotation_type,
        range: clamp(diagnostic.span.into()),
    });
    for associated_diagnostic in diagnostic.associated_diagnostics.iter() {
        annotations.push(SourceAnnotation {
            label: &associated_diagnostic.msg,
            annotation_type: convert_diagnostic_kind(&associated_diagnostic.kind),
            range: clamp(associated_diagnostic.span.into()),
        });
    }
    let footer = diagnostic
        .unspanned_associated_diagnostics
        .iter()
        .map(convert_associated_diagnostic)
        .collect();

    let snippet = Snippet {
        title: Some(Annotation {
            label: Some(&diagnostic.title),
            id: diagnostic.code,
            annotation_type: main_annotation_type,
        }),
        footer,
        slices: vec![Slice {
            source,
            line_start: line_no,
            origin: file,
            fold: false,
            annotations,
        }],
        opt: FormatOptions {
            color,
            ..Default::default()
        },
    };
    format!("{}\n", DisplayList::from(snippet))
}

/// Converts a polycalc AssociatedDiagnostic to an Annotation.
fn convert_associated_diagnostic(diagnostic: &AssociatedDiagnostic) -> Annotation {
    Annotation {
        label: Some(&diagnostic.msg),
        id: None,
        annotation_type: convert_diagnostic_kind(&diagnostic.kind),
    }
}

/// Converts a polycalc DiagnosticKind to an AnnotationType.
fn convert_diagnostic_kind(diagnostic_kind: &DiagnosticKind) -> AnnotationType {
    match diagnostic_kind {
        DiagnosticKind::Error => AnnotationType::Error,
        DiagnosticKind::Note => AnnotationType::Note,
        DiagnosticKind::Help => AnnotationType::Help,
    }
}
