use super::*;
use crate::Span;

#[test]
fn empty_diagnostics_has_no_errors() {
    let diags = Diagnostics::new();
    assert!(diags.is_empty());
    assert!(!diags.has_errors());
}

#[test]
fn error_increments_error_count_only() {
    let mut diags = Diagnostics::new();
    diags.error("bad thing", Span::new(0, 3)).emit();
    diags.warning("minor thing", Span::new(4, 5)).emit();
    assert_eq!(diags.error_count(), 1);
    assert_eq!(diags.warning_count(), 1);
    assert!(diags.has_errors());
}

#[test]
fn printer_renders_message_text() {
    let mut diags = Diagnostics::new();
    diags.error("unsupported construct", Span::new(0, 4)).emit();
    let rendered = diags.printer("pass").render();
    assert!(rendered.contains("unsupported construct"));
}

#[test]
fn fix_and_related_are_carried_through_display() {
    let mut diags = Diagnostics::new();
    diags
        .error("ambiguous write", Span::new(10, 20))
        .related_to("other branch here", Span::new(30, 40))
        .fix("inject default read", "x = x")
        .emit();
    assert_eq!(diags.len(), 1);
}
