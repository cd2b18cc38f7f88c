//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};

use super::message::{DiagnosticMessage, Severity};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d [DiagnosticMessage],
    source: &'d str,
    path: Option<&'d str>,
    colored: bool,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub(super) fn new(diagnostics: &'d [DiagnosticMessage], source: &'d str) -> Self {
        Self {
            diagnostics,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'d str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.diagnostics.is_empty() {
            return Ok(());
        }

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let range = adjust_range(diag.span.start, diag.span.end, self.source.len());

            let mut snippet = Snippet::source(self.source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(range.clone())
                    .label(&diag.message),
            );

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            for related in &diag.related {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(
                            related.span.start,
                            related.span.end,
                            self.source.len(),
                        ))
                        .label(&related.message),
                );
            }

            let level = severity_to_level(diag.severity);
            let title_group = level.primary_title(&diag.message).element(snippet);

            let mut report: Vec<Group> = vec![title_group];

            if let Some(fix) = &diag.fix {
                report.push(
                    Level::HELP.secondary_title(&fix.description).element(
                        Snippet::source(self.source)
                            .line_start(1)
                            .patch(Patch::new(range, &fix.replacement)),
                    ),
                );
            }

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(start: u32, end: u32, limit: usize) -> std::ops::Range<usize> {
    let start = start as usize;
    let end = end as usize;
    if start == end {
        return start..(start + 1).min(limit);
    }
    start..end
}
