//! Core diagnostic type.
//!
//! Everything the toolchain reports stops the run, so there is no severity:
//! a diagnostic always renders as `error[CODE]: message`.

use std::fmt;

use gismo_ir::Span;

use crate::ErrorCode;

/// A span with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// Primary labels mark the error itself; secondary ones mark related
    /// source such as the opening half of a delimiter pair.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub labels: Vec<Label>,
    /// Rendered as `= note:` lines.
    pub notes: Vec<String>,
    /// Rendered as `= help:` lines.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// A failure of the driver itself: unreadable input, bad flags, an
    /// output file that cannot be created. Never has a location.
    #[cold]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::error(ErrorCode::E9001).with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Primary label if the error has a location. Runtime errors raised
    /// from synthesized forms often do not.
    pub fn with_label_opt(self, span: Option<Span>, message: impl Into<String>) -> Self {
        match span {
            Some(span) => self.with_label(span, message),
            None => self,
        }
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_notes<I>(mut self, notes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.notes.extend(notes.into_iter().map(Into::into));
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// One ``did you mean `x`?`` help line per candidate, best first.
    pub fn with_did_you_mean<I>(mut self, candidates: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.suggestions.extend(
            candidates
                .into_iter()
                .map(|candidate| format!("did you mean `{candidate}`?")),
        );
        self
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    /// `error[E6005]: division by zero`
    pub fn headline(&self) -> String {
        format!("error[{}]: {}", self.code.as_str(), self.message)
    }
}

/// Plain rendering without source snippets. The terminal emitter produces
/// the full form.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.headline())?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { ":::" };
            write!(f, "\n  {marker} {:?}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
