// Verdict types — the vocabulary every moderation decision is expressed in.
//
// These are kept separate from the engines so that the web layer, the CLI,
// and the audit log can all talk about outcomes without pulling in any
// engine machinery. A `Verdict` carries only its reasons; safety is derived,
// so a verdict can never claim to be safe while holding a rejection reason.

use thiserror::Error;

pub mod image;
pub mod text;
pub mod video;

/// The closed set of content types the pipeline knows how to moderate.
///
/// Unknown types only exist at the string boundary (an HTTP form field or a
/// CLI flag); once parsing succeeds, every downstream match is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Image,
    Video,
}

impl ContentKind {
    /// Parse the wire tag used by uploads. Returns `None` for anything
    /// outside the supported set.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of moderating one piece of content.
///
/// Reasons keep the order the checks produced them in, including duplicates;
/// an empty list means the content is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    reasons: Vec<String>,
}

impl Verdict {
    /// A verdict with no objections.
    pub fn safe() -> Self {
        Self { reasons: Vec::new() }
    }

    /// Build a verdict from accumulated reasons. An empty list is safe.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self { reasons }
    }

    /// A verdict rejected for a single reason, used when a processing
    /// failure stands in for the checks that could not run.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
        }
    }

    pub fn is_safe(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Consume the verdict, yielding its reasons for aggregation.
    pub fn into_reasons(self) -> Vec<String> {
        self.reasons
    }

    /// The action string recorded in the audit log and returned to clients:
    /// `Approved`, or `Rejected: <reasons joined by ", ">`.
    pub fn action(&self) -> String {
        if self.reasons.is_empty() {
            "Approved".to_string()
        } else {
            format!("Rejected: {}", self.reasons.join(", "))
        }
    }
}

/// A failure in an upstream collaborator that prevented a verdict from
/// being produced at all.
///
/// This is distinct from content-local processing failures (an unreadable
/// image, an undecodable frame), which the engines fold into a rejected
/// verdict instead of surfacing here.
#[derive(Debug, Error)]
pub enum ModerationFault {
    /// The toxicity classifier could not produce signals.
    #[error("classifier failure: {0}")]
    Classifier(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parse_rejects_unknown_tags() {
        assert_eq!(ContentKind::parse("text"), Some(ContentKind::Text));
        assert_eq!(ContentKind::parse("image"), Some(ContentKind::Image));
        assert_eq!(ContentKind::parse("video"), Some(ContentKind::Video));
        assert_eq!(ContentKind::parse("audio"), None);
        assert_eq!(ContentKind::parse("Text"), None);
        assert_eq!(ContentKind::parse(""), None);
    }

    #[test]
    fn action_string_joins_reasons_in_order() {
        assert_eq!(Verdict::safe().action(), "Approved");
        let verdict = Verdict::from_reasons(vec!["first".into(), "second".into()]);
        assert_eq!(verdict.action(), "Rejected: first, second");
    }

    #[test]
    fn safety_is_derived_from_reasons() {
        assert!(Verdict::from_reasons(Vec::new()).is_safe());
        assert!(!Verdict::rejected("bad").is_safe());
    }
}
