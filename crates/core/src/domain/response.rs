// Raw Response Domain Model

/// Unparsed result of one external invocation
///
/// `Absent` covers every failure cause (tool missing, nonzero exit, timeout).
/// `Captured` text is already trimmed by the runner and may still be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResponse {
    Captured(String),
    Absent,
}

impl RawResponse {
    /// Build a captured response, trimming surrounding whitespace
    pub fn captured(text: impl AsRef<str>) -> Self {
        RawResponse::Captured(text.as_ref().trim().to_string())
    }

    /// Usable text, if any
    ///
    /// Absent and empty responses both yield `None`; callers never need to
    /// tell them apart.
    pub fn text(&self) -> Option<&str> {
        match self {
            RawResponse::Captured(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RawResponse::Absent)
    }
}
