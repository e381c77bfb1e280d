//! Application view paths and navigation tokens.

use std::fmt;

/// Path of the invoice listing view.
pub const INVOICES_VIEW_PATH: &str = "/dashboard/invoices";
/// Path of the dashboard landing view.
pub const DASHBOARD_VIEW_PATH: &str = "/dashboard";

/// Validation errors returned when constructing a [`ViewPath`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewPathValidationError {
    /// Path does not start with a single `/`.
    #[error("view path must be absolute within the application")]
    NotAbsolute,
    /// Path contains whitespace or control characters.
    #[error("view path must not contain whitespace")]
    ContainsWhitespace,
    /// Path contains a backslash, which browsers read as `/`.
    #[error("view path must not contain backslashes")]
    ContainsBackslash,
}

/// Absolute path of a rendered application view.
///
/// ## Invariants
/// - Starts with exactly one `/`. The second character may not be `/` or
///   `\`, literally or percent-encoded, so redirects stay on this origin.
/// - Contains no backslashes, whitespace or control characters.
///
/// # Examples
/// ```
/// use dashboard::domain::ViewPath;
///
/// assert_eq!(ViewPath::invoices().as_str(), "/dashboard/invoices");
/// assert!(ViewPath::new("https://example.com").is_err());
/// assert!(ViewPath::new("//example.com").is_err());
/// assert!(ViewPath::new("/\\example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewPath(String);

impl ViewPath {
    /// Validate and construct a view path.
    pub fn new(value: impl Into<String>) -> Result<Self, ViewPathValidationError> {
        let raw = value.into();
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(ViewPathValidationError::NotAbsolute);
        };
        if starts_with_separator(rest) {
            return Err(ViewPathValidationError::NotAbsolute);
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ViewPathValidationError::ContainsWhitespace);
        }
        if raw.contains('\\') {
            return Err(ViewPathValidationError::ContainsBackslash);
        }
        Ok(Self(raw))
    }

    /// The invoice listing view.
    pub fn invoices() -> Self {
        Self(INVOICES_VIEW_PATH.to_owned())
    }

    /// The dashboard landing view.
    pub fn dashboard() -> Self {
        Self(DASHBOARD_VIEW_PATH.to_owned())
    }

    /// Borrow the path.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ViewPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ViewPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Whether `rest` opens with `/` or `\`, either literally or as `%2F` / `%5C`.
fn starts_with_separator(rest: &str) -> bool {
    if rest.starts_with(['/', '\\']) {
        return true;
    }
    rest.get(..3).is_some_and(|escape| {
        escape.eq_ignore_ascii_case("%2f") || escape.eq_ignore_ascii_case("%5c")
    })
}

/// Server-driven navigation issued at the end of a successful action.
///
/// Returning a `Redirect` ends the action; inbound adapters turn it into a
/// transport-level redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a redirect only takes effect once returned to the caller"]
pub struct Redirect {
    location: ViewPath,
}

impl Redirect {
    /// Navigate to `location`.
    pub fn to(location: ViewPath) -> Self {
        Self { location }
    }

    /// Target of the navigation.
    pub fn location(&self) -> &ViewPath {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/dashboard/invoices")]
    #[case("/dashboard/invoices/abc/edit")]
    #[case("/")]
    fn accepts_application_paths(#[case] raw: &str) {
        assert_eq!(ViewPath::new(raw).expect("valid").as_str(), raw);
    }

    #[rstest]
    #[case("", ViewPathValidationError::NotAbsolute)]
    #[case("dashboard/invoices", ViewPathValidationError::NotAbsolute)]
    #[case("//evil.example", ViewPathValidationError::NotAbsolute)]
    #[case("https://evil.example", ViewPathValidationError::NotAbsolute)]
    #[case("/\\evil.example", ViewPathValidationError::NotAbsolute)]
    #[case("/%5Cevil.example", ViewPathValidationError::NotAbsolute)]
    #[case("/%5cevil.example", ViewPathValidationError::NotAbsolute)]
    #[case("/%2F%2Fevil.example", ViewPathValidationError::NotAbsolute)]
    #[case("/dashboard\\..\\evil", ViewPathValidationError::ContainsBackslash)]
    #[case("/dash board", ViewPathValidationError::ContainsWhitespace)]
    #[case("/dash\r\nSet-Cookie: x", ViewPathValidationError::ContainsWhitespace)]
    fn rejects_foreign_or_malformed_paths(
        #[case] raw: &str,
        #[case] expected: ViewPathValidationError,
    ) {
        assert_eq!(ViewPath::new(raw), Err(expected));
    }

    #[rstest]
    fn redirect_exposes_location() {
        let redirect = Redirect::to(ViewPath::invoices());
        assert_eq!(redirect.location().as_str(), INVOICES_VIEW_PATH);
    }
}
