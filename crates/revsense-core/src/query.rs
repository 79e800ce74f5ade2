use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("business name must not be empty")]
    EmptyName,
}

/// A free-text request to analyze one business.
///
/// The name is trimmed and must be non-empty; a blank location hint is
/// normalized to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessQuery {
    name: String,
    location_hint: Option<String>,
}

impl BusinessQuery {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if `name` is empty or whitespace.
    pub fn new(name: &str, location_hint: Option<&str>) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let location_hint = location_hint
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);
        Ok(Self {
            name: name.to_owned(),
            location_hint,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn location_hint(&self) -> Option<&str> {
        self.location_hint.as_deref()
    }

    /// The text sent to the search provider: the name, followed by the
    /// location hint when present.
    #[must_use]
    pub fn search_text(&self) -> String {
        match &self.location_hint {
            Some(hint) => format!("{} {hint}", self.name),
            None => self.name.clone(),
        }
    }
}
