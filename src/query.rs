use crate::SearchError;

/// Normalized ingredient terms in the order the user typed them.
///
/// The first term is the primary one and drives the remote lookup. The rest
/// are only used for scoring. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientQuery {
    terms: Vec<String>,
}

impl IngredientQuery {
    /// Parse a comma separated ingredient list.
    ///
    /// Each piece is trimmed and lowercased; empty pieces are dropped.
    /// Duplicate terms are kept as entered.
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let terms: Vec<String> = raw
            .split(',')
            .map(|piece| piece.trim().to_lowercase())
            .filter(|piece| !piece.is_empty())
            .collect();

        if terms.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        Ok(Self { terms })
    }

    pub fn primary(&self) -> &str {
        &self.terms[0]
    }

    pub fn secondary(&self) -> &[String] {
        &self.terms[1..]
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn has_secondary(&self) -> bool {
        self.terms.len() > 1
    }
}
