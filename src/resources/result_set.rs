use super::Recipient;

/// Outcome of decoding one item of a recipients page.
pub type RecipientResult = Result<Recipient, String>;

/// Per-item outcomes of a recipients page, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    results: Vec<RecipientResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: RecipientResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[RecipientResult] {
        &self.results
    }

    /// Error messages of the items that failed to decode.
    pub fn errors(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(|r| r.as_ref().err().map(String::as_str))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.results.iter().any(Result::is_err)
    }

    /// Successfully decoded recipients.
    pub fn valid_results(&self) -> Vec<&Recipient> {
        self.results.iter().filter_map(|r| r.as_ref().ok()).collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecipientResult> {
        self.results.iter()
    }
}

impl FromIterator<RecipientResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = RecipientResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = RecipientResult;
    type IntoIter = std::vec::IntoIter<RecipientResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a RecipientResult;
    type IntoIter = std::slice::Iter<'a, RecipientResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
