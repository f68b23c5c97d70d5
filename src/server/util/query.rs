use url::form_urlencoded;

/// Decoded query string, kept in request order.
///
/// Repeated keys are preserved; lookups return the last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decodes a raw `application/x-www-form-urlencoded` query string.
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .map(|query| {
                form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        Self { pairs }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns a copy with `name` replaced by `value`, or removed when `value` is `None`.
    ///
    /// A replaced parameter keeps the position of its first occurrence; a new one is
    /// appended.
    pub fn with(&self, name: &str, value: Option<String>) -> Self {
        let mut pairs = Vec::with_capacity(self.pairs.len() + 1);
        let mut pending = value;
        let mut seen = false;

        for (key, current) in &self.pairs {
            if key != name {
                pairs.push((key.clone(), current.clone()));
                continue;
            }
            if !seen {
                seen = true;
                if let Some(value) = pending.take() {
                    pairs.push((key.clone(), value));
                }
            }
        }

        if let Some(value) = pending {
            pairs.push((name.to_string(), value));
        }

        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
