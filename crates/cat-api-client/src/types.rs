use serde::{Deserialize, Serialize};

/// A cat fact. `length` is always the character count of `fact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub fact: String,
    pub length: usize,
}

impl Fact {
    pub fn new(fact: impl Into<String>) -> Self {
        let fact = fact.into();
        let length = fact.chars().count();
        Self { fact, length }
    }
}

/// A cat image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// Body of the fact endpoint. The reported `length` is ignored in favour of
/// recounting the text.
#[derive(Debug, Deserialize)]
pub(crate) struct FactResponse {
    pub fact: String,
}

/// One element of the image search result list
#[derive(Debug, Deserialize)]
pub(crate) struct ImageSearchItem {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_length_counts_characters() {
        let fact = Fact::new("Cats sleep 12–16 hours");
        assert_eq!(fact.length, 22);
        assert_ne!(fact.length, fact.fact.len());
    }

    #[test]
    fn test_fact_response_ignores_extra_fields() {
        let body = r#"{"fact":"Cats purr.","length":999,"source":"x"}"#;
        let parsed: FactResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.fact, "Cats purr.");
    }

    #[test]
    fn test_image_search_item_deserialization() {
        let body = r#"[{"id":"a1","url":"https://cdn.example/cat.jpg","width":500,"height":400}]"#;
        let items: Vec<ImageSearchItem> = serde_json::from_str(body).unwrap();
        assert_eq!(items[0].url, "https://cdn.example/cat.jpg");
    }
}
