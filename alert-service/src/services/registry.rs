use crate::models::RecipientId;
use std::collections::HashMap;

/// Read-only mapping from recipient id to push destination token.
///
/// Populated once at startup from configuration; request handling only ever
/// reads it, so it is shared without locking.
#[derive(Debug, Clone)]
pub struct RecipientRegistry {
    tokens: HashMap<String, String>,
}

impl RecipientRegistry {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    /// Looks up the destination token for a recipient. Entries are keyed by
    /// the id's canonical string form, so numeric and string ids referring
    /// to the same recipient are interchangeable.
    pub fn token_for(&self, id: &RecipientId) -> Option<&str> {
        self.tokens.get(&id.to_string()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RecipientRegistry {
        RecipientRegistry::new(HashMap::from([(
            "12345".to_string(),
            "ExponentPushToken[abc]".to_string(),
        )]))
    }

    #[test]
    fn numeric_and_string_ids_resolve_to_the_same_token() {
        let registry = registry();
        assert_eq!(
            registry.token_for(&RecipientId::Int(12345)),
            Some("ExponentPushToken[abc]")
        );
        assert_eq!(
            registry.token_for(&RecipientId::Str("12345".to_string())),
            Some("ExponentPushToken[abc]")
        );
    }

    #[test]
    fn unknown_ids_miss() {
        assert_eq!(registry().token_for(&RecipientId::Int(99999)), None);
    }
}
