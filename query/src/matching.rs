//! Field selection and match policies for node scans.

use onto_core::Node;
use regex_lite::Regex;

use crate::error::{QueryError, QueryResult};

/// A node field a scan can look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeField {
    Name,
    Description,
    Type,
    /// An entry of the property bag, or a detached node attribute, by name.
    Property(String),
}

impl NodeField {
    /// Resolve a field name. Anything other than the built-in fields names a
    /// property.
    pub fn parse(name: &str) -> Self {
        match name {
            "name" => NodeField::Name,
            "description" => NodeField::Description,
            "type" | "node_type" => NodeField::Type,
            other => NodeField::Property(other.to_string()),
        }
    }

    /// The match policy used when the caller does not pick one: name and
    /// description match case-insensitively as substrings, everything else
    /// matches exactly.
    pub fn default_match(&self, value: &str) -> FieldMatch {
        match self {
            NodeField::Name | NodeField::Description => {
                FieldMatch::ContainsIgnoreCase(value.to_string())
            }
            NodeField::Type | NodeField::Property(_) => FieldMatch::Exact(value.to_string()),
        }
    }

    /// Textual value of this field on a node. Properties render unquoted;
    /// a missing property yields `None`.
    pub fn text_of(&self, node: &Node) -> Option<String> {
        match self {
            NodeField::Name => Some(node.name.clone()),
            NodeField::Description => Some(node.description.clone()),
            NodeField::Type => Some(node.node_type.clone()),
            NodeField::Property(key) => node.property(key).map(|v| v.as_text()),
        }
    }
}

/// How a field's text is compared to the wanted value.
#[derive(Debug, Clone)]
pub enum FieldMatch {
    Exact(String),
    ContainsIgnoreCase(String),
    Pattern(Regex),
}

impl FieldMatch {
    /// Compile a regular expression match.
    pub fn pattern(pattern: &str) -> QueryResult<Self> {
        Regex::new(pattern)
            .map(FieldMatch::Pattern)
            .map_err(|e| QueryError::invalid_pattern(pattern, e.to_string()))
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            FieldMatch::Exact(want) => text == want,
            FieldMatch::ContainsIgnoreCase(want) => {
                text.to_lowercase().contains(&want.to_lowercase())
            }
            FieldMatch::Pattern(re) => re.is_match(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onto_core::GraphId;

    #[test]
    fn test_parse_fields() {
        assert_eq!(NodeField::parse("name"), NodeField::Name);
        assert_eq!(NodeField::parse("type"), NodeField::Type);
        assert_eq!(
            NodeField::parse("layer"),
            NodeField::Property("layer".to_string())
        );
    }

    #[test]
    fn test_default_policies() {
        let name = NodeField::Name.default_match("tcp");
        assert!(name.matches("Reliable TCP stream"));

        let ty = NodeField::Type.default_match("Protocol");
        assert!(ty.matches("Protocol"));
        assert!(!ty.matches("protocol"));
        assert!(!ty.matches("Protocols"));
    }

    #[test]
    fn test_pattern() {
        let m = FieldMatch::pattern("^RFC ?[0-9]+$").unwrap();
        assert!(m.matches("RFC 793"));
        assert!(!m.matches("see RFC 793"));

        assert!(matches!(
            FieldMatch::pattern("(unclosed"),
            Err(QueryError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_property_text_is_unquoted() {
        let node = Node::new(GraphId::new(1), "Protocol", "TCP")
            .with_property("layer", 4i64)
            .with_property("vendor", "IETF");

        assert_eq!(
            NodeField::parse("layer").text_of(&node),
            Some("4".to_string())
        );
        assert_eq!(
            NodeField::parse("vendor").text_of(&node),
            Some("IETF".to_string())
        );
        assert_eq!(NodeField::parse("missing").text_of(&node), None);
    }
}
