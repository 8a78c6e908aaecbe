use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a snapshot's raw text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceRef {
    File(PathBuf),
    Url(String),
}

impl FromStr for SourceRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(SourceRef::Url(s.to_string()))
        } else {
            Ok(SourceRef::File(PathBuf::from(s)))
        }
    }
}

impl TryFrom<String> for SourceRef {
    type Error = Infallible;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SourceRef> for String {
    fn from(source: SourceRef) -> Self {
        source.to_string()
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRef::File(path) => write!(f, "{}", path.display()),
            SourceRef::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        let source: SourceRef = "https://example.com/Location.txt".parse().unwrap();
        assert_eq!(source, SourceRef::Url("https://example.com/Location.txt".to_string()));

        let source: SourceRef = "http://localhost:8080/a".parse().unwrap();
        assert!(matches!(source, SourceRef::Url(_)));
    }

    #[test]
    fn test_parse_file() {
        let source: SourceRef = " data/Location.txt ".parse().unwrap();
        assert_eq!(source, SourceRef::File(PathBuf::from("data/Location.txt")));
    }

    #[test]
    fn test_display() {
        let source: SourceRef = "/tmp/Location.txt".parse().unwrap();
        assert_eq!(source.to_string(), "/tmp/Location.txt");
    }
}
