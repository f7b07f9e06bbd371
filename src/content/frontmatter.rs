//! Front-matter parsing and schema validation

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::error::ContentError;

/// Field type expected by the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A non-empty string value
    Str,
}

/// A single required front-matter field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// The article schema: every field listed here must be present and
/// well-typed, or the document fails validation.
pub const ARTICLE_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        kind: FieldKind::Str,
    },
    FieldSpec {
        name: "publishedAt",
        kind: FieldKind::Str,
    },
    FieldSpec {
        name: "summary",
        kind: FieldKind::Str,
    },
];

/// Front-matter data from an article file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub summary: String,

    /// Additional custom fields
    #[serde(flatten, default)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse and validate front-matter from a content file.
    /// Returns `(front_matter, body)`.
    ///
    /// The metadata block must be YAML delimited by `---` lines at the
    /// top of the file. Validation is fail-fast: any schema violation is
    /// an error naming `path`.
    pub fn parse<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str), ContentError> {
        let content = content.trim_start();

        let rest = content
            .strip_prefix("---")
            .ok_or_else(|| ContentError::MissingFrontMatter {
                path: path.to_path_buf(),
            })?;
        let rest = rest.trim_start_matches(['\n', '\r']);

        let end_pos = rest
            .find("\n---")
            .ok_or_else(|| ContentError::MissingFrontMatter {
                path: path.to_path_buf(),
            })?;
        let yaml_content = &rest[..end_pos];
        let body = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        let mapping: serde_yaml::Mapping = serde_yaml::from_str(yaml_content).map_err(|e| {
            ContentError::InvalidFrontMatter {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        validate_schema(&mapping, ARTICLE_SCHEMA, path)?;

        let fm: FrontMatter = serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
            .map_err(|e| ContentError::InvalidFrontMatter {
                path: path.to_path_buf(),
                source: e,
            })?;

        // A date we cannot order by is as fatal as a missing one
        if fm.parse_published_at().is_none() {
            return Err(ContentError::MalformedDate {
                path: path.to_path_buf(),
                value: fm.published_at.clone(),
            });
        }

        Ok((fm, body))
    }

    /// Parse the `publishedAt` string into a comparable timestamp
    pub fn parse_published_at(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.published_at)
    }
}

/// Evaluate the declarative schema against a parsed metadata mapping
fn validate_schema(
    mapping: &serde_yaml::Mapping,
    schema: &[FieldSpec],
    path: &Path,
) -> Result<(), ContentError> {
    for field in schema {
        let value = mapping
            .get(field.name)
            .ok_or_else(|| ContentError::MissingField {
                path: path.to_path_buf(),
                field: field.name,
            })?;

        match field.kind {
            FieldKind::Str => match value.as_str() {
                Some(s) if !s.trim().is_empty() => {}
                _ => {
                    return Err(ContentError::InvalidField {
                        path: path.to_path_buf(),
                        field: field.name,
                    })
                }
            },
        }
    }

    Ok(())
}

/// Parse a date string in the formats articles actually use
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y"];

    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 timestamps get their offset discarded; ordering within a
    // single site's articles does not need timezone math
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("content/hello-world.mdx")
    }

    #[test]
    fn test_parse_valid_frontmatter() {
        let content = r#"---
title: Hello World
publishedAt: "2024-01-15"
summary: My first article
---

This is the body.
"#;

        let (fm, body) = FrontMatter::parse(content, &path()).unwrap();
        assert_eq!(fm.title, "Hello World");
        assert_eq!(fm.published_at, "2024-01-15");
        assert_eq!(fm.summary, "My first article");
        assert!(body.contains("This is the body."));
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let content = r#"---
publishedAt: "2024-01-15"
summary: No title here
---
Body.
"#;

        let err = FrontMatter::parse(content, &path()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField { field: "title", .. }
        ));
    }

    #[test]
    fn test_missing_published_at_is_fatal() {
        let content = r#"---
title: A Title
summary: No date here
---
Body.
"#;

        let err = FrontMatter::parse(content, &path()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: "publishedAt",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_summary_is_fatal() {
        let content = r#"---
title: A Title
publishedAt: "2024-01-15"
---
Body.
"#;

        let err = FrontMatter::parse(content, &path()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: "summary",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_field_is_fatal() {
        let content = r#"---
title: ""
publishedAt: "2024-01-15"
summary: Something
---
Body.
"#;

        let err = FrontMatter::parse(content, &path()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::InvalidField { field: "title", .. }
        ));
    }

    #[test]
    fn test_wrong_typed_field_is_fatal() {
        let content = r#"---
title: 42
publishedAt: "2024-01-15"
summary: Something
---
Body.
"#;

        let err = FrontMatter::parse(content, &path()).unwrap_err();
        assert!(matches!(
            err,
            ContentError::InvalidField { field: "title", .. }
        ));
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let content = r#"---
title: A Title
publishedAt: "someday"
summary: Something
---
Body.
"#;

        let err = FrontMatter::parse(content, &path()).unwrap_err();
        assert!(matches!(err, ContentError::MalformedDate { .. }));
    }

    #[test]
    fn test_no_frontmatter_block_is_fatal() {
        let content = "Just a markdown body with no metadata.\n";
        let err = FrontMatter::parse(content, &path()).unwrap_err();
        assert!(matches!(err, ContentError::MissingFrontMatter { .. }));
    }

    #[test]
    fn test_extra_fields_are_preserved() {
        let content = r#"---
title: A Title
publishedAt: "2024-01-15"
summary: Something
image: /covers/a.png
---
Body.
"#;

        let (fm, _) = FrontMatter::parse(content, &path()).unwrap();
        assert_eq!(
            fm.extra.get("image").and_then(|v| v.as_str()),
            Some("/covers/a.png")
        );
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date_string("2024-01-15").is_some());
        assert!(parse_date_string("2024/01/15").is_some());
        assert!(parse_date_string("2024-01-15 10:30:00").is_some());
        assert!(parse_date_string("2024-01-15T10:30:00").is_some());
        assert!(parse_date_string("not a date").is_none());
    }
}
