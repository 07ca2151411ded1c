//! Document interchange: JSON files and markup-style attribute strings.
//!
//! Phone and boundary attributes keep their markup spelling on the wire
//! (`d`, `end`, `duration` as numeric strings, `breakindex` as raw text,
//! `f0` as a parenthesised pair list). Parsing happens here so the numerical
//! core only ever sees typed values.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ContourError;
use crate::types::{Document, F0Target};

/// Parse an `f0` attribute such as `(0,120)(50,135)(100,110)`.
///
/// An empty or whitespace-only attribute yields no targets.
pub fn parse_f0_targets(attr: &str) -> Result<Vec<F0Target>, ContourError> {
    let invalid = || ContourError::invalid_attribute("f0", attr);
    let mut targets = Vec::new();
    let mut rest = attr.trim();

    while !rest.is_empty() {
        let body = rest.strip_prefix('(').ok_or_else(invalid)?;
        let close = body.find(')').ok_or_else(invalid)?;
        let (percent, hz) = body[..close].split_once(',').ok_or_else(invalid)?;

        let percent: u32 = percent.trim().parse().map_err(|_| invalid())?;
        let hz: f64 = hz.trim().parse().map_err(|_| invalid())?;
        if percent > 100 || !hz.is_finite() {
            return Err(invalid());
        }

        targets.push(F0Target { percent, hz });
        rest = body[close + 1..].trim_start();
    }

    Ok(targets)
}

/// Format targets back into the `f0` attribute form, truncating Hz to integers.
pub fn format_f0_targets(targets: &[F0Target]) -> String {
    targets
        .iter()
        .map(|t| format!("({},{})", t.percent, t.hz as i64))
        .collect()
}

/// Serde adapter for `Option<T>` attributes written as strings.
///
/// Numbers are accepted on input; an empty string counts as absent.
pub mod attr_string {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = match Option::<Raw>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(Raw::Text(s)) => s,
            Some(Raw::Number(n)) => n.to_string(),
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        text.parse::<T>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid attribute value {:?}: {}", text, e)))
    }
}

/// Serde adapter for the `f0` attribute string.
pub mod f0_attr {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::F0Target;

    pub fn serialize<S: Serializer>(targets: &[F0Target], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_f0_targets(targets))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<F0Target>, D::Error> {
        let attr = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        super::parse_f0_targets(&attr).map_err(D::Error::custom)
    }
}

/// Parse a document from its JSON interchange form.
pub fn document_from_json(json: &str) -> Result<Document> {
    serde_json::from_str(json).context("Failed to parse document JSON")
}

/// Serialize a document to pretty-printed JSON.
pub fn document_to_json(doc: &Document) -> Result<String> {
    serde_json::to_string_pretty(doc).context("Failed to serialize document")
}

pub fn read_document(path: &Path) -> Result<Document> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    document_from_json(&data).with_context(|| format!("Invalid document: {}", path.display()))
}

pub fn write_document(path: &Path, doc: &Document) -> Result<()> {
    let json = document_to_json(doc)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write document: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Boundary, Phone, Segment};

    #[test]
    fn test_parse_f0_targets_basic() {
        let targets = parse_f0_targets("(0,120)(50,135)(100,110)").unwrap();
        assert_eq!(
            targets,
            vec![
                F0Target::new(0, 120.0),
                F0Target::new(50, 135.0),
                F0Target::new(100, 110.0),
            ]
        );
    }

    #[test]
    fn test_parse_f0_targets_whitespace() {
        let targets = parse_f0_targets(" ( 10 , 200 ) (90,180) ").unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0], F0Target::new(10, 200.0));
    }

    #[test]
    fn test_parse_f0_targets_empty() {
        assert!(parse_f0_targets("").unwrap().is_empty());
        assert!(parse_f0_targets("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_f0_targets_malformed() {
        for bad in ["(0,120", "0,120)", "(0;120)", "(abc,120)", "(150,120)", "(0,120)x"] {
            let err = parse_f0_targets(bad).unwrap_err();
            assert!(
                matches!(err, ContourError::InvalidAttribute { attribute: "f0", .. }),
                "expected error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_format_f0_targets_truncates() {
        let targets = vec![F0Target::new(0, 120.9), F0Target::new(100, 99.2)];
        assert_eq!(format_f0_targets(&targets), "(0,120)(100,99)");
        assert_eq!(format_f0_targets(&[]), "");
    }

    #[test]
    fn test_phone_json_uses_markup_attributes() {
        let phone = Segment::Phone(Phone {
            symbol: "AH".into(),
            duration_ms: Some(108.7),
            end_sec: Some(0.1087),
            f0: vec![F0Target::new(0, 120.0), F0Target::new(100, 110.0)],
        });
        let json = serde_json::to_value(&phone).unwrap();
        assert_eq!(json["kind"], "phone");
        assert_eq!(json["p"], "AH");
        assert_eq!(json["d"], "108.7");
        assert_eq!(json["end"], "0.1087");
        assert_eq!(json["f0"], "(0,120)(100,110)");
    }

    #[test]
    fn test_phone_json_accepts_numbers_and_strings() {
        let json = r#"{"kind":"phone","p":"S","d":85,"end":"0.25","f0":"(50,140)"}"#;
        let seg: Segment = serde_json::from_str(json).unwrap();
        let phone = seg.as_phone().unwrap();
        assert_eq!(phone.duration_ms, Some(85.0));
        assert_eq!(phone.end_sec, Some(0.25));
        assert_eq!(phone.f0, vec![F0Target::new(50, 140.0)]);
    }

    #[test]
    fn test_missing_and_empty_attributes_are_none() {
        let json = r#"{"kind":"phone","p":"T","d":"","f0":""}"#;
        let seg: Segment = serde_json::from_str(json).unwrap();
        let phone = seg.as_phone().unwrap();
        assert!(phone.duration_ms.is_none());
        assert!(phone.end_sec.is_none());
        assert!(phone.f0.is_empty());

        let out = serde_json::to_value(&seg).unwrap();
        assert!(out.get("d").is_none());
        assert!(out.get("f0").is_none());
    }

    #[test]
    fn test_boundary_json() {
        let json = r#"{"kind":"boundary","breakindex":"6"}"#;
        let seg: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(
            seg,
            Segment::Boundary(Boundary {
                breakindex: Some("6".into()),
                duration_ms: None,
            })
        );
    }

    #[test]
    fn test_boundary_keeps_raw_break_index() {
        let seg: Segment = serde_json::from_str(r#"{"kind":"boundary","breakindex":"x"}"#).unwrap();
        assert_eq!(seg, Segment::Boundary(Boundary::new(Some("x"))));
        let seg: Segment = serde_json::from_str(r#"{"kind":"boundary","breakindex":" "}"#).unwrap();
        assert_eq!(seg, Segment::Boundary(Boundary::new(None)));
    }

    #[test]
    fn test_invalid_numeric_attribute_rejected() {
        let json = r#"{"kind":"phone","p":"T","d":"fast"}"#;
        assert!(serde_json::from_str::<Segment>(json).is_err());
    }

    #[test]
    fn test_document_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let json = r#"{"sentences":[{"phrases":[{"tokens":[
            {"text":"hi","pos":"UH","segments":[{"kind":"phone","p":"HH","d":"60","f0":"(0,130)"}]}
        ]}]}]}"#;
        let doc = document_from_json(json).unwrap();
        write_document(&path, &doc).unwrap();
        let back = read_document(&path).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_read_document_missing_file() {
        assert!(read_document(Path::new("/nonexistent/doc.json")).is_err());
    }
}
