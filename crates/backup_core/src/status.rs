use serde::Deserialize;

/// One response from the `getprogress.json` endpoint.
///
/// The presence of `fileName` is the only completion signal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusSnapshot {
    #[serde(rename = "alternativePercentage", default)]
    pub percentage_label: Option<String>,
    #[serde(rename = "fileName", default)]
    pub file_name: Option<String>,
}

impl StatusSnapshot {
    /// Parses a status body. Anything that is not a JSON object is an error.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn label(&self) -> &str {
        self.percentage_label.as_deref().unwrap_or("n/a")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_payload() {
        let snapshot = StatusSnapshot::parse(r#"{"alternativePercentage":"50%","size":0}"#).unwrap();
        assert_eq!(snapshot.label(), "50%");
        assert_eq!(snapshot.file_name, None);
    }

    #[test]
    fn completed_payload() {
        let snapshot =
            StatusSnapshot::parse(r#"{"alternativePercentage":"100%","fileName":"temp/b.zip"}"#)
                .unwrap();
        assert_eq!(snapshot.file_name.as_deref(), Some("temp/b.zip"));
    }

    #[test]
    fn missing_label_renders_placeholder() {
        let snapshot = StatusSnapshot::parse("{}").unwrap();
        assert_eq!(snapshot.label(), "n/a");
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(StatusSnapshot::parse("<html>login</html>").is_err());
        assert!(StatusSnapshot::parse("\"text\"").is_err());
        assert!(StatusSnapshot::parse("").is_err());
    }
}
