//! YAML formatter.

use crate::error::Result;
use serde::Serialize;

/// A single YAML document, with its leading `---` marker.
pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let body = serde_yaml::to_string(value)?;
    Ok(format!("---\n{}", body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::images::types::ImageRecord;

    #[test]
    fn test_format() {
        let records = vec![ImageRecord::new("Deployment", "web", vec!["nginx:1.21".into()])];
        let output = format(&records).unwrap();
        assert!(output.starts_with("---\n- kind: Deployment\n"));
        let parsed: Vec<ImageRecord> = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed, records);
    }
}
