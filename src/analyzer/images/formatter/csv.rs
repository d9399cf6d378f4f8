//! CSV formatter.

use crate::error::{ImagesError, Result};
use prettytable::Table;

/// Render rows, header included, as CSV.
pub fn format(rows: &[Vec<String>]) -> Result<String> {
    let table: Table = rows
        .iter()
        .map(|row| row.iter().map(String::as_str))
        .collect();

    let mut buffer = Vec::new();
    let mut writer = table
        .to_csv(&mut buffer)
        .map_err(|e| ImagesError::Io(std::io::Error::other(e.to_string())))?;
    writer.flush()?;
    drop(writer);

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quotes_joined_images() {
        let rows = vec![
            vec!["Name".to_string(), "Kind".to_string(), "Image".to_string()],
            vec!["web".to_string(), "Deployment".to_string(), "nginx:1.21, busybox:1".to_string()],
        ];
        let output = format(&rows).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["Name,Kind,Image", "web,Deployment,\"nginx:1.21, busybox:1\""]);
    }
}
