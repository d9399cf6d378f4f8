//! Plain list formatter.

/// One image per line. Nothing at all when there are no images.
pub fn format(images: &[String]) -> String {
    if images.is_empty() {
        return String::new();
    }
    let mut output = images.join("\n");
    output.push('\n');
    output
}
