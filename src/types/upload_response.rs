use serde::Deserialize;

/// Successful body of `POST /api/upload`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    /// Name the backend stored the file under.
    pub filename: String,

    /// Leading part of the extracted text.
    #[serde(default)]
    pub content_preview: String,

    /// File size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization() {
        let json = r#"{"success":true,"filename":"notes.txt","content_preview":"hello","size":5}"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.filename, "notes.txt");
        assert_eq!(response.content_preview, "hello");
        assert_eq!(response.size, Some(5));
    }
}
