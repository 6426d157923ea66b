use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported file type: .{extension}")]
    UnsupportedFileType { extension: String },
    #[error("file is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Decode an uploaded file into text based on its extension.
///
/// Binary formats (PDF, DOCX) go through an upstream converter; by the time
/// a file reaches this function it must already be plain text.
pub fn decode(filename: &str, data: &[u8]) -> Result<String, DecodeError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "txt" | "md" => Ok(String::from_utf8(data.to_vec())?),
        _ => Err(DecodeError::UnsupportedFileType { extension }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_text() {
        let text = decode("notes.txt", b"hello world").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn decodes_markdown() {
        let text = decode("README.md", b"# title").unwrap();
        assert_eq!(text, "# title");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(decode("NOTES.TXT", b"hi").is_ok());
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = decode("report.pdf", b"%PDF-1.4").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedFileType { extension } if extension == "pdf"
        ));
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(matches!(
            decode("Makefile", b"all:"),
            Err(DecodeError::UnsupportedFileType { .. })
        ));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = decode("broken.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidUtf8(_)));
    }
}
