//! 上传文件的类型检查

/// 扩展名与文件头签名
struct Signature {
    extensions: &'static [&'static str],
    content_type: &'static str,
    check: fn(&[u8]) -> bool,
}

const ZIP: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
const OLE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const SIGNATURES: &[Signature] = &[
    Signature {
        extensions: &[".png"],
        content_type: "image/png",
        check: |d| d.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
    },
    Signature {
        extensions: &[".jpg", ".jpeg"],
        content_type: "image/jpeg",
        check: |d| d.starts_with(&[0xFF, 0xD8, 0xFF]),
    },
    Signature {
        extensions: &[".gif"],
        content_type: "image/gif",
        check: |d| d.starts_with(b"GIF87a") || d.starts_with(b"GIF89a"),
    },
    Signature {
        extensions: &[".webp"],
        content_type: "image/webp",
        check: |d| d.len() >= 12 && &d[0..4] == b"RIFF" && &d[8..12] == b"WEBP",
    },
    Signature {
        extensions: &[".pdf"],
        content_type: "application/pdf",
        check: |d| d.starts_with(b"%PDF-"),
    },
    Signature {
        extensions: &[".zip"],
        content_type: "application/zip",
        check: |d| d.starts_with(ZIP),
    },
    Signature {
        extensions: &[".docx"],
        content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        check: |d| d.starts_with(ZIP),
    },
    Signature {
        extensions: &[".xlsx"],
        content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        check: |d| d.starts_with(ZIP),
    },
    Signature {
        extensions: &[".pptx"],
        content_type: "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        check: |d| d.starts_with(ZIP),
    },
    Signature {
        extensions: &[".doc", ".xls", ".ppt"],
        content_type: "application/octet-stream",
        check: |d| d.starts_with(OLE),
    },
    Signature {
        extensions: &[".txt", ".md", ".csv", ".json"],
        content_type: "text/plain; charset=utf-8",
        check: is_text,
    },
];

/// 文本文件不能含 NUL，且前 1KB 须为合法 UTF-8（允许截断在多字节字符中间）
fn is_text(data: &[u8]) -> bool {
    let head = &data[..data.len().min(1024)];
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

fn find(extension: &str) -> Option<&'static Signature> {
    let ext = extension.to_ascii_lowercase();
    SIGNATURES
        .iter()
        .find(|s| s.extensions.contains(&ext.as_str()))
}

/// 文件头是否与扩展名相符；未知扩展名一律拒绝
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }
    find(extension).is_some_and(|s| (s.check)(data))
}

/// 下载时使用的 Content-Type
pub fn content_type_for(extension: &str) -> &'static str {
    find(extension)
        .map(|s| s.content_type)
        .unwrap_or("application/octet-stream")
}

/// 从文件名取出带点的小写扩展名
pub fn extension_of(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 10 {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_and_pdf_headers() {
        assert!(validate_magic_bytes(
            &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0],
            ".PNG"
        ));
        assert!(validate_magic_bytes(b"%PDF-1.7\n", ".pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.7\n", ".png"));
        assert!(!validate_magic_bytes(&[], ".pdf"));
    }

    #[test]
    fn test_office_documents_are_zip() {
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".docx"));
        assert!(!validate_magic_bytes(b"plain text", ".docx"));
    }

    #[test]
    fn test_text_files() {
        assert!(validate_magic_bytes("# Notes\n中文".as_bytes(), ".md"));
        assert!(!validate_magic_bytes(&[b'a', 0, b'b'], ".txt"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
        assert_eq!(content_type_for(".exe"), "application/octet-stream");
        assert_eq!(content_type_for(".pdf"), "application/pdf");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Report.Final.PDF"), Some(".pdf".to_string()));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of("trailing."), None);
    }
}
