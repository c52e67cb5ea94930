/// MIME utilities
use mime::Mime;
use std::path::Path;

/// Content type of an attachment, guessed from its file extension
pub fn detect_content_type(path: &Path) -> Mime {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => mime::APPLICATION_PDF,
        "txt" => mime::TEXT_PLAIN,
        "html" | "htm" => mime::TEXT_HTML,
        "csv" => mime::TEXT_CSV,
        "json" => mime::APPLICATION_JSON,
        "xml" => mime::TEXT_XML,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "zip" => parse_or_octet("application/zip"),
        "doc" => parse_or_octet("application/msword"),
        "docx" => parse_or_octet(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        "xls" => parse_or_octet("application/vnd.ms-excel"),
        "xlsx" => {
            parse_or_octet("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        }
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

fn parse_or_octet(content_type: &str) -> Mime {
    content_type
        .parse()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
