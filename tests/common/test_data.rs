/// Test data builders and helpers
use mailgun_mailer::{MailMessage, Message};

/// Message of the end-to-end scenario: one recipient, subject and text body
pub fn scenario_message() -> Message {
    let mut message = Message::new();
    message
        .set_to(["b@example.com"])
        .expect("valid recipient");
    message.set_subject("Hi").set_text_body("hello");
    message
}

/// Message with every recipient field and both bodies filled in
pub fn full_message() -> Message {
    let mut message = Message::new();
    message
        .set_from(("c@example.com", "Carol"))
        .expect("valid sender")
        .set_reply_to("support@example.com")
        .expect("valid reply-to")
        .set_to(["b@example.com", "d@example.com"])
        .expect("valid recipients")
        .set_cc(["cc@example.com"])
        .expect("valid cc")
        .set_bcc(["audit@example.com"])
        .expect("valid bcc");
    message
        .set_subject("Quarterly report")
        .set_text_body("See attached.")
        .set_html_body("<p>See attached.</p>");
    message
}

/// Minimal one-page PDF
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\ntrailer << /Root 1 0 R >>\n%%EOF\n".to_vec()
}

/// Small SVG logo (text, so it stays readable in a captured request body)
pub fn svg_bytes() -> Vec<u8> {
    br#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8"/></svg>"#
        .to_vec()
}
