//! HTML rendering for the board page.
//!
//! The rendering layer consumes the ordered message list the handlers
//! produce. Escaping happens here and only here; the store round-trips
//! content verbatim.

use msgboard_core::Message;

pub fn index_page(messages: &[Message]) -> String {
    let mut out = String::with_capacity(512 + messages.len() * 128);
    out.push_str(
        "<!DOCTYPE html>\n<html>\n<head><title>Message Board</title></head>\n<body>\n\
         <h1>Message Board</h1>\n\
         <form action=\"/add\" method=\"post\">\n\
         <input type=\"text\" name=\"message\" placeholder=\"Write a message\">\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n",
    );

    if messages.is_empty() {
        out.push_str("<p>No messages yet.</p>\n");
    } else {
        out.push_str("<ul>\n");
        for m in messages {
            out.push_str(&format!(
                "<li>{} <small>{}</small> <a href=\"/delete/{}\">delete</a></li>\n",
                escape_html(&m.content),
                m.created_at.format("%Y-%m-%d %H:%M:%S"),
                m.id
            ));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn msg(id: i64, content: &str) -> Message {
        Message {
            id,
            content: content.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_board() {
        let page = index_page(&[]);
        assert!(page.contains("No messages yet."));
        assert!(page.contains("action=\"/add\""));
    }

    #[test]
    fn escapes_content() {
        let page = index_page(&[msg(1, "<script>alert(1)</script>")]);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn preserves_order_and_links() {
        let page = index_page(&[msg(2, "newer"), msg(1, "older")]);
        let newer = page.find("newer").unwrap();
        let older = page.find("older").unwrap();
        assert!(newer < older);
        assert!(page.contains("href=\"/delete/2\""));
        assert!(page.contains("href=\"/delete/1\""));
    }
}
