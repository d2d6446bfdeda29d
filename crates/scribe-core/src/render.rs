//! HTML rendering of note cards and full pages

use std::fmt::Write;

use crate::models::Note;
use crate::sanitize::{contrast_color, escape_html, strip_scripts};
use crate::view::Screen;

/// Stylesheet shared by every rendered card
pub const CARD_STYLES: &str = "\
.note-card-display {
    border-radius: 10px;
    margin-bottom: 1rem;
    box-shadow: 0 2px 6px rgba(0, 0, 0, 0.15);
    overflow: hidden;
}
.note-banner-display {
    height: 12px;
}
.note-content-display {
    padding: 0.75rem 1rem;
}
.note-heading-display {
    margin: 0 0 0.5rem 0;
    font-size: 1.2rem;
}
.note-description-display {
    font-size: 0.95rem;
    overflow-wrap: anywhere;
}
.notice {
    padding: 0.5rem 1rem;
    border-radius: 6px;
}
";

/// Render one note as a self-contained card.
///
/// The heading is escaped, the description keeps its markup minus any
/// script blocks, and the text color follows the body background.
#[must_use]
pub fn render_note_card(note: &Note) -> String {
    let body = note.body_color.as_str();
    let text = contrast_color(body).as_hex();
    let heading = escape_html(&note.heading);
    let description = strip_scripts(&note.description);
    let description = if description.trim().is_empty() {
        "&nbsp;".to_string()
    } else {
        description
    };

    let mut output = String::new();
    let _ = writeln!(
        output,
        r#"<div class="note-card-display" style="background-color: {body}; color: {text};">"#
    );
    let _ = writeln!(
        output,
        r#"  <div class="note-banner-display" style="background-color: {};"></div>"#,
        note.banner_color.as_str()
    );
    let _ = writeln!(output, r#"  <div class="note-content-display">"#);
    let _ = writeln!(
        output,
        r#"    <h3 class="note-heading-display">{heading}</h3>"#
    );
    let _ = writeln!(
        output,
        r#"    <div class="note-description-display">{description}</div>"#
    );
    let _ = writeln!(output, "  </div>");
    let _ = writeln!(output, "</div>");
    output
}

/// Render a screen as a standalone HTML document
#[must_use]
pub fn render_page(screen: &Screen) -> String {
    let title = escape_html(&screen.title());

    let mut output = String::new();
    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, r#"<html lang="en">"#);
    let _ = writeln!(output, "<head>");
    let _ = writeln!(output, r#"<meta charset="utf-8">"#);
    let _ = writeln!(output, "<title>{title}</title>");
    let _ = writeln!(output, "<style>\n{CARD_STYLES}</style>");
    let _ = writeln!(output, "</head>");
    let _ = writeln!(output, "<body>");
    let _ = writeln!(output, "<h2>{title}</h2>");

    if screen.notes.is_empty() {
        let _ = writeln!(
            output,
            r#"<p class="notice">{}</p>"#,
            escape_html(&screen.empty_message())
        );
    }
    for note in &screen.notes {
        output.push_str(&render_note_card(note));
    }

    let _ = writeln!(output, "</body>");
    let _ = writeln!(output, "</html>");
    output
}
