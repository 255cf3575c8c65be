use crate::block::{Block, Document, InlineSpan};
use crate::config::Config;

/// Convert a document to Typst markup
pub fn document_to_typst(doc: &Document, config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    if let Some(font) = &config.typst.font {
        out.push_str(&format!("#set text(font: \"{}\")\n", escape_string(font)));
    }
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    out.push('\n');

    let blocks = doc.blocks();
    for (i, block) in blocks.iter().enumerate() {
        emit_block(block, config, &mut out);

        // A blank line ends the list once the run of bullets is over
        if matches!(block, Block::BulletItem { .. })
            && !matches!(blocks.get(i + 1), Some(Block::BulletItem { .. }))
        {
            out.push('\n');
        }
    }

    out
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Paragraph { spans } => {
            spans_to_typst(spans, out);
            out.push_str("\n\n");
        }
        Block::BulletItem { spans } => {
            out.push_str("- ");
            spans_to_typst(spans, out);
            out.push('\n');
        }
        Block::Divider => {
            out.push_str("#line(length: 100%)\n\n");
        }
        Block::Spacer => {
            out.push_str("#v(0.5em)\n\n");
        }
        Block::Table { header, rows } => {
            // Keep tables together when possible
            if !header.is_empty() {
                out.push_str("#block(breakable: false)[\n");
                table_to_typst(header, rows, config.typst.bold_table_header, out);
                out.push_str("]\n\n");
            }
        }
    }
}

fn spans_to_typst(spans: &[InlineSpan], out: &mut String) {
    let mut line_start = true;
    for span in spans {
        match span {
            InlineSpan::PlainText(text) => escape_text(text, line_start, out),
            InlineSpan::Emphasis(text) => {
                // Typst strong markers must hug the text
                let inner = text.trim();
                let leading = &text[..text.len() - text.trim_start().len()];
                let trailing = &text[text.trim_end().len()..];
                out.push_str(leading);
                if !inner.is_empty() {
                    out.push('*');
                    escape_text(inner, false, out);
                    out.push('*');
                }
                out.push_str(trailing);
            }
        }
        line_start = false;
    }
}

/// Escape special Typst characters in body text.
///
/// Markers that only mean something at the start of a line (headings,
/// list items, numbered items) are escaped only there.
fn escape_text(text: &str, line_start: bool, out: &mut String) {
    let body = if line_start {
        let trimmed = text.trim_start();
        out.push_str(&text[..text.len() - trimmed.len()]);
        escape_line_start(trimmed, out)
    } else {
        text
    };

    for ch in body.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

fn escape_line_start<'a>(text: &'a str, out: &mut String) -> &'a str {
    if let Some(rest) = text
        .strip_prefix('=')
        .or_else(|| text.strip_prefix('-'))
        .or_else(|| text.strip_prefix('+'))
    {
        out.push('\\');
        out.push_str(&text[..1]);
        return rest;
    }

    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && text[digits..].starts_with('.') {
        out.push_str(&text[..digits]);
        out.push_str("\\.");
        return &text[digits + 1..];
    }

    text
}

fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn table_to_typst(header: &[String], rows: &[Vec<String>], bold_header: bool, out: &mut String) {
    let col_count = header.len();

    out.push_str("#table(\n");
    out.push_str(&format!("  columns: {},\n", col_count));

    // Each cell is its own content block, so line-start markers apply in every cell
    for cell in header {
        out.push_str("  [");
        if bold_header && !cell.is_empty() {
            out.push('*');
            escape_text(cell, true, out);
            out.push('*');
        } else {
            escape_text(cell, true, out);
        }
        out.push_str("],\n");
    }

    // Pad or truncate so every row fills the grid exactly
    for row in rows {
        for i in 0..col_count {
            out.push_str("  [");
            if let Some(cell) = row.get(i) {
                escape_text(cell, true, out);
            }
            out.push_str("],\n");
        }
    }

    out.push_str(")\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const PREAMBLE: &str = "#set par(linebreaks: \"optimized\")\n\n";

    fn to_typst(markup: &str) -> String {
        document_to_typst(&parse(markup), &Config::default())
    }

    #[test]
    fn paragraph() {
        assert_eq!(to_typst("Hello world"), format!("{PREAMBLE}Hello world\n\n"));
    }

    #[test]
    fn emphasis() {
        assert_eq!(
            to_typst("a *bold* move"),
            format!("{PREAMBLE}a *bold* move\n\n")
        );
    }

    #[test]
    fn emphasis_whitespace_moves_outside_markers() {
        assert_eq!(to_typst("x* y *z"), format!("{PREAMBLE}x *y* z\n\n"));
    }

    #[test]
    fn bullets_end_with_blank_line() {
        assert_eq!(
            to_typst("# one\n# two\nafter"),
            format!("{PREAMBLE}- one\n- two\n\nafter\n\n")
        );
    }

    #[test]
    fn divider_and_spacer() {
        assert_eq!(
            to_typst("-\n"),
            format!("{PREAMBLE}#line(length: 100%)\n\n#v(0.5em)\n\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(to_typst("a_b @c"), format!("{PREAMBLE}a\\_b \\@c\n\n"));
        assert_eq!(
            to_typst("see https://x.io"),
            format!("{PREAMBLE}see https:\\/\\/x.io\n\n")
        );
        assert_eq!(to_typst("5 * 3"), format!("{PREAMBLE}5 \\* 3\n\n"));
    }

    #[test]
    fn escapes_line_start_markers() {
        assert_eq!(to_typst("= not a heading"), format!("{PREAMBLE}\\= not a heading\n\n"));
        assert_eq!(to_typst("+ plus"), format!("{PREAMBLE}\\+ plus\n\n"));
        assert_eq!(to_typst("10. Tips"), format!("{PREAMBLE}10\\. Tips\n\n"));
        assert_eq!(to_typst("a = b"), format!("{PREAMBLE}a = b\n\n"));
    }

    #[test]
    fn table() {
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 2,\n  [*A*],\n  [*B*],\n  [1],\n  [2],\n)\n]\n\n"
        );
        assert_eq!(to_typst("| A | B |\n|---|---|\n| 1 | 2 |"), expected);
    }

    #[test]
    fn ragged_rows_fill_the_grid() {
        let out = to_typst("|A|B|\n|1|\n|2|3|4|");
        assert!(out.contains("  [1],\n  [],\n  [2],\n  [3],\n)"));
        assert!(!out.contains("[4]"));
    }

    #[test]
    fn table_cells_escape_line_start_markers() {
        let out = to_typst("|Day|= Change|\n|Mon|- 5%|\n|Tue|+ 2%|\n|3. Wed|= flat|");
        assert!(out.contains("  [*\\= Change*],\n"));
        assert!(out.contains("  [\\- 5%],\n"));
        assert!(out.contains("  [\\+ 2%],\n"));
        assert!(out.contains("  [3\\. Wed],\n"));
        assert!(out.contains("  [\\= flat],\n"));
        assert!(!out.contains("  [- 5%]"));
    }

    #[test]
    fn plain_table_header() {
        let mut config = Config::default();
        config.typst.bold_table_header = false;
        let out = document_to_typst(&parse("|A|"), &config);
        assert!(out.contains("  [A],\n"));
    }

    #[test]
    fn preamble_options() {
        let mut config = Config::default();
        config.typst.font = Some("Libertinus Serif".to_string());
        config.page.numbers = true;
        let out = document_to_typst(&parse(""), &config);
        assert_eq!(
            out,
            "#set par(linebreaks: \"optimized\")\n#set text(font: \"Libertinus Serif\")\n#set page(numbering: \"1\")\n\n"
        );
    }
}
