mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod pdf;
mod preview;
mod repurpose;
mod typst;

pub use block::{Block, Document, InlineSpan};
pub use config::{Config, HtmlConfig, PageConfig, PreviewConfig, RepurposeConfig, TypstConfig};
pub use error::{Error, Result};
pub use html::document_to_html;
pub use inline::tokenize;
pub use preview::{Platform, UnknownPlatform, export_file_name, preview};
pub use repurpose::{Target, UnknownTarget, repurpose_prompt};
pub use typst::document_to_typst;

/// Parse studio markup into a document. Never fails.
pub fn render(content: &str) -> Document {
    parser::parse(content)
}

/// Convert markup straight to HTML.
pub fn markup_to_html(content: &str, config: &Config) -> String {
    document_to_html(&render(content), &config.html)
}

/// Convert markup straight to Typst markup.
pub fn markup_to_typst(content: &str, config: &Config) -> String {
    document_to_typst(&render(content), config)
}

/// Convert markup to PDF bytes.
pub fn markup_to_pdf(content: &str, config: &Config) -> Result<Vec<u8>> {
    pdf::typst_to_pdf(markup_to_typst(content, config))
}

/// Serialize a document for an external presentation layer.
pub fn document_to_json(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let doc = render("# hi *there*\n-\n|A|\n|1|");
        insta::assert_snapshot!(document_to_json(&doc).unwrap(), @r#"
        [
          {
            "type": "bullet_item",
            "spans": [
              {
                "type": "plain_text",
                "text": "hi "
              },
              {
                "type": "emphasis",
                "text": "there"
              }
            ]
          },
          {
            "type": "divider"
          },
          {
            "type": "table",
            "header": [
              "A"
            ],
            "rows": [
              [
                "1"
              ]
            ]
          }
        ]
        "#);
    }

    #[test]
    fn empty_document_json() {
        assert_eq!(document_to_json(&render("")).unwrap(), "[]");
    }

    #[test]
    fn document_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
        assert_send_sync::<Block>();
        assert_send_sync::<InlineSpan>();
    }

    #[test]
    fn pdf_output() {
        let bytes = markup_to_pdf("# a\n|A|\n|1|", &Config::default()).expect("pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pdf_with_escaped_table_cells() {
        let markup = "Weekly *stats*\n|Day|Change|\n|---|---|\n|Mon|- 5%|\n|Tue|= flat|\n---";
        let bytes = markup_to_pdf(markup, &Config::default()).expect("pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn markup_helpers_use_config() {
        let mut config = Config::compiled_default();
        config.html.spacer_class = "gap".to_string();
        assert!(markup_to_html("a\n\nb", &config).contains("class=\"gap\""));
        assert!(markup_to_typst("# x", &config).ends_with("- x\n\n"));
    }
}
