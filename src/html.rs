use pulldown_cmark::{CowStr, Event, Tag, TagEnd, html};
use pulldown_cmark_escape::escape_html;

use crate::block::{Block, Document, InlineSpan};
use crate::config::HtmlConfig;

/// Convert a document to HTML by replaying it as pulldown-cmark events.
pub fn document_to_html(doc: &Document, config: &HtmlConfig) -> String {
    let mut out = String::new();
    html::push_html(&mut out, document_events(doc, config).into_iter());
    out
}

fn document_events<'a>(doc: &'a Document, config: &HtmlConfig) -> Vec<Event<'a>> {
    let blocks = doc.blocks();
    let mut events = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        match block {
            Block::Paragraph { spans } => {
                events.push(Event::Start(Tag::Paragraph));
                push_spans(spans, &mut events);
                events.push(Event::End(TagEnd::Paragraph));
            }
            Block::BulletItem { spans } => {
                let continues_list = config.group_bullets
                    && i > 0
                    && matches!(blocks[i - 1], Block::BulletItem { .. });
                let list_continues = config.group_bullets
                    && matches!(blocks.get(i + 1), Some(Block::BulletItem { .. }));

                if !continues_list {
                    events.push(Event::Start(Tag::List(None)));
                }
                events.push(Event::Start(Tag::Item));
                push_spans(spans, &mut events);
                events.push(Event::End(TagEnd::Item));
                if !list_continues {
                    events.push(Event::End(TagEnd::List(false)));
                }
            }
            Block::Divider => events.push(Event::Rule),
            Block::Spacer => {
                events.push(Event::Html(CowStr::from(spacer_div(&config.spacer_class))));
            }
            Block::Table { header, rows } => {
                events.push(Event::Start(Tag::Table(Vec::new())));
                events.push(Event::Start(Tag::TableHead));
                push_cells(header, &mut events);
                events.push(Event::End(TagEnd::TableHead));
                for row in rows {
                    events.push(Event::Start(Tag::TableRow));
                    push_cells(row, &mut events);
                    events.push(Event::End(TagEnd::TableRow));
                }
                events.push(Event::End(TagEnd::Table));
            }
        }
    }

    events
}

fn spacer_div(class: &str) -> String {
    let mut div = String::from("<div class=\"");
    // Writing into a String can't fail
    let _ = escape_html(&mut div, class);
    div.push_str("\"></div>\n");
    div
}

fn push_spans<'a>(spans: &'a [InlineSpan], events: &mut Vec<Event<'a>>) {
    for span in spans {
        match span {
            InlineSpan::PlainText(text) => {
                events.push(Event::Text(CowStr::Borrowed(text.as_str())));
            }
            InlineSpan::Emphasis(text) => {
                events.push(Event::Start(Tag::Strong));
                events.push(Event::Text(CowStr::Borrowed(text.as_str())));
                events.push(Event::End(TagEnd::Strong));
            }
        }
    }
}

fn push_cells<'a>(cells: &'a [String], events: &mut Vec<Event<'a>>) {
    for cell in cells {
        events.push(Event::Start(Tag::TableCell));
        if !cell.is_empty() {
            events.push(Event::Text(CowStr::Borrowed(cell.as_str())));
        }
        events.push(Event::End(TagEnd::TableCell));
    }
}
