use crate::block::{Block, Document};
use crate::inline::tokenize;

/// Rows whose first cell contains this marker are separator rows.
const TABLE_SEPARATOR: &str = "---";

/// Parse studio markup into a document
pub fn parse(content: &str) -> Document {
    if content.is_empty() {
        return Document::default();
    }

    let mut blocks = Vec::new();
    let mut state = ParseState::default();

    for line in content.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        process_line(line, &mut state, &mut blocks);
    }
    flush_table(&mut state, &mut blocks);

    tracing::debug!(
        bytes = content.len(),
        blocks = blocks.len(),
        "rendered markup"
    );
    Document::new(blocks)
}

#[derive(Default)]
struct ParseState {
    // Consecutive table rows not yet emitted. Non-empty means we're inside a table.
    table_rows: Vec<Vec<String>>,
}

fn process_line(line: &str, state: &mut ParseState, blocks: &mut Vec<Block>) {
    let trimmed = line.trim();

    if trimmed.starts_with('|') {
        let cells = split_cells(trimmed);
        if !cells.is_empty() {
            state.table_rows.push(cells);
        }
        return;
    }

    flush_table(state, blocks);

    if let Some(rest) = trimmed.strip_prefix('#') {
        blocks.push(Block::BulletItem {
            spans: tokenize(rest.trim_start()),
        });
    } else if trimmed == "-" || trimmed == "---" {
        blocks.push(Block::Divider);
    } else if trimmed.is_empty() {
        blocks.push(Block::Spacer);
    } else {
        blocks.push(Block::Paragraph {
            spans: tokenize(line),
        });
    }
}

/// Split a trimmed `|a|b|` row into cells.
///
/// The segment before the leading pipe is always a split artifact, and so is
/// the one after a trailing pipe. Everything in between is a real cell, even
/// when empty.
fn split_cells(row: &str) -> Vec<String> {
    let mut segments: Vec<&str> = row.split('|').skip(1).collect();
    if row.ends_with('|') {
        segments.pop();
    }
    segments
        .into_iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn flush_table(state: &mut ParseState, blocks: &mut Vec<Block>) {
    if state.table_rows.is_empty() {
        return;
    }

    let mut rows = std::mem::take(&mut state.table_rows).into_iter();
    let Some(header) = rows.next() else {
        return;
    };
    let rows: Vec<Vec<String>> = rows
        .filter(|row| {
            !row
                .first()
                .is_some_and(|cell| cell.contains(TABLE_SEPARATOR))
        })
        .collect();

    tracing::trace!(columns = header.len(), rows = rows.len(), "flushed table");
    blocks.push(Block::Table { header, rows });
}
