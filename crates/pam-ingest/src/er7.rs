//! Tolerant ER7 ("pipe and hat") decomposition.
//!
//! Raw transcripts arrive as CR, LF or CRLF separated lines, each line a
//! three-letter tag followed by delimited fields. Decomposition keeps
//! everything it can read: unknown tags, short segments and odd field
//! counts all survive into the [`Message`] tree, where structural
//! validation decides their severity.
//!
//! MSH is decomposed by the HL7 numbering convention: the field
//! separator character is itself MSH-1 and the encoding characters are
//! MSH-2, which must not be split on the delimiters they declare.

use pam_model::{Delimiters, Field, FieldValue, Message, PamError, Result, Segment};

/// Parse one message's text into the segment tree.
///
/// Delimiters come from the first MSH line when present, otherwise the
/// standard `|^~\&` set is assumed. Only blank input is refused; a
/// missing header parses fine and is reported by the validator.
pub fn parse_message(text: &str) -> Result<Message> {
    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return Err(PamError::EmptyInput);
    }
    let delimiters = lines
        .iter()
        .find_map(|line| delimiters_from_header(line))
        .unwrap_or_default();
    let segments = lines
        .iter()
        .map(|line| parse_segment(line, delimiters))
        .collect();
    Ok(Message::new(segments))
}

/// Split a multi-message transcript at MSH line boundaries.
///
/// Lines before the first MSH form a headless leading chunk so that
/// structural validation can report the missing header instead of the
/// lines silently disappearing. Blank input yields no chunks.
pub fn split_messages(text: &str) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    for line in text.split(['\r', '\n']) {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with("MSH") || chunks.is_empty() {
            chunks.push(String::new());
        }
        if let Some(chunk) = chunks.last_mut() {
            if !chunk.is_empty() {
                chunk.push('\r');
            }
            chunk.push_str(line);
        }
    }
    chunks
}

fn delimiters_from_header(line: &str) -> Option<Delimiters> {
    if !line.starts_with("MSH") {
        return None;
    }
    let mut chars = line.chars().skip(3);
    let field = chars.next()?;
    let mut delimiters = Delimiters {
        field,
        ..Delimiters::default()
    };
    let encoding: Vec<char> = chars.take_while(|c| *c != field).collect();
    if let Some(c) = encoding.first() {
        delimiters.component = *c;
    }
    if let Some(c) = encoding.get(1) {
        delimiters.repetition = *c;
    }
    if let Some(c) = encoding.get(2) {
        delimiters.escape = *c;
    }
    if let Some(c) = encoding.get(3) {
        delimiters.subcomponent = *c;
    }
    Some(delimiters)
}

fn parse_segment(line: &str, delimiters: Delimiters) -> Segment {
    if line.starts_with("MSH") && line.len() > 3 {
        return parse_header(line, delimiters);
    }
    let mut parts = line.split(delimiters.field);
    let tag = parts.next().unwrap_or_default().trim().to_uppercase();
    let fields = parts
        .map(|raw| parse_field(raw, delimiters))
        .collect();
    Segment::new(tag, fields)
}

fn parse_header(line: &str, delimiters: Delimiters) -> Segment {
    let separator = delimiters.field;
    let after_tag = &line[3..];
    let after_separator = &after_tag[separator.len_utf8()..];
    let mut parts = after_separator.split(separator);
    let encoding = parts.next().unwrap_or_default();

    let mut fields = vec![
        Field::single(separator.to_string()),
        Field::single(encoding),
    ];
    fields.extend(parts.map(|raw| parse_field(raw, delimiters)));
    Segment::new("MSH", fields)
}

fn parse_field(raw: &str, delimiters: Delimiters) -> Field {
    let repetitions = raw
        .split(delimiters.repetition)
        .map(|repetition| {
            FieldValue::new(
                repetition
                    .split(delimiters.component)
                    .map(String::from)
                    .collect(),
            )
        })
        .collect();
    Field::new(raw, repetitions)
}
