//! In-memory representation of a parsed ER7 message.
//!
//! The tree is built once by the ingest layer and never mutated by the
//! validators: a [`Message`] owns ordered [`Segment`]s, a segment owns
//! ordered [`Field`]s, and a field is pre-split into repetitions and
//! components so grammar checks never re-split raw text.
//!
//! Field numbering follows HL7 v2 conventions: `segment.field(3)` is
//! PID-3. For MSH the field separator itself is MSH-1, so MSH-9 addresses
//! the message-type field at its standard position.

use serde::{Deserialize, Serialize};

/// Delimiter set declared by MSH-1 and MSH-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for Delimiters {
    /// The standard `|^~\&` set, assumed when MSH-2 is absent.
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

/// One repetition of a field, split into components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    components: Vec<String>,
}

impl FieldValue {
    pub fn new(components: Vec<String>) -> Self {
        Self { components }
    }

    /// Component by 1-based position; absent components read as empty.
    pub fn component(&self, position: usize) -> &str {
        position
            .checked_sub(1)
            .and_then(|index| self.components.get(index))
            .map_or("", String::as_str)
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// True when every component is blank.
    pub fn is_empty(&self) -> bool {
        self.components.iter().all(|c| c.trim().is_empty())
    }
}

/// A field with its raw text and pre-split repetitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    raw: String,
    repetitions: Vec<FieldValue>,
}

impl Field {
    pub fn new(raw: impl Into<String>, repetitions: Vec<FieldValue>) -> Self {
        Self {
            raw: raw.into(),
            repetitions,
        }
    }

    /// A field holding a single unstructured value.
    pub fn single(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let repetitions = vec![FieldValue::new(vec![raw.clone()])];
        Self { raw, repetitions }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn repetitions(&self) -> &[FieldValue] {
        &self.repetitions
    }

    pub fn first(&self) -> Option<&FieldValue> {
        self.repetitions.first()
    }

    /// Component of the first repetition, 1-based.
    pub fn component(&self, position: usize) -> &str {
        self.first().map_or("", |value| value.component(position))
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// A tagged group of fields, e.g. `PID` or `PV1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    tag: String,
    fields: Vec<Field>,
}

impl Segment {
    pub fn new(tag: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            tag: tag.into(),
            fields,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field by 1-based HL7 position.
    pub fn field(&self, position: usize) -> Option<&Field> {
        position.checked_sub(1).and_then(|index| self.fields.get(index))
    }

    /// Raw text of a field; absent fields read as empty.
    pub fn field_raw(&self, position: usize) -> &str {
        self.field(position).map_or("", Field::raw)
    }

    /// Component of a field's first repetition; absent reads as empty.
    pub fn field_component(&self, position: usize, component: usize) -> &str {
        self.field(position)
            .map_or("", |field| field.component(component))
    }
}

/// Message type as carried in MSH-9: `code^trigger[^structure]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub message_code: String,
    pub trigger: String,
    pub structure: Option<String>,
}

/// An ordered sequence of segments, as received on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    segments: Vec<Segment>,
}

impl Message {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// First segment with the given tag.
    pub fn segment(&self, tag: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.tag() == tag)
    }

    /// All segments with the given tag, in message order.
    pub fn segments_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Segment> {
        self.segments.iter().filter(move |segment| segment.tag() == tag)
    }

    pub fn has_segment(&self, tag: &str) -> bool {
        self.segment(tag).is_some()
    }

    /// The MSH header segment, wherever it appears.
    pub fn header(&self) -> Option<&Segment> {
        self.segment("MSH")
    }

    /// Message type decomposed from MSH-9, if a header is present.
    pub fn event_descriptor(&self) -> Option<EventDescriptor> {
        let header = self.header()?;
        let field = header.field(9)?;
        let value = field.first()?;
        let message_code = value.component(1).trim().to_uppercase();
        let trigger = value.component(2).trim().to_uppercase();
        if message_code.is_empty() && trigger.is_empty() {
            return None;
        }
        let structure = value.component(3).trim();
        Some(EventDescriptor {
            message_code,
            trigger,
            structure: (!structure.is_empty()).then(|| structure.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(raw: &str) -> Field {
        Field::new(
            raw,
            raw.split('~')
                .map(|rep| FieldValue::new(rep.split('^').map(String::from).collect()))
                .collect(),
        )
    }

    #[test]
    fn component_positions_are_one_based() {
        let value = FieldValue::new(vec!["123456".into(), "4".into(), "ISO".into()]);
        assert_eq!(value.component(1), "123456");
        assert_eq!(value.component(3), "ISO");
        assert_eq!(value.component(4), "");
    }

    #[test]
    fn event_descriptor_from_header() {
        let header = Segment::new(
            "MSH",
            vec![
                Field::single("|"),
                Field::single("^~\\&"),
                field(""),
                field(""),
                field(""),
                field(""),
                field("20240101120000"),
                field(""),
                field("ADT^A01^ADT_A01"),
            ],
        );
        let message = Message::new(vec![header]);
        let descriptor = message.event_descriptor().expect("descriptor");
        assert_eq!(descriptor.message_code, "ADT");
        assert_eq!(descriptor.trigger, "A01");
        assert_eq!(descriptor.structure.as_deref(), Some("ADT_A01"));
    }

    #[test]
    fn missing_message_type_yields_no_descriptor() {
        let header = Segment::new("MSH", vec![Field::single("|"), Field::single("^~\\&")]);
        assert!(Message::new(vec![header]).event_descriptor().is_none());
    }

    #[test]
    fn repetitions_are_preserved_in_order() {
        let field = field("111^^^HOSP^PI~222^^^INS^INS");
        assert_eq!(field.repetitions().len(), 2);
        assert_eq!(field.repetitions()[1].component(1), "222");
        assert_eq!(field.component(1), "111");
    }
}
