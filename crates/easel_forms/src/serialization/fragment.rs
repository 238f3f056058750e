use crate::errors::{FragmentError, FragmentResult};
use crate::serialization::encoding::{from_document_safe, to_document_safe};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;
use std::io::Cursor;

/// One element of a saved document: a tag and its attributes. Attribute
/// values are kept in their document-safe encoded form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub tag: String,
    attributes: Vec<(String, String)>,
    pub children: Vec<Fragment>,
}

impl Fragment {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an attribute from its raw, already encoded text.
    pub fn set_raw(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        let key = key.into();
        let raw = raw.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = raw,
            None => self.attributes.push((key, raw)),
        }
    }

    /// Set an attribute from plain text, encoding it.
    pub fn set_text(&mut self, key: impl Into<String>, text: &str) {
        self.set_raw(key, to_document_safe(text));
    }

    pub fn with_text(mut self, key: impl Into<String>, text: &str) -> Self {
        self.set_text(key, text);
        self
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Decoded attribute text. A value that fails to decode counts as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.decode(key, self.raw(key)?)
    }

    /// Like [`Fragment::text`], but trims the raw value before decoding, so
    /// encoded whitespace is kept.
    pub fn trimmed_text(&self, key: &str) -> Option<String> {
        self.decode(key, self.raw(key)?.trim())
    }

    /// Attribute keys not listed in `known`.
    pub fn unknown_keys<'a>(&'a self, known: &'a [&'a str]) -> impl Iterator<Item = &'a str> {
        self.attributes
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(move |k| !known.contains(k))
    }

    fn decode(&self, key: &str, raw: &str) -> Option<String> {
        let decoded = from_document_safe(raw);
        if decoded.is_none() {
            log::debug!("<{}>: skipping attribute {}: bad encoding {:?}", self.tag, key, raw);
        }
        decoded
    }

    /// Decoded and parsed attribute value. Malformed values count as absent.
    pub fn parsed<T>(&self, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let text = self.text(key)?;
        let value = parse(&text);
        if value.is_none() {
            log::debug!("<{}>: skipping attribute {}: malformed value {:?}", self.tag, key, text);
        }
        value
    }

    /// Parse the first element of `xml`, including nested elements.
    pub fn parse(xml: &str) -> FragmentResult<Fragment> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut open: Vec<Fragment> = Vec::new();
        loop {
            let finished = match reader.read_event()? {
                Event::Start(ref e) => {
                    open.push(Self::from_start(e)?);
                    None
                }
                Event::Empty(ref e) => Some(Self::from_start(e)?),
                Event::End(_) => Some(open.pop().ok_or(FragmentError::NoElement)?),
                Event::Eof => return Err(FragmentError::NoElement),
                _ => None,
            };

            if let Some(element) = finished {
                match open.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
        }
    }

    fn from_start(start: &BytesStart<'_>) -> FragmentResult<Fragment> {
        let mut fragment = Fragment::new(String::from_utf8(start.name().as_ref().to_vec())?);
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8(attr.key.as_ref().to_vec())?;
            let value = String::from_utf8(attr.value.into_owned())?;
            fragment.set_raw(key, value);
        }
        Ok(fragment)
    }

    pub fn to_xml(&self) -> FragmentResult<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        self.write_into(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }

    fn write_into(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> FragmentResult<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (key, value) in &self.attributes {
            // Values are already encoded; push the bytes untouched.
            start.push_attribute(Attribute::from((key.as_bytes(), value.as_bytes())));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_element() {
        let fragment = Fragment::parse(r#"<PictureBox name="pic1" location="4,5"/>"#).expect("parse");
        assert_eq!(fragment.tag, "PictureBox");
        assert_eq!(fragment.raw("name"), Some("pic1"));
        assert_eq!(fragment.raw("location"), Some("4,5"));
        assert!(!fragment.has_attribute("size"));
    }

    #[test]
    fn test_parse_nested() {
        let xml = r#"<?xml version="1.0"?>
            <PictureBox name="outer">
                <Extra key="1"/>
                <Extra key="2"></Extra>
            </PictureBox>"#;
        let fragment = Fragment::parse(xml).expect("parse");
        assert_eq!(fragment.tag, "PictureBox");
        assert_eq!(fragment.children.len(), 2);
        assert_eq!(fragment.children[1].raw("key"), Some("2"));
    }

    #[test]
    fn test_raw_values_are_kept_encoded() {
        let fragment = Fragment::parse(r#"<PictureBox image="a &amp; b.png"/>"#).expect("parse");
        assert_eq!(fragment.raw("image"), Some("a &amp; b.png"));
        assert_eq!(fragment.text("image").as_deref(), Some("a & b.png"));
    }

    #[test]
    fn test_bad_encoding_counts_as_absent() {
        let mut fragment = Fragment::new("PictureBox");
        fragment.set_raw("image", "x &nope; y");
        assert_eq!(fragment.text("image"), None);
    }

    #[test]
    fn test_trimmed_text_keeps_encoded_whitespace() {
        let mut fragment = Fragment::new("PictureBox");
        fragment.set_raw("image", "  shot.png&#10; ");
        assert_eq!(fragment.trimmed_text("image").as_deref(), Some("shot.png\n"));
        assert_eq!(fragment.text("image").as_deref(), Some("  shot.png\n "));
    }

    #[test]
    fn test_unknown_keys() {
        let fragment = Fragment::parse(r#"<PictureBox name="a" tint="red" size="1,1" z="2"/>"#).expect("parse");
        let unknown: Vec<_> = fragment.unknown_keys(&["name", "size"]).collect();
        assert_eq!(unknown, vec!["tint", "z"]);
    }

    #[test]
    fn test_parsed_skips_malformed() {
        let fragment = Fragment::new("PictureBox").with_text("size", "wide");
        assert_eq!(fragment.parsed("size", |s| s.parse::<i32>().ok()), None);
    }

    #[test]
    fn test_no_element() {
        assert!(matches!(Fragment::parse(""), Err(FragmentError::NoElement)));
        assert!(Fragment::parse("<a><b></a>").is_err());
    }

    #[test]
    fn test_set_replaces() {
        let mut fragment = Fragment::new("PictureBox");
        fragment.set_text("name", "a");
        fragment.set_text("name", "b");
        assert_eq!(fragment.attributes().count(), 1);
        assert_eq!(fragment.raw("name"), Some("b"));
    }

    #[test]
    fn test_write_then_parse() {
        let mut fragment = Fragment::new("PictureBox").with_text("image", "dir/<odd> & \"name\".png");
        fragment.children.push(Fragment::new("Extra").with_text("key", "1"));

        let xml = fragment.to_xml().expect("write");
        assert_eq!(
            xml,
            r#"<PictureBox image="dir/&lt;odd&gt; &amp; &quot;name&quot;.png"><Extra key="1"/></PictureBox>"#
        );
        assert_eq!(Fragment::parse(&xml).expect("parse"), fragment);
    }
}
