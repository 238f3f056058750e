use crate::control::{Color, Point, Size};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lazy sequence of `(key, value)` pairs produced by a change walk.
pub type ChangedProperties<'a> = Box<dyn Iterator<Item = (&'static str, ChangedProperty)> + 'a>;

/// One property value as handed to a markup or code generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ChangedProperty {
    Bool(bool),
    Int(i32),
    /// `None` is the empty color.
    Color(Option<Color>),
    Enum { type_name: String, value: String },
    File(PathBuf),
    Text(String),
    Point(Point),
    Size(Size),
}

impl ChangedProperty {
    pub fn enumeration(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        ChangedProperty::Enum {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        ChangedProperty::File(path.into())
    }

    /// The attribute text for this value, before document-safe encoding.
    pub fn to_document_text(&self) -> String {
        match self {
            ChangedProperty::Bool(b) => b.to_string(),
            ChangedProperty::Int(i) => i.to_string(),
            ChangedProperty::Color(Some(color)) => color.to_hex(),
            ChangedProperty::Color(None) => String::new(),
            ChangedProperty::Enum { type_name, value } => format!("{}.{}", type_name, value),
            ChangedProperty::File(path) => path.to_string_lossy().into_owned(),
            ChangedProperty::Text(text) => text.clone(),
            ChangedProperty::Point(p) => format!("{},{}", p.x, p.y),
            ChangedProperty::Size(s) => format!("{},{}", s.width, s.height),
        }
    }

    pub fn parse_bool(text: &str) -> Option<bool> {
        match text.trim().to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    pub fn parse_int(text: &str) -> Option<i32> {
        text.trim().parse().ok()
    }

    /// An empty string is the empty color, hence the nested option.
    pub fn parse_color(text: &str) -> Option<Option<Color>> {
        let text = text.trim();
        if text.is_empty() {
            return Some(None);
        }
        Color::from_hex(text).map(Some)
    }

    /// Accepts `Type.Value` or a bare `Value`.
    pub fn parse_enum(text: &str) -> Option<String> {
        let text = text.trim();
        let value = text.rsplit('.').next().unwrap_or(text);
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn parse_point(text: &str) -> Option<Point> {
        let (x, y) = parse_pair(text)?;
        Some(Point::new(x, y))
    }

    pub fn parse_size(text: &str) -> Option<Size> {
        let (width, height) = parse_pair(text)?;
        Some(Size::new(width, height))
    }
}

fn parse_pair(text: &str) -> Option<(i32, i32)> {
    let (a, b) = text.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

impl From<bool> for ChangedProperty {
    fn from(b: bool) -> Self {
        ChangedProperty::Bool(b)
    }
}

impl From<i32> for ChangedProperty {
    fn from(i: i32) -> Self {
        ChangedProperty::Int(i)
    }
}

impl From<Color> for ChangedProperty {
    fn from(color: Color) -> Self {
        ChangedProperty::Color(Some(color))
    }
}

impl From<String> for ChangedProperty {
    fn from(s: String) -> Self {
        ChangedProperty::Text(s)
    }
}

impl From<&str> for ChangedProperty {
    fn from(s: &str) -> Self {
        ChangedProperty::Text(s.to_string())
    }
}

impl From<Point> for ChangedProperty {
    fn from(p: Point) -> Self {
        ChangedProperty::Point(p)
    }
}

impl From<Size> for ChangedProperty {
    fn from(s: Size) -> Self {
        ChangedProperty::Size(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_text_per_type() {
        assert_eq!(ChangedProperty::from(true).to_document_text(), "true");
        assert_eq!(ChangedProperty::from(-7).to_document_text(), "-7");
        assert_eq!(ChangedProperty::from(Color::rgb(1, 2, 3)).to_document_text(), "#FF010203");
        assert_eq!(ChangedProperty::Color(None).to_document_text(), "");
        assert_eq!(
            ChangedProperty::enumeration("DockStyle", "Fill").to_document_text(),
            "DockStyle.Fill"
        );
        assert_eq!(ChangedProperty::file("img/a b.png").to_document_text(), "img/a b.png");
        assert_eq!(ChangedProperty::from(Point::new(3, -4)).to_document_text(), "3,-4");
        assert_eq!(ChangedProperty::from(Size::new(10, 20)).to_document_text(), "10,20");
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(ChangedProperty::parse_bool(" True "), Some(true));
        assert_eq!(ChangedProperty::parse_bool("nope"), None);
        assert_eq!(ChangedProperty::parse_int("42"), Some(42));
        assert_eq!(ChangedProperty::parse_point("5, 6"), Some(Point::new(5, 6)));
        assert_eq!(ChangedProperty::parse_point("5"), None);
        assert_eq!(ChangedProperty::parse_size("a,b"), None);
        assert_eq!(ChangedProperty::parse_color(""), Some(None));
        assert_eq!(ChangedProperty::parse_color("#FF000000"), Some(Some(Color::BLACK)));
        assert_eq!(ChangedProperty::parse_color("black"), None);
        assert_eq!(ChangedProperty::parse_enum("DockStyle.Fill"), Some("Fill".to_string()));
        assert_eq!(ChangedProperty::parse_enum("Fill"), Some("Fill".to_string()));
        assert_eq!(ChangedProperty::parse_enum("DockStyle."), None);
    }
}
