use crate::properties::{ChangedProperties, ChangedProperty};
use crate::render::Surface;
use crate::serialization::fragment::Fragment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Point) -> Point {
        Point::new(self.x.saturating_add(by.x), self.y.saturating_add(by.y))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Per-axis minimum of two sizes.
    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub location: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(location: Point, size: Size) -> Self {
        Self { location, size }
    }

    pub fn x(&self) -> i32 {
        self.location.x
    }

    pub fn y(&self) -> i32 {
        self.location.y
    }

    pub fn right(&self) -> i32 {
        self.location.x.saturating_add(self.size.width)
    }

    pub fn bottom(&self) -> i32 {
        self.location.y.saturating_add(self.size.height)
    }
}

/// ARGB color. Properties store `Option<Color>`; `None` is the empty color and
/// is never painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xff, r, g, b)
    }

    pub fn is_visible(&self) -> bool {
        self.a > 0
    }

    /// Formats as `#AARRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }

    /// Accepts `#AARRGGBB` and `#RRGGBB` (opaque).
    pub fn from_hex(text: &str) -> Option<Color> {
        let hex = text.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            8 => Some(Color::argb(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlType {
    PictureBox,
}

impl ControlType {
    /// Parse a control type name (case-insensitive).
    pub fn from_name(name: &str) -> Option<ControlType> {
        match name.to_lowercase().as_str() {
            "picturebox" => Some(ControlType::PictureBox),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlType::PictureBox => "PictureBox",
        }
    }

    pub fn default_name_prefix(&self) -> &'static str {
        match self {
            ControlType::PictureBox => "pictureBox",
        }
    }

    pub fn default_size(&self) -> Size {
        match self {
            ControlType::PictureBox => Size::new(100, 100),
        }
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The visual properties every control shares. One value holds the live state,
/// a second one is frozen at construction as the comparison baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseProperties {
    pub location: Point,
    pub size: Size,
    pub fore_color: Option<Color>,
    pub back_color: Option<Color>,
}

impl BaseProperties {
    pub fn for_type(control_type: ControlType) -> Self {
        Self {
            location: Point::default(),
            size: control_type.default_size(),
            fore_color: None,
            back_color: None,
        }
    }
}

fn changed<T, F>(current: T, baseline: T, key: &'static str, wrap: F) -> Option<(&'static str, ChangedProperty)>
where
    T: PartialEq,
    F: FnOnce(T) -> ChangedProperty,
{
    (current != baseline).then(|| (key, wrap(current)))
}

/// Lazily yields the base properties that differ from `baseline`.
/// Size is left to [`ScalableControl`].
pub fn diff_base(current: BaseProperties, baseline: BaseProperties) -> impl Iterator<Item = (&'static str, ChangedProperty)> {
    iter::once_with(move || changed(current.location, baseline.location, "location", ChangedProperty::Point))
        .chain(iter::once_with(move || {
            changed(current.fore_color, baseline.fore_color, "foreColor", ChangedProperty::Color)
        }))
        .chain(iter::once_with(move || {
            changed(current.back_color, baseline.back_color, "backColor", ChangedProperty::Color)
        }))
        .flatten()
}

/// State shared by every control, embedded by value in each concrete type.
#[derive(Debug, Clone)]
pub struct ControlBase {
    pub id: Uuid,
    pub name: String,
    control_type: ControlType,
    /// Origin of the containing surface; absolute bounds are relative to it.
    pub parent_offset: Point,
    properties: BaseProperties,
    baseline: BaseProperties,
}

impl ControlBase {
    pub fn new(control_type: ControlType) -> Self {
        Self::with_defaults(control_type, BaseProperties::for_type(control_type))
    }

    pub fn with_defaults(control_type: ControlType, defaults: BaseProperties) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: control_type.default_name_prefix().to_string(),
            control_type,
            parent_offset: Point::default(),
            properties: defaults,
            baseline: defaults,
        }
    }

    pub fn control_type(&self) -> ControlType {
        self.control_type
    }

    pub fn properties(&self) -> &BaseProperties {
        &self.properties
    }

    pub fn defaults(&self) -> &BaseProperties {
        &self.baseline
    }

    pub fn location(&self) -> Point {
        self.properties.location
    }

    pub fn set_location(&mut self, location: Point) {
        self.properties.location = location;
    }

    pub fn size(&self) -> Size {
        self.properties.size
    }

    /// Unclamped; outside the crate sizes go through [`ScalableControl::set_size`].
    pub(crate) fn set_size(&mut self, size: Size) {
        self.properties.size = size;
    }

    pub fn fore_color(&self) -> Option<Color> {
        self.properties.fore_color
    }

    pub fn set_fore_color(&mut self, color: Option<Color>) {
        self.properties.fore_color = color;
    }

    pub fn back_color(&self) -> Option<Color> {
        self.properties.back_color
    }

    pub fn set_back_color(&mut self, color: Option<Color>) {
        self.properties.back_color = color;
    }

    pub fn absolute_location(&self) -> Point {
        self.properties.location.offset(self.parent_offset)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.absolute_location(), self.properties.size)
    }

    pub fn changed_properties(&self) -> impl Iterator<Item = (&'static str, ChangedProperty)> {
        diff_base(self.properties, self.baseline)
    }

    /// Duplicate for a copy/paste operation: same properties and baseline,
    /// fresh identity.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// Apply the base attributes of `fragment`. Missing or malformed
    /// attributes leave the current value untouched.
    pub fn read_properties(&mut self, fragment: &Fragment) {
        if let Some(name) = fragment.text("name") {
            self.name = name;
        }
        if let Some(location) = fragment.parsed("location", ChangedProperty::parse_point) {
            self.properties.location = location;
        }
        if let Some(size) = fragment.parsed("size", ChangedProperty::parse_size) {
            self.properties.size = size;
        }
        if let Some(color) = fragment.parsed("foreColor", ChangedProperty::parse_color) {
            self.properties.fore_color = color;
        }
        if let Some(color) = fragment.parsed("backColor", ChangedProperty::parse_color) {
            self.properties.back_color = color;
        }
    }
}

/// A control whose size can be changed freely on the canvas and follows the
/// designer's zoom level.
#[derive(Debug, Clone)]
pub struct ScalableControl {
    pub base: ControlBase,
}

impl ScalableControl {
    pub const MIN_SIZE: Size = Size::new(1, 1);

    pub fn new(control_type: ControlType) -> Self {
        Self {
            base: ControlBase::new(control_type),
        }
    }

    pub fn size(&self) -> Size {
        self.base.size()
    }

    pub fn default_size(&self) -> Size {
        self.base.defaults().size
    }

    /// Resize, clamped to [`Self::MIN_SIZE`].
    pub fn set_size(&mut self, size: Size) {
        self.base.set_size(Size::new(
            size.width.max(Self::MIN_SIZE.width),
            size.height.max(Self::MIN_SIZE.height),
        ));
    }

    /// Absolute bounds as they appear on a canvas zoomed by `zoom`.
    pub fn scaled_bounds(&self, zoom: f32) -> Rect {
        let bounds = self.base.bounds();
        let scale = |v: i32| (v as f32 * zoom).round() as i32;
        Rect::new(
            Point::new(scale(bounds.x()), scale(bounds.y())),
            Size::new(scale(bounds.size.width), scale(bounds.size.height)),
        )
    }

    pub fn changed_properties(&self) -> impl Iterator<Item = (&'static str, ChangedProperty)> {
        let size = self.size();
        let default_size = self.default_size();
        self.base
            .changed_properties()
            .chain(iter::once_with(move || changed(size, default_size, "size", ChangedProperty::Size)).flatten())
    }

    pub fn duplicate(&self) -> Self {
        Self {
            base: self.base.duplicate(),
        }
    }

    pub fn read_properties(&mut self, fragment: &Fragment) {
        self.base.read_properties(fragment);
        // Re-apply through the clamping setter.
        self.set_size(self.base.size());
    }
}

/// The capability set every design-time control provides.
pub trait Control: fmt::Debug + fmt::Display {
    fn base(&self) -> &ControlBase;

    fn base_mut(&mut self) -> &mut ControlBase;

    /// Properties whose value differs from the construction-time defaults, in
    /// a stable order. Each call starts a fresh walk over the current state.
    fn changed_properties(&self) -> ChangedProperties<'_>;

    /// Draw onto `surface`. Never fails and never mutates the control.
    fn render(&self, surface: &mut dyn Surface);

    /// An independent duplicate of the same concrete type. The name is kept;
    /// callers are expected to make it unique.
    fn copy(&self) -> Box<dyn Control>;

    /// Hydrate from a document fragment. Missing attributes keep their value.
    fn read_properties(&mut self, fragment: &Fragment);

    fn name(&self) -> &str {
        &self.base().name
    }

    fn control_type(&self) -> ControlType {
        self.base().control_type()
    }
}
