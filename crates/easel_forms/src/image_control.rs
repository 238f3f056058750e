use crate::bitmap::{Bitmap, decode_or_placeholder};
use crate::control::{Color, Control, ControlBase, ControlType, Rect, ScalableControl};
use crate::properties::{ChangedProperties, ChangedProperty};
use crate::render::{DashStyle, Surface};
use crate::serialization::fragment::Fragment;
use std::fmt;
use std::iter;

/// The image half of a picture box. Every path assignment goes through
/// [`ImageSource::load`], so the bitmap always matches the path.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageSource {
    #[default]
    Empty,
    Loaded { path: String, image: Bitmap },
}

impl ImageSource {
    pub fn load(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            return ImageSource::Empty;
        }
        let image = decode_or_placeholder(&path);
        ImageSource::Loaded { path, image }
    }

    pub fn path(&self) -> &str {
        match self {
            ImageSource::Empty => "",
            ImageSource::Loaded { path, .. } => path,
        }
    }

    pub fn image(&self) -> Option<&Bitmap> {
        match self {
            ImageSource::Empty => None,
            ImageSource::Loaded { image, .. } => Some(image),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ImageProperties {
    stretch: bool,
}

/// A control that shows an image loaded from a file.
#[derive(Debug, Clone)]
pub struct ImageControl {
    pub scalable: ScalableControl,
    source: ImageSource,
    properties: ImageProperties,
    baseline: ImageProperties,
}

impl ImageControl {
    pub const BORDER_COLOR: Color = Color::BLACK;

    /// Every attribute [`Control::read_properties`] understands.
    pub const ATTRIBUTES: &'static [&'static str] =
        &["name", "location", "size", "foreColor", "backColor", "stretch", "image"];

    pub fn new() -> Self {
        let defaults = ImageProperties { stretch: false };
        Self {
            scalable: ScalableControl::new(ControlType::PictureBox),
            source: ImageSource::Empty,
            properties: defaults,
            baseline: defaults,
        }
    }

    pub fn path(&self) -> &str {
        self.source.path()
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.source = ImageSource::load(path);
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.source.image()
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn stretch(&self) -> bool {
        self.properties.stretch
    }

    pub fn set_stretch(&mut self, stretch: bool) {
        self.properties.stretch = stretch;
    }

    pub fn default_stretch(&self) -> bool {
        self.baseline.stretch
    }

    fn image_rect(&self, image: &Bitmap, bounds: Rect) -> Rect {
        if self.properties.stretch {
            bounds
        } else {
            Rect::new(bounds.location, image.size().min(bounds.size))
        }
    }
}

impl Default for ImageControl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ImageControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.scalable.base.name, self.control_type())
    }
}

impl Control for ImageControl {
    fn base(&self) -> &ControlBase {
        &self.scalable.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.scalable.base
    }

    fn changed_properties(&self) -> ChangedProperties<'_> {
        let stretch = iter::once_with(move || {
            (self.properties.stretch != self.baseline.stretch)
                .then(|| ("stretch", ChangedProperty::Bool(self.properties.stretch)))
        });
        // No default path: any image at all is a change.
        let image = iter::once_with(move || {
            let path = self.source.path();
            (!path.is_empty()).then(|| ("image", ChangedProperty::file(path)))
        });
        Box::new(self.scalable.changed_properties().chain(stretch.chain(image).flatten()))
    }

    fn render(&self, surface: &mut dyn Surface) {
        let bounds = self.base().bounds();

        if let Some(back_color) = self.base().back_color().filter(Color::is_visible) {
            surface.fill_rect(bounds, back_color);
        }

        surface.draw_rect(bounds, Self::BORDER_COLOR, 1, DashStyle::Dot);

        if let Some(image) = self.source.image() {
            let rect = self.image_rect(image, bounds);
            if self.properties.stretch {
                surface.draw_image_scaled(image, rect);
            } else {
                surface.draw_image_unscaled_clipped(image, rect);
            }
        }
    }

    fn copy(&self) -> Box<dyn Control> {
        Box::new(Self {
            scalable: self.scalable.duplicate(),
            ..self.clone()
        })
    }

    fn read_properties(&mut self, fragment: &Fragment) {
        self.scalable.read_properties(fragment);

        if let Some(stretch) = fragment.parsed("stretch", ChangedProperty::parse_bool) {
            self.properties.stretch = stretch;
        }
        if let Some(path) = fragment.trimmed_text("image") {
            self.set_path(path);
        }

        for key in fragment.unknown_keys(Self::ATTRIBUTES) {
            log::debug!("<{}>: ignoring unknown attribute {}", fragment.tag, key);
        }
    }
}
