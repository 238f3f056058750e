use crate::bitmap::Bitmap;
use crate::control::{Color, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStyle {
    Solid,
    Dot,
}

/// The drawing primitives a design surface offers. Coordinates are absolute
/// pixels.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_rect(&mut self, rect: Rect, color: Color, width: u32, dash: DashStyle);

    /// Draw `image` at `rect.location` without scaling, showing at most
    /// `rect.size` of it.
    fn draw_image_unscaled_clipped(&mut self, image: &Bitmap, rect: Rect);

    /// Draw `image` scaled to exactly `rect`.
    fn draw_image_scaled(&mut self, image: &Bitmap, rect: Rect);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    DrawRect {
        rect: Rect,
        color: Color,
        width: u32,
        dash: DashStyle,
    },
    ImageClipped {
        image: Bitmap,
        rect: Rect,
    },
    ImageScaled {
        image: Bitmap,
        rect: Rect,
    },
}

impl DrawCommand {
    pub fn rect(&self) -> Rect {
        match self {
            DrawCommand::FillRect { rect, .. }
            | DrawCommand::DrawRect { rect, .. }
            | DrawCommand::ImageClipped { rect, .. }
            | DrawCommand::ImageScaled { rect, .. } => *rect,
        }
    }

    pub fn image(&self) -> Option<&Bitmap> {
        match self {
            DrawCommand::ImageClipped { image, .. } | DrawCommand::ImageScaled { image, .. } => Some(image),
            _ => None,
        }
    }
}

/// Surface that keeps a display list instead of rasterizing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, width: u32, dash: DashStyle) {
        self.commands.push(DrawCommand::DrawRect { rect, color, width, dash });
    }

    fn draw_image_unscaled_clipped(&mut self, image: &Bitmap, rect: Rect) {
        self.commands.push(DrawCommand::ImageClipped {
            image: image.clone(),
            rect,
        });
    }

    fn draw_image_scaled(&mut self, image: &Bitmap, rect: Rect) {
        self.commands.push(DrawCommand::ImageScaled {
            image: image.clone(),
            rect,
        });
    }
}
