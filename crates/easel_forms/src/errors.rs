#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("No image path given")]
    EmptyPath,
}

#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Document contains no element")]
    NoElement,
    #[error("Unknown control type: {0}")]
    UnknownControlType(String),
}

pub type FragmentResult<T> = Result<T, FragmentError>;
