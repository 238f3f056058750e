use crate::control::{Control, ControlType};
use crate::errors::{FragmentError, FragmentResult};
use crate::image_control::ImageControl;
use crate::serialization::fragment::Fragment;

pub fn new_control(control_type: ControlType) -> Box<dyn Control> {
    match control_type {
        ControlType::PictureBox => Box::new(ImageControl::new()),
    }
}

/// Build a control from a fragment: defaults first, then the saved attributes.
pub fn read_control(fragment: &Fragment) -> FragmentResult<Box<dyn Control>> {
    let control_type = ControlType::from_name(&fragment.tag)
        .ok_or_else(|| FragmentError::UnknownControlType(fragment.tag.clone()))?;
    let mut control = new_control(control_type);
    control.read_properties(fragment);
    Ok(control)
}

/// The fragment a control saves as: its name plus every changed property.
pub fn write_fragment(control: &dyn Control) -> Fragment {
    let mut fragment = Fragment::new(control.control_type().as_str());
    fragment.set_text("name", control.name());
    for (key, value) in control.changed_properties() {
        fragment.set_text(key, &value.to_document_text());
    }
    fragment
}

pub fn load_control(xml: &str) -> FragmentResult<Box<dyn Control>> {
    read_control(&Fragment::parse(xml)?)
}

pub fn save_control(control: &dyn Control) -> FragmentResult<String> {
    write_fragment(control).to_xml()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag() {
        let result = read_control(&Fragment::new("Spinner"));
        assert!(matches!(result, Err(FragmentError::UnknownControlType(ref tag)) if tag == "Spinner"));
    }

    #[test]
    fn test_tag_is_case_insensitive() {
        let control = load_control(r#"<picturebox name="logo"/>"#).expect("load");
        assert_eq!(control.control_type(), ControlType::PictureBox);
        assert_eq!(control.name(), "logo");
    }

    #[test]
    fn test_default_control_writes_only_name() {
        let control = new_control(ControlType::PictureBox);
        assert_eq!(save_control(control.as_ref()).expect("save"), r#"<PictureBox name="pictureBox"/>"#);
    }
}
