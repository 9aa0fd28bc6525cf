use super::common::build_images;
use super::element::Element;
use crate::errors::AppResult;
use crate::models::Label;

/// Builds a label record from its entity element.
///
/// Scalars {data_quality, contactinfo, name, profile, parentLabel}, text
/// lists {sublabels, urls}, structured list {images}. `parentLabel` is an
/// unresolved cross-reference and passed through verbatim.
pub(crate) fn build_label(id: i64, element: &Element) -> AppResult<Label> {
    let mut label = Label::new(id);
    for child in &element.children {
        match child.tag.as_str() {
            "data_quality" => label.data_quality = child.text.clone(),
            "contactinfo" => label.contactinfo = child.text.clone(),
            "name" => label.name = child.text.clone(),
            "profile" => label.profile = child.text.clone(),
            "parentLabel" => label.parent_label = child.text.clone(),
            "sublabels" => label.sublabels = child.children_text(),
            "urls" => label.urls = child.children_text(),
            "images" => label.images = build_images(child),
            _ => {}
        }
    }
    Ok(label)
}
