use super::element::Element;
use crate::errors::{AppError, AppResult};
use crate::models::{ImageInfo, Video};

/// Parses an integer field, failing with a fatal `NumberFormat` error.
///
/// Integer coercion failures abort the whole stream by design; there is no
/// single-record skip-and-continue.
pub(crate) fn int_field(field: &str, value: &str) -> AppResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::number_format(field, value))
}

/// Coerces an element's text content to an integer.
pub(crate) fn int_text(field: &str, element: &Element) -> AppResult<i64> {
    int_field(field, element.text.as_deref().unwrap_or(""))
}

/// Coerces an attribute to an integer when present; absence is not an error.
pub(crate) fn attr_int(element: &Element, name: &str) -> AppResult<Option<i64>> {
    match element.attr(name) {
        Some(value) => int_field(name, value).map(Some),
        None => Ok(None),
    }
}

/// Field set shared by master and release artist credits.
#[derive(Debug, Default)]
pub(crate) struct ArtistCredit {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub anv: Option<String>,
    pub join: Option<String>,
    pub role: Option<String>,
}

/// Reads the common artist-credit leaves of one `<artist>` child element.
pub(crate) fn child_artist_fields(element: &Element) -> AppResult<ArtistCredit> {
    let mut credit = ArtistCredit::default();
    for leaf in &element.children {
        match leaf.tag.as_str() {
            "id" => credit.id = Some(int_text("id", leaf)?),
            "name" => credit.name = leaf.text.clone(),
            "anv" => credit.anv = leaf.text.clone(),
            "join" => credit.join = leaf.text.clone(),
            "role" => credit.role = leaf.text.clone(),
            _ => {}
        }
    }
    Ok(credit)
}

/// Builds one image record per child element, keeping the full attribute bag.
pub(crate) fn build_images(element: &Element) -> Vec<ImageInfo> {
    element
        .children
        .iter()
        .map(|child| ImageInfo {
            attributes: child.attributes.clone(),
        })
        .collect()
}

/// Builds one video record per child element.
///
/// `title` and `description` come from child leaves, `duration` and `src`
/// from attributes; a non-numeric duration is fatal.
pub(crate) fn build_videos(element: &Element) -> AppResult<Vec<Video>> {
    let mut videos = Vec::with_capacity(element.children.len());
    for child in &element.children {
        let mut video = Video::default();
        for leaf in &child.children {
            match leaf.tag.as_str() {
                "title" => video.title = leaf.text.clone(),
                "description" => video.description = leaf.text.clone(),
                _ => {}
            }
        }
        video.duration = attr_int(child, "duration")?;
        video.src = child.attr("src").map(str::to_string);
        videos.push(video);
    }
    Ok(videos)
}
