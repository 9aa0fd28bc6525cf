use super::common::int_field;
use super::element::Element;
use crate::errors::AppResult;
use crate::models::{Artist, Member};

/// Builds an artist record from its entity element.
///
/// Dispatch table: scalars {data_quality, name, realname, profile}, text
/// lists {aliases, namevariations, groups, urls}, plus the `members`
/// pair-grouping. Unknown tags are ignored for forward compatibility.
pub(crate) fn build_artist(id: i64, element: &Element) -> AppResult<Artist> {
    let mut artist = Artist::new(id);
    for child in &element.children {
        match child.tag.as_str() {
            "data_quality" => artist.data_quality = child.text.clone(),
            "name" => artist.name = child.text.clone(),
            "realname" => artist.realname = child.text.clone(),
            "profile" => artist.profile = child.text.clone(),
            "aliases" => artist.aliases = child.children_text(),
            "namevariations" => artist.namevariations = child.children_text(),
            "groups" => artist.groups = child.children_text(),
            "urls" => artist.urls = child.children_text(),
            "members" => artist.members = build_members(child)?,
            _ => {}
        }
    }
    Ok(artist)
}

/// Groups the flat alternating id/name leaf sequence of `<members>` into
/// pairs, e.g. `<id>26</id><name>Alexi Delano</name><id>27</id>...`.
///
/// An odd trailing id pairs with `name: None` instead of raising; a member
/// id leaf without numeric text is fatal like any other integer field.
fn build_members(element: &Element) -> AppResult<Vec<Member>> {
    let texts: Vec<Option<&str>> = element
        .children
        .iter()
        .map(|c| c.text.as_deref())
        .collect();

    let mut members = Vec::with_capacity(texts.len() / 2 + 1);
    for pair in texts.chunks(2) {
        let id = int_field("member id", pair[0].unwrap_or(""))?;
        let name = pair.get(1).and_then(|t| t.map(str::to_string));
        members.push(Member { id, name });
    }
    Ok(members)
}
