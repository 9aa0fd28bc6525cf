/// One owned XML element captured from the event stream.
///
/// This is the single-use handle the event source yields for each entity
/// element: the full subtree of one `<artist>`/`<label>`/`<master>`/`<release>`
/// and nothing outside it. It is dropped as soon as the record has been built
/// from it, which is what keeps resident parse memory bounded regardless of
/// how many entities the dump contains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            tag,
            attributes,
            text: None,
            children: Vec::new(),
        }
    }

    /// Returns the value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Returns the text content of the first direct child with the given tag.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag).and_then(|c| c.text.as_deref())
    }

    /// Collects the text of every direct child, in document order.
    ///
    /// A child without text contributes an empty string so list positions
    /// are preserved.
    pub fn children_text(&self) -> Vec<String> {
        self.children
            .iter()
            .map(|c| c.text.clone().unwrap_or_default())
            .collect()
    }

    /// Total number of nodes in this subtree, this element included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Element::node_count).sum::<usize>()
    }
}

/// Builds one owned [`Element`] subtree from a run of XML events.
///
/// The capture starts on the entity element's start tag and completes when the
/// matching end tag fires; nesting is tracked through the stack of partially
/// built elements. Only one subtree is ever held at a time.
#[derive(Debug, Default)]
pub(crate) struct SubtreeCapture {
    stack: Vec<Element>,
}

impl SubtreeCapture {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Returns true while an entity subtree is being captured.
    pub fn is_active(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Opens a new element at the current nesting depth.
    pub fn start(&mut self, tag: String, attributes: Vec<(String, String)>) {
        self.stack.push(Element::new(tag, attributes));
    }

    /// Appends text to the innermost open element.
    pub fn text(&mut self, text: &str) {
        if let Some(element) = self.stack.last_mut() {
            element.text.get_or_insert_with(String::new).push_str(text);
        }
    }

    /// Records a self-closing element as a completed child.
    ///
    /// Returns the element itself when it closes the capture (an empty entity
    /// element such as `<release id="7"/>` has no open parent).
    pub fn empty(&mut self, tag: String, attributes: Vec<(String, String)>) -> Option<Element> {
        let element = Element::new(tag, attributes);
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(element);
                None
            }
            None => Some(element),
        }
    }

    /// Closes the innermost open element.
    ///
    /// Returns the finished root subtree when the entity element itself
    /// closes, `None` while still inside it.
    pub fn end(&mut self) -> Option<Element> {
        let element = self.stack.pop()?;
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(element);
                None
            }
            None => Some(element),
        }
    }

    /// Number of nodes currently held by the capture. Zero between entities.
    pub fn resident_nodes(&self) -> usize {
        self.stack.iter().map(Element::node_count).sum()
    }
}
