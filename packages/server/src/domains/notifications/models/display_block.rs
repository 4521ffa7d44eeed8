/// One block of a chat message, independent of any particular chat API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    /// A paragraph of markup text.
    Section { text: String },
    /// A row of small images and text fragments.
    Context { elements: Vec<ContextElement> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextElement {
    Image { image_url: String, alt_text: String },
    Text { text: String },
}

impl DisplayBlock {
    pub fn section(text: impl Into<String>) -> Self {
        Self::Section { text: text.into() }
    }
}
