// Kahako Surface Descriptor
// Static facts about an editable region, consumed by the eligibility filter

use indexmap::IndexMap;

/// The broad family an editable region belongs to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum SurfaceKind {
    /// Single-line field (`<input>`-like)
    #[strum(to_string = "line_input", serialize = "input", serialize = "line")]
    LineInput,
    /// Multi-line plain text field (`<textarea>`-like)
    #[strum(to_string = "multiline_input", serialize = "textarea", serialize = "multiline")]
    MultilineInput,
    /// Rich-text editable region (contenteditable-like)
    #[strum(to_string = "rich_text", serialize = "contenteditable", serialize = "rich")]
    RichText,
}

/// Type tag of a line input
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum InputType {
    #[default]
    Text,
    Search,
    Tel,
    Email,
    Password,
    Url,
    Number,
    Other(String),
}

impl InputType {
    /// Parse a type tag; unknown tags are preserved as `Other`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "text" => InputType::Text,
            "search" => InputType::Search,
            "tel" | "telephone" => InputType::Tel,
            "email" => InputType::Email,
            "password" => InputType::Password,
            "url" => InputType::Url,
            "number" => InputType::Number,
            other => InputType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            InputType::Text => "text",
            InputType::Search => "search",
            InputType::Tel => "tel",
            InputType::Email => "email",
            InputType::Password => "password",
            InputType::Url => "url",
            InputType::Number => "number",
            InputType::Other(s) => s,
        }
    }

    /// Whether free text typed into this kind of line input may be Hawaiian
    pub fn accepts_free_text(&self) -> bool {
        matches!(self, InputType::Text | InputType::Search | InputType::Tel)
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Description of an editable surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceDescriptor {
    pub kind: SurfaceKind,
    pub read_only: bool,
    pub disabled: bool,
    /// Only meaningful for `SurfaceKind::LineInput`
    pub input_type: InputType,
    pub id: Option<String>,
    pub name: Option<String>,
    pub classes: Vec<String>,
    /// Any other attributes, in declaration order
    pub attributes: IndexMap<String, String>,
}

impl SurfaceDescriptor {
    pub fn new(kind: SurfaceKind) -> Self {
        Self {
            kind,
            read_only: false,
            disabled: false,
            input_type: InputType::Text,
            id: None,
            name: None,
            classes: Vec::new(),
            attributes: IndexMap::new(),
        }
    }

    pub fn line_input(input_type: &str) -> Self {
        let mut desc = Self::new(SurfaceKind::LineInput);
        desc.input_type = InputType::parse(input_type);
        desc
    }

    pub fn multiline_input() -> Self {
        Self::new(SurfaceKind::MultilineInput)
    }

    pub fn rich_text() -> Self {
        Self::new(SurfaceKind::RichText)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Look up an attribute, including the well-known ones stored as fields.
    ///
    /// Attribute names are case-insensitive.
    pub fn attribute(&self, key: &str) -> Option<String> {
        let key = key.to_lowercase();
        match key.as_str() {
            "id" => self.id.clone(),
            "name" => self.name.clone(),
            "class" => (!self.classes.is_empty()).then(|| self.classes.join(" ")),
            "type" if self.kind == SurfaceKind::LineInput => Some(self.input_type.to_string()),
            _ => self
                .attributes
                .iter()
                .find(|(name, _)| name.to_lowercase() == key)
                .map(|(_, value)| value.clone()),
        }
    }
}

impl Default for SurfaceDescriptor {
    fn default() -> Self {
        Self::multiline_input()
    }
}
