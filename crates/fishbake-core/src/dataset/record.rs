use serde_json::Value;

/// Number of positions every baked record ends up with.
pub const FIELD_COUNT: usize = 9;
/// Zero-based slot holding the resolved image URL.
pub const IMAGE_SLOT: usize = FIELD_COUNT - 1;

/// One species, stored as the positional JSON values it was parsed from.
///
/// Layout: `[common_name, genus, species, <6 opaque fields>, image_url]`.
/// The opaque fields are carried through untouched, numbers and `null`
/// included.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRecord {
    fields: Vec<Value>,
}

impl SpeciesRecord {
    pub fn new(fields: Vec<Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn text(&self, slot: usize) -> &str {
        self.fields.get(slot).and_then(Value::as_str).unwrap_or("")
    }

    pub fn common_name(&self) -> &str {
        self.text(0)
    }

    pub fn genus(&self) -> &str {
        self.text(1)
    }

    pub fn species(&self) -> &str {
        self.text(2)
    }

    pub fn image_url(&self) -> &str {
        self.text(IMAGE_SLOT)
    }

    /// Pads (or truncates) to [`FIELD_COUNT`] and stores `url` in the image slot.
    /// `None` clears the slot to the empty string.
    pub fn set_image_url(&mut self, url: Option<&str>) {
        self.fields
            .resize(FIELD_COUNT, Value::String(String::new()));
        self.fields[IMAGE_SLOT] = Value::String(url.unwrap_or_default().to_string());
    }
}
