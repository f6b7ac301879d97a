use std::collections::HashMap;

/// First value of each field in an urlencoded body. Repeated fields, unknown
/// fields and a missing content type are all tolerated so a malformed
/// submission reaches the handler and becomes a no-op.
fn first_values(body: &[u8]) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for (k, v) in url::form_urlencoded::parse(body) {
        fields.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    fields
}

#[derive(Debug, Clone, Default)]
pub struct ToggleSupplierForm {
    pub supplier_id: Option<String>,
    pub next_enabled: Option<String>,
}

impl ToggleSupplierForm {
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut fields = first_values(body);
        Self {
            supplier_id: fields.remove("supplier_id"),
            next_enabled: fields.remove("next_enabled"),
        }
    }

    /// Only the literal `"true"` enables.
    pub fn wants_enabled(&self) -> bool {
        self.next_enabled.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateProductForm {
    pub title: Option<String>,
    pub source_url: Option<String>,
    pub supplier_id: Option<String>,
}

impl CreateProductForm {
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut fields = first_values(body);
        Self {
            title: fields.remove("title"),
            source_url: fields.remove("source_url"),
            supplier_id: fields.remove("supplier_id"),
        }
    }
}
