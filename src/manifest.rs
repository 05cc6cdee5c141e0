/// Web app manifest `icons` entries for generated files

use serde::Serialize;

use crate::generator::GeneratedIcon;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub purpose: String,
}

impl ManifestIcon {
    pub fn for_icon(icon: &GeneratedIcon) -> Self {
        Self {
            src: icon.file_name(),
            sizes: format!("{0}x{0}", icon.size),
            mime_type: "image/png".to_string(),
            purpose: "any".to_string(),
        }
    }
}

pub fn icons_for(icons: &[GeneratedIcon]) -> Vec<ManifestIcon> {
    icons.iter().map(ManifestIcon::for_icon).collect()
}

/// Pretty JSON `{"icons": [...]}` snippet ready to merge into a manifest.
pub fn to_json(icons: &[GeneratedIcon]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({ "icons": icons_for(icons) }))
}
