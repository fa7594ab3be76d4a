use serde::Deserialize;

/// Identity of the service whose errors are being normalized
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Service name, used to derive the error label
    #[serde(default)]
    pub name: Option<String>,
    /// Explicit envelope `message` label, overriding the derived one
    #[serde(default)]
    pub error_label: Option<String>,
}

impl ServiceConfig {
    /// Label placed in the `message` field of every envelope
    ///
    /// `billing-api` becomes `BILLING_API_SERVICE_ERROR`; without a name the
    /// label is plain `SERVICE_ERROR`.
    pub fn error_label(&self) -> String {
        if let Some(ref label) = self.error_label {
            return label.clone();
        }

        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                let prefix: String = name
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
                    .collect();
                format!("{prefix}_SERVICE_ERROR")
            }
            _ => "SERVICE_ERROR".to_owned(),
        }
    }
}
