use serde::{Deserialize, Serialize};

/// Display options for a popup bound to a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub max_height: Option<u32>,
    pub auto_close: bool,
    pub close_button: bool,
    pub class_name: String,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            max_width: 300,
            min_width: 50,
            max_height: None,
            auto_close: true,
            close_button: true,
            class_name: String::new(),
        }
    }
}

/// Popup content plus its options, as callers pass it to `add_marker`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub content: String,
    #[serde(default)]
    pub options: PopupOptions,
}

impl Popup {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            options: PopupOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PopupOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_deserializes_with_partial_options() {
        let popup: Popup =
            serde_json::from_str(r#"{"content": "<b>Hi</b>", "options": {"maxWidth": 120}}"#)
                .unwrap();

        assert_eq!(popup.content, "<b>Hi</b>");
        assert_eq!(popup.options.max_width, 120);
        assert_eq!(popup.options.min_width, 50);
        assert!(popup.options.close_button);
    }
}
