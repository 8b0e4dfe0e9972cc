//! Inline snippet for the page `<head>`.
//!
//! The wasm module loads after first paint, so a page that wants the stored
//! theme applied without a flash embeds this script ahead of its stylesheet.
//! It performs the same validation as [`crate::theme::ThemeController::init`].

use crate::config::InteractConfig;

/// `<script>` element applying a valid stored theme before CSS paints.
///
/// Returns an empty string when the theme controller is disabled.
pub fn theme_init_script(config: &InteractConfig) -> String {
    if !config.theme_enabled {
        return String::new();
    }
    let key = js_string(&config.storage_key);
    let attribute = js_string(&config.theme_attribute);
    format!(
        "<script>(function(){{\
try{{var s=localStorage.getItem({key});}}catch(e){{return;}}\
if(s==='light'||s==='dark')document.documentElement.setAttribute({attribute},s);\
}}());</script>"
    )
}

/// JSON string literal that is also safe inside an inline `<script>`.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_reads_configured_key_and_attribute() {
        let script = theme_init_script(&InteractConfig::default());
        assert!(script.starts_with("<script>"), "got {script}");
        assert!(script.ends_with("</script>"), "got {script}");
        assert!(script.contains("localStorage.getItem(\"docsite-theme\")"));
        assert!(script.contains("setAttribute(\"data-theme\",s)"));
    }

    #[test]
    fn script_only_accepts_valid_themes() {
        let script = theme_init_script(&InteractConfig::default());
        assert!(script.contains("s==='light'||s==='dark'"));
    }

    #[test]
    fn script_omitted_without_theme_controller() {
        assert_eq!(theme_init_script(&InteractConfig::lenient_site()), "");
    }

    #[test]
    fn script_escapes_closing_tags_in_key() {
        let config = InteractConfig {
            storage_key: "x</script><b>".to_string(),
            ..InteractConfig::default()
        };
        let script = theme_init_script(&config);
        assert_eq!(script.matches("</script>").count(), 1, "got {script}");
        assert!(script.contains("\"x<\\/script><b>\""));
    }
}
