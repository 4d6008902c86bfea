//! Page templates, compiled into the binary and registered once at startup.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

pub const LOGIN: &str = "login";
pub const REGISTER: &str = "register";
pub const HOME: &str = "home";
pub const STRENGTH: &str = "strength";

const SOURCES: [(&str, &str); 6] = [
    ("header", include_str!("../../templates/header.hbs")),
    ("footer", include_str!("../../templates/footer.hbs")),
    (STRENGTH, include_str!("../../templates/strength.hbs")),
    (LOGIN, include_str!("../../templates/login.hbs")),
    (REGISTER, include_str!("../../templates/register.hbs")),
    (HOME, include_str!("../../templates/home.hbs")),
];

/// Registered templates. `header`, `footer` and `strength` double as
/// partials for the pages.
pub struct Templates {
    hbs: Handlebars<'static>,
}

impl Templates {
    /// # Errors
    /// Returns an error if a template does not parse.
    pub fn new() -> Result<Self> {
        let mut hbs = Handlebars::new();

        for (name, source) in SOURCES {
            hbs.register_template_string(name, source)
                .with_context(|| format!("Failed to register template {name}"))?;
        }

        Ok(Self { hbs })
    }

    /// # Errors
    /// Returns an error if the template is unknown or fails to render.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        self.hbs
            .render(name, context)
            .with_context(|| format!("Failed to render template {name}"))
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("templates", &self.hbs.get_templates().len())
            .finish()
    }
}
