use std::sync::Arc;

use crate::config::ServerConfig;
use crate::form::{FormError, FormGenerator, FormRenderer, Generator, RenderProfile};

/// Shared application state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn Generator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, FormError> {
        let generator = build_generator(config)?;
        Ok(Self::new(Arc::new(generator)))
    }
}

/// Form 'A' generator for the configured profile, fields and output path.
pub fn build_generator(config: &ServerConfig) -> Result<FormGenerator, FormError> {
    let renderer = FormRenderer::form_a(RenderProfile::named(config.profile))?;
    log::info!(
        "Form renderer ready (profile: {}, output: {})",
        config.profile,
        config.output_path().display()
    );
    Ok(FormGenerator::new(
        renderer,
        config.fields.clone(),
        config.output_path(),
    ))
}
