//! Arguments and helpers shared by the `generate` and `check` commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, warn};
use tsgen_core::{
    ClientSuffix, Config, DateType, Diagnostic, Document, EnumStyle, GenerationOutput,
    MethodNameStyle, NullableType, PropertyNameStyle, generate,
};

/// Input document, configuration file and per-option overrides.
#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// OpenAPI document (JSON or YAML)
    #[arg(long, short, value_name = "FILE")]
    pub input: PathBuf,

    /// Configuration file (.toml, .json, .yaml or .yml)
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Type for date and date-time strings
    #[arg(long, value_name = "string|Date")]
    pub date_type: Option<DateType>,

    /// Enumeration declaration style
    #[arg(long, value_name = "constObject|union|enum")]
    pub enum_type: Option<EnumStyle>,

    /// Property naming in generated declarations
    #[arg(long, value_name = "original|camelCase")]
    pub property_name_style: Option<PropertyNameStyle>,

    /// Bottom value appended to nullable types
    #[arg(long, value_name = "null|undefined")]
    pub nullable_type: Option<NullableType>,

    /// Suffix for generated client class names
    #[arg(long, value_name = "Client|Api")]
    pub client_suffix: Option<ClientSuffix>,

    /// How client method names are derived
    #[arg(long, value_name = "operationId")]
    pub method_name_style: Option<MethodNameStyle>,
}

impl GeneratorArgs {
    /// Configuration file contents (or defaults) with flag overrides applied.
    pub fn effective_config(&self) -> Result<Config, String> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => Config::default(),
        };

        if let Some(value) = self.date_type {
            config.date_type = value;
        }
        if let Some(value) = self.enum_type {
            config.enum_type = value;
        }
        if let Some(value) = self.property_name_style {
            config.property_name_style = value;
        }
        if let Some(value) = self.nullable_type {
            config.nullable_type = value;
        }
        if let Some(value) = self.client_suffix {
            config.client_suffix = value;
        }
        if let Some(value) = self.method_name_style {
            config.method_name_style = value;
        }

        debug!(?config, "Resolved configuration.");
        Ok(config)
    }

    /// Read and parse the input document.
    pub fn read_document(&self) -> Result<Document, String> {
        let text = fs::read_to_string(&self.input)
            .map_err(|e| format!("Failed to read {}: {e}", self.input.display()))?;
        Document::parse(&text).map_err(|e| format!("{}: {e}", self.input.display()))
    }

    /// Load everything and run one generation pass. Diagnostics are logged.
    pub fn run_generator(&self) -> Result<GenerationOutput, String> {
        let config = self.effective_config()?;
        let document = self.read_document()?;
        let output = generate(&document, &config)
            .map_err(|e| format!("{}: {e}", self.input.display()))?;
        report_diagnostics(&output.diagnostics);
        Ok(output)
    }
}

/// Parse a configuration file, picking the format from its extension.
pub fn load_config_file(path: &Path) -> Result<Config, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(Config::default());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let parsed = match extension.as_str() {
        "toml" => toml::from_str::<Config>(&text).map_err(|e| e.to_string()),
        "json" => serde_json::from_str::<Config>(&text).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str::<Config>(&text).map_err(|e| e.to_string()),
        other => {
            return Err(format!(
                "Unsupported config format `{other}` for {}; use .toml, .json, .yaml or .yml",
                path.display()
            ));
        }
    };
    parsed.map_err(|e| format!("Invalid config {}: {e}", path.display()))
}

/// Log each diagnostic at warn level.
pub fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        warn!("{diagnostic}");
    }
}
