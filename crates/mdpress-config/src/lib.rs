//! Configuration management for mdpress.
//!
//! Parses `mdpress.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support `~`, `${VAR}` and `${VAR:-default}`:
//!
//! - `input.path`
//! - `html.output`
//! - `pdf.output`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown input file.
    pub input: Option<PathBuf>,
    /// Override HTML output file.
    pub html_output: Option<PathBuf>,
    /// Override PDF output file.
    pub pdf_output: Option<PathBuf>,
    /// Override HTML document title.
    pub title: Option<String>,
    /// Override whether the HTML output is opened in a browser.
    pub open_browser: Option<bool>,
    /// Override PDF front-end.
    pub engine: Option<PdfEngine>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpress.toml";

const DEFAULT_INPUT: &str = "PROJECT_REPORT.md";
const DEFAULT_HTML_OUTPUT: &str = "PROJECT_REPORT.html";
const DEFAULT_PDF_OUTPUT: &str = "PROJECT_REPORT.pdf";
const DEFAULT_MARGIN_CM: f32 = 2.0;

/// Front-end used to turn markdown into printable blocks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfEngine {
    /// Line-oriented markdown subset parser.
    #[default]
    Lines,
    /// Full CommonMark parser.
    Cmark,
}

impl FromStr for PdfEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "cmark" => Ok(Self::Cmark),
            other => Err(format!(
                "unknown engine '{other}' (expected 'lines' or 'cmark')"
            )),
        }
    }
}

impl fmt::Display for PdfEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lines => "lines",
            Self::Cmark => "cmark",
        })
    }
}

/// Paper size for PDF output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// ISO A4, 210 × 297 mm.
    #[default]
    A4,
    /// US Letter, 8.5 × 11 in.
    Letter,
}

impl PageSize {
    /// Page width and height in centimetres.
    #[must_use]
    pub fn dimensions_cm(self) -> (f32, f32) {
        match self {
            Self::A4 => (21.0, 29.7),
            Self::Letter => (21.59, 27.94),
        }
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input configuration (path is a relative string from TOML).
    input: InputConfigRaw,
    /// HTML output configuration (path is a relative string from TOML).
    html: HtmlConfigRaw,
    /// PDF output configuration (path is a relative string from TOML).
    pdf: PdfConfigRaw,

    /// Resolved markdown input file (set after loading).
    #[serde(skip)]
    pub input_path: PathBuf,
    /// Resolved HTML configuration (set after loading).
    #[serde(skip)]
    pub html_resolved: HtmlConfig,
    /// Resolved PDF configuration (set after loading).
    #[serde(skip)]
    pub pdf_resolved: PdfConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw input configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct InputConfigRaw {
    path: Option<String>,
}

/// Raw HTML configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HtmlConfigRaw {
    output: Option<String>,
    title: Option<String>,
    print_button: Option<bool>,
    open_browser: Option<bool>,
}

/// Raw PDF configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PdfConfigRaw {
    output: Option<String>,
    engine: Option<PdfEngine>,
    page_size: Option<PageSize>,
    margin_cm: Option<f32>,
}

/// Resolved HTML output configuration.
#[derive(Debug, Default, Clone)]
pub struct HtmlConfig {
    /// HTML file to write.
    pub output: PathBuf,
    /// Document title. Falls back to the first H1 when unset.
    pub title: Option<String>,
    /// Whether to include the floating print button.
    pub print_button: bool,
    /// Whether to open the result in the default browser.
    pub open_browser: bool,
}

/// Resolved PDF output configuration.
#[derive(Debug, Default, Clone)]
pub struct PdfConfig {
    /// PDF file to write.
    pub output: PathBuf,
    /// Markdown front-end.
    pub engine: PdfEngine,
    /// Paper size.
    pub page_size: PageSize,
    /// Margin on all four sides, in centimetres.
    pub margin_cm: f32,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`pdf.output`").
        field: String,
        /// Error message (e.g., "${`OUT_DIR`} not set").
        message: String,
    },
}

/// Require an optional string field, when present, to be non-empty.
fn require_non_empty(value: Option<&str>, field: &str) -> Result<(), ConfigError> {
    if value.is_some_and(|v| v.trim().is_empty()) {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpress.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(input) = &settings.input {
            self.input_path.clone_from(input);
        }
        if let Some(output) = &settings.html_output {
            self.html_resolved.output.clone_from(output);
        }
        if let Some(output) = &settings.pdf_output {
            self.pdf_resolved.output.clone_from(output);
        }
        if let Some(title) = &settings.title {
            self.html_resolved.title = Some(title.clone());
        }
        if let Some(open_browser) = settings.open_browser {
            self.html_resolved.open_browser = open_browser;
        }
        if let Some(engine) = settings.engine {
            self.pdf_resolved.engine = engine;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            input: InputConfigRaw::default(),
            html: HtmlConfigRaw::default(),
            pdf: PdfConfigRaw::default(),
            input_path: base.join(DEFAULT_INPUT),
            html_resolved: HtmlConfig {
                output: base.join(DEFAULT_HTML_OUTPUT),
                title: None,
                print_button: true,
                open_browser: true,
            },
            pdf_resolved: PdfConfig {
                output: base.join(DEFAULT_PDF_OUTPUT),
                engine: PdfEngine::default(),
                page_size: PageSize::default(),
                margin_cm: DEFAULT_MARGIN_CM,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(self.input.path.as_deref(), "input.path")?;
        require_non_empty(self.html.output.as_deref(), "html.output")?;
        require_non_empty(self.pdf.output.as_deref(), "pdf.output")?;
        self.validate_pdf()?;
        Ok(())
    }

    /// Validate PDF page setup.
    fn validate_pdf(&self) -> Result<(), ConfigError> {
        let margin = self.pdf_resolved.margin_cm;
        if margin.is_nan() || margin <= 0.0 {
            return Err(ConfigError::Validation(
                "pdf.margin_cm must be greater than 0".to_owned(),
            ));
        }

        let (width, height) = self.pdf_resolved.page_size.dimensions_cm();
        if margin * 2.0 >= width.min(height) {
            return Err(ConfigError::Validation(format!(
                "pdf.margin_cm leaves no room for content on a {width} × {height} cm page"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.input.path {
            self.input.path = Some(expand::expand_env(path, "input.path")?);
        }
        if let Some(ref output) = self.html.output {
            self.html.output = Some(expand::expand_env(output, "html.output")?);
        }
        if let Some(ref output) = self.pdf.output {
            self.pdf.output = Some(expand::expand_env(output, "pdf.output")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and apply defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.input_path = resolve(self.input.path.as_deref(), DEFAULT_INPUT);

        self.html_resolved = HtmlConfig {
            output: resolve(self.html.output.as_deref(), DEFAULT_HTML_OUTPUT),
            title: self
                .html
                .title
                .clone()
                .filter(|title| !title.trim().is_empty()),
            print_button: self.html.print_button.unwrap_or(true),
            open_browser: self.html.open_browser.unwrap_or(true),
        };

        self.pdf_resolved = PdfConfig {
            output: resolve(self.pdf.output.as_deref(), DEFAULT_PDF_OUTPUT),
            engine: self.pdf.engine.unwrap_or_default(),
            page_size: self.pdf.page_size.unwrap_or_default(),
            margin_cm: self.pdf.margin_cm.unwrap_or(DEFAULT_MARGIN_CM),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.input_path, PathBuf::from("/test/PROJECT_REPORT.md"));
        assert_eq!(
            config.html_resolved.output,
            PathBuf::from("/test/PROJECT_REPORT.html")
        );
        assert_eq!(
            config.pdf_resolved.output,
            PathBuf::from("/test/PROJECT_REPORT.pdf")
        );
        assert!(config.html_resolved.open_browser);
        assert!(config.html_resolved.print_button);
        assert_eq!(config.html_resolved.title, None);
        assert_eq!(config.pdf_resolved.engine, PdfEngine::Lines);
        assert_eq!(config.pdf_resolved.page_size, PageSize::A4);
        assert!((config.pdf_resolved.margin_cm - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.input_path,
            PathBuf::from("/project/PROJECT_REPORT.md")
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[input]
path = "docs/report.md"

[html]
output = "out/report.html"
title = "Smart Plug Project Report"
print_button = false
open_browser = false

[pdf]
output = "out/report.pdf"
engine = "cmark"
page_size = "letter"
margin_cm = 1.5
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.input_path, PathBuf::from("/project/docs/report.md"));
        assert_eq!(
            config.html_resolved.output,
            PathBuf::from("/project/out/report.html")
        );
        assert_eq!(
            config.html_resolved.title.as_deref(),
            Some("Smart Plug Project Report")
        );
        assert!(!config.html_resolved.print_button);
        assert!(!config.html_resolved.open_browser);
        assert_eq!(
            config.pdf_resolved.output,
            PathBuf::from("/project/out/report.pdf")
        );
        assert_eq!(config.pdf_resolved.engine, PdfEngine::Cmark);
        assert_eq!(config.pdf_resolved.page_size, PageSize::Letter);
        assert!((config.pdf_resolved.margin_cm - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_title_is_unset() {
        let mut config: Config = toml::from_str("[html]\ntitle = \"  \"").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.html_resolved.title, None);
    }

    #[test]
    fn test_unknown_engine_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[pdf]\nengine = \"weasyprint\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_from_str() {
        assert_eq!("lines".parse::<PdfEngine>(), Ok(PdfEngine::Lines));
        assert_eq!("CMARK".parse::<PdfEngine>(), Ok(PdfEngine::Cmark));
        assert!("html".parse::<PdfEngine>().is_err());
        assert_eq!(PdfEngine::Cmark.to_string(), "cmark");
    }

    #[test]
    fn test_empty_output_is_invalid() {
        let mut config: Config = toml::from_str("[pdf]\noutput = \"\"").unwrap();
        config.resolve_paths(Path::new("/project"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("pdf.output"));
    }

    #[test]
    fn test_zero_margin_is_invalid() {
        let mut config: Config = toml::from_str("[pdf]\nmargin_cm = 0.0").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_oversized_margin_is_invalid() {
        let mut config: Config = toml::from_str("[pdf]\nmargin_cm = 11.0").unwrap();
        config.resolve_paths(Path::new("/project"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("no room"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            input: Some(PathBuf::from("/custom/in.md")),
            pdf_output: Some(PathBuf::from("/custom/out.pdf")),
            open_browser: Some(false),
            engine: Some(PdfEngine::Cmark),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.input_path, PathBuf::from("/custom/in.md"));
        assert_eq!(config.pdf_resolved.output, PathBuf::from("/custom/out.pdf"));
        assert!(!config.html_resolved.open_browser);
        assert_eq!(config.pdf_resolved.engine, PdfEngine::Cmark);
        // Unchanged
        assert_eq!(
            config.html_resolved.output,
            PathBuf::from("/test/PROJECT_REPORT.html")
        );
    }

    #[test]
    fn test_cli_title_overrides_file_title() {
        let mut config: Config = toml::from_str("[html]\ntitle = \"From file\"").unwrap();
        config.resolve_paths(Path::new("/project"));
        config.apply_cli_settings(&CliSettings {
            title: Some("From CLI".to_owned()),
            ..Default::default()
        });
        assert_eq!(config.html_resolved.title.as_deref(), Some("From CLI"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdpress.toml");
        std::fs::write(
            &path,
            "[input]\npath = \"${MDPRESS_TEST_SURELY_UNSET_VAR:-notes}.md\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.input_path, dir.path().join("notes.md"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdpress.toml");
        std::fs::write(&path, "[pdf\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }
}
