use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use garde::Validate;
use miette::{Diagnostic, NamedSource};
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostic::to_labels;


const EMBEDDED: &str = include_str!("../../config.toml");

/// Site-wide configuration consumed by the schema generators.
///
/// Always passed explicitly; nothing in the crate reads it from a global.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[garde(dive)]
    pub site: Site,
    #[garde(dive)]
    pub organization: Organization,
    #[garde(dive)]
    pub offices: Offices,
    #[serde(default)]
    #[garde(dive)]
    pub services: Vec<ServiceEntry>,
    #[serde(default)]
    #[garde(dive)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    #[garde(dive)]
    pub faqs: Vec<Faq>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Site {
    #[garde(url)]
    pub base_url: String,
    #[garde(length(min = 1, max = 64))]
    pub name: String,
    #[garde(length(min = 1, max = 512))]
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Organization {
    #[garde(length(min = 1, max = 128))]
    pub name: String,
    #[garde(length(min = 1, max = 128))]
    pub legal_name: Option<String>,
    #[garde(length(min = 1))]
    pub logo: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 32))]
    pub telephone: String,
    #[garde(length(min = 1, max = 512))]
    pub description: String,
    #[garde(length(min = 1), inner(url))]
    pub same_as: Vec<String>,
    #[garde(dive)]
    pub address: Address,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Address {
    #[garde(length(min = 1, max = 128))]
    pub street: String,
    #[garde(length(min = 1, max = 64))]
    pub locality: String,
    #[garde(length(min = 2, max = 2))]
    pub region: String,
    #[garde(length(min = 3, max = 10))]
    pub postal_code: String,
}

/// The two statically defined offices.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Offices {
    #[garde(dive)]
    pub toronto: Office,
    #[garde(dive)]
    pub mississauga: Office,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Office {
    #[garde(ascii, length(min = 1, max = 32))]
    pub slug: String,
    #[garde(length(min = 1, max = 128))]
    pub name: String,
    #[garde(length(min = 1, max = 64))]
    pub city: String,
    #[garde(length(min = 1, max = 32))]
    pub telephone: String,
    #[garde(email)]
    pub email: Option<String>,
    #[garde(dive)]
    pub address: Address,
    #[garde(dive)]
    pub geo: Geo,
    #[garde(length(min = 1), dive)]
    pub hours: Vec<Hours>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Geo {
    #[garde(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[garde(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// One opening-hours rule: the listed days share the same open/close times.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Hours {
    #[garde(length(min = 1))]
    pub days: Vec<DayOfWeek>,
    #[garde(custom(clock_time))]
    pub opens: String,
    #[garde(custom(clock_time))]
    pub closes: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct ServiceEntry {
    #[garde(ascii, length(min = 1, max = 64))]
    pub slug: String,
    #[garde(length(min = 1, max = 128))]
    pub name: String,
    #[garde(length(min = 1, max = 512))]
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct TeamMember {
    #[garde(length(min = 1, max = 64))]
    pub name: String,
    #[garde(length(min = 1, max = 128))]
    pub job_title: String,
    #[garde(email)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    #[garde(length(min = 1, max = 256))]
    pub question: String,
    #[garde(length(min = 1, max = 2048))]
    pub answer: String,
}

fn clock_time(value: &str, _: &()) -> garde::Result {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| garde::Error::new(format!("`{}` is not a HH:MM time", value)))
}

#[derive(Debug, Error)]
#[error("Invalid site configuration in '{name}'")]
pub struct ConfigValidationError {
    pub name: String,
    pub src: NamedSource<String>,
    pub labels: Vec<miette::LabeledSpan>,
    #[source]
    pub source: garde::Report,
}

impl Diagnostic for ConfigValidationError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new("mgasite::validation::config"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new("The following validation errors occurred:"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(self.labels.iter().cloned()))
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("could not read config file {0:?}")]
    #[diagnostic(code(mgasite::config::io))]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Error deserializing TOML: {0}")]
    #[diagnostic(code(mgasite::config::toml))]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ConfigValidationError),
}

impl SiteConfig {
    /// The configuration compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse("config.toml", EMBEDDED)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let name = path.to_string_lossy().into_owned();

        Self::parse(&name, &content)
    }

    /// Uses `path` when given, the embedded configuration otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    pub fn parse(name: &str, content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        if let Err(e) = config.validate() {
            let labels = to_labels(content, &e);
            return Err(ConfigValidationError {
                name: name.to_string(),
                src: NamedSource::new(name, content.to_string()),
                labels,
                source: e,
            }
            .into());
        }

        Ok(config)
    }

    /// Resolves a site-relative path against the base URL.
    ///
    /// Absolute `http(s)://` hrefs are returned untouched.
    pub fn url(&self, href: &str) -> String {
        if href.starts_with("https://") || href.starts_with("http://") {
            return href.to_string();
        }

        let base = self.site.base_url.trim_end_matches('/');
        if href.starts_with('/') {
            format!("{}{}", base, href)
        } else {
            format!("{}/{}", base, href)
        }
    }

    /// Fragment identifier every cross-reference to the organization uses.
    pub fn organization_id(&self) -> String {
        self.url("/#organization")
    }

    pub fn website_id(&self) -> String {
        self.url("/#website")
    }

    pub fn office_id(&self, office: &Office) -> String {
        self.url(&format!("/contact#{}", office.slug))
    }
}
