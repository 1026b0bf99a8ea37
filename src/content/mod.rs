use std::{
    collections::BTreeSet,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use garde::Validate;
use miette::{Diagnostic, NamedSource};
use schemars::JsonSchema;
use serde_derive::{Deserialize, Serialize};
use strum_macros::VariantArray;
use thiserror::Error;

use crate::diagnostic::to_labels;
use crate::schema::{ArticleMetadata, PageMetadata};

#[cfg(test)]
mod tests;

#[derive(Serialize, Deserialize, Debug, JsonSchema, Clone, PartialEq, Eq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Partner {
    #[garde(length(min = 1, max = 128))]
    pub name: String,
    #[garde(skip)]
    pub category: PartnerCategory,
    #[garde(url)]
    pub website: String,
    #[garde(length(max = 512))]
    pub description: Option<String>,
    #[serde(default)]
    #[garde(skip)]
    pub featured: bool,
}

#[derive(
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    JsonSchema,
    VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum PartnerCategory {
    Life,
    Health,
    Disability,
    CriticalIllness,
    Investments,
    Travel,
    Group,
}

impl PartnerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerCategory::Life => "life",
            PartnerCategory::Health => "health",
            PartnerCategory::Disability => "disability",
            PartnerCategory::CriticalIllness => "critical_illness",
            PartnerCategory::Investments => "investments",
            PartnerCategory::Travel => "travel",
            PartnerCategory::Group => "group",
        }
    }

    /// URL segment of the category's directory page.
    pub fn slug(&self) -> String {
        self.as_str().replace('_', "-")
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartnerCategory::Life => "Life Insurance",
            PartnerCategory::Health => "Health and Dental",
            PartnerCategory::Disability => "Disability Insurance",
            PartnerCategory::CriticalIllness => "Critical Illness",
            PartnerCategory::Investments => "Investments and Segregated Funds",
            PartnerCategory::Travel => "Travel Insurance",
            PartnerCategory::Group => "Group Benefits",
        }
    }
}

impl Display for PartnerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    JsonSchema,
    VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    News,
    Blog,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::News => "news",
            PostKind::Blog => "blog",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostKind::News => "News",
            PostKind::Blog => "Blog",
        }
    }
}

impl Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, JsonSchema, Clone, PartialEq, Eq, Validate)]
#[serde(deny_unknown_fields)]
pub struct Post {
    #[garde(skip)]
    pub kind: PostKind,
    #[garde(length(min = 1, max = 160))]
    pub title: String,
    #[garde(length(min = 1, max = 512))]
    pub description: String,
    #[garde(skip)]
    pub published: NaiveDate,
    #[garde(skip)]
    pub modified: Option<NaiveDate>,
    #[garde(length(min = 1, max = 64))]
    pub author: Option<String>,
    #[serde(default)]
    #[garde(inner(length(min = 1, max = 32)))]
    pub tags: Vec<String>,
}

impl Post {
    pub fn path(&self, id: &str) -> String {
        format!("/{}/{}", self.kind.as_str(), id)
    }

    pub fn article_metadata(&self, id: &str) -> ArticleMetadata {
        ArticleMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            path: self.path(id),
            date_published: self.published.format("%Y-%m-%d").to_string(),
            date_modified: self.modified.map(|d| d.format("%Y-%m-%d").to_string()),
            author: self.author.clone(),
            keywords: self.tags.clone(),
        }
    }

    pub fn page_metadata(&self, id: &str) -> PageMetadata {
        PageMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            path: self.path(id),
            date_published: Some(self.published.format("%Y-%m-%d").to_string()),
            date_modified: self.modified.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid partner data for '{id}'")]
pub struct PartnerValidationError {
    pub id: String,
    pub src: NamedSource<String>,
    pub labels: Vec<miette::LabeledSpan>,
    #[source]
    pub source: garde::Report,
}

impl Diagnostic for PartnerValidationError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new("mgasite::validation::partner"))
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

#[derive(Debug, Error)]
#[error("Invalid post data for '{id}'")]
pub struct PostValidationError {
    pub id: String,
    pub src: NamedSource<String>,
    pub labels: Vec<miette::LabeledSpan>,
    #[source]
    pub source: garde::Report,
}

impl Diagnostic for PostValidationError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new("mgasite::validation::post"))
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
pub enum ContentError {
    #[error("io error: {0}")]
    #[diagnostic(code(mgasite::io))]
    Io(#[from] std::io::Error),

    #[error("Error deserializing TOML in {0:?}: {1}")]
    #[diagnostic(code(mgasite::toml))]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("Unexpected directory: {0:?}")]
    #[diagnostic(code(mgasite::fs::unexpected_dir))]
    UnexpectedDir(PathBuf),

    #[error("Unexpected extension for: {0:?}. Should be `toml`")]
    #[diagnostic(code(mgasite::fs::extension))]
    FileExtension(PathBuf),

    #[error("Empty file stem part for: {0:?}. Should be of the format `<id>.toml`")]
    #[diagnostic(code(mgasite::fs::stem))]
    FileStem(PathBuf),

    #[error("Could not convert file name to string: {0:?}")]
    #[diagnostic(code(mgasite::fs::os_str))]
    OsStr(PathBuf),

    #[error("Post '{0}' was modified on {2}, before it was published on {1}")]
    #[diagnostic(code(mgasite::validation::post_dates))]
    DateOrder(String, NaiveDate, NaiveDate),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PartnerValidation(#[from] PartnerValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PostValidation(#[from] PostValidationError),
}

/// Content records as TOML files under one directory.
pub struct Content {
    dir: PathBuf,
}

impl Content {
    pub fn open(base_dir: &Path) -> Self {
        Self {
            dir: base_dir.to_path_buf(),
        }
    }

    pub fn partners(&self) -> impl Iterator<Item = Result<(String, Partner), ContentError>> {
        toml_content_in_dir(self.dir.join("partner")).map(|result| {
            let (id, path, content) = result?;
            let partner: Partner =
                toml::from_str(&content).map_err(|e| ContentError::Toml(path, e))?;
            if let Err(e) = partner.validate() {
                let labels = to_labels(&content, &e);
                return Err(PartnerValidationError {
                    id: id.clone(),
                    src: NamedSource::new(format!("{}.toml", id), content),
                    labels,
                    source: e,
                }
                .into());
            }
            Ok((id, partner))
        })
    }

    pub fn posts(&self) -> impl Iterator<Item = Result<(String, Post), ContentError>> {
        toml_content_in_dir(self.dir.join("post")).map(|result| {
            let (id, path, content) = result?;
            let post: Post = toml::from_str(&content).map_err(|e| ContentError::Toml(path, e))?;
            if let Err(e) = post.validate() {
                let labels = to_labels(&content, &e);
                return Err(PostValidationError {
                    id: id.clone(),
                    src: NamedSource::new(format!("{}.toml", id), content),
                    labels,
                    source: e,
                }
                .into());
            }
            if let Some(modified) = post.modified {
                if modified < post.published {
                    return Err(ContentError::DateOrder(id, post.published, modified));
                }
            }
            Ok((id, post))
        })
    }
}

fn toml_content_in_dir(
    dir: PathBuf,
) -> impl Iterator<Item = Result<(String, PathBuf, String), ContentError>> {
    // A missing directory reads as empty.
    fs::read_dir(dir).into_iter().flatten().map(|entry| {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            return Err(ContentError::UnexpectedDir(path));
        }
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if extension != "toml" {
            return Err(ContentError::FileExtension(path));
        }
        let stem = path.file_stem().ok_or(ContentError::FileStem(path.clone()))?;
        let id = stem.to_str().ok_or(ContentError::OsStr(path.clone()))?.to_string();
        let content = fs::read_to_string(&path)?;

        Ok((id, path, content))
    })
}

/// All loaded content, with the lookups the pages need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    partners: Vec<(String, Partner)>,
    posts: Vec<(String, Post)>,
}

impl Catalog {
    /// Loads every record, stopping at the first invalid one.
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let content = Content::open(dir);
        let partners = content.partners().collect::<Result<Vec<_>, _>>()?;
        let posts = content.posts().collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "loaded {} partners and {} posts from {:?}",
            partners.len(),
            posts.len(),
            dir
        );

        Ok(Self::from_parts(partners, posts))
    }

    pub fn from_parts(mut partners: Vec<(String, Partner)>, mut posts: Vec<(String, Post)>) -> Self {
        // read_dir order is platform dependent
        partners.sort_by(|a, b| a.0.cmp(&b.0));
        posts.sort_by(|a, b| a.0.cmp(&b.0));

        Self { partners, posts }
    }

    pub fn partner(&self, id: &str) -> Option<&Partner> {
        self.partners.iter().find(|(i, _)| i == id).map(|(_, p)| p)
    }

    /// Partners in `category`, sorted by name.
    pub fn partners_in(&self, category: PartnerCategory) -> Vec<(&str, &Partner)> {
        let mut partners: Vec<(&str, &Partner)> = self
            .partners
            .iter()
            .filter(|(_, p)| p.category == category)
            .map(|(id, p)| (id.as_str(), p))
            .collect();
        partners.sort_by(|a, b| a.1.name.cmp(&b.1.name));

        partners
    }

    pub fn featured_partners(&self) -> Vec<(&str, &Partner)> {
        self.partners
            .iter()
            .filter(|(_, p)| p.featured)
            .map(|(id, p)| (id.as_str(), p))
            .collect()
    }

    /// Categories with at least one partner, in declaration order.
    pub fn categories(&self) -> Vec<PartnerCategory> {
        self.partners
            .iter()
            .map(|(_, p)| p.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Posts of `kind`, newest first; same-day posts by id.
    pub fn posts(&self, kind: PostKind) -> Vec<(&str, &Post)> {
        let mut posts: Vec<(&str, &Post)> = self
            .posts
            .iter()
            .filter(|(_, p)| p.kind == kind)
            .map(|(id, p)| (id.as_str(), p))
            .collect();
        posts.sort_by(|a, b| b.1.published.cmp(&a.1.published).then(a.0.cmp(b.0)));

        posts
    }

    pub fn post(&self, kind: PostKind, id: &str) -> Option<&Post> {
        self.posts
            .iter()
            .find(|(i, p)| p.kind == kind && i == id)
            .map(|(_, p)| p)
    }

    pub fn latest(&self, kind: PostKind, n: usize) -> Vec<(&str, &Post)> {
        let mut posts = self.posts(kind);
        posts.truncate(n);

        posts
    }

    /// Posts of any kind carrying `tag`, compared case-insensitively.
    pub fn tagged(&self, tag: &str) -> Vec<(&str, &Post)> {
        let tag = tag.to_lowercase();
        let mut posts: Vec<(&str, &Post)> = self
            .posts
            .iter()
            .filter(|(_, p)| p.tags.iter().any(|t| t.to_lowercase() == tag))
            .map(|(id, p)| (id.as_str(), p))
            .collect();
        posts.sort_by(|a, b| b.1.published.cmp(&a.1.published).then(a.0.cmp(b.0)));

        posts
    }
}
