//! schema.org JSON-LD generation.
//!
//! Every generator is a pure function of the site configuration and its
//! descriptor. Results are wrapped in a [`Document`], which adds the
//! top-level `@context`; [`combine_schemas`] strips it again when bundling
//! several nodes into one `@graph`.

use serde_derive::Serialize;

use crate::config::{Office, SiteConfig};

mod graph;
mod types;


pub use graph::{DanglingRef, combine_schemas, dangling_references};
pub use types::*;

pub const CONTEXT: &str = "https://schema.org";
pub const LANGUAGE: &str = "en-CA";
pub const COUNTRY: &str = "Canada";

const CONTACT_TYPE: &str = "customer service";
const CONTACT_AREA: &str = "CA";
const CONTACT_LANGUAGES: [&str; 2] = ["English", "French"];

/// A standalone JSON-LD document: one node plus its `@context`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Document<T> {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(flatten)]
    pub node: T,
}

impl<T> Document<T> {
    pub fn new(node: T) -> Self {
        Self {
            context: CONTEXT,
            node,
        }
    }

    /// Drops the `@context`, leaving a node fit for a `@graph`.
    pub fn into_node(self) -> T {
        self.node
    }
}

impl<T: Into<Schema>> From<Document<T>> for Schema {
    fn from(document: Document<T>) -> Self {
        document.node.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    pub name: String,
    pub href: String,
}

impl BreadcrumbItem {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub path: String,
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleMetadata {
    pub title: String,
    pub description: String,
    pub path: String,
    pub date_published: String,
    pub date_modified: Option<String>,
    /// Free text; the article is still attributed to an organization.
    pub author: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: String,
    pub description: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDescriptor {
    pub name: String,
    pub job_title: String,
    pub email: Option<String>,
}

pub fn organization_schema(config: &SiteConfig) -> Document<OrganizationSchema> {
    let org = &config.organization;

    Document::new(OrganizationSchema {
        typ: SchemaType::Organization,
        id: config.organization_id(),
        name: org.name.clone(),
        legal_name: org.legal_name.clone(),
        url: config.url("/"),
        logo: config.url(&org.logo),
        description: org.description.clone(),
        email: org.email.clone(),
        telephone: org.telephone.clone(),
        same_as: org.same_as.clone(),
        contact_point: vec![ContactPoint {
            typ: SchemaType::ContactPoint,
            telephone: org.telephone.clone(),
            email: org.email.clone(),
            contact_type: CONTACT_TYPE.to_string(),
            area_served: CONTACT_AREA.to_string(),
            available_language: CONTACT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }],
        address: PostalAddress::new(&org.address, COUNTRY),
    })
}

/// Builds the `FinancialService` node for one office.
///
/// The office name always mentions its city; the city is appended when the
/// configured name leaves it out.
pub fn office_schema(config: &SiteConfig, office: &Office) -> Document<LocalBusinessSchema> {
    let name = if office.name.contains(&office.city) {
        office.name.clone()
    } else {
        format!("{} ({})", office.name, office.city)
    };

    Document::new(LocalBusinessSchema {
        typ: SchemaType::FinancialService,
        id: config.office_id(office),
        name,
        url: config.url("/contact"),
        telephone: office.telephone.clone(),
        email: office.email.clone(),
        address: PostalAddress::new(&office.address, COUNTRY),
        geo: GeoCoordinates {
            typ: SchemaType::GeoCoordinates,
            latitude: office.geo.latitude,
            longitude: office.geo.longitude,
        },
        opening_hours_specification: office
            .hours
            .iter()
            .map(|hours| OpeningHoursSpecification {
                typ: SchemaType::OpeningHoursSpecification,
                day_of_week: hours.days.clone(),
                opens: hours.opens.clone(),
                closes: hours.closes.clone(),
            })
            .collect(),
        parent_organization: IdRef::new(config.organization_id()),
    })
}

pub fn toronto_office_schema(config: &SiteConfig) -> Document<LocalBusinessSchema> {
    office_schema(config, &config.offices.toronto)
}

pub fn mississauga_office_schema(config: &SiteConfig) -> Document<LocalBusinessSchema> {
    office_schema(config, &config.offices.mississauga)
}

/// Positions start at 1 and follow the order of `items`.
pub fn breadcrumb_schema(config: &SiteConfig, items: &[BreadcrumbItem]) -> Document<BreadcrumbSchema> {
    Document::new(BreadcrumbSchema {
        typ: SchemaType::BreadcrumbList,
        item_list_element: items
            .iter()
            .enumerate()
            .map(|(i, item)| ListItem {
                typ: SchemaType::ListItem,
                position: i + 1,
                name: item.name.clone(),
                item: config.url(&item.href),
            })
            .collect(),
    })
}

pub fn web_page_schema(config: &SiteConfig, meta: &PageMetadata) -> Document<WebPageSchema> {
    let url = config.url(&meta.path);

    Document::new(WebPageSchema {
        typ: SchemaType::WebPage,
        id: format!("{}#webpage", url),
        url,
        name: meta.title.clone(),
        description: meta.description.clone(),
        in_language: LANGUAGE.to_string(),
        is_part_of: IdRef::new(config.website_id()),
        date_published: meta.date_published.clone(),
        date_modified: meta
            .date_modified
            .clone()
            .or_else(|| meta.date_published.clone()),
    })
}

pub fn faq_schema(faqs: &[FaqItem]) -> Document<FaqSchema> {
    Document::new(FaqSchema {
        typ: SchemaType::FaqPage,
        main_entity: faqs
            .iter()
            .map(|faq| Question {
                typ: SchemaType::Question,
                name: faq.question.clone(),
                accepted_answer: Answer {
                    typ: SchemaType::Answer,
                    text: faq.answer.clone(),
                },
            })
            .collect(),
    })
}

pub fn article_schema(config: &SiteConfig, meta: &ArticleMetadata) -> Document<ArticleSchema> {
    let url = config.url(&meta.path);

    Document::new(ArticleSchema {
        typ: SchemaType::Article,
        headline: meta.title.clone(),
        description: meta.description.clone(),
        url: url.clone(),
        date_published: meta.date_published.clone(),
        date_modified: meta
            .date_modified
            .clone()
            .unwrap_or_else(|| meta.date_published.clone()),
        author: Author {
            typ: SchemaType::Organization,
            name: meta
                .author
                .clone()
                .unwrap_or_else(|| config.organization.name.clone()),
        },
        publisher: IdRef::new(config.organization_id()),
        main_entity_of_page: IdRef::new(url),
        in_language: LANGUAGE.to_string(),
        keywords: meta.keywords.clone(),
    })
}

/// Services are always offered Canada-wide.
pub fn service_schema(config: &SiteConfig, desc: &ServiceDescriptor) -> Document<ServiceSchema> {
    Document::new(ServiceSchema {
        typ: SchemaType::Service,
        name: desc.name.clone(),
        description: desc.description.clone(),
        url: config.url(&desc.path),
        provider: IdRef::new(config.organization_id()),
        area_served: Country {
            typ: SchemaType::Country,
            name: COUNTRY.to_string(),
        },
    })
}

pub fn person_schema(config: &SiteConfig, desc: &PersonDescriptor) -> Document<PersonSchema> {
    Document::new(PersonSchema {
        typ: SchemaType::Person,
        name: desc.name.clone(),
        job_title: desc.job_title.clone(),
        email: desc.email.clone(),
        works_for: IdRef::new(config.organization_id()),
    })
}

pub fn website_schema(config: &SiteConfig) -> Document<WebsiteSchema> {
    Document::new(WebsiteSchema {
        typ: SchemaType::WebSite,
        id: config.website_id(),
        url: config.url("/"),
        name: config.site.name.clone(),
        description: config.site.description.clone(),
        in_language: LANGUAGE.to_string(),
        publisher: IdRef::new(config.organization_id()),
    })
}
