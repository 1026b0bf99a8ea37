use serde_derive::Serialize;

use crate::config::{self, DayOfWeek};

/// The schema.org vocabulary types this site emits.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    Organization,
    FinancialService,
    BreadcrumbList,
    ListItem,
    WebPage,
    #[serde(rename = "FAQPage")]
    FaqPage,
    Question,
    Answer,
    Article,
    Service,
    Country,
    Person,
    WebSite,
    ContactPoint,
    PostalAddress,
    GeoCoordinates,
    OpeningHoursSpecification,
}

/// A link to another node by its `@id`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IdRef {
    #[serde(rename = "@id")]
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    pub url: String,
    pub logo: String,
    pub description: String,
    pub email: String,
    pub telephone: String,
    pub same_as: Vec<String>,
    pub contact_point: Vec<ContactPoint>,
    pub address: PostalAddress,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub telephone: String,
    pub email: String,
    pub contact_type: String,
    pub area_served: String,
    pub available_language: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub street_address: String,
    pub address_locality: String,
    pub address_region: String,
    pub postal_code: String,
    pub address_country: String,
}

impl PostalAddress {
    pub fn new(address: &config::Address, country: &str) -> Self {
        Self {
            typ: SchemaType::PostalAddress,
            street_address: address.street.clone(),
            address_locality: address.locality.clone(),
            address_region: address.region.clone(),
            postal_code: address.postal_code.clone(),
            address_country: country.to_string(),
        }
    }
}

/// An office, typed as `FinancialService`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalBusinessSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    pub url: String,
    pub telephone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: PostalAddress,
    pub geo: GeoCoordinates,
    pub opening_hours_specification: Vec<OpeningHoursSpecification>,
    pub parent_organization: IdRef,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GeoCoordinates {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursSpecification {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub day_of_week: Vec<DayOfWeek>,
    pub opens: String,
    pub closes: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub item_list_element: Vec<ListItem>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub position: usize,
    pub name: String,
    pub item: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebPageSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub in_language: String,
    pub is_part_of: IdRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaqSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub main_entity: Vec<Question>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub name: String,
    pub accepted_answer: Answer,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub headline: String,
    pub description: String,
    pub url: String,
    pub date_published: String,
    pub date_modified: String,
    pub author: Author,
    pub publisher: IdRef,
    pub main_entity_of_page: IdRef,
    pub in_language: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// Article authorship is always attributed to an organization-typed entity.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Author {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub name: String,
    pub description: String,
    pub url: String,
    pub provider: IdRef,
    pub area_served: Country,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Country {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    pub name: String,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub works_for: IdRef,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSchema {
    #[serde(rename = "@type")]
    pub typ: SchemaType,
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub in_language: String,
    pub publisher: IdRef,
}

/// Any node that can appear in a page's `@graph`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Schema {
    Organization(OrganizationSchema),
    LocalBusiness(LocalBusinessSchema),
    Breadcrumb(BreadcrumbSchema),
    WebPage(WebPageSchema),
    Faq(FaqSchema),
    Article(ArticleSchema),
    Service(ServiceSchema),
    Person(PersonSchema),
    Website(WebsiteSchema),
}

impl Schema {
    pub fn schema_type(&self) -> SchemaType {
        match self {
            Schema::Organization(s) => s.typ,
            Schema::LocalBusiness(s) => s.typ,
            Schema::Breadcrumb(s) => s.typ,
            Schema::WebPage(s) => s.typ,
            Schema::Faq(s) => s.typ,
            Schema::Article(s) => s.typ,
            Schema::Service(s) => s.typ,
            Schema::Person(s) => s.typ,
            Schema::Website(s) => s.typ,
        }
    }

    /// The `@id` this node declares, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Schema::Organization(s) => Some(&s.id),
            Schema::LocalBusiness(s) => Some(&s.id),
            Schema::WebPage(s) => Some(&s.id),
            Schema::Website(s) => Some(&s.id),
            Schema::Breadcrumb(_)
            | Schema::Faq(_)
            | Schema::Article(_)
            | Schema::Service(_)
            | Schema::Person(_) => None,
        }
    }

    /// Cross-node references as `(property, @id)` pairs.
    ///
    /// `mainEntityOfPage` points at the page URL itself and is not included.
    pub fn references(&self) -> Vec<(&'static str, &str)> {
        match self {
            Schema::LocalBusiness(s) => vec![("parentOrganization", s.parent_organization.id.as_str())],
            Schema::WebPage(s) => vec![("isPartOf", s.is_part_of.id.as_str())],
            Schema::Article(s) => vec![("publisher", s.publisher.id.as_str())],
            Schema::Service(s) => vec![("provider", s.provider.id.as_str())],
            Schema::Person(s) => vec![("worksFor", s.works_for.id.as_str())],
            Schema::Website(s) => vec![("publisher", s.publisher.id.as_str())],
            Schema::Organization(_) | Schema::Breadcrumb(_) | Schema::Faq(_) => Vec::new(),
        }
    }
}

macro_rules! impl_into_schema {
    ($($node:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Schema {
                fn from(node: $node) -> Self {
                    Schema::$variant(node)
                }
            }
        )*
    };
}

impl_into_schema! {
    OrganizationSchema => Organization,
    LocalBusinessSchema => LocalBusiness,
    BreadcrumbSchema => Breadcrumb,
    WebPageSchema => WebPage,
    FaqSchema => Faq,
    ArticleSchema => Article,
    ServiceSchema => Service,
    PersonSchema => Person,
    WebsiteSchema => Website,
}
