use strum::VariantArray;

use crate::config::SiteConfig;
use crate::content::{Catalog, PartnerCategory, PostKind};
use crate::schema::{
    self, BreadcrumbItem, FaqItem, PageMetadata, PersonDescriptor, Schema, ServiceDescriptor,
};

#[cfg(test)]
mod tests;

/// One route of the site and the structured data its `<head>` carries.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePage {
    pub path: String,
    pub title: String,
    pub description: String,
    pub schemas: Vec<Schema>,
}

impl SitePage {
    pub fn json_ld(&self) -> Result<String, serde_json::Error> {
        schema::combine_schemas(&self.schemas)
    }
}

/// The page-level composition: which generators each route calls.
pub struct Site<'a> {
    config: &'a SiteConfig,
    catalog: &'a Catalog,
}

impl<'a> Site<'a> {
    pub fn new(config: &'a SiteConfig, catalog: &'a Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &SiteConfig {
        self.config
    }

    pub fn pages(&self) -> Vec<SitePage> {
        let mut pages = vec![self.home(), self.about(), self.contact(), self.partners()];

        for category in self.catalog.categories() {
            pages.push(self.partner_category(category));
        }

        pages.push(self.advisor_portal());

        for service in &self.config.services {
            pages.push(self.service(
                &service.slug,
                &service.name,
                &service.description,
            ));
        }

        for kind in PostKind::VARIANTS {
            pages.push(self.post_index(*kind));
            for (id, _) in self.catalog.posts(*kind) {
                if let Some(page) = self.post(*kind, id) {
                    pages.push(page);
                }
            }
        }

        pages
    }

    /// Looks up a page by path; a trailing slash is ignored.
    pub fn page(&self, path: &str) -> Option<SitePage> {
        let path = normalize(path);
        self.pages().into_iter().find(|page| page.path == path)
    }

    fn home(&self) -> SitePage {
        let config = self.config;

        SitePage {
            path: "/".to_string(),
            title: config.site.name.clone(),
            description: config.site.description.clone(),
            schemas: self.with_layout([
                schema::toronto_office_schema(config).into(),
                schema::mississauga_office_schema(config).into(),
            ]),
        }
    }

    fn about(&self) -> SitePage {
        let mut page = self.basic(
            "/about",
            "About Us",
            &self.config.organization.description,
            &[],
        );
        for member in &self.config.team {
            page.schemas.push(
                schema::person_schema(
                    self.config,
                    &PersonDescriptor {
                        name: member.name.clone(),
                        job_title: member.job_title.clone(),
                        email: member.email.clone(),
                    },
                )
                .into(),
            );
        }

        page
    }

    fn contact(&self) -> SitePage {
        let mut page = self.basic(
            "/contact",
            "Contact Us",
            "Reach our Toronto and Mississauga offices by phone, e-mail or in person.",
            &[],
        );
        page.schemas
            .push(schema::toronto_office_schema(self.config).into());
        page.schemas
            .push(schema::mississauga_office_schema(self.config).into());

        page
    }

    fn partners(&self) -> SitePage {
        self.basic(
            "/partners",
            "Our Partners",
            "The Canadian insurance and investment carriers our advisors can place business with.",
            &[],
        )
    }

    fn partner_category(&self, category: PartnerCategory) -> SitePage {
        let names: Vec<&str> = self
            .catalog
            .partners_in(category)
            .into_iter()
            .map(|(_, p)| p.name.as_str())
            .collect();

        self.basic(
            &format!("/partners/{}", category.slug()),
            category.label(),
            &format!("{} carriers: {}.", category.label(), names.join(", ")),
            &[BreadcrumbItem::new("Our Partners", "/partners")],
        )
    }

    fn advisor_portal(&self) -> SitePage {
        let description = format!(
            "Training, marketing and contracting resources for {} advisors.",
            self.config.organization.name
        );
        let mut page = self.basic("/advisor-portal", "Advisor Portal", &description, &[]);
        if !self.config.faqs.is_empty() {
            let faqs: Vec<FaqItem> = self
                .config
                .faqs
                .iter()
                .map(|faq| FaqItem {
                    question: faq.question.clone(),
                    answer: faq.answer.clone(),
                })
                .collect();
            page.schemas.push(schema::faq_schema(&faqs).into());
        }

        page
    }

    fn service(&self, slug: &str, name: &str, description: &str) -> SitePage {
        let path = format!("/services/{}", slug);
        let mut page = self.basic(&path, name, description, &[]);
        page.schemas.push(
            schema::service_schema(
                self.config,
                &ServiceDescriptor {
                    name: name.to_string(),
                    description: description.to_string(),
                    path,
                },
            )
            .into(),
        );

        page
    }

    fn post_index(&self, kind: PostKind) -> SitePage {
        let description = match kind {
            PostKind::News => format!(
                "Announcements and carrier updates from {}.",
                self.config.organization.name
            ),
            PostKind::Blog => {
                "Practical articles on products, case design and practice management.".to_string()
            }
        };

        self.basic(&format!("/{}", kind.as_str()), kind.label(), &description, &[])
    }

    fn post(&self, kind: PostKind, id: &str) -> Option<SitePage> {
        let post = self.catalog.post(kind, id)?;
        let meta = post.page_metadata(id);
        let trail = [
            BreadcrumbItem::new("Home", "/"),
            BreadcrumbItem::new(kind.label(), format!("/{}", kind.as_str())),
            BreadcrumbItem::new(post.title.clone(), meta.path.clone()),
        ];

        Some(SitePage {
            path: meta.path.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            schemas: self.with_layout([
                schema::web_page_schema(self.config, &meta).into(),
                schema::breadcrumb_schema(self.config, &trail).into(),
                schema::article_schema(self.config, &post.article_metadata(id)).into(),
            ]),
        })
    }

    /// A page with WebPage and breadcrumb nodes; `parents` sit between Home and the page.
    fn basic(&self, path: &str, title: &str, description: &str, parents: &[BreadcrumbItem]) -> SitePage {
        let mut trail = vec![BreadcrumbItem::new("Home", "/")];
        trail.extend_from_slice(parents);
        trail.push(BreadcrumbItem::new(title, path));

        let meta = PageMetadata {
            title: title.to_string(),
            description: description.to_string(),
            path: path.to_string(),
            date_published: None,
            date_modified: None,
        };

        SitePage {
            path: path.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            schemas: self.with_layout([
                schema::web_page_schema(self.config, &meta).into(),
                schema::breadcrumb_schema(self.config, &trail).into(),
            ]),
        }
    }

    /// Organization and WebSite lead every graph so the page's `@id` links resolve.
    fn with_layout<const N: usize>(&self, page_schemas: [Schema; N]) -> Vec<Schema> {
        let mut schemas: Vec<Schema> = vec![
            schema::organization_schema(self.config).into(),
            schema::website_schema(self.config).into(),
        ];
        schemas.extend(page_schemas);

        schemas
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
