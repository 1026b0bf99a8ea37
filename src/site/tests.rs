use std::path::Path;

use serde_json::Value;

use super::*;
use crate::schema::SchemaType;

fn fixtures() -> (SiteConfig, Catalog) {
    let config = SiteConfig::embedded().unwrap();
    let catalog = Catalog::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("content")).unwrap();

    (config, catalog)
}

fn types(page: &SitePage) -> Vec<SchemaType> {
    page.schemas.iter().map(|s| s.schema_type()).collect()
}

#[test]
fn test_routes() {
    let (config, catalog) = fixtures();
    let site = Site::new(&config, &catalog);
    let paths: Vec<String> = site.pages().into_iter().map(|p| p.path).collect();

    for expected in [
        "/",
        "/about",
        "/contact",
        "/partners",
        "/partners/life",
        "/partners/critical-illness",
        "/advisor-portal",
        "/services/life-insurance",
        "/news",
        "/news/advisor-summit-2024",
        "/blog",
        "/blog/critical-illness-primer",
    ] {
        assert!(paths.iter().any(|p| p == expected), "missing {}", expected);
    }

    let mut unique = paths.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), paths.len());
}

#[test]
fn test_home_page() {
    let (config, catalog) = fixtures();
    let home = Site::new(&config, &catalog).page("/").unwrap();

    assert_eq!(
        types(&home),
        vec![
            SchemaType::Organization,
            SchemaType::WebSite,
            SchemaType::FinancialService,
            SchemaType::FinancialService
        ]
    );
    assert!(crate::schema::dangling_references(&home.schemas).is_empty());
}

#[test]
fn test_page_lookup_normalizes() {
    let (config, catalog) = fixtures();
    let site = Site::new(&config, &catalog);

    assert_eq!(site.page("/about/").map(|p| p.path), Some("/about".to_string()));
    assert_eq!(site.page("contact").map(|p| p.path), Some("/contact".to_string()));
    assert!(site.page("/missing").is_none());
}

#[test]
fn test_advisor_portal_has_faq() {
    let (config, catalog) = fixtures();
    let page = Site::new(&config, &catalog).page("/advisor-portal").unwrap();

    assert_eq!(
        types(&page),
        vec![
            SchemaType::Organization,
            SchemaType::WebSite,
            SchemaType::WebPage,
            SchemaType::BreadcrumbList,
            SchemaType::FaqPage
        ]
    );
}

#[test]
fn test_partner_category_breadcrumb() {
    let (config, catalog) = fixtures();
    let page = Site::new(&config, &catalog).page("/partners/life").unwrap();
    let json: Value = serde_json::from_str(&page.json_ld().unwrap()).unwrap();
    let crumbs = &json["@graph"][3]["itemListElement"];

    assert_eq!(crumbs[0]["name"], "Home");
    assert_eq!(crumbs[1]["name"], "Our Partners");
    assert_eq!(crumbs[2]["position"], 3);
    assert!(page.description.contains("Canada Life"));
    assert!(page.description.contains("Equitable Life of Canada"));
}

#[test]
fn test_post_page() {
    let (config, catalog) = fixtures();
    let page = Site::new(&config, &catalog)
        .page("/news/mississauga-office-opening")
        .unwrap();
    let json: Value = serde_json::from_str(&page.json_ld().unwrap()).unwrap();
    let graph = json["@graph"].as_array().unwrap();

    assert_eq!(graph.len(), 5);
    assert_eq!(graph[2]["dateModified"], "2024-01-22");
    assert_eq!(graph[4]["@type"], "Article");
    assert_eq!(graph[4]["headline"], "New Mississauga Office Opens");
    assert_eq!(graph[4]["author"]["name"], "Northline Financial");
}

#[test]
fn test_every_page_serializes() {
    let (config, catalog) = fixtures();
    for page in Site::new(&config, &catalog).pages() {
        let json: Value = serde_json::from_str(&page.json_ld().unwrap()).unwrap();
        assert_eq!(
            json["@graph"].as_array().map(|g| g.len()),
            Some(page.schemas.len()),
            "{}",
            page.path
        );
    }
}

#[test]
fn test_no_dangling_references() {
    let (config, catalog) = fixtures();
    for page in Site::new(&config, &catalog).pages() {
        let dangling = crate::schema::dangling_references(&page.schemas);
        assert!(dangling.is_empty(), "{}: {:?}", page.path, dangling);
    }
}

#[test]
fn test_about_lists_team() {
    let (config, catalog) = fixtures();
    let page = Site::new(&config, &catalog).page("/about").unwrap();
    let people = page
        .schemas
        .iter()
        .filter(|s| s.schema_type() == SchemaType::Person)
        .count();

    assert_eq!(people, config.team.len());
}
