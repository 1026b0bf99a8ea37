use std::fs;

use strum::VariantArray;

use super::*;

fn partner(name: &str, category: PartnerCategory, featured: bool) -> Partner {
    Partner {
        name: name.to_string(),
        category,
        website: "https://example.com".to_string(),
        description: None,
        featured,
    }
}

fn post(kind: PostKind, published: (i32, u32, u32), tags: &[&str]) -> Post {
    Post {
        kind,
        title: "Title".to_string(),
        description: "Description".to_string(),
        published: NaiveDate::from_ymd_opt(published.0, published.1, published.2).unwrap(),
        modified: None,
        author: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn catalog() -> Catalog {
    Catalog::from_parts(
        vec![
            ("sunlife".to_string(), partner("Sun Life", PartnerCategory::Life, true)),
            ("beneva".to_string(), partner("Beneva", PartnerCategory::Life, false)),
            ("gms".to_string(), partner("GMS", PartnerCategory::Travel, false)),
            ("ia".to_string(), partner("iA Financial", PartnerCategory::Investments, true)),
        ],
        vec![
            ("b".to_string(), post(PostKind::News, (2024, 1, 5), &["Events"])),
            ("a".to_string(), post(PostKind::News, (2024, 1, 5), &[])),
            ("c".to_string(), post(PostKind::News, (2024, 3, 1), &["company"])),
            ("d".to_string(), post(PostKind::Blog, (2023, 12, 1), &["events"])),
        ],
    )
}

fn ids<T>(items: &[(&str, T)]) -> Vec<String> {
    items.iter().map(|(id, _)| id.to_string()).collect()
}

#[test]
fn test_partner_lookup() {
    let catalog = catalog();
    assert_eq!(catalog.partner("gms").map(|p| p.name.as_str()), Some("GMS"));
    assert!(catalog.partner("missing").is_none());
}

#[test]
fn test_partners_in_category_sorted_by_name() {
    let catalog = catalog();
    assert_eq!(ids(&catalog.partners_in(PartnerCategory::Life)), ["beneva", "sunlife"]);
    assert!(catalog.partners_in(PartnerCategory::Group).is_empty());
}

#[test]
fn test_featured_and_categories() {
    let catalog = catalog();
    assert_eq!(ids(&catalog.featured_partners()), ["ia", "sunlife"]);
    assert_eq!(
        catalog.categories(),
        vec![
            PartnerCategory::Life,
            PartnerCategory::Investments,
            PartnerCategory::Travel
        ]
    );
}

#[test]
fn test_posts_newest_first() {
    let catalog = catalog();
    assert_eq!(ids(&catalog.posts(PostKind::News)), ["c", "a", "b"]);
    assert_eq!(ids(&catalog.latest(PostKind::News, 2)), ["c", "a"]);
    assert_eq!(ids(&catalog.posts(PostKind::Blog)), ["d"]);
}

#[test]
fn test_post_lookup_respects_kind() {
    let catalog = catalog();
    assert!(catalog.post(PostKind::News, "c").is_some());
    assert!(catalog.post(PostKind::Blog, "c").is_none());
}

#[test]
fn test_tagged_is_case_insensitive() {
    let catalog = catalog();
    assert_eq!(ids(&catalog.tagged("EVENTS")), ["b", "d"]);
    assert!(catalog.tagged("nothing").is_empty());
}

#[test]
fn test_post_metadata() {
    let mut post = post(PostKind::Blog, (2024, 2, 20), &["training"]);
    post.modified = NaiveDate::from_ymd_opt(2024, 2, 25);

    let article = post.article_metadata("primer");
    assert_eq!(article.path, "/blog/primer");
    assert_eq!(article.date_published, "2024-02-20");
    assert_eq!(article.date_modified.as_deref(), Some("2024-02-25"));
    assert_eq!(article.keywords, vec!["training".to_string()]);

    let page = post.page_metadata("primer");
    assert_eq!(page.date_published.as_deref(), Some("2024-02-20"));
}

#[test]
fn test_category_slug() {
    assert_eq!(PartnerCategory::CriticalIllness.slug(), "critical-illness");
    assert_eq!(PartnerCategory::Life.to_string(), "life");
}

#[test]
fn test_as_str_matches_toml_names() {
    for category in PartnerCategory::VARIANTS {
        assert_eq!(serde_json::to_value(category).unwrap(), category.as_str());
    }
    for kind in PostKind::VARIANTS {
        assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
    }
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("partner")).unwrap();
    fs::create_dir(dir.path().join("post")).unwrap();
    fs::write(
        dir.path().join("partner/acme.toml"),
        "name = \"Acme Life\"\ncategory = \"life\"\nwebsite = \"https://acme.example\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("post/hello.toml"),
        "kind = \"blog\"\ntitle = \"Hello\"\ndescription = \"First post\"\npublished = \"2024-05-01\"\n",
    )
    .unwrap();

    let catalog = Catalog::load(dir.path()).unwrap();
    assert_eq!(catalog.partner("acme").map(|p| p.featured), Some(false));
    assert_eq!(catalog.posts(PostKind::Blog).len(), 1);
}

#[test]
fn test_load_missing_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::load(&dir.path().join("nothing")).unwrap();
    assert_eq!(catalog, Catalog::default());
}

#[test]
fn test_load_repository_content() {
    let catalog = Catalog::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("content").as_path())
        .unwrap();
    assert!(!catalog.featured_partners().is_empty());
    assert!(!catalog.posts(PostKind::News).is_empty());
}

#[test]
fn test_invalid_partner() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("partner")).unwrap();
    fs::write(
        dir.path().join("partner/bad.toml"),
        "name = \"Bad\"\ncategory = \"life\"\nwebsite = \"not a url\"\n",
    )
    .unwrap();

    match Catalog::load(dir.path()).unwrap_err() {
        ContentError::PartnerValidation(e) => {
            assert_eq!(e.id, "bad");
            let span = e.labels[0].inner();
            assert_eq!(span.offset(), "name = \"Bad\"\ncategory = \"life\"\nwebsite = ".len());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unexpected_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("post")).unwrap();
    fs::write(dir.path().join("post/readme.md"), "# notes").unwrap();

    let err = Catalog::load(dir.path()).unwrap_err();
    assert!(matches!(err, ContentError::FileExtension(_)));
}

#[test]
fn test_modified_before_published() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("post")).unwrap();
    fs::write(
        dir.path().join("post/old.toml"),
        "kind = \"news\"\ntitle = \"Old\"\ndescription = \"d\"\npublished = \"2024-05-01\"\nmodified = \"2024-04-01\"\n",
    )
    .unwrap();

    let err = Catalog::load(dir.path()).unwrap_err();
    assert!(matches!(err, ContentError::DateOrder(id, _, _) if id == "old"));
}
