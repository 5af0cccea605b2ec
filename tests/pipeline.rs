use std::fs;
use std::path::Path;

use folio::config::SiteConfig;
use folio::content::loader::ContentLoader;
use folio::content::{ContentError, PostId};
use folio::Folio;

fn post(dir: &Path, stem: &str, front: &str, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join(format!("{}.html.markdown", stem)),
        format!("---\n{}\n---\n{}", front, body),
    )
    .unwrap();
}

fn three_posts(dir: &Path) {
    post(dir, "2021-01-01-a", "title: A\ndate: 2021-01-01", "alpha");
    post(dir, "2022-06-15-b", "title: B\ndate: 2022-06-15", "beta");
    post(dir, "2020-03-03-c", "title: C\ndate: 2020-03-03", "gamma");
}

fn titles(loader: &ContentLoader, limit: Option<usize>) -> Vec<String> {
    loader
        .build_listing(limit)
        .iter()
        .map(|p| p.id.title_slug.clone())
        .collect()
}

#[test]
fn listing_is_newest_first_and_limited() {
    let dir = tempfile::tempdir().unwrap();
    three_posts(dir.path());
    let config = SiteConfig::default();
    let loader = ContentLoader::for_dir(&config, dir.path());

    assert_eq!(titles(&loader, None), vec!["b", "a", "c"]);
    assert_eq!(titles(&loader, Some(2)), vec!["b", "a"]);
    assert_eq!(titles(&loader, Some(10)).len(), 3);
}

#[test]
fn missing_directory_is_an_empty_site() {
    let dir = tempfile::tempdir().unwrap();
    let config = SiteConfig::default();
    let loader = ContentLoader::for_dir(&config, dir.path().join("nope"));

    assert!(loader.build_listing(None).is_empty());
    assert!(loader.routes().is_empty());
}

#[test]
fn every_route_builds_the_listed_post() {
    let dir = tempfile::tempdir().unwrap();
    three_posts(dir.path());
    post(
        dir.path(),
        "2023-07-04-the-post-with-dashes",
        "title: Dashes\ndate: 2023-07-04",
        "one two",
    );
    let config = SiteConfig::default();
    let loader = ContentLoader::for_dir(&config, dir.path());

    let listing = loader.build_listing(None);
    let routes = loader.routes();
    assert_eq!(routes.len(), listing.len());

    for id in routes {
        let single = loader
            .build_single(&id.year, &id.month, &id.day, &id.title_slug)
            .unwrap();
        let listed = listing.iter().find(|p| p.slug == single.slug).unwrap();
        assert_eq!(listed.meta.date, single.meta.date);
        assert_eq!(listed.body, single.body);
    }

    let dashed = loader
        .build_single("2023", "07", "04", "the-post-with-dashes")
        .unwrap();
    assert_eq!(dashed.slug, "2023/07/04/the-post-with-dashes");
    assert_eq!(dashed.meta.date, "Jul 4, 2023");
    assert_eq!(dashed.meta.reading_time.unwrap().to_string(), "1 min read");
}

#[test]
fn single_post_failures_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    post(dir.path(), "2021-01-01-undated", "title: Undated", "text");
    let config = SiteConfig::default();
    let loader = ContentLoader::for_dir(&config, dir.path());

    assert!(matches!(
        loader.build_single("2021", "01", "01", "missing"),
        Err(ContentError::MissingPost { .. })
    ));
    assert!(matches!(
        loader.build_single("2021", "01", "01", "undated"),
        Err(ContentError::MissingDate(_))
    ));
    // The undated file is left out of the listing but still routed
    assert!(loader.build_listing(None).is_empty());
    assert_eq!(loader.routes().len(), 1);
}

#[test]
fn malformed_filename_does_not_hide_other_posts() {
    let dir = tempfile::tempdir().unwrap();
    three_posts(dir.path());
    post(dir.path(), "notes", "date: 2021-01-01", "x");
    let config = SiteConfig::default();
    let loader = ContentLoader::for_dir(&config, dir.path());

    assert_eq!(titles(&loader, None), vec!["b", "a", "c"]);
}

#[test]
fn filename_round_trip() {
    for name in ["2021-01-01-a", "2023-13-40-title-with-many-dashes"] {
        let id = PostId::decode(&format!("{}.html.markdown", name), ".html.markdown").unwrap();
        assert_eq!(id.encode(), name);
        let again =
            PostId::decode(&id.file_name(".html.markdown"), ".html.markdown").unwrap();
        assert_eq!(again, id);
    }
}

#[test]
fn generate_and_clean_a_site() {
    let dir = tempfile::tempdir().unwrap();
    folio::commands::init::init_site(dir.path()).unwrap();
    let site = Folio::new(dir.path()).unwrap();
    let created = site.new_post("Second post").unwrap();
    assert!(created.is_file());

    site.generate().unwrap();

    let public = dir.path().join("public");
    let home = fs::read_to_string(public.join("index.html")).unwrap();
    assert!(home.contains("Hello World"));
    assert!(home.contains("Latest projects"));
    assert!(public.join("about/index.html").is_file());
    assert!(public.join("css/index.css").is_file());

    let blog = fs::read_to_string(public.join("blog/index.html")).unwrap();
    assert!(blog.contains("Second post"));

    site.clean().unwrap();
    assert!(!public.exists());
}
