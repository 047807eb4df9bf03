use std::fs;
use std::path::Path;

use garden_rs::content::{frontmatter, ContentRepository, MarkdownRenderer, MemorySource};
use garden_rs::Garden;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, text: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), text).unwrap();
}

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let posts = tmp.path().join("content/posts");
    let projects = tmp.path().join("content/projects");

    write(
        &posts,
        "kernel.md",
        "---\ntitle: Building a Kernel\ndate: 2024-06-01\nfeatured: true\ncategory: Systems\ntags:\n  - rust\n  - os\n---\n# Boot\n\nFrom scratch.\n",
    );
    write(
        &posts,
        "pasta.md",
        "---\ntitle: Cooking Pasta\ndate: 2024-02-10\ncategory: Life\ntags: [food]\n---\nBoil water.\n",
    );
    write(&posts, "untitled.md", "Just a note without metadata.\n");
    write(
        &projects,
        "forge.md",
        "---\ntitle: Pixel Forge\ndate: 2023-05-01\nstatus: active\nfeatured: true\nlink: https://example.com\n---\nA sprite editor.\n",
    );
    write(&projects, "attic.md", "---\ntitle: Attic\ndate: 2021-01-01\n---\nOld stuff.\n");

    tmp
}

#[test]
fn loads_sorted_posts_from_disk() {
    let tmp = site();
    let garden = Garden::new(tmp.path()).unwrap();
    let repo = garden.repository();

    let posts = repo.all_posts().unwrap();
    assert_eq!(posts.len(), 3);
    // The undated note takes the load time, so it is the newest
    assert_eq!(posts[0].slug, "untitled");
    assert_eq!(posts[0].title, "Untitled");
    assert_eq!(posts[1].title, "Building a Kernel");
    assert_eq!(posts[2].title, "Cooking Pasta");
    assert!(posts[1].content.contains("<h1>Boot</h1>"));

    let again = repo.all_posts().unwrap();
    assert_eq!(posts, again);
}

#[test]
fn featured_and_lookup() {
    let tmp = site();
    let repo = Garden::new(tmp.path()).unwrap().repository();

    assert_eq!(repo.featured_post().unwrap().unwrap().slug, "kernel");
    assert_eq!(repo.post_by_slug("pasta").unwrap().unwrap().category, "Life");
    assert!(repo.post_by_slug("nope").unwrap().is_none());

    let featured = repo.featured_projects().unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].title, "Pixel Forge");
    assert_eq!(repo.all_projects().unwrap()[1].link, "#");
}

#[test]
fn facets_and_search() {
    let tmp = site();
    let repo = Garden::new(tmp.path()).unwrap().repository();

    let categories = repo.all_categories().unwrap();
    assert_eq!(categories.len(), 3);
    assert!(categories.iter().all(|c| c.count == 1));

    let tags: Vec<_> = repo.all_tags().unwrap().into_iter().map(|t| t.tag).collect();
    assert_eq!(tags, vec!["rust", "os", "food"]);

    let hits = repo.search("kernl").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slug, "kernel");
    assert!(repo.search("").unwrap().is_empty());
    assert!(repo.search("zzz-no-match").unwrap().is_empty());
}

#[test]
fn config_overrides_directories_and_search() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "_config.yml",
        "posts_dir: notes\nsearch:\n  fields: [tags]\n",
    );
    write(
        &tmp.path().join("notes"),
        "a.md",
        "---\ntitle: Kernel Notes\ntags: [lowlevel]\n---\n",
    );

    let garden = Garden::new(tmp.path()).unwrap();
    let repo = garden.repository();
    assert_eq!(repo.all_posts().unwrap().len(), 1);
    assert!(repo.all_projects().unwrap().is_empty());
    assert!(repo.search("kernel").unwrap().is_empty());
    assert_eq!(repo.search("lowlevel").unwrap().len(), 1);
}

#[test]
fn body_after_closing_delimiter_is_preserved() {
    let body = "Line one\r\n\r\n---\r\nStill body\r\n";
    let raw = format!("---\r\ntitle: CRLF\r\n---\r\n{}", body);
    assert_eq!(frontmatter::parse(&raw).body, body);
}

#[test]
fn slug_collision_resolves_to_last_loaded() {
    let source = MemorySource::default()
        .with("/content/posts/doc1.md", "---\nslug: x\ntitle: Doc 1\ndate: 2024-01-01\n---\n")
        .with("/content/posts/doc2.md", "---\nslug: x\ntitle: Doc 2\ndate: 2024-01-01\n---\n");
    let repo = ContentRepository::new(source, MemorySource::default(), MarkdownRenderer::new());

    assert_eq!(repo.post_by_slug("x").unwrap().unwrap().title, "Doc 2");
    let titles: Vec<_> = repo.all_posts().unwrap().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Doc 1", "Doc 2"]);
}

#[test]
fn project_slug_is_the_file_name() {
    let projects = MemorySource::default().with(
        "/content/projects/forge.md",
        "---\nslug: other\ntitle: Pixel Forge\n---\n",
    );
    let repo = ContentRepository::new(MemorySource::default(), projects, MarkdownRenderer::new());

    assert_eq!(repo.project_by_slug("forge").unwrap().unwrap().title, "Pixel Forge");
    assert!(repo.project_by_slug("other").unwrap().is_none());
}
