use folio_core::site::{copy_static_assets, generate_data, render_site};
use folio_core::{build_site, FilterController, PageDom, SiteError, SiteLayout};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PAGE_TEMPLATE: &str = "<html><head><title>$title</title>\
<link href=\"${ref_prefix}css/site.css\"></head>\
<body><ul>$navigation_links</ul>$page_markdown</body></html>";

const CONTAINERS_TEMPLATE: &str = "<html><head><title>$title</title></head>\
<body><ul>$navigation_links</ul>$page_markdown$containers_markdown</body></html>";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "_data/pages/index.md",
        "---\ntitle: Home\nnavmenu: true\nnavorder: 1\n---\n# Welcome\n",
    );
    write(
        root,
        "_data/pages/gallery.md",
        "---\ntitle: Gallery\nnavmenu: true\nnavorder: 2\nlayout: containers\ncontainerspath: cards\n---\nPick a shelf.\n",
    );
    write(
        root,
        "_data/pages/cards/a.md",
        "---\ncontainergroups: [books]\ncontainerimage: img/a.png\ncontaineralttext: A cover\ncontainerlink: a.html\ncontainertitle: Atlas\n---\n",
    );
    write(
        root,
        "_data/pages/cards/b.md",
        "---\ncontainergroups: [movies, books]\ncontainerimage: img/b.png\ncontaineralttext: B cover\ncontainerlink: b.html\ncontainertitle: Brief\n---\n",
    );
    write(
        root,
        "_data/pages/blog/post.md",
        "---\ntitle: Post\nnavmenu: true\nnavorder: 3\n---\nHello.\n",
    );
    write(
        root,
        "_data/pages/orphan.md",
        "---\ntitle: Orphan\nlayout: missing\n---\nNo template.\n",
    );
    write(root, "_data/assets/templates/page.html", PAGE_TEMPLATE);
    write(
        root,
        "_data/assets/templates/containers.html",
        CONTAINERS_TEMPLATE,
    );
    write(root, "_data/assets/css/site.css", "body { margin: 0; }\n");
    dir
}

#[test]
fn build_site_renders_pages_and_copies_assets() {
    let project = sample_project();
    let root = project.path();

    let summary = build_site(root, &SiteLayout::default()).unwrap();
    assert_eq!(summary.data.pages, 6);
    assert_eq!(summary.data.directories, 3);
    assert_eq!(summary.render.rendered, 5);
    assert_eq!(summary.render.skipped, 1);
    assert_eq!(summary.asset_dirs_copied, 1);

    let index = fs::read_to_string(root.join("docs/index.html")).unwrap();
    assert!(index.contains("<title>Home</title>"));
    assert!(index.contains("<h1>Welcome</h1>"));
    assert!(index.contains(r#"<a href="./index.html" class="active">Home</a>"#));
    assert!(index.contains(r#"<a href="./gallery.html">Gallery</a>"#));
    assert!(!index.contains("blog/post.html"));
    assert!(index.contains(r#"href="./css/site.css""#));
    let home_at = index.find(">Home</a>").unwrap();
    let gallery_at = index.find(">Gallery</a>").unwrap();
    assert!(home_at < gallery_at, "menu must follow navorder, not file names");

    let post = fs::read_to_string(root.join("docs/blog/post.html")).unwrap();
    assert!(post.contains(r#"<a href="./../index.html">Home</a>"#));
    assert!(post.contains(r#"<a href="./../blog/post.html" class="active">Post</a>"#));
    assert!(post.contains(r#"href="./../css/site.css""#));

    let card = fs::read_to_string(root.join("docs/cards/a.html")).unwrap();
    assert!(card.contains("<title>Untitled</title>"));

    assert!(!root.join("docs/orphan.html").exists());
    assert_eq!(
        fs::read_to_string(root.join("docs/css/site.css")).unwrap(),
        "body { margin: 0; }\n"
    );
}

#[test]
fn rendered_gallery_is_filterable() {
    let project = sample_project();
    let root = project.path();
    build_site(root, &SiteLayout::default()).unwrap();

    let html = fs::read_to_string(root.join("docs/gallery.html")).unwrap();
    let mut controller = FilterController::attach(PageDom::parse(&html));
    assert_eq!(controller.keys(), ["all", "books", "movies"]);
    assert_eq!(controller.active_key(), Some("all"));

    controller.activate_key("movies").unwrap();
    let dom = controller.surface();
    assert_eq!(dom.visible_items(), [1]);
    assert_eq!(dom.items()[1].title.as_deref(), Some("Brief"));

    controller.activate_key("books").unwrap();
    assert_eq!(controller.surface().visible_items(), [0, 1]);
}

#[test]
fn page_json_uses_four_space_indent_and_keeps_front_matter() {
    let project = sample_project();
    let root = project.path();
    build_site(root, &SiteLayout::default()).unwrap();

    let raw = fs::read_to_string(root.join("_data/working/page_json/gallery.json")).unwrap();
    assert!(raw.contains("\n    \"title\": \"Gallery\""));
    let data: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(data["navorder"], 2);
    assert!(data["containers_markdown"]
        .as_str()
        .unwrap()
        .contains("data-filter=\"movies\""));
    assert!(data["page_markdown"]
        .as_str()
        .unwrap()
        .contains("<p>Pick a shelf.</p>"));
}

#[test]
fn page_json_keeps_front_matter_order_then_generated_keys() {
    let project = sample_project();
    let root = project.path();
    build_site(root, &SiteLayout::default()).unwrap();

    let raw = fs::read_to_string(root.join("_data/working/page_json/gallery.json")).unwrap();
    let position = |key: &str| raw.find(&format!("\"{key}\":")).unwrap();
    let order = [
        "title",
        "navmenu",
        "navorder",
        "layout",
        "containerspath",
        "page_markdown",
        "navigation_links",
        "containers_markdown",
    ];
    for pair in order.windows(2) {
        assert!(position(pair[0]) < position(pair[1]), "{} before {}", pair[0], pair[1]);
    }
}

#[test]
fn missing_containers_directory_degrades_only_that_page() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "pages/a_index.md", "---\ntitle: Home\n---\nfirst\n");
    write(
        dir.path(),
        "pages/gallery.md",
        "---\ntitle: Gallery\nlayout: containers\ncontainerspath: nope\n---\n",
    );
    write(dir.path(), "pages/z_last.md", "---\ntitle: Last\n---\nlast\n");

    let json_dir = dir.path().join("json");
    let summary = generate_data(&dir.path().join("pages"), &json_dir).unwrap();
    assert_eq!(summary.pages, 3);
    assert!(json_dir.join("a_index.json").exists());
    assert!(json_dir.join("z_last.json").exists());

    let gallery: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(json_dir.join("gallery.json")).unwrap())
            .unwrap();
    assert_eq!(gallery["containers_markdown"], "");
}

#[test]
fn later_asset_directories_are_copied_after_a_missing_one() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "assets/scripts/filter.js", "// filter\n");
    write(dir.path(), "assets/images/logo.svg", "<svg/>");

    let out = dir.path().join("out");
    let copied = copy_static_assets(
        &[
            dir.path().join("assets/css"),
            dir.path().join("assets/scripts"),
            dir.path().join("assets/images"),
        ],
        &out,
    )
    .unwrap();
    assert_eq!(copied, 2);
    assert!(!out.join("css").exists());
    assert!(out.join("scripts/filter.js").exists());
    assert!(out.join("images/logo.svg").exists());
}

#[test]
fn rebuild_replaces_copied_assets() {
    let project = sample_project();
    let root = project.path();
    build_site(root, &SiteLayout::default()).unwrap();

    write(root, "docs/css/stale.css", "old");
    build_site(root, &SiteLayout::default()).unwrap();
    assert!(!root.join("docs/css/stale.css").exists());
    assert!(root.join("docs/css/site.css").exists());
}

#[test]
fn missing_input_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate_data(&dir.path().join("nope"), &dir.path().join("json")).unwrap_err();
    assert!(matches!(err, SiteError::MissingDirectory { role: "input", .. }));
}

#[test]
fn missing_template_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("json")).unwrap();
    let err = render_site(
        &dir.path().join("json"),
        &dir.path().join("templates"),
        &dir.path().join("out"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SiteError::MissingDirectory {
            role: "template",
            ..
        }
    ));
}

#[test]
fn menu_page_without_order_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "pages/index.md",
        "---\ntitle: Home\nnavmenu: true\n---\n",
    );
    let err = generate_data(&dir.path().join("pages"), &dir.path().join("json")).unwrap_err();
    assert!(matches!(
        err,
        SiteError::MissingField {
            field: "navorder",
            ..
        }
    ));
}

#[test]
fn containers_page_without_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "pages/gallery.md",
        "---\ntitle: Gallery\nlayout: containers\n---\n",
    );
    let err = generate_data(&dir.path().join("pages"), &dir.path().join("json")).unwrap_err();
    assert!(matches!(
        err,
        SiteError::MissingField {
            field: "containerspath",
            ..
        }
    ));
}

#[test]
fn layout_config_overrides_output_dir() {
    let project = sample_project();
    let root = project.path();
    write(root, "folio.toml", "output_dir = \"public\"\n");

    let layout = SiteLayout::load(root).unwrap();
    build_site(root, &layout).unwrap();
    assert!(root.join("public/index.html").exists());
    assert!(!root.join("docs").exists());
}

#[test]
fn invalid_layout_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "folio.toml", "output_dir = 3\n");
    let err = SiteLayout::load(dir.path()).unwrap_err();
    assert!(matches!(err, SiteError::Config { .. }));
}
