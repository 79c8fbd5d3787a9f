//! Sample static site tree shared by the integration tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A small tree with a mail site, its blog downdomain, an updomain, and the
/// search site's data files.
pub fn sample() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "mail/start.html",
        r##"<!DOCTYPE html>
<html><head><title>Mail</title><link rel="stylesheet" href="/style.css"></head>
<body>
<a href="folder/page.html">folder</a>
<a href="https://example.com/">outside</a>
<a href="#inbox">inbox</a>
<form action="send.html" method="get"><input name="to"></form>
<script>var s = '<a href="ignored.html">';</script>
<p id="inbox">Inbox</p>
</body></html>
"##,
    );
    write(
        root,
        "mail/folder/page.html",
        r#"<html><head></head><body><a href="../other.html">other</a><img src="logo.png"></body></html>"#,
    );
    write(root, "mail/other.html", "<p>other</p>");
    write(root, "mail/style.css", "body { color: black; }");
    write(
        root,
        "mail/blog.downdomain/start.html",
        r#"<a href="post.html">post</a><a href="/about.html">about</a>"#,
    );
    write(root, "mail/blog.downdomain/post.html", "<p>post</p>");
    write(root, "mail/blog.downdomain/about.html", "<p>about</p>");
    write(
        root,
        "mail/imagining.updomain/start.html",
        r#"<p>imagining</p><a href="story.html">story</a><form action="/send.html"></form>"#,
    );
    write(root, "mail/imagining.updomain/story.html", "<p>story</p>");
    write(
        root,
        "searchit/catalog.json",
        r#"[
  {"name": "mailbox.vs", "description": "Boxes for everything", "category": "mail"},
  {"name": "mail.vs", "description": "Mail service", "category": "mail"},
  {"name": "post.vs", "description": "Send mail anywhere", "category": "office"},
  {"name": "news.vs", "description": "News portal", "category": "news"}
]"#,
    );
    write(root, "searchit/verified.txt", "# trusted\npost.vs\n");
    dir
}
