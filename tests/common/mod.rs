// tests/common/mod.rs
#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub fn write(root: &Path, rel: &str, body: &str) -> std::io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)
}

/// A small flat portfolio site in the shape the default plan expects.
pub fn portfolio(root: &Path) -> std::io::Result<()> {
    write(
        root,
        "index.html",
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Portfolio</title>
  <link rel="stylesheet" href="styles/styles.css">
</head>
<body>
  <img src="images/hero.png" alt="hero">
  <a href="pages/about.html">About</a>
  <script src="main.js"></script>
</body>
</html>
"#,
    )?;
    write(
        root,
        "pages/about.html",
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><meta name="viewport" content="width=device-width"><title>About</title></head>
<body>
  <img src="../images/me.png" alt="me">
  <script src="../main.js"></script>
</body>
</html>
"#,
    )?;
    write(root, "styles/styles.css", "body { margin: 0; }\n")?;
    write(root, "main.js", "console.log('hi');\n")?;
    write(root, "images/hero.png", "png")?;
    write(root, "images/me.png", "png")?;
    write(root, "README.md", "# site\n")?;
    Ok(())
}
