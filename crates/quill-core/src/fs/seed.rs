//! Built-in starter project loaded at startup

use super::tree::{FileNode, FileTree};

/// Id of the file opened in the editor on first launch (`src/script.js`)
pub const DEFAULT_OPEN_FILE_ID: &str = "5";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>My Awesome App</title>
  <link rel="stylesheet" href="style.css">
</head>
<body>
  <h1>Welcome!</h1>
  <p>This is a sample project.</p>
  <script src="script.js"></script>
</body>
</html>"#;

const STYLE_CSS: &str = "body {
  font-family: sans-serif;
  background-color: #f0f0f0;
  color: #333;
}";

const SCRIPT_JS: &str = r#"// Welcome to your project!
// Feel free to edit this file.

function changeHeaderColor() {
  const heading = document.querySelector('h1');
  if (heading) {
    heading.style.color = 'deepskyblue';
  }
}

function createGreeting() {
    const container = document.body;
    const existingGreeting = document.getElementById('greeting');
    if (existingGreeting) {
        container.removeChild(existingGreeting);
    }

    const name = "User"; // Try changing this!
    const p = document.createElement('p');
    p.id = 'greeting';
    p.textContent = `Hello, ${name}! This element was added by JavaScript.`;
    container.appendChild(p);

    // This loop is just for demonstration
    // It could be inefficient on a large scale.
    let count = 0;
    for (let i = 0; i < 1000; i++) {
        count += i;
    }
    console.log('Calculation finished. Sum:', count);
}

document.addEventListener('DOMContentLoaded', () => {
    changeHeaderColor();
    createGreeting();
});"#;

const PACKAGE_JSON: &str = r#"{
  "name": "web-ide-project",
  "version": "1.0.0",
  "description": "A sample project for the Web IDE",
  "main": "src/script.js",
  "scripts": {
    "start": "node ."
  }
}"#;

/// The starter project: `public/index.html`, `src/style.css`,
/// `src/script.js` and a root `package.json`
pub fn seed_project() -> FileTree {
    FileTree::from_trusted(vec![
        FileNode::folder(
            "1",
            "public",
            "/public",
            vec![FileNode::file("2", "index.html", "/public/index.html", INDEX_HTML)],
        ),
        FileNode::folder(
            "3",
            "src",
            "/src",
            vec![
                FileNode::file("4", "style.css", "/src/style.css", STYLE_CSS),
                FileNode::file("5", "script.js", "/src/script.js", SCRIPT_JS),
            ],
        ),
        FileNode::file("6", "package.json", "/package.json", PACKAGE_JSON),
    ])
}
