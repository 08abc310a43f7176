//! Standalone print-ready HTML document template.

use std::fmt::Write;

use mdpress_blocks::escape_html;

/// Stylesheet for screen and A4 print output.
const STYLESHEET: &str = r#"
@media print {
    @page { size: A4; margin: 2cm; }
    body { margin: 0; padding: 0; }
    h1, h2, h3 { page-break-after: avoid; }
    table, pre, blockquote { page-break-inside: avoid; }
    .print-button { display: none; }
}
body {
    font-family: 'Segoe UI', 'Helvetica Neue', Arial, sans-serif;
    line-height: 1.6;
    color: #333;
    max-width: 210mm;
    margin: 0 auto;
    padding: 20px;
    background: #fff;
}
h1 {
    color: #2c3e50;
    border-bottom: 3px solid #3498db;
    padding-bottom: 10px;
    margin-top: 40px;
    font-size: 28px;
}
h1:first-child { margin-top: 0; text-align: center; font-size: 36px; }
h2 {
    color: #34495e;
    border-bottom: 2px solid #95a5a6;
    padding-bottom: 8px;
    margin-top: 30px;
    font-size: 22px;
}
h3 { color: #7f8c8d; margin-top: 20px; font-size: 18px; }
h4 { color: #95a5a6; margin-top: 15px; font-size: 16px; }
p { margin: 10px 0; text-align: justify; }
code {
    background-color: #f4f4f4;
    padding: 2px 6px;
    border-radius: 3px;
    font-family: 'Consolas', 'Monaco', 'Courier New', monospace;
    font-size: 0.9em;
    color: #e74c3c;
}
pre {
    background-color: #f8f8f8;
    border: 1px solid #ddd;
    border-left: 4px solid #3498db;
    border-radius: 4px;
    padding: 15px;
    overflow-x: auto;
    margin: 15px 0;
}
pre code { background-color: transparent; padding: 0; color: #333; font-size: 0.85em; line-height: 1.4; }
table { border-collapse: collapse; width: 100%; margin: 20px 0; font-size: 0.9em; }
th {
    background-color: #3498db;
    color: white;
    font-weight: bold;
    padding: 12px;
    text-align: left;
    border: 1px solid #2980b9;
}
td { padding: 10px 12px; border: 1px solid #ddd; }
tr:nth-child(even) { background-color: #f9f9f9; }
tr:hover { background-color: #f0f0f0; }
ul, ol { margin: 10px 0; padding-left: 30px; }
li { margin: 8px 0; }
li:has(input[type="checkbox"]) { list-style: none; margin-left: -20px; }
blockquote {
    border-left: 4px solid #3498db;
    margin: 20px 0;
    color: #555;
    font-style: italic;
    background-color: #f9f9f9;
    padding: 15px 20px;
}
hr { border: none; border-top: 2px solid #eee; margin: 30px 0; }
a { color: #3498db; text-decoration: none; }
a:hover { text-decoration: underline; }
strong { color: #2c3e50; font-weight: 600; }
.print-button {
    position: fixed;
    top: 20px;
    right: 20px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    padding: 12px 24px;
    border: none;
    border-radius: 8px;
    cursor: pointer;
    font-size: 16px;
    font-weight: 600;
    box-shadow: 0 4px 15px rgba(0,0,0,0.2);
    z-index: 1000;
}
.print-button:hover { transform: translateY(-2px); box-shadow: 0 6px 20px rgba(0,0,0,0.3); }
"#;

/// Ctrl+P / Cmd+P opens the print dialog.
const PRINT_SHORTCUT_SCRIPT: &str = r"
document.addEventListener('keydown', function (e) {
    if ((e.ctrlKey || e.metaKey) && e.key === 'p') {
        e.preventDefault();
        window.print();
    }
});
";

/// Wrap a rendered body fragment in a complete HTML document.
pub(crate) fn render_page(title: &str, body: &str, print_button: bool) -> String {
    let mut html = String::with_capacity(body.len() + STYLESHEET.len() + 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    writeln!(html, "<title>{}</title>", escape_html(title)).unwrap();
    html.push_str("<style>");
    html.push_str(STYLESHEET);
    html.push_str("</style>\n</head>\n<body>\n");

    if print_button {
        html.push_str(
            "<button class=\"print-button\" onclick=\"window.print()\">\
             🖨️ Print / Save as PDF</button>\n",
        );
    }

    html.push_str("<div class=\"content\">\n");
    html.push_str(body);
    html.push_str("</div>\n");

    html.push_str("<script>");
    html.push_str(PRINT_SHORTCUT_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}
