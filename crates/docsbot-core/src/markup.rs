//! Markup subset emitted by the documentation generator into indexed fields.

/// Literal rewrites, applied in order. The two-tag code-block forms must run
/// before the bare `<code>` forms.
const SUBSTITUTIONS: [(&str, &str); 9] = [
    ("<p>", ""),
    ("</p>", "\n\n"),
    ("<pre><code>", "```"),
    ("</code></pre>", "```"),
    ("<code>", "`"),
    ("</code>", "`"),
    ("<ol>", ""),
    ("</ol>", "\n"),
    ("<li>", "*"),
];

/// Rewrite paragraph, code and ordered-list tags into markdown-ish text.
///
/// Anything outside the subset, entities included, passes through untouched.
pub fn normalize_markup(input: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(input.to_string(), |acc, (from, to)| acc.replace(from, to))
}
