/// Prefixes every occurrence of each character in `escapes` with a backslash.
///
/// Characters are processed in the order given, so an escape set containing `\` after other
/// characters also escapes the backslashes added for them.
pub fn custom_markdown_escape(text: &str, escapes: &str) -> String {
    let mut out = text.to_string();
    for e in escapes.chars() {
        let mut escaped = String::with_capacity(2);
        escaped.push('\\');
        escaped.push(e);
        out = out.replace(e, &escaped);
    }
    out
}
