// Shared prompt constants and prompt-building utilities.
// Task-specific templates live in analysis::prompts.

/// System instruction sent with every completion request.
pub const ANALYST_SYSTEM: &str = "You are an expert resume and job matching analyst.";

/// Closing instruction appended to every task prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "IMPORTANT: Return ONLY valid JSON. \
    Do not include any additional text or explanations outside the JSON structure.";

/// Renders `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so caller text that happens to contain
/// `{resume_text}` is embedded verbatim. Braces that do not form a known
/// placeholder (e.g. JSON examples) are copied through untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = values.iter().find_map(|(key, value)| {
            after
                .strip_prefix(key)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });
        match replaced {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
