use vulnscore_core::VulnerabilityRecord;

/// Compiled-in system prompt for CVSS generation
pub const CVSS_SYSTEM_PROMPT: &str = r#"You are an expert vulnerability analyst who assigns CVSS v3.1 base metrics.
You will be given a vulnerability identifier, title, description and optional extra context.

Choose a value for each of the eight base metrics:
- Attack Vector (AV): N, A, L or P
- Attack Complexity (AC): L or H
- Privileges Required (PR): N, L or H
- User Interaction (UI): N or R
- Scope (S): U or C
- Confidentiality (C), Integrity (I), Availability (A): H, L or N

Respond with the vector string ONLY, exactly in this form and with no other text:
CVSS:3.1/AV:_/AC:_/PR:_/UI:_/S:_/C:_/I:_/A:_
"#;

/// Human-facing prompt rendered per record
pub const CVSS_HUMAN_PROMPT: &str = r#"Assign a CVSS v3.1 base vector to the following vulnerability.

- **ID**: {id}
- **Title**: {title}
- **Description**: {description}
{additional_context}
Return only the CVSS:3.1 vector string."#;

pub const CVSS_CONTEXT_SECTION: &str = r#"
## Additional Context
{fields}
"#;

/// Placeholder used when a record carries no description
pub const MISSING_DESCRIPTION: &str = "Not provided";

pub struct PromptBuilder;

impl PromptBuilder {
    /// Render the human prompt for `record`.
    ///
    /// A missing description renders as [`MISSING_DESCRIPTION`]; extra record
    /// fields are listed under an "Additional Context" heading.
    pub fn build_cvss_prompt(record: &VulnerabilityRecord) -> String {
        let fields = record.context_fields();
        let additional_context = if fields.is_empty() {
            String::new()
        } else {
            let lines = fields
                .iter()
                .map(|(key, value)| format!("- {}: {}", key, value))
                .collect::<Vec<_>>()
                .join("\n");
            render(CVSS_CONTEXT_SECTION, &[("fields", lines.as_str())])
        };

        render(
            CVSS_HUMAN_PROMPT,
            &[
                ("id", record.id.trim()),
                ("title", record.title.trim()),
                ("description", record.description().unwrap_or(MISSING_DESCRIPTION)),
                ("additional_context", additional_context.as_str()),
            ],
        )
    }
}

/// Substitute `{name}` placeholders in a single pass.
///
/// Substituted text is never rescanned, so braces inside record fields survive
/// verbatim. Unknown placeholders are left as they are.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
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
