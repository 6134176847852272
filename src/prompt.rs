//! The text handed to a test-scenario generator.
//!
//! A record is flattened into section titles followed by their requirement
//! texts, and appended to an instruction template. The generator's response
//! is not interpreted here. Labels and the built-in template follow the
//! configured [`Locale`].

use std::fmt::Write;

use crate::domain::{DocumentRecord, Locale};

/// The default English instruction template, asking for QA test scenarios as
/// JSON.
pub const DEFAULT_TEMPLATE: &str = "\
You are a senior QA engineer.

Write a complete test suite for the requirements listed below. Cover the
happy path, input validation, permissions, error handling, performance,
security and boundary conditions.

Return only valid JSON (no markdown) with the keys \"functional_scenarios\",
\"negative_scenarios\" and \"edge_scenarios\". Each scenario has an \"id\"
(TC-<TYPE>-<NNN>), a \"title\", a \"description\", a list of
\"preconditions\", a list of executable \"steps\" and a measurable
\"expected_result\".";

/// The default Portuguese instruction template.
pub const DEFAULT_TEMPLATE_PT: &str = "\
Você é um Engenheiro de QA Sênior.

Gere uma suíte completa de testes para os requisitos listados abaixo. Cubra o
caminho feliz, validações de entrada, permissões, tratamento de erros,
performance, segurança e condições de borda.

Retorne apenas JSON válido (sem markdown) com as chaves \"cenarios_funcionais\",
\"cenarios_negativos\" e \"cenarios_borda\". Cada cenário tem um \"id\"
(TC-<TIPO>-<NNN>), um \"titulo\", uma \"descricao\", uma lista de
\"pre_condicoes\", uma lista de \"passos\" executáveis e um
\"resultado_esperado\" mensurável.";

/// Returns the built-in template for a locale.
#[must_use]
pub const fn default_template(locale: Locale) -> &'static str {
    match locale {
        Locale::En => DEFAULT_TEMPLATE,
        Locale::Pt => DEFAULT_TEMPLATE_PT,
    }
}

/// Heading labels of the flattened requirements.
struct Labels {
    requirements: &'static str,
    section: &'static str,
}

impl Labels {
    const fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                requirements: "REQUIREMENTS",
                section: "SECTION",
            },
            Locale::Pt => Self {
                requirements: "REQUISITOS ANALISADOS",
                section: "SEÇÃO",
            },
        }
    }
}

/// Renders the requirements of a record, one section at a time.
///
/// Each section contributes a `SECTION: <title>` line (`SEÇÃO` in
/// Portuguese, with an empty title for an untitled section) followed by one
/// `- <text>` line per requirement.
#[must_use]
pub fn render_requirements(record: &DocumentRecord, locale: Locale) -> String {
    let label = Labels::for_locale(locale).section;
    let mut rendered = String::new();
    for section in record.sections() {
        // Writing to a String cannot fail
        let _ = writeln!(rendered, "\n{label}: {}", section.title().unwrap_or_default());
        for requirement in section.requirements() {
            let _ = writeln!(rendered, "- {}", requirement.text);
        }
    }
    rendered
}

/// Renders the full prompt: the template followed by the flattened
/// requirements.
#[must_use]
pub fn render(record: &DocumentRecord, template: &str, locale: Locale) -> String {
    format!(
        "{template}\n\n{}:\n{}",
        Labels::for_locale(locale).requirements,
        render_requirements(record, locale)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentBuilder, Paragraph};

    fn record() -> DocumentRecord {
        DocumentBuilder::default().build(
            "spec.md",
            vec![
                Paragraph::new("Preamble, not a requirement."),
                Paragraph::new("If offline, queue writes."),
                Paragraph::new("Login").with_style("Heading 1"),
                Paragraph::new("REQ-1 and REQ-2 cover passwords."),
                Paragraph::new("Notes").with_style("Heading 1"),
            ],
        )
    }

    #[test]
    fn flattens_sections_and_requirements() {
        assert_eq!(
            render_requirements(&record(), Locale::En),
            "\nSECTION: \n\
             - If offline, queue writes.\n\
             \nSECTION: Login\n\
             - REQ-1 and REQ-2 cover passwords.\n\
             - REQ-1 and REQ-2 cover passwords.\n\
             \nSECTION: Notes\n"
        );
    }

    #[test]
    fn template_comes_first() {
        let prompt = render(&record(), "Generate tests.", Locale::En);
        assert!(prompt.starts_with("Generate tests.\n\nREQUIREMENTS:\n\nSECTION: \n"));
        assert!(!prompt.contains("Preamble"));
    }

    #[test]
    fn default_template_asks_for_json() {
        assert!(default_template(Locale::En).contains("valid JSON"));
        assert!(default_template(Locale::Pt).contains("JSON válido"));
    }

    #[test]
    fn portuguese_labels() {
        let prompt = render(&record(), default_template(Locale::Pt), Locale::Pt);
        assert!(prompt.starts_with(DEFAULT_TEMPLATE_PT));
        assert!(prompt.contains("\n\nREQUISITOS ANALISADOS:\n\nSEÇÃO: \n"));
        assert!(prompt.contains("\nSEÇÃO: Login\n- REQ-1"));
        assert!(!prompt.contains("SECTION"));
    }
}
