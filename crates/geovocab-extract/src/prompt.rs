//! Extraction prompt.

/// Persona sent as the system instruction with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a petroleum geologist and ontology engineer \
working on South Atlantic pre-salt petroleum systems. Extract the core geological concepts \
from technical text so they can become classes in a domain ontology used to describe and \
compare analogue reservoir settings.";

const PROMPT_TEMPLATE: &str = r#"Identify every term or phrase in the text below that names a geological concept.

Rules:
1. Keep concepts that are reusable classes: rock types, processes, structures, environments, properties, ages.
2. Translate every concept to English and give it in singular base form and title case ("faults" -> "Fault").
3. Leave out proper nouns that are not concepts (wells, fields, basins, authors, companies).
4. Leave out units, numbers, percentages and chemical or catalogue codes.
5. Do not rank or truncate the list.

Reply with a JSON array of unique strings and nothing else, for example:
["Microbial Carbonate", "Diagenesis", "Source Rock", "Structural Trap", "Porosity"]

TEXT:
{paper}
"#;

/// Fill the prompt template with one paper.
pub fn build_prompt(paper: &str) -> String {
    PROMPT_TEMPLATE.replace("{paper}", paper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_paper_once() {
        let prompt = build_prompt("Aptian lacustrine carbonates of the Barra Velha Formation.");
        assert!(prompt.ends_with("Aptian lacustrine carbonates of the Barra Velha Formation.\n"));
        assert!(!prompt.contains("{paper}"));
        assert_eq!(prompt.matches("Barra Velha").count(), 1);
    }
}
