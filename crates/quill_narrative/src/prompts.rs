//! Role prompts for the three stages.
//!
//! Project context is pasted verbatim ahead of the task so the model sees
//! the style guide and canon exactly as written.

use quill_core::{Brief, Draft, Plan, ProjectContext};

fn context_block(context: &ProjectContext) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("CONTEXTO DO PROJETO:\n{}\n\n", context.render())
    }
}

fn hints_block(brief: &Brief) -> String {
    let hints = brief.hints();
    let mut lines = Vec::new();
    if let Some(location) = hints.location() {
        lines.push(format!("Local: {location}"));
    }
    if !hints.characters().is_empty() {
        lines.push(format!("Personagens: {}", hints.characters().join(", ")));
    }
    if let Some(mood) = hints.mood() {
        lines.push(format!("Clima emocional: {mood}"));
    }
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

/// Planner: brief to beat list.
pub fn planner_prompt(brief: &Brief, context: &ProjectContext) -> String {
    format!(
        "{context}Você é o planejador de cenas de um romance em português brasileiro.\n\
         Divida o pedido abaixo em uma sequência de batidas narrativas.\n\n\
         PEDIDO:\n{brief}\n{hints}\n\
         Responda somente com linhas no formato:\n\
         BEAT: <o que acontece> | <tom>\n\
         Use entre 4 e 8 linhas e nada além delas.",
        context = context_block(context),
        brief = brief.text().trim(),
        hints = hints_block(brief),
    )
}

/// Writer: brief plus plan to draft prose.
pub fn writer_prompt(brief: &Brief, plan: &Plan, context: &ProjectContext) -> String {
    format!(
        "{context}Você é o escritor de um romance em português brasileiro.\n\
         Escreva a cena pedida seguindo as batidas na ordem dada.\n\n\
         PEDIDO:\n{brief}\n{hints}\n\
         BATIDAS:\n{beats}\n\n\
         Escreva entre 300 e 600 palavras de prosa literária, em terceira pessoa, \
         com diálogos entre aspas e detalhes sensoriais do ambiente. \
         Não inclua títulos, listas ou comentários.\n\n\
         CENA:",
        context = context_block(context),
        brief = brief.text().trim(),
        hints = hints_block(brief),
        beats = plan.render(),
    )
}

/// Editor: draft to polished scene.
pub fn editor_prompt(brief: &Brief, draft: &Draft, context: &ProjectContext) -> String {
    format!(
        "{context}Você é o editor de um romance em português brasileiro.\n\
         Revise a cena abaixo: corrija gramática e pontuação, melhore o ritmo, \
         elimine repetições e mantenha a voz, os nomes e os acontecimentos.\n\n\
         PEDIDO ORIGINAL:\n{brief}\n\n\
         CENA:\n{draft}\n\n\
         Devolva apenas o texto revisado, sem comentários.\n\n\
         VERSÃO FINAL:",
        context = context_block(context),
        brief = brief.text().trim(),
        draft = draft.content().trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{Beat, BriefHints, Provenance};

    #[test]
    fn context_is_included_verbatim() {
        let context = ProjectContext::default()
            .with_style_guide("Frases curtas. Nada de advérbios.")
            .with_canon("ivana", "Ivana é restauradora no MASP.");
        let prompt = planner_prompt(&Brief::new("Uma cena"), &context);
        assert!(prompt.starts_with("CONTEXTO DO PROJETO:"));
        assert!(prompt.contains("Frases curtas. Nada de advérbios."));
        assert!(prompt.contains("Ivana é restauradora no MASP."));
    }

    #[test]
    fn empty_context_adds_nothing() {
        let prompt = planner_prompt(&Brief::new("Uma cena"), &ProjectContext::default());
        assert!(!prompt.contains("CONTEXTO"));
        assert!(prompt.contains("BEAT:"));
    }

    #[test]
    fn writer_lists_beats_and_hints() {
        let brief = Brief::new("Encontro no café")
            .with_hints(BriefHints::default().with_character("Ivana"));
        let plan = Plan::new(vec![Beat::new("Ivana chega", "tenso")], Provenance::Ai);
        let prompt = writer_prompt(&brief, &plan, &ProjectContext::default());
        assert!(prompt.contains("BEAT: Ivana chega | tenso"));
        assert!(prompt.contains("Personagens: Ivana"));
        assert!(prompt.ends_with("CENA:"));
    }

    #[test]
    fn editor_carries_draft() {
        let draft = Draft::new("Texto do rascunho.", Provenance::Fallback);
        let prompt = editor_prompt(&Brief::new("Pedido"), &draft, &ProjectContext::default());
        assert!(prompt.contains("Texto do rascunho."));
        assert!(prompt.ends_with("VERSÃO FINAL:"));
    }
}
