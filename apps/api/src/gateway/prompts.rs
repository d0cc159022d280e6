// Gateway prompt templates.
// The assistant speaks Brazilian Portuguese; placeholders are `{name}`.

pub const MARIA_SYSTEM: &str = "\
Você é a Maria, uma professora especialista em redação do ENEM. \
Responda sempre em português do Brasil, com linguagem clara, acolhedora e didática. \
Ajude estudantes a compreender as cinco competências do ENEM, a estruturar textos \
dissertativo-argumentativos e a construir propostas de intervenção completas. \
Seja objetiva: prefira respostas curtas com exemplos práticos.";

pub const CORRECTION_PROMPT_TEMPLATE: &str = r#"Corrija a redação abaixo seguindo os critérios oficiais do ENEM.

Para cada uma das cinco competências (C1 a C5):
- atribua uma nota de 0 a 200;
- liste os pontos fortes;
- liste os pontos a melhorar.

Ao final, informe a nota final (soma das cinco competências, de 0 a 1000) e dê sugestões concretas de reescrita.

REDAÇÃO:
{essay_text}"#;

pub const REPERTOIRE_PROMPT_TEMPLATE: &str = r#"Sugira repertórios socioculturais legitimados para uma redação do ENEM sobre o tema abaixo.

Inclua:
- citações de pensadores ou autores, com o nome do autor;
- dados ou fatos históricos pertinentes;
- referências a leis, à Constituição Federal ou a documentos oficiais;
- obras literárias, filmes ou acontecimentos atuais relacionados.

Para cada repertório, explique em uma frase como usá-lo na argumentação.

TEMA:
{theme}"#;

pub const CHAT_FALLBACK: &str =
    "Desculpe, não consegui gerar uma resposta agora. Pode reformular sua pergunta?";
pub const CORRECTION_FALLBACK: &str =
    "Não foi possível gerar a correção da redação. Tente novamente em instantes.";
pub const REPERTOIRE_FALLBACK: &str =
    "Não foi possível gerar sugestões de repertório para este tema. Tente novamente.";

pub const CHAT_FAILED: &str = "Erro ao processar mensagem";
pub const CORRECTION_FAILED: &str = "Erro ao corrigir redação";
pub const REPERTOIRE_FAILED: &str = "Erro ao gerar repertório";
