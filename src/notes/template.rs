//! Markdown template substitution
//!
//! Templates carry `{{key}}` placeholders replaced from a string
//! context. Unknown placeholders are left verbatim so a missing key is
//! visible in the generated note rather than silently blank.

use std::collections::BTreeMap;

/// Default template for a single property note
pub const PROPERTY_TEMPLATE: &str = "\
---
id: {{id_propriedade}}
tipo: {{tipo}}
status: {{status}}
cidade: {{cidade}}
estado: {{estado}}
atualizado: {{date}}
---

# {{nome}}

**Endereco:** {{endereco}}, {{cidade}} - {{estado}}, CEP {{cep}}
**Area:** {{area_m2}} m2
**Inquilino:** {{inquilino}}

## Financeiro

| Metrica | Valor |
| --- | --- |
| Valor de aquisicao | R$ {{valor_aquisicao}} |
| Valor atual | R$ {{valor_atual}} |
| Valorizacao | R$ {{valorizacao}} ({{valorizacao_pct}}%) |
| Renda mensal | R$ {{renda_mensal}} |
| Renda anual | R$ {{renda_anual}} |
| Yield anual | {{yield_anual}}% |

Adquirida em {{data_aquisicao}}.

[[Portfolio_Dashboard]]
";

/// Default template for the portfolio dashboard note
pub const DASHBOARD_TEMPLATE: &str = "\
---
atualizado: {{date}}
proxima_atualizacao: {{next_update}}
---

# Portfolio Dashboard

## Visao geral

| Metrica | Valor |
| --- | --- |
| Propriedades | {{total_properties}} |
| Valor total | R$ {{total_value}} |
| Renda mensal | R$ {{monthly_income}} |
| Renda anual | R$ {{annual_income}} |
| Yield medio | {{average_yield}}% |

## Ocupacao

- Ocupadas: {{occupied_count}} ({{occupied_pct}}%)
- Vagas: {{vacant_count}} ({{vacant_pct}}%)
- Em reforma: {{reform_count}}
- A venda: {{sale_count}}

## Por tipo

| Tipo | Qtde | Valor | Renda mensal |
| --- | --- | --- | --- |
| Residencial | {{res_count}} | R$ {{res_value}} | R$ {{res_income}} |
| Comercial | {{com_count}} | R$ {{com_value}} | R$ {{com_income}} |
| Industrial | {{ind_count}} | R$ {{ind_value}} | R$ {{ind_income}} |
| Terreno | {{ter_count}} | R$ {{ter_value}} | R$ {{ter_income}} |

## Valorizacao

- Aquisicao total: R$ {{total_acquisition}}
- Valor atual total: R$ {{total_current}}
- Valorizacao: R$ {{total_appreciation}} ({{appreciation_pct}}%)

## Top 5 por valor

1. {{top1_name}} - R$ {{top1_value}}
2. {{top2_name}} - R$ {{top2_value}}
3. {{top3_name}} - R$ {{top3_value}}
4. {{top4_name}} - R$ {{top4_value}}
5. {{top5_name}} - R$ {{top5_value}}

## Top 5 por renda

1. {{income_top1_name}} - R$ {{income_top1_value}}
2. {{income_top2_name}} - R$ {{income_top2_value}}
3. {{income_top3_name}} - R$ {{income_top3_value}}
4. {{income_top4_name}} - R$ {{income_top4_value}}
5. {{income_top5_name}} - R$ {{income_top5_value}}
";

/// Replaces every `{{key}}` occurrence with its context value.
pub fn render(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in context {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_all_occurrences() {
        let mut context = BTreeMap::new();
        context.insert("nome".to_string(), "Casa".to_string());
        let out = render("# {{nome}}\n{{nome}} again", &context);
        assert_eq!(out, "# Casa\nCasa again");
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        let context = BTreeMap::new();
        let out = render("{{missing}}", &context);
        assert_eq!(out, "{{missing}}");
    }
}
