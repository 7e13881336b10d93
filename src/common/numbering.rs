// src/common/numbering.rs
//
// Gerador puro do próximo número sequencial legível (APP-000001, LIC-000001).
// O valor máximo atual vem de quem chama; a serialização contra corridas de
// alocação acontece na camada de repositório, dentro da mesma transação.

pub const APPLICATION_PREFIX: &str = "APP";
pub const LICENSE_PREFIX: &str = "LIC";

/// Calcula o próximo número da sequência a partir do maior já alocado.
///
/// `None`, prefixo errado ou sufixo não numérico reiniciam a contagem em 1.
/// Acima de 999999 o campo simplesmente alarga (`APP-1000000`).
pub fn next_number(prefix: &str, current_max: Option<&str>) -> String {
    let head = format!("{prefix}-");
    let next = current_max
        .and_then(|max| max.strip_prefix(head.as_str()))
        .map(|suffix| suffix.parse::<u64>().unwrap_or(0) + 1)
        .unwrap_or(1);
    format!("{head}{next:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_when_no_number_exists() {
        assert_eq!(next_number(APPLICATION_PREFIX, None), "APP-000001");
        assert_eq!(next_number(LICENSE_PREFIX, None), "LIC-000001");
    }

    #[test]
    fn increments_the_current_maximum() {
        assert_eq!(next_number(APPLICATION_PREFIX, Some("APP-000041")), "APP-000042");
        assert_eq!(next_number(LICENSE_PREFIX, Some("LIC-000009")), "LIC-000010");
    }

    #[test]
    fn widens_past_six_digits() {
        assert_eq!(next_number(APPLICATION_PREFIX, Some("APP-999999")), "APP-1000000");
        assert_eq!(next_number(APPLICATION_PREFIX, Some("APP-1000000")), "APP-1000001");
    }

    #[test]
    fn garbage_input_restarts_the_sequence() {
        assert_eq!(next_number(APPLICATION_PREFIX, Some("garbage")), "APP-000001");
        assert_eq!(next_number(APPLICATION_PREFIX, Some("LIC-000041")), "APP-000001");
    }

    #[test]
    fn non_numeric_suffix_is_treated_as_zero() {
        assert_eq!(next_number(APPLICATION_PREFIX, Some("APP-00004X")), "APP-000001");
    }
}
