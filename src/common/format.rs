// src/common/format.rs
//
// Máscaras e conversões de campos no padrão brasileiro.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{common::error::AppError, models::client::DocumentType};

/// Mantém apenas os dígitos ASCII.
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

// =========================================================================
//  MOEDA (R$)
// =========================================================================

/// Formata um valor como moeda pt-BR: `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

// Limite da coluna NUMERIC(14, 2)
// 1_000_000_000_000 (0xE8_D4A5_1000) — `Decimal::new` não é `const fn`
const FEE_CEILING: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Converte o texto digitado no campo de honorários (`R$ 1.234,56`) em decimal.
///
/// Remove o símbolo e os separadores de milhar, troca a vírgula decimal por
/// ponto e rejeita valores negativos ou com mais de duas casas decimais.
pub fn parse_brl(input: &str) -> Result<Decimal, AppError> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Err(AppError::invalid("Informe o valor do honorário."));
    }

    let value = Decimal::from_str(&cleaned)
        .map_err(|_| AppError::invalid(format!("Valor inválido: '{}'.", input.trim())))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::invalid("O valor do honorário não pode ser negativo."));
    }
    if value.scale() > 2 {
        return Err(AppError::invalid(
            "O valor do honorário deve ter no máximo duas casas decimais.",
        ));
    }
    if value >= FEE_CEILING {
        return Err(AppError::invalid(format!(
            "O valor do honorário deve ser menor que {}.",
            format_brl(FEE_CEILING)
        )));
    }

    Ok(value.normalize().round_dp(2))
}

/// Máscara aplicada enquanto o usuário digita: os dígitos são lidos como
/// centavos (`123456` vira `R$ 1.234,56`).
pub fn mask_currency_input(raw: &str) -> String {
    let digits = only_digits(raw);
    let cents = digits.trim_start_matches('0');
    let value = if cents.is_empty() {
        Decimal::ZERO
    } else {
        // Valores absurdamente longos saturam em vez de estourar
        Decimal::from_str(cents)
            .map(|v| v / Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::MAX)
    };
    format_brl(value)
}

// =========================================================================
//  DOCUMENTOS, TELEFONE E CEP
// =========================================================================

fn apply_mask(digits: &str, mask: &str) -> String {
    let mut out = String::with_capacity(mask.len());
    let mut chars = digits.chars();
    for m in mask.chars() {
        if m == '9' {
            match chars.next() {
                Some(d) => out.push(d),
                None => break,
            }
        } else {
            out.push(m);
        }
    }
    out
}

/// Valida o CPF/CNPJ contra a máscara do tipo escolhido e devolve o valor
/// mascarado (`999.999.999-99` ou `99.999.999/9999-99`).
pub fn format_document(kind: DocumentType, value: &str) -> Result<String, AppError> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '/' | ' ');
    if !value.chars().all(allowed) {
        return Err(AppError::invalid(format!(
            "O {} contém caracteres inválidos.",
            kind.label()
        )));
    }

    let digits = only_digits(value);
    if digits.len() != kind.digit_count() {
        return Err(AppError::invalid(format!(
            "O {} deve ter {} dígitos.",
            kind.label(),
            kind.digit_count()
        )));
    }

    Ok(apply_mask(&digits, kind.mask()))
}

/// Telefone com DDD: 10 dígitos (fixo) ou 11 (celular).
pub fn format_phone(value: &str) -> Result<String, AppError> {
    let digits = only_digits(value);
    match digits.len() {
        11 => Ok(apply_mask(&digits, "(99) 99999-9999")),
        10 => Ok(apply_mask(&digits, "(99) 9999-9999")),
        _ => Err(AppError::invalid(format!(
            "Telefone inválido: '{}'.",
            value.trim()
        ))),
    }
}

pub const CEP_DIGITS: usize = 8;

/// Normaliza o CEP para os 8 dígitos.
pub fn normalize_cep(value: &str) -> Result<String, AppError> {
    let digits = only_digits(value);
    if digits.len() != CEP_DIGITS {
        return Err(AppError::invalid("O CEP deve ter 8 dígitos."));
    }
    Ok(digits)
}
