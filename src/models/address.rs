// src/models/address.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::format::{only_digits, CEP_DIGITS};

/// Endereço derivado do CEP (somente leitura no formulário).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub logradouro: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

/// Máquina de estados da consulta de CEP.
///
/// `Idle -> LookingUp -> { Resolved | Failed }`. Uma nova consulta só é
/// disparada quando o CEP completa 8 dígitos e é diferente do último
/// consultado.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupState {
    #[default]
    Idle,
    LookingUp { cep: String },
    Resolved { cep: String, address: Address },
    Failed { cep: String, warning: String },
}

/// Campo de CEP com o endereço derivado.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalCodeField {
    value: String,
    state: LookupState,
}

impl PostalCodeField {
    /// Campo já resolvido (cliente carregado do banco).
    pub fn resolved(cep: &str, address: Address) -> Self {
        let digits = only_digits(cep);
        Self {
            value: digits.clone(),
            state: LookupState::Resolved { cep: digits, address },
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Registra uma alteração no campo. Devolve o CEP a consultar quando a
    /// alteração completa um código novo.
    pub fn on_input(&mut self, raw: &str) -> Option<String> {
        let digits = only_digits(raw);
        self.value = digits.clone();

        if digits.len() != CEP_DIGITS {
            // Código incompleto: endereço derivado deixa de valer
            self.state = LookupState::Idle;
            return None;
        }

        let same_code = match &self.state {
            LookupState::LookingUp { cep }
            | LookupState::Resolved { cep, .. }
            | LookupState::Failed { cep, .. } => *cep == digits,
            LookupState::Idle => false,
        };
        if same_code {
            return None;
        }

        self.state = LookupState::LookingUp { cep: digits.clone() };
        Some(digits)
    }

    /// Aplica o resultado da consulta. Respostas de um código que já não
    /// está no campo são descartadas.
    pub fn complete(&mut self, cep: &str, result: Result<Option<Address>, String>) {
        match &self.state {
            LookupState::LookingUp { cep: pending } if pending == cep => {}
            _ => return,
        }

        let cep = cep.to_string();
        self.state = match result {
            Ok(Some(address)) => LookupState::Resolved { cep, address },
            Ok(None) => LookupState::Failed {
                cep,
                warning: "Nenhum endereço encontrado para este CEP.".to_string(),
            },
            Err(reason) => LookupState::Failed {
                cep,
                warning: format!("Erro ao buscar o CEP ({reason}). Verifique se o CEP está correto."),
            },
        };
    }

    pub fn address(&self) -> Option<&Address> {
        match &self.state {
            LookupState::Resolved { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match &self.state {
            LookupState::Failed { warning, .. } => Some(warning),
            _ => None,
        }
    }
}
