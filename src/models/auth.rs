// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Registro de credencial vindo da tabela 'login_advogados'
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LawyerCredential {
    pub id: i64,
    pub advogado_id: i64,
    pub nome: String,
    pub email: Option<String>,
    pub oab: String,
    pub cpf: Option<String>,
    // Hash bcrypt, nunca serializado
    pub senha: String,
}

impl LawyerCredential {
    pub fn identity(&self) -> LawyerIdentity {
        LawyerIdentity {
            id: self.advogado_id,
            nome_completo: self.nome.clone(),
            oab: self.oab.clone(),
        }
    }

    pub fn profile(&self) -> LawyerProfile {
        LawyerProfile {
            nome: self.nome.clone(),
            email: self.email.clone(),
            oab: self.oab.clone(),
            cpf: self.cpf.clone(),
        }
    }
}

/// Identidade do advogado logado, persistida na sessão.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LawyerIdentity {
    #[schema(example = 7)]
    pub id: i64,
    #[schema(example = "Ana")]
    pub nome_completo: String,
    #[schema(example = "12345")]
    pub oab: String,
}

/// Contexto de sessão entregue a toda operação protegida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub lawyer: LawyerIdentity,
}

impl Session {
    pub fn lawyer_id(&self) -> i64 {
        self.lawyer.id
    }
}

/// Estado explícito da sessão: nunca seguimos com um dono nulo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn require(self) -> Result<Session, crate::common::error::AppError> {
        match self {
            SessionState::Authenticated(session) => Ok(session),
            SessionState::Anonymous => Err(crate::common::error::AppError::Unauthenticated),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LawyerProfile {
    pub nome: String,
    pub email: Option<String>,
    pub oab: String,
    pub cpf: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Informe a OAB."))]
    #[schema(example = "12345")]
    pub oab: String,
    #[validate(length(min = 1, message = "Informe a senha."))]
    pub password: String,
}

// Resposta de autenticação com o token e a identidade
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub advogado: LawyerIdentity,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordPayload {
    #[validate(length(min = 1, message = "A nova senha não pode estar vazia."))]
    pub senha: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // ID do advogado
    pub sid: Uuid,  // ID da sessão persistida
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
