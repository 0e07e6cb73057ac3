// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// Cards do painel inicial do advogado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub advogado: String,
    pub oab: String,
    pub total_processos: usize, // Processos do advogado
    pub total_clientes: usize,  // Clientes distintos nesses processos
}
