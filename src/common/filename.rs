// src/common/filename.rs
//
// Nomes de arquivo e segmentos de caminho usados no storage de processos.

use chrono::{DateTime, Utc};

/// Raiz de todos os anexos no bucket.
pub const CASE_ROOT: &str = "processos";

/// Restringe o nome ao conjunto `[A-Za-z0-9._]`.
///
/// Qualquer outro caractere vira `_`, assim como pontos iniciais (impede
/// `..` e arquivos ocultos). O resultado nunca é vazio e aplicar a função
/// duas vezes não muda nada.
pub fn sanitize(name: &str) -> String {
    let mut leading = true;
    let sanitized: String = name
        .chars()
        .map(|c| {
            let keep = c.is_ascii_alphanumeric() || (c == '.' && !leading);
            if c != '.' {
                leading = false;
            }
            if keep { c } else { '_' }
        })
        .collect();

    if sanitized.is_empty() {
        "arquivo".to_string()
    } else {
        sanitized
    }
}

/// O número do processo vira um único segmento de caminho (`0001/2024` ->
/// `0001_2024`).
pub fn case_segment(numero: &str) -> String {
    sanitize(numero.trim())
}

/// Prefixo onde ficam os anexos de um processo.
pub fn case_prefix(numero: &str) -> String {
    format!("{}/{}", CASE_ROOT, case_segment(numero))
}

/// Caminho de um anexo dentro do prefixo do processo.
pub fn case_file_path(numero: &str, file_name: &str) -> String {
    format!("{}/{}", case_prefix(numero), sanitize(file_name))
}

/// Nome único para o documento principal: `{epoch_millis}-{nome}`.
pub fn unique_name(file_name: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", now.timestamp_millis(), sanitize(file_name))
}
