use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Erro ao acessar GE.globo: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Data inválida: '{0}' (esperado DD-MM-YYYY)")]
    InvalidDateFormat(String),
    #[error("Selector error: {0}")]
    Selector(String),
    #[error("Erro ao gerar PDF: {0}")]
    Render(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
