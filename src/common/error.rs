use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
//
// A taxonomia segue as classes de falha do motor de reservas:
//  - Validação (400): entrada malformada, rejeitada antes de abrir transação.
//  - Conflito de quarto/data (409): recuperável, o cliente tenta outros quartos.
//  - Transição ilegal (409): bug do chamador ou estado obsoleto no cliente.
//  - Não encontrado (404).
//  - Infra (500): nunca vaza detalhe para o cliente, só para o log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Intervalo de datas inválido: check-out deve ser depois do check-in")]
    InvalidDateRange,

    #[error("Pedido de reserva inválido: {0}")]
    InvalidBookingRequest(&'static str),

    #[error("Capacidade excedida: {requested} hóspedes para capacidade {capacity}")]
    CapacityExceeded { requested: i32, capacity: i32 },

    #[error("Código promocional inválido ou expirado: {0}")]
    InvalidPromotion(String),

    // Carrega os IDs dos quartos em conflito para o cliente poder
    // tentar de novo com alternativas.
    #[error("Quarto(s) indisponível(is) no período solicitado")]
    RoomConflict(Vec<Uuid>),

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Transição para {target} ainda não permitida pela data da reserva")]
    TransitionTooEarly { target: String },

    #[error("Reserva não pode ser modificada no status {0}")]
    ModificationNotAllowed(String),

    #[error("transaction_ref já utilizada em outra reserva")]
    DuplicateTransactionRef,

    #[error("Cabeçalho x-actor-id ausente ou inválido")]
    MissingActor,

    #[error("Funcionário já atribuído a este pedido de serviço")]
    StaffAlreadyAssigned,

    #[error("Atribuição de funcionário não permitida no status {0}")]
    StaffAssignmentNotAllowed(String),

    #[error("Reserva não está em CHECKED_IN (status atual: {0})")]
    BookingNotCheckedIn(String),

    #[error("Pagamento excede o valor total da reserva")]
    PaymentExceedsTotal,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // O conflito devolve os quartos que colidiram; o chamador decide
            // se tenta outros quartos ou outras datas.
            AppError::RoomConflict(room_ids) => {
                let body = Json(json!({
                    "error": "Quarto(s) indisponível(is) no período solicitado.",
                    "conflictingRoomIds": room_ids,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            // Nomeia o estado atual e o alvo; o chamador nunca é ignorado
            // em silêncio.
            AppError::InvalidTransition { ref from, ref to } => {
                let body = Json(json!({
                    "error": "Transição de status inválida.",
                    "currentStatus": from,
                    "attemptedStatus": to,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                "Check-out deve ser depois do check-in.".to_string(),
            ),
            AppError::InvalidBookingRequest(detail) => (
                StatusCode::BAD_REQUEST,
                format!("Pedido de reserva inválido: {}.", detail),
            ),
            AppError::TransitionTooEarly { ref target } => (
                StatusCode::CONFLICT,
                format!(
                    "A transição para {} ainda não é permitida pela data da reserva.",
                    target
                ),
            ),
            AppError::ModificationNotAllowed(status) => (
                StatusCode::CONFLICT,
                format!("Reserva no status {} não pode ser modificada.", status),
            ),
            AppError::DuplicateTransactionRef => (
                StatusCode::CONFLICT,
                "Esta transaction_ref já foi utilizada em outra reserva.".to_string(),
            ),
            AppError::MissingActor => (
                StatusCode::UNAUTHORIZED,
                "Cabeçalho x-actor-id ausente ou inválido.".to_string(),
            ),
            AppError::CapacityExceeded { requested, capacity } => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Os quartos selecionados comportam {} hóspedes, mas {} foram informados.",
                    capacity, requested
                ),
            ),
            AppError::InvalidPromotion(code) => (
                StatusCode::BAD_REQUEST,
                format!("Código promocional inválido ou expirado: {}.", code),
            ),
            AppError::StaffAlreadyAssigned => (
                StatusCode::CONFLICT,
                "Este pedido de serviço já tem um funcionário atribuído.".to_string(),
            ),
            AppError::StaffAssignmentNotAllowed(status) => (
                StatusCode::CONFLICT,
                format!(
                    "Atribuição de funcionário não é permitida no status {}.",
                    status
                ),
            ),
            AppError::BookingNotCheckedIn(status) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Pedidos de serviço exigem uma reserva em CHECKED_IN (atual: {}).",
                    status
                ),
            ),
            AppError::PaymentExceedsTotal => (
                StatusCode::BAD_REQUEST,
                "O pagamento excede o valor total da reserva.".to_string(),
            ),
            AppError::ResourceNotFound(what) => (
                StatusCode::NOT_FOUND,
                format!("{} não encontrado(a).", what),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
