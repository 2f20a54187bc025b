// src/middleware/actor.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::common::error::AppError;

// Contexto de requisição: quem está operando (funcionário ou hóspede),
// resolvido pela camada de autenticação externa e repassado no cabeçalho
// x-actor-id. O core não guarda nenhum estado de sessão de processo; cada
// requisição carrega o seu ator.
#[derive(Debug, Clone, Copy)]
pub struct Actor(pub Uuid);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-actor-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .map(Actor)
            .ok_or(AppError::MissingActor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn extracts_the_actor_from_the_header() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .uri("/")
            .header("x-actor-id", id.to_string())
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let actor = Actor::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(actor.0, id);
    }

    #[tokio::test]
    async fn missing_or_malformed_header_is_rejected() {
        let request = Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        assert!(Actor::from_request_parts(&mut parts, &()).await.is_err());

        let request = Request::builder()
            .uri("/")
            .header("x-actor-id", "nao-e-um-uuid")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        assert!(Actor::from_request_parts(&mut parts, &()).await.is_err());
    }
}
