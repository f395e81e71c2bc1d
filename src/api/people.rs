// API module - Roster endpoints

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Person;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct PeopleListResponse {
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct CreatePersonRequest {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize)]
struct CreatePersonResponse {
    person: Person,
}

#[derive(Debug, Deserialize)]
struct SetActiveRequest {
    active: bool,
}

#[derive(Debug, Serialize)]
struct SetActiveResponse {
    id: i64,
    active: bool,
}

async fn list_people(State(state): State<AppState>) -> Result<Json<PeopleListResponse>> {
    let people = state.store.list_people().await;
    Ok(Json(PeopleListResponse { people }))
}

async fn create_person(
    State(state): State<AppState>,
    Json(request): Json<CreatePersonRequest>,
) -> Result<Json<CreatePersonResponse>> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let person = state.store.create_person(name).await?;

    tracing::info!(person_id = %person.id, "Person added to roster");

    Ok(Json(CreatePersonResponse { person }))
}

async fn set_person_active(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<SetActiveResponse>> {
    let person = state.store.set_person_active(id, request.active).await?;

    tracing::info!(person_id = %id, active = request.active, "Person active flag changed");

    Ok(Json(SetActiveResponse {
        id: person.id,
        active: person.active,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/people", get(list_people).post(create_person))
        .route("/api/people/:id", put(set_person_active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::RecordStore;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(RecordStore::new()),
            config: Config {
                host: "127.0.0.1".to_string(),
                port: 0,
                aeroapi_base_url: "http://localhost".to_string(),
                aeroapi_key: None,
                lookup_timeout_secs: 1,
            },
        }
    }

    #[tokio::test]
    async fn create_trims_and_rejects_blank_names() {
        let state = test_state();

        let Json(created) = create_person(
            State(state.clone()),
            Json(CreatePersonRequest {
                name: "  Priya Nair  ".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(created.person.name, "Priya Nair");
        assert!(created.person.active);

        let err = create_person(
            State(state),
            Json(CreatePersonRequest {
                name: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let state = test_state();
        state.store.create_person("Sam Ortiz").await.unwrap();

        let err = create_person(
            State(state),
            Json(CreatePersonRequest {
                name: "Sam Ortiz".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }

    #[tokio::test]
    async fn toggling_active_reports_the_new_flag() {
        let state = test_state();
        let person = state.store.create_person("Jo Keller").await.unwrap();

        let Json(response) = set_person_active(
            State(state.clone()),
            Path(person.id),
            Json(SetActiveRequest { active: false }),
        )
        .await
        .unwrap();
        assert_eq!(response.id, person.id);
        assert!(!response.active);

        let people = state.store.list_people().await;
        assert!(!people[0].active);
    }
}
