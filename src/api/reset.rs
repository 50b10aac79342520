use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{error::Error, server::AppState, warning};

pub async fn reset_database(Extension(state): Extension<AppState>) -> Result<Json<Value>, Error> {
    warning!("Dropping and recreating all tables");
    state.store.reset().await?;
    Ok(Json(json!({ "message": "Database has been reset." })))
}
