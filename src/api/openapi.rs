//! OpenAPI document for the party routes

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::AppState;

/// GET /api-docs
pub async fn api_docs(State(state): State<AppState>) -> Json<Value> {
    Json(document(&state.public_url))
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Party ID",
        "schema": { "type": "string" }
    })
}

fn party_ref() -> Value {
    json!({ "$ref": "#/components/schemas/Party" })
}

fn party_list() -> Value {
    json!({ "type": "array", "items": party_ref() })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(json!({ "$ref": "#/components/schemas/Error" }))
    })
}

/// OpenAPI 3.0 description of the HTTP surface.
pub fn document(server_url: &str) -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Party Hierarchy API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "API for managing Party hierarchy"
        },
        "servers": [{ "url": server_url }],
        "paths": {
            "/api/parties": {
                "get": {
                    "summary": "Get all parties",
                    "responses": {
                        "200": { "description": "List of parties", "content": json_content(party_list()) },
                        "500": error_response("Storage failure")
                    }
                },
                "post": {
                    "summary": "Create a new party",
                    "requestBody": {
                        "required": true,
                        "content": json_content(json!({ "$ref": "#/components/schemas/NewParty" }))
                    },
                    "responses": {
                        "201": { "description": "Created party", "content": json_content(party_ref()) },
                        "422": error_response("Owner does not exist"),
                        "500": error_response("Storage failure")
                    }
                }
            },
            "/api/parties/{id}": {
                "get": {
                    "summary": "Get a party by ID",
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": { "description": "A party", "content": json_content(party_ref()) },
                        "404": error_response("Party not found"),
                        "500": error_response("Storage failure")
                    }
                },
                "delete": {
                    "summary": "Delete a party by ID",
                    "description": "Removes a single party. Subsidiaries are kept.",
                    "parameters": [id_parameter()],
                    "responses": {
                        "204": { "description": "No content" },
                        "404": error_response("Party not found"),
                        "500": error_response("Storage failure")
                    }
                }
            },
            "/api/parties/{id}/parents": {
                "get": {
                    "summary": "Get all parents of a given party",
                    "description": "Ancestors ordered from the root down to the immediate owner.",
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": { "description": "List of parent parties", "content": json_content(party_list()) },
                        "404": error_response("Party not found"),
                        "500": error_response("Storage failure")
                    }
                }
            },
            "/api/parties/{id}/subsidiaries": {
                "get": {
                    "summary": "Get all subsidiaries of a given party",
                    "description": "Subsidiaries at every depth.",
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": { "description": "List of subsidiary parties", "content": json_content(party_list()) },
                        "500": error_response("Storage failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Party": {
                    "type": "object",
                    "required": ["id", "name", "ownerId", "path"],
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "ownerId": { "type": "string", "nullable": true },
                        "path": { "type": "string", "example": "/root-id/owner-id" }
                    }
                },
                "NewParty": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string" },
                        "ownerId": { "type": "string", "nullable": true }
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": { "error": { "type": "string" } }
                }
            }
        }
    })
}
