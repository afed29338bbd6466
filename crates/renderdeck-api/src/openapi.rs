// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

#[must_use]
pub fn openapi_v1_spec() -> Value {
    let error = json!({"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}});
    json!({
      "openapi": "3.0.3",
      "info": {"title": "renderdeck API", "version": "v1"},
      "paths": {
        "/healthz": {"get": {"responses": {"200": {"description": "ok"}}}},
        "/v1/version": {"get": {"responses": {"200": {"description": "build and crate identity"}}}},
        "/api/renderings": {
          "get": {
            "parameters": [
              {"name": "repeat", "in": "query", "schema": {"type": "integer", "minimum": 0, "default": 1}}
            ],
            "responses": {
              "200": {"description": "public rendering URLs in display order"},
              "400": {"description": "invalid query", "content": error.clone()}
            }
          }
        },
        "/renderings": {
          "get": {"responses": {"200": {"description": "rendering ids in display order"}}},
          "post": {
            "requestBody": {"content": {"multipart/form-data": {"schema": {"$ref": "#/components/schemas/RenderingUpload"}}}},
            "responses": {
              "201": {"description": "created"},
              "400": {"description": "validation failed", "content": error.clone()},
              "413": {"description": "upload too large", "content": error.clone()}
            }
          },
          "put": {
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/RenderingList"}}}},
            "responses": {"200": {"description": "sorted"}, "400": {"description": "invalid body", "content": error.clone()}}
          }
        },
        "/renderings/move": {
          "post": {
            "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/MoveRequest"}}}},
            "responses": {"200": {"description": "sorted"}, "404": {"description": "unknown id", "content": error.clone()}}
          }
        },
        "/renderings/{id}": {
          "get": {"responses": {"200": {"description": "rendering detail"}, "404": {"description": "not found", "content": error.clone()}}},
          "delete": {"responses": {"200": {"description": "removed"}, "500": {"description": "store failure", "content": error.clone()}}}
        },
        "/renderings/{id}/{path}": {
          "get": {
            "responses": {
              "200": {"description": "raw asset bytes"},
              "304": {"description": "not modified"},
              "400": {"description": "path escapes rendering directory", "content": error.clone()},
              "404": {"description": "not found", "content": error}
            }
          }
        }
      },
      "components": {
        "schemas": {
          "ApiError": {
            "type": "object",
            "required": ["code", "message", "details", "request_id"],
            "properties": {
              "code": {"type": "string"},
              "message": {"type": "string"},
              "details": {"type": "object"},
              "request_id": {"type": "string"}
            }
          },
          "RenderingList": {
            "type": "object",
            "required": ["renderings"],
            "properties": {"renderings": {"type": "array", "items": {"type": "string", "pattern": "^[A-Za-z0-9_-]{1,128}$"}}}
          },
          "MoveRequest": {
            "type": "object",
            "required": ["active", "over"],
            "properties": {"active": {"type": "string"}, "over": {"type": "string"}}
          },
          "RenderingUpload": {
            "type": "object",
            "required": ["thumbnail", "cameras", "images", "bundle", "depthCorrectionFactor", "scaleX", "scaleY", "scaleZ"],
            "properties": {
              "thumbnail": {"type": "string", "format": "binary"},
              "cameras": {"type": "string", "format": "binary"},
              "images": {"type": "string", "format": "binary"},
              "bundle": {"type": "string", "format": "binary"},
              "depthCorrectionFactor": {"type": "number"},
              "scaleX": {"type": "number"},
              "scaleY": {"type": "number"},
              "scaleZ": {"type": "number"}
            }
          }
        }
      }
    })
}
