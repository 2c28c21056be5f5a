use serde_json::{json, Value};

fn fail_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/FailEnvelope" }
            }
        }
    })
}

fn success_response(description: &str, data: Value) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "status": { "type": "string", "enum": ["success"] },
                        "message": { "type": "string" },
                        "data": data
                    },
                    "required": ["status"]
                }
            }
        }
    })
}

fn book_id_param() -> Value {
    json!({
        "name": "bookId",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

fn flag_param(name: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "description": "0/false or 1/true; empty means 0, other values match nothing",
        "schema": { "type": "string" }
    })
}

/// OpenAPI fragment describing the books endpoints
pub fn fragment() -> Value {
    let payload_body = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/BookPayload" }
            }
        }
    });

    json!({
        "paths": {
            "/books": {
                "post": {
                    "summary": "Add a book",
                    "tags": ["Books"],
                    "requestBody": payload_body.clone(),
                    "responses": {
                        "201": success_response("Book added", json!({
                            "type": "object",
                            "properties": { "bookId": { "type": "string" } }
                        })),
                        "400": fail_response("Missing name or readPage above pageCount"),
                        "500": fail_response("Book could not be stored")
                    }
                },
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "parameters": [
                        {
                            "name": "name",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive name fragment",
                            "schema": { "type": "string" }
                        },
                        flag_param("reading"),
                        flag_param("finished")
                    ],
                    "responses": {
                        "200": success_response("Matching books", json!({
                            "type": "object",
                            "properties": {
                                "books": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/BookSummary" }
                                }
                            }
                        }))
                    }
                }
            },
            "/books/{bookId}": {
                "get": {
                    "summary": "Get book detail",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "responses": {
                        "200": success_response("Book detail", json!({
                            "type": "object",
                            "properties": { "book": { "$ref": "#/components/schemas/Book" } }
                        })),
                        "400": fail_response("Undecodable book id"),
                        "404": fail_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "requestBody": payload_body,
                    "responses": {
                        "200": success_response("Book updated", json!({
                            "type": "object",
                            "properties": {
                                "before": { "$ref": "#/components/schemas/Book" },
                                "after": { "$ref": "#/components/schemas/Book" }
                            }
                        })),
                        "400": fail_response("Missing name or readPage above pageCount"),
                        "404": fail_response("Id not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [book_id_param()],
                    "responses": {
                        "200": success_response("Book deleted", json!({ "type": "object" })),
                        "400": fail_response("Undecodable book id"),
                        "404": fail_response("Id not found")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "finished": { "type": "boolean" },
                        "reading": { "type": "boolean" },
                        "insertedAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": [
                        "id", "name", "year", "author", "summary", "publisher",
                        "pageCount", "readPage", "finished", "reading",
                        "insertedAt", "updatedAt"
                    ]
                },
                "BookPayload": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "year": { "type": "integer" },
                        "author": { "type": "string" },
                        "summary": { "type": "string" },
                        "publisher": { "type": "string" },
                        "pageCount": { "type": "integer", "minimum": 0 },
                        "readPage": { "type": "integer", "minimum": 0 },
                        "reading": { "type": "boolean" }
                    },
                    "required": ["name"]
                },
                "BookSummary": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "publisher": { "type": "string" }
                    },
                    "required": ["id", "name", "publisher"]
                }
            }
        }
    })
}
