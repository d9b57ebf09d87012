//! API documentation prompt generator.

use serde::{Deserialize, Serialize};

/// Placeholder used when no common filters are given.
const COMMON_FILTERS_PLACEHOLDER: &str = "[Add reference links for any shared filters]";

/// Inputs for the documentation prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiDocRequest {
    /// Route of the endpoint
    pub route_path: String,
    /// Name of the request struct
    pub request_struct: String,
    /// Name of the response struct
    pub response_struct: String,
    /// Source of the request struct
    pub request_code: String,
    /// Source of the response struct (section omitted when empty)
    pub response_code: String,
    /// Shared filter references
    pub common_filters: String,
}

/// Render the prompt asking for markdown API docs of a Go Gin endpoint.
pub fn generate_prompt(req: &ApiDocRequest) -> String {
    let common_filters = if req.common_filters.is_empty() {
        COMMON_FILTERS_PLACEHOLDER
    } else {
        req.common_filters.as_str()
    };

    let response_section = if req.response_code.is_empty() {
        String::new()
    } else {
        format!(
            "**2. Response struct definition:**\n```go\n{}\n```",
            req.response_code
        )
    };

    format!(
        r#"Write API documentation for the following Go Gin endpoint and output the result directly as markdown:

**Endpoint:**
- Route: {route}
- Request struct: {request_struct}
- Response struct: {response_struct}

**Output: markdown API documentation with the following structure:**

# [Endpoint name]

[toc]

## Summary
[Module] - [What the endpoint does]

## Request URL
- {{{{domain}}}}/api/v1/[endpoint path]

## Method
- POST

## Header
| Name         | Required | Type   | Description                    |
| :----------- | :------- | :----- | ------------------------------ |
| Content-Type | yes      | string | Request type: application/json |

## Request parameters
| Name                                   | Required | Type | Description |
| :------------------------------------- | :------- | :--- | ----------- |
| [every field of the request struct]    |          |      |             |

### Shared filters
{common_filters}

## Response notes
```json
{{
  // Important fields and caching notes
  "field_name": "meaning of the field"
}}
```

## Request example
```json
{{
  // left empty for the user
}}
```

## Response example
```json
{{
  "code": 0,
  "msg": "ok",
  "data": {{
    // left empty for the user
  }},
  "req": null,
  "ext": null
}}
```

**Analysis requirements:**
1. Read the request struct carefully and list every parameter with its validation rules
2. Use the validate tags to decide whether a parameter is required
3. Derive accurate descriptions from field types and comments
4. Link shared structs (such as Game or CommonPageFilter) where they appear
5. Keep the request and response examples as empty JSON structures
6. Pay attention to time formats, enum values and array parameters
7. If caching is configured, state the cache duration in the response notes
8. Output markdown directly, without wrapping it in a code block

**Endpoint code to analyze:**

**1. Request struct definition:**
```go
{request_code}
```

{response_section}"#,
        route = req.route_path,
        request_struct = req.request_struct,
        response_struct = req.response_struct,
        common_filters = common_filters,
        request_code = req.request_code,
        response_section = response_section,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ApiDocRequest {
        ApiDocRequest {
            route_path: "/api/v1/report/list".to_string(),
            request_struct: "ReportListReq".to_string(),
            response_struct: "ReportListResp".to_string(),
            request_code: "type ReportListReq struct {\n\tPage int `json:\"page\"`\n}".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fields_are_rendered() {
        let prompt = generate_prompt(&request());
        assert!(prompt.contains("- Route: /api/v1/report/list"));
        assert!(prompt.contains("- Request struct: ReportListReq"));
        assert!(prompt.contains("- Response struct: ReportListResp"));
        assert!(prompt.contains("```go\ntype ReportListReq struct {"));
        assert!(prompt.contains("{{domain}}/api/v1/"));
    }

    #[test]
    fn test_placeholder_and_missing_response() {
        let prompt = generate_prompt(&request());
        assert!(prompt.contains(COMMON_FILTERS_PLACEHOLDER));
        assert!(!prompt.contains("Response struct definition"));
        assert!(prompt.trim_end().ends_with("```"));
    }

    #[test]
    fn test_response_section_and_filters() {
        let req = ApiDocRequest {
            response_code: "type ReportListResp struct{}".to_string(),
            common_filters: "[CommonPageFilter](#filters)".to_string(),
            ..request()
        };
        let prompt = generate_prompt(&req);
        assert!(prompt.contains("**2. Response struct definition:**\n```go\ntype ReportListResp struct{}\n```"));
        assert!(prompt.contains("### Shared filters\n[CommonPageFilter](#filters)"));
        assert!(!prompt.contains(COMMON_FILTERS_PLACEHOLDER));
    }
}
