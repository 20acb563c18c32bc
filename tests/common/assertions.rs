//! Custom assertion macros for API responses

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert the JSON error envelope: status, `success: false`, message, `data: null`
#[macro_export]
macro_rules! assert_api_error {
    ($response:expr, $status:expr, $message:expr) => {{
        let response = $response;
        response.assert_status($status);
        let body: serde_json::Value = response.json();
        assert_eq!(body["statusCode"], serde_json::json!($status.as_u16()));
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["message"], serde_json::json!($message));
        assert!(body["data"].is_null(), "error body carries data: {body}");
        body
    }};
}

/// Assert the success envelope and return its `data`
#[macro_export]
macro_rules! assert_api_ok {
    ($response:expr, $status:expr) => {{
        let response = $response;
        response.assert_status($status);
        let body: serde_json::Value = response.json();
        assert_eq!(body["statusCode"], serde_json::json!($status.as_u16()));
        assert_eq!(body["success"], serde_json::json!(true));
        body["data"].clone()
    }};
}
