//! End-to-end request handling through the gateway.

use std::cell::RefCell;

use hyper::StatusCode;
use xhtml_cgi::cgi::{CgiEnv, Gateway, Outcome, Settings};
use xhtml_cgi::config::GatewayConfig;
use xhtml_cgi::convert::{
    ConversionError, Converter, Doctype, DoctypeTable, PassthroughConverter, RenderedDocument, StaticDoctypes,
};
use xhtml_cgi::http::Response;

mod common;

use common::{direct_env, multipart_env, BodyBuilder};

/// Converter that records what it was handed and echoes the payload.
#[derive(Default)]
struct RecordingConverter {
    seen: RefCell<Option<(Vec<u8>, Settings)>>,
}

impl RecordingConverter {
    fn payload(&self) -> Vec<u8> {
        self.seen.borrow().as_ref().map(|(p, _)| p.clone()).unwrap_or_default()
    }

    fn settings(&self) -> Option<Settings> {
        self.seen.borrow().as_ref().map(|(_, s)| s.clone())
    }
}

impl Converter for RecordingConverter {
    fn convert(
        &self,
        payload: &[u8],
        settings: &Settings,
        _doctypes: &dyn DoctypeTable,
    ) -> Result<RenderedDocument, ConversionError> {
        *self.seen.borrow_mut() = Some((payload.to_vec(), settings.clone()));
        Ok(RenderedDocument {
            body: payload.to_vec(),
            encoding: None,
        })
    }
}

fn respond(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Respond(response) => response,
        Outcome::NotCgi => panic!("expected a CGI response"),
    }
}

#[test]
fn test_multipart_tablength_then_payload() {
    let body = BodyBuilder::new().field("tablength", "4").payload("<html><p>hi</p></html>");
    let config = GatewayConfig::default();
    let converter = RecordingConverter::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &converter);

    let response = respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(converter.settings().unwrap().tab_length, 4);
    assert_eq!(converter.payload(), b"<html><p>hi</p></html>");
    assert!(response.body_text().contains("&lt;p&gt;hi&lt;/p&gt;"));
}

#[test]
fn test_untrimmed_payload_runs_to_end_of_body() {
    let body = BodyBuilder::new().field("tablength", "4").payload("<html/>");
    let mut config = GatewayConfig::default();
    config.request.trim_trailing_boundary = false;
    let converter = RecordingConverter::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &converter);

    respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    assert_eq!(converter.payload(), b"<html/>\r\n--XYZ--\r\n");
}

#[test]
fn test_get_is_method_not_allowed() {
    let body = BodyBuilder::new().field("tablength", "4").payload("<html/>");
    let config = GatewayConfig::default();
    let converter = RecordingConverter::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &converter);

    let response = respond(gateway.handle(&multipart_env("GET", &body), &body[..]));

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(converter.settings().is_none());

    let mut out = Vec::new();
    response.write_cgi(&mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("Content-Type:text/html\nStatus:405"));
}

#[test]
fn test_missing_blank_line_is_bad_request() {
    let body = BodyBuilder::new()
        .raw("--XYZ\r\nContent-Disposition: form-data; name=\"tablength\"\r\n4\r\n")
        .build();
    let config = GatewayConfig::default();
    let converter = RecordingConverter::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &converter);

    let response = respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(converter.settings().is_none());
    assert!(response.body_text().contains("400 Bad Request"));
}

#[test]
fn test_out_of_range_tablength_keeps_default() {
    let body = BodyBuilder::new()
        .field("tablength", "20")
        .field("linelength", "40")
        .payload("<html/>");
    let config = GatewayConfig::default();
    let converter = RecordingConverter::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &converter);

    let response = respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    assert_eq!(response.status, StatusCode::OK);
    let settings = converter.settings().unwrap();
    assert_eq!(settings.tab_length, 2);
    assert_eq!(settings.line_length, 40);
    assert_eq!(converter.payload(), b"<html/>");
}

#[test]
fn test_no_query_string_is_not_cgi() {
    let body = BodyBuilder::new().payload("<html/>");
    let mut env = multipart_env("POST", &body);
    env.query_string = None;
    let config = GatewayConfig::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &PassthroughConverter);

    assert_eq!(gateway.handle(&env, &body[..]), Outcome::NotCgi);
    assert_eq!(gateway.handle(&CgiEnv::default(), &b""[..]), Outcome::NotCgi);
}

#[test]
fn test_output_plain_returns_bare_document() {
    let body = BodyBuilder::new()
        .field("output", "plain")
        .field("type", "strict")
        .payload("<html><body>x</body></html>");
    let config = GatewayConfig::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &PassthroughConverter);

    let response = respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    let text = response.body_text();
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type, "text/html; charset=iso-8859-1");
    assert!(text.starts_with("<!DOCTYPE html\n   PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\""));
    assert!(text.ends_with("<html><body>x</body></html>"));
    assert!(!text.contains("<pre"));
}

#[test]
fn test_direct_upload_uses_query_string() {
    let body = b"<html>\t<p>x</p></html>".to_vec();
    let config = GatewayConfig::default();
    let converter = RecordingConverter::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &converter);

    let response = respond(gateway.handle(&direct_env("tablength=8&tipo=1.1", &body), &body[..]));

    assert_eq!(response.status, StatusCode::OK);
    let settings = converter.settings().unwrap();
    assert!(!settings.html_output);
    assert_eq!(settings.tab_length, 8);
    assert_eq!(settings.doctype, StaticDoctypes.lookup(b"1.1"));
    assert_eq!(response.body, body);
}

#[test]
fn test_zero_length_and_unknown_type_are_bad_requests() {
    let config = GatewayConfig::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &PassthroughConverter);

    let mut env = direct_env("", b"<p/>");
    env.content_length = Some("0".into());
    assert_eq!(respond(gateway.handle(&env, &b"<p/>"[..])).status, StatusCode::BAD_REQUEST);

    let mut env = direct_env("", b"{}");
    env.content_type = Some("application/json".into());
    assert_eq!(respond(gateway.handle(&env, &b"{}"[..])).status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_body_over_limit_is_bad_request() {
    let body = BodyBuilder::new().payload("<html/>");
    let mut config = GatewayConfig::default();
    config.request.max_body_size = 16;
    let converter = RecordingConverter::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &converter);

    let response = respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(converter.settings().is_none());
}

#[test]
fn test_conversion_error_page() {
    let body = BodyBuilder::new().payload("   ");
    let config = GatewayConfig::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &PassthroughConverter);

    let response = respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body_text().contains("Error: the document is empty"));
}

#[test]
fn test_debug_mode_shows_state() {
    let body = BodyBuilder::new().field("linelength", "39").payload("<html/>");
    let mut config = GatewayConfig::default();
    config.response.debug = true;
    let gateway = Gateway::new(&config, &StaticDoctypes, &PassthroughConverter);

    let response = respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    let text = response.body_text();
    assert!(text.contains("<li>Request status: multipart</li>"));
    assert!(text.contains("<li>Line length: 80</li>"));
}

#[test]
fn test_config_defaults_seed_settings() {
    let body = BodyBuilder::new().payload("<html/>");
    let mut config = GatewayConfig::default();
    config.defaults.tab_length = 6;
    config.defaults.doctype = Some("frameset".into());
    let converter = RecordingConverter::default();
    let gateway = Gateway::new(&config, &StaticDoctypes, &converter);

    respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    let settings = converter.settings().unwrap();
    assert_eq!(settings.tab_length, 6);
    assert_eq!(settings.doctype, StaticDoctypes.lookup(b"frameset"));
}

/// Deployment table with a single entry.
struct StrictOnly;

static STRICT_ONLY: Doctype = Doctype {
    key: "strict",
    public_id: "-//W3C//DTD XHTML 1.0 Strict//EN",
    system_id: "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd",
};

impl DoctypeTable for StrictOnly {
    fn lookup(&self, key: &[u8]) -> Option<usize> {
        (key == STRICT_ONLY.key.as_bytes()).then_some(0)
    }

    fn get(&self, index: usize) -> Option<&Doctype> {
        (index == 0).then_some(&STRICT_ONLY)
    }
}

#[test]
fn test_converter_uses_gateway_doctype_table() {
    let body = BodyBuilder::new()
        .field("output", "plain")
        .field("type", "strict")
        .payload("<html/>");
    let config = GatewayConfig::default();
    let gateway = Gateway::new(&config, &StrictOnly, &PassthroughConverter);

    let response = respond(gateway.handle(&multipart_env("POST", &body), &body[..]));

    let text = response.body_text();
    assert!(text.starts_with("<!DOCTYPE html\n   PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\""));
    assert!(!text.contains("Transitional"));
}
