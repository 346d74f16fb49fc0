#![allow(clippy::unwrap_used, clippy::expect_used)]

// Real socket round trips against the tiny_http worker pool

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use snippetbox_core::logging_facility::TracingReporter;
use snippetbox_core::{HtmlRenderer, SystemClock};
use snippetbox_store::SqliteSnippetStore;
use snippetbox_web::{server, Application, ServerHandle};

fn start() -> (ServerHandle, SocketAddr) {
    let store = SqliteSnippetStore::open_in_memory(Arc::new(SystemClock)).unwrap();
    let app = Application::new(
        Arc::new(store),
        Arc::new(HtmlRenderer::default()),
        Arc::new(TracingReporter),
    );
    let handle = server::start("127.0.0.1:0", 2, Arc::new(app)).unwrap();
    let addr = handle.local_addr().expect("ip listener");
    (handle, addr)
}

fn roundtrip(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream.write_all(raw.as_bytes()).unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    response
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case(name).then(|| value.trim())
        })
}

#[test]
fn test_create_then_view_over_http() {
    let (handle, addr) = start();

    let created = roundtrip(
        addr,
        "POST /snippet/create HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    );
    assert!(created.starts_with("HTTP/1.1 303"), "{}", created);
    let location = header(&created, "Location").expect("location header");
    assert_eq!(location, "/snippet/view?id=1");

    let viewed = roundtrip(
        addr,
        &format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            location
        ),
    );
    assert!(viewed.starts_with("HTTP/1.1 200"), "{}", viewed);
    assert!(viewed.contains("<strong>O Snail</strong>"));

    handle.shutdown();
    handle.join();
}

#[test]
fn test_method_not_allowed_over_http() {
    let (handle, addr) = start();

    let response = roundtrip(
        addr,
        "GET /snippet/create HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert!(response.starts_with("HTTP/1.1 405"), "{}", response);
    assert_eq!(header(&response, "Allow"), Some("POST"));
    assert!(response.ends_with("Method Not Allowed\n"));

    handle.shutdown();
    handle.join();
}

#[test]
fn test_unparseable_view_ids_are_not_found_over_http() {
    let (handle, addr) = start();
    let supplied = "0190a5b2-7c1e-7d3a-9f00-1234567890ab";

    let missing = roundtrip(
        addr,
        "GET /snippet/view?id=999 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    );
    assert!(missing.starts_with("HTTP/1.1 404"), "{}", missing);

    for target in [
        "/snippet/view?id=abc",
        "/snippet/view?id=<1>",
        "/snippet/view?id=\"x\"",
        "/snippet/view?id={1}",
    ] {
        let response = roundtrip(
            addr,
            &format!(
                "GET {} HTTP/1.1\r\nHost: localhost\r\nX-Request-Id: {}\r\nConnection: close\r\n\r\n",
                target, supplied
            ),
        );
        assert!(response.starts_with("HTTP/1.1 404"), "{} => {}", target, response);
        assert!(response.ends_with("Not Found\n"), "{}", target);
        assert_eq!(header(&response, "X-Request-Id"), Some(supplied), "{}", target);
    }

    handle.shutdown();
    handle.join();
}
