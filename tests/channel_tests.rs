//! Push-channel tests against a local websocket listener.

use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use diffroom_cli::channel::{ChannelEvent, DiffResult, ResultChannel};
use tungstenite::handshake::server::{Request, Response};
use tungstenite::Message;

fn next_event(channel: &ResultChannel) -> ChannelEvent {
    channel
        .events()
        .recv_timeout(Duration::from_secs(5))
        .expect("expected a channel event")
}

fn diff_frame(diff: &str) -> String {
    serde_json::json!({ "event": "diff_result", "data": { "diff": diff } }).to_string()
}

#[test]
fn connect_then_result_is_delivered_in_order() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut ws = tungstenite::accept(stream).unwrap();
        ws.send(Message::Text(diff_frame("-hello\n+world"))).unwrap();
        // Serve until the client completes its close handshake.
        while ws.read().is_ok() {}
    });

    let channel = ResultChannel::connect(&format!("http://{addr}"), "abc123");
    assert_eq!(next_event(&channel), ChannelEvent::Connected);
    assert_eq!(
        next_event(&channel),
        ChannelEvent::ResultReceived(DiffResult {
            diff: "-hello\n+world".to_string()
        })
    );
    channel.close();
    server.join().unwrap();
}

#[test]
fn unrelated_events_are_skipped_until_the_result_arrives() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut ws = tungstenite::accept(stream).unwrap();
        let noise = serde_json::json!({ "event": "user_joined", "data": {} }).to_string();
        ws.send(Message::Text(noise)).unwrap();
        ws.send(Message::Text(diff_frame("+a"))).unwrap();
        while ws.read().is_ok() {}
    });

    let channel = ResultChannel::connect(&format!("http://{addr}"), "abc123");
    assert_eq!(next_event(&channel), ChannelEvent::Connected);
    assert_eq!(
        next_event(&channel),
        ChannelEvent::ResultReceived(DiffResult {
            diff: "+a".to_string()
        })
    );
    channel.close();
    server.join().unwrap();
}

#[test]
fn room_id_travels_as_an_encoded_query_parameter() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (uri_tx, uri_rx) = mpsc::channel();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let callback = |req: &Request, resp: Response| {
            uri_tx.send(req.uri().to_string()).unwrap();
            Ok(resp)
        };
        let mut ws = tungstenite::accept_hdr(stream, callback).unwrap();
        ws.send(Message::Text(diff_frame("+a"))).unwrap();
        while ws.read().is_ok() {}
    });

    let channel = ResultChannel::connect(&format!("http://{addr}"), "room one");
    assert_eq!(next_event(&channel), ChannelEvent::Connected);
    let uri = uri_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(uri, "/?roomId=room%20one");

    assert!(matches!(
        next_event(&channel),
        ChannelEvent::ResultReceived(_)
    ));
    channel.close();
    server.join().unwrap();
}

#[test]
fn refused_connection_reports_failure() {
    // Grab a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let channel = ResultChannel::connect(&format!("http://{addr}"), "abc123");
    assert!(matches!(next_event(&channel), ChannelEvent::Failed(_)));
    channel.close();
}

#[test]
fn server_close_before_result_reports_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut ws = tungstenite::accept(stream).unwrap();
        ws.close(None).unwrap();
        while ws.read().is_ok() {}
    });

    let channel = ResultChannel::connect(&format!("http://{addr}"), "abc123");
    assert_eq!(next_event(&channel), ChannelEvent::Connected);
    match next_event(&channel) {
        ChannelEvent::Failed(reason) => {
            assert!(reason.contains("before a diff result"), "got: {reason}")
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    channel.close();
    server.join().unwrap();
}
