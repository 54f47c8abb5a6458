//! Connection Tests
//!
//! Tests for typed reads and writes over in-memory streams.

use std::io::{self, Cursor, Write};

use respkv::protocol::{Encoder, Parser, Value};
use respkv::{Config, Connection, ErrorKind, RespError};

// =============================================================================
// Helper Functions
// =============================================================================

type MemConnection = Connection<Cursor<Vec<u8>>, Vec<u8>>;

fn connection(reply: &[u8]) -> MemConnection {
    Connection::new(Cursor::new(reply.to_vec()), Vec::new())
}

fn assert_protocol_error<T: std::fmt::Debug>(result: respkv::Result<T>, message: &str) {
    match result {
        Err(RespError::Protocol(m)) => assert_eq!(m, message),
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

fn assert_kind<T: std::fmt::Debug>(result: respkv::Result<T>, kind: ErrorKind) {
    match result {
        Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {}", e),
        Ok(v) => panic!("Expected {:?} error, got {:?}", kind, v),
    }
}

/// Writer that always fails
struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }
}

// =============================================================================
// Write Tests
// =============================================================================

#[test]
fn test_write_command() {
    let mut conn = connection(b"");
    conn.write_command(&["SET", "x", "5"]).unwrap();
    assert_eq!(conn.writer_ref(), b"*3\r\n$3\r\nSET\r\n$1\r\nx\r\n$1\r\n5\r\n");
}

#[test]
fn test_write_multi_command_single_write() {
    let mut conn = connection(b"");
    let batch = vec![vec!["MULTI"], vec!["GET", "a"], vec!["EXEC"]];
    conn.write_multi_command(&batch).unwrap();

    let expected = Encoder::new().encode_multi(&batch).unwrap();
    assert_eq!(&conn.writer_ref()[..], &expected[..]);
}

#[test]
fn test_write_failure_is_resource_error() {
    let mut conn = Connection::new(Cursor::new(Vec::new()), BrokenWriter);
    let result = conn.write_command(&["INFO"]);

    match result {
        Err(RespError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("Expected IO error, got {:?}", other),
    }
}

#[test]
fn test_write_empty_command_rejected() {
    let mut conn = connection(b"");
    let args: Vec<String> = Vec::new();
    assert_kind(conn.write_command(&args), ErrorKind::InvalidArgument);
    assert!(conn.writer_ref().is_empty());
}

// =============================================================================
// String Read Tests
// =============================================================================

#[test]
fn test_read_simple_string() {
    assert_eq!(connection(b"+OK\r\n").read_simple_string().unwrap(), "OK");
}

#[test]
fn test_read_simple_string_rejects_bulk() {
    assert_kind(
        connection(b"$2\r\nOK\r\n").read_simple_string(),
        ErrorKind::TypeMismatch,
    );
}

#[test]
fn test_read_bulk_string() {
    assert_eq!(
        connection(b"$14\r\nThis\r\nis\r\nbulk\r\n").read_bulk_string().unwrap(),
        Some("This\r\nis\r\nbulk".to_string())
    );
    assert_eq!(connection(b"$-1\r\n").read_bulk_string().unwrap(), None);
}

#[test]
fn test_read_bulk_string_rejects_integer() {
    match connection(b":1\r\n").read_bulk_string() {
        Err(RespError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, "bulk string");
            assert_eq!(actual, "integer");
        }
        other => panic!("Expected type mismatch, got {:?}", other),
    }
}

#[test]
fn test_read_simple_or_bulk_string() {
    assert_eq!(
        connection(b"+OK\r\n").read_simple_or_bulk_string().unwrap(),
        Some("OK".to_string())
    );
    assert_eq!(
        connection(b"$6\r\nOK\r\nOK\r\n").read_simple_or_bulk_string().unwrap(),
        Some("OK\r\nOK".to_string())
    );
    assert_eq!(connection(b"$-1\r\n").read_simple_or_bulk_string().unwrap(), None);
    assert_kind(
        connection(b"*0\r\n").read_simple_or_bulk_string(),
        ErrorKind::TypeMismatch,
    );
}

// =============================================================================
// Integer and Array Read Tests
// =============================================================================

#[test]
fn test_read_long() {
    assert_eq!(connection(b":6458\r\n").read_long().unwrap(), 6458);
    assert_kind(connection(b"+6458\r\n").read_long(), ErrorKind::TypeMismatch);
}

#[test]
fn test_read_array() {
    let items = connection(b"*2\r\n$4\r\nIt's\r\n$6\r\nTricky\r\n")
        .read_array()
        .unwrap()
        .unwrap();
    assert_eq!(items, vec![Value::from("It's"), Value::from("Tricky")]);

    assert_eq!(connection(b"*-1\r\n").read_array().unwrap(), None);
    assert_kind(connection(b":3\r\n").read_array(), ErrorKind::TypeMismatch);
}

#[test]
fn test_read_string_array_stringifies_elements() {
    let items = connection(b"*5\r\n$3\r\nfoo\r\n:42\r\n$-1\r\n+bar\r\n*2\r\n:1\r\n:2\r\n")
        .read_string_array()
        .unwrap()
        .unwrap();

    assert_eq!(
        items,
        vec![
            Some("foo".to_string()),
            Some("42".to_string()),
            None,
            Some("bar".to_string()),
            Some("[1, 2]".to_string()),
        ]
    );
}

#[test]
fn test_binary_bulk_element_keeps_stream_aligned() {
    let mut conn = connection(b"*2\r\n$1\r\n\xff\r\n+OK\r\n+PONG\r\n");

    let items = conn.read_array().unwrap().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1], Value::SimpleString("OK".to_string()));

    assert_eq!(conn.read_simple_string().unwrap(), "PONG");
}

#[test]
fn test_read_any_type() {
    let mut conn = connection(b"+OK\r\n$3\r\nfoo\r\n:6458\r\n*1\r\n:1\r\n$-1\r\n");

    assert_eq!(conn.read_any_type().unwrap(), Value::SimpleString("OK".into()));
    assert_eq!(conn.read_any_type().unwrap(), Value::from("foo"));
    assert_eq!(conn.read_any_type().unwrap(), Value::Integer(6458));
    assert_eq!(
        conn.read_any_type().unwrap(),
        Value::Array(vec![Value::Integer(1)])
    );
    assert_eq!(conn.read_any_type().unwrap(), Value::Null);
}

// =============================================================================
// Error Reply Tests
// =============================================================================

#[test]
fn test_error_reply_raised_by_every_read() {
    let reply = b"-ERR wrong number of arguments for 'get' command\r\n";
    let message = "ERR wrong number of arguments for 'get' command";

    assert_protocol_error(connection(reply).read_simple_string(), message);
    assert_protocol_error(connection(reply).read_bulk_string(), message);
    assert_protocol_error(connection(reply).read_simple_or_bulk_string(), message);
    assert_protocol_error(connection(reply).read_long(), message);
    assert_protocol_error(connection(reply).read_array(), message);
    assert_protocol_error(connection(reply).read_string_array(), message);
    assert_protocol_error(connection(reply).read_any_type(), message);
}

#[test]
fn test_error_reply_is_fully_consumed() {
    let mut conn = connection(b"-ERR first\r\n+OK\r\n");
    assert_protocol_error(conn.read_simple_string(), "ERR first");
    assert_eq!(conn.read_simple_string().unwrap(), "OK");
}

#[test]
fn test_nested_error_is_data() {
    let items = connection(b"*2\r\n+OK\r\n-ERR nested\r\n")
        .read_array()
        .unwrap()
        .unwrap();
    assert_eq!(items[1], Value::Error(respkv::ErrorValue::new("ERR nested")));
}

// =============================================================================
// Resource Error Tests
// =============================================================================

#[test]
fn test_eof_is_resource_error() {
    assert_kind(connection(b"").read_simple_string(), ErrorKind::Resource);
    assert_kind(connection(b"$5\r\nab").read_bulk_string(), ErrorKind::Resource);
    assert_kind(connection(b"*2\r\n:1\r\n").read_array(), ErrorKind::Resource);
}

#[test]
fn test_unknown_marker_is_resource_error() {
    assert_kind(connection(b"!oops\r\n").read_any_type(), ErrorKind::Resource);
}

#[test]
fn test_parser_limits_applied() {
    let mut conn = Connection::with_codec(
        Cursor::new(b"$10\r\n0123456789\r\n".to_vec()),
        Vec::new(),
        Encoder::new(),
        Parser::with_limits(4, 4),
    );
    assert_kind(conn.read_bulk_string(), ErrorKind::Resource);
}

#[test]
fn test_line_limit_from_config() {
    let config = Config::builder()
        .max_line_len(8)
        .max_bulk_len(1024)
        .max_depth(3)
        .build();
    let mut conn = Connection::with_config(
        Cursor::new(b"-ERR a long message\r\n".to_vec()),
        Vec::new(),
        &config,
    );

    assert_eq!(conn.parser().max_line_len(), 8);
    assert_eq!(conn.parser().max_bulk_len(), 1024);
    assert_eq!(conn.parser().max_depth(), 3);
    assert_kind(conn.read_any_type(), ErrorKind::Resource);
}

#[test]
fn test_into_inner_returns_streams() {
    let mut conn = connection(b"+OK\r\n");
    conn.write_command(&["PING"]).unwrap();

    let (_reader, writer) = conn.into_inner().unwrap();
    assert_eq!(writer, b"*1\r\n$4\r\nPING\r\n");
}
