//! Client Tests
//!
//! Tests for the convenience operations against canned replies.

use std::io::Cursor;

use respkv::command::{BitOperation, SetCondition};
use respkv::{Client, Command, Connection, ErrorKind};

// =============================================================================
// Helper Functions
// =============================================================================

type MemClient = Client<Cursor<Vec<u8>>, Vec<u8>>;

fn client(reply: &[u8]) -> MemClient {
    Client::new(Connection::new(Cursor::new(reply.to_vec()), Vec::new()))
}

fn written(client: MemClient) -> Vec<u8> {
    let (_, writer) = client.into_connection().into_inner().unwrap();
    writer
}

// =============================================================================
// String Operation Tests
// =============================================================================

#[test]
fn test_ping() {
    let mut c = client(b"+PONG\r\n");
    assert_eq!(c.ping().unwrap(), "PONG");
    assert_eq!(written(c), b"*1\r\n$4\r\nPING\r\n");
}

#[test]
fn test_set_and_get() {
    let mut c = client(b"+OK\r\n$2\r\nv1\r\n$-1\r\n");

    assert_eq!(c.set("k1", "v1").unwrap(), Some("OK".to_string()));
    assert_eq!(c.get("k1").unwrap(), Some("v1".to_string()));
    assert_eq!(c.get("missing").unwrap(), None);
}

#[test]
fn test_set_with_expiry() {
    let mut c = client(b"+OK\r\n");
    c.set_with("k", "v", SetCondition::Ex, Some(10)).unwrap();
    assert_eq!(
        written(c),
        b"*5\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n$2\r\nEX\r\n$2\r\n10\r\n"
    );
}

#[test]
fn test_set_with_condition_not_met() {
    let mut c = client(b"$-1\r\n");
    assert_eq!(c.set_with("k", "v", SetCondition::Nx, None).unwrap(), None);
}

#[test]
fn test_set_with_missing_expiry() {
    let mut c = client(b"");
    let err = c.set_with("k", "v", SetCondition::Px, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(written(c).is_empty());
}

#[test]
fn test_setex_argument_order() {
    let mut c = client(b"+OK\r\n");
    c.setex("mykey", 10, "Hello").unwrap();
    assert_eq!(
        written(c),
        b"*4\r\n$5\r\nSETEX\r\n$5\r\nmykey\r\n$2\r\n10\r\n$5\r\nHello\r\n"
    );
}

#[test]
fn test_counters() {
    let mut c = client(b":1\r\n:11\r\n:10\r\n:5\r\n:3\r\n");

    assert_eq!(c.incr("n").unwrap(), 1);
    assert_eq!(c.incr_by("n", 10).unwrap(), 11);
    assert_eq!(c.decr("n").unwrap(), 10);
    assert_eq!(c.append("s", "hello").unwrap(), 5);
    assert_eq!(c.strlen("t").unwrap(), 3);
}

#[test]
fn test_incr_on_non_integer() {
    let mut c = client(b"-ERR value is not an integer or out of range\r\n");
    let err = c.incr("s").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[test]
fn test_mget() {
    let mut c = client(b"*3\r\n$1\r\na\r\n$-1\r\n$1\r\nc\r\n");
    assert_eq!(
        c.mget(&["x", "y", "z"]).unwrap(),
        vec![Some("a".to_string()), None, Some("c".to_string())]
    );
}

#[test]
fn test_bitop() {
    let mut c = client(b":6\r\n");
    assert_eq!(c.bitop(BitOperation::And, "dest", &["a", "b"]).unwrap(), 6);
    assert_eq!(
        written(c),
        b"*5\r\n$5\r\nBITOP\r\n$3\r\nAND\r\n$4\r\ndest\r\n$1\r\na\r\n$1\r\nb\r\n"
    );
}

// =============================================================================
// Key Operation Tests
// =============================================================================

#[test]
fn test_del_exists_expire() {
    let mut c = client(b":2\r\n:0\r\n:1\r\n");

    assert_eq!(c.del(&["a", "b"]).unwrap(), 2);
    assert!(!c.exists("a").unwrap());
    assert!(c.expire("c", 30).unwrap());
}

// =============================================================================
// Hash Operation Tests
// =============================================================================

#[test]
fn test_hash_operations() {
    let mut c = client(b":1\r\n$5\r\nvalue\r\n:1\r\n:1\r\n:0\r\n");

    assert!(c.hset("h", "field", "value").unwrap());
    assert_eq!(c.hget("h", "field").unwrap(), Some("value".to_string()));
    assert!(c.hexists("h", "field").unwrap());
    assert_eq!(c.hdel("h", &["field"]).unwrap(), 1);
    assert_eq!(c.hlen("h").unwrap(), 0);
}

#[test]
fn test_hgetall_pairs() {
    let mut c = client(b"*4\r\n$2\r\nf1\r\n$2\r\nv1\r\n$2\r\nf2\r\n$2\r\nv2\r\n");
    assert_eq!(
        c.hgetall("h").unwrap(),
        vec![
            ("f1".to_string(), "v1".to_string()),
            ("f2".to_string(), "v2".to_string()),
        ]
    );
}

#[test]
fn test_hgetall_odd_reply() {
    let mut c = client(b"*1\r\n$2\r\nf1\r\n");
    assert_eq!(c.hgetall("h").unwrap_err().kind(), ErrorKind::Resource);
}

#[test]
fn test_raw_command_through_connection() {
    let mut c = client(b"$5\r\nhello\r\n");
    let reply = Command::cmd("ECHO")
        .arg("hello")
        .build()
        .query(c.connection_mut())
        .unwrap()
        .as_string()
        .unwrap();
    assert_eq!(reply, Some("hello".to_string()));
}

// =============================================================================
// Transaction Tests
// =============================================================================

#[test]
fn test_client_transaction() {
    let mut c = client(b"+OK\r\n+QUEUED\r\n+QUEUED\r\n*2\r\n:1\r\n:2\r\n");

    let mut tx = c.transaction();
    let first = Command::cmd("INCR").arg("n").build().queue(&mut tx).as_long();
    let second = Command::cmd("INCR").arg("n").build().queue(&mut tx).as_long();
    tx.execute().unwrap();

    assert_eq!(first.get().unwrap(), 1);
    assert_eq!(second.get().unwrap(), 2);
}
