use crate::SourceBuffer;

// === Navigation ===

#[test]
fn current_and_peeks() {
    let buf = SourceBuffer::new("abc");
    let cursor = buf.cursor();
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.peek(), b'b');
    assert_eq!(cursor.peek2(), b'c');
}

#[test]
fn peek_near_end_returns_sentinel() {
    let buf = SourceBuffer::new("a");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(), 0);
    assert_eq!(cursor.peek2(), 0);
}

#[test]
fn interior_nul_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
    cursor.advance_n(2);
    assert!(cursor.is_eof());
}

#[test]
fn eat_while_stops_at_sentinel() {
    let buf = SourceBuffer::new("aaaa");
    let mut cursor = buf.cursor();
    cursor.eat_while(|b| b == b'a');
    assert_eq!(cursor.pos(), 4);
    assert!(cursor.is_eof());
}

// === Memchr scans ===

#[test]
fn newline_scan() {
    let buf = SourceBuffer::new("abc\ndef");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.pos(), 3);
    assert_eq!(cursor.current(), b'\n');

    cursor.advance();
    cursor.eat_until_newline_or_eof();
    assert!(cursor.is_eof());
}

#[test]
fn string_delim_scan() {
    let buf = SourceBuffer::new("ab~\"c\"");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_string_delim(b'"'), b'~');
    assert_eq!(cursor.pos(), 2);
    cursor.advance_n(2);
    assert_eq!(cursor.skip_to_string_delim(b'"'), b'"');
    assert_eq!(cursor.pos(), 5);
}

#[test]
fn string_delim_scan_hits_eof() {
    let buf = SourceBuffer::new("no quote");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_string_delim(b'\''), 0);
    assert!(cursor.is_eof());
}

#[test]
fn comment_delim_scan_takes_earliest() {
    let buf = SourceBuffer::new("xx/yy*");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_comment_delim(), b'/');
    cursor.advance();
    assert_eq!(cursor.skip_to_comment_delim(), b'*');
}

#[test]
fn brace_scan() {
    let buf = SourceBuffer::new("&a {&b}");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_brace(), b'{');
    cursor.advance();
    assert_eq!(cursor.skip_to_brace(), b'}');
    assert_eq!(cursor.pos(), 6);
}

#[test]
fn inline_whitespace_stops_at_newline() {
    let buf = SourceBuffer::new(" \t\r\n x");
    let mut cursor = buf.cursor();
    cursor.eat_inline_whitespace();
    assert_eq!(cursor.current(), b'\n');
    cursor.eat_whitespace();
    assert_eq!(cursor.current(), b'x');
}
