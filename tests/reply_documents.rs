//! End-to-end validation of raw reply documents
//!
//! These tests run the full pipeline: raw text through the reply lexer into
//! the validator, using the stock thin-registry grammar. They pin down the
//! contract the transcript scenarios can only approximate: classification
//! and validation agree about real reply text.

use rdds_check::rdds::grammar::{catalog, Entry, Grammar};
use rdds_check::rdds::lexing::ReplyLexer;
use rdds_check::rdds::types::StandardTypes;
use rdds_check::rdds::validating::validate;

const CONFORMING_REPLY: &str = "\
Domain Name: EXAMPLE.ORG
Registry Domain ID: D1234567-LROR
Registrar WHOIS Server: whois.example-registrar.example
Registrar URL: http://www.example-registrar.example
Updated Date: 2023-08-02T04:00:00Z
Creation Date: 1995-08-14T04:00:00Z
Registry Expiry Date: 2026-08-13T04:00:00Z
Registrar: Example Registrar, Inc.
Registrar IANA ID: 292
Registrar Abuse Contact Email: abuse@example-registrar.example
Domain Status: clientTransferProhibited
Domain Status: clientUpdateProhibited
Name Server: NS1.EXAMPLE.ORG
Name Server: NS2.EXAMPLE.ORG
DNSSEC: unsigned
>>> Last update of whois database: 2023-08-02T04:00:00Z <<<
";

#[test]
fn test_conforming_reply_is_silent() {
    let grammar = catalog::domain_reply();
    let mut lexer = ReplyLexer::read(CONFORMING_REPLY);

    let report = validate("domain reply", &mut lexer, &grammar, &StandardTypes).unwrap();

    assert!(report.is_empty(), "unexpected: {:?}", report.rendered());
}

#[test]
fn test_broken_reply_reports_each_violation_once() {
    let reply = "\
Domain Name: -BAD-.EXAMPLE
Registrar WHOIS Server: whois.example-registrar.example
Registrar URL:
Creation Date: 2023-02-29T00:00:00Z
Registry Expiry Date: 2026-08-13T04:00:00Z
Registrar: Example Registrar, Inc.
Name Server: NS1.EXAMPLE.ORG
DNSSEC: unsigned
";
    let grammar = catalog::domain_reply();
    let mut lexer = ReplyLexer::read(reply);

    let report = validate("domain reply", &mut lexer, &grammar, &StandardTypes).unwrap();
    let rendered = report.rendered();

    // A bad hostname label, the empty referral breaking the all-or-none
    // pair, and an impossible calendar day.
    assert_eq!(rendered.len(), 3, "got: {rendered:?}");
    assert!(rendered[0].starts_with("line 1:"));
    assert!(rendered[0].contains("hostname label"));
    assert!(rendered[1].starts_with("line 3:"));
    assert!(rendered[1].contains("Registrar URL"));
    assert!(rendered[2].starts_with("line 4:"));
    assert!(rendered[2].contains("day 29"));
}

#[test]
fn test_name_server_flood_trips_the_bound() {
    let mut reply = String::from(
        "\
Domain Name: EXAMPLE.ORG
Creation Date: 1995-08-14T04:00:00Z
Registry Expiry Date: 2026-08-13T04:00:00Z
Registrar: Example Registrar, Inc.
",
    );
    for index in 1..=14 {
        reply.push_str(&format!("Name Server: NS{index}.EXAMPLE.ORG\n"));
    }
    reply.push_str("DNSSEC: unsigned\n");

    let grammar = catalog::domain_reply();
    let mut lexer = ReplyLexer::read(&reply);

    let report = validate("domain reply", &mut lexer, &grammar, &StandardTypes).unwrap();
    let rendered = report.rendered();

    assert_eq!(rendered.len(), 1, "got: {rendered:?}");
    // 4 header lines precede the name servers; the 14th server is line 18.
    assert_eq!(rendered[0], "line 18: too many repetitions of 'Name Server'");
}

#[test]
fn test_trailing_garbage_blocks_end_of_input() {
    let reply = "Domain Name: EXAMPLE.ORG\nunexpected trailing line\n";
    let grammar = catalog::simple_field("Domain Name", "hostname");
    let mut lexer = ReplyLexer::read(reply);

    let report = validate("reply", &mut lexer, &grammar, &StandardTypes).unwrap();

    assert_eq!(report.rendered(), vec!["line 2: expected end of input"]);
}

#[test]
fn test_over_long_line_note_is_forwarded() {
    let reply = format!(
        "Domain Name: EXAMPLE.ORG\nRemark: {}\n",
        "x".repeat(600)
    );
    let grammar = catalog::simple_field("Domain Name", "hostname");
    let mut lexer = ReplyLexer::read(&reply);

    let report = validate("reply", &mut lexer, &grammar, &StandardTypes).unwrap();
    let rendered = report.rendered();

    // The remark line both carries the lexer note and blocks end of input.
    // The note is only forwarded when the token is consumed, so here only
    // the structural diagnostic appears; consume it with any-line instead.
    assert_eq!(rendered, vec!["line 2: expected end of input"]);

    let tail_grammar = Grammar::build()
        .sequence(
            "reply",
            vec![
                Entry::field("Domain Name", "hostname"),
                Entry::any_line(),
                Entry::eof(),
            ],
        )
        .finish();
    let mut lexer = ReplyLexer::read(&reply);
    let report = validate("reply", &mut lexer, &tail_grammar, &StandardTypes).unwrap();
    assert_eq!(
        report.rendered(),
        vec!["line 2 exceeds 512 octets (608 octets)".to_string()]
    );
}
