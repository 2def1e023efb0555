//! Stock grammars for common reply shapes
//!
//! These are the grammars used by the documentation and the end-to-end
//! tests. A thin-registry domain reply is the canonical consumer: a header
//! of identifying fields, a bounded name-server section, an optional status
//! section, timestamps, and a free-form disclaimer tail.

use super::{Entry, Grammar, Quantifier};

/// Grammar for a thin-registry domain reply.
///
/// Shape, top to bottom:
/// - `Domain Name` (required) and `Registry Domain ID` (optional)
/// - `Registrar WHOIS Server` / `Registrar URL` as an all-or-none pair:
///   registrars that publish one referral field publish both
/// - registration metadata and timestamps
/// - zero or more status lines (choice of `Domain Status` / `Referral URL`)
/// - one to thirteen `Name Server` fields
/// - `DNSSEC`, then any number of disclaimer lines, then end of input
pub fn domain_reply() -> Grammar {
    Grammar::build()
        .sequence(
            "domain reply",
            vec![
                Entry::field("Domain Name", "hostname"),
                Entry::field("Registry Domain ID", "roid")
                    .with_quantifier(Quantifier::OptionalFree),
                Entry::field("Registrar WHOIS Server", "hostname")
                    .with_quantifier(Quantifier::OptionalConstrained),
                Entry::field("Registrar URL", "url")
                    .with_quantifier(Quantifier::OptionalConstrained),
                Entry::field("Updated Date", "timestamp")
                    .with_quantifier(Quantifier::OptionalFree),
                Entry::field("Creation Date", "timestamp"),
                Entry::field("Registry Expiry Date", "timestamp"),
                Entry::field("Registrar", "free text"),
                Entry::field("Registrar IANA ID", "positive integer")
                    .with_quantifier(Quantifier::OptionalFree),
                Entry::field("Registrar Abuse Contact Email", "email")
                    .with_quantifier(Quantifier::OptionalFree),
                Entry::rule("status section")
                    .with_quantifier(Quantifier::OptionalRepeatable),
                Entry::rule("name servers"),
                Entry::field("DNSSEC", "free text"),
                Entry::rule("disclaimer").with_quantifier(Quantifier::OptionalFree),
                Entry::eof(),
            ],
        )
        .choice(
            "status section",
            vec![("Domain Status", "free text"), ("Referral URL", "url")],
        )
        .sequence(
            "name servers",
            vec![Entry::field("Name Server", "hostname")
                .with_quantifier(Quantifier::RepeatableMax(13))],
        )
        .sequence(
            "disclaimer",
            vec![
                Entry::field(">>> Last update of whois database", "free text")
                    .with_quantifier(Quantifier::OptionalFree),
                Entry::any_line().with_quantifier(Quantifier::OptionalRepeatable),
            ],
        )
        .finish()
}

/// A minimal grammar expecting one typed field and end of input. Handy as a
/// documentation example and as a smoke-test fixture.
pub fn simple_field(name: &str, field_type: &str) -> Grammar {
    Grammar::build()
        .sequence(
            "reply",
            vec![Entry::field(name, field_type), Entry::eof()],
        )
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdds::types::StandardTypes;

    #[test]
    fn test_domain_reply_grammar_is_well_formed() {
        let grammar = domain_reply();
        assert!(grammar.check(&StandardTypes).is_ok());
        assert!(grammar.rule("domain reply").is_some());
        assert!(grammar.rule("status section").is_some());
        assert!(grammar.rule("name servers").is_some());
    }

    #[test]
    fn test_simple_field_grammar_is_well_formed() {
        let grammar = simple_field("Domain Name", "hostname");
        assert!(grammar.check(&StandardTypes).is_ok());
    }
}
