//! Reconciliation decision
//!
//! Pure function from (current IP, subdomain prefix, listed records) to the
//! set of deletions and the optional creation a run must perform.

use crate::config::ReconcilePolicy;
use crate::record::{DnsRecord, NewRecord};

/// What a run will do to the provider's record set
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan<'a> {
    /// Matching records that already point at the IP and are left alone
    pub kept: Vec<&'a DnsRecord>,
    /// Matching records to delete, in the order they were listed
    pub deletions: Vec<&'a DnsRecord>,
    /// Record to create after the deletions, if any
    pub create: Option<NewRecord>,
}

impl ReconcilePlan<'_> {
    /// True when the run will not call the provider again
    pub fn is_noop(&self) -> bool {
        self.deletions.is_empty() && self.create.is_none()
    }
}

/// Whether `record` is one pbddns manages for `sub_domain`.
///
/// The name test is a plain prefix match against the fully-qualified record
/// name, so an empty prefix (the apex) matches every address record in the
/// zone.
pub fn record_matches(record: &DnsRecord, sub_domain: &str) -> bool {
    record.name.starts_with(sub_domain) && record.record_type.is_address_like()
}

/// Decide which records to delete and whether to create a new A record.
///
/// Non-matching records are skipped before their content is looked at.
pub fn plan_reconciliation<'a>(
    ip: &str,
    sub_domain: &str,
    records: &'a [DnsRecord],
    policy: ReconcilePolicy,
) -> ReconcilePlan<'a> {
    let mut kept = Vec::new();
    let mut deletions = Vec::new();

    for record in records.iter().filter(|r| record_matches(r, sub_domain)) {
        match policy {
            ReconcilePolicy::KeepCorrect if record.content == ip => kept.push(record),
            _ => deletions.push(record),
        }
    }

    let create = kept.is_empty().then(|| NewRecord::a(sub_domain, ip));

    ReconcilePlan {
        kept,
        deletions,
        create,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordType;

    const IP: &str = "1.2.3.4";

    fn record(id: &str, name: &str, record_type: &str, content: &str) -> DnsRecord {
        DnsRecord::new(id, name, RecordType::from(record_type), content)
    }

    fn ids(records: &[&DnsRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn correct_record_means_nothing_to_do() {
        let records = vec![record("1", "www.test.com", "A", IP)];

        let plan = plan_reconciliation(IP, "www", &records, ReconcilePolicy::KeepCorrect);

        assert!(plan.is_noop());
        assert_eq!(ids(&plan.kept), vec!["1"]);
    }

    #[test]
    fn stale_record_is_deleted_then_recreated() {
        let records = vec![record("1", "www.test.com", "A", "5.6.7.8")];

        let plan = plan_reconciliation(IP, "www", &records, ReconcilePolicy::KeepCorrect);

        assert_eq!(ids(&plan.deletions), vec!["1"]);
        assert_eq!(plan.create, Some(NewRecord::a("www", IP)));
    }

    #[test]
    fn no_matching_record_only_creates() {
        let records = vec![
            record("1", "mail.test.com", "A", "5.6.7.8"),
            record("2", "test.com", "MX", "mail.test.com"),
        ];

        let plan = plan_reconciliation(IP, "www", &records, ReconcilePolicy::KeepCorrect);

        assert!(plan.deletions.is_empty());
        assert!(plan.kept.is_empty());
        assert_eq!(plan.create, Some(NewRecord::a("www", IP)));
    }

    #[test]
    fn alias_and_cname_are_replaced_but_other_types_are_not() {
        let records = vec![
            record("1", "www.test.com", "CNAME", "test.com"),
            record("2", "www.test.com", "TXT", "v=spf1 -all"),
            record("3", "www.test.com", "ALIAS", "lb.test.net"),
            record("4", "www.test.com", "AAAA", "::1"),
        ];

        let plan = plan_reconciliation(IP, "www", &records, ReconcilePolicy::KeepCorrect);

        assert_eq!(ids(&plan.deletions), vec!["1", "3"]);
        assert!(plan.create.is_some());
    }

    #[test]
    fn correct_record_does_not_save_stale_siblings() {
        let records = vec![
            record("1", "www.test.com", "A", "9.9.9.9"),
            record("2", "www.test.com", "A", IP),
            record("3", "www.test.com", "CNAME", "test.com"),
        ];

        let plan = plan_reconciliation(IP, "www", &records, ReconcilePolicy::KeepCorrect);

        assert_eq!(ids(&plan.kept), vec!["2"]);
        assert_eq!(ids(&plan.deletions), vec!["1", "3"]);
        assert!(plan.create.is_none());
    }

    #[test]
    fn replace_policy_deletes_everything_and_creates() {
        let records = vec![
            record("1", "www.test.com", "A", IP),
            record("2", "www.test.com", "A", "9.9.9.9"),
        ];

        let plan = plan_reconciliation(IP, "www", &records, ReconcilePolicy::Replace);

        assert!(plan.kept.is_empty());
        assert_eq!(ids(&plan.deletions), vec!["1", "2"]);
        assert_eq!(plan.create, Some(NewRecord::a("www", IP)));
    }

    #[test]
    fn apex_prefix_matches_every_address_record() {
        let records = vec![
            record("1", "test.com", "A", "9.9.9.9"),
            record("2", "www.test.com", "CNAME", "test.com"),
            record("3", "test.com", "NS", "ns1.porkbun.com"),
        ];

        let plan = plan_reconciliation(IP, "", &records, ReconcilePolicy::KeepCorrect);

        assert_eq!(ids(&plan.deletions), vec!["1", "2"]);
        assert_eq!(plan.create, Some(NewRecord::a("", IP)));
    }

    #[test]
    fn record_matching_uses_name_prefix() {
        let www = record("1", "www.test.com", "A", IP);
        let www2 = record("2", "www2.test.com", "A", IP);
        let api = record("3", "api.test.com", "A", IP);

        assert!(record_matches(&www, "www"));
        assert!(record_matches(&www2, "www"));
        assert!(!record_matches(&api, "www"));
    }
}
