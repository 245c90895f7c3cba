//! Integration tests for the rule registry and the rule runtime.

use lintel_html::EventKind;
use lintel_rules::{
    Linter, Rule, RuleError, RuleFailure, RuleParser, RuleRegistry, RuleSet, Severity,
};

/// Reports every text run as info.
struct EchoText;

impl Rule for EchoText {
    fn id(&self) -> &'static str {
        "echo-text"
    }

    fn description(&self) -> &'static str {
        "Reports every text run."
    }

    fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
        parser.add_listener(EventKind::Text, |event, reporter| {
            let position = event.position;
            reporter.info(event.raw, position.line, position.column, self.id(), event.raw);
        });
        Ok(())
    }
}

/// Subscribes a listener, then gives up.
struct FailsHalfway;

impl Rule for FailsHalfway {
    fn id(&self) -> &'static str {
        "fails-halfway"
    }

    fn description(&self) -> &'static str {
        "Always fails to initialise."
    }

    fn init<'l>(&'l self, parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
        parser.add_listener(EventKind::Text, |_, reporter| {
            reporter.error("should never run", 1, 1, "fails-halfway", "");
        });
        Err(RuleError::init(self.id(), "missing configuration"))
    }
}

/// Replaces the built-in `tag-pair` rule.
struct QuietTagPair;

impl Rule for QuietTagPair {
    fn id(&self) -> &'static str {
        "tag-pair"
    }

    fn description(&self) -> &'static str {
        "Reports nothing."
    }

    fn init<'l>(&'l self, _parser: &mut RuleParser<'l, '_>) -> Result<(), RuleError> {
        Ok(())
    }
}

#[test]
fn test_builtin_rules_in_registration_order() {
    let registry = RuleRegistry::with_builtin_rules();
    assert_eq!(
        registry.rule_ids().collect::<Vec<_>>(),
        vec![
            "doctype-first",
            "tag-pair",
            "attr-lowercase",
            "attr-value-double-quotes",
            "space-tab-mixed-disabled",
        ]
    );
    assert_eq!(registry.len(), 5);
    let rule = registry.get("space-tab-mixed-disabled").unwrap();
    assert_eq!(
        rule.description(),
        "Spaces and tabs cannot be used together in front of a line."
    );
    assert!(registry.get("no-such-rule").is_none());
}

#[test]
fn test_empty_registry_reports_nothing() {
    let registry = RuleRegistry::new();
    assert!(registry.is_empty());
    let report = Linter::new(&registry).verify("<p>\n \tx", &RuleSet::all());
    assert!(report.is_clean());
}

#[test]
fn test_duplicate_id_replaces_in_place() {
    let mut registry = RuleRegistry::with_builtin_rules();
    registry.add_rule(Box::new(QuietTagPair));
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.rule_ids().nth(1), Some("tag-pair"));
    assert_eq!(registry.get("tag-pair").unwrap().description(), "Reports nothing.");

    let rules = RuleSet::from_list("tag-pair").unwrap();
    let report = Linter::new(&registry).verify("<p>", &rules);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_failed_init_is_isolated() {
    let mut registry = RuleRegistry::new();
    registry.add_rule(Box::new(FailsHalfway));
    registry.add_rule(Box::new(EchoText));

    let report = Linter::new(&registry).verify("hello", &RuleSet::all());
    assert_eq!(
        report.failures,
        vec![RuleFailure {
            rule: "fails-halfway".to_string(),
            reason: "rule `fails-halfway` failed to initialise: missing configuration"
                .to_string(),
        }]
    );
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].rule, "echo-text");
    assert_eq!(report.diagnostics[0].severity, Severity::Info);
    assert!(!report.is_clean());
}

#[test]
fn test_rule_set_selects_rules() {
    let registry = RuleRegistry::with_builtin_rules();
    let linter = Linter::new(&registry);
    let html = "<p Class='x'>\n \ty";

    assert!(linter.verify(html, &RuleSet::new()).is_clean());

    let report = linter.verify(html, &RuleSet::all());
    let rules: Vec<_> = report.diagnostics.iter().map(|d| d.rule.as_str()).collect();
    assert_eq!(
        rules,
        vec![
            "doctype-first",
            "attr-lowercase",
            "attr-value-double-quotes",
            "space-tab-mixed-disabled",
            "tag-pair",
        ]
    );
    assert_eq!(report.count(Severity::Error), 4);
    assert_eq!(report.count(Severity::Warning), 1);

    let mut rules = RuleSet::all();
    rules.disable("doctype-first");
    rules.disable("tag-pair");
    assert_eq!(linter.verify(html, &rules).diagnostics.len(), 3);
}

#[test]
fn test_unknown_rule_ids_are_skipped() {
    let registry = RuleRegistry::with_builtin_rules();
    let rules = RuleSet::from_list("no-such-rule,tag-pair").unwrap();
    let report = Linter::new(&registry).verify("</p>", &rules);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.failures.is_empty());
}

#[test]
fn test_inline_rule_set_overrides_caller() {
    let registry = RuleRegistry::with_builtin_rules();
    let linter = Linter::new(&registry);

    let html = "<!-- lintel attr-lowercase:false -->\n<p Class=\"a\"></p>";
    let rules = RuleSet::from_list("attr-lowercase").unwrap();
    assert!(linter.verify(html, &rules).is_clean());

    let html = "<!-- lintel tag-pair -->\n<p>";
    let report = linter.verify(html, &RuleSet::new());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].rule, "tag-pair");
}

#[test]
fn test_malformed_inline_rule_set_is_ignored() {
    let registry = RuleRegistry::with_builtin_rules();
    let html = "<!-- lintel a,,b -->\n</p>";
    let rules = RuleSet::from_list("tag-pair").unwrap();
    let report = Linter::new(&registry).verify(html, &rules);
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn test_verify_is_idempotent() {
    let registry = RuleRegistry::with_builtin_rules();
    let linter = Linter::new(&registry);
    let html = "<div>\r\n \t<P ID=x></div>\r\n</span>";
    let first = linter.verify(html, &RuleSet::all());
    let second = linter.verify(html, &RuleSet::all());
    assert!(!first.diagnostics.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_registry_is_shared_across_threads() {
    let registry = RuleRegistry::with_builtin_rules();
    let html = "<p>\n \tx</p></b>";
    let registry = &registry;
    let expected = Linter::new(registry).verify(html, &RuleSet::all());
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || Linter::new(registry).verify(html, &RuleSet::all())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_report_serializes_to_json() {
    let registry = RuleRegistry::with_builtin_rules();
    let rules = RuleSet::from_list("space-tab-mixed-disabled").unwrap();
    let report = Linter::new(&registry).verify("a\n\t b", &rules);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "diagnostics": [{
                "rule": "space-tab-mixed-disabled",
                "severity": "warning",
                "message": "There were spaces and tabs used together in front of a line.",
                "line": 2,
                "column": 1,
                "raw": "a\n\t b",
                "evidence": "\t b",
            }],
            "failures": [],
        })
    );
}
