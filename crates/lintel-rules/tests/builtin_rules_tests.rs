//! Integration tests for the structural built-in rules.

use lintel_rules::{Diagnostic, Linter, RuleRegistry, RuleSet, Severity};

/// Helper to lint `html` with exactly the rules in `list`
fn lint(list: &str, html: &str) -> Vec<Diagnostic> {
    let registry = RuleRegistry::with_builtin_rules();
    let rules = RuleSet::from_list(list).unwrap();
    Linter::new(&registry).verify(html, &rules).diagnostics
}

fn summary(diagnostics: &[Diagnostic]) -> Vec<(usize, usize, &str)> {
    diagnostics
        .iter()
        .map(|d| (d.line, d.column, d.message.as_str()))
        .collect()
}

// ============================================================================
// doctype-first
// ============================================================================

#[test]
fn test_doctype_first_accepts_leading_doctype() {
    assert!(lint("doctype-first", "<!DOCTYPE html><p>x</p>").is_empty());
    assert!(lint("doctype-first", "  \r\n<!doctype html>\n<p>").is_empty());
    assert!(lint("doctype-first", "").is_empty());
}

#[test]
fn test_doctype_first_reports_once() {
    let diagnostics = lint("doctype-first", "\n<p>x</p>\n<!DOCTYPE html>");
    assert_eq!(summary(&diagnostics), vec![(2, 1, "Doctype must be first.")]);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].raw, "<p>");
}

#[test]
fn test_doctype_first_rejects_comments_and_other_declarations() {
    assert_eq!(lint("doctype-first", "<!-- c --><!DOCTYPE html>").len(), 1);
    assert_eq!(lint("doctype-first", "<!ELEMENT p>").len(), 1);
    assert_eq!(lint("doctype-first", "text").len(), 1);
}

// ============================================================================
// tag-pair
// ============================================================================

#[test]
fn test_tag_pair_accepts_balanced_markup() {
    let html = "<DIV><p>a</p><br><img src=x><span/></div>";
    assert!(lint("tag-pair", html).is_empty());
}

#[test]
fn test_tag_pair_end_tag_without_start() {
    let diagnostics = lint("tag-pair", "<p>a</p>\n</span>");
    assert_eq!(
        summary(&diagnostics),
        vec![(2, 1, "Tag must be paired, no start tag: [ </span> ]")]
    );
}

#[test]
fn test_tag_pair_end_tag_closes_unclosed_children() {
    let diagnostics = lint("tag-pair", "<div><p><b></div>");
    assert_eq!(
        summary(&diagnostics),
        vec![(
            1,
            12,
            "Tag must be paired, missing: [ </b></p> ], start tag match failed [ <b> ] on line 1."
        )]
    );
}

#[test]
fn test_tag_pair_unclosed_at_end_of_document() {
    let diagnostics = lint("tag-pair", "<ul>\n<li class=\"a\">");
    assert_eq!(
        summary(&diagnostics),
        vec![(
            2,
            15,
            "Tag must be paired, missing: [ </li></ul> ], start tag match failed [ <li class=\"a\"> ] on line 2."
        )]
    );
    assert_eq!(diagnostics[0].raw, "");
}

// ============================================================================
// attr-lowercase / attr-value-double-quotes
// ============================================================================

#[test]
fn test_attr_lowercase() {
    let diagnostics = lint("attr-lowercase", "<p id=a\n   Class=\"b\" DATA-x>");
    assert_eq!(
        summary(&diagnostics),
        vec![
            (2, 4, "The attribute name of [ Class ] must be in lowercase."),
            (2, 14, "The attribute name of [ DATA-x ] must be in lowercase."),
        ]
    );
    assert_eq!(diagnostics[0].raw, "Class=\"b\"");
}

#[test]
fn test_attr_value_double_quotes() {
    let html = "<a href='x' title=y alt=\"z\" disabled lang='' data-x=>";
    let diagnostics = lint("attr-value-double-quotes", html);
    let names: Vec<_> = diagnostics.iter().map(|d| d.raw.as_str()).collect();
    assert_eq!(names, vec!["href='x'", "title=y", "lang=''"]);
    assert_eq!(
        summary(&diagnostics[..1]),
        vec![(1, 4, "The value of attribute [ href ] must be in double quotes.")]
    );
    assert_eq!(diagnostics[1].column, 13);
}

#[test]
fn test_rules_report_in_document_order() {
    let diagnostics = lint(
        "attr-lowercase,attr-value-double-quotes,tag-pair",
        "<p ID='x'></b>",
    );
    let rules: Vec<_> = diagnostics.iter().map(|d| d.rule.as_str()).collect();
    assert_eq!(
        rules,
        vec!["attr-lowercase", "attr-value-double-quotes", "tag-pair", "tag-pair"]
    );
}

#[test]
fn test_rules_recover_after_unclosed_attribute_quote() {
    let html = "<p class=\"a>\n</p>\n<div ID=x></span></div>";
    let diagnostics = lint("tag-pair,attr-lowercase", html);
    assert_eq!(
        summary(&diagnostics),
        vec![
            (3, 6, "The attribute name of [ ID ] must be in lowercase."),
            (3, 11, "Tag must be paired, no start tag: [ </span> ]"),
        ]
    );
}
