//! Unit tests for email body normalization.

use inbox_todo::mail::normalize::{normalize_html_body, normalize_plain_body};

// ── Plain bodies ─────────────────────────────────────────────

#[test]
fn plain_body_unifies_line_endings() {
    assert_eq!(normalize_plain_body("a\r\nb\rc\nd"), "a\nb\nc\nd");
}

#[test]
fn plain_body_is_trimmed() {
    assert_eq!(normalize_plain_body("  hello  \n"), "hello");
}

// ── HTML bodies ──────────────────────────────────────────────

#[test]
fn closing_paragraph_becomes_blank_line() {
    assert_eq!(normalize_html_body("<p>one</p><p>two</p>"), "one\n\ntwo");
}

#[test]
fn br_becomes_newline() {
    assert_eq!(normalize_html_body("one<br>two<br/>three"), "one\ntwo\nthree");
}

#[test]
fn closing_div_becomes_newline() {
    assert_eq!(normalize_html_body("<div>one</div><div>two</div>"), "one\ntwo");
}

#[test]
fn all_remaining_tags_are_stripped() {
    assert_eq!(
        normalize_html_body("<span style=\"x\">keep <b>bold</b> words</span>"),
        "keep bold words"
    );
}

#[test]
fn excess_newlines_collapse_to_paragraph_breaks() {
    assert_eq!(normalize_html_body("one<br><br><br><br>two"), "one\n\ntwo");
}

#[test]
fn tag_case_is_ignored() {
    assert_eq!(normalize_html_body("one<BR>two</DIV>"), "one\ntwo");
}

#[test]
fn webmail_structure_survives_as_lines() {
    let html = "<div>Groceries for the week</div>\
                <div>- milk [due: tomorrow]</div>\
                <div>- bread</div>";
    assert_eq!(
        normalize_html_body(html),
        "Groceries for the week\n- milk [due: tomorrow]\n- bread"
    );
}
