//! Unit tests for description / task-list splitting.

use inbox_todo::parser::extract_todo_list;

// ── Basic splitting ──────────────────────────────────────────

#[test]
fn bullets_only_yields_empty_description() {
    let parsed = extract_todo_list("- Task A\n* Task B");
    assert_eq!(parsed.description, "");
    assert_eq!(parsed.tasks, vec!["Task A", "Task B"]);
}

#[test]
fn intro_line_becomes_description() {
    let parsed = extract_todo_list("Intro line\n- Task A");
    assert_eq!(parsed.description, "Intro line");
    assert_eq!(parsed.tasks, vec!["Task A"]);
}

#[test]
fn multi_line_description_is_kept_whole() {
    let parsed = extract_todo_list("First para.\n\nSecond para.\n- only task");
    assert_eq!(parsed.description, "First para.\n\nSecond para.");
    assert_eq!(parsed.tasks, vec!["only task"]);
}

#[test]
fn no_bullets_means_everything_is_description() {
    let parsed = extract_todo_list("Just some text\nacross two lines");
    assert_eq!(parsed.description, "Just some text\nacross two lines");
    assert!(parsed.tasks.is_empty());
}

#[test]
fn empty_body_yields_empty_parts() {
    let parsed = extract_todo_list("");
    assert_eq!(parsed.description, "");
    assert!(parsed.tasks.is_empty());
}

// ── Bullet recognition ───────────────────────────────────────

#[test]
fn indented_bullets_are_tasks() {
    let parsed = extract_todo_list("list:\n  - indented\n\t* tabbed");
    assert_eq!(parsed.tasks, vec!["indented", "tabbed"]);
}

#[test]
fn bullet_requires_following_whitespace() {
    let parsed = extract_todo_list("-nospace here");
    assert!(parsed.tasks.is_empty());
    assert_eq!(parsed.description, "-nospace here");
}

#[test]
fn inline_emphasis_is_not_a_bullet() {
    let parsed = extract_todo_list("This is **bold** emphasis in a paragraph");
    assert!(parsed.tasks.is_empty());
}

#[test]
fn ordering_is_preserved() {
    let parsed = extract_todo_list("- one\n- two\n- three\n- four");
    assert_eq!(parsed.tasks, vec!["one", "two", "three", "four"]);
}

#[test]
fn blank_lines_between_tasks_are_tolerated() {
    let parsed = extract_todo_list("- first\n\n- second");
    assert_eq!(parsed.tasks, vec!["first", "second"]);
}

// ── Content preservation ─────────────────────────────────────

#[test]
fn inline_markup_survives_in_task_text() {
    let parsed = extract_todo_list("- Buy milk [due: tomorrow][assigned to: jane]");
    assert_eq!(
        parsed.tasks,
        vec!["Buy milk [due: tomorrow][assigned to: jane]"]
    );
}

#[test]
fn unicode_task_text_is_preserved() {
    let parsed = extract_todo_list("- Café besorgen ☕");
    assert_eq!(parsed.tasks, vec!["Café besorgen ☕"]);
}

#[test]
fn crlf_bodies_are_normalized() {
    let parsed = extract_todo_list("Intro\r\n- task one\r\n- task two");
    assert_eq!(parsed.description, "Intro");
    assert_eq!(parsed.tasks, vec!["task one", "task two"]);
}

#[test]
fn splitting_is_idempotent() {
    let body = "Intro\n- a\n- b";
    assert_eq!(extract_todo_list(body), extract_todo_list(body));
}
