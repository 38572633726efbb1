// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drives [`ReadlineAsync`] end to end with mock input and output devices.

use pretty_assertions::assert_eq;
use r3bl_shell_readline::{InlineVec, InputDevice, InputDeviceExt, OutputDevice,
                          OutputDeviceExt, ReadlineAsync, ReadlineError, ReadlineOptions,
                          SafeAutocompleteFn, StdoutMock, TerminalEvent,
                          TerminalEventResult, TerminalSize, create_autocomplete_fn};
use smallvec::smallvec;

fn data(it: &str) -> TerminalEventResult { Ok(TerminalEvent::Data(it.to_string())) }

fn new_readline(
    events: InlineVec<TerminalEventResult>,
    options: ReadlineOptions,
) -> (ReadlineAsync, StdoutMock) {
    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let readline = ReadlineAsync::new_with_devices(
        options,
        InputDevice::new_mock(events),
        output_device,
        TerminalSize::new(80, 24),
    );
    (readline, stdout_mock)
}

fn fixed_candidates(candidates: &[&str]) -> SafeAutocompleteFn {
    let candidates: Vec<String> = candidates.iter().map(ToString::to_string).collect();
    create_autocomplete_fn(move |_index, _tokens, _args| Ok(candidates.clone()))
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_consecutive_reads_share_the_input_stream() {
    let (mut readline, stdout_mock) = new_readline(
        smallvec![data("ls"), data("\r"), data("pwd"), data("\r")],
        ReadlineOptions::default(),
    );

    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "ls");
    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "pwd");

    assert_eq!(readline.line_editor.history().len(), 2);
    // Each insert clears the row, repaints it, and moves the cursor to the end.
    let forward = "\x1b[C";
    assert_eq!(
        stdout_mock.get_copy_of_buffer_as_string(),
        format!(
            "$ \r\x1b[K$ ls\r{}\r\n$ \r\x1b[K$ pwd\r{}\r\n",
            forward.repeat(4),
            forward.repeat(5)
        )
    );
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_closed_input_fails_the_read() {
    let (mut readline, stdout_mock) =
        new_readline(smallvec![data("ab")], ReadlineOptions::default());

    let report = readline.read_line("$ ", None).await.unwrap_err();
    assert!(matches!(
        report.downcast_ref::<ReadlineError>(),
        Some(ReadlineError::Closed)
    ));
    assert!(!readline.line_editor.is_active());
    assert_eq!(
        stdout_mock.get_copy_of_buffer_as_string(),
        format!("$ \r\x1b[K$ ab\r{}\r\n", "\x1b[C".repeat(4))
    );
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_read_char_then_read_line() {
    let (mut readline, _stdout_mock) = new_readline(
        smallvec![data("n"), data("ok"), data("\r")],
        ReadlineOptions::default(),
    );

    assert_eq!(readline.read_char("Proceed? ").await.unwrap(), "n");
    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "ok");
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_multi_line_input_uses_the_continuation_prompt() {
    let (mut readline, stdout_mock) = new_readline(
        smallvec![data("echo 'a"), data("\r"), data("b'"), data("\r")],
        ReadlineOptions::default(),
    );

    let line = readline.read_line("$ ", Some(">> ")).await.unwrap();

    assert_eq!(line, "echo 'a\nb'");
    assert!(
        stdout_mock
            .get_copy_of_buffer_as_string()
            .contains("$ echo 'a\r\n>> b'")
    );
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_pasted_lines_complete_the_read() {
    let (mut readline, _stdout_mock) = new_readline(
        smallvec![data("echo one\r\necho two\r\n")],
        ReadlineOptions::default(),
    );

    // Only the first line is accepted. The rest of the chunk arrives while idle.
    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "echo one");
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_tab_completes_a_unique_candidate() {
    let (mut readline, _stdout_mock) = new_readline(
        smallvec![data("gi"), data("\t"), data("\r")],
        ReadlineOptions::default(),
    );
    readline.add_autocomplete_handler(fixed_candidates(&["git", "ls"]), vec![]);

    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "git ");
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_tab_asks_before_listing_many_candidates() {
    let options = ReadlineOptions {
        max_autocomplete_entries: 2,
        ..Default::default()
    };
    let (mut readline, stdout_mock) =
        new_readline(smallvec![data("\t"), data("y"), data("\r")], options);
    readline.add_autocomplete_handler(fixed_candidates(&["c", "b", "a"]), vec![]);

    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "");

    let output = stdout_mock.get_copy_of_buffer_as_string();
    assert!(output.contains("Display all 3 possibilities? (y or n)"));
    assert!(output.contains("a  b  c  "));
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_removed_provider_no_longer_completes() {
    let (mut readline, _stdout_mock) = new_readline(
        smallvec![data("gi"), data("\t"), data("\r")],
        ReadlineOptions::default(),
    );
    let provider = fixed_candidates(&["git"]);
    readline.add_autocomplete_handler(provider.clone(), vec![]);
    assert!(readline.remove_autocomplete_handler(&provider));

    // No providers left, so Tab inserts spaces.
    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "gi    ");
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_custom_incomplete_input_predicate() {
    let (mut readline, _stdout_mock) = new_readline(
        smallvec![data("a;"), data("\r"), data("b"), data("\r")],
        ReadlineOptions::default(),
    );
    readline.set_incomplete_input_predicate(Box::new(|text: &str| text.ends_with(';')));

    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "a;\nb");
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_resize_between_reads_is_applied() {
    let (mut readline, _stdout_mock) = new_readline(
        smallvec![
            data("x"),
            data("\r"),
            Ok(TerminalEvent::Resize(TerminalSize::new(40, 10))),
            data("y"),
            data("\r"),
        ],
        ReadlineOptions::default(),
    );

    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "x");
    assert_eq!(readline.read_line("$ ", None).await.unwrap(), "y");
    assert_eq!(
        readline.line_editor.terminal_size(),
        TerminalSize::new(40, 10)
    );
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_println_between_reads() {
    let (readline, stdout_mock) = new_readline(smallvec![], ReadlineOptions::default());
    readline.println("one\ntwo").unwrap();
    readline.print_wide(&["a".to_string(), "b".to_string()]).unwrap();
    assert_eq!(
        stdout_mock.get_copy_of_buffer_as_string(),
        "one\r\ntwo\r\na  b  \r\n"
    );
}
