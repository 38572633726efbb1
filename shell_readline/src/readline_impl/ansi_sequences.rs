// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Escape sequences that the editor writes to, and recognizes from, the terminal.
//!
//! Output sequences are always the single step (parameterless) form. Moving by `n` is
//! done by writing the sequence `n` times, since some terminal surfaces only implement
//! the default count.

// Sequence components.

/// ESC
pub const ESC: char = '\x1b';

/// DEL, sent by the Backspace key.
pub const DEL: char = '\x7f';

/// ETX, sent by Ctrl+C.
pub const CTRL_C: char = '\x03';

pub const CR: &str = "\r";
pub const CRLF: &str = "\r\n";

// Cursor movement (output).

/// CSI A: Cursor Up (CUU) by 1 row.
pub const CUU_CURSOR_UP: &str = "\x1b[A";

/// CSI B: Cursor Down (CUD) by 1 row.
pub const CUD_CURSOR_DOWN: &str = "\x1b[B";

/// CSI C: Cursor Forward (CUF) by 1 column.
pub const CUF_CURSOR_FORWARD: &str = "\x1b[C";

/// CSI D: Cursor Backward (CUB) by 1 column.
pub const CUB_CURSOR_BACKWARD: &str = "\x1b[D";

/// CSI E: Cursor Next Line (CNL). Column 0 of the row below.
pub const CNL_CURSOR_NEXT_LINE: &str = "\x1b[E";

/// CSI F: Cursor Previous Line (CPL). Column 0 of the row above.
pub const CPL_CURSOR_PREV_LINE: &str = "\x1b[F";

// Erasing (output).

/// CSI K: Erase in Line (EL) from the cursor to the end of the row.
pub const EL_ERASE_LINE: &str = "\x1b[K";

// Key sequences (input). These are the bytes that follow ESC.

pub const KEY_UP: &str = "[A";
pub const KEY_DOWN: &str = "[B";
pub const KEY_RIGHT: &str = "[C";
pub const KEY_LEFT: &str = "[D";
pub const KEY_END: &str = "[F";
pub const KEY_HOME: &str = "[H";
pub const KEY_DELETE: &str = "[3~";
pub const KEY_ALT_B: &str = "b";
pub const KEY_ALT_F: &str = "f";
pub const KEY_ALT_BACKSPACE: &str = "\x7f";

