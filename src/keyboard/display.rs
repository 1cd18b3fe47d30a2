/// Sentinel chars stand in for the physical keys that do not type a character.
///
/// They are created only where key codes are turned into physical keys
/// (`KeyboardModel::key_for`) and are rendered through the adapters below, so no
/// other module needs to match on them directly.

/// Human-readable name for a key (including sentinels).
/// Returns `""` for printable chars; callers use the key label for those.
pub fn key_display_name(ch: char) -> &'static str {
    match ch {
        '\x08' => "Backspace",
        '\t' => "Tab",
        '\n' => "Enter",
        ' ' => "Space",
        _ => "",
    }
}

pub fn is_named_key(ch: char) -> bool {
    !key_display_name(ch).is_empty()
}

/// Sentinel char for Backspace.
pub const BACKSPACE: char = '\x08';
/// Sentinel char for Tab.
pub const TAB: char = '\t';
/// Sentinel char for Enter.
pub const ENTER: char = '\n';
/// Space is a real character but is drawn as a named key.
pub const SPACE: char = ' ';
