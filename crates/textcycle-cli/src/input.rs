use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use textcycle_core::{HotkeyBinding, HotkeyStore, Modifier, StopSignal};
use tracing::debug;

/// What a key press asks the run loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Show the next text now
    Next,
    Quit,
}

/// Spawn a thread that turns keyboard input into [`KeyAction`]s.
///
/// Presses matching one of `hotkeys` send [`KeyAction::Next`]. Esc, q/Q and
/// Ctrl+C send [`KeyAction::Quit`]; a hotkey bound to one of those keys wins.
/// The thread exits once `stop` is triggered or the receiver is dropped.
pub fn spawn_keyboard_monitor(
    hotkeys: HotkeyStore,
    tx: Sender<KeyAction>,
    stop: Arc<StopSignal>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        debug!("Keyboard monitor started");

        while !stop.is_stopped() {
            // Poll with a timeout so the stop flag is rechecked
            if event::poll(Duration::from_millis(100)).unwrap_or(false)
                && let Ok(Event::Key(key_event)) = event::read()
                && let Some(action) = classify(&key_event, &hotkeys)
            {
                debug!("Key {:?} -> {:?}", key_event.code, action);
                if tx.send(action).is_err() || action == KeyAction::Quit {
                    break;
                }
            }
        }

        debug!("Keyboard monitor stopped");
    })
}

fn classify(event: &KeyEvent, hotkeys: &HotkeyStore) -> Option<KeyAction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if let Some(pressed) = to_binding(event)
        && hotkeys.matches(&pressed)
    {
        return Some(KeyAction::Next);
    }

    should_quit(event).then_some(KeyAction::Quit)
}

fn should_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc => true,
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => true,
        _ => false,
    }
}

/// Convert a key event into the binding form used by [`HotkeyStore`].
fn to_binding(event: &KeyEvent) -> Option<HotkeyBinding> {
    let mut shift = event.modifiers.contains(KeyModifiers::SHIFT);

    let key = match event.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => {
            // Some terminals report an uppercase char without the SHIFT flag
            shift |= c.is_uppercase();
            c.to_lowercase().to_string()
        }
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        _ => return None,
    };

    let mut binding = HotkeyBinding::new(key);
    if shift {
        binding = binding.with(Modifier::Shift);
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        binding = binding.with(Modifier::Control);
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        binding = binding.with(Modifier::Alt);
    }
    if event.modifiers.contains(KeyModifiers::SUPER) {
        binding = binding.with(Modifier::Command);
    }
    Some(binding)
}
