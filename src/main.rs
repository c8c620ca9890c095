//! Terminal host and entry point.
//!
//! Reads one command per line from stdin, feeds it to the [`Shell`], drives
//! the wall-clock scheduler until nothing is pending, and redraws the frame.
//!
//! # Arguments
//!
//! `key=value` pairs override configuration; `config=<path>` loads a TOML
//! file first:
//!
//! ```text
//! delv-shell config=~/.config/delv.toml theme=delv-light trace_level=debug
//! ```
//!
//! # Commands
//!
//! - `login <email> <password>` / `logout`
//! - `go <screen query> [entity id]`: fuzzy screen lookup; no match goes to the dashboard
//! - `back`
//! - `open <modal id> [json payload]` / `close`
//! - `sidebar`: toggle the sidebar
//! - `resize <px>`: viewport width
//! - `act <n>`: activate the n-th action of the current frame
//! - `reload`, `quit`

#![allow(clippy::multiple_crate_versions)]

use delv_shell::app::palette::resolve_screen;
use delv_shell::app::Notification;
use delv_shell::runtime::{Host, SystemScheduler};
use delv_shell::storage::{JsonSessionStore, MemorySessionStore, SessionStore};
use delv_shell::ui::render;
use delv_shell::{initialize, Config, Credentials, ModalId, ScreenId, Shell};
use std::any::Any;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

const DEFAULT_ROWS: usize = 30;
const DEFAULT_COLS: usize = 100;

/// Host that writes straight to the terminal.
#[derive(Debug, Default)]
struct TerminalHost {
    /// Notifications shown under the next frame.
    toasts: Vec<Notification>,
}

impl Host for TerminalHost {
    fn set_title(&mut self, title: &str) {
        print!("\u{1b}]0;{title}\u{7}");
    }

    fn scroll_to_top(&mut self) {
        tracing::trace!("scroll reset");
    }

    fn notify(&mut self, notification: &Notification) {
        tracing::debug!(%notification, "notification");
        self.toasts.push(notification.clone());
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Login(Credentials),
    Logout,
    Go { query: String, entity_id: Option<String> },
    Back,
    Open { modal: String, payload: Option<String> },
    Close,
    Sidebar,
    Resize(u32),
    Act(usize),
    Reload,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;

    Some(match verb {
        "login" => Command::Login(Credentials::new(words.next()?, words.next().unwrap_or_default())),
        "logout" => Command::Logout,
        "go" => {
            let query = words.next()?.to_string();
            Command::Go {
                query,
                entity_id: words.next().map(String::from),
            }
        }
        "back" => Command::Back,
        "open" => {
            let modal = words.next()?.to_string();
            let rest = words.collect::<Vec<_>>().join(" ");
            Command::Open {
                modal,
                payload: (!rest.is_empty()).then_some(rest),
            }
        }
        "close" => Command::Close,
        "sidebar" => Command::Sidebar,
        "resize" => Command::Resize(words.next()?.parse().ok()?),
        "act" => Command::Act(words.next()?.parse().ok()?),
        "reload" => Command::Reload,
        "quit" | "exit" => Command::Quit,
        _ => return None,
    })
}

type TerminalShell = Shell<SystemScheduler, TerminalHost>;

/// Best fuzzy match for `query`, falling back like any unknown screen id.
fn screen_for_query(query: &str) -> ScreenId {
    resolve_screen(query).unwrap_or_else(|| ScreenId::parse_lossy(query))
}

fn panic_summary(payload: &dyn Any) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Sends panic reports to the trace log instead of stderr, which would
/// tear the drawn frame. The view dispatcher still catches the unwind.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        tracing::error!(%location, message = panic_summary(info.payload()), "panic");
    }));
}

/// Applies one command. Returns `false` on `quit`.
fn execute(shell: &mut TerminalShell, command: Command) -> bool {
    let _span = tracing::debug_span!("command", command = ?command).entered();

    match command {
        Command::Login(credentials) => {
            shell.login(credentials);
        }
        Command::Logout => {
            shell.logout();
        }
        Command::Go { query, entity_id } => {
            shell.navigate(screen_for_query(&query), entity_id.as_deref());
        }
        Command::Back => {
            shell.back();
        }
        Command::Open { modal, payload } => {
            let modal = match modal.parse::<ModalId>() {
                Ok(modal) => modal,
                Err(e) => {
                    shell.host_mut().notify(&Notification::error(e.to_string()));
                    return true;
                }
            };
            let payload = match payload.as_deref().map(serde_json::from_str::<serde_json::Value>).transpose() {
                Ok(payload) => payload,
                Err(e) => {
                    shell
                        .host_mut()
                        .notify(&Notification::error(format!("Invalid payload: {e}")));
                    return true;
                }
            };
            shell.open_modal(modal, payload);
        }
        Command::Close => {
            shell.close_modal();
        }
        Command::Sidebar => {
            shell.toggle_sidebar();
        }
        Command::Resize(width_px) => shell.resize(width_px),
        Command::Act(n) => {
            if n == 0 || !shell.activate(n - 1) {
                shell.host_mut().notify(&Notification::info(format!("No action [{n}]")));
            }
        }
        Command::Reload => {
            shell.dispatch(delv_shell::Event::Reload);
        }
        Command::Quit => return false,
    }
    true
}

/// Runs timers and frames until the scheduler has nothing left.
fn drive(shell: &mut TerminalShell) {
    loop {
        shell.run_pending();
        match shell.scheduler().time_until_next() {
            Some(wait) => std::thread::sleep(wait),
            None => break,
        }
    }
}

fn terminal_size() -> (usize, usize) {
    let read = |key: &str, fallback: usize| {
        std::env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(fallback)
    };
    (read("LINES", DEFAULT_ROWS), read("COLUMNS", DEFAULT_COLS))
}

fn draw(shell: &mut TerminalShell) -> io::Result<()> {
    let (rows, cols) = terminal_size();
    let theme = shell.state().theme.clone();
    let frame = render(shell.frame(), &theme, rows, cols);

    let mut stdout = io::stdout().lock();
    stdout.write_all(frame.as_bytes())?;
    write!(stdout, "\u{1b}[{};1H", rows + 1)?;
    for toast in shell.host_mut().toasts.drain(..) {
        writeln!(stdout, "{toast}")?;
    }
    write!(stdout, "> ")?;
    stdout.flush()
}

fn load_config() -> Config {
    let args: BTreeMap<String, String> = std::env::args()
        .skip(1)
        .filter_map(|arg| arg.split_once('=').map(|(k, v)| (k.to_string(), v.to_string())))
        .collect();

    let base = match args.get("config") {
        Some(path) => Config::from_file(delv_shell::infrastructure::expand_tilde(path)).unwrap_or_else(|e| {
            eprintln!("{e}; using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    base.merged(&args)
}

fn open_store(config: &Config) -> Box<dyn SessionStore> {
    match JsonSessionStore::in_dir(&config.data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "session store unavailable, keeping session in memory");
            Box::new(MemorySessionStore::new())
        }
    }
}

fn main() -> io::Result<()> {
    let config = load_config();
    delv_shell::observability::init_tracing(&config);
    install_panic_hook();

    let span = tracing::info_span!("delv_shell");
    let _guard = span.entered();

    let mut shell = Shell::new(
        initialize(&config),
        open_store(&config),
        SystemScheduler::new(),
        TerminalHost::default(),
    )
    .with_latency(config.latency())
    .with_debounce(config.resize_debounce());

    shell.start();
    draw(&mut shell)?;
    drive(&mut shell);
    draw(&mut shell)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                shell
                    .host_mut()
                    .notify(&Notification::info(format!("Unknown command: {}", line.trim())));
            }
            draw(&mut shell)?;
            continue;
        };

        if !execute(&mut shell, command) {
            break;
        }
        draw(&mut shell)?;
        drive(&mut shell);
        draw(&mut shell)?;
    }

    shell.teardown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            parse_command("login admin@delv.global admin123"),
            Some(Command::Login(Credentials::new("admin@delv.global", "admin123")))
        );
        assert_eq!(
            parse_command("go cand c-101"),
            Some(Command::Go {
                query: "cand".into(),
                entity_id: Some("c-101".into())
            })
        );
        assert_eq!(
            parse_command("open candidate-preview {\"name\": \"Priya\"}"),
            Some(Command::Open {
                modal: "candidate-preview".into(),
                payload: Some("{\"name\": \"Priya\"}".into())
            })
        );
        assert_eq!(parse_command("resize 900"), Some(Command::Resize(900)));
        assert_eq!(parse_command("act 2"), Some(Command::Act(2)));
    }

    #[test]
    fn unmatched_go_query_falls_back_to_dashboard() {
        assert_eq!(screen_for_query("qqqq"), ScreenId::Dashboard);
        assert_eq!(screen_for_query("settings"), ScreenId::Settings);
    }

    #[test]
    fn panic_summary_reads_string_payloads() {
        assert_eq!(panic_summary(&"stage data unavailable"), "stage data unavailable");
        assert_eq!(panic_summary(&String::from("boom")), "boom");
        assert_eq!(panic_summary(&7_u8), "non-string panic payload");
    }

    #[test]
    fn quiet_hook_still_lets_the_unwind_be_caught() {
        install_panic_hook();
        let caught = std::panic::catch_unwind(|| panic!("view exploded"));
        let _ = std::panic::take_hook();

        assert_eq!(panic_summary(caught.unwrap_err().as_ref()), "view exploded");
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("resize wide"), None);
        assert_eq!(parse_command("go"), None);
        assert_eq!(parse_command("dance"), None);
    }
}
