use std::process::{Child, Command, Stdio};

use tracing::{info, warn};

/// The region a running game lives in. Loading starts the game, clearing
/// stops it; there is no feedback about whether the load worked.
pub trait EmbeddedFrame {
    fn load(&mut self, url: &str);
    fn clear(&mut self);
    fn source(&self) -> &str;
    /// True once the loaded game has ended by itself.
    fn poll_ended(&mut self) -> bool;
}

/// Holds the source and nothing else.
#[derive(Debug, Default)]
pub struct InlineFrame {
    src: String,
}

impl EmbeddedFrame for InlineFrame {
    fn load(&mut self, url: &str) {
        self.src = url.to_string();
    }

    fn clear(&mut self) {
        self.src.clear();
    }

    fn source(&self) -> &str {
        &self.src
    }

    fn poll_ended(&mut self) -> bool {
        false
    }
}

const URL_PLACEHOLDER: &str = "{url}";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RunnerCommand {
    /// Substitutes `{url}` in each arg, or appends the url when no arg asks for it.
    pub fn args_for(&self, url: &str) -> Vec<String> {
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(URL_PLACEHOLDER, url))
            .collect();
        if !self.args.iter().any(|a| a.contains(URL_PLACEHOLDER)) {
            args.push(url.to_string());
        }
        args
    }
}

/// Runs each game as a child process of the configured runner.
#[derive(Debug)]
pub struct ProcessFrame {
    runner: RunnerCommand,
    src: String,
    child: Option<Child>,
}

impl ProcessFrame {
    pub fn new(runner: RunnerCommand) -> Self {
        Self {
            runner,
            src: String::new(),
            child: None,
        }
    }

    fn stop_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                // Already exited.
                tracing::debug!(error = %e, "runner kill failed");
            }
            if let Err(e) = child.wait() {
                tracing::debug!(error = %e, "runner reap failed");
            }
        }
    }
}

impl EmbeddedFrame for ProcessFrame {
    fn load(&mut self, url: &str) {
        self.stop_child();
        self.src = url.to_string();
        let spawned = Command::new(&self.runner.program)
            .args(self.runner.args_for(url))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => {
                info!(pid = child.id(), program = %self.runner.program, url, "runner started");
                self.child = Some(child);
            }
            Err(e) => {
                warn!(error = %e, program = %self.runner.program, url, "failed to start runner");
            }
        }
    }

    fn clear(&mut self) {
        self.stop_child();
        self.src.clear();
    }

    fn source(&self) -> &str {
        &self.src
    }

    fn poll_ended(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else { return false };
        match child.try_wait() {
            Ok(Some(status)) => {
                info!(%status, url = %self.src, "runner ended");
                self.child = None;
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "failed to poll runner");
                false
            }
        }
    }
}

impl Drop for ProcessFrame {
    fn drop(&mut self) {
        self.stop_child();
    }
}

/// Either frame kind, picked once from the config.
#[derive(Debug)]
pub enum GameFrame {
    Inline(InlineFrame),
    Process(ProcessFrame),
}

impl GameFrame {
    pub fn for_runner(runner: Option<RunnerCommand>) -> Self {
        match runner {
            Some(runner) => GameFrame::Process(ProcessFrame::new(runner)),
            None => GameFrame::Inline(InlineFrame::default()),
        }
    }
}

impl EmbeddedFrame for GameFrame {
    fn load(&mut self, url: &str) {
        match self {
            GameFrame::Inline(f) => f.load(url),
            GameFrame::Process(f) => f.load(url),
        }
    }

    fn clear(&mut self) {
        match self {
            GameFrame::Inline(f) => f.clear(),
            GameFrame::Process(f) => f.clear(),
        }
    }

    fn source(&self) -> &str {
        match self {
            GameFrame::Inline(f) => f.source(),
            GameFrame::Process(f) => f.source(),
        }
    }

    fn poll_ended(&mut self) -> bool {
        match self {
            GameFrame::Inline(f) => f.poll_ended(),
            GameFrame::Process(f) => f.poll_ended(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(args: &[&str]) -> RunnerCommand {
        RunnerCommand {
            program: "xdg-open".to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_args_append_url_without_placeholder() {
        assert_eq!(runner(&[]).args_for("a.html"), vec!["a.html"]);
        assert_eq!(runner(&["--new-window"]).args_for("a.html"), vec!["--new-window", "a.html"]);
    }

    #[test]
    fn test_args_substitute_placeholder() {
        let r = runner(&["--app={url}", "--kiosk"]);
        assert_eq!(r.args_for("game-players/x.html"), vec!["--app=game-players/x.html", "--kiosk"]);
    }

    #[test]
    fn test_inline_frame_load_and_clear() {
        let mut frame = InlineFrame::default();
        assert_eq!(frame.source(), "");
        frame.load("game-players/arc-dash.html");
        assert_eq!(frame.source(), "game-players/arc-dash.html");
        assert!(!frame.poll_ended());
        frame.clear();
        assert_eq!(frame.source(), "");
    }

    #[test]
    fn test_frame_without_runner_is_inline() {
        assert!(matches!(GameFrame::for_runner(None), GameFrame::Inline(_)));
        assert!(matches!(GameFrame::for_runner(Some(runner(&[]))), GameFrame::Process(_)));
    }

    #[cfg(unix)]
    fn shell(script: &str) -> RunnerCommand {
        RunnerCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_process_frame_reports_game_that_ended() {
        let mut frame = ProcessFrame::new(shell("exit 0"));
        frame.load("game-players/arc-dash.html");
        assert_eq!(frame.source(), "game-players/arc-dash.html");
        assert!(frame.child.is_some());

        let mut ended = false;
        for _ in 0..200 {
            if frame.poll_ended() {
                ended = true;
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(25));
        }
        assert!(ended);
        assert!(frame.child.is_none());
        assert!(!frame.poll_ended());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_frame_clear_kills_running_game() {
        let mut frame = ProcessFrame::new(shell("sleep 30"));
        frame.load("game-players/connected.html");
        assert!(frame.child.is_some());
        assert!(!frame.poll_ended());

        frame.clear();
        assert_eq!(frame.source(), "");
        assert!(frame.child.is_none());
        assert!(!frame.poll_ended());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_frame_placeholder_reaches_runner() {
        // The runner fails unless it was handed the substituted url.
        let runner = RunnerCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "test \"$1\" = x.html".to_string(), "sh".to_string(), "{url}".to_string()],
        };
        let mut frame = ProcessFrame::new(runner);
        frame.load("x.html");
        let mut child = frame.child.take().unwrap();
        assert!(child.wait().unwrap().success());
    }

    #[test]
    fn test_process_frame_missing_program_keeps_source() {
        let mut frame = ProcessFrame::new(RunnerCommand {
            program: "/nonexistent/gameshelf-runner".to_string(),
            args: Vec::new(),
        });
        frame.load("game-players/ghostbusters.html");
        assert_eq!(frame.source(), "game-players/ghostbusters.html");
        assert!(frame.child.is_none());
        assert!(!frame.poll_ended());
    }

    #[test]
    fn test_process_frame_clear_without_child() {
        let mut frame = ProcessFrame::new(runner(&[]));
        assert!(!frame.poll_ended());
        frame.clear();
        assert_eq!(frame.source(), "");
    }
}
