//! Scripted fakes for capture and restore tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Instant;

use crate::gateway::{Gateway, GatewayError, directive};
use crate::process::{LaunchError, Launcher, ProcessError, ProcessTable};

use super::{Window, Workspace};

pub(crate) fn window(address: &str, class: &str, at: [i32; 2], size: [i32; 2]) -> Window {
    Window {
        address: address.into(),
        workspace: Workspace {
            id: Some(1),
            name: "1".into(),
        },
        at,
        size,
        class: class.into(),
        title: class.into(),
        floating: false,
        pid: 0,
        cmdline: class.into(),
    }
}

/// One `clients -j` entry as hyprctl prints it.
pub(crate) fn client_json(
    address: &str,
    class: &str,
    workspace: i32,
    at: [i32; 2],
    size: [i32; 2],
    floating: bool,
    pid: i64,
) -> String {
    serde_json::json!({
        "address": address,
        "mapped": true,
        "at": at,
        "size": size,
        "workspace": {"id": workspace, "name": workspace.to_string()},
        "floating": floating,
        "class": class,
        "title": class,
        "pid": pid,
    })
    .to_string()
}

/// Fake compositor.
///
/// Each `clients -j` query consumes the next scripted response; the last
/// one repeats. Every command is recorded.
pub(crate) struct FakeGateway {
    clients: Mutex<VecDeque<String>>,
    active: String,
    fail_prefixes: Vec<String>,
    clients_limit: Option<usize>,
    clients_at: Mutex<Vec<Instant>>,
    commands: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub(crate) fn new(clients: Vec<String>) -> Self {
        Self {
            clients: Mutex::new(clients.into()),
            active: "{}".into(),
            fail_prefixes: Vec::new(),
            clients_limit: None,
            clients_at: Mutex::new(Vec::new()),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_active(mut self, address: &str) -> Self {
        self.active = serde_json::json!({ "address": address }).to_string();
        self
    }

    pub(crate) fn with_active_raw(mut self, raw: &str) -> Self {
        self.active = raw.into();
        self
    }

    /// Fail every command starting with `prefix`.
    pub(crate) fn failing_on(mut self, prefix: &str) -> Self {
        self.fail_prefixes.push(prefix.into());
        self
    }

    /// Answer the first `served` client queries, fail the rest.
    pub(crate) fn failing_clients_after(mut self, served: usize) -> Self {
        self.clients_limit = Some(served);
        self
    }

    /// When each `clients -j` query arrived.
    pub(crate) fn clients_at(&self) -> Vec<Instant> {
        self.clients_at.lock().unwrap().clone()
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub(crate) fn commands_starting_with(&self, prefix: &str) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}

impl Gateway for FakeGateway {
    async fn execute(&self, command: &str) -> Result<String, GatewayError> {
        self.commands.lock().unwrap().push(command.to_string());

        if self.fail_prefixes.iter().any(|p| command.starts_with(p)) {
            return Err(GatewayError::Exit {
                command: command.to_string(),
                code: Some(1),
                stderr: "scripted failure".into(),
            });
        }

        match command {
            directive::CLIENTS => {
                let mut clients_at = self.clients_at.lock().unwrap();
                clients_at.push(Instant::now());
                if self.clients_limit.is_some_and(|limit| clients_at.len() > limit) {
                    return Err(GatewayError::Exit {
                        command: command.to_string(),
                        code: Some(1),
                        stderr: "compositor went away".into(),
                    });
                }
                drop(clients_at);

                let mut clients = self.clients.lock().unwrap();
                let response = if clients.len() > 1 {
                    clients.pop_front().unwrap_or_default()
                } else {
                    clients.front().cloned().unwrap_or_default()
                };
                Ok(response)
            }
            directive::ACTIVE_WINDOW => Ok(self.active.clone()),
            _ => Ok("ok".into()),
        }
    }
}

/// Fake process table; unknown pids fail.
pub(crate) struct FakeProcesses {
    cmdlines: HashMap<i64, String>,
}

impl FakeProcesses {
    pub(crate) fn new(entries: &[(i64, &str)]) -> Self {
        Self {
            cmdlines: entries
                .iter()
                .map(|(pid, cmd)| (*pid, (*cmd).to_string()))
                .collect(),
        }
    }
}

impl ProcessTable for FakeProcesses {
    async fn cmdline(&self, pid: i64) -> Result<String, ProcessError> {
        self.cmdlines
            .get(&pid)
            .cloned()
            .ok_or(ProcessError::Empty { pid })
    }
}

/// Records launches; commands in the failing set return a spawn error.
#[derive(Default)]
pub(crate) struct FakeLauncher {
    launched: Mutex<Vec<String>>,
    launched_at: Mutex<Vec<Instant>>,
    failing: HashSet<String>,
}

impl FakeLauncher {
    pub(crate) fn failing(commands: &[&str]) -> Self {
        Self {
            launched: Mutex::new(Vec::new()),
            launched_at: Mutex::new(Vec::new()),
            failing: commands.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    pub(crate) fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }

    pub(crate) fn launched_at(&self) -> Vec<Instant> {
        self.launched_at.lock().unwrap().clone()
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, command: &str) -> Result<(), LaunchError> {
        if self.failing.contains(command) {
            return Err(LaunchError::Spawn {
                command: command.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        self.launched.lock().unwrap().push(command.to_string());
        self.launched_at.lock().unwrap().push(Instant::now());
        Ok(())
    }
}
