//! RabbitMQ availability checks (`nwdiag broker`).
//!
//! Installed means the control tool can be launched at all: only a
//! "not found" spawn error counts as missing, so a `rabbitmqctl status` that
//! exits non-zero (broker stopped, cookie mismatch) still counts as
//! installed. Running means the AMQP port answers a protocol header.

use crate::config::{BROKER_HOST, BROKER_PORT, BROKER_TIMEOUT, COMMAND_TIMEOUT};
use crate::pipeline::{CheckResult, FailureKind, Pipeline};
use crate::report::Reporter;
use crate::shell::{run_program, which, Platform};
use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// AMQP 0-9-1 protocol header sent to open a connection.
const AMQP_HEADER: &[u8; 8] = b"AMQP\x00\x00\x09\x01";

/// Where Chocolatey unpacks RabbitMQ on Windows.
const CHOCO_RABBITMQ_TOOLS: &str = r"C:\ProgramData\chocolatey\lib\rabbitmq\tools";

/// Suggested command to start the broker, if one is known for `platform`.
pub fn start_command(platform: &Platform) -> Option<&'static str> {
    match platform {
        Platform::Windows => Some("net start RabbitMQ"),
        Platform::MacOS => Some("brew services start rabbitmq"),
        Platform::Linux => Some("sudo systemctl start rabbitmq-server"),
        Platform::Other(_) => None,
    }
}

/// Control tool name for `platform`.
pub fn control_tool(platform: &Platform) -> &'static str {
    if platform.is_windows() {
        "rabbitmqctl.bat"
    } else {
        "rabbitmqctl"
    }
}

/// Newest `rabbitmq_server*/sbin` directory under a Chocolatey tools dir.
pub fn choco_sbin(tools_dir: &Path) -> Option<PathBuf> {
    let mut servers: Vec<PathBuf> = std::fs::read_dir(tools_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("rabbitmq_server")
        })
        .map(|entry| entry.path())
        .collect();
    servers.sort();

    let sbin = servers.pop()?.join("sbin");
    sbin.is_dir().then_some(sbin)
}

/// Whether something speaking AMQP answers at `host:port`.
///
/// Sends the protocol header and waits for any reply. A broker answers
/// with `Connection.Start`, or with its own header on a version mismatch;
/// either proves it is running.
pub fn broker_responds(host: &str, port: u16, timeout: Duration) -> bool {
    let addrs = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs,
        Err(e) => {
            tracing::warn!("Cannot resolve {}:{}: {}", host, port, e);
            return false;
        }
    };

    for addr in addrs {
        match probe_addr(&addr, timeout) {
            Ok(true) => return true,
            Ok(false) => tracing::debug!("{} closed without answering", addr),
            Err(e) => tracing::debug!("No broker at {}: {}", addr, e),
        }
    }
    false
}

fn probe_addr(addr: &std::net::SocketAddr, timeout: Duration) -> io::Result<bool> {
    let mut stream = TcpStream::connect_timeout(addr, timeout)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;
    stream.write_all(AMQP_HEADER)?;

    let mut buf = [0u8; 8];
    let n = stream.read(&mut buf)?;
    Ok(n > 0)
}

/// Checks that RabbitMQ is installed and running.
pub struct BrokerCollector {
    platform: Platform,
    control: Option<PathBuf>,
    host: String,
    port: u16,
    timeout: Duration,
}

impl BrokerCollector {
    /// Collector for the local broker on the current platform.
    pub fn new() -> Self {
        let platform = Platform::current();
        let control = locate_control_tool(&platform);
        Self {
            platform,
            control,
            host: BROKER_HOST.to_string(),
            port: BROKER_PORT,
            timeout: BROKER_TIMEOUT,
        }
    }

    /// Use `program` as the control tool (looked up on `PATH` if bare).
    pub fn with_control_tool(mut self, program: impl Into<PathBuf>) -> Self {
        self.control = Some(program.into());
        self
    }

    /// Probe a different endpoint.
    pub fn with_endpoint(mut self, host: &str, port: u16) -> Self {
        self.host = host.to_string();
        self.port = port;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Whether the control tool can be launched.
    pub fn is_installed(&self) -> bool {
        let program = self
            .control
            .clone()
            .unwrap_or_else(|| PathBuf::from(control_tool(&self.platform)));

        match run_program(&program, &["status"], None, COMMAND_TIMEOUT) {
            Ok(result) => {
                tracing::debug!(
                    "{} status exited with {:?}",
                    program.display(),
                    result.exit_code
                );
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => true,
            Err(e) => {
                tracing::warn!("An unexpected error occurred: {}", e);
                false
            }
        }
    }

    pub fn is_running(&self) -> bool {
        broker_responds(&self.host, self.port, self.timeout)
    }

    pub fn check_installed(&self) -> CheckResult {
        if self.is_installed() {
            CheckResult::success("Yay! RabbitMQ is installed.")
        } else {
            CheckResult::error(
                FailureKind::ExecutableNotFound,
                "ERROR: RabbitMQ is NOT installed. Please install RabbitMQ.",
            )
        }
    }

    pub fn check_running(&self) -> CheckResult {
        if self.is_running() {
            return CheckResult::success("Yay! RabbitMQ is running.");
        }
        let down = "RabbitMQ is NOT running. Please start RabbitMQ.";
        match start_command(&self.platform) {
            Some(cmd) => CheckResult::error(
                FailureKind::ServiceUnreachable,
                format!("{}\nTry the following command: {}", down, cmd),
            ),
            None => CheckResult::error(
                FailureKind::UnrecognizedPlatform,
                format!("{}\nPlatform not recognized.", down),
            ),
        }
    }

    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new()
            .check("broker-installed", || self.check_installed())
            .check("broker-running", || self.check_running())
    }

    /// Run both checks and log the outcome.
    pub fn run(&self, reporter: &mut Reporter) -> Vec<CheckResult> {
        reporter.header();
        reporter.divider();
        self.pipeline().run(reporter)
    }
}

impl Default for BrokerCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn locate_control_tool(platform: &Platform) -> Option<PathBuf> {
    let tool = control_tool(platform);
    if let Some(path) = which(tool) {
        return Some(path);
    }
    if platform.is_windows() {
        return choco_sbin(Path::new(CHOCO_RABBITMQ_TOOLS))
            .map(|sbin| sbin.join(tool))
            .filter(|p| p.is_file());
    }
    None
}
